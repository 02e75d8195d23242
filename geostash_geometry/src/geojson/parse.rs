use crate::{
	Coordinates, Geometry, GeometryType, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry,
	MultiPolygonGeometry, PointGeometry, PolygonGeometry, RingGeometry,
};
use anyhow::{Context, Result, anyhow, bail, ensure};
use serde_json::Value;

/// Parses a GeoJSON geometry object. The `type` tag decides how deep the
/// `coordinates` must be nested; any mismatch is an error.
pub fn parse_geojson_geometry(value: &Value) -> Result<Geometry> {
	ensure!(value.is_object(), "geometry must be a JSON object");
	let tag = value
		.get("type")
		.and_then(Value::as_str)
		.ok_or_else(|| anyhow!("geometry must have a type"))?;
	let geometry_type: GeometryType = tag.parse()?;

	let coordinates = || -> Result<TemporaryCoordinates> {
		let raw = value
			.get("coordinates")
			.ok_or_else(|| anyhow!("{tag} must have coordinates"))?;
		TemporaryCoordinates::parse(raw).with_context(|| format!("coordinates of {tag}"))
	};

	Ok(match geometry_type {
		GeometryType::Point => Geometry::Point(PointGeometry(coordinates()?.into_c0()?)),
		GeometryType::MultiPoint => Geometry::MultiPoint(MultiPointGeometry(
			coordinates()?.into_c1()?.into_iter().map(PointGeometry).collect(),
		)),
		GeometryType::LineString => Geometry::LineString(LineStringGeometry(coordinates()?.into_c1()?)),
		GeometryType::MultiLineString => Geometry::MultiLineString(MultiLineStringGeometry(
			coordinates()?.into_c2()?.into_iter().map(LineStringGeometry).collect(),
		)),
		GeometryType::Polygon => Geometry::Polygon(polygon(coordinates()?.into_c2()?)),
		GeometryType::MultiPolygon => Geometry::MultiPolygon(MultiPolygonGeometry(
			coordinates()?.into_c3()?.into_iter().map(polygon).collect(),
		)),
		GeometryType::GeometryCollection => {
			let members = value
				.get("geometries")
				.and_then(Value::as_array)
				.ok_or_else(|| anyhow!("GeometryCollection must have a 'geometries' array"))?;
			Geometry::GeometryCollection(members.iter().map(parse_geojson_geometry).collect::<Result<_>>()?)
		}
	})
}

fn polygon(rings: Vec<Vec<Coordinates>>) -> PolygonGeometry {
	PolygonGeometry(rings.into_iter().map(RingGeometry).collect())
}

/// Coordinates of unknown depth, resolved against the geometry tag afterwards.
enum TemporaryCoordinates {
	C0(Coordinates),
	C1(Vec<Coordinates>),
	C2(Vec<Vec<Coordinates>>),
	C3(Vec<Vec<Vec<Coordinates>>>),
}

impl TemporaryCoordinates {
	fn parse(value: &Value) -> Result<Self> {
		let array = value
			.as_array()
			.ok_or_else(|| anyhow!("expected an array, got {value}"))?;

		if array.first().is_some_and(Value::is_number) {
			ensure!(array.len() == 2, "a position must have exactly two numbers, got {value}");
			let x = array[0].as_f64().ok_or_else(|| anyhow!("invalid number {}", array[0]))?;
			let y = array[1].as_f64().ok_or_else(|| anyhow!("expected a number, got {}", array[1]))?;
			return Ok(Self::C0(Coordinates::new(x, y)));
		}

		let children = array.iter().map(Self::parse).collect::<Result<Vec<_>>>()?;
		let depth = children.first().map_or(1, |c| c.depth() + 1);
		ensure!(
			children.iter().all(|c| c.depth() + 1 == depth),
			"mixed nesting depth in coordinates"
		);
		Ok(match depth {
			1 => Self::C1(children.into_iter().map(Self::into_c0).collect::<Result<_>>()?),
			2 => Self::C2(children.into_iter().map(Self::into_c1).collect::<Result<_>>()?),
			3 => Self::C3(children.into_iter().map(Self::into_c2).collect::<Result<_>>()?),
			_ => bail!("coordinates are nested too deeply"),
		})
	}

	fn depth(&self) -> usize {
		match self {
			Self::C0(_) => 0,
			Self::C1(_) => 1,
			Self::C2(_) => 2,
			Self::C3(_) => 3,
		}
	}

	fn into_c0(self) -> Result<Coordinates> {
		match self {
			Self::C0(c) => Ok(c),
			other => Err(other.mismatch(0)),
		}
	}

	fn into_c1(self) -> Result<Vec<Coordinates>> {
		match self {
			Self::C1(c) => Ok(c),
			// `[]` parses as depth 1 but is an empty list at every depth.
			Self::C2(c) if c.is_empty() => Ok(Vec::new()),
			Self::C3(c) if c.is_empty() => Ok(Vec::new()),
			other => Err(other.mismatch(1)),
		}
	}

	fn into_c2(self) -> Result<Vec<Vec<Coordinates>>> {
		match self {
			Self::C2(c) => Ok(c),
			Self::C1(c) if c.is_empty() => Ok(Vec::new()),
			Self::C3(c) if c.is_empty() => Ok(Vec::new()),
			other => Err(other.mismatch(2)),
		}
	}

	fn into_c3(self) -> Result<Vec<Vec<Vec<Coordinates>>>> {
		match self {
			Self::C3(c) => Ok(c),
			Self::C1(c) if c.is_empty() => Ok(Vec::new()),
			Self::C2(c) if c.is_empty() => Ok(Vec::new()),
			other => Err(other.mismatch(3)),
		}
	}

	fn mismatch(&self, expected: usize) -> anyhow::Error {
		anyhow!("expected coordinates nested {expected} levels deep, found {}", self.depth())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use serde_json::json;

	#[test]
	fn parse_point() {
		let geometry = parse_geojson_geometry(&json!({"type": "Point", "coordinates": [1, 2]})).unwrap();
		assert_eq!(geometry, Geometry::new_point([1.0, 2.0]));
	}

	#[rstest]
	#[case::point(Geometry::new_point([1.0, 2.0]))]
	#[case::multi_point(Geometry::new_multi_point(vec![[1.0, 2.0], [3.0, 4.0]]))]
	#[case::line_string(Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]]))]
	#[case::multi_line_string(Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]]]))]
	#[case::polygon(Geometry::new_polygon(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]))]
	#[case::multi_polygon(Geometry::new_example())]
	#[case::collection(Geometry::new_collection(vec![Geometry::new_point([1.0, 2.0]), Geometry::new_example()]))]
	fn written_geometry_parses_back(#[case] geometry: Geometry) {
		assert_eq!(parse_geojson_geometry(&geometry.to_json()).unwrap(), geometry);
	}

	#[rstest]
	#[case::unknown_tag(json!({"type": "Circle", "coordinates": [0, 0]}), "unknown geometry type")]
	#[case::missing_type(json!({"coordinates": [0, 0]}), "must have a type")]
	#[case::missing_coordinates(json!({"type": "Point"}), "must have coordinates")]
	#[case::three_numbers(json!({"type": "Point", "coordinates": [0, 0, 5]}), "exactly two numbers")]
	#[case::string_number(json!({"type": "Point", "coordinates": [0, "a"]}), "expected a number")]
	#[case::point_as_line(json!({"type": "Point", "coordinates": [[0, 0], [1, 1]]}), "nested 0 levels")]
	#[case::line_as_polygon(json!({"type": "LineString", "coordinates": [[[0, 0], [1, 1]]]}), "nested 1 levels")]
	#[case::mixed_depth(json!({"type": "MultiPoint", "coordinates": [[0, 0], [[1, 1]]]}), "mixed nesting")]
	#[case::not_an_object(json!([1, 2]), "must be a JSON object")]
	#[case::collection_without_members(json!({"type": "GeometryCollection"}), "'geometries' array")]
	fn rejects_malformed_geometry(#[case] value: Value, #[case] message: &str) {
		let err = format!("{:#}", parse_geojson_geometry(&value).unwrap_err());
		assert!(err.contains(message), "'{err}' does not contain '{message}'");
	}

	#[test]
	fn empty_coordinate_lists_fit_every_depth() {
		let line = parse_geojson_geometry(&json!({"type": "MultiPolygon", "coordinates": []})).unwrap();
		assert_eq!(line, Geometry::MultiPolygon(MultiPolygonGeometry(vec![])));
	}
}

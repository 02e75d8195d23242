use super::*;
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fmt::Debug;

/// A geometry in the canonical interchange model.
///
/// Every consumer matches exhaustively on the variant; there is no "unknown" shape.
/// A `GeometryCollection` owns its members, so nesting is always finite.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(PointGeometry),
	MultiPoint(MultiPointGeometry),
	LineString(LineStringGeometry),
	MultiLineString(MultiLineStringGeometry),
	Polygon(PolygonGeometry),
	MultiPolygon(MultiPolygonGeometry),
	GeometryCollection(Vec<Geometry>),
}

impl Geometry {
	pub fn new_point(value: [f64; 2]) -> Self {
		Self::Point(PointGeometry::from(value))
	}
	pub fn new_line_string(value: Vec<[f64; 2]>) -> Self {
		Self::LineString(LineStringGeometry::from(value))
	}
	pub fn new_polygon(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::Polygon(PolygonGeometry::from(value))
	}
	pub fn new_multi_point(value: Vec<[f64; 2]>) -> Self {
		Self::MultiPoint(MultiPointGeometry::from(value))
	}
	pub fn new_multi_line_string(value: Vec<Vec<[f64; 2]>>) -> Self {
		Self::MultiLineString(MultiLineStringGeometry::from(value))
	}
	pub fn new_multi_polygon(value: Vec<Vec<Vec<[f64; 2]>>>) -> Self {
		Self::MultiPolygon(MultiPolygonGeometry::from(value))
	}
	pub fn new_collection(value: Vec<Geometry>) -> Self {
		Self::GeometryCollection(value)
	}

	#[must_use]
	pub fn get_type(&self) -> GeometryType {
		match self {
			Geometry::Point(_) => GeometryType::Point,
			Geometry::MultiPoint(_) => GeometryType::MultiPoint,
			Geometry::LineString(_) => GeometryType::LineString,
			Geometry::MultiLineString(_) => GeometryType::MultiLineString,
			Geometry::Polygon(_) => GeometryType::Polygon,
			Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
			Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
		}
	}

	/// Checks the structural rules of the variant, descending into collections.
	pub fn verify(&self) -> Result<()> {
		let result = match self {
			Geometry::Point(g) => g.verify(),
			Geometry::MultiPoint(g) => g.verify(),
			Geometry::LineString(g) => g.verify(),
			Geometry::MultiLineString(g) => g.verify(),
			Geometry::Polygon(g) => g.verify(),
			Geometry::MultiPolygon(g) => g.verify(),
			Geometry::GeometryCollection(members) => members
				.iter()
				.enumerate()
				.try_for_each(|(i, g)| g.verify().with_context(|| format!("collection member {i}"))),
		};
		result.with_context(|| format!("invalid {}", self.get_type()))
	}

	#[must_use]
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		match self {
			Geometry::Point(g) => g.compute_bounds(),
			Geometry::MultiPoint(g) => g.compute_bounds(),
			Geometry::LineString(g) => g.compute_bounds(),
			Geometry::MultiLineString(g) => g.compute_bounds(),
			Geometry::Polygon(g) => g.compute_bounds(),
			Geometry::MultiPolygon(g) => g.compute_bounds(),
			Geometry::GeometryCollection(members) => merge_bounds(members.iter().map(Geometry::compute_bounds)),
		}
	}

	/// The GeoJSON geometry object.
	#[must_use]
	pub fn to_json(&self) -> Value {
		let coordinates = match self {
			Geometry::Point(g) => g.to_coord_json(),
			Geometry::MultiPoint(g) => g.to_coord_json(),
			Geometry::LineString(g) => g.to_coord_json(),
			Geometry::MultiLineString(g) => g.to_coord_json(),
			Geometry::Polygon(g) => g.to_coord_json(),
			Geometry::MultiPolygon(g) => g.to_coord_json(),
			Geometry::GeometryCollection(members) => {
				return json!({
					"type": "GeometryCollection",
					"geometries": members.iter().map(Geometry::to_json).collect::<Vec<_>>(),
				});
			}
		};
		json!({ "type": self.get_type().as_str(), "coordinates": coordinates })
	}

	/// Parses a GeoJSON geometry object.
	pub fn from_geojson(value: &Value) -> Result<Self> {
		crate::geojson::parse_geojson_geometry(value)
	}

	#[cfg(any(test, feature = "test"))]
	pub fn new_example() -> Self {
		Self::new_multi_polygon(vec![
			vec![
				vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]],
				vec![[2.0, 1.0], [2.5, 2.0], [3.0, 1.0], [2.0, 1.0]],
			],
			vec![vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]]],
		])
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner: &dyn Debug = match self {
			Geometry::Point(g) => g,
			Geometry::MultiPoint(g) => g,
			Geometry::LineString(g) => g,
			Geometry::MultiLineString(g) => g,
			Geometry::Polygon(g) => g,
			Geometry::MultiPolygon(g) => g,
			Geometry::GeometryCollection(members) => members,
		};
		f.debug_tuple(self.get_type().as_str()).field(inner).finish()
	}
}

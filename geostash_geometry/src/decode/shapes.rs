use crate::{
	Coordinates, Geometry, LineStringGeometry, MultiLineStringGeometry, MultiPointGeometry, MultiPolygonGeometry,
	PointGeometry, PolygonGeometry, RingGeometry,
};
use anyhow::{Result, bail};
use shapefile::{Point, PointM, PointZ, PolygonRing, Shape};

/// Anything with a planar position. Z and M are dropped.
trait Planar {
	fn coordinates(&self) -> Coordinates;
}

impl Planar for Point {
	fn coordinates(&self) -> Coordinates {
		Coordinates::new(self.x, self.y)
	}
}

impl Planar for PointM {
	fn coordinates(&self) -> Coordinates {
		Coordinates::new(self.x, self.y)
	}
}

impl Planar for PointZ {
	fn coordinates(&self) -> Coordinates {
		Coordinates::new(self.x, self.y)
	}
}

/// Maps a decoded shape onto the geometry model.
///
/// A polyline with a single part becomes a `LineString`, a polygon with a single outer ring
/// becomes a `Polygon`; otherwise the multi variant is used. Null shapes and multipatches have
/// no counterpart and are rejected.
pub fn shape_to_geometry(shape: &Shape) -> Result<Geometry> {
	Ok(match shape {
		Shape::Point(p) => point(p),
		Shape::PointM(p) => point(p),
		Shape::PointZ(p) => point(p),
		Shape::Multipoint(m) => multi_point(m.points()),
		Shape::MultipointM(m) => multi_point(m.points()),
		Shape::MultipointZ(m) => multi_point(m.points()),
		Shape::Polyline(l) => polyline(l.parts()),
		Shape::PolylineM(l) => polyline(l.parts()),
		Shape::PolylineZ(l) => polyline(l.parts()),
		Shape::Polygon(p) => polygon(p.rings()),
		Shape::PolygonM(p) => polygon(p.rings()),
		Shape::PolygonZ(p) => polygon(p.rings()),
		Shape::NullShape => bail!("null shapes are not supported"),
		Shape::Multipatch(_) => bail!("multipatch shapes are not supported"),
	})
}

fn positions<P: Planar>(points: &[P]) -> Vec<Coordinates> {
	points.iter().map(Planar::coordinates).collect()
}

fn point<P: Planar>(p: &P) -> Geometry {
	Geometry::Point(PointGeometry(p.coordinates()))
}

fn multi_point<P: Planar>(points: &[P]) -> Geometry {
	Geometry::MultiPoint(MultiPointGeometry(
		points.iter().map(|p| PointGeometry(p.coordinates())).collect(),
	))
}

fn polyline<P: Planar>(parts: &[Vec<P>]) -> Geometry {
	let mut lines: Vec<LineStringGeometry> = parts.iter().map(|part| LineStringGeometry(positions(part))).collect();
	if lines.len() == 1 {
		return Geometry::LineString(lines.remove(0));
	}
	Geometry::MultiLineString(MultiLineStringGeometry(lines))
}

/// Every outer ring opens a new polygon; the inner rings that follow are its holes.
fn polygon<P: Planar>(rings: &[PolygonRing<P>]) -> Geometry {
	let mut polygons: Vec<PolygonGeometry> = Vec::new();
	for ring in rings {
		let geometry = RingGeometry(positions(ring.points()));
		match (ring, polygons.last_mut()) {
			(PolygonRing::Inner(_), Some(current)) => current.0.push(geometry),
			(PolygonRing::Inner(_), None) => {
				log::warn!("polygon starts with an inner ring, treating it as outer");
				polygons.push(PolygonGeometry(vec![geometry]));
			}
			(PolygonRing::Outer(_), _) => polygons.push(PolygonGeometry(vec![geometry])),
		}
	}
	if polygons.len() == 1 {
		return Geometry::Polygon(polygons.remove(0));
	}
	Geometry::MultiPolygon(MultiPolygonGeometry(polygons))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::GeometryType;
	use pretty_assertions::assert_eq;
	use shapefile::{Multipoint, Polygon, Polyline, PolylineZ};

	#[test]
	fn points_drop_z_and_m() {
		assert_eq!(
			shape_to_geometry(&Shape::PointZ(PointZ::new(1.0, 2.0, 3.0, 4.0))).unwrap(),
			Geometry::new_point([1.0, 2.0])
		);
		assert_eq!(
			shape_to_geometry(&Shape::PointM(PointM::new(5.0, 6.0, 7.0))).unwrap(),
			Geometry::new_point([5.0, 6.0])
		);
	}

	#[test]
	fn multipoint() {
		let shape = Shape::Multipoint(Multipoint::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]));
		assert_eq!(
			shape_to_geometry(&shape).unwrap(),
			Geometry::new_multi_point(vec![[1.0, 2.0], [3.0, 4.0]])
		);
	}

	#[test]
	fn single_part_polyline_is_line_string() {
		let shape = Shape::Polyline(Polyline::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]));
		assert_eq!(
			shape_to_geometry(&shape).unwrap(),
			Geometry::new_line_string(vec![[0.0, 0.0], [1.0, 1.0]])
		);
	}

	#[test]
	fn multi_part_polyline_is_multi_line_string() {
		let shape = Shape::PolylineZ(PolylineZ::with_parts(vec![
			vec![PointZ::new(0.0, 0.0, 1.0, 0.0), PointZ::new(1.0, 1.0, 1.0, 0.0)],
			vec![PointZ::new(5.0, 5.0, 1.0, 0.0), PointZ::new(6.0, 6.0, 1.0, 0.0)],
		]));
		assert_eq!(
			shape_to_geometry(&shape).unwrap(),
			Geometry::new_multi_line_string(vec![vec![[0.0, 0.0], [1.0, 1.0]], vec![[5.0, 5.0], [6.0, 6.0]]])
		);
	}

	#[test]
	fn polygon_with_one_outer_ring() {
		let ring = vec![
			Point::new(0.0, 0.0),
			Point::new(0.0, 4.0),
			Point::new(4.0, 4.0),
			Point::new(4.0, 0.0),
			Point::new(0.0, 0.0),
		];
		let shape = Shape::Polygon(Polygon::new(PolygonRing::Outer(ring)));
		let geometry = shape_to_geometry(&shape).unwrap();
		assert_eq!(geometry.get_type(), GeometryType::Polygon);
		assert_eq!(geometry.compute_bounds(), Some([0.0, 0.0, 4.0, 4.0]));
		assert!(geometry.verify().is_ok());
	}

	#[test]
	fn polygon_groups_holes_under_outer_rings() {
		let outer = |x: f64| {
			PolygonRing::Outer(vec![
				Point::new(x, 0.0),
				Point::new(x, 4.0),
				Point::new(x + 4.0, 4.0),
				Point::new(x + 4.0, 0.0),
				Point::new(x, 0.0),
			])
		};
		let hole = PolygonRing::Inner(vec![
			Point::new(1.0, 1.0),
			Point::new(2.0, 1.0),
			Point::new(2.0, 2.0),
			Point::new(1.0, 2.0),
			Point::new(1.0, 1.0),
		]);
		let shape = Shape::Polygon(Polygon::with_rings(vec![outer(0.0), hole, outer(10.0)]));
		let Geometry::MultiPolygon(multi) = shape_to_geometry(&shape).unwrap() else {
			panic!("expected a MultiPolygon");
		};
		assert_eq!(multi.0.iter().map(|p| p.0.len()).collect::<Vec<_>>(), vec![2, 1]);
	}

	#[test]
	fn null_shape_is_rejected() {
		let err = shape_to_geometry(&Shape::NullShape).unwrap_err();
		assert!(err.to_string().contains("null shapes"));
	}
}

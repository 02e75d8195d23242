use super::{GeometryTrait, RingGeometry, merge_bounds};
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// An exterior ring followed by zero or more holes.
#[derive(Clone, PartialEq)]
pub struct PolygonGeometry(pub Vec<RingGeometry>);

impl PolygonGeometry {
	#[must_use]
	pub fn exterior(&self) -> Option<&RingGeometry> {
		self.0.first()
	}
}

impl GeometryTrait for PolygonGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(!self.0.is_empty(), "Polygon must have at least one ring");
		self.0.iter().try_for_each(RingGeometry::verify)
	}

	fn to_coord_json(&self) -> Value {
		Value::from_iter(self.0.iter().map(RingGeometry::to_coord_json))
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(RingGeometry::compute_bounds))
	}
}

impl Debug for PolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(PolygonGeometry => RingGeometry);

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn square_with_hole() -> PolygonGeometry {
		PolygonGeometry::from(vec![
			vec![[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]],
			vec![[1.0, 1.0], [2.0, 1.0], [2.0, 2.0], [1.0, 1.0]],
		])
	}

	#[test]
	fn verify() {
		assert!(square_with_hole().verify().is_ok());
		assert!(PolygonGeometry(vec![]).verify().is_err());
		let open_hole = PolygonGeometry::from(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]]);
		assert!(open_hole.verify().is_err());
	}

	#[test]
	fn exterior_and_bounds() {
		let polygon = square_with_hole();
		assert_eq!(polygon.exterior().map(|r| r.0.len()), Some(5));
		assert_eq!(polygon.compute_bounds(), Some([0.0, 0.0, 4.0, 4.0]));
	}

	#[test]
	fn coord_json_nests_rings() {
		let polygon = PolygonGeometry::from(vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]);
		assert_eq!(
			polygon.to_coord_json(),
			json!([[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]])
		);
	}
}

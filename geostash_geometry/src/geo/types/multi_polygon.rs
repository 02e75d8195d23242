use super::{GeometryTrait, PolygonGeometry, merge_bounds};
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct MultiPolygonGeometry(pub Vec<PolygonGeometry>);

impl GeometryTrait for MultiPolygonGeometry {
	fn verify(&self) -> Result<()> {
		self.0.iter().try_for_each(PolygonGeometry::verify)
	}

	fn to_coord_json(&self) -> Value {
		Value::from_iter(self.0.iter().map(PolygonGeometry::to_coord_json))
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(PolygonGeometry::compute_bounds))
	}
}

impl Debug for MultiPolygonGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(MultiPolygonGeometry => PolygonGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn bounds_span_all_polygons() {
		let multi = MultiPolygonGeometry::from(vec![
			vec![vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
			vec![vec![[5.0, 5.0], [6.0, 5.0], [6.0, 7.0], [5.0, 5.0]]],
		]);
		assert!(multi.verify().is_ok());
		assert_eq!(multi.compute_bounds(), Some([0.0, 0.0, 6.0, 7.0]));
	}
}

use super::{GeometryTrait, PointGeometry, merge_bounds};
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

#[derive(Clone, PartialEq)]
pub struct MultiPointGeometry(pub Vec<PointGeometry>);

impl GeometryTrait for MultiPointGeometry {
	fn verify(&self) -> Result<()> {
		self.0.iter().try_for_each(PointGeometry::verify)
	}

	fn to_coord_json(&self) -> Value {
		Value::from_iter(self.0.iter().map(PointGeometry::to_coord_json))
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		merge_bounds(self.0.iter().map(PointGeometry::compute_bounds))
	}
}

impl Debug for MultiPointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(MultiPointGeometry => PointGeometry);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_multi_point_is_valid_but_unbounded() {
		let empty = MultiPointGeometry(vec![]);
		assert!(empty.verify().is_ok());
		assert_eq!(empty.compute_bounds(), None);
	}

	#[test]
	fn bounds() {
		let multi = MultiPointGeometry::from(&[[1, 5], [-2, 3]]);
		assert_eq!(multi.compute_bounds(), Some([-2.0, 3.0, 1.0, 5.0]));
	}
}

use super::{Coordinates, GeometryTrait, coordinates::bounds_of};
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// A closed loop of positions: at least four, first equals last.
#[derive(Clone, PartialEq)]
pub struct RingGeometry(pub Vec<Coordinates>);

impl GeometryTrait for RingGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 4, "ring must have at least 4 positions");
		ensure!(self.0.first() == self.0.last(), "ring must be closed");
		self.0.iter().try_for_each(Coordinates::verify)
	}

	fn to_coord_json(&self) -> Value {
		Value::from_iter(self.0.iter().map(Coordinates::to_json))
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		bounds_of(&self.0)
	}
}

impl Debug for RingGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(RingGeometry => Coordinates);

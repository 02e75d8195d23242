use super::{Coordinates, GeometryTrait, coordinates::bounds_of};
use anyhow::{Result, ensure};
use serde_json::Value;
use std::fmt::Debug;

/// An open path of at least two positions.
#[derive(Clone, PartialEq)]
pub struct LineStringGeometry(pub Vec<Coordinates>);

impl GeometryTrait for LineStringGeometry {
	fn verify(&self) -> Result<()> {
		ensure!(self.0.len() >= 2, "LineString must have at least two positions");
		self.0.iter().try_for_each(Coordinates::verify)
	}

	fn to_coord_json(&self) -> Value {
		Value::from_iter(self.0.iter().map(Coordinates::to_json))
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		bounds_of(&self.0)
	}
}

impl Debug for LineStringGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(&self.0).finish()
	}
}

crate::impl_from_vec!(LineStringGeometry => Coordinates);

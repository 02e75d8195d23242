use super::{Coordinates, GeometryTrait};
use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

/// A single position.
#[derive(Clone, PartialEq)]
pub struct PointGeometry(pub Coordinates);

impl PointGeometry {
	#[must_use]
	pub fn new(c: Coordinates) -> Self {
		Self(c)
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0.x()
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0.y()
	}
}

impl GeometryTrait for PointGeometry {
	fn verify(&self) -> Result<()> {
		self.0.verify()
	}

	fn to_coord_json(&self) -> Value {
		self.0.to_json()
	}

	fn compute_bounds(&self) -> Option<[f64; 4]> {
		Some(self.0.bounds())
	}
}

impl Debug for PointGeometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl<T> From<T> for PointGeometry
where
	Coordinates: From<T>,
{
	fn from(value: T) -> Self {
		Self(Coordinates::from(value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn accessors_and_debug() {
		let p = PointGeometry::from(&[1, 2]);
		assert_eq!(p.x(), 1.0);
		assert_eq!(p.y(), 2.0);
		assert_eq!(format!("{p:?}"), "[1.0, 2.0]");
	}

	#[test]
	fn bounds_are_degenerate() {
		assert_eq!(PointGeometry::from([3.0, 7.0]).compute_bounds(), Some([3.0, 7.0, 3.0, 7.0]));
	}

	#[test]
	fn coord_json() {
		assert_eq!(PointGeometry::from([1.5, 2.5]).to_coord_json(), json!([1.5, 2.5]));
	}

	#[test]
	fn verify() {
		assert!(PointGeometry::from([0.0, 0.0]).verify().is_ok());
		assert!(PointGeometry::from([f64::NAN, 0.0]).verify().is_err());
	}
}

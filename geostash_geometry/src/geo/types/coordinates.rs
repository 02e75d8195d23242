use anyhow::{Result, ensure};
use serde_json::{Value, json};
use std::fmt::Debug;

/// A 2D position, `[x, y]` (longitude, latitude in the stored reference system).
#[derive(Clone, Copy, PartialEq)]
pub struct Coordinates([f64; 2]);

impl Coordinates {
	#[must_use]
	pub fn new(x: f64, y: f64) -> Self {
		Self([x, y])
	}

	#[must_use]
	pub fn x(&self) -> f64 {
		self.0[0]
	}

	#[must_use]
	pub fn y(&self) -> f64 {
		self.0[1]
	}

	pub fn verify(&self) -> Result<()> {
		ensure!(
			self.0.iter().all(|v| v.is_finite()),
			"coordinates {:?} are not finite",
			self.0
		);
		Ok(())
	}

	#[must_use]
	pub fn to_json(&self) -> Value {
		json!([self.0[0], self.0[1]])
	}

	pub(crate) fn bounds(&self) -> [f64; 4] {
		[self.0[0], self.0[1], self.0[0], self.0[1]]
	}
}

impl<'a, T> From<&'a [T; 2]> for Coordinates
where
	T: Copy + Into<f64>,
{
	fn from(value: &'a [T; 2]) -> Self {
		Coordinates([value[0].into(), value[1].into()])
	}
}

impl From<[f64; 2]> for Coordinates {
	fn from(value: [f64; 2]) -> Self {
		Coordinates(value)
	}
}

impl From<(f64, f64)> for Coordinates {
	fn from(value: (f64, f64)) -> Self {
		Coordinates([value.0, value.1])
	}
}

impl From<Coordinates> for [f64; 2] {
	fn from(value: Coordinates) -> Self {
		value.0
	}
}

impl Debug for Coordinates {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

/// Bounds of a run of positions.
pub(crate) fn bounds_of(coords: &[Coordinates]) -> Option<[f64; 4]> {
	super::merge_bounds(coords.iter().map(|c| Some(c.bounds())))
}

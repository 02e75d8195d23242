use anyhow::{Context, Result, ensure};
use std::str::FromStr;

/// Axis-aligned query rectangle in stored coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl BBox {
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<BBox> {
		let bbox = BBox {
			x_min,
			y_min,
			x_max,
			y_max,
		};
		ensure!(
			[x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()),
			"bbox values must be finite"
		);
		ensure!(x_min <= x_max && y_min <= y_max, "bbox minimum must not exceed maximum: {bbox:?}");
		Ok(bbox)
	}
}

/// Parses `x_min,y_min,x_max,y_max`.
impl FromStr for BBox {
	type Err = anyhow::Error;

	fn from_str(s: &str) -> Result<Self> {
		let values = s
			.split(',')
			.map(|v| v.trim().parse::<f64>().with_context(|| format!("invalid bbox value '{v}'")))
			.collect::<Result<Vec<_>>>()?;
		ensure!(values.len() == 4, "bbox must have 4 values, got {}", values.len());
		BBox::new(values[0], values[1], values[2], values[3])
	}
}

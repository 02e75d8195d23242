use anyhow::Result;
use serde_json::Value;
use std::fmt::Debug;

/// Shared interface of the per-variant geometry types.
pub trait GeometryTrait: Debug + Clone {
	/// Checks the structural rules of the variant: finite coordinates, enough positions,
	/// closed rings. The store refuses to persist anything that fails here.
	fn verify(&self) -> Result<()>;

	/// The GeoJSON `coordinates` member of this geometry.
	fn to_coord_json(&self) -> Value;

	/// `[x_min, y_min, x_max, y_max]`, or `None` for a geometry without positions.
	fn compute_bounds(&self) -> Option<[f64; 4]>;
}

/// Union of several bounding boxes; `None` entries are skipped.
pub fn merge_bounds<I>(bounds: I) -> Option<[f64; 4]>
where
	I: IntoIterator<Item = Option<[f64; 4]>>,
{
	bounds.into_iter().flatten().reduce(|a, b| {
		[a[0].min(b[0]), a[1].min(b[1]), a[2].max(b[2]), a[3].max(b[3])]
	})
}

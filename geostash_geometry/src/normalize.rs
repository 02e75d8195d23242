//! Feature normalization and geometry-type statistics.

use crate::{GeoFeature, GeometryType, decode::RawRecord};
use anyhow::Result;
use std::collections::BTreeMap;

/// Turns one decoded record into a feature: attributes are sanitized, the geometry is kept as is.
pub fn normalize_record(record: RawRecord) -> GeoFeature {
	let mut feature = GeoFeature::new(record.geometry);
	feature.set_properties(record.attributes.sanitized());
	feature
}

/// Collects the whole record sequence into features. The first decode failure aborts;
/// an empty sequence yields an empty vector.
pub fn normalize<I>(records: I) -> Result<Vec<GeoFeature>>
where
	I: IntoIterator<Item = Result<RawRecord>>,
{
	let features = records
		.into_iter()
		.map(|record| record.map(normalize_record))
		.collect::<Result<Vec<_>>>()?;
	log::debug!("normalized {} features", features.len());
	Ok(features)
}

/// Number of features per geometry type. Only types that occur are present.
pub fn count_by_geometry_type(features: &[GeoFeature]) -> BTreeMap<GeometryType, usize> {
	let mut counts = BTreeMap::new();
	for feature in features {
		*counts.entry(feature.geometry.get_type()).or_insert(0) += 1;
	}
	counts
}

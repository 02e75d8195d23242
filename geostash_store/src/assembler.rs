use crate::StoredFeatureRow;
use geostash_geometry::{GeoCollection, GeoFeature};

/// A stored row in its API shape: id, properties and geometry. Timestamps are not exposed.
pub fn assemble_feature(row: StoredFeatureRow) -> GeoFeature {
	GeoFeature {
		id: Some(row.id),
		geometry: row.geometry,
		properties: row.properties,
	}
}

/// Rows to a collection, in the order given.
pub fn assemble_collection(rows: Vec<StoredFeatureRow>) -> GeoCollection {
	GeoCollection::from(rows.into_iter().map(assemble_feature).collect::<Vec<_>>())
}

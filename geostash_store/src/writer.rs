use crate::{FeatureStore, SRID, StoreError, store::timestamp, wkb::encode_geometry};
use anyhow::{Context, Result};
use geostash_derive::context;
use geostash_geometry::GeoFeature;
use r2d2_sqlite::rusqlite::{Transaction, TransactionBehavior, params};

/// Persists normalized features, all or nothing.
#[derive(Clone, Debug)]
pub struct FeatureWriter {
	store: FeatureStore,
}

impl FeatureWriter {
	pub fn new(store: FeatureStore) -> Self {
		Self { store }
	}

	/// Inserts every feature as a new row inside one transaction and returns the number of rows
	/// committed, which equals `features.len()`.
	///
	/// If any feature fails, including a geometry that cannot be encoded, the transaction is
	/// rolled back before returning and no row of the batch is visible.
	pub fn bulk_insert(&self, features: &[GeoFeature]) -> Result<usize, StoreError> {
		let mut conn = self.store.connection().map_err(StoreError::BulkInsert)?;
		let transaction = conn
			.transaction_with_behavior(TransactionBehavior::Immediate)
			.context("starting transaction")
			.map_err(StoreError::BulkInsert)?;

		match insert_all(&transaction, features) {
			Ok(count) => {
				transaction
					.commit()
					.context("committing transaction")
					.map_err(StoreError::BulkInsert)?;
				log::info!("inserted {count} features into '{}'", self.store.name());
				Ok(count)
			}
			Err(err) => {
				if let Err(rollback_err) = transaction.rollback() {
					log::error!("rolling back bulk insert failed: {rollback_err}");
				}
				log::warn!("bulk insert of {} features rolled back", features.len());
				Err(StoreError::BulkInsert(err))
			}
		}
	}
}

#[context("inserting {} features", features.len())]
fn insert_all(transaction: &Transaction<'_>, features: &[GeoFeature]) -> Result<usize> {
	let now = timestamp()?;
	let mut statement = transaction.prepare_cached(
		"INSERT INTO features (properties, geometry, srid, min_x, min_y, max_x, max_y, created_at, updated_at)
		VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
	)?;
	for (index, feature) in features.iter().enumerate() {
		let encoded = encode_feature(feature).with_context(|| format!("feature {index}"))?;
		let [min_x, min_y, max_x, max_y] = encoded.bounds.map_or([None; 4], |b| b.map(Some));
		statement
			.execute(params![encoded.properties, encoded.geometry, SRID, min_x, min_y, max_x, max_y, now])
			.with_context(|| format!("storing feature {index}"))?;
	}
	Ok(features.len())
}

/// The column values of one feature.
struct EncodedFeature {
	properties: String,
	geometry: Vec<u8>,
	bounds: Option<[f64; 4]>,
}

fn encode_feature(feature: &GeoFeature) -> Result<EncodedFeature> {
	Ok(EncodedFeature {
		properties: serde_json::to_string(&feature.properties.to_json())?,
		geometry: encode_geometry(&feature.geometry)?,
		bounds: feature.geometry.compute_bounds(),
	})
}

use thiserror::Error;

/// Failures of store operations. "Not found" is never an error; repository methods report
/// it as `None` or `false`.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Some feature of a batch could not be stored. The whole batch was rolled back.
	#[error("bulk insert failed, no features were stored: {0:#}")]
	BulkInsert(anyhow::Error),

	/// A geometry could not be turned into its stored form. Nothing was changed.
	#[error("geometry construction failed: {0:#}")]
	GeometryConstruction(anyhow::Error),

	#[error("no update data provided (properties or geometry required)")]
	NoUpdateFields,

	#[error(transparent)]
	Backend(#[from] anyhow::Error),
}

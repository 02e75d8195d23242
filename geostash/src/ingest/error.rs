use geostash_store::StoreError;
use thiserror::Error;

/// Ways an ingest can fail.
///
/// The first four variants describe bad input and are reported to the client as such
/// ([`IngestError::is_validation`]). Everything else is a processing failure.
#[derive(Debug, Error)]
pub enum IngestError {
	#[error("only .zip and .tar archives are allowed, got '{0}'")]
	UnsupportedArchive(String),

	#[error("No .shp file found in archive")]
	MissingPrimaryFile,

	#[error("Invalid shapefile: missing required components ({})", .missing.join(", "))]
	IncompleteComponentSet { missing: Vec<String> },

	#[error("No features found in shapefile")]
	EmptyDataset,

	#[error("failed to unpack archive: {0:#}")]
	Archive(anyhow::Error),

	#[error("failed to decode shapefile: {0:#}")]
	Decode(anyhow::Error),

	#[error(transparent)]
	Store(#[from] StoreError),
}

impl IngestError {
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			IngestError::UnsupportedArchive(_)
				| IngestError::MissingPrimaryFile
				| IngestError::IncompleteComponentSet { .. }
				| IngestError::EmptyDataset
		)
	}
}

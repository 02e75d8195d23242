use super::{ArchiveKind, IngestError, ScratchSpace, ShapefileComponents, extract, locate_components};
use geostash_geometry::{
	GeoFeature, GeometryType,
	decode::ShapefileSource,
	normalize::{count_by_geometry_type, normalize},
};
use geostash_store::{FeatureStore, FeatureWriter};
use serde::Serialize;
use std::{
	collections::BTreeMap,
	path::{Path, PathBuf},
};

/// Outcome of a successful ingest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestSummary {
	pub features_count: usize,
	pub geometry_types: BTreeMap<GeometryType, usize>,
}

/// Runs archives through unpack, validation, decoding, normalization and the atomic bulk insert.
///
/// Steps run strictly one after another on the calling thread. Every temporary file is gone
/// when a call returns.
#[derive(Clone, Debug)]
pub struct Ingestor {
	writer: FeatureWriter,
	upload_dir: PathBuf,
}

impl Ingestor {
	pub fn new(store: FeatureStore, upload_dir: &Path) -> Self {
		Self {
			writer: FeatureWriter::new(store),
			upload_dir: upload_dir.to_path_buf(),
		}
	}

	pub fn upload_dir(&self) -> &Path {
		&self.upload_dir
	}

	/// Ingests an archive received over the network.
	pub fn ingest_upload(&self, kind: ArchiveKind, bytes: &[u8]) -> Result<IngestSummary, IngestError> {
		let scratch = ScratchSpace::create(&self.upload_dir, kind).map_err(IngestError::Archive)?;
		scratch.write_archive(bytes).map_err(IngestError::Archive)?;
		log::debug!("stored upload of {} bytes as '{}'", bytes.len(), scratch.archive_path().display());
		self.ingest_scratch(kind, &scratch)
	}

	/// Ingests a local archive. The file itself is copied and left untouched.
	pub fn ingest_file(&self, path: &Path) -> Result<IngestSummary, IngestError> {
		let name = path.file_name().unwrap_or_default().to_string_lossy();
		let kind = ArchiveKind::from_file_name(&name)?;
		let scratch = ScratchSpace::create(&self.upload_dir, kind).map_err(IngestError::Archive)?;
		scratch.copy_archive(path).map_err(IngestError::Archive)?;
		self.ingest_scratch(kind, &scratch)
	}

	fn ingest_scratch(&self, kind: ArchiveKind, scratch: &ScratchSpace) -> Result<IngestSummary, IngestError> {
		extract(kind, scratch.archive_path(), scratch.extract_dir()).map_err(IngestError::Archive)?;
		let components = locate_components(scratch.extract_dir())?;
		let features = decode_features(&components)?;
		if features.is_empty() {
			return Err(IngestError::EmptyDataset);
		}

		let features_count = self.writer.bulk_insert(&features)?;
		let geometry_types = count_by_geometry_type(&features);
		log::info!(
			"ingested {features_count} features from '{}'",
			components.shp.file_name().unwrap_or_default().to_string_lossy()
		);
		Ok(IngestSummary {
			features_count,
			geometry_types,
		})
	}
}

fn decode_features(components: &ShapefileComponents) -> Result<Vec<GeoFeature>, IngestError> {
	let mut source =
		ShapefileSource::open(&components.shp, &components.shx, &components.dbf).map_err(IngestError::Decode)?;
	normalize(source.decode()).map_err(IngestError::Decode)
}

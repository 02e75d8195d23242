use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";
pub const DEFAULT_MAX_SIZE_MB: u64 = 50;

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
	/// Directory for uploaded archives and their extracted contents. Default: ./uploads
	#[serde()]
	pub dir: Option<PathBuf>,

	/// Largest accepted request body in MiB. Default: 50
	#[serde()]
	pub max_size_mb: Option<u64>,
}

impl UploadConfig {
	pub fn override_optional_dir(&mut self, dir: &Option<PathBuf>) {
		if dir.is_some() {
			self.dir.clone_from(dir);
		}
	}
	pub fn override_optional_max_size_mb(&mut self, max_size_mb: &Option<u64>) {
		if max_size_mb.is_some() {
			self.max_size_mb = *max_size_mb;
		}
	}

	pub fn dir(&self) -> PathBuf {
		self.dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
	}

	/// Body limit in bytes.
	pub fn body_limit(&self) -> usize {
		let megabytes = self.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB);
		usize::try_from(megabytes.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
	}

	/// Makes a relative `dir` relative to `base`.
	pub fn resolve_paths(&mut self, base: &Path) {
		let resolved = self.dir.as_ref().filter(|d| d.is_relative()).map(|d| base.join(d));
		if resolved.is_some() {
			self.dir = resolved;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = UploadConfig::default();
		assert_eq!(config.dir(), PathBuf::from("./uploads"));
		assert_eq!(config.body_limit(), 50 * 1024 * 1024);
	}

	#[test]
	fn override_limit() {
		let mut config = UploadConfig::default();
		config.override_optional_max_size_mb(&Some(2));
		config.override_optional_dir(&None);
		assert_eq!(config.body_limit(), 2 * 1024 * 1024);
		assert_eq!(config.dir(), PathBuf::from("./uploads"));
	}
}

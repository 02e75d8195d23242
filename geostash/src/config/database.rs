use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE_PATH: &str = "./geostash.sqlite";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
	/// SQLite database file. Created on first use. Default: ./geostash.sqlite
	#[serde()]
	pub path: Option<PathBuf>,

	/// Maximum number of pooled connections. Default: 10
	#[serde()]
	pub pool_size: Option<u32>,
}

impl DatabaseConfig {
	pub fn override_optional_path(&mut self, path: &Option<PathBuf>) {
		if path.is_some() {
			self.path.clone_from(path);
		}
	}
	pub fn override_optional_pool_size(&mut self, pool_size: &Option<u32>) {
		if pool_size.is_some() {
			self.pool_size = *pool_size;
		}
	}

	pub fn path(&self) -> PathBuf {
		self.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
	}

	pub fn pool_size(&self) -> u32 {
		self.pool_size.unwrap_or(DEFAULT_POOL_SIZE).max(1)
	}

	/// Makes a relative `path` relative to `base`.
	pub fn resolve_paths(&mut self, base: &Path) {
		let resolved = self.path.as_ref().filter(|p| p.is_relative()).map(|p| base.join(p));
		if resolved.is_some() {
			self.path = resolved;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = DatabaseConfig::default();
		assert_eq!(config.path(), PathBuf::from("./geostash.sqlite"));
		assert_eq!(config.pool_size(), 10);
	}

	#[test]
	fn pool_size_is_at_least_one() {
		let config = DatabaseConfig {
			path: None,
			pool_size: Some(0),
		};
		assert_eq!(config.pool_size(), 1);
	}

	#[test]
	fn resolves_relative_paths_only() {
		let mut relative = DatabaseConfig {
			path: Some(PathBuf::from("data/features.sqlite")),
			pool_size: None,
		};
		relative.resolve_paths(Path::new("/etc/geostash"));
		assert_eq!(relative.path(), PathBuf::from("/etc/geostash/data/features.sqlite"));

		let mut absolute = DatabaseConfig {
			path: Some(PathBuf::from("/var/lib/features.sqlite")),
			pool_size: None,
		};
		absolute.resolve_paths(Path::new("/etc/geostash"));
		assert_eq!(absolute.path(), PathBuf::from("/var/lib/features.sqlite"));
	}
}

use super::{DatabaseConfig, ServerConfig, UploadConfig};
use anyhow::Result;
use geostash_derive::context;
use serde::Deserialize;
use std::{
	fs::File,
	io::{BufReader, Read},
	path::Path,
};

#[derive(Default, Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// HTTP server configuration
	#[serde(default)]
	pub server: ServerConfig,

	/// Feature store configuration
	#[serde(default)]
	pub database: DatabaseConfig,

	/// Upload handling
	#[serde(default)]
	pub upload: UploadConfig,
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a file. Relative paths inside it are resolved against the file's directory.
	#[context("reading config file '{}'", path.display())]
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path)?;
		let mut config = Config::from_reader(BufReader::new(file))?;
		if let Some(base) = path.parent() {
			config.resolve_paths(base);
		}
		Ok(config)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		self.database.resolve_paths(base);
		self.upload.resolve_paths(base);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use std::{fs, path::PathBuf};

	#[test]
	fn parse_full_config() {
		let config = Config::from_string(
			"server:\n  ip: 127.0.0.1\n  port: 51234\ndatabase:\n  path: /data/features.sqlite\n  pool_size: 4\nupload:\n  dir: /tmp/uploads\n  max_size_mb: 10\n",
		)
		.unwrap();

		assert_eq!(
			config,
			Config {
				server: ServerConfig {
					ip: Some("127.0.0.1".to_string()),
					port: Some(51234),
				},
				database: DatabaseConfig {
					path: Some(PathBuf::from("/data/features.sqlite")),
					pool_size: Some(4),
				},
				upload: UploadConfig {
					dir: Some(PathBuf::from("/tmp/uploads")),
					max_size_mb: Some(10),
				},
			}
		);
	}

	#[test]
	fn parse_empty_config() {
		assert_eq!(Config::from_string("").unwrap(), Config::default());
	}

	#[test]
	fn parse_invalid_config() {
		assert!(Config::from_string("server:\n  pi: 3.14.15.9").is_err());
		assert!(Config::from_string("storage: {}").is_err());
	}

	#[test]
	fn paths_are_relative_to_the_config_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("geostash.yml");
		fs::write(&path, "database:\n  path: features.sqlite\nupload:\n  dir: /abs/uploads\n").unwrap();

		let config = Config::from_path(&path).unwrap();
		assert_eq!(config.database.path(), dir.path().join("features.sqlite"));
		assert_eq!(config.upload.dir(), PathBuf::from("/abs/uploads"));
	}

	#[test]
	fn missing_file_names_the_path() {
		let err = Config::from_path(Path::new("/does/not/exist.yml")).unwrap_err();
		assert!(format!("{err:#}").contains("reading config file '/does/not/exist.yml'"));
	}
}

pub mod ingest;
pub mod serve;
pub mod stats;

use anyhow::Result;
use geostash::config::Config;
use std::path::PathBuf;

fn load_config(path: &Option<PathBuf>) -> Result<Config> {
	match path {
		Some(path) => Config::from_path(path),
		None => Ok(Config::default()),
	}
}

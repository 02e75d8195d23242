use super::load_config;
use anyhow::Result;
use geostash::store::{FeatureRepository, FeatureStore};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true)]
pub struct Subcommand {
	/// Path to a configuration file (YAML format).
	#[arg(short = 'c', long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// SQLite database file. Default: ./geostash.sqlite
	#[arg(long, env = "GEOSTASH_DATABASE", value_name = "PATH")]
	pub database: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = load_config(&arguments.config)?;
	config.database.override_optional_path(&arguments.database);

	let store = FeatureStore::open(&config.database.path(), config.database.pool_size())?;
	let total = FeatureRepository::new(store).count()?;
	println!("totalFeatures: {total}");
	Ok(())
}

use super::load_config;
use anyhow::Result;
use geostash::{ingest::Ingestor, store::FeatureStore};
use std::path::PathBuf;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// Zip or tar archive containing a shapefile (.shp, .shx and .dbf).
	#[arg(required = true)]
	pub archive: PathBuf,

	/// Path to a configuration file (YAML format).
	#[arg(short = 'c', long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// SQLite database file. Default: ./geostash.sqlite
	#[arg(long, env = "GEOSTASH_DATABASE", value_name = "PATH")]
	pub database: Option<PathBuf>,

	/// Scratch directory for unpacking. Default: ./uploads
	#[arg(long, env = "GEOSTASH_UPLOAD_DIR", value_name = "DIR")]
	pub upload_dir: Option<PathBuf>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = load_config(&arguments.config)?;
	config.database.override_optional_path(&arguments.database);
	config.upload.override_optional_dir(&arguments.upload_dir);

	let store = FeatureStore::open(&config.database.path(), config.database.pool_size())?;
	let ingestor = Ingestor::new(store, &config.upload.dir());
	let summary = ingestor.ingest_file(&arguments.archive)?;

	println!("featuresCount: {}", summary.features_count);
	for (geometry_type, count) in &summary.geometry_types {
		println!("   {geometry_type}: {count}");
	}
	Ok(())
}

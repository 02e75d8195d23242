use super::load_config;
use anyhow::Result;
use geostash::server::FeatureServer;
use std::path::PathBuf;
use tokio::time::{Duration, sleep};

#[derive(clap::Args, Debug)]
#[command(disable_version_flag = true, verbatim_doc_comment)]
pub struct Subcommand {
	/// Path to a configuration file (YAML format) with server, database and upload settings.
	/// Command line arguments will override configuration file settings.
	#[arg(short = 'c', long, value_name = "FILE", display_order = 0)]
	pub config: Option<PathBuf>,

	/// Serve via socket ip. Default: 0.0.0.0
	#[arg(short = 'i', long, display_order = 0)]
	pub ip: Option<String>,

	/// Serve via port. Default: 8080
	#[arg(short, long, display_order = 0)]
	pub port: Option<u16>,

	/// SQLite database file. Default: ./geostash.sqlite
	#[arg(long, env = "GEOSTASH_DATABASE", value_name = "PATH", display_order = 1)]
	pub database: Option<PathBuf>,

	/// Directory for uploaded archives while they are processed. Default: ./uploads
	#[arg(long, env = "GEOSTASH_UPLOAD_DIR", value_name = "DIR", display_order = 1)]
	pub upload_dir: Option<PathBuf>,

	/// Size of the database connection pool. Default: 10
	#[arg(long, display_order = 2)]
	pub pool_size: Option<u32>,

	/// Largest accepted upload in MiB. Default: 50
	#[arg(long, value_name = "MB", display_order = 2)]
	pub max_upload_mb: Option<u64>,

	/// Shutdown server automatically after x milliseconds.
	#[arg(long, display_order = 4)]
	pub auto_shutdown: Option<u64>,
}

#[tokio::main]
pub async fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = load_config(&arguments.config)?;
	config.server.override_optional_ip(&arguments.ip);
	config.server.override_optional_port(&arguments.port);
	config.database.override_optional_path(&arguments.database);
	config.database.override_optional_pool_size(&arguments.pool_size);
	config.upload.override_optional_dir(&arguments.upload_dir);
	config.upload.override_optional_max_size_mb(&arguments.max_upload_mb);

	let mut server = FeatureServer::from_config(&config)?;
	eprintln!("   database:   {}", config.database.path().display());
	eprintln!("   uploads:    {}", config.upload.dir().display());

	server.start().await?;
	if let Some(addr) = server.local_addr() {
		eprintln!("server listens on http://{addr}");
	}

	if let Some(milliseconds) = arguments.auto_shutdown {
		sleep(Duration::from_millis(milliseconds)).await;
	} else {
		tokio::signal::ctrl_c().await?;
	}

	server.stop().await;
	Ok(())
}

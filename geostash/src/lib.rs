//! # geostash
//!
//! geostash ingests zipped (or tarred) shapefiles into a spatially indexed SQLite store and
//! serves the stored features as GeoJSON over HTTP.
//!
//! - [`config`]: YAML configuration with command line overrides
//! - [`ingest`]: archive extraction, component validation and the ingest pipeline
//! - [`server`]: the axum application and its lifecycle
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use geostash::{config::Config, server::FeatureServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_string("server: { port: 8080 }")?;
//!     let mut server = FeatureServer::from_config(&config)?;
//!     server.start().await?;
//!     tokio::signal::ctrl_c().await?;
//!     server.stop().await;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ingest;
pub mod server;

pub use geostash_derive as derive;
pub use geostash_geometry as geometry;
pub use geostash_store as store;

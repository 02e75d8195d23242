//! geostash configuration.
//!
//! A YAML file (`geostash.yml`) with three optional sections:
//! - [`ServerConfig`](crate::config::ServerConfig): address to bind to
//! - [`DatabaseConfig`](crate::config::DatabaseConfig): SQLite file and pool size
//! - [`UploadConfig`](crate::config::UploadConfig): scratch directory and upload limit
//!
//! Every value has a default, so an empty file is a valid configuration. Command line
//! arguments are applied on top through the `override_optional_*` methods.

mod database;
mod main;
mod server;
mod upload;

pub use database::DatabaseConfig;
pub use main::Config;
pub use server::ServerConfig;
pub use upload::UploadConfig;

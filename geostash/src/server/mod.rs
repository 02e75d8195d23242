//! HTTP server for the feature API.

mod error;
mod feature_server;
mod handlers;
mod response;
mod routes;

pub use error::ApiError;
pub use feature_server::FeatureServer;
pub use handlers::AppState;
pub use routes::build_router;

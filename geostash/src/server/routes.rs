//! Router composition for the geostash server.

use super::handlers::{
	AppState, delete_all_features, delete_feature, get_feature, list_features, stats, update_feature, upload,
};
use axum::{
	Router,
	extract::DefaultBodyLimit,
	routing::{get, post},
};

/// The whole application: status probe plus the feature API under `/api`.
/// `body_limit` caps every request body, uploads included.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
	let api = Router::new()
		.route("/upload", post(upload))
		.route("/features", get(list_features).delete(delete_all_features))
		.route(
			"/features/{id}",
			get(get_feature).put(update_feature).delete(delete_feature),
		)
		.route("/stats", get(stats));

	Router::new()
		.route("/status", get(|| async { "ready!" }))
		.nest("/api", api)
		.layer(DefaultBodyLimit::max(body_limit))
		.with_state(state)
}

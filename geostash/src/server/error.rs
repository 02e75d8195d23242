use super::response::{failure, format_error_chain};
use crate::ingest::IngestError;
use axum::{
	extract::multipart::MultipartError,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use geostash_store::StoreError;
use thiserror::Error;

/// Everything a handler can fail with, already sorted by the status it answers with.
#[derive(Debug, Error)]
pub enum ApiError {
	/// 400, the message is shown to the client as is.
	#[error("{0}")]
	InvalidRequest(String),

	/// 404
	#[error("Feature not found")]
	NotFound,

	/// Reading the multipart body failed; answers with the status axum assigns.
	#[error(transparent)]
	Payload(#[from] MultipartError),

	/// 500 with `message` as the summary and the cause chain as `error`.
	#[error("{message}: {cause:#}")]
	Failed { message: &'static str, cause: anyhow::Error },
}

impl ApiError {
	/// Maps a store failure, using `message` as the summary of a 500.
	pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
		move |err| match err {
			StoreError::NoUpdateFields => ApiError::InvalidRequest(err.to_string()),
			err => ApiError::Failed {
				message,
				cause: anyhow::Error::new(err),
			},
		}
	}
}

impl From<IngestError> for ApiError {
	fn from(err: IngestError) -> Self {
		if err.is_validation() {
			ApiError::InvalidRequest(err.to_string())
		} else {
			ApiError::Failed {
				message: "Failed to process shapefile",
				cause: anyhow::Error::new(err),
			}
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		match self {
			ApiError::InvalidRequest(message) => {
				log::debug!("send 400: {message}");
				failure(StatusCode::BAD_REQUEST, &message, None)
			}
			ApiError::NotFound => failure(StatusCode::NOT_FOUND, "Feature not found", None),
			ApiError::Payload(err) => {
				log::debug!("send {}: {}", err.status(), err.body_text());
				failure(err.status(), &err.body_text(), None)
			}
			ApiError::Failed { message, cause } => {
				log::error!("{message}:\n{}", format_error_chain(&cause));
				failure(StatusCode::INTERNAL_SERVER_ERROR, message, Some(format!("{cause:#}")))
			}
		}
	}
}

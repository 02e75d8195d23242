//! The JSON envelope every API response is wrapped in.
//!
//! Success: `{"success": true, "message"?: ..., "data"?: ...}`
//! Failure: `{"success": false, "message": ..., "error"?: ...}`

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::fmt::Write;

fn envelope(status: StatusCode, fields: Vec<(&str, Value)>) -> Response {
	let mut body = Map::new();
	body.insert("success".to_string(), Value::Bool(status.is_success()));
	for (key, value) in fields {
		body.insert(key.to_string(), value);
	}
	(status, Json(Value::Object(body))).into_response()
}

pub fn ok_data(data: Value) -> Response {
	envelope(StatusCode::OK, vec![("data", data)])
}

pub fn ok_message(message: &str) -> Response {
	envelope(StatusCode::OK, vec![("message", Value::from(message))])
}

pub fn ok_message_data(status: StatusCode, message: &str, data: Value) -> Response {
	envelope(status, vec![("message", Value::from(message)), ("data", data)])
}

pub fn failure(status: StatusCode, message: &str, error: Option<String>) -> Response {
	let mut fields = vec![("message", Value::from(message))];
	if let Some(error) = error {
		fields.push(("error", Value::from(error)));
	}
	envelope(status, fields)
}

/// Multi-line rendering of an error and its causes, for the log.
pub fn format_error_chain(err: &anyhow::Error) -> String {
	let mut result = err.to_string();
	for (i, cause) in err.chain().skip(1).enumerate() {
		if i == 0 {
			result.push_str("\n  Caused by:");
		}
		let _ = write!(result, "\n    {cause}");
	}
	result
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Directus admin client.

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for Directus API calls.
pub type Result<T> = std::result::Result<T, DirectusError>;

/// Directus error code for a create that collides with a unique field.
pub const RECORD_NOT_UNIQUE: &str = "RECORD_NOT_UNIQUE";

/// Errors returned by [`crate::DirectusClient`].
#[derive(Error, Debug)]
pub enum DirectusError {
	/// Base URL is not an absolute http(s) URL.
	#[error("Invalid base URL: {0}")]
	InvalidBaseUrl(String),

	/// The HTTP client could not be constructed.
	#[error("Failed to build HTTP client: {0}")]
	ClientBuild(#[source] reqwest::Error),

	/// Transport-level failure (connection refused, timeout, TLS).
	#[error("HTTP request failed: {0}")]
	Request(#[source] reqwest::Error),

	/// `/auth/login` answered with a non-2xx status.
	#[error("Admin login rejected with status {status}; check the admin email and password")]
	AuthenticationFailed {
		status: u16,
		message: Option<String>,
	},

	/// The API answered with a non-2xx status.
	#[error("Directus returned {status}: {body}")]
	Api {
		status: u16,
		/// `errors[0].extensions.code`
		code: Option<String>,
		/// `errors[0].message`
		message: Option<String>,
		/// Raw response payload.
		body: String,
	},

	/// A 2xx response did not have the expected shape.
	#[error("Failed to parse Directus response: {0}")]
	ParseFailed(String),
}

impl DirectusError {
	/// Builds an [`DirectusError::Api`] from a failed response, extracting
	/// the first entry of the Directus error envelope when present.
	pub fn from_response(status: u16, body: String) -> Self {
		let first = serde_json::from_str::<ErrorBody>(&body)
			.ok()
			.and_then(|b| b.errors.into_iter().next());

		let (code, message) = match first {
			Some(entry) => (entry.extensions.and_then(|e| e.code), entry.message),
			None => (None, None),
		};

		DirectusError::Api {
			status,
			code,
			message,
			body,
		}
	}

	/// The Directus error code, if the server supplied one.
	pub fn code(&self) -> Option<&str> {
		match self {
			DirectusError::Api { code, .. } => code.as_deref(),
			_ => None,
		}
	}

	/// True when the server refused a create because the record exists.
	pub fn is_record_not_unique(&self) -> bool {
		self.code() == Some(RECORD_NOT_UNIQUE)
	}

	/// The first API error message, when the server supplied one.
	pub fn api_message(&self) -> Option<&str> {
		match self {
			DirectusError::Api { message, .. } | DirectusError::AuthenticationFailed { message, .. } => {
				message.as_deref()
			}
			_ => None,
		}
	}
}

/// Directus error envelope: `{ "errors": [ { "message", "extensions": { "code" } } ] }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEntry {
	#[serde(default)]
	pub message: Option<String>,
	#[serde(default)]
	pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorExtensions {
	#[serde(default)]
	pub code: Option<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_response_extracts_code_and_message() {
		let body = r#"{"errors":[{"message":"Value for field \"name\" in collection \"directus_roles\" has to be unique.","extensions":{"code":"RECORD_NOT_UNIQUE","collection":"directus_roles","field":"name"}}]}"#;
		let err = DirectusError::from_response(400, body.to_string());

		assert!(err.is_record_not_unique());
		assert_eq!(err.code(), Some("RECORD_NOT_UNIQUE"));
		assert!(err.api_message().unwrap().contains("has to be unique"));
	}

	#[test]
	fn from_response_tolerates_non_json_body() {
		let err = DirectusError::from_response(502, "Bad Gateway".to_string());

		assert!(!err.is_record_not_unique());
		assert_eq!(err.code(), None);
		assert_eq!(err.api_message(), None);
		assert!(err.to_string().contains("Bad Gateway"));
	}

	#[test]
	fn other_codes_are_not_conflicts() {
		let body = r#"{"errors":[{"message":"You don't have permission to access this.","extensions":{"code":"FORBIDDEN"}}]}"#;
		let err = DirectusError::from_response(403, body.to_string());

		assert!(!err.is_record_not_unique());
		assert_eq!(err.code(), Some("FORBIDDEN"));
	}

	#[test]
	fn empty_error_list_has_no_code() {
		let err = DirectusError::from_response(400, r#"{"errors":[]}"#.to_string());
		assert_eq!(err.code(), None);
	}

	#[test]
	fn invalid_base_url_is_never_a_conflict() {
		assert!(!DirectusError::InvalidBaseUrl("nope".to_string()).is_record_not_unique());
		assert!(!DirectusError::ParseFailed("bad".to_string()).is_record_not_unique());
	}
}

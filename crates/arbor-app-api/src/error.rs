// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the arbor API client.

use std::sync::Arc;

use arbor_app_session::SessionError;
use arbor_common_http::RetryableError;
use thiserror::Error;

use crate::config::ConfigError;

/// API client errors.
///
/// Authorization failures are the only class the client handles on its own
/// (one renewal, one replay); everything else is surfaced unchanged for the
/// caller to interpret.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request was replayed once after a successful renewal and was
	/// rejected again. The client will not renew a second time for the same
	/// logical request.
	#[error("authorization failed")]
	AuthorizationFailed,

	/// The shared renewal cycle this request was waiting on settled with an
	/// error. Stored credentials have already been cleared; the user must
	/// sign in again.
	#[error("session renewal failed: {0}")]
	RenewalFailed(Arc<SessionError>),

	/// Network-level failure (timeout, DNS, connection reset). Never
	/// triggers renewal.
	#[error("HTTP request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// Any non-2xx, non-401 response, passed through with status and body
	/// intact.
	#[error("server error ({status}): {message}")]
	Upstream { status: u16, message: String },

	/// A 2xx response whose body did not match the expected shape.
	#[error("failed to parse response: {0}")]
	Parse(String),

	/// Client construction failed.
	#[error("invalid configuration: {0}")]
	Config(#[from] ConfigError),

	/// A request path could not be joined onto the base URL.
	#[error("invalid URL: {0}")]
	Url(#[from] url::ParseError),

	/// Session-layer failure outside the renewal path (e.g. storing a
	/// freshly issued token pair after sign-in).
	#[error("session error: {0}")]
	Session(#[from] SessionError),
}

impl RetryableError for ApiError {
	fn is_retryable(&self) -> bool {
		match self {
			ApiError::Transport(e) => e.is_retryable(),
			ApiError::Upstream { status, .. } => {
				matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
			}
			_ => false,
		}
	}
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

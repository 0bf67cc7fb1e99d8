// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session error types.

use arbor_app_credentials::CredentialError;
use thiserror::Error;

/// Errors that can occur while managing or renewing the session token pair.
///
/// Every variant except [`Url`](Self::Url) is a renewal failure that clears
/// the stored credentials: the session is over and the user must sign in
/// again.
#[derive(Debug, Error)]
pub enum SessionError {
	/// Renewal was attempted with no refresh token in the store.
	#[error("no refresh token stored, session expired")]
	NoRenewalCredential,

	/// The identity endpoint declined the refresh token (expired, revoked,
	/// or reused after rotation).
	#[error("refresh rejected ({status}): {message}")]
	Rejected { status: u16, message: String },

	/// Network-level failure talking to the identity endpoint.
	#[error("HTTP request failed: {0}")]
	Transport(#[from] reqwest::Error),

	/// The identity endpoint answered 2xx with a body that is not a token
	/// pair.
	#[error("failed to parse refresh response: {0}")]
	Parse(String),

	/// The credential store failed underneath the session manager.
	#[error("credential store error: {0}")]
	Store(#[from] CredentialError),

	/// The configured base URL cannot address the identity endpoint.
	#[error("invalid identity endpoint URL: {0}")]
	Url(#[from] url::ParseError),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

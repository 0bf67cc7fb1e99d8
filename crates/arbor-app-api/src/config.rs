// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client configuration.

use std::env;
use std::time::Duration;

use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A required environment variable was not set.
	#[error("missing environment variable: {0}")]
	MissingEnvVar(String),

	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Configuration for the arbor API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
	/// Base URL of the arbor backend (e.g. `https://api.arbor.example`).
	pub base_url: Url,
	/// Per-request timeout. A timed-out request fails as a transport error
	/// and is never treated as an authorization failure.
	pub timeout: Duration,
}

impl ApiConfig {
	/// Create a configuration with the default timeout.
	pub fn new(base_url: Url) -> Self {
		Self {
			base_url,
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Load configuration from environment variables.
	///
	/// # Required Environment Variables
	///
	/// - `ARBOR_APP_BASE_URL`: base URL of the arbor backend.
	///
	/// # Optional Environment Variables
	///
	/// - `ARBOR_APP_TIMEOUT_SECS`: per-request timeout in seconds
	///   (default 30).
	pub fn from_env() -> Result<Self, ConfigError> {
		let raw_url = env::var("ARBOR_APP_BASE_URL")
			.map_err(|_| ConfigError::MissingEnvVar("ARBOR_APP_BASE_URL".to_string()))?;
		let base_url = Url::parse(&raw_url)
			.map_err(|e| ConfigError::InvalidConfig(format!("ARBOR_APP_BASE_URL: {e}")))?;

		let timeout = match env::var("ARBOR_APP_TIMEOUT_SECS") {
			Ok(raw) => {
				let secs: u64 = raw
					.parse()
					.map_err(|_| ConfigError::InvalidConfig("ARBOR_APP_TIMEOUT_SECS".to_string()))?;
				Duration::from_secs(secs)
			}
			Err(_) => DEFAULT_TIMEOUT,
		};

		let config = Self { base_url, timeout };
		config.validate()?;
		Ok(config)
	}

	/// Validate that the configuration is usable.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !matches!(self.base_url.scheme(), "http" | "https") {
			return Err(ConfigError::InvalidConfig(format!(
				"base URL scheme must be http or https, got {}",
				self.base_url.scheme()
			)));
		}
		if self.timeout.is_zero() {
			return Err(ConfigError::InvalidConfig(
				"timeout must be non-zero".to_string(),
			));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_uses_default_timeout() {
		let config = ApiConfig::new(Url::parse("https://api.arbor.example").unwrap());
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn validate_rejects_non_http_schemes() {
		let config = ApiConfig::new(Url::parse("ftp://api.arbor.example").unwrap());
		assert!(config.validate().is_err());
	}

	#[test]
	fn validate_rejects_zero_timeout() {
		let mut config = ApiConfig::new(Url::parse("https://api.arbor.example").unwrap());
		config.timeout = Duration::ZERO;
		assert!(config.validate().is_err());
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use arbor_common_secret::SecretString;
use async_trait::async_trait;
use tracing::warn;

use crate::error::CredentialError;
use crate::store::{CredentialStore, FileCredentialStore};
use crate::store_keyring::KeyringCredentialStore;

/// Keyring-first store that falls back to the JSON file when the platform
/// keyring is unavailable or misbehaving.
#[derive(Debug)]
pub struct KeyringThenFileStore {
	keyring: KeyringCredentialStore,
	file: FileCredentialStore,
}

impl KeyringThenFileStore {
	pub fn new(service: impl Into<String>, file_path: impl Into<PathBuf>) -> Self {
		Self {
			keyring: KeyringCredentialStore::new(service),
			file: FileCredentialStore::new(file_path),
		}
	}
}

#[async_trait]
impl CredentialStore for KeyringThenFileStore {
	async fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError> {
		match self.keyring.get(key).await {
			Ok(Some(value)) => {
				tracing::debug!(key = %key, "loaded credential from keyring");
				return Ok(Some(value));
			}
			Ok(None) => {
				tracing::debug!(key = %key, "keyring returned None, trying file store");
			}
			Err(e) => {
				warn!(key = %key, error = %e, "keyring get failed, trying file store");
			}
		}
		self.file.get(key).await
	}

	async fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError> {
		match self.keyring.set(key, value).await {
			Ok(()) => return Ok(()),
			Err(e) => {
				warn!(key = %key, error = %e, "keyring set failed, falling back to file store");
			}
		}
		self.file.set(key, value).await
	}

	async fn clear(&self, key: &str) -> Result<(), CredentialError> {
		let keyring_result = self.keyring.clear(key).await;
		let file_result = self.file.clear(key).await;

		if keyring_result.is_err() && file_result.is_err() {
			return file_result;
		}
		Ok(())
	}
}

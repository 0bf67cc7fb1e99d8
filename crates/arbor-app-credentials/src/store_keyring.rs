// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use arbor_common_secret::SecretString;
use async_trait::async_trait;

use crate::error::CredentialError;
use crate::store::CredentialStore;

/// Platform secure-storage backend (macOS Keychain, Windows Credential
/// Manager, Secret Service on Linux).
///
/// The keyring API is blocking, so every call runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
	service: String,
}

impl KeyringCredentialStore {
	pub fn new(service: impl Into<String>) -> Self {
		Self {
			service: service.into(),
		}
	}
}

#[async_trait]
impl CredentialStore for KeyringCredentialStore {
	async fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError> {
		let service = self.service.clone();
		let key = key.to_string();

		tokio::task::spawn_blocking(move || {
			let entry = keyring::Entry::new(&service, &key)
				.map_err(|e| CredentialError::Backend(e.to_string()))?;

			match entry.get_password() {
				Ok(value) => Ok(Some(SecretString::new(value))),
				Err(keyring::Error::NoEntry) => Ok(None),
				Err(e) => Err(CredentialError::Backend(e.to_string())),
			}
		})
		.await
		.map_err(|e| CredentialError::Backend(e.to_string()))?
	}

	async fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError> {
		let service = self.service.clone();
		let key = key.to_string();
		let value = value.expose().clone();

		tokio::task::spawn_blocking(move || {
			let entry = keyring::Entry::new(&service, &key)
				.map_err(|e| CredentialError::Backend(e.to_string()))?;
			entry
				.set_password(&value)
				.map_err(|e| CredentialError::Backend(e.to_string()))?;

			// Verify the save worked by reading back with a NEW entry instance.
			// This detects mock backends that only store in-memory per-instance.
			let verify_entry = keyring::Entry::new(&service, &key)
				.map_err(|e| CredentialError::Backend(e.to_string()))?;
			match verify_entry.get_password() {
				Ok(stored) if stored == value => Ok(()),
				Ok(_) => Err(CredentialError::Backend(
					"keyring verification failed: stored data mismatch".to_string(),
				)),
				Err(keyring::Error::NoEntry) => Err(CredentialError::Backend(
					"keyring verification failed: credential not persisted (mock backend?)".to_string(),
				)),
				Err(e) => Err(CredentialError::Backend(format!(
					"keyring verification failed: {e}"
				))),
			}
		})
		.await
		.map_err(|e| CredentialError::Backend(e.to_string()))?
	}

	async fn clear(&self, key: &str) -> Result<(), CredentialError> {
		let service = self.service.clone();
		let key = key.to_string();

		tokio::task::spawn_blocking(move || {
			let entry = keyring::Entry::new(&service, &key)
				.map_err(|e| CredentialError::Backend(e.to_string()))?;

			match entry.delete_credential() {
				Ok(()) => Ok(()),
				Err(keyring::Error::NoEntry) => Ok(()),
				Err(e) => Err(CredentialError::Backend(e.to_string())),
			}
		})
		.await
		.map_err(|e| CredentialError::Backend(e.to_string()))?
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential storage backends.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use arbor_common_secret::SecretString;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::CredentialError;

/// On-disk credential store format: key to raw secret string.
///
/// `SecretString` serializes redacted, so the persisted form has to carry
/// the plain value; it only ever touches disk through [`FileCredentialStore`],
/// which restricts file permissions.
type PersistedCredentialStore = HashMap<String, String>;

/// Trait for credential storage backends.
///
/// Implementations store one secret string per key. The session layer uses
/// two fixed keys for its access/refresh token pair.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
	/// Read the secret stored under `key`.
	async fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError>;

	/// Store `value` under `key`, overwriting any previous value.
	async fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError>;

	/// Remove the secret stored under `key`. Removing an absent key is not
	/// an error.
	async fn clear(&self, key: &str) -> Result<(), CredentialError>;

	/// Check whether a secret exists under `key`.
	async fn exists(&self, key: &str) -> Result<bool, CredentialError> {
		Ok(self.get(key).await?.is_some())
	}
}

/// File-based credential store with JSON format.
///
/// Secrets are stored in a JSON file with restricted permissions (0600 on
/// Unix). Writes go through a temp file and rename so a crash cannot leave
/// a half-written store.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
	path: PathBuf,
}

impl FileCredentialStore {
	/// Create a new file credential store at the given path.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// Get the path to the credential file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	async fn read_store(&self) -> Result<PersistedCredentialStore, CredentialError> {
		if !self.path.exists() {
			return Ok(HashMap::new());
		}

		let contents = fs::read_to_string(&self.path).await?;
		let store: PersistedCredentialStore = serde_json::from_str(&contents)?;
		Ok(store)
	}

	async fn write_store(&self, store: &PersistedCredentialStore) -> Result<(), CredentialError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent).await?;
		}

		let contents = serde_json::to_string_pretty(store)?;

		let temp_path = self.path.with_extension("tmp");
		let mut file = fs::File::create(&temp_path).await?;
		file.write_all(contents.as_bytes()).await?;
		file.sync_all().await?;
		drop(file);

		#[cfg(unix)]
		{
			use std::os::unix::fs::PermissionsExt;
			let perms = std::fs::Permissions::from_mode(0o600);
			if let Err(e) = std::fs::set_permissions(&temp_path, perms) {
				warn!(path = ?temp_path, error = %e, "Failed to set file permissions to 0600");
			}
		}

		fs::rename(&temp_path, &self.path).await?;

		debug!(path = ?self.path, "Credential store written");
		Ok(())
	}
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
	async fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError> {
		let store = self.read_store().await?;
		Ok(store.get(key).cloned().map(SecretString::new))
	}

	async fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError> {
		let mut store = self.read_store().await?;
		store.insert(key.to_string(), value.expose().clone());
		self.write_store(&store).await
	}

	async fn clear(&self, key: &str) -> Result<(), CredentialError> {
		let mut store = self.read_store().await?;
		if store.remove(key).is_none() {
			return Ok(());
		}
		self.write_store(&store).await
	}
}

/// In-memory credential store for testing.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
	secrets: tokio::sync::RwLock<HashMap<String, SecretString>>,
}

impl MemoryCredentialStore {
	/// Create a new empty in-memory store.
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
	async fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError> {
		let secrets = self.secrets.read().await;
		Ok(secrets.get(key).cloned())
	}

	async fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError> {
		let mut secrets = self.secrets.write().await;
		secrets.insert(key.to_string(), value.clone());
		Ok(())
	}

	async fn clear(&self, key: &str) -> Result<(), CredentialError> {
		let mut secrets = self.secrets.write().await;
		secrets.remove(key);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn memory_store_roundtrip() {
		let store = MemoryCredentialStore::new();
		let token = SecretString::new("at_test".to_string());

		store.set("access", &token).await.unwrap();

		let loaded = store.get("access").await.unwrap().unwrap();
		assert_eq!(loaded.expose(), "at_test");
	}

	#[tokio::test]
	async fn memory_store_not_found() {
		let store = MemoryCredentialStore::new();
		assert!(store.get("nonexistent").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn memory_store_clear_is_idempotent() {
		let store = MemoryCredentialStore::new();
		let token = SecretString::new("rt_test".to_string());

		store.set("refresh", &token).await.unwrap();
		assert!(store.exists("refresh").await.unwrap());

		store.clear("refresh").await.unwrap();
		assert!(!store.exists("refresh").await.unwrap());

		// Clearing again must still succeed.
		store.clear("refresh").await.unwrap();
	}

	#[tokio::test]
	async fn memory_store_overwrites_previous_value() {
		let store = MemoryCredentialStore::new();

		store
			.set("refresh", &SecretString::new("rt_old".to_string()))
			.await
			.unwrap();
		store
			.set("refresh", &SecretString::new("rt_new".to_string()))
			.await
			.unwrap();

		let loaded = store.get("refresh").await.unwrap().unwrap();
		assert_eq!(loaded.expose(), "rt_new");
	}

	#[tokio::test]
	async fn file_store_roundtrip() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("credentials.json");
		let store = FileCredentialStore::new(&path);

		let token = SecretString::new("at_file-test".to_string());
		store.set("access", &token).await.unwrap();
		assert!(path.exists());

		let loaded = store.get("access").await.unwrap().unwrap();
		assert_eq!(loaded.expose(), "at_file-test");
	}

	#[tokio::test]
	async fn file_store_holds_both_keys_independently() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("credentials.json");
		let store = FileCredentialStore::new(&path);

		store
			.set("access", &SecretString::new("at_one".to_string()))
			.await
			.unwrap();
		store
			.set("refresh", &SecretString::new("rt_one".to_string()))
			.await
			.unwrap();

		store.clear("access").await.unwrap();

		assert!(store.get("access").await.unwrap().is_none());
		let refresh = store.get("refresh").await.unwrap().unwrap();
		assert_eq!(refresh.expose(), "rt_one");
	}

	#[tokio::test]
	async fn file_store_clear_on_missing_file_succeeds() {
		let temp_dir = tempfile::tempdir().unwrap();
		let path = temp_dir.path().join("credentials.json");
		let store = FileCredentialStore::new(&path);

		store.clear("access").await.unwrap();
		assert!(!path.exists());
	}
}

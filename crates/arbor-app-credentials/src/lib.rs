// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secure storage for the arbor session token pair.
//!
//! This crate provides a small key-value abstraction over the platform's
//! secure storage: secret strings addressed by a string key. The session
//! layer stores its access and refresh tokens under two distinct keys so
//! the secrets can be cleared independently; this crate knows nothing about
//! token semantics.
//!
//! # Backends
//!
//! - **CredentialStore trait**: abstract interface for storage backends
//! - **KeyringCredentialStore** (`keyring` feature): platform secure storage
//! - **FileCredentialStore**: JSON file with restricted permissions
//! - **KeyringThenFileStore** (`keyring` feature): keyring with file fallback
//! - **MemoryCredentialStore**: in-memory storage for testing
//!
//! # Example
//!
//! ```rust,no_run
//! use arbor_app_credentials::{CredentialStore, FileCredentialStore};
//! use arbor_common_secret::SecretString;
//!
//! # tokio_test::block_on(async {
//! let store = FileCredentialStore::new("~/.config/arbor/credentials.json");
//!
//! let token = SecretString::new("at_3f9a".to_string());
//! store.set("access", &token).await.unwrap();
//!
//! let loaded = store.get("access").await.unwrap();
//! # });
//! ```

mod error;
mod paths;
mod store;
#[cfg(feature = "keyring")]
mod store_fallback;
#[cfg(feature = "keyring")]
mod store_keyring;

pub use error::CredentialError;
pub use paths::default_credentials_path;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
#[cfg(feature = "keyring")]
pub use store_fallback::KeyringThenFileStore;
#[cfg(feature = "keyring")]
pub use store_keyring::KeyringCredentialStore;

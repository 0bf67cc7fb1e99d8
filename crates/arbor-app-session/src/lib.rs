// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session token lifecycle for the arbor client.
//!
//! The backend issues a short-lived access token and a longer-lived refresh
//! token. [`SessionManager`] owns both: it mediates every read and write of
//! the credential store, performs the `/auth/refresh` exchange, and
//! guarantees that concurrent renewal demand collapses into a single
//! network call.
//!
//! # Renewal contract
//!
//! - At most one refresh exchange is in flight at any instant; every caller
//!   that asks to renew while one is pending awaits the same outcome.
//! - A successful exchange rotates the pair: the old refresh token is
//!   overwritten and never presented again.
//! - Any renewal failure (missing refresh token, rejection by the identity
//!   endpoint, transport error, malformed response) clears both stored
//!   secrets. A refresh token the backend has refused is never silently
//!   retried on a later request.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use arbor_app_credentials::MemoryCredentialStore;
//! use arbor_app_session::SessionManager;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryCredentialStore::new());
//! let http = arbor_common_http::new_client();
//! let base = Url::parse("https://api.arbor.example")?;
//!
//! let session = Arc::new(SessionManager::new(store, http, &base)?);
//! if session.access_token().await.is_none() {
//!     // not signed in yet
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod manager;

pub use error::SessionError;
pub use manager::{SessionManager, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

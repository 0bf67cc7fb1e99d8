// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed client for the arbor family-tree API.
//!
//! This crate is the single road to the backend for the arbor apps: every
//! call goes through one request pipeline that attaches the session's
//! bearer token, renews it transparently on authorization failure, and
//! replays the failed request exactly once.
//!
//! # Features
//!
//! - **Transparent renewal**: a 401 triggers at most one refresh exchange,
//!   shared by every request that fails while it is in flight
//! - **Fail-closed sessions**: a failed renewal clears stored credentials
//!   rather than silently retrying a dead refresh token
//! - **Typed endpoints**: one module per resource family (trees, people,
//!   relationships, events, comments, notifications, albums, search,
//!   same-person links, access control)
//! - **Injectable storage**: credentials live behind the
//!   [`CredentialStore`](arbor_app_credentials::CredentialStore) trait
//!
//! # Example
//!
//! ```ignore
//! use arbor_app_api::{ApiClient, ApiConfig};
//! use arbor_common_secret::SecretString;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new(Url::parse("https://api.arbor.example")?);
//!     let client = ApiClient::builder().config(config).build()?;
//!
//!     let password = SecretString::new("hunter2".to_string());
//!     let me = client.login("ada@example.com", &password).await?;
//!
//!     for tree in client.list_trees().await? {
//!         println!("{}: {}", me.email, tree.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod access;
mod albums;
mod auth;
mod client;
mod comments;
mod config;
mod error;
mod events;
mod links;
mod nodes;
mod notifications;
mod relationships;
mod search;
mod trees;

pub use access::{
	AccessGrant, AccessRequest, AccessRequestStatus, AccessRole, GrantAccessRequest,
};
pub use albums::{LinkAlbumRequest, LinkedAlbum};
pub use auth::{AuthResponse, UserProfile};
pub use client::{ApiClient, ApiClientBuilder};
pub use comments::{Comment, CreateCommentRequest};
pub use config::{ApiConfig, ConfigError, DEFAULT_TIMEOUT};
pub use error::{ApiError, Result};
pub use events::{CreateEventRequest, TimelineEvent, UpdateEventRequest};
pub use links::{CreateSamePersonLinkRequest, SamePersonLink};
pub use nodes::{CreateNodeRequest, Gender, PersonNode, UpdateNodeRequest};
pub use notifications::{Notification, NotificationKind};
pub use relationships::{CreateRelationshipRequest, Relationship, RelationshipKind};
pub use search::SearchResults;
pub use trees::{CreateTreeRequest, Tree, UpdateTreeRequest};

// Re-export the session and credential layers for convenience.
pub use arbor_app_credentials::{CredentialStore, MemoryCredentialStore};
pub use arbor_app_session::{SessionError, SessionManager};

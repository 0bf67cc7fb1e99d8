// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The session manager: credential pair lifecycle and the renewal exchange.

use std::sync::{Arc, Mutex};

use arbor_app_credentials::CredentialStore;
use arbor_common_secret::SecretString;
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::SessionError;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access";

/// Storage key for the longer-lived refresh token.
///
/// Distinct from [`ACCESS_TOKEN_KEY`] so the two secrets can be cleared
/// independently.
pub const REFRESH_TOKEN_KEY: &str = "refresh";

/// Outcome of a renewal cycle, fanned out to every waiter.
///
/// The error side is `Arc`-wrapped because a single settled failure is
/// cloned to all concurrent callers.
type RenewalOutcome = std::result::Result<SecretString, Arc<SessionError>>;

type SharedRenewal = Shared<BoxFuture<'static, RenewalOutcome>>;

/// Rotated token pair returned by the identity endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenewedTokenPair {
	access_token: SecretString,
	refresh_token: SecretString,
}

/// Owns the access/refresh token pair and the renewal exchange.
///
/// All credential store reads and writes go through this type. The request
/// pipeline calls [`access_token`](Self::access_token) before every send and
/// [`renew`](Self::renew) after an authorization failure.
pub struct SessionManager {
	store: Arc<dyn CredentialStore>,
	http: reqwest::Client,
	refresh_url: Url,
	// Invariant: at most one renewal is in flight. The slot is set under the
	// lock before any await in the creating branch, and cleared as the final
	// step of the shared future itself, so a new cycle can only begin after
	// the previous one has settled.
	pending: Arc<Mutex<Option<SharedRenewal>>>,
}

impl std::fmt::Debug for SessionManager {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionManager")
			.field("refresh_url", &self.refresh_url.as_str())
			.finish_non_exhaustive()
	}
}

impl SessionManager {
	/// Create a session manager talking to `{base_url}/auth/refresh`.
	pub fn new(
		store: Arc<dyn CredentialStore>,
		http: reqwest::Client,
		base_url: &Url,
	) -> Result<Self, SessionError> {
		let refresh_url = join_path(base_url, "auth/refresh")?;
		Ok(Self {
			store,
			http,
			refresh_url,
			pending: Arc::new(Mutex::new(None)),
		})
	}

	/// Read the current access token.
	///
	/// Never fails: a store error is logged and reported as absent, which
	/// the pipeline treats as "send unauthenticated".
	pub async fn access_token(&self) -> Option<SecretString> {
		match self.store.get(ACCESS_TOKEN_KEY).await {
			Ok(token) => token,
			Err(e) => {
				warn!(error = %e, "failed to read access token from store");
				None
			}
		}
	}

	/// Whether an access token is currently stored.
	pub async fn is_authenticated(&self) -> bool {
		self.access_token().await.is_some()
	}

	/// Store a freshly issued token pair, overwriting any previous pair.
	///
	/// The refresh token is written first; if the access token write then
	/// fails, both keys are cleared before the error is reported. The store
	/// never holds an access token without a matching refresh token.
	pub async fn store_tokens(
		&self,
		access: SecretString,
		refresh: SecretString,
	) -> Result<(), SessionError> {
		store_pair(&self.store, access, refresh).await
	}

	/// Remove both stored secrets. Idempotent.
	pub async fn clear(&self) -> Result<(), SessionError> {
		clear_both(&self.store).await
	}

	/// Exchange the stored refresh token for a new pair and return the new
	/// access token.
	///
	/// Concurrent callers collapse onto a single in-flight exchange: the
	/// first caller after a quiet period creates it, everyone else (and the
	/// creator) awaits the same settled outcome. On any failure the stored
	/// credentials are cleared before the error is fanned out.
	pub async fn renew(&self) -> RenewalOutcome {
		let renewal = {
			let mut pending = self.pending.lock().expect("pending renewal lock poisoned");
			match pending.as_ref().cloned() {
				Some(inflight) => {
					debug!("joining in-flight session renewal");
					inflight
				}
				None => {
					let store = Arc::clone(&self.store);
					let http = self.http.clone();
					let refresh_url = self.refresh_url.clone();
					let slot = Arc::clone(&self.pending);
					let renewal = async move {
						let outcome = renew_once(store, http, refresh_url).await.map_err(Arc::new);
						// Release the slot unconditionally on settle so the
						// next authorization failure starts a fresh cycle.
						*slot.lock().expect("pending renewal lock poisoned") = None;
						outcome
					}
					.boxed()
					.shared();
					*pending = Some(renewal.clone());
					renewal
				}
			}
		};

		renewal.await
	}
}

/// One full renewal attempt: exchange, then fail-closed cleanup on error.
async fn renew_once(
	store: Arc<dyn CredentialStore>,
	http: reqwest::Client,
	refresh_url: Url,
) -> Result<SecretString, SessionError> {
	let outcome = exchange(&store, &http, &refresh_url).await;

	if let Err(e) = &outcome {
		warn!(error = %e, "session renewal failed, clearing stored credentials");
		if let Err(clear_err) = clear_both(&store).await {
			warn!(error = %clear_err, "failed to clear credentials after renewal failure");
		}
	}

	outcome
}

/// The network exchange against the identity endpoint.
async fn exchange(
	store: &Arc<dyn CredentialStore>,
	http: &reqwest::Client,
	refresh_url: &Url,
) -> Result<SecretString, SessionError> {
	let refresh = store
		.get(REFRESH_TOKEN_KEY)
		.await?
		.ok_or(SessionError::NoRenewalCredential)?;

	debug!("exchanging refresh token for a new token pair");
	let response = http
		.post(refresh_url.clone())
		.json(&serde_json::json!({ "refreshToken": refresh.expose() }))
		.send()
		.await?;

	let status = response.status();
	if !status.is_success() {
		let message = response.text().await.unwrap_or_default();
		warn!(status = %status, "identity endpoint rejected the refresh token");
		return Err(SessionError::Rejected {
			status: status.as_u16(),
			message,
		});
	}

	let pair: RenewedTokenPair = response
		.json()
		.await
		.map_err(|e| SessionError::Parse(format!("refresh response did not match token pair: {e}")))?;

	// Rotation: the old refresh token is dead the moment the server answered;
	// persist the new pair before handing the access token back.
	store_pair(store, pair.access_token.clone(), pair.refresh_token).await?;
	info!("session tokens renewed");

	Ok(pair.access_token)
}

async fn store_pair(
	store: &Arc<dyn CredentialStore>,
	access: SecretString,
	refresh: SecretString,
) -> Result<(), SessionError> {
	store.set(REFRESH_TOKEN_KEY, &refresh).await?;

	if let Err(e) = store.set(ACCESS_TOKEN_KEY, &access).await {
		warn!(error = %e, "failed to store access token, clearing partial credential state");
		if let Err(clear_err) = clear_both(store).await {
			warn!(error = %clear_err, "failed to clear credentials after partial store");
		}
		return Err(e.into());
	}

	Ok(())
}

async fn clear_both(store: &Arc<dyn CredentialStore>) -> Result<(), SessionError> {
	let access = store.clear(ACCESS_TOKEN_KEY).await;
	let refresh = store.clear(REFRESH_TOKEN_KEY).await;
	access?;
	refresh?;
	Ok(())
}

/// Join `path` onto `base` regardless of whether `base` carries a trailing
/// slash.
fn join_path(base: &Url, path: &str) -> Result<Url, url::ParseError> {
	let mut base_str = base.as_str().to_string();
	if !base_str.ends_with('/') {
		base_str.push('/');
	}
	Url::parse(&base_str)?.join(path)
}

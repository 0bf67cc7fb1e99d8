// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The authenticated request pipeline.
//!
//! Every backend call in this crate goes through [`ApiClient::execute`], the
//! single choke point that attaches the bearer token, detects authorization
//! failure, renews the session through the shared renewal cycle, and replays
//! the request exactly once.

use std::sync::Arc;

use arbor_app_credentials::{default_credentials_path, CredentialStore, FileCredentialStore};
use arbor_app_session::SessionManager;
use arbor_common_secret::SecretString;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ApiConfig, ConfigError};
use crate::error::{ApiError, Result};

/// Retry budget for one logical request.
///
/// Carried explicitly per attempt rather than as shared mutable state: a
/// request that has already been replayed after a renewal fails immediately
/// on the next authorization failure instead of renewing again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestAttempt {
	Initial,
	Retried,
}

/// Typed client for the arbor backend.
///
/// Cheap to clone conceptually but intended to be built once and shared;
/// all endpoint modules hang their methods off this type.
#[derive(Debug)]
pub struct ApiClient {
	http: reqwest::Client,
	base_url: Url,
	session: Arc<SessionManager>,
}

/// Builder for [`ApiClient`].
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
	config: Option<ApiConfig>,
	store: Option<Arc<dyn CredentialStore>>,
}

impl ApiClientBuilder {
	/// Set the client configuration. Required.
	pub fn config(mut self, config: ApiConfig) -> Self {
		self.config = Some(config);
		self
	}

	/// Inject a credential store.
	///
	/// Defaults to a [`FileCredentialStore`] at the platform config
	/// directory. Tests inject `MemoryCredentialStore`.
	pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
		self.store = Some(store);
		self
	}

	/// Build the client.
	pub fn build(self) -> Result<ApiClient> {
		let config = self
			.config
			.ok_or_else(|| ConfigError::InvalidConfig("config is required".to_string()))?;
		config.validate()?;

		let http = arbor_common_http::new_client_with_timeout(config.timeout);
		let store = self
			.store
			.unwrap_or_else(|| Arc::new(FileCredentialStore::new(default_credentials_path())));
		let session = Arc::new(SessionManager::new(store, http.clone(), &config.base_url)?);

		Ok(ApiClient {
			http,
			base_url: config.base_url,
			session,
		})
	}
}

impl ApiClient {
	/// Start building a client.
	pub fn builder() -> ApiClientBuilder {
		ApiClientBuilder::default()
	}

	/// Build a client from `ARBOR_APP_*` environment variables.
	pub fn from_env() -> Result<Self> {
		Self::builder().config(ApiConfig::from_env()?).build()
	}

	/// The session manager owning this client's token pair.
	pub fn session(&self) -> &Arc<SessionManager> {
		&self.session
	}

	/// The configured backend base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		let mut base = self.base_url.as_str().to_string();
		if !base.ends_with('/') {
			base.push('/');
		}
		Ok(Url::parse(&base)?.join(path)?)
	}

	pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		let url = self.endpoint(path)?;
		let response = self.execute(Method::GET, url, None::<&()>).await?;
		Self::parse_json(response).await
	}

	pub(crate) async fn get_json_query<T: DeserializeOwned>(
		&self,
		path: &str,
		query: &[(&str, &str)],
	) -> Result<T> {
		let mut url = self.endpoint(path)?;
		url.query_pairs_mut().extend_pairs(query);
		let response = self.execute(Method::GET, url, None::<&()>).await?;
		Self::parse_json(response).await
	}

	pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let url = self.endpoint(path)?;
		let response = self.execute(Method::POST, url, Some(body)).await?;
		Self::parse_json(response).await
	}

	pub(crate) async fn post_empty<B>(&self, path: &str, body: Option<&B>) -> Result<()>
	where
		B: Serialize + ?Sized,
	{
		let url = self.endpoint(path)?;
		let response = self.execute(Method::POST, url, body).await?;
		Self::check_status(response).await.map(|_| ())
	}

	pub(crate) async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		let url = self.endpoint(path)?;
		let response = self.execute(Method::PATCH, url, Some(body)).await?;
		Self::parse_json(response).await
	}

	pub(crate) async fn delete(&self, path: &str) -> Result<()> {
		let url = self.endpoint(path)?;
		let response = self.execute(Method::DELETE, url, None::<&()>).await?;
		Self::check_status(response).await.map(|_| ())
	}

	/// The pipeline choke point.
	///
	/// State machine per logical request: attach the current access token
	/// (or none) and send. A 401 on the initial attempt joins the shared
	/// renewal cycle and, if it succeeds, replays once with the token the
	/// renewal returned. A 401 on the replay is final. Every other response
	/// or failure passes through untouched.
	async fn execute<B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<Response>
	where
		B: Serialize + ?Sized,
	{
		let mut bearer: Option<SecretString> = self.session.access_token().await;
		let mut attempt = RequestAttempt::Initial;

		loop {
			let mut request = self.http.request(method.clone(), url.clone());
			if let Some(body) = body {
				request = request.json(body);
			}
			if let Some(token) = &bearer {
				request = request.bearer_auth(token.expose());
			}

			let response = request.send().await?;

			if response.status() != StatusCode::UNAUTHORIZED {
				return Ok(response);
			}

			match attempt {
				RequestAttempt::Retried => {
					warn!(url = %url, "request rejected again after renewal, giving up");
					return Err(ApiError::AuthorizationFailed);
				}
				RequestAttempt::Initial => {
					debug!(url = %url, "authorization failed, renewing session");
					let token = self
						.session
						.renew()
						.await
						.map_err(ApiError::RenewalFailed)?;
					// Replay with the token the renewal returned, not a store
					// re-read, so the replay cannot race a later cycle.
					bearer = Some(token);
					attempt = RequestAttempt::Retried;
				}
			}
		}
	}

	async fn check_status(response: Response) -> Result<Response> {
		let status = response.status();
		if status.is_success() {
			return Ok(response);
		}
		let message = response.text().await.unwrap_or_default();
		Err(ApiError::Upstream {
			status: status.as_u16(),
			message,
		})
	}

	async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
		let response = Self::check_status(response).await?;
		response
			.json()
			.await
			.map_err(|e| ApiError::Parse(format!("response body did not match expected shape: {e}")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use arbor_app_credentials::MemoryCredentialStore;
	use wiremock::matchers::{header, method as http_method, path};
	use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

	struct NoAuthorizationHeader;

	impl Match for NoAuthorizationHeader {
		fn matches(&self, request: &Request) -> bool {
			!request.headers.contains_key("authorization")
		}
	}

	async fn client_for(server: &MockServer) -> (Arc<MemoryCredentialStore>, ApiClient) {
		let store = Arc::new(MemoryCredentialStore::new());
		let config = ApiConfig::new(Url::parse(&server.uri()).unwrap());
		let client = ApiClient::builder()
			.config(config)
			.credential_store(store.clone() as Arc<dyn CredentialStore>)
			.build()
			.unwrap();
		(store, client)
	}

	async fn sign_in(client: &ApiClient, access: &str, refresh: &str) {
		client
			.session()
			.store_tokens(
				SecretString::new(access.to_string()),
				SecretString::new(refresh.to_string()),
			)
			.await
			.unwrap();
	}

	#[tokio::test]
	async fn attaches_bearer_token_when_present() {
		let server = MockServer::start().await;
		let (_store, client) = client_for(&server).await;
		sign_in(&client, "at_1", "rt_1").await;

		Mock::given(http_method("GET"))
			.and(path("/trees"))
			.and(header("authorization", "Bearer at_1"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
			.expect(1)
			.mount(&server)
			.await;

		let trees = client.list_trees().await.unwrap();
		assert!(trees.is_empty());
	}

	#[tokio::test]
	async fn sends_without_header_when_unauthenticated() {
		let server = MockServer::start().await;
		let (_store, client) = client_for(&server).await;

		Mock::given(http_method("GET"))
			.and(path("/trees"))
			.and(NoAuthorizationHeader)
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
			.expect(1)
			.mount(&server)
			.await;

		client.list_trees().await.unwrap();
	}

	#[tokio::test]
	async fn non_auth_upstream_errors_pass_through() {
		let server = MockServer::start().await;
		let (_store, client) = client_for(&server).await;
		sign_in(&client, "at_1", "rt_1").await;

		Mock::given(http_method("GET"))
			.and(path("/trees/missing"))
			.respond_with(ResponseTemplate::new(404).set_body_string("no such tree"))
			.mount(&server)
			.await;
		// Any hit on the renewal endpoint would be a pipeline bug.
		Mock::given(http_method("POST"))
			.and(path("/auth/refresh"))
			.respond_with(ResponseTemplate::new(500))
			.expect(0)
			.mount(&server)
			.await;

		let err = client.get_tree("missing").await.unwrap_err();
		match err {
			ApiError::Upstream { status, message } => {
				assert_eq!(status, 404);
				assert_eq!(message, "no such tree");
			}
			other => panic!("expected Upstream, got {other:?}"),
		}
	}

	#[tokio::test]
	async fn builder_requires_config() {
		let result = ApiClient::builder().build();
		assert!(matches!(result, Err(ApiError::Config(_))));
	}
}

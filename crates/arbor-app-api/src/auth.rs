// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sign-up, sign-in, and profile endpoints.
//!
//! Every successful sign-in stores the issued token pair in the session
//! manager before returning the profile, so the next request goes out
//! authenticated. Identity-provider flows (Google, Apple) happen in the
//! native SDKs; this module only exchanges the tokens they produce.

use arbor_common_secret::SecretString;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::client::ApiClient;
use crate::error::Result;

/// The signed-in user's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
	pub id: String,
	pub email: String,
	pub display_name: Option<String>,
	pub avatar_url: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
}

/// Token pair plus profile returned by every sign-in endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
	pub access_token: SecretString,
	pub refresh_token: SecretString,
	pub user: UserProfile,
}

impl ApiClient {
	/// Create an account and sign in.
	#[tracing::instrument(skip_all, fields(email = %email))]
	pub async fn signup(
		&self,
		email: &str,
		password: &SecretString,
		display_name: Option<&str>,
	) -> Result<UserProfile> {
		let mut body = serde_json::json!({
			"email": email,
			"password": password.expose(),
		});
		if let Some(name) = display_name {
			body["displayName"] = serde_json::json!(name);
		}

		let response: AuthResponse = self.post_json("auth/signup", &body).await?;
		self.adopt_session(response).await
	}

	/// Sign in with email and password.
	#[tracing::instrument(skip_all, fields(email = %email))]
	pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserProfile> {
		let body = serde_json::json!({
			"email": email,
			"password": password.expose(),
		});

		let response: AuthResponse = self.post_json("auth/login", &body).await?;
		self.adopt_session(response).await
	}

	/// Exchange a Google ID token for an arbor session.
	#[tracing::instrument(skip_all)]
	pub async fn sign_in_with_google(&self, id_token: &SecretString) -> Result<UserProfile> {
		let body = serde_json::json!({ "idToken": id_token.expose() });

		let response: AuthResponse = self.post_json("auth/google/mobile", &body).await?;
		self.adopt_session(response).await
	}

	/// Exchange an Apple identity token for an arbor session.
	#[tracing::instrument(skip_all)]
	pub async fn sign_in_with_apple(
		&self,
		identity_token: &SecretString,
		authorization_code: Option<&SecretString>,
	) -> Result<UserProfile> {
		let mut body = serde_json::json!({ "identityToken": identity_token.expose() });
		if let Some(code) = authorization_code {
			body["authorizationCode"] = serde_json::json!(code.expose());
		}

		let response: AuthResponse = self.post_json("auth/apple", &body).await?;
		self.adopt_session(response).await
	}

	/// Fetch the signed-in user's profile.
	pub async fn profile(&self) -> Result<UserProfile> {
		self.get_json("auth/profile").await
	}

	/// Sign out locally by clearing the stored token pair.
	///
	/// Purely local: the backend's tokens age out on their own.
	pub async fn logout(&self) -> Result<()> {
		self.session().clear().await?;
		info!("signed out, credentials cleared");
		Ok(())
	}

	async fn adopt_session(&self, response: AuthResponse) -> Result<UserProfile> {
		self.session()
			.store_tokens(response.access_token, response.refresh_token)
			.await?;
		info!(user_id = %response.user.id, "signed in");
		Ok(response.user)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn auth_response_deserializes() {
		let json = r#"{
			"accessToken": "at_1",
			"refreshToken": "rt_1",
			"user": {
				"id": "u_1",
				"email": "ada@example.com",
				"displayName": "Ada",
				"avatarUrl": null,
				"createdAt": "2025-06-01T12:00:00Z"
			}
		}"#;

		let response: AuthResponse = serde_json::from_str(json).unwrap();
		assert_eq!(response.access_token.expose(), "at_1");
		assert_eq!(response.refresh_token.expose(), "rt_1");
		assert_eq!(response.user.email, "ada@example.com");
		assert_eq!(response.user.display_name.as_deref(), Some("Ada"));
	}

	#[test]
	fn user_profile_tolerates_null_optionals() {
		let json = r#"{ "id": "u_1", "email": "ada@example.com" }"#;
		let profile: UserProfile = serde_json::from_str(json).unwrap();
		assert!(profile.display_name.is_none());
		assert!(profile.avatar_url.is_none());
		assert!(profile.created_at.is_none());
	}

	#[test]
	fn tokens_never_appear_in_debug_output() {
		let json = r#"{
			"accessToken": "at_secret-token",
			"refreshToken": "rt_secret-token",
			"user": { "id": "u_1", "email": "ada@example.com" }
		}"#;

		let response: AuthResponse = serde_json::from_str(json).unwrap();
		let debug = format!("{response:?}");
		assert!(!debug.contains("at_secret-token"));
		assert!(!debug.contains("rt_secret-token"));
		assert!(debug.contains("[REDACTED]"));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tree access control and access request endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRole {
	Viewer,
	Editor,
	Admin,
}

/// One user's access to one tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessGrant {
	pub user_id: String,
	pub role: AccessRole,
	pub granted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantAccessRequest {
	pub user_id: String,
	pub role: AccessRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRequestStatus {
	Pending,
	Approved,
	Denied,
}

/// A request from another user to be granted access to a tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRequest {
	pub id: String,
	pub tree_id: String,
	pub requester_id: String,
	pub message: Option<String>,
	pub status: AccessRequestStatus,
	pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
	/// List who can see a tree.
	pub async fn list_tree_access(&self, tree_id: &str) -> Result<Vec<AccessGrant>> {
		self.get_json(&format!("trees/{tree_id}/access")).await
	}

	/// Grant a user access to a tree, or change their role.
	pub async fn grant_tree_access(
		&self,
		tree_id: &str,
		request: &GrantAccessRequest,
	) -> Result<AccessGrant> {
		self.post_json(&format!("trees/{tree_id}/access"), request)
			.await
	}

	/// Revoke a user's access to a tree.
	pub async fn revoke_tree_access(&self, tree_id: &str, user_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}/access/{user_id}"))
			.await
	}

	/// List pending access requests for trees the signed-in user manages.
	pub async fn list_access_requests(&self) -> Result<Vec<AccessRequest>> {
		self.get_json("access-requests").await
	}

	/// Approve or deny an access request.
	pub async fn respond_to_access_request(
		&self,
		request_id: &str,
		approve: bool,
	) -> Result<AccessRequest> {
		self.post_json(
			&format!("access-requests/{request_id}/respond"),
			&serde_json::json!({ "approve": approve }),
		)
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn access_role_roundtrips_lowercase() {
		let json = serde_json::to_string(&AccessRole::Editor).unwrap();
		assert_eq!(json, "\"editor\"");

		let role: AccessRole = serde_json::from_str("\"admin\"").unwrap();
		assert_eq!(role, AccessRole::Admin);
	}

	#[test]
	fn access_request_deserializes() {
		let json = r#"{
			"id": "ar_1",
			"treeId": "t_1",
			"requesterId": "u_2",
			"message": "I'm Ada's cousin",
			"status": "pending"
		}"#;

		let request: AccessRequest = serde_json::from_str(json).unwrap();
		assert_eq!(request.status, AccessRequestStatus::Pending);
		assert_eq!(request.requester_id, "u_2");
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Family tree endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// A family tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tree {
	pub id: String,
	pub name: String,
	pub description: Option<String>,
	pub owner_id: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTreeRequest {
	pub name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTreeRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl ApiClient {
	/// List the trees the signed-in user can see.
	pub async fn list_trees(&self) -> Result<Vec<Tree>> {
		self.get_json("trees").await
	}

	/// Fetch one tree.
	pub async fn get_tree(&self, tree_id: &str) -> Result<Tree> {
		self.get_json(&format!("trees/{tree_id}")).await
	}

	/// Create a tree owned by the signed-in user.
	pub async fn create_tree(&self, request: &CreateTreeRequest) -> Result<Tree> {
		self.post_json("trees", request).await
	}

	/// Update a tree's name or description.
	pub async fn update_tree(&self, tree_id: &str, request: &UpdateTreeRequest) -> Result<Tree> {
		self.patch_json(&format!("trees/{tree_id}"), request).await
	}

	/// Delete a tree and everything in it.
	pub async fn delete_tree(&self, tree_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}")).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tree_deserializes() {
		let json = r#"{
			"id": "t_1",
			"name": "Lovelace",
			"description": "Ada's side of the family",
			"ownerId": "u_1",
			"createdAt": "2025-05-01T09:00:00Z",
			"updatedAt": null
		}"#;

		let tree: Tree = serde_json::from_str(json).unwrap();
		assert_eq!(tree.id, "t_1");
		assert_eq!(tree.name, "Lovelace");
		assert!(tree.updated_at.is_none());
	}

	#[test]
	fn update_request_omits_absent_fields() {
		let request = UpdateTreeRequest {
			name: Some("Byron".to_string()),
			..Default::default()
		};
		let json = serde_json::to_string(&request).unwrap();
		assert!(json.contains("name"));
		assert!(!json.contains("description"));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Comment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
	pub id: String,
	pub node_id: String,
	pub author_id: String,
	pub body: String,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
	pub node_id: String,
	pub body: String,
}

impl ApiClient {
	/// List comments on a person, newest first.
	pub async fn list_comments(&self, node_id: &str) -> Result<Vec<Comment>> {
		self.get_json_query("comments", &[("nodeId", node_id)])
			.await
	}

	/// Comment on a person.
	pub async fn create_comment(&self, request: &CreateCommentRequest) -> Result<Comment> {
		self.post_json("comments", request).await
	}

	/// Edit a comment's body.
	pub async fn update_comment(&self, comment_id: &str, body: &str) -> Result<Comment> {
		self.patch_json(
			&format!("comments/{comment_id}"),
			&serde_json::json!({ "body": body }),
		)
		.await
	}

	/// Delete a comment.
	pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
		self.delete(&format!("comments/{comment_id}")).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn comment_deserializes() {
		let json = r#"{
			"id": "c_1",
			"nodeId": "n_1",
			"authorId": "u_1",
			"body": "She taught herself mathematics.",
			"createdAt": "2025-06-01T10:00:00Z"
		}"#;

		let comment: Comment = serde_json::from_str(json).unwrap();
		assert_eq!(comment.node_id, "n_1");
		assert!(comment.updated_at.is_none());
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cross-tree "same person" link endpoints.
//!
//! Two nodes in different trees can be asserted to describe the same real
//! person. Links are undirected; the backend canonicalizes the node order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamePersonLink {
	pub id: String,
	pub node_id: String,
	pub other_node_id: String,
	pub created_by: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSamePersonLinkRequest {
	pub node_id: String,
	pub other_node_id: String,
}

impl ApiClient {
	/// List same-person links, optionally scoped to one node.
	pub async fn list_same_person_links(
		&self,
		node_id: Option<&str>,
	) -> Result<Vec<SamePersonLink>> {
		match node_id {
			Some(node_id) => {
				self.get_json_query("same-person-links", &[("nodeId", node_id)])
					.await
			}
			None => self.get_json("same-person-links").await,
		}
	}

	/// Assert that two nodes describe the same person.
	pub async fn create_same_person_link(
		&self,
		request: &CreateSamePersonLinkRequest,
	) -> Result<SamePersonLink> {
		self.post_json("same-person-links", request).await
	}

	/// Remove a same-person link.
	pub async fn delete_same_person_link(&self, link_id: &str) -> Result<()> {
		self.delete(&format!("same-person-links/{link_id}")).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_deserializes() {
		let json = r#"{
			"id": "l_1",
			"nodeId": "n_1",
			"otherNodeId": "n_9",
			"createdBy": "u_1",
			"createdAt": "2025-06-03T14:00:00Z"
		}"#;

		let link: SamePersonLink = serde_json::from_str(json).unwrap();
		assert_eq!(link.node_id, "n_1");
		assert_eq!(link.other_node_id, "n_9");
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Relationship endpoints: the edges between people in a tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// Directed relationship kind, read as `from` is the `kind` of `to`
/// (e.g. `from` is the *parent* of `to`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
	Parent,
	Child,
	Spouse,
	Sibling,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
	pub id: String,
	pub tree_id: String,
	pub from_node_id: String,
	pub to_node_id: String,
	pub kind: RelationshipKind,
	pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipRequest {
	pub from_node_id: String,
	pub to_node_id: String,
	pub kind: RelationshipKind,
}

impl ApiClient {
	/// List every relationship in a tree.
	pub async fn list_relationships(&self, tree_id: &str) -> Result<Vec<Relationship>> {
		self.get_json(&format!("trees/{tree_id}/relationships"))
			.await
	}

	/// Connect two people.
	pub async fn create_relationship(
		&self,
		tree_id: &str,
		request: &CreateRelationshipRequest,
	) -> Result<Relationship> {
		self.post_json(&format!("trees/{tree_id}/relationships"), request)
			.await
	}

	/// Remove a relationship.
	pub async fn delete_relationship(&self, tree_id: &str, relationship_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}/relationships/{relationship_id}"))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relationship_kind_roundtrips_lowercase() {
		let json = serde_json::to_string(&RelationshipKind::Spouse).unwrap();
		assert_eq!(json, "\"spouse\"");

		let kind: RelationshipKind = serde_json::from_str("\"parent\"").unwrap();
		assert_eq!(kind, RelationshipKind::Parent);
	}

	#[test]
	fn relationship_deserializes() {
		let json = r#"{
			"id": "r_1",
			"treeId": "t_1",
			"fromNodeId": "n_1",
			"toNodeId": "n_2",
			"kind": "parent"
		}"#;

		let relationship: Relationship = serde_json::from_str(json).unwrap();
		assert_eq!(relationship.from_node_id, "n_1");
		assert_eq!(relationship.kind, RelationshipKind::Parent);
	}
}

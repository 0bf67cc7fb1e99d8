// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Person ("node") endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
	Female,
	Male,
	Other,
}

/// A person in a family tree.
///
/// Dates are calendar dates, not instants; the backend stores them without
/// timezones.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonNode {
	pub id: String,
	pub tree_id: String,
	pub given_name: String,
	pub family_name: Option<String>,
	pub maiden_name: Option<String>,
	pub gender: Option<Gender>,
	pub birth_date: Option<NaiveDate>,
	pub death_date: Option<NaiveDate>,
	pub bio: Option<String>,
	pub avatar_url: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
	pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNodeRequest {
	pub given_name: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub maiden_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gender: Option<Gender>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birth_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub death_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub given_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub family_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub maiden_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub gender: Option<Gender>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub birth_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub death_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bio: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar_url: Option<String>,
}

impl ApiClient {
	/// List every person in a tree.
	pub async fn list_nodes(&self, tree_id: &str) -> Result<Vec<PersonNode>> {
		self.get_json(&format!("trees/{tree_id}/nodes")).await
	}

	/// Fetch one person.
	pub async fn get_node(&self, tree_id: &str, node_id: &str) -> Result<PersonNode> {
		self.get_json(&format!("trees/{tree_id}/nodes/{node_id}"))
			.await
	}

	/// Add a person to a tree.
	pub async fn create_node(
		&self,
		tree_id: &str,
		request: &CreateNodeRequest,
	) -> Result<PersonNode> {
		self.post_json(&format!("trees/{tree_id}/nodes"), request)
			.await
	}

	/// Update a person's details.
	pub async fn update_node(
		&self,
		tree_id: &str,
		node_id: &str,
		request: &UpdateNodeRequest,
	) -> Result<PersonNode> {
		self.patch_json(&format!("trees/{tree_id}/nodes/{node_id}"), request)
			.await
	}

	/// Remove a person from a tree.
	pub async fn delete_node(&self, tree_id: &str, node_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}/nodes/{node_id}"))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn person_node_deserializes() {
		let json = r#"{
			"id": "n_1",
			"treeId": "t_1",
			"givenName": "Ada",
			"familyName": "Lovelace",
			"maidenName": "Byron",
			"gender": "female",
			"birthDate": "1815-12-10",
			"deathDate": "1852-11-27",
			"bio": null,
			"avatarUrl": null
		}"#;

		let node: PersonNode = serde_json::from_str(json).unwrap();
		assert_eq!(node.given_name, "Ada");
		assert_eq!(node.gender, Some(Gender::Female));
		assert_eq!(
			node.birth_date,
			Some(NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
		);
	}

	#[test]
	fn create_request_serializes_dates_as_plain_days() {
		let request = CreateNodeRequest {
			given_name: "Ada".to_string(),
			family_name: None,
			maiden_name: None,
			gender: None,
			birth_date: NaiveDate::from_ymd_opt(1815, 12, 10),
			death_date: None,
			bio: None,
		};

		let json = serde_json::to_string(&request).unwrap();
		assert!(json.contains("\"birthDate\":\"1815-12-10\""));
		assert!(!json.contains("deathDate"));
	}
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Timeline event endpoints.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

/// A dated event on a tree's timeline, optionally attached to one person.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
	pub id: String,
	pub tree_id: String,
	pub node_id: Option<String>,
	pub title: String,
	pub description: Option<String>,
	pub event_date: Option<NaiveDate>,
	pub location: Option<String>,
	pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
	pub title: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub node_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub event_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub event_date: Option<NaiveDate>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub location: Option<String>,
}

impl ApiClient {
	/// List a tree's timeline events.
	pub async fn list_events(&self, tree_id: &str) -> Result<Vec<TimelineEvent>> {
		self.get_json(&format!("trees/{tree_id}/events")).await
	}

	/// Add an event to a tree's timeline.
	pub async fn create_event(
		&self,
		tree_id: &str,
		request: &CreateEventRequest,
	) -> Result<TimelineEvent> {
		self.post_json(&format!("trees/{tree_id}/events"), request)
			.await
	}

	/// Update an event.
	pub async fn update_event(
		&self,
		tree_id: &str,
		event_id: &str,
		request: &UpdateEventRequest,
	) -> Result<TimelineEvent> {
		self.patch_json(&format!("trees/{tree_id}/events/{event_id}"), request)
			.await
	}

	/// Remove an event.
	pub async fn delete_event(&self, tree_id: &str, event_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}/events/{event_id}"))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn event_deserializes_with_minimal_fields() {
		let json = r#"{
			"id": "e_1",
			"treeId": "t_1",
			"title": "Wedding"
		}"#;

		let event: TimelineEvent = serde_json::from_str(json).unwrap();
		assert_eq!(event.title, "Wedding");
		assert!(event.node_id.is_none());
		assert!(event.event_date.is_none());
	}
}

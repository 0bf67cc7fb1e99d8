// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notification endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;

/// Notification category.
///
/// Unknown kinds from newer backends deserialize as [`Other`](Self::Other)
/// instead of failing the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
	Comment,
	AccessRequest,
	SamePersonLink,
	TreeInvite,
	#[serde(other)]
	Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
	pub id: String,
	pub kind: NotificationKind,
	pub message: String,
	pub read: bool,
	pub created_at: Option<DateTime<Utc>>,
}

impl ApiClient {
	/// List the signed-in user's notifications, newest first.
	pub async fn list_notifications(&self) -> Result<Vec<Notification>> {
		self.get_json("notifications").await
	}

	/// Mark one notification as read.
	pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification> {
		self.patch_json(
			&format!("notifications/{notification_id}/read"),
			&serde_json::json!({}),
		)
		.await
	}

	/// Mark every notification as read.
	pub async fn mark_all_notifications_read(&self) -> Result<()> {
		self.post_empty::<()>("notifications/read-all", None).await
	}

	/// Delete a notification.
	pub async fn delete_notification(&self, notification_id: &str) -> Result<()> {
		self.delete(&format!("notifications/{notification_id}"))
			.await
	}
}

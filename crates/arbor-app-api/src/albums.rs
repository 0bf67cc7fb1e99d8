// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Linked photo album endpoints.
//!
//! Albums live in external photo services; a tree only stores links to
//! them. The client never touches the photos themselves.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAlbum {
	pub id: String,
	pub tree_id: String,
	pub name: String,
	pub external_url: String,
	pub provider: Option<String>,
	pub photo_count: Option<u32>,
	pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkAlbumRequest {
	pub name: String,
	pub external_url: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub provider: Option<String>,
}

impl ApiClient {
	/// List the albums linked to a tree.
	pub async fn list_albums(&self, tree_id: &str) -> Result<Vec<LinkedAlbum>> {
		self.get_json(&format!("trees/{tree_id}/albums")).await
	}

	/// Link an external album to a tree.
	pub async fn link_album(&self, tree_id: &str, request: &LinkAlbumRequest) -> Result<LinkedAlbum> {
		self.post_json(&format!("trees/{tree_id}/albums"), request)
			.await
	}

	/// Remove an album link. The external album is untouched.
	pub async fn unlink_album(&self, tree_id: &str, album_id: &str) -> Result<()> {
		self.delete(&format!("trees/{tree_id}/albums/{album_id}"))
			.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linked_album_deserializes() {
		let json = r#"{
			"id": "a_1",
			"treeId": "t_1",
			"name": "Summer 1850",
			"externalUrl": "https://photos.example/albums/abc",
			"provider": "gphotos",
			"photoCount": 42
		}"#;

		let album: LinkedAlbum = serde_json::from_str(json).unwrap();
		assert_eq!(album.photo_count, Some(42));
		assert_eq!(album.provider.as_deref(), Some("gphotos"));
	}
}

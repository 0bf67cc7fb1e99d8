// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Search endpoint.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;
use crate::nodes::PersonNode;
use crate::trees::Tree;

/// Hits across people and trees for one query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
	#[serde(default)]
	pub nodes: Vec<PersonNode>,
	#[serde(default)]
	pub trees: Vec<Tree>,
}

impl ApiClient {
	/// Search people and trees by name.
	///
	/// Pass `tree_id` to scope the search to one tree. The view layer is
	/// expected to debounce input; the client sends exactly what it is
	/// asked to.
	pub async fn search(&self, query: &str, tree_id: Option<&str>) -> Result<SearchResults> {
		let mut params = vec![("q", query)];
		if let Some(tree_id) = tree_id {
			params.push(("treeId", tree_id));
		}
		self.get_json_query("search", &params).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn search_results_default_to_empty_sections() {
		let results: SearchResults = serde_json::from_str("{}").unwrap();
		assert!(results.nodes.is_empty());
		assert!(results.trees.is_empty());
	}

	#[test]
	fn search_results_deserialize_hits() {
		let json = r#"{
			"nodes": [{ "id": "n_1", "treeId": "t_1", "givenName": "Ada" }],
			"trees": [{ "id": "t_1", "name": "Lovelace" }]
		}"#;

		let results: SearchResults = serde_json::from_str(json).unwrap();
		assert_eq!(results.nodes.len(), 1);
		assert_eq!(results.trees.len(), 1);
	}
}

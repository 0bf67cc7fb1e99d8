// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

/// Default location of the file-backed credential store.
///
/// `{config_dir}/arbor/credentials.json`, falling back to the working
/// directory when the platform config dir cannot be resolved.
pub fn default_credentials_path() -> PathBuf {
	dirs::config_dir()
		.unwrap_or_else(|| PathBuf::from("."))
		.join("arbor")
		.join("credentials.json")
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper type that keeps session tokens out of logs.
//!
//! Every bearer token the arbor client handles (access tokens, refresh
//! tokens, provider identity tokens) is wrapped in [`Secret<T>`], which:
//!
//! - Never appears in logs (redacted Debug/Display)
//! - Never serializes to plain text (redacted Serialize)
//! - Is zeroized from memory on drop
//! - Requires an explicit `.expose()` call to read the inner value
//!
//! # Example
//!
//! ```
//! use arbor_common_secret::SecretString;
//!
//! let token = SecretString::new("at_3f9a".to_string());
//!
//! assert_eq!(format!("{:?}", token), "Secret(\"[REDACTED]\")");
//! assert_eq!(format!("{}", token), "[REDACTED]");
//!
//! // Attaching the token to a request is an explicit act.
//! assert_eq!(token.expose(), "at_3f9a");
//! ```
//!
//! With structured logging, `info!(token = %token, ...)` goes through
//! `Display` and `info!(?token, ...)` through `Debug`; both print
//! `[REDACTED]`.

use std::fmt;
use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A wrapper for sensitive values that prevents accidental exposure.
///
/// There is no `Deref` impl: call sites must opt in to seeing the secret
/// with [`expose`](Self::expose), which makes token access visible in code
/// review.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Convenience alias for the common case of secret token strings.
pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	/// Create a new secret wrapper around the given value.
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Explicitly access the inner value.
	pub fn expose(&self) -> &T {
		&self.inner
	}

	/// Consume the wrapper and return the inner value.
	///
	/// Clones rather than moves so zeroization still runs on the original
	/// secret memory.
	pub fn into_inner(self) -> T
	where
		T: Clone,
	{
		self.inner.clone()
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			let inner = T::deserialize(deserializer)?;
			Ok(Secret::new(inner))
		}
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		/// Secrets must never leak through Debug, whatever the inner value.
		#[test]
		fn debug_never_contains_secret(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Secret"));

			let secret = Secret::new(inner.clone());
			let debug_output = format!("{secret:?}");
			prop_assert!(!debug_output.contains(&inner));
		}

		/// Secrets must never leak through Display either.
		#[test]
		fn display_never_contains_secret(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));

			let secret = Secret::new(inner.clone());
			let display_output = format!("{secret}");
			prop_assert!(!display_output.contains(&inner));
		}

		#[cfg(feature = "serde")]
		#[test]
		fn serialize_never_contains_secret(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));

			let secret = Secret::new(inner.clone());
			let json = serde_json::to_string(&secret).unwrap();
			prop_assert!(!json.contains(&inner));
		}

		#[test]
		fn expose_roundtrips(inner in ".*") {
			let secret = Secret::new(inner.clone());
			prop_assert_eq!(secret.expose(), &inner);
		}
	}
}

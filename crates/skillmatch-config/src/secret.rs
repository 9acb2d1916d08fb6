// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for provider credentials.
//!
//! The RapidAPI key and host are injected by the hosting application and
//! must never show up in logs, config dumps or panic messages. [`Secret`]
//! keeps them out of `Debug`, `Display` and `Serialize` output and wipes the
//! backing memory on drop.
//!
//! ```
//! use skillmatch_config::Secret;
//!
//! let key = Secret::new("rapidapi-key".to_string());
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(key.expose(), "rapidapi-key");
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Placeholder written wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

/// A credential that is only readable through [`Secret::expose`].
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

pub type SecretString = Secret<String>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Access the wrapped value. Keep the result out of log fields.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretString {
	/// True when the credential is empty or only whitespace.
	pub fn is_blank(&self) -> bool {
		self.inner.trim().is_empty()
	}

	/// Copy of `text` with every occurrence of the credential replaced by
	/// [`REDACTED`]. Used for values such as URLs that embed the API host.
	pub fn redact_from(&self, text: &str) -> String {
		if self.inner.is_empty() {
			return text.to_string();
		}
		text.replace(self.inner.as_str(), REDACTED)
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

impl<T> Serialize for Secret<T>
where
	T: Zeroize,
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
		T::deserialize(deserializer).map(Secret::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn debug_is_redacted() {
		let secret = Secret::new("rapidapi-key-123".to_string());
		let output = format!("{secret:?}");
		assert!(!output.contains("rapidapi-key-123"));
		assert_eq!(output, "Secret(\"[REDACTED]\")");
	}

	#[test]
	fn display_is_redacted() {
		let secret = Secret::new("rapidapi-key-123".to_string());
		assert_eq!(secret.to_string(), REDACTED);
	}

	#[test]
	fn serialize_is_redacted() {
		let secret = Secret::new("rapidapi-key-123".to_string());
		let json = serde_json::to_string(&secret).unwrap();
		assert_eq!(json, "\"[REDACTED]\"");
	}

	#[test]
	fn deserialize_keeps_value() {
		let secret: SecretString = serde_json::from_str("\"from-config\"").unwrap();
		assert_eq!(secret.expose(), "from-config");
	}

	#[test]
	fn blank_detection() {
		assert!(Secret::new("   ".to_string()).is_blank());
		assert!(Secret::new(String::new()).is_blank());
		assert!(!Secret::new("k".to_string()).is_blank());
	}

	#[test]
	fn redact_from_masks_embedded_secret() {
		let host = Secret::new("jsearch.p.rapidapi.com".to_string());
		assert_eq!(
			host.redact_from("https://jsearch.p.rapidapi.com/search"),
			"https://[REDACTED]/search"
		);
		assert_eq!(
			host.redact_from("http://127.0.0.1:9000/search"),
			"http://127.0.0.1:9000/search"
		);
		assert_eq!(Secret::new(String::new()).redact_from("abc"), "abc");
	}

	#[test]
	fn clone_compares_equal() {
		let secret = Secret::new("abc".to_string());
		assert_eq!(secret.clone(), secret);
	}

	proptest! {
		/// A credential never leaks through either formatting trait,
		/// whatever it contains.
		#[test]
		fn formatting_never_leaks(value in "[a-zA-Z0-9]{8,64}") {
			let secret = Secret::new(value.clone());
			let debug = format!("{secret:?}");
			let display = format!("{secret}");
			prop_assert!(!debug.contains(&value));
			prop_assert!(!display.contains(&value));
			prop_assert_eq!(secret.expose(), &value);
		}
	}
}

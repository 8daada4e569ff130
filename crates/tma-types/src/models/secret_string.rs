//! Secure string handling for the bot token
//!
//! This module provides a `SecretString` type that uses zeroize to securely
//! clear sensitive data from memory when dropped.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string type that zeroizes its contents when dropped
///
/// This type holds the long-lived bot token that all signature verification
/// keys are derived from. The underlying string data is automatically cleared
/// from memory when the `SecretString` is dropped, and every display or
/// serialization path redacts the value.
///
/// # Examples
///
/// ```rust
/// use tma_types::SecretString;
///
/// let bot_token = SecretString::new("123456:bot-token".to_string());
///
/// // Access the secret value only at the point of key derivation
/// let token_bytes = bot_token.expose_secret().as_bytes();
/// # let _ = token_bytes;
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	/// Create a new `SecretString` from a `String`
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Create a new `SecretString` from a string slice
	pub fn from_str(secret: &str) -> Self {
		Self::new(secret.to_string())
	}

	/// Expose the secret value
	///
	/// Use this method sparingly and only when the actual token bytes are
	/// needed, i.e. when deriving the HMAC signing key.
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	/// Get the length of the secret without exposing it
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Check if the secret is empty without exposing it
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}

// Drop implementation is automatically provided by ZeroizeOnDrop derive

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SecretString")
			.field("inner", &"[REDACTED]")
			.finish()
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::from_str(secret)
	}
}

// Custom serialization to avoid accidentally leaking the token in logs
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("[REDACTED]")
	}
}

// Custom deserialization for loading the token from config
impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secret = String::deserialize(deserializer)?;
		Ok(SecretString::new(secret))
	}
}

impl PartialEq for SecretString {
	fn eq(&self, other: &Self) -> bool {
		// Use constant-time comparison to avoid timing attacks
		constant_time_eq(self.inner.as_bytes(), other.inner.as_bytes())
	}
}

impl Eq for SecretString {}

/// Constant-time comparison to prevent timing attacks
/// Returns true if the two byte slices are equal
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}

	let mut result = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		result |= x ^ y;
	}
	result == 0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_secret_string_creation() {
		let secret = SecretString::new("test-token".to_string());
		assert_eq!(secret.expose_secret(), "test-token");
		assert_eq!(secret.len(), 10);
		assert!(!secret.is_empty());
	}

	#[test]
	fn test_secret_string_from_str() {
		let secret = SecretString::from_str("123456:abc");
		assert_eq!(secret.expose_secret(), "123456:abc");
	}

	#[test]
	fn test_secret_string_debug_redacts() {
		let secret = SecretString::new("bot-token".to_string());
		let debug_str = format!("{:?}", secret);
		assert!(debug_str.contains("[REDACTED]"));
		assert!(!debug_str.contains("bot-token"));
	}

	#[test]
	fn test_secret_string_display_redacts() {
		let secret = SecretString::new("bot-token".to_string());
		assert_eq!(format!("{}", secret), "[REDACTED]");
	}

	#[test]
	fn test_secret_string_equality() {
		let secret1 = SecretString::new("same-token".to_string());
		let secret2 = SecretString::new("same-token".to_string());
		let secret3 = SecretString::new("different-token".to_string());

		assert_eq!(secret1, secret2);
		assert_ne!(secret1, secret3);
	}

	#[test]
	fn test_secret_string_serialization_redacts() {
		let secret = SecretString::new("bot-token".to_string());
		let serialized = serde_json::to_string(&secret).unwrap();
		assert_eq!(serialized, "\"[REDACTED]\"");
	}

	#[test]
	fn test_secret_string_deserialization() {
		let json = "\"123456:real-token\"";
		let secret: SecretString = serde_json::from_str(json).unwrap();
		assert_eq!(secret.expose_secret(), "123456:real-token");
	}
}

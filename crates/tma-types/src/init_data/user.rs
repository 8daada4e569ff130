//! Embedded Telegram user model

use serde::{Deserialize, Serialize};

/// Identity claims embedded in the `user` field of an init-data payload
///
/// Only `id` is guaranteed by Telegram; everything else depends on the
/// account and client. Unknown fields in the JSON object are ignored so new
/// client versions do not break parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramUser {
	/// Unique Telegram user identifier
	pub id: i64,
	/// First name as set on the account
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Last name as set on the account
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Public @username, without the leading @
	#[serde(skip_serializing_if = "Option::is_none")]
	pub username: Option<String>,
	/// IETF language tag of the client
	#[serde(skip_serializing_if = "Option::is_none")]
	pub language_code: Option<String>,
	/// Profile photo URL, when the client shares one
	#[serde(skip_serializing_if = "Option::is_none")]
	pub photo_url: Option<String>,
	/// Whether the account has Telegram Premium
	#[serde(skip_serializing_if = "Option::is_none")]
	pub is_premium: Option<bool>,
}

impl TelegramUser {
	/// Display name assembled from first and last name, falling back to the
	/// username and finally the numeric id
	pub fn display_name(&self) -> String {
		match (&self.first_name, &self.last_name) {
			(Some(first), Some(last)) => format!("{} {}", first, last),
			(Some(first), None) => first.clone(),
			(None, Some(last)) => last.clone(),
			(None, None) => self
				.username
				.clone()
				.unwrap_or_else(|| self.id.to_string()),
		}
	}
}

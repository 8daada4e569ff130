//! Signed init-data payload model and parser
//!
//! Telegram Mini Apps hand the backend a `window.Telegram.WebApp.initData`
//! string: URL-query-encoded key-value pairs, one of which (`hash`) is the
//! claimed HMAC-SHA256 signature over the rest. This module decodes that
//! string while retaining the exact decoded text of every field, because the
//! data-check string used for signature verification must be built from the
//! original field text and not from a re-serialization of any parsed
//! structure.

pub mod errors;
pub mod user;

pub use errors::{InitDataError, InitDataResult};
pub use user::TelegramUser;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Field name carrying the claimed signature
pub const HASH_FIELD: &str = "hash";

/// Field name carrying the Unix timestamp of signing
pub const AUTH_DATE_FIELD: &str = "auth_date";

/// Field name carrying the embedded user object
pub const USER_FIELD: &str = "user";

/// A single decoded init-data field
///
/// `raw` is the percent-decoded field text exactly as received; it is the
/// form that participates in the data-check string. For the `user` field a
/// structured decoding is kept alongside the raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct InitDataField {
	/// Percent-decoded field value as received
	pub raw: String,
	/// Structured decoding, present only for the `user` field
	pub user: Option<TelegramUser>,
}

impl InitDataField {
	fn plain(raw: String) -> Self {
		Self { raw, user: None }
	}
}

/// A parsed init-data payload
///
/// Fields are keyed by name in a `BTreeMap`, which iterates in ascending
/// byte-wise key order; the data-check string relies on that ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InitData {
	fields: BTreeMap<String, InitDataField>,
}

impl InitData {
	/// Parse a URL-query-encoded init-data string
	///
	/// Keys and values are percent-decoded (`+` decodes to a space). When a
	/// key appears more than once the last occurrence wins. A pair with no
	/// `=` decodes to an empty value. The `user` field must additionally be
	/// valid JSON; anything else there is a hard parse error rather than a
	/// silently dropped field.
	pub fn parse(init_data: &str) -> InitDataResult<Self> {
		if init_data.is_empty() {
			return Err(InitDataError::Empty);
		}

		let mut fields = BTreeMap::new();
		for (key, value) in url::form_urlencoded::parse(init_data.as_bytes()) {
			let key = key.into_owned();
			let raw = value.into_owned();

			let field = if key == USER_FIELD {
				let user: TelegramUser = serde_json::from_str(&raw)
					.map_err(|_| InitDataError::InvalidUserField)?;
				InitDataField {
					raw,
					user: Some(user),
				}
			} else {
				InitDataField::plain(raw)
			};

			fields.insert(key, field);
		}

		Ok(Self { fields })
	}

	/// Build the data-check string the signature was computed over
	///
	/// All fields except `hash`, in ascending byte-wise key order, rendered
	/// as `key=value` on the retained raw text and joined with single
	/// newlines. A field with an empty value still renders as `key=`.
	pub fn data_check_string(&self) -> String {
		self.fields
			.iter()
			.filter(|(key, _)| key.as_str() != HASH_FIELD)
			.map(|(key, field)| format!("{}={}", key, field.raw))
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// The claimed signature, if present
	pub fn hash(&self) -> Option<&str> {
		self.fields.get(HASH_FIELD).map(|f| f.raw.as_str())
	}

	/// The signing timestamp
	///
	/// Fails with `InvalidAuthDate` when the field is absent or is not a
	/// valid Unix timestamp.
	pub fn auth_date(&self) -> InitDataResult<DateTime<Utc>> {
		let raw = self
			.fields
			.get(AUTH_DATE_FIELD)
			.ok_or(InitDataError::InvalidAuthDate)?;
		let secs: i64 = raw
			.raw
			.parse()
			.map_err(|_| InitDataError::InvalidAuthDate)?;
		DateTime::from_timestamp(secs, 0).ok_or(InitDataError::InvalidAuthDate)
	}

	/// The embedded user identity, if the payload carried one
	pub fn user(&self) -> Option<&TelegramUser> {
		self.fields.get(USER_FIELD).and_then(|f| f.user.as_ref())
	}

	/// The query identifier, if present
	pub fn query_id(&self) -> Option<&str> {
		self.fields.get("query_id").map(|f| f.raw.as_str())
	}

	/// Raw decoded value of an arbitrary field
	pub fn get(&self, key: &str) -> Option<&str> {
		self.fields.get(key).map(|f| f.raw.as_str())
	}

	/// Whether the payload carries no fields at all
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Number of decoded fields, `hash` included
	pub fn len(&self) -> usize {
		self.fields.len()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_decodes_fields() {
		let parsed =
			InitData::parse("auth_date=1700000000&query_id=AAA&hash=deadbeef").unwrap();

		assert_eq!(parsed.len(), 3);
		assert_eq!(parsed.get("auth_date"), Some("1700000000"));
		assert_eq!(parsed.query_id(), Some("AAA"));
		assert_eq!(parsed.hash(), Some("deadbeef"));
	}

	#[test]
	fn test_parse_percent_decoding() {
		let parsed = InitData::parse("start_param=a%26b%3Dc&note=one+two&hash=00").unwrap();
		assert_eq!(parsed.get("start_param"), Some("a&b=c"));
		assert_eq!(parsed.get("note"), Some("one two"));
	}

	#[test]
	fn test_parse_user_field() {
		let parsed = InitData::parse(
			"user=%7B%22id%22%3A123%2C%22first_name%22%3A%22Ann%22%7D&hash=00",
		)
		.unwrap();

		let user = parsed.user().unwrap();
		assert_eq!(user.id, 123);
		assert_eq!(user.first_name.as_deref(), Some("Ann"));
		// Raw decoded text is retained verbatim
		assert_eq!(parsed.get("user"), Some(r#"{"id":123,"first_name":"Ann"}"#));
	}

	#[test]
	fn test_parse_invalid_user_field_fails() {
		let err = InitData::parse("user=not-json&hash=00").unwrap_err();
		assert!(matches!(err, InitDataError::InvalidUserField));
	}

	#[test]
	fn test_parse_empty_input_fails() {
		assert!(matches!(
			InitData::parse("").unwrap_err(),
			InitDataError::Empty
		));
	}

	#[test]
	fn test_parse_duplicate_key_last_wins() {
		let parsed = InitData::parse("query_id=first&query_id=second&hash=00").unwrap();
		assert_eq!(parsed.query_id(), Some("second"));
		assert_eq!(parsed.len(), 2);
	}

	#[test]
	fn test_parse_pair_without_value() {
		let parsed = InitData::parse("query_id&hash=00").unwrap();
		assert_eq!(parsed.query_id(), Some(""));
	}

	#[test]
	fn test_data_check_string_matches_spec_vector() {
		let parsed = InitData::parse(
			"auth_date=1700000000&query_id=AAA&user=%7B%22id%22%3A123%2C%22first_name%22%3A%22Ann%22%7D&hash=feed",
		)
		.unwrap();

		assert_eq!(
			parsed.data_check_string(),
			"auth_date=1700000000\nquery_id=AAA\nuser={\"id\":123,\"first_name\":\"Ann\"}"
		);
	}

	#[test]
	fn test_data_check_string_excludes_hash_and_sorts() {
		let parsed = InitData::parse("b=2&hash=ff&a=1&c=").unwrap();
		assert_eq!(parsed.data_check_string(), "a=1\nb=2\nc=");
	}

	#[test]
	fn test_data_check_string_order_independent() {
		let forward = InitData::parse("auth_date=1&query_id=Q&hash=ff").unwrap();
		let reversed = InitData::parse("hash=ff&query_id=Q&auth_date=1").unwrap();
		assert_eq!(forward.data_check_string(), reversed.data_check_string());
	}

	#[test]
	fn test_auth_date_parsing() {
		let parsed = InitData::parse("auth_date=1700000000&hash=00").unwrap();
		let auth_date = parsed.auth_date().unwrap();
		assert_eq!(auth_date.timestamp(), 1_700_000_000);
	}

	#[test]
	fn test_auth_date_missing_or_invalid() {
		let missing = InitData::parse("query_id=Q&hash=00").unwrap();
		assert!(matches!(
			missing.auth_date().unwrap_err(),
			InitDataError::InvalidAuthDate
		));

		let garbage = InitData::parse("auth_date=soon&hash=00").unwrap();
		assert!(matches!(
			garbage.auth_date().unwrap_err(),
			InitDataError::InvalidAuthDate
		));
	}
}

//! Init-data signature verification using HMAC-SHA256
//!
//! Implements the Telegram Web App integrity check: the signing key is the
//! SHA-256 digest of the bot token, and the signature is the HMAC-SHA256 of
//! the payload's data-check string, rendered as lowercase hex. Verification
//! is fail-closed: any malformed payload, missing field, or crypto failure
//! produces an untrusted verdict, never an escaped error.

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use thiserror::Error;
use tma_types::{InitData, InitDataError, SecretString, TelegramUser};
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during init-data verification
///
/// Variants never carry payload text, the bot token, or derived key material.
#[derive(Debug, Error)]
pub enum VerifierError {
	#[error("Invalid init data: {0}")]
	Payload(#[from] InitDataError),

	#[error("Failed to create HMAC: {0}")]
	HmacCreation(String),

	#[error("Signature mismatch")]
	SignatureMismatch,

	#[error("Payload is older than the allowed age window")]
	Expired,
}

/// Verification policy knobs
///
/// `max_auth_age_secs` is off by default: Telegram does not require a
/// freshness check and the pre-enrollment backend historically accepted any
/// `auth_date`. Deployments that want replay resistance can set it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
	/// Reject payloads whose `auth_date` is older than this many seconds
	pub max_auth_age_secs: Option<u64>,
	/// How long an authenticated session derived from a payload stays valid
	pub session_ttl_secs: u64,
}

impl Default for VerifierConfig {
	fn default() -> Self {
		Self {
			max_auth_age_secs: None,
			// 24 hours, matching the session expiry used by the enrollment backend
			session_ttl_secs: 24 * 60 * 60,
		}
	}
}

/// A payload that passed signature verification
///
/// Carries the parsed fields plus the session window computed from
/// `auth_date` and the configured TTL.
#[derive(Debug, Clone)]
pub struct AuthenticatedInitData {
	/// The verified, parsed payload
	pub init_data: InitData,
	/// When the payload was signed
	pub auth_date: DateTime<Utc>,
	/// When a session derived from this payload should expire
	pub expires_at: DateTime<Utc>,
}

impl AuthenticatedInitData {
	/// Identity claims embedded in the payload, if any
	pub fn user(&self) -> Option<&TelegramUser> {
		self.init_data.user()
	}
}

#[cfg_attr(test, mockall::automock)]
pub trait InitDataVerifier: Send + Sync {
	/// Fail-closed trust decision for a raw init-data string
	///
	/// Returns `true` iff the payload's `hash` field is a valid signature
	/// over its data-check string. Every failure mode collapses to `false`.
	fn verify(&self, init_data: &str) -> bool;

	/// Verify and return the parsed payload for identity consumption
	fn authenticate(&self, init_data: &str) -> Result<AuthenticatedInitData, VerifierError>;
}

/// Init-data verification service
///
/// Holds the bot token and derives the signing key per verification. The
/// service has no mutable state and can be shared freely across threads.
pub struct VerifierService {
	secret: SecretString,
	config: VerifierConfig,
}

impl VerifierService {
	/// Create a verifier with the given bot token and default config
	pub fn new(secret: SecretString) -> Self {
		Self::with_config(secret, VerifierConfig::default())
	}

	/// Create a verifier with an explicit config
	pub fn with_config(secret: SecretString, config: VerifierConfig) -> Self {
		Self { secret, config }
	}

	/// Compute the expected lowercase-hex signature for a data-check string
	fn expected_signature(&self, data_check_string: &str) -> Result<String, VerifierError> {
		// The signing key is the SHA-256 digest of the bot token
		let secret_key = Sha256::digest(self.secret.expose_secret().as_bytes());

		let mut mac = HmacSha256::new_from_slice(&secret_key)
			.map_err(|e| VerifierError::HmacCreation(e.to_string()))?;
		mac.update(data_check_string.as_bytes());

		let code_bytes = mac.finalize().into_bytes();
		let mut hex_string = String::with_capacity(code_bytes.len() * 2);
		for byte in code_bytes {
			write!(&mut hex_string, "{:02x}", byte)
				.map_err(|e| VerifierError::HmacCreation(format!("Failed to format hex: {}", e)))?;
		}

		Ok(hex_string)
	}

	/// Full verification pipeline, surfacing the specific failure
	fn check(&self, init_data: &str) -> Result<InitData, VerifierError> {
		let parsed = InitData::parse(init_data)?;
		let claimed = parsed.hash().ok_or(InitDataError::MissingHash)?;

		let expected = self.expected_signature(&parsed.data_check_string())?;
		if !constant_time_eq(expected.as_bytes(), claimed.as_bytes()) {
			return Err(VerifierError::SignatureMismatch);
		}

		if let Some(max_age) = self.config.max_auth_age_secs {
			let auth_date = parsed.auth_date()?;
			if Utc::now() - auth_date > Duration::seconds(max_age as i64) {
				return Err(VerifierError::Expired);
			}
		}

		Ok(parsed)
	}
}

impl InitDataVerifier for VerifierService {
	fn verify(&self, init_data: &str) -> bool {
		match self.check(init_data) {
			Ok(_) => true,
			Err(reason) => {
				// Log the failure kind only; the payload itself stays out of
				// every diagnostic channel
				debug!(%reason, "init data rejected");
				false
			},
		}
	}

	fn authenticate(&self, init_data: &str) -> Result<AuthenticatedInitData, VerifierError> {
		let parsed = self.check(init_data)?;
		let auth_date = parsed.auth_date()?;
		let expires_at = auth_date + Duration::seconds(self.config.session_ttl_secs as i64);

		Ok(AuthenticatedInitData {
			init_data: parsed,
			auth_date,
			expires_at,
		})
	}
}

/// Constant-time comparison to prevent timing attacks
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

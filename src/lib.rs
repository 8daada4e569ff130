//! TMA Auth Library
//!
//! Authentication of Telegram Mini App `initData` payloads for the
//! pre-enrollment backend: parsing the signed key-value payload, rebuilding
//! the data-check string, and validating its HMAC-SHA256 signature against
//! the bot token.

// Core domain types - the most commonly used types
pub use tma_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	// Payload model
	InitData,
	// Error types
	InitDataError,
	InitDataField,
	SecretString,
	TelegramUser,
};

// Service layer
pub use tma_service::{
	AuthenticatedInitData, InitDataVerifier, VerifierConfig, VerifierError, VerifierService,
};

// Module aliases for callers that prefer explicit paths
pub mod models {
	pub use tma_types::*;
}

pub mod service {
	pub use tma_service::*;
}

/// Verify a raw init-data string against a bot token
///
/// This is the single exposed operation: a fail-closed trust decision. The
/// secret is an explicit argument; nothing is read from the environment. Any
/// malformed payload, missing `hash`, or crypto failure yields `false`.
///
/// # Examples
///
/// ```rust
/// let trusted = tma_auth::verify("auth_date=1700000000&hash=ff", "bot-token");
/// assert!(!trusted);
/// ```
pub fn verify(init_data: &str, bot_token: &str) -> bool {
	VerifierService::new(SecretString::from(bot_token)).verify(init_data)
}

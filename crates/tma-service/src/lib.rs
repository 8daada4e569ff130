//! TMA Service
//!
//! Verification service for Telegram Mini App init-data payloads.

pub mod verifier;

pub use verifier::{
	AuthenticatedInitData, InitDataVerifier, VerifierConfig, VerifierError, VerifierService,
};

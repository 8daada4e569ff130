//! TMA Types
//!
//! Shared models for Telegram Mini App init-data authentication.
//! This crate contains the signed-payload model, the embedded user model,
//! and secure secret handling.

pub mod init_data;
pub mod models;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use init_data::{InitData, InitDataError, InitDataField, InitDataResult, TelegramUser};
pub use models::SecretString;

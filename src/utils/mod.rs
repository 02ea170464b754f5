/// Environment variable helpers
pub mod config;
/// Module containing logging utilities
pub mod logger;
/// Redaction of secrets in logs
pub mod redact;

pub use logger::*;
pub use redact::*;

/// Session-authenticated HTTP client
pub mod client;
/// Application configuration module
pub mod config;
/// Version-specific clients and their resolution
pub mod versioned;

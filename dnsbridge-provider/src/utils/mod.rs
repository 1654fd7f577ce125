//! Utility modules.

/// Log sanitization utilities to keep record payloads and credentials out of logs.
pub mod log_sanitizer;

//! Collaborator credential handling.
//!
//! The pipeline logs prompts, replies, and stage failures liberally, so the
//! API key is kept behind `secrecy`'s zeroizing wrapper and only surfaces
//! where a request is actually signed.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// An API key or similar credential that stays out of logs.
///
/// Both `Debug` and `Display` render as `[REDACTED]`, so a credential that
/// ends up in a trace, an error chain, or a panic message leaks nothing.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// The underlying value, for signing an outgoing request.
    ///
    /// Call at the last possible moment and never store the result.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

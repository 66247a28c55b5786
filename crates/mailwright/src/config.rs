//! Mailer configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SMTP connection parameters and sender identity.
///
/// Constructed once at process start by whatever loads configuration and
/// never mutated afterwards; every delivery attempt reads it.
#[derive(Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Server hostname; also the expected TLS certificate identity.
    pub host: String,
    /// Server port (typically 465 when `secure`, 587 or 25 otherwise).
    pub port: u16,
    /// Username for AUTH PLAIN.
    pub username: String,
    /// Password for AUTH PLAIN.
    pub password: String,
    /// Envelope sender and `From` header address.
    pub from_address: String,
    /// Display name for the `From` header; may be empty.
    #[serde(default)]
    pub from_name: String,
    /// Use implicit TLS instead of a plaintext session.
    pub secure: bool,
}

impl MailerConfig {
    /// Checks the initialization invariant: every field except `from_name`
    /// must be non-empty, and the port must be non-zero.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("host", &self.host),
            ("username", &self.username),
            ("password", &self.password),
            ("from_address", &self.from_address),
        ];
        for (field, value) in required {
            if value.is_empty() {
                return Err(Error::InvalidConfig(format!("{field} must not be empty")));
            }
        }
        if self.port == 0 {
            return Err(Error::InvalidConfig("port must be non-zero".to_string()));
        }
        Ok(())
    }
}

impl fmt::Debug for MailerConfig {
    // Manual impl so the password never reaches logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("secure", &self.secure)
            .finish()
    }
}

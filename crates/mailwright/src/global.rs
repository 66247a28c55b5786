//! Process-wide mailer handle.
//!
//! A write-once, read-many registration for binaries that carry a single
//! mailer: [`initialize`] once during startup, [`send`] from any task
//! afterwards. Reads after initialization are lock-free. Prefer passing a
//! [`Mailer`] explicitly where the call graph allows it.

use crate::config::MailerConfig;
use crate::error::{Error, Result};
use crate::mailer::Mailer;
use std::sync::OnceLock;

static MAILER: OnceLock<Mailer> = OnceLock::new();

/// Validates the configuration and installs the process-wide mailer.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a mailer was already
/// installed; there is no re-initialization path.
pub fn initialize(config: MailerConfig) -> Result<()> {
    let mailer = Mailer::new(config)?;
    MAILER.set(mailer).map_err(|_| Error::AlreadyInitialized)
}

/// Returns the process-wide mailer.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if [`initialize`] has not run.
pub fn mailer() -> Result<&'static Mailer> {
    MAILER.get().ok_or(Error::NotInitialized)
}

/// Sends through the process-wide mailer.
///
/// # Errors
///
/// Fails with [`Error::NotInitialized`], performing no network I/O, when no
/// mailer is installed; otherwise behaves like [`Mailer::send`].
pub async fn send(html: &str, text: &str, subject: &str, to: &str) -> Result<()> {
    mailer()?.send(html, text, subject, to).await
}

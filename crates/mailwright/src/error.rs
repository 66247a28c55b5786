//! Error types for mail dispatch.

use std::fmt;

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Protocol step at which a delivery attempt failed.
///
/// A send is a fixed forward-only sequence; tagging failures with the step
/// spares callers from matching on error message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// TCP connect or TLS handshake.
    Dial,
    /// Server greeting and EHLO exchange.
    Greet,
    /// AUTH PLAIN credential exchange.
    Auth,
    /// Envelope sender declaration.
    MailFrom,
    /// Envelope recipient declaration.
    RcptTo,
    /// DATA command and message streaming.
    Data,
    /// Graceful session close.
    Quit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dial => "dial",
            Self::Greet => "greet",
            Self::Auth => "auth",
            Self::MailFrom => "MAIL FROM",
            Self::RcptTo => "RCPT TO",
            Self::Data => "DATA",
            Self::Quit => "QUIT",
        };
        f.write_str(name)
    }
}

/// Dispatch error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The process-wide mailer was never initialized.
    #[error("mailer not initialized: call initialize first")]
    NotInitialized,

    /// The process-wide mailer was initialized twice.
    #[error("mailer already initialized")]
    AlreadyInitialized,

    /// Configuration failed validation.
    #[error("invalid mailer configuration: {0}")]
    InvalidConfig(String),

    /// A sender or recipient address was rejected before any I/O.
    #[error("invalid envelope address: {0}")]
    Envelope(#[source] mailwright_smtp::Error),

    /// A protocol step failed against the server.
    #[error("SMTP {step} failed: {source}")]
    Transport {
        /// Step that produced the failure.
        step: Step,
        /// Underlying SMTP error.
        #[source]
        source: mailwright_smtp::Error,
    },

    /// A protocol step did not complete within the step timeout.
    #[error("SMTP {step} timed out")]
    Timeout {
        /// Step that timed out.
        step: Step,
    },
}

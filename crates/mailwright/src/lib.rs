//! # mailwright
//!
//! Notification-email dispatch: compose a dual-format (HTML + plain text)
//! MIME message and deliver it over SMTP.
//!
//! The crate sits between a rendering layer and the network: callers hand it
//! fully rendered content plus a recipient, and it produces a
//! `multipart/alternative` message (via [`mailwright_mime`]) and drives one
//! SMTP session to deliver it (via [`mailwright_smtp`]), over plaintext or
//! implicit TLS depending on configuration.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwright::{Mailer, MailerConfig};
//!
//! # async fn run() -> mailwright::Result<()> {
//! let mailer = Mailer::new(MailerConfig {
//!     host: "smtp.example.com".to_string(),
//!     port: 465,
//!     username: "mailer".to_string(),
//!     password: "secret".to_string(),
//!     from_address: "noreply@example.com".to_string(),
//!     from_name: "Example".to_string(),
//!     secure: true,
//! })?;
//!
//! mailer
//!     .send("<p>Welcome!</p>", "Welcome!", "Registration", "user@example.com")
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Binaries with a single mailer can install it process-wide instead:
//!
//! ```ignore
//! mailwright::global::initialize(config)?;
//! // ... later, from any task:
//! mailwright::global::send(html, text, subject, to).await?;
//! ```
//!
//! ## Failure model
//!
//! Every send opens its own connection and runs the protocol steps in a
//! fixed order; the first failing step aborts the attempt, drops the
//! connection, and surfaces as an [`Error`] tagged with the [`error::Step`]
//! that failed. Nothing is retried.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod config;
pub mod error;
pub mod global;
mod mailer;

pub use config::MailerConfig;
pub use error::{Error, Result};
pub use mailer::{Mailer, STEP_TIMEOUT};

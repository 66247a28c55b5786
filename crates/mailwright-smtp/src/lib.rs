//! # mailwright-smtp
//!
//! A minimal async SMTP submission client for one-shot notification email.
//!
//! The client drives a single forward-only mail transaction over either a
//! plain TCP connection or an implicit-TLS connection (port 465 style, no
//! STARTTLS). Valid command ordering is enforced at compile time through the
//! type-state pattern: each protocol step consumes the client and returns it
//! in the next state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use mailwright_smtp::{Address, Client};
//! use mailwright_smtp::connection::connect_tls;
//!
//! # async fn run() -> mailwright_smtp::Result<()> {
//! let stream = connect_tls("smtp.example.com", 465).await?;
//! let client = Client::from_stream(stream).await?;
//! let client = client.ehlo("localhost").await?;
//! let client = client.auth_plain("user@example.com", "password").await?;
//!
//! let client = client.mail_from(Address::new("sender@example.com")?).await?;
//! let client = client.rcpt_to(Address::new("recipient@example.com")?).await?;
//! let client = client.data().await?;
//! let client = client.send_message(b"Subject: Test\r\n\r\nHello\r\n").await?;
//! client.quit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Connection states
//!
//! ```text
//! Connected ──auth_plain()──▶ Authenticated ──mail_from()──▶ MailTransaction
//!      ▲                                                           │
//!      │                                                      rcpt_to()
//!  send_message()                                                  ▼
//!      │                                                    RecipientAdded
//!   DataMode ◀──────────────────── data() ─────────────────────────┘
//! ```
//!
//! `quit()` is available from every state except `DataMode`: once the
//! server has answered 354 it reads everything as message content, so the
//! only way out is `send_message`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod command;
pub mod connection;
mod error;
mod parser;
pub mod types;

pub use connection::{Authenticated, Client, Connected, DataMode, MailTransaction, RecipientAdded};
pub use error::{Error, Result};
pub use types::{Address, Mailbox, Reply, ReplyCode};

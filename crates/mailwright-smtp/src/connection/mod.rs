//! SMTP connection management with type-state pattern.

mod client;
mod stream;

pub use client::{Authenticated, Client, Connected, DataMode, MailTransaction, RecipientAdded};
pub use stream::{SmtpStream, connect, connect_tls};

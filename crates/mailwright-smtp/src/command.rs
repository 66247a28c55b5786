//! SMTP command builder.

use crate::types::Address;

/// SMTP command.
///
/// Only the commands a one-shot authenticated submission needs are carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// EHLO - Extended greeting
    Ehlo {
        /// Client hostname
        hostname: String,
    },
    /// AUTH PLAIN with SASL-IR initial response
    AuthPlain {
        /// Base64-encoded `\0user\0pass`
        initial_response: String,
    },
    /// MAIL FROM - Start mail transaction
    MailFrom {
        /// Envelope sender
        from: Address,
    },
    /// RCPT TO - Add recipient
    RcptTo {
        /// Envelope recipient
        to: Address,
    },
    /// DATA - Begin message data
    Data,
    /// QUIT - Close connection
    Quit,
}

impl Command {
    /// Serializes the command to its CRLF-terminated wire form.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let line = match self {
            Self::Ehlo { hostname } => format!("EHLO {hostname}"),
            Self::AuthPlain { initial_response } => format!("AUTH PLAIN {initial_response}"),
            Self::MailFrom { from } => format!("MAIL FROM:<{from}>"),
            Self::RcptTo { to } => format!("RCPT TO:<{to}>"),
            Self::Data => "DATA".to_string(),
            Self::Quit => "QUIT".to_string(),
        };

        let mut buf = line.into_bytes();
        buf.extend_from_slice(b"\r\n");
        buf
    }
}

//! Type-state SMTP client.
//!
//! Each protocol step consumes the client and returns it in the next state,
//! so a transaction can only move forward: greeting, authentication,
//! envelope, data, quit.

use super::SmtpStream;
use crate::command::Command;
use crate::error::{Error, Result};
use crate::parser::{is_last_reply_line, parse_reply};
use crate::types::{Address, Reply, ReplyCode};
use base64::Engine;
use std::marker::PhantomData;

/// Type-state marker: greeting read, not yet authenticated.
#[derive(Debug)]
pub struct Connected;

/// Type-state marker: AUTH accepted.
#[derive(Debug)]
pub struct Authenticated;

/// Type-state marker: envelope sender declared.
#[derive(Debug)]
pub struct MailTransaction;

/// Type-state marker: envelope recipient declared.
#[derive(Debug)]
pub struct RecipientAdded;

/// Type-state marker: DATA accepted, message body pending.
#[derive(Debug)]
pub struct DataMode;

/// SMTP client with type-state pattern.
#[derive(Debug)]
pub struct Client<State> {
    stream: SmtpStream,
    _state: PhantomData<State>,
}

impl Client<Connected> {
    /// Creates a client from a stream and reads the server greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the greeting fails or the server does not
    /// answer with a 2xx reply.
    pub async fn from_stream(mut stream: SmtpStream) -> Result<Self> {
        let greeting = read_reply(&mut stream).await?;
        tracing::trace!(code = %greeting.code, "greeting");
        if !greeting.is_success() {
            return Err(Error::rejected(
                greeting.code.as_u16(),
                greeting.message_text(),
            ));
        }

        Ok(Self {
            stream,
            _state: PhantomData,
        })
    }

    /// Sends EHLO, identifying this client to the server.
    ///
    /// The capability inventory in the reply is not retained; a one-shot
    /// submission only needs the exchange to succeed.
    ///
    /// # Errors
    ///
    /// Returns an error if the EHLO command fails.
    pub async fn ehlo(mut self, client_hostname: &str) -> Result<Self> {
        let reply = self
            .send_command(Command::Ehlo {
                hostname: client_hostname.to_string(),
            })
            .await?;

        if !reply.is_success() {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self)
    }

    /// Authenticates using the PLAIN mechanism with an initial response.
    ///
    /// # Errors
    ///
    /// Returns an error if the server rejects the credentials.
    pub async fn auth_plain(
        mut self,
        username: &str,
        password: &str,
    ) -> Result<Client<Authenticated>> {
        // PLAIN initial response: \0username\0password
        let credentials = format!("\0{username}\0{password}");
        let initial_response =
            base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());

        let reply = self
            .send_command(Command::AuthPlain { initial_response })
            .await?;

        if !reply.is_success() {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self.transition())
    }
}

impl Client<Authenticated> {
    /// Declares the envelope sender, starting the mail transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the MAIL FROM command fails.
    pub async fn mail_from(mut self, from: Address) -> Result<Client<MailTransaction>> {
        let reply = self.send_command(Command::MailFrom { from }).await?;

        if !reply.is_success() {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self.transition())
    }
}

impl Client<MailTransaction> {
    /// Declares the envelope recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the RCPT TO command fails.
    pub async fn rcpt_to(mut self, to: Address) -> Result<Client<RecipientAdded>> {
        let reply = self.send_command(Command::RcptTo { to }).await?;

        if !reply.is_success() {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self.transition())
    }
}

impl Client<RecipientAdded> {
    /// Begins message data transfer.
    ///
    /// # Errors
    ///
    /// Returns an error unless the server answers 354.
    pub async fn data(mut self) -> Result<Client<DataMode>> {
        let reply = self.send_command(Command::Data).await?;

        if reply.code != ReplyCode::START_DATA {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self.transition())
    }
}

impl Client<DataMode> {
    /// Streams the message content and completes the transaction.
    ///
    /// Line endings are normalized to CRLF, lines beginning with `.` are
    /// dot-stuffed, and the terminating `.` line is appended.
    ///
    /// # Errors
    ///
    /// Returns an error if sending fails or the server rejects the message.
    pub async fn send_message(mut self, message: &[u8]) -> Result<Client<Connected>> {
        let mut segments = message.split(|&b| b == b'\n').peekable();
        while let Some(raw) = segments.next() {
            // A message ending in a newline yields one final empty segment;
            // transmitting it would insert a blank line the message never
            // contained.
            if raw.is_empty() && segments.peek().is_none() {
                break;
            }

            let line = raw.strip_suffix(b"\r").unwrap_or(raw);

            if line.first() == Some(&b'.') {
                self.stream.write_all(b".").await?;
            }
            self.stream.write_all(line).await?;
            self.stream.write_all(b"\r\n").await?;
        }

        self.stream.write_all(b".\r\n").await?;

        let reply = read_reply(&mut self.stream).await?;
        if !reply.is_success() {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(self.transition())
    }
}

// Common implementation for all states
impl<S> Client<S> {
    fn transition<T>(self) -> Client<T> {
        Client {
            stream: self.stream,
            _state: PhantomData,
        }
    }

    async fn send_command(&mut self, cmd: Command) -> Result<Reply> {
        self.stream.write_all(&cmd.serialize()).await?;
        let reply = read_reply(&mut self.stream).await?;
        // Commands are not logged: AUTH PLAIN carries credentials.
        tracing::trace!(code = %reply.code, "reply");
        Ok(reply)
    }

    async fn close(mut self) -> Result<()> {
        let reply = self.send_command(Command::Quit).await?;

        if !reply.is_success() && reply.code != ReplyCode::CLOSING {
            return Err(Error::rejected(reply.code.as_u16(), reply.message_text()));
        }

        Ok(())
    }
}

// QUIT is a command like any other; in DataMode the server would read it as
// message content, so that state deliberately has no `quit`.
macro_rules! impl_quit {
    ($($state:ty),+) => {$(
        impl Client<$state> {
            /// Sends QUIT, closing the session gracefully.
            ///
            /// # Errors
            ///
            /// Returns an error if the QUIT command fails.
            pub async fn quit(self) -> Result<()> {
                self.close().await
            }
        }
    )+};
}

impl_quit!(Connected, Authenticated, MailTransaction, RecipientAdded);

async fn read_reply(stream: &mut SmtpStream) -> Result<Reply> {
    let mut lines = Vec::new();
    loop {
        let line = stream.read_line().await?;
        if line.is_empty() {
            continue;
        }

        let is_last = is_last_reply_line(&line);
        lines.push(line);

        if is_last {
            break;
        }
    }

    parse_reply(&lines)
}

//! The SMTP transport dispatcher.

use crate::config::MailerConfig;
use crate::error::{Error, Result, Step};
use mailwright_mime::AlternativeMessage;
use mailwright_smtp::connection::{SmtpStream, connect, connect_tls};
use mailwright_smtp::{Address, Client, Mailbox};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Upper bound on each protocol step, dial and TLS handshake included.
///
/// The source system ran unbounded; a stuck server would hang a worker
/// forever, so every step here is individually bounded.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(30);

/// Hostname this client announces in EHLO.
const CLIENT_HOSTNAME: &str = "localhost";

/// Sends dual-format notification email over SMTP.
///
/// Holds the immutable [`MailerConfig`] and opens one connection per send;
/// a `Mailer` can be shared freely across tasks. Construct it once at startup
/// and pass it into request handlers, or use the [`crate::global`] handle for
/// binaries with a single mailer.
#[derive(Debug)]
pub struct Mailer {
    config: MailerConfig,
}

impl Mailer {
    /// Creates a mailer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(config: MailerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration this mailer was built with.
    #[must_use]
    pub const fn config(&self) -> &MailerConfig {
        &self.config
    }

    /// Delivers a dual-format message to a single recipient.
    ///
    /// Builds the `multipart/alternative` wire message, then drives one
    /// complete SMTP session: plaintext when `secure` is off, implicit TLS
    /// when it is on. No retry is attempted; a failure at any step is
    /// reported as a whole-send failure tagged with that step.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid envelope address, or a [`Step`]-tagged
    /// transport or timeout error.
    pub async fn send(&self, html: &str, text: &str, subject: &str, to: &str) -> Result<()> {
        let from = Address::new(&self.config.from_address).map_err(Error::Envelope)?;
        let recipient = Address::new(to).map_err(Error::Envelope)?;
        let from_display = Mailbox::with_name(&self.config.from_name, &self.config.from_address)
            .map_err(Error::Envelope)?;

        let wire =
            AlternativeMessage::new(from_display.to_string(), to, subject, text, html).to_wire();

        debug!(
            host = %self.config.host,
            port = self.config.port,
            secure = self.config.secure,
            to,
            "dispatching message"
        );

        let stream = if self.config.secure {
            step(Step::Dial, connect_tls(&self.config.host, self.config.port)).await?
        } else {
            step(Step::Dial, connect(&self.config.host, self.config.port)).await?
        };

        self.session(stream, from, recipient, &wire).await?;

        debug!(to, bytes = wire.len(), "message accepted");
        Ok(())
    }

    /// Runs the fixed command sequence over an established stream.
    ///
    /// The stream is owned by the client value, so every early return drops
    /// the connection along with it.
    async fn session(
        &self,
        stream: SmtpStream,
        from: Address,
        recipient: Address,
        wire: &[u8],
    ) -> Result<()> {
        let client = step(Step::Greet, Client::from_stream(stream)).await?;
        let client = step(Step::Greet, client.ehlo(CLIENT_HOSTNAME)).await?;
        let client = step(
            Step::Auth,
            client.auth_plain(&self.config.username, &self.config.password),
        )
        .await?;
        let client = step(Step::MailFrom, client.mail_from(from)).await?;
        let client = step(Step::RcptTo, client.rcpt_to(recipient)).await?;
        let client = step(Step::Data, client.data()).await?;
        let client = step(Step::Data, client.send_message(wire)).await?;
        step(Step::Quit, client.quit()).await
    }
}

/// Bounds one protocol step and tags its failure.
async fn step<T>(
    step: Step,
    op: impl Future<Output = mailwright_smtp::Result<T>>,
) -> Result<T> {
    match tokio::time::timeout(STEP_TIMEOUT, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(Error::Transport { step, source }),
        Err(_) => Err(Error::Timeout { step }),
    }
}

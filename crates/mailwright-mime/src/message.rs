//! Dual-format `multipart/alternative` message assembly.

use crate::encoding::{encode_base64_wrapped, encode_header_q};
use std::fmt::Write as _;

/// Fixed MIME part boundary.
///
/// The builder does not scan part bodies for an accidental occurrence; the
/// token is long enough that a collision is accepted as a negligible risk.
pub const BOUNDARY: &str = "==mailwright-boundary==";

/// A dual-format outbound message: the same content rendered as plain text
/// and as HTML.
///
/// Per `multipart/alternative` semantics the parts are emitted in increasing
/// order of preference, so the HTML part comes last and is what capable
/// clients render.
#[derive(Debug, Clone)]
pub struct AlternativeMessage {
    /// Display form of the sender, e.g. `Name <addr@example.com>`.
    pub from: String,
    /// Recipient address as shown in the `To` header.
    pub to: String,
    /// Subject line; Q-encoded on the wire when it contains non-ASCII.
    pub subject: String,
    /// Plain-text rendering of the content.
    pub text: String,
    /// HTML rendering of the content.
    pub html: String,
}

impl AlternativeMessage {
    /// Creates a new message from rendered content.
    #[must_use]
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: html.into(),
        }
    }

    /// Builds the RFC 5322 wire form of the message.
    ///
    /// Headers, a text/plain part, a text/html part, and the closing
    /// boundary, all CRLF-terminated and Base64 transfer-encoded.
    #[must_use]
    pub fn to_wire(&self) -> Vec<u8> {
        let mut msg = String::new();

        let _ = write!(msg, "From: {}\r\n", self.from);
        let _ = write!(msg, "To: {}\r\n", self.to);
        let _ = write!(msg, "Subject: {}\r\n", encode_header_q(&self.subject));
        msg.push_str("MIME-Version: 1.0\r\n");
        let _ = write!(
            msg,
            "Content-Type: multipart/alternative; boundary=\"{BOUNDARY}\"\r\n"
        );
        msg.push_str("\r\n");

        push_part(&mut msg, "text/plain", &self.text);
        push_part(&mut msg, "text/html", &self.html);

        let _ = write!(msg, "--{BOUNDARY}--\r\n");

        msg.into_bytes()
    }
}

fn push_part(msg: &mut String, content_type: &str, body: &str) {
    let _ = write!(msg, "--{BOUNDARY}\r\n");
    let _ = write!(msg, "Content-Type: {content_type}; charset=\"utf-8\"\r\n");
    msg.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
    msg.push_str(&encode_base64_wrapped(body.as_bytes()));
    msg.push_str("\r\n");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::encoding::{decode_base64, decode_header_q};

    fn sample() -> AlternativeMessage {
        AlternativeMessage::new(
            "Example <noreply@example.com>",
            "user@example.com",
            "Test",
            "Hi",
            "<p>Hi</p>",
        )
    }

    #[test]
    fn test_exact_wire_layout() {
        let wire = String::from_utf8(sample().to_wire()).unwrap();
        let expected = "From: Example <noreply@example.com>\r\n\
                        To: user@example.com\r\n\
                        Subject: Test\r\n\
                        MIME-Version: 1.0\r\n\
                        Content-Type: multipart/alternative; boundary=\"==mailwright-boundary==\"\r\n\
                        \r\n\
                        --==mailwright-boundary==\r\n\
                        Content-Type: text/plain; charset=\"utf-8\"\r\n\
                        Content-Transfer-Encoding: base64\r\n\
                        \r\n\
                        SGk=\r\n\
                        \r\n\
                        --==mailwright-boundary==\r\n\
                        Content-Type: text/html; charset=\"utf-8\"\r\n\
                        Content-Transfer-Encoding: base64\r\n\
                        \r\n\
                        PHA+SGk8L3A+\r\n\
                        \r\n\
                        --==mailwright-boundary==--\r\n";
        assert_eq!(wire, expected);
    }

    #[test]
    fn test_boundary_counts() {
        let wire = String::from_utf8(sample().to_wire()).unwrap();
        let opening = format!("--{BOUNDARY}\r\n");
        let closing = format!("--{BOUNDARY}--\r\n");
        assert_eq!(wire.matches(&opening).count(), 2);
        assert_eq!(wire.matches(&closing).count(), 1);
        assert!(wire.ends_with(&closing));
    }

    #[test]
    fn test_html_part_follows_text_part() {
        let wire = String::from_utf8(sample().to_wire()).unwrap();
        let text_at = wire.find("Content-Type: text/plain").unwrap();
        let html_at = wire.find("Content-Type: text/html").unwrap();
        assert!(text_at < html_at);
    }

    #[test]
    fn test_bodies_decode_back() {
        let mut msg = sample();
        msg.text = "こんにちは、世界".to_string();
        msg.html = "<h1>ようこそ</h1>".repeat(20);
        let wire = String::from_utf8(msg.to_wire()).unwrap();

        let mut decoded = Vec::new();
        for section in wire.split(&format!("--{BOUNDARY}")).skip(1).take(2) {
            let (_, body) = section.split_once("\r\n\r\n").unwrap();
            let stripped: String = body
                .chars()
                .filter(|&c| c != '\r' && c != '\n')
                .collect();
            decoded.push(String::from_utf8(decode_base64(&stripped).unwrap()).unwrap());
        }
        assert_eq!(decoded, vec![msg.text.clone(), msg.html.clone()]);
    }

    #[test]
    fn test_ascii_subject_unencoded() {
        let wire = String::from_utf8(sample().to_wire()).unwrap();
        assert!(wire.contains("Subject: Test\r\n"));
    }

    #[test]
    fn test_non_ascii_subject_q_encoded() {
        let mut msg = sample();
        msg.subject = "パスワード再設定".to_string();
        let wire = String::from_utf8(msg.to_wire()).unwrap();

        let line = wire
            .lines()
            .find(|l| l.starts_with("Subject: "))
            .unwrap()
            .trim_start_matches("Subject: ");
        assert!(line.starts_with("=?utf-8?Q?"));
        assert_eq!(decode_header_q(line).unwrap(), msg.subject);
    }
}

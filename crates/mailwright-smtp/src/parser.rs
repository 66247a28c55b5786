//! SMTP response parser.

use crate::error::{Error, Result};
use crate::types::{Reply, ReplyCode};

/// Parses an SMTP reply from its wire lines.
///
/// Replies are one or more lines, all carrying the same three-digit code:
/// continuation lines use `250-...`, the final line uses `250 ...`.
///
/// # Errors
///
/// Returns an error if the reply is empty or malformed.
pub fn parse_reply(lines: &[String]) -> Result<Reply> {
    let Some(first) = lines.first() else {
        return Err(Error::Protocol("Empty reply".into()));
    };

    let code = first
        .get(..3)
        .and_then(|digits| digits.parse::<u16>().ok())
        .ok_or_else(|| Error::Protocol(format!("Invalid reply code: {first}")))?;

    let mut message = Vec::with_capacity(lines.len());
    for line in lines {
        match line.len() {
            // Bare code with no text.
            3 => message.push(String::new()),
            n if n >= 4 => message.push(line[4..].to_string()),
            _ => return Err(Error::Protocol(format!("Malformed reply line: {line}"))),
        }
    }

    Ok(Reply::new(ReplyCode::new(code), message))
}

/// Returns true for the final line of a (possibly multi-line) reply.
///
/// Continuation lines separate code and text with `-`; the last line uses a
/// space.
#[must_use]
pub fn is_last_reply_line(line: &str) -> bool {
    line.len() == 3 || (line.len() >= 4 && line.as_bytes()[3] == b' ')
}

//! MIME encoding and decoding utilities.
//!
//! Supports line-wrapped Base64 body encoding (RFC 2045) and Q-encoded
//! header words (RFC 2047).

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write as _;

/// Maximum encoded line length for body parts (RFC 2045 section 6.8).
pub const WRAP_WIDTH: usize = 76;

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Encodes data as Base64 with a `\r\n` after every [`WRAP_WIDTH`] encoded
/// characters, including after the final short chunk.
///
/// Empty input produces the empty string: zero chunks, zero terminators.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + 2 * (encoded.len() / WRAP_WIDTH + 1));
    for chunk in encoded.as_bytes().chunks(WRAP_WIDTH) {
        // Base64 output is pure ASCII, so byte-wise assembly is safe.
        wrapped.extend(chunk.iter().map(|&b| b as char));
        wrapped.push_str("\r\n");
    }
    wrapped
}

/// Maximum length of one encoded word, delimiters included (RFC 2047
/// section 2).
const MAX_WORD_LENGTH: usize = 75;

/// Length of the `=?utf-8?Q?` prefix plus the `?=` suffix.
const WORD_OVERHEAD: usize = 12;

/// Returns true if a byte may appear verbatim inside a Q-encoded word.
const fn q_safe(byte: u8) -> bool {
    byte.is_ascii_graphic() && !matches!(byte, b'=' | b'?' | b'_')
}

/// Encodes a header value as RFC 2047 Q-encoded words when needed.
///
/// Values consisting entirely of printable ASCII pass through unchanged.
/// Anything else becomes `=?utf-8?Q?...?=` words with spaces as `_` and
/// unsafe bytes as `=XX`. A word never exceeds [`MAX_WORD_LENGTH`]
/// characters; longer values split into several space-separated words, and
/// the split never falls inside one character's escape sequence.
#[must_use]
pub fn encode_header_q(text: &str) -> String {
    if text.bytes().all(|b| matches!(b, b' '..=b'~')) {
        return text.to_string();
    }

    let mut words: Vec<String> = Vec::new();
    let mut payload = String::new();
    for ch in text.chars() {
        let mut piece = String::new();
        if ch == ' ' {
            piece.push('_');
        } else if ch.is_ascii() && q_safe(ch as u8) {
            piece.push(ch);
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).bytes() {
                let _ = write!(piece, "={byte:02X}");
            }
        }

        if !payload.is_empty() && payload.len() + piece.len() > MAX_WORD_LENGTH - WORD_OVERHEAD {
            words.push(format!("=?utf-8?Q?{payload}?="));
            payload.clear();
        }
        payload.push_str(&piece);
    }
    words.push(format!("=?utf-8?Q?{payload}?="));

    words.join(" ")
}

/// Decodes an RFC 2047 Q-encoded header value.
///
/// Input that is not an encoded word is returned unchanged. Whitespace
/// between adjacent encoded words is folded away, undoing the split that
/// [`encode_header_q`] performs on long values.
///
/// # Errors
///
/// Returns an error on a malformed word, an unsupported encoding, or an
/// invalid escape sequence.
pub fn decode_header_q(text: &str) -> Result<String> {
    if !(text.starts_with("=?") && text.ends_with("?=")) {
        return Ok(text.to_string());
    }

    let mut decoded = String::new();
    for word in text.split_ascii_whitespace() {
        decoded.push_str(&decode_word(word)?);
    }
    Ok(decoded)
}

fn decode_word(word: &str) -> Result<String> {
    let Some(inner) = word
        .strip_prefix("=?")
        .and_then(|rest| rest.strip_suffix("?="))
    else {
        return Err(Error::InvalidEncoding(
            "Malformed RFC 2047 word".to_string(),
        ));
    };

    let mut fields = inner.split('?');
    let (Some(_charset), Some(encoding), Some(payload), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::InvalidEncoding(
            "Malformed RFC 2047 word".to_string(),
        ));
    };

    if !encoding.eq_ignore_ascii_case("Q") {
        return Err(Error::InvalidEncoding(format!(
            "Unsupported header encoding: {encoding}"
        )));
    }

    let mut bytes = Vec::with_capacity(payload.len());
    let mut rest = payload.bytes();
    while let Some(byte) = rest.next() {
        match byte {
            b'_' => bytes.push(b' '),
            b'=' => {
                let hex: Vec<u8> = rest.by_ref().take(2).collect();
                if hex.len() != 2 {
                    return Err(Error::InvalidEncoding(
                        "Incomplete escape sequence".to_string(),
                    ));
                }
                let hex = String::from_utf8(hex)?;
                let value = u8::from_str_radix(&hex, 16)
                    .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
                bytes.push(value);
            }
            _ => bytes.push(byte),
        }
    }

    String::from_utf8(bytes).map_err(Into::into)
}

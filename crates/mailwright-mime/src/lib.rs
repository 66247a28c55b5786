//! # mailwright-mime
//!
//! MIME message generation for dual-format notification email.
//!
//! The crate produces `multipart/alternative` messages carrying a plain-text
//! part and an HTML part, with Base64 content-transfer-encoding wrapped at the
//! RFC 2045 line limit and RFC 2047 Q-encoded headers for non-ASCII subjects.
//!
//! ## Quick Start
//!
//! ```
//! use mailwright_mime::AlternativeMessage;
//!
//! let wire = AlternativeMessage::new(
//!     "Example <noreply@example.com>",
//!     "user@example.com",
//!     "Welcome",
//!     "Hello!",
//!     "<p>Hello!</p>",
//! )
//! .to_wire();
//!
//! assert!(wire.starts_with(b"From: Example <noreply@example.com>\r\n"));
//! ```
//!
//! ## Encoding utilities
//!
//! ```
//! use mailwright_mime::encoding::encode_base64_wrapped;
//!
//! assert_eq!(encode_base64_wrapped(b"Hi"), "SGk=\r\n");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod error;
mod message;

pub mod encoding;

pub use error::{Error, Result};
pub use message::{AlternativeMessage, BOUNDARY};

// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Message Body Extractor
//!
//! Turns one raw RFC822 message into a display-ready body and a list of
//! attachment descriptors.
//!
//! # Features
//!
//! - Single-part `text/plain` and `text/html`
//! - One level of `multipart/alternative` (HTML preferred)
//! - One level of `multipart/mixed` with flat attachment parts
//! - Explicit transfer encoding on every attachment
//! - Envelope summary (`From`, `Subject`, `Date`)
//!
//! # Example
//!
//! ```rust
//! use mail_body_extract::extract;
//!
//! let raw = "Subject: Hello\r\nContent-Type: text/html\r\n\r\n<html><body>Hi</body></html>";
//! let result = extract(raw).unwrap();
//!
//! assert_eq!(result.body, "Hi");
//! assert!(result.attachments.is_empty());
//! ```

mod config;
mod error;
mod extractor;
mod headers;
mod mime;
mod multipart;
mod types;

pub use config::{BodyPolicy, ExtractOptions};
pub use error::{ParseError, Result};
pub use extractor::{Extractor, extract, extract_or_default};
pub use headers::{
    ContentFamily, ContentType, DEFAULT_CONTENT_TYPE, Envelope, HEADER_SEPARATOR, HeaderBlock,
    split_message,
};
pub use mime::{OCTET_STREAM, mime_type_from_filename};
pub use multipart::{Part, UNKNOWN_FILENAME, split_parts};
pub use types::*;

//! Core types for extracted message bodies

use crate::error::{ParseError, Result};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display body and attachments recovered from one raw message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// HTML fragment from a `<body>` element, or plain text
    pub body: String,

    /// Attachment parts in message order
    pub attachments: Vec<Attachment>,
}

impl ExtractionResult {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    /// Check if neither a body nor attachments were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.attachments.is_empty()
    }

    /// Serialize for the mail view
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// An attachment part of a `multipart/mixed` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Filename from the part headers, or `"unknown"`
    pub name: String,

    /// Trimmed part body, still in its transfer encoding
    pub data: String,

    /// Declared or guessed mime type
    pub mime_type: String,

    /// How `data` is encoded
    pub transfer_encoding: TransferEncoding,
}

impl Attachment {
    /// Decode `data` into raw bytes according to its transfer encoding.
    ///
    /// Quoted-printable was already decoded when the message was fetched, so
    /// only base64 needs work here.
    pub fn decode(&self) -> Result<Vec<u8>> {
        match self.transfer_encoding {
            TransferEncoding::Base64 => {
                let compact: String = self
                    .data
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                BASE64
                    .decode(compact)
                    .map_err(|e| ParseError::Decode(format!("{}: {e}", self.name)))
            }
            TransferEncoding::QuotedPrintable | TransferEncoding::Identity => {
                Ok(self.data.as_bytes().to_vec())
            }
        }
    }
}

/// Content-Transfer-Encoding of a part
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferEncoding {
    Base64,
    QuotedPrintable,
    /// 7bit, 8bit, binary, or no header at all
    #[default]
    Identity,
}

impl TransferEncoding {
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("base64") => Self::Base64,
            Some("quoted-printable") => Self::QuotedPrintable,
            _ => Self::Identity,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::QuotedPrintable => "quoted-printable",
            Self::Identity => "identity",
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

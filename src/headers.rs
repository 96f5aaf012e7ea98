//! Header block parsing for messages and their parts

use crate::error::{ParseError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

/// Separator between a message's header block and its body
pub const HEADER_SEPARATOR: &str = "\r\n\r\n";

/// Content type used when no `Content-Type` header is present
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

// Fallback for parameters mailparse does not pick up, e.g. `boundary = "x"`
static BOUNDARY_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"(?i)boundary\s*=\s*(?:"([^"]+)"|([^;\s"]+))"#).unwrap()
});

/// Split a raw message at the first `\r\n\r\n` into header block and body
pub fn split_message(raw: &str) -> Result<(&str, &str)> {
    raw.find(HEADER_SEPARATOR)
        .map(|idx| (&raw[..idx], &raw[idx + HEADER_SEPARATOR.len()..]))
        .ok_or(ParseError::MissingSeparator)
}

/// An ordered list of unfolded `Name: value` headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    entries: Vec<(String, String)>,
}

impl HeaderBlock {
    /// Parse a header block, skipping lines that are not headers
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut block = Self::default();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            if is_continuation(line) {
                if let Some(idx) = current {
                    block.push_continuation(idx, line);
                }
                continue;
            }

            current = split_header_line(line).map(|(name, value)| {
                block.entries.push((name.to_string(), value.to_string()));
                block.entries.len() - 1
            });
        }

        block
    }

    /// Read headers from the start of `lines` up to the blank line.
    ///
    /// Returns the block and the index of the first body line. A leading
    /// line that is neither a header nor blank ends the block early, so a
    /// part without headers yields an empty block and its whole text as body.
    #[must_use]
    pub fn read(lines: &[&str]) -> (Self, usize) {
        let mut block = Self::default();

        for (idx, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                return (block, idx + 1);
            }

            if is_continuation(line) && !block.entries.is_empty() {
                block.push_continuation(block.entries.len() - 1, line);
                continue;
            }

            match split_header_line(line) {
                Some((name, value)) => block.entries.push((name.to_string(), value.to_string())),
                None => {
                    trace!("Header block ended early at line {idx}");
                    return (block, idx);
                }
            }
        }

        (block, lines.len())
    }

    fn push_continuation(&mut self, idx: usize, line: &str) {
        let value = &mut self.entries[idx].1;
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(line.trim());
    }

    /// First value of a header, matched case-insensitively
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parsed `Content-Type`, defaulting to `text/plain`
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.get("content-type")
            .map_or_else(ContentType::default, ContentType::parse)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_continuation(line: &str) -> bool {
    line.starts_with(' ') || line.starts_with('\t')
}

fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let valid_name = !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic());
    valid_name.then(|| (name, value.trim()))
}

/// Recognized content type families, checked in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentFamily {
    MultipartMixed,
    MultipartAlternative,
    Html,
    PlainText,
    Other,
}

/// A `Content-Type` value: lowercased mime type plus parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    pub mime_type: String,
    pub params: BTreeMap<String, String>,
    raw: String,
}

impl Default for ContentType {
    fn default() -> Self {
        Self {
            mime_type: DEFAULT_CONTENT_TYPE.to_string(),
            params: BTreeMap::new(),
            raw: String::new(),
        }
    }
}

impl ContentType {
    /// Parse a header value such as `multipart/mixed; boundary="b1"`
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let parsed = mailparse::parse_content_type(value);
        let mime_type = parsed.mimetype.trim().to_lowercase();

        Self {
            mime_type: if mime_type.is_empty() {
                DEFAULT_CONTENT_TYPE.to_string()
            } else {
                mime_type
            },
            params: parsed.params,
            raw: value.to_string(),
        }
    }

    /// Family used to pick the extraction strategy
    #[must_use]
    pub fn family(&self) -> ContentFamily {
        let mime = self.mime_type.as_str();
        if mime.contains("multipart/mixed") {
            ContentFamily::MultipartMixed
        } else if mime.contains("multipart/alternative") {
            ContentFamily::MultipartAlternative
        } else if mime.contains("text/html") {
            ContentFamily::Html
        } else if mime.contains("text/plain") {
            ContentFamily::PlainText
        } else {
            ContentFamily::Other
        }
    }

    /// A parameter by name, case-insensitive
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty())
    }

    /// The multipart boundary token, quoted or not
    #[must_use]
    pub fn boundary(&self) -> Option<String> {
        let declared = self
            .param("boundary")
            .map(|b| b.trim().trim_matches('"'))
            .filter(|b| !b.is_empty());
        if let Some(boundary) = declared {
            return Some(boundary.to_string());
        }

        BOUNDARY_REGEX.captures(&self.raw).and_then(|caps| {
            caps.get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str().to_string())
        })
    }
}

/// The summary headers the mail listing shows for each message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub from: Option<String>,
    pub subject: Option<String>,
    pub date: Option<String>,

    /// `date` parsed as RFC 2822, when valid
    pub sent_at: Option<DateTime<Utc>>,
}

impl Envelope {
    /// Read `From`, `Subject` and `Date` from a raw message.
    ///
    /// Repeated headers keep their first value. Without a header/body
    /// separator the whole text is read as headers.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let header_text = split_message(raw).map_or(raw, |(headers, _)| headers);
        let headers = HeaderBlock::parse(header_text);

        let from = decoded(&headers, "From");
        let subject = decoded(&headers, "Subject");
        let date = headers.get("date").map(str::to_string);
        let sent_at = date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Self {
            from,
            subject,
            date,
            sent_at,
        }
    }
}

// Decodes RFC 2047 encoded words, keeping the raw value if mailparse rejects it
fn decoded(headers: &HeaderBlock, name: &str) -> Option<String> {
    let value = headers.get(name)?;
    let line = format!("{name}: {value}");
    Some(
        mailparse::parse_header(line.as_bytes())
            .map_or_else(|_| value.to_string(), |(header, _)| header.get_value()),
    )
}

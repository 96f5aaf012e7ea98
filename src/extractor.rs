//! Display body extraction from raw messages

use crate::config::{BodyPolicy, ExtractOptions};
use crate::error::{ParseError, Result};
use crate::headers::{ContentFamily, ContentType, HeaderBlock, split_message};
use crate::multipart::{Part, split_parts};
use crate::types::ExtractionResult;
use regex::Regex;
use tracing::{debug, warn};

static BODY_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*?)</body>").unwrap());

/// Extract the display body and attachments using default options
pub fn extract(raw: &str) -> Result<ExtractionResult> {
    Extractor::default().extract(raw)
}

/// Like [`extract`], but logs failures and returns an empty result
#[must_use]
pub fn extract_or_default(raw: &str) -> ExtractionResult {
    Extractor::default().extract_or_default(raw)
}

/// Message body extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    #[must_use]
    pub const fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> ExtractOptions {
        self.options
    }

    /// Extract the display body and attachments from one raw message.
    ///
    /// The input is a header block, `\r\n\r\n`, then the body, with
    /// quoted-printable already decoded. Only one multipart level is read.
    pub fn extract(&self, raw: &str) -> Result<ExtractionResult> {
        let (header_text, body) = split_message(raw).inspect_err(|_| {
            warn!("No header/body separator in {} byte message", raw.len());
        })?;

        let content_type = HeaderBlock::parse(header_text).content_type();
        debug!("Extracting {} message body", content_type.mime_type);

        match content_type.family() {
            ContentFamily::MultipartMixed => self.extract_mixed(body, &content_type),
            ContentFamily::MultipartAlternative => extract_alternative(body, &content_type),
            ContentFamily::Html => Ok(ExtractionResult::new(html_body(body))),
            ContentFamily::PlainText | ContentFamily::Other => {
                Ok(ExtractionResult::new(body.trim()))
            }
        }
    }

    #[must_use]
    pub fn extract_or_default(&self, raw: &str) -> ExtractionResult {
        self.extract(raw).unwrap_or_else(|e| {
            warn!("Falling back to empty body: {e}");
            ExtractionResult::default()
        })
    }

    fn extract_mixed(&self, body: &str, content_type: &ContentType) -> Result<ExtractionResult> {
        let boundary = require_boundary(content_type)?;

        let mut attachments = Vec::new();
        let mut candidates = Vec::new();

        for part in split_parts(body, &boundary) {
            if part.is_attachment() {
                attachments.push(part.to_attachment());
                continue;
            }

            match TextCandidate::from_part(&part) {
                Some(candidate) => candidates.push(candidate),
                None => debug!("Skipping {} part", part.content_type().mime_type),
            }
        }

        let chosen = match self.options.mixed_body_policy {
            BodyPolicy::LastWins => candidates.pop(),
            BodyPolicy::PreferHtml => prefer_html(candidates),
        };

        debug!(
            "multipart/mixed: {} attachment(s), body found: {}",
            attachments.len(),
            chosen.is_some()
        );

        Ok(ExtractionResult {
            body: chosen.map(TextCandidate::into_text).unwrap_or_default(),
            attachments,
        })
    }
}

fn extract_alternative(body: &str, content_type: &ContentType) -> Result<ExtractionResult> {
    let boundary = require_boundary(content_type)?;
    let parts = split_parts(body, &boundary);

    let candidates: Vec<TextCandidate> =
        parts.iter().filter_map(TextCandidate::from_part).collect();
    let text = prefer_html(candidates).map_or_else(
        || {
            debug!("multipart/alternative without text parts, using first part");
            parts
                .first()
                .map(|part| part.body().to_string())
                .unwrap_or_default()
        },
        TextCandidate::into_text,
    );

    Ok(ExtractionResult::new(text))
}

fn require_boundary(content_type: &ContentType) -> Result<String> {
    content_type.boundary().ok_or_else(|| {
        warn!("{} without boundary", content_type.mime_type);
        ParseError::MissingBoundary {
            content_type: content_type.mime_type.clone(),
        }
    })
}

/// Inner content of the first `<body>` element, or the whole text
fn html_body(html: &str) -> String {
    BODY_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str())
        .trim()
        .to_string()
}

enum TextCandidate {
    Html(String),
    Plain(String),
}

impl TextCandidate {
    fn from_part(part: &Part) -> Option<Self> {
        match part.content_type().family() {
            ContentFamily::Html => Some(Self::Html(html_body(part.body()))),
            ContentFamily::PlainText => Some(Self::Plain(part.body().to_string())),
            _ => None,
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Html(text) | Self::Plain(text) => text,
        }
    }
}

fn prefer_html(candidates: Vec<TextCandidate>) -> Option<TextCandidate> {
    let mut first_plain = None;
    for candidate in candidates {
        match candidate {
            TextCandidate::Html(_) => return Some(candidate),
            TextCandidate::Plain(_) if first_plain.is_none() => first_plain = Some(candidate),
            TextCandidate::Plain(_) => {}
        }
    }
    first_plain
}

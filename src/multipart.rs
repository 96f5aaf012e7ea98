//! One-level multipart splitting

use crate::headers::{ContentType, HeaderBlock};
use crate::mime::mime_type_from_filename;
use crate::types::{Attachment, TransferEncoding};
use mailparse::{DispositionType, ParsedContentDisposition};
use tracing::trace;

/// Name used for attachments without a filename
pub const UNKNOWN_FILENAME: &str = "unknown";

/// A single part of a multipart body with its own header block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    headers: HeaderBlock,
    body: String,
}

impl Part {
    fn from_text(text: &str) -> Self {
        let raw_lines: Vec<&str> = text.split_inclusive('\n').collect();
        let lines: Vec<&str> = raw_lines
            .iter()
            .map(|line| line.trim_end_matches(['\r', '\n']))
            .collect();

        let (headers, body_start) = HeaderBlock::read(&lines);
        let offset: usize = raw_lines[..body_start].iter().map(|line| line.len()).sum();

        Self {
            headers,
            body: text[offset..].to_string(),
        }
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderBlock {
        &self.headers
    }

    /// Trimmed part body
    #[must_use]
    pub fn body(&self) -> &str {
        self.body.trim()
    }

    /// Declared content type; parts without one are `text/plain`
    #[must_use]
    pub fn content_type(&self) -> ContentType {
        self.headers.content_type()
    }

    fn disposition(&self) -> Option<ParsedContentDisposition> {
        self.headers
            .get("content-disposition")
            .map(mailparse::parse_content_disposition)
    }

    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.disposition()
            .is_some_and(|d| matches!(d.disposition, DispositionType::Attachment))
    }

    /// `filename` from Content-Disposition, else `name` from Content-Type
    #[must_use]
    pub fn filename(&self) -> Option<String> {
        let from_disposition = self.disposition().and_then(|d| {
            d.params
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("filename"))
                .map(|(_, value)| value)
        });

        from_disposition
            .or_else(|| self.content_type().param("name").map(str::to_string))
            .filter(|name| !name.trim().is_empty())
    }

    #[must_use]
    pub fn transfer_encoding(&self) -> TransferEncoding {
        TransferEncoding::from_header(self.headers.get("content-transfer-encoding"))
    }

    /// Describe this part as an attachment
    #[must_use]
    pub fn to_attachment(&self) -> Attachment {
        let name = self
            .filename()
            .unwrap_or_else(|| UNKNOWN_FILENAME.to_string());
        // An empty Content-Type counts as missing
        let declared = self
            .headers
            .get("content-type")
            .filter(|value| !value.split(';').next().unwrap_or_default().trim().is_empty());
        let mime_type = declared.map_or_else(
            || mime_type_from_filename(&name).to_string(),
            |value| ContentType::parse(value).mime_type,
        );

        Attachment {
            data: self.body().to_string(),
            transfer_encoding: self.transfer_encoding(),
            mime_type,
            name,
        }
    }
}

/// Split a multipart body on `--boundary` delimiter lines.
///
/// Each part is a slice of `body`, so line endings are kept as sent.
/// The preamble before the first delimiter and anything after the closing
/// `--boundary--` line are dropped, as are blank parts. A body that never
/// closes keeps its last part.
#[must_use]
pub fn split_parts(body: &str, boundary: &str) -> Vec<Part> {
    let delimiter = format!("--{boundary}");
    let closing = format!("{delimiter}--");

    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let marker = line.trim_end();

        if marker == delimiter {
            if let Some(part_start) = start.take() {
                push_part(&mut parts, &body[part_start..line_start]);
            }
            start = Some(offset);
        } else if marker == closing {
            if let Some(part_start) = start.take() {
                push_part(&mut parts, &body[part_start..line_start]);
            }
            break;
        }
    }

    if let Some(part_start) = start {
        trace!("Multipart body ended without closing delimiter");
        push_part(&mut parts, &body[part_start..]);
    }

    parts
}

fn push_part(parts: &mut Vec<Part>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    parts.push(Part::from_text(text));
}

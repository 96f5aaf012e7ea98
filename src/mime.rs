//! Mime type lookup by file extension

/// Mime type used when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Guess a mime type from a filename's extension, case-insensitively.
///
/// Only a small fixed table is recognized; anything else, including names
/// without an extension, maps to `application/octet-stream`.
#[must_use]
pub fn mime_type_from_filename(filename: &str) -> &'static str {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return OCTET_STREAM;
    };

    match extension.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        _ => OCTET_STREAM,
    }
}

use chrono::Datelike;
use mail_body_extract::*;

// --- split_message ---

#[test]
fn test_split_message() {
    let (headers, body) = split_message("Subject: Hi\r\n\r\nBody\r\n\r\nMore").unwrap();
    assert_eq!(headers, "Subject: Hi");
    assert_eq!(body, "Body\r\n\r\nMore");
}

#[test]
fn test_split_message_empty_header_block() {
    let (headers, body) = split_message("\r\n\r\nonly body").unwrap();
    assert_eq!(headers, "");
    assert_eq!(body, "only body");
}

#[test]
fn test_split_message_requires_crlf_separator() {
    assert_eq!(
        split_message("Subject: Hi\n\nBody"),
        Err(ParseError::MissingSeparator)
    );
}

// --- HeaderBlock ---

#[test]
fn test_header_block_first_value_wins() {
    let block = HeaderBlock::parse("Received: one\r\nreceived: two\r\nSubject: s");
    assert_eq!(block.len(), 3);
    assert_eq!(block.get("RECEIVED"), Some("one"));
    assert_eq!(block.get("subject"), Some("s"));
    assert_eq!(block.get("to"), None);
}

#[test]
fn test_header_block_unfolds_continuations() {
    let block = HeaderBlock::parse("Subject: a long\r\n  subject line\r\nTo: x@example.com");
    assert_eq!(block.get("subject"), Some("a long subject line"));
    assert_eq!(block.get("to"), Some("x@example.com"));
}

#[test]
fn test_header_block_skips_non_header_lines() {
    let block = HeaderBlock::parse("Hello\r\nSubject: kept");
    assert_eq!(block.len(), 1);
    assert_eq!(
        block.iter().collect::<Vec<_>>(),
        vec![("Subject", "kept")]
    );
}

#[test]
fn test_header_block_read_stops_at_blank_line() {
    let lines = ["Content-Type: text/plain", "", "Body: not a header"];
    let (block, body_start) = HeaderBlock::read(&lines);
    assert_eq!(block.len(), 1);
    assert_eq!(body_start, 2);
}

#[test]
fn test_header_block_read_without_headers() {
    let lines = ["just some text", "more text"];
    let (block, body_start) = HeaderBlock::read(&lines);
    assert!(block.is_empty());
    assert_eq!(body_start, 0);

    let lines = ["", "text after blank"];
    let (block, body_start) = HeaderBlock::read(&lines);
    assert!(block.is_empty());
    assert_eq!(body_start, 1);
}

// --- ContentType ---

#[test]
fn test_content_type_default() {
    let block = HeaderBlock::parse("Subject: none");
    let ct = block.content_type();
    assert_eq!(ct.mime_type, DEFAULT_CONTENT_TYPE);
    assert_eq!(ct.family(), ContentFamily::PlainText);
    assert_eq!(ct.boundary(), None);
}

#[test]
fn test_content_type_is_lowercased() {
    let ct = ContentType::parse("Multipart/Mixed; boundary=\"Ab-12\"");
    assert_eq!(ct.mime_type, "multipart/mixed");
    assert_eq!(ct.boundary().as_deref(), Some("Ab-12"));
}

#[test]
fn test_content_type_families() {
    let cases = [
        ("multipart/mixed", ContentFamily::MultipartMixed),
        ("multipart/alternative", ContentFamily::MultipartAlternative),
        ("text/html", ContentFamily::Html),
        ("text/plain", ContentFamily::PlainText),
        ("multipart/related", ContentFamily::Other),
        ("image/png", ContentFamily::Other),
    ];

    for (value, expected) in cases {
        assert_eq!(ContentType::parse(value).family(), expected, "{value}");
    }
}

#[test]
fn test_boundary_unquoted() {
    let ct = ContentType::parse("multipart/alternative; boundary=simple; charset=utf-8");
    assert_eq!(ct.boundary().as_deref(), Some("simple"));
}

#[test]
fn test_boundary_with_spaces_around_equals() {
    let ct = ContentType::parse("multipart/mixed; boundary = \"spaced\"");
    assert_eq!(ct.boundary().as_deref(), Some("spaced"));
}

#[test]
fn test_content_type_param() {
    let ct = ContentType::parse("image/png; name=\"chart.png\"");
    assert_eq!(ct.param("NAME"), Some("chart.png"));
    assert_eq!(ct.param("missing"), None);
}

// --- Envelope ---

#[test]
fn test_envelope_first_values() {
    let raw = "From: first@example.com\r\n\
               From: second@example.com\r\n\
               Subject: Status\r\n\
               Date: Thu, 02 Jan 2025 12:00:00 +0000\r\n\
               \r\n\
               body";

    let envelope = Envelope::from_raw(raw);
    assert_eq!(envelope.from.as_deref(), Some("first@example.com"));
    assert_eq!(envelope.subject.as_deref(), Some("Status"));
    assert_eq!(
        envelope.date.as_deref(),
        Some("Thu, 02 Jan 2025 12:00:00 +0000")
    );

    let sent_at = envelope.sent_at.unwrap();
    assert_eq!(sent_at.year(), 2025);
    assert_eq!(sent_at.day(), 2);
}

#[test]
fn test_envelope_decodes_encoded_words() {
    let raw = "Subject: =?UTF-8?B?SGVsbG8=?=\r\n\r\nbody";
    let envelope = Envelope::from_raw(raw);
    assert_eq!(envelope.subject.as_deref(), Some("Hello"));
}

#[test]
fn test_envelope_invalid_date() {
    let raw = "Date: yesterday\r\n\r\nbody";
    let envelope = Envelope::from_raw(raw);
    assert_eq!(envelope.date.as_deref(), Some("yesterday"));
    assert!(envelope.sent_at.is_none());
    assert!(envelope.from.is_none());
}

#[test]
fn test_envelope_without_separator() {
    let envelope = Envelope::from_raw("From: a@example.com\r\nSubject: s");
    assert_eq!(envelope.from.as_deref(), Some("a@example.com"));
    assert_eq!(envelope.subject.as_deref(), Some("s"));
}

#[test]
fn test_envelope_ignores_body_headers() {
    let envelope = Envelope::from_raw("Subject: top\r\n\r\nFrom: quoted@example.com");
    assert!(envelope.from.is_none());
}

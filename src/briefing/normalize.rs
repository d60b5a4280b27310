// * Briefing Payload Normalization
// * Maps loosely-shaped newsletter entries onto NewsletterRecord using
// * ordered key fallbacks. Unknown shapes are dropped, never rejected.

use crate::digest::NewsletterRecord;
use serde_json::{Map, Value};

// * Keys tried in order; the first non-null value wins
pub const ENVELOPE_STORED_AT_KEYS: &[&str] = &["storedAt", "stored_at"];
pub const SECTION_KEYS: &[&str] = &[
    "newsletters",
    "newsletterDigest",
    "newsletter_digest",
    "newsletterHighlights",
    "newsletter_highlights",
];
const SUBJECT_KEYS: &[&str] = &["subject", "title", "headline", "name"];
const SENDER_KEYS: &[&str] = &["sender", "from", "author", "source"];
const SUMMARY_KEYS: &[&str] = &["summary", "snippet", "blurb", "description", "abstract"];
const BODY_KEYS: &[&str] = &[
    "body",
    "text",
    "plainText",
    "plain_text",
    "content",
    "emailBody",
    "email_body",
    "message",
    "html",
];
const URL_KEYS: &[&str] = &["url", "gmailUrl", "gmail_url", "link"];
const RECEIVED_AT_KEYS: &[&str] = &["receivedAt", "received_at", "date", "when"];

const NO_SUBJECT: &str = "(no subject)";
const UNKNOWN_SENDER: &str = "Unknown sender";

/// First non-null value among the keys
fn first_present<'v>(obj: &'v Map<String, Value>, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// A string, or an all-string array joined with spaces
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<_>>>()
            .map(|parts| parts.join(" ")),
        _ => None,
    }
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    first_present(obj, keys).and_then(as_text)
}

/// Unwraps the `{ storedAt, data }` envelope when present
pub fn briefing_payload(doc: &Value) -> &Value {
    match doc.as_object() {
        Some(obj)
            if obj.contains_key("data")
                && ENVELOPE_STORED_AT_KEYS.iter().any(|k| obj.contains_key(*k)) =>
        {
            &obj["data"]
        }
        _ => doc,
    }
}

/// Locates the newsletter section of a payload, if it has one
pub fn newsletter_section(payload: &Value) -> Option<&Value> {
    payload
        .as_object()
        .and_then(|obj| first_present(obj, SECTION_KEYS))
}

/// Converts one entry; bare strings become subject-only records
pub fn newsletter_from_value(item: &Value) -> Option<NewsletterRecord> {
    match item {
        Value::String(subject) => Some(NewsletterRecord::new(subject.clone())),
        Value::Object(obj) => Some(NewsletterRecord {
            subject: text_field(obj, SUBJECT_KEYS).unwrap_or_else(|| NO_SUBJECT.to_string()),
            sender: text_field(obj, SENDER_KEYS),
            summary: text_field(obj, SUMMARY_KEYS),
            body: text_field(obj, BODY_KEYS),
            url: text_field(obj, URL_KEYS),
            received_at: text_field(obj, RECEIVED_AT_KEYS),
        }),
        _ => None,
    }
}

/// Extracts newsletter records from a briefing document
///
/// Accepts the stored envelope or a bare payload. The section may be an array
/// or an object with an `items` array; anything else yields no records.
pub fn newsletters_from_briefing(doc: &Value) -> Vec<NewsletterRecord> {
    let Some(section) = newsletter_section(briefing_payload(doc)) else {
        return Vec::new();
    };

    let items = match section {
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match obj.get("items") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    items.iter().filter_map(newsletter_from_value).collect()
}

/// Display name of a sender such as `"Morning Brew <crew@morningbrew.com>"`
pub fn short_sender(sender: Option<&str>) -> String {
    let Some(sender) = sender else {
        return UNKNOWN_SENDER.to_string();
    };
    let name = sender.split('<').next().unwrap_or_default().trim();
    if name.is_empty() {
        sender.to_string()
    } else {
        name.to_string()
    }
}

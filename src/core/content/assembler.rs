//! Document assembly from the per-file extraction results.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::core::types::{Document, ParsedContent};

/// Compose one `Document`
///
/// `run_started_at` stands in for `pubDate` when `published` is absent
/// or unparseable. A missing `title` stays `None`.
pub fn assemble(
    id: usize,
    parsed: &ParsedContent,
    slug: String,
    content: String,
    run_started_at: DateTime<Utc>,
) -> Document {
    let pub_date = match parsed.metadata.get("published") {
        None | Some(Value::Null) => run_started_at.timestamp_millis(),
        Some(value) => parse_published(value).unwrap_or_else(|| {
            tracing::warn!(
                "Unparseable published value {} for {}, using run time",
                value,
                slug
            );
            run_started_at.timestamp_millis()
        }),
    };

    Document {
        id,
        title: parsed.field("title"),
        description: parsed.field("description").unwrap_or_default(),
        slug,
        content,
        pub_date,
    }
}

/// Parse a `published` value into epoch milliseconds
///
/// Accepts RFC 3339 datetimes, `YYYY-MM-DD` (midnight UTC),
/// `YYYY-MM-DD HH:MM[:SS]` / `YYYY-MM-DDTHH:MM[:SS]` (UTC), and
/// integer epoch milliseconds.
pub fn parse_published(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_date_string(s.trim()),
        _ => None,
    }
}

fn parse_date_string(s: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

//! Wire-format helpers shared by the record decoders

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};
use url::Url;

/// Deserialize a `0`/`1` flag that some mirrors send as a JSON boolean
pub(crate) fn deserialize_flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Int(i64),
        Bool(bool),
    }

    Ok(match Option::<IntOrBool>::deserialize(deserializer)? {
        Some(IntOrBool::Int(i)) => u8::from(i != 0),
        Some(IntOrBool::Bool(b)) => u8::from(b),
        None => 0,
    })
}

pub(crate) fn flag_to_bool(flag: u8) -> bool {
    flag != 0
}

pub(crate) fn bool_to_flag(value: bool) -> u8 {
    u8::from(value)
}

/// Parse an ISO-8601 timestamp, falling back to `now`
///
/// Upstream data is crowd-sourced and timestamps are sometimes missing or
/// garbled; the record is kept and the timestamp reads as `now`.
pub(crate) fn parse_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(now)
}

/// `2021-10-22T22:09:29Z`
pub(crate) fn format_iso8601(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// `2021-10-22 22:09:29`, the legacy non-ISO form sent next to the ISO one
pub(crate) fn format_legacy(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Parse an optional URL; empty or invalid strings yield `None`
pub(crate) fn optional_url(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw).ok()
}

pub(crate) fn url_to_wire(url: &Option<Url>) -> String {
    url.as_ref().map(|u| u.to_string()).unwrap_or_default()
}

//! Radio station record
//!
//! ```json
//! {
//!     "changeuuid": "17142cad-4faf-11e9-a4d7-52543be04c81",
//!     "stationuuid": "17142ca0-4faf-11e9-a4d7-52543be04c81",
//!     "serveruuid": "cab9cde6-4922-475a-bdb4-ff681d25b2c6",
//!     "name": "CITY23",
//!     "url": "http://live.radiomax.technology/city23",
//!     "url_resolved": "http://live.radiomax.technology/city23",
//!     "homepage": "http://city23.at/",
//!     "favicon": "http://city23.at/img/Logo_BCL.png",
//!     "tags": "dab+,easy listening",
//!     "country": "Austria",
//!     "countrycode": "AT",
//!     "iso_3166_2": null,
//!     "state": "Vienna",
//!     "language": "german",
//!     "languagecodes": "de",
//!     "votes": 25,
//!     "lastchangetime_iso8601": "2021-08-06T08:36:44Z",
//!     "codec": "MP3",
//!     "bitrate": 192,
//!     "hls": 0,
//!     "lastcheckok": 1,
//!     "lastchecktime_iso8601": "2021-10-22T22:09:29Z",
//!     "lastcheckoktime_iso8601": "2021-10-22T22:09:29Z",
//!     "lastlocalchecktime_iso8601": "2021-10-22T22:09:29Z",
//!     "clicktimestamp_iso8601": "2021-10-23T09:23:27Z",
//!     "clickcount": 4,
//!     "clicktrend": 3,
//!     "ssl_error": 0,
//!     "geo_lat": null,
//!     "geo_long": null,
//!     "has_extended_info": false
//! }
//! ```

use super::wire::{
    bool_to_flag, deserialize_flag, flag_to_bool, format_iso8601, format_legacy, optional_url,
    parse_timestamp, url_to_wire,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;
use uuid::Uuid;

/// Name cleanups, applied in order, first match only.
///
/// Later patterns assume the earlier ones already stripped bitrate and
/// parenthesised suffixes.
const NAME_CLEANUPS: &[(&str, &str)] = &[
    (r"(.+) (\d{1,3}\.\d{1}) (\(.+\))", "${1}"),
    (r"(.+) (\(.+\))", "${1}"),
    (r"(.+) (\[.+\])", "${1}"),
    (r"(- 0 N -) (.+)", "${2}"),
    (r"(.+(on Radio ON))(.+)", "${1}"),
    (r"(RADIO (BOB!)) (BOBs (.+))", "${2} ${4}"),
    (r"(Radio|RADIO) (BOB!) (.+)", "${2} ${3}"),
    (r"(__(.+)__) (.+)", "${2}"),
];

static NAME_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    NAME_CLEANUPS
        .iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, *replacement)))
        .collect()
});

/// Strip bitrate suffixes, bracketed annotations and branding noise from a
/// crowd-sourced station name
pub fn clean_station_name(raw: &str) -> String {
    NAME_PATTERNS
        .iter()
        .fold(raw.to_string(), |name, (re, replacement)| {
            re.replacen(&name, 1, *replacement).into_owned()
        })
}

/// Geographic position of a station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// A radio station of the directory
///
/// Two stations are equal when they share the same `station_uuid`, whatever
/// their other attributes: a station updated server-side is still the same
/// station.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StationWire", into = "StationWire")]
pub struct Station {
    /// Identifier of the last change of this station's data
    pub change_uuid: Uuid,
    /// Stable identifier of the station
    pub station_uuid: Uuid,
    /// Mirror that recorded the station, when reported
    pub server_uuid: Option<Uuid>,
    /// Cleaned-up display name (see [`clean_station_name`])
    pub name: String,
    /// Stream URL as submitted
    pub stream_url: Url,
    /// Stream URL after playlist and redirect resolution
    ///
    /// Falls back to `stream_url` when the mirror did not resolve it.
    pub stream_url_resolved: Url,
    /// Homepage of the station
    pub website_url: Option<Url>,
    /// Icon or picture representing the station
    pub cover_url: Option<Url>,
    /// Comma-separated tags
    pub tags: String,
    pub country: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// ISO 3166-2 subdivision code
    pub iso_3166_2: Option<String>,
    pub state: String,
    /// Comma-separated spoken languages
    pub language: String,
    /// Comma-separated ISO 639 language codes
    pub language_codes: String,
    pub votes: i64,
    pub last_change_time: DateTime<Utc>,
    pub codec: String,
    /// Bitrate in kbps recorded at the last check
    pub bitrate: u32,
    pub hls: bool,
    /// Majority vote of the mirrors' last online checks
    pub last_check_ok: bool,
    pub last_check_time: DateTime<Utc>,
    pub last_check_ok_time: DateTime<Utc>,
    pub last_local_check_time: DateTime<Utc>,
    pub last_click_time: DateTime<Utc>,
    /// Clicks within the last 24 hours
    pub click_count: i64,
    /// Click difference over the last two days
    pub click_trend: i64,
    /// `true` when connecting over HTTPS failed
    pub ssl_error: bool,
    pub geo_location: Option<GeoLocation>,
    pub has_extended_info: Option<bool>,
}

impl Station {
    /// Stable identifier of the station
    pub fn id(&self) -> Uuid {
        self.station_uuid
    }

    /// Tags as a list, without blanks
    pub fn tag_list(&self) -> Vec<&str> {
        split_list(&self.tags)
    }

    /// Languages as a list, without blanks
    pub fn languages(&self) -> Vec<&str> {
        split_list(&self.language)
    }
}

fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

impl PartialEq for Station {
    fn eq(&self, other: &Self) -> bool {
        self.station_uuid == other.station_uuid
    }
}

impl Eq for Station {}

impl Hash for Station {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.station_uuid.hash(state);
    }
}

/// Station exactly as sent by the mirrors
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StationWire {
    #[serde(rename = "changeuuid")]
    change_uuid: Uuid,
    #[serde(rename = "stationuuid")]
    station_uuid: Uuid,
    #[serde(rename = "serveruuid", default)]
    server_uuid: Option<Uuid>,
    name: String,
    url: String,
    #[serde(default)]
    url_resolved: String,
    #[serde(default)]
    homepage: String,
    #[serde(default)]
    favicon: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    country: String,
    #[serde(rename = "countrycode", default)]
    country_code: String,
    #[serde(default)]
    iso_3166_2: Option<String>,
    #[serde(default)]
    state: String,
    #[serde(default)]
    language: String,
    #[serde(rename = "languagecodes", default)]
    language_codes: String,
    #[serde(default)]
    votes: i64,
    #[serde(rename = "lastchangetime", default)]
    last_change_time: Option<String>,
    #[serde(rename = "lastchangetime_iso8601", default)]
    last_change_time_iso8601: Option<String>,
    #[serde(default)]
    codec: String,
    #[serde(default)]
    bitrate: u32,
    #[serde(default, deserialize_with = "deserialize_flag")]
    hls: u8,
    #[serde(rename = "lastcheckok", default, deserialize_with = "deserialize_flag")]
    last_check_ok: u8,
    #[serde(rename = "lastchecktime", default)]
    last_check_time: Option<String>,
    #[serde(rename = "lastchecktime_iso8601", default)]
    last_check_time_iso8601: Option<String>,
    #[serde(rename = "lastcheckoktime", default)]
    last_check_ok_time: Option<String>,
    #[serde(rename = "lastcheckoktime_iso8601", default)]
    last_check_ok_time_iso8601: Option<String>,
    #[serde(rename = "lastlocalchecktime", default)]
    last_local_check_time: Option<String>,
    #[serde(rename = "lastlocalchecktime_iso8601", default)]
    last_local_check_time_iso8601: Option<String>,
    #[serde(rename = "clicktimestamp", default)]
    click_timestamp: Option<String>,
    #[serde(rename = "clicktimestamp_iso8601", default)]
    click_timestamp_iso8601: Option<String>,
    #[serde(rename = "clickcount", default)]
    click_count: i64,
    #[serde(rename = "clicktrend", default)]
    click_trend: i64,
    #[serde(default, deserialize_with = "deserialize_flag")]
    ssl_error: u8,
    #[serde(default)]
    geo_lat: Option<f64>,
    #[serde(default)]
    geo_long: Option<f64>,
    #[serde(default)]
    has_extended_info: Option<bool>,
}

impl TryFrom<StationWire> for Station {
    type Error = String;

    fn try_from(wire: StationWire) -> Result<Self, Self::Error> {
        let now = Utc::now();

        let stream_url = Url::parse(wire.url.trim())
            .map_err(|e| format!("invalid stream url '{}': {}", wire.url, e))?;
        let stream_url_resolved = optional_url(&wire.url_resolved).unwrap_or_else(|| stream_url.clone());

        let geo_location = match (wire.geo_lat, wire.geo_long) {
            (Some(latitude), Some(longitude)) => Some(GeoLocation { latitude, longitude }),
            _ => None,
        };

        Ok(Station {
            change_uuid: wire.change_uuid,
            station_uuid: wire.station_uuid,
            server_uuid: wire.server_uuid,
            name: clean_station_name(&wire.name),
            stream_url,
            stream_url_resolved,
            website_url: optional_url(&wire.homepage),
            cover_url: optional_url(&wire.favicon),
            tags: wire.tags,
            country: wire.country,
            country_code: wire.country_code,
            iso_3166_2: wire.iso_3166_2,
            state: wire.state,
            language: wire.language,
            language_codes: wire.language_codes,
            votes: wire.votes,
            last_change_time: parse_timestamp(wire.last_change_time_iso8601.as_deref(), now),
            codec: wire.codec,
            bitrate: wire.bitrate,
            hls: flag_to_bool(wire.hls),
            last_check_ok: flag_to_bool(wire.last_check_ok),
            last_check_time: parse_timestamp(wire.last_check_time_iso8601.as_deref(), now),
            last_check_ok_time: parse_timestamp(wire.last_check_ok_time_iso8601.as_deref(), now),
            last_local_check_time: parse_timestamp(wire.last_local_check_time_iso8601.as_deref(), now),
            last_click_time: parse_timestamp(wire.click_timestamp_iso8601.as_deref(), now),
            click_count: wire.click_count,
            click_trend: wire.click_trend,
            ssl_error: flag_to_bool(wire.ssl_error),
            geo_location,
            has_extended_info: wire.has_extended_info,
        })
    }
}

impl From<Station> for StationWire {
    fn from(station: Station) -> Self {
        StationWire {
            change_uuid: station.change_uuid,
            station_uuid: station.station_uuid,
            server_uuid: station.server_uuid,
            name: station.name,
            url: station.stream_url.to_string(),
            url_resolved: station.stream_url_resolved.to_string(),
            homepage: url_to_wire(&station.website_url),
            favicon: url_to_wire(&station.cover_url),
            tags: station.tags,
            country: station.country,
            country_code: station.country_code,
            iso_3166_2: station.iso_3166_2,
            state: station.state,
            language: station.language,
            language_codes: station.language_codes,
            votes: station.votes,
            last_change_time: Some(format_legacy(&station.last_change_time)),
            last_change_time_iso8601: Some(format_iso8601(&station.last_change_time)),
            codec: station.codec,
            bitrate: station.bitrate,
            hls: bool_to_flag(station.hls),
            last_check_ok: bool_to_flag(station.last_check_ok),
            last_check_time: Some(format_legacy(&station.last_check_time)),
            last_check_time_iso8601: Some(format_iso8601(&station.last_check_time)),
            last_check_ok_time: Some(format_legacy(&station.last_check_ok_time)),
            last_check_ok_time_iso8601: Some(format_iso8601(&station.last_check_ok_time)),
            last_local_check_time: Some(format_legacy(&station.last_local_check_time)),
            last_local_check_time_iso8601: Some(format_iso8601(&station.last_local_check_time)),
            click_timestamp: Some(format_legacy(&station.last_click_time)),
            click_timestamp_iso8601: Some(format_iso8601(&station.last_click_time)),
            click_count: station.click_count,
            click_trend: station.click_trend,
            ssl_error: bool_to_flag(station.ssl_error),
            geo_lat: station.geo_location.map(|g| g.latitude),
            geo_long: station.geo_location.map(|g| g.longitude),
            has_extended_info: station.has_extended_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn city23() -> Value {
        json!({
            "changeuuid": "17142cad-4faf-11e9-a4d7-52543be04c81",
            "stationuuid": "17142ca0-4faf-11e9-a4d7-52543be04c81",
            "serveruuid": "cab9cde6-4922-475a-bdb4-ff681d25b2c6",
            "name": "CITY23",
            "url": "http://live.radiomax.technology/city23",
            "url_resolved": "http://live.radiomax.technology/city23",
            "homepage": "http://city23.at/",
            "favicon": "http://city23.at/img/Logo_BCL.png",
            "tags": "dab+,easy listening",
            "country": "Austria",
            "countrycode": "AT",
            "iso_3166_2": null,
            "state": "Vienna",
            "language": "german",
            "languagecodes": "de",
            "votes": 25,
            "lastchangetime": "2021-08-06 08:36:44",
            "lastchangetime_iso8601": "2021-08-06T08:36:44Z",
            "codec": "MP3",
            "bitrate": 192,
            "hls": 0,
            "lastcheckok": 1,
            "lastchecktime": "2021-10-22 22:09:29",
            "lastchecktime_iso8601": "2021-10-22T22:09:29Z",
            "lastcheckoktime": "2021-10-22 22:09:29",
            "lastcheckoktime_iso8601": "2021-10-22T22:09:29Z",
            "lastlocalchecktime": "2021-10-22 22:09:29",
            "lastlocalchecktime_iso8601": "2021-10-22T22:09:29Z",
            "clicktimestamp": "2021-10-23 09:23:27",
            "clicktimestamp_iso8601": "2021-10-23T09:23:27Z",
            "clickcount": 4,
            "clicktrend": 3,
            "ssl_error": 0,
            "geo_lat": null,
            "geo_long": null,
            "has_extended_info": false
        })
    }

    fn hash_of(station: &Station) -> u64 {
        let mut hasher = DefaultHasher::new();
        station.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_decode_station() {
        let station: Station = serde_json::from_value(city23()).unwrap();

        assert_eq!(station.name, "CITY23");
        assert_eq!(
            station.station_uuid.to_string(),
            "17142ca0-4faf-11e9-a4d7-52543be04c81"
        );
        assert_eq!(station.stream_url.as_str(), "http://live.radiomax.technology/city23");
        assert_eq!(
            station.cover_url.as_ref().map(|u| u.as_str()),
            Some("http://city23.at/img/Logo_BCL.png")
        );
        assert_eq!(station.country_code, "AT");
        assert_eq!(station.bitrate, 192);
        assert!(station.last_check_ok);
        assert!(!station.hls);
        assert!(!station.ssl_error);
        assert!(station.geo_location.is_none());
        assert_eq!(station.has_extended_info, Some(false));
        assert_eq!(
            station.last_change_time,
            Utc.with_ymd_and_hms(2021, 8, 6, 8, 36, 44).unwrap()
        );
        assert_eq!(station.tag_list(), vec!["dab+", "easy listening"]);
    }

    #[test]
    fn test_flags_round_trip() {
        let station: Station = serde_json::from_value(city23()).unwrap();
        let encoded = serde_json::to_value(&station).unwrap();

        assert_eq!(encoded["lastcheckok"], 1);
        assert_eq!(encoded["hls"], 0);
        assert_eq!(encoded["ssl_error"], 0);
        assert_eq!(encoded["lastchangetime_iso8601"], "2021-08-06T08:36:44Z");
        assert_eq!(encoded["lastchangetime"], "2021-08-06 08:36:44");

        let decoded: Station = serde_json::from_value(encoded).unwrap();
        assert!(decoded.last_check_ok);
        assert_eq!(decoded.last_change_time, station.last_change_time);
    }

    #[test]
    fn test_malformed_date_falls_back_to_now() {
        let mut raw = city23();
        raw["lastchangetime_iso8601"] = json!("yesterday-ish");
        raw["clicktimestamp_iso8601"] = Value::Null;

        let before = Utc::now();
        let station: Station = serde_json::from_value(raw).unwrap();

        assert!(station.last_change_time >= before);
        assert!(station.last_click_time >= before);
    }

    #[test]
    fn test_same_uuid_is_same_station() {
        let a: Station = serde_json::from_value(city23()).unwrap();
        let mut raw = city23();
        raw["votes"] = json!(9000);
        raw["name"] = json!("CITY 23 renamed");
        let b: Station = serde_json::from_value(raw).unwrap();

        assert_ne!(a.votes, b.votes);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let set: HashSet<Station> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_geo_location_requires_both_coordinates() {
        let mut raw = city23();
        raw["geo_lat"] = json!(48.2);
        let station: Station = serde_json::from_value(raw.clone()).unwrap();
        assert!(station.geo_location.is_none());

        raw["geo_long"] = json!(16.37);
        let station: Station = serde_json::from_value(raw).unwrap();
        assert_eq!(
            station.geo_location,
            Some(GeoLocation {
                latitude: 48.2,
                longitude: 16.37
            })
        );
    }

    #[test]
    fn test_empty_optional_urls() {
        let mut raw = city23();
        raw["homepage"] = json!("");
        raw["favicon"] = json!("not a url");
        raw["url_resolved"] = json!("");
        let station: Station = serde_json::from_value(raw).unwrap();

        assert!(station.website_url.is_none());
        assert!(station.cover_url.is_none());
        assert_eq!(station.stream_url_resolved, station.stream_url);
    }

    #[test]
    fn test_invalid_stream_url_fails() {
        let mut raw = city23();
        raw["url"] = json!("no stream here");
        assert!(serde_json::from_value::<Station>(raw).is_err());
    }

    #[test]
    fn test_boolean_flags_are_accepted() {
        let mut raw = city23();
        raw["lastcheckok"] = json!(false);
        raw["hls"] = json!(true);
        let station: Station = serde_json::from_value(raw).unwrap();
        assert!(!station.last_check_ok);
        assert!(station.hls);
    }

    #[test]
    fn test_name_cleanup() {
        assert_eq!(clean_station_name("Radio Wien 89.9 (ORF)"), "Radio Wien");
        assert_eq!(clean_station_name("Jazz FM (London)"), "Jazz FM");
        assert_eq!(clean_station_name("Rock Antenne [HQ]"), "Rock Antenne");
        assert_eq!(
            clean_station_name("- 0 N - Chillout on Radio ON Stream"),
            "Chillout on Radio ON"
        );
        assert_eq!(clean_station_name("RADIO BOB! BOBs 80s Rock"), "BOB! 80s Rock");
        assert_eq!(clean_station_name("Radio BOB! Metal"), "BOB! Metal");
        assert_eq!(clean_station_name("__DANCE__ by Radio X"), "DANCE");
        assert_eq!(clean_station_name("CITY23"), "CITY23");
    }

    #[test]
    fn test_name_is_cleaned_on_decode() {
        let mut raw = city23();
        raw["name"] = json!("Radio Wien 89.9 (ORF)");
        let station: Station = serde_json::from_value(raw).unwrap();
        assert_eq!(station.name, "Radio Wien");
    }
}

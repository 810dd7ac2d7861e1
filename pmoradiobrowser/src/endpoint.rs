//! Remote operations exposed by Radio Browser mirrors

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote operation and its URL path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Add,
    Checks,
    Clicks,
    /// Click registration (`url/{stationuuid}`)
    ClickCount,
    Codecs,
    Config,
    Countries,
    CountryCodes,
    Languages,
    Servers,
    States,
    Stations,
    StationsByName,
    StationsByCountryCode,
    StationsByUuid,
    StationsBroken,
    StationsChanged,
    StationsLastChange,
    StationsLastClick,
    StationsSearch,
    StationsTopClick,
    StationsTopVote,
    Stats,
    Tags,
    Vote,
}

impl Endpoint {
    /// Path segment(s) appended after the response format
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Add => "add",
            Endpoint::Checks => "checks",
            Endpoint::Clicks => "clicks",
            Endpoint::ClickCount => "url",
            Endpoint::Codecs => "codecs",
            Endpoint::Config => "config",
            Endpoint::Countries => "countries",
            Endpoint::CountryCodes => "countrycodes",
            Endpoint::Languages => "languages",
            Endpoint::Servers => "servers",
            Endpoint::States => "states",
            Endpoint::Stations => "stations",
            Endpoint::StationsByName => "stations/byname",
            Endpoint::StationsByCountryCode => "stations/bycountrycodeexact",
            Endpoint::StationsByUuid => "stations/byuuid",
            Endpoint::StationsBroken => "stations/broken",
            Endpoint::StationsChanged => "stations/changed",
            Endpoint::StationsLastChange => "stations/lastchange",
            Endpoint::StationsLastClick => "stations/lastclick",
            Endpoint::StationsSearch => "stations/search",
            Endpoint::StationsTopClick => "stations/topclick",
            Endpoint::StationsTopVote => "stations/topvote",
            Endpoint::Stats => "stats",
            Endpoint::Tags => "tags",
            Endpoint::Vote => "vote",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Response encoding requested from the mirror (first path segment)
///
/// Only `Json` can be decoded by the client; the other formats are useful
/// when building URLs handed to third parties (e.g. an M3U playlist link).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
    Csv,
    M3u,
    Pls,
    Xspf,
    Ttl,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
            ResponseFormat::Csv => "csv",
            ResponseFormat::M3u => "m3u",
            ResponseFormat::Pls => "pls",
            ResponseFormat::Xspf => "xspf",
            ResponseFormat::Ttl => "ttl",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::StationsSearch.path(), "stations/search");
        assert_eq!(
            Endpoint::StationsByCountryCode.path(),
            "stations/bycountrycodeexact"
        );
        assert_eq!(Endpoint::ClickCount.path(), "url");
        assert_eq!(Endpoint::CountryCodes.to_string(), "countrycodes");
    }

    #[test]
    fn test_response_format_default() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Json);
        assert_eq!(ResponseFormat::M3u.as_str(), "m3u");
    }
}

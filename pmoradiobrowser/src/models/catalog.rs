//! Catalog facets (countries, languages, tags, codecs, states) and mirrors

use serde::{Deserialize, Serialize};

/// One value of a catalog listing with its station count
///
/// ```json
/// { "name": "Austria", "iso_3166_1": "AT", "stationcount": 412 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facet {
    pub name: String,
    /// Country code, only present on `countries`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_3166_1: Option<String>,
    /// Owning country, only present on `states`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "stationcount", default)]
    pub station_count: u64,
}

/// A mirror listed by the `servers` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerMirror {
    pub ip: String,
    pub name: String,
}

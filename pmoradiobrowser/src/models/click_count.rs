//! Click registration result
//!
//! ```json
//! {
//!     "ok": true,
//!     "message": "retrieved station url",
//!     "stationuuid": "9617a958-0601-11e8-ae97-52543be04c81",
//!     "name": "Station name",
//!     "url": "http://this.is.an.url"
//! }
//! ```

use super::wire::{optional_url, url_to_wire};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use url::Url;
use uuid::Uuid;

/// Outcome of registering a click on a station
///
/// Identified by `station_uuid`, like [`super::Station`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ClickCountWire", into = "ClickCountWire")]
pub struct ClickCount {
    /// Whether the mirror counted the click
    pub ok: bool,
    pub message: String,
    pub station_uuid: Uuid,
    pub name: String,
    /// Stream URL to play, absent when the click was rejected
    pub url: Option<Url>,
}

impl PartialEq for ClickCount {
    fn eq(&self, other: &Self) -> bool {
        self.station_uuid == other.station_uuid
    }
}

impl Eq for ClickCount {}

impl Hash for ClickCount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.station_uuid.hash(state);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClickCountWire {
    ok: bool,
    #[serde(default)]
    message: String,
    #[serde(rename = "stationuuid")]
    station_uuid: Uuid,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

impl From<ClickCountWire> for ClickCount {
    fn from(wire: ClickCountWire) -> Self {
        ClickCount {
            ok: wire.ok,
            message: wire.message,
            station_uuid: wire.station_uuid,
            name: wire.name,
            url: optional_url(&wire.url),
        }
    }
}

impl From<ClickCount> for ClickCountWire {
    fn from(click: ClickCount) -> Self {
        ClickCountWire {
            ok: click.ok,
            message: click.message,
            station_uuid: click.station_uuid,
            name: click.name,
            url: url_to_wire(&click.url),
        }
    }
}

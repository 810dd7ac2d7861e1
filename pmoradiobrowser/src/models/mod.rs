//! Data models for Radio Browser API responses
//!
//! Every record is decoded from a private wire struct that mirrors the JSON
//! exactly and is then converted into a fully resolved domain value: ISO-8601
//! strings become timestamps, `0`/`1` integers become booleans, URL strings
//! become `Url`s. Serializing a record writes the wire representation back.

mod catalog;
mod category;
mod click_count;
mod config;
mod station;
mod stats;
mod wire;

pub use catalog::{Facet, ServerMirror};
pub use category::{Category, CategoryHead, CategoryResponse};
pub use click_count::ClickCount;
pub use config::Config;
pub use station::{clean_station_name, GeoLocation, Station};
pub use stats::Stats;

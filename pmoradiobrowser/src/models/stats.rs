//! Directory statistics (`json/stats`)

use serde::{Deserialize, Serialize};

/// Counters reported by a mirror
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub supported_version: u32,
    pub software_version: String,
    /// `"OK"` when the mirror is healthy
    pub status: String,
    pub stations: u64,
    pub stations_broken: u64,
    pub tags: u64,
    pub clicks_last_hour: u64,
    pub clicks_last_day: u64,
    pub languages: u64,
    pub countries: u64,
}

impl Stats {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }

    /// Stations that passed their last check
    pub fn working_stations(&self) -> u64 {
        self.stations.saturating_sub(self.stations_broken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_stats() {
        let stats: Stats = serde_json::from_str(
            r#"{
                "supported_version": 1,
                "software_version": "0.7.24",
                "status": "OK",
                "stations": 45000,
                "stations_broken": 5000,
                "tags": 9000,
                "clicks_last_hour": 3000,
                "clicks_last_day": 70000,
                "languages": 500,
                "countries": 220
            }"#,
        )
        .unwrap();

        assert!(stats.is_ok());
        assert_eq!(stats.software_version, "0.7.24");
        assert_eq!(stats.working_stations(), 40000);
    }

    #[test]
    fn test_missing_counter_is_an_error() {
        let result = serde_json::from_str::<Stats>(r#"{"status": "OK"}"#);
        assert!(result.is_err());
    }
}

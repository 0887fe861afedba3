//! Demo Data Source
//!
//! A deliberately slow lookup used to show the cache-aside wrapper at work.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Latency simulated by [`search_sand_dunes`].
pub const SEARCH_LATENCY: Duration = Duration::from_millis(500);

const DUNE_REGIONS: &[(&str, &[&str])] = &[
    ("sahara", &["Great Sand Sea", "Erg Chech", "Grand Erg Oriental"]),
    ("arabian", &["Rub al Khali", "An Nafud", "Ad Dahna"]),
    ("gobi", &["Khongoryn Els", "Gobi Gurvansaikhan"]),
    ("namib", &["Sossusvlei", "Sandwich Harbour"]),
];

/// Search result payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuneSearchResult {
    pub query: String,
    pub results: Vec<String>,
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Returns the dunes of every region whose name contains `query`, case-insensitively.
pub fn match_dunes(query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    DUNE_REGIONS
        .iter()
        .filter(|(region, _)| region.contains(needle.as_str()))
        .flat_map(|(_, dunes)| dunes.iter().map(|dune| dune.to_string()))
        .collect()
}

/// Slow search over the dune table.
pub async fn search_sand_dunes(query: String) -> DuneSearchResult {
    tokio::time::sleep(SEARCH_LATENCY).await;

    let results = match_dunes(&query);
    DuneSearchResult {
        count: results.len(),
        query,
        results,
        timestamp: Utc::now(),
    }
}

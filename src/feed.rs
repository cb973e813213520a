// Feed-field parsing and snapshot loading.
//
// The fantasy platform's export API delivers every numeric field as a string
// (win counts, percentages, timestamps). League data is validated upstream,
// so coercion here is deliberately permissive: a missing or unparseable
// field becomes 0 rather than an error.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::DataPaths;
use crate::draft::assets::{DraftResultRow, Transaction};
use crate::draft::standings::StandingsFranchise;

// ---------------------------------------------------------------------------
// Permissive numeric coercion
// ---------------------------------------------------------------------------

/// Parse a count field (wins, losses, rounds). Missing or unparseable -> 0.
pub fn parse_count(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// Parse a stat field (points, percentages). Missing or unparseable -> 0.0.
pub fn parse_stat(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0.0)
}

/// Parse a Unix-seconds timestamp field. Missing or unparseable -> 0.
pub fn parse_timestamp(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Franchise id normalization
// ---------------------------------------------------------------------------

/// Normalize a franchise id to the platform's 4-digit zero-padded form
/// ("7" -> "0007"). Non-numeric ids pass through unchanged.
pub fn normalize_franchise_id(id: &str) -> String {
    match id.trim().parse::<u32>() {
        Ok(n) => format!("{n:04}"),
        Err(_) => id.trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Snapshot JSON loading
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read snapshot file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// An in-memory snapshot of the four league exports the core consumes.
#[derive(Debug, Clone)]
pub struct LeagueSnapshot {
    pub standings: Vec<StandingsFranchise>,
    pub transactions: Vec<Transaction>,
    pub draft_results: Vec<DraftResultRow>,
    /// Kept loosely typed; bracket shapes vary by season.
    pub playoff_brackets: Value,
}

#[derive(Debug, Deserialize)]
struct StandingsExport {
    #[serde(rename = "leagueStandings")]
    league_standings: StandingsList,
}

#[derive(Debug, Deserialize)]
struct StandingsList {
    #[serde(default)]
    franchise: Vec<StandingsFranchise>,
}

#[derive(Debug, Deserialize)]
struct TransactionsExport {
    transactions: TransactionsList,
}

#[derive(Debug, Deserialize)]
struct TransactionsList {
    #[serde(default)]
    transaction: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
struct DraftResultsExport {
    #[serde(rename = "draftResults")]
    draft_results: DraftUnit,
}

#[derive(Debug, Deserialize)]
struct DraftUnit {
    #[serde(default, rename = "draftPick")]
    draft_pick: Vec<DraftResultRow>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let text = std::fs::read_to_string(path).map_err(|e| FeedError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| FeedError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the season standings export.
pub fn load_standings(path: &Path) -> Result<Vec<StandingsFranchise>, FeedError> {
    let export: StandingsExport = read_json(path)?;
    Ok(export.league_standings.franchise)
}

/// Load the transaction-history export.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>, FeedError> {
    let export: TransactionsExport = read_json(path)?;
    Ok(export.transactions.transaction)
}

/// Load the draft-results export.
pub fn load_draft_results(path: &Path) -> Result<Vec<DraftResultRow>, FeedError> {
    let export: DraftResultsExport = read_json(path)?;
    Ok(export.draft_results.draft_pick)
}

/// Load the playoff-bracket export as raw JSON.
pub fn load_playoff_brackets(path: &Path) -> Result<Value, FeedError> {
    read_json(path)
}

/// Load all four exports named in the config, relative to `base_dir`.
pub fn load_snapshot(base_dir: &Path, paths: &DataPaths) -> Result<LeagueSnapshot, FeedError> {
    Ok(LeagueSnapshot {
        standings: load_standings(&base_dir.join(&paths.standings))?,
        transactions: load_transactions(&base_dir.join(&paths.transactions))?,
        draft_results: load_draft_results(&base_dir.join(&paths.draft_results))?,
        playoff_brackets: load_playoff_brackets(&base_dir.join(&paths.playoff_brackets))?,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parse_count_valid() {
        assert_eq!(parse_count(Some("7")), 7);
        assert_eq!(parse_count(Some(" 12 ")), 12);
        assert_eq!(parse_count(Some("0")), 0);
    }

    #[test]
    fn parse_count_coerces_garbage_to_zero() {
        assert_eq!(parse_count(None), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("abc")), 0);
        assert_eq!(parse_count(Some("-3")), 0);
    }

    #[test]
    fn parse_stat_valid() {
        assert!((parse_stat(Some("1543.5")) - 1543.5).abs() < f64::EPSILON);
        assert!((parse_stat(Some(".5624")) - 0.5624).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_stat_coerces_garbage_to_zero() {
        assert_eq!(parse_stat(None), 0.0);
        assert_eq!(parse_stat(Some("")), 0.0);
        assert_eq!(parse_stat(Some("n/a")), 0.0);
    }

    #[test]
    fn parse_timestamp_valid_and_garbage() {
        assert_eq!(parse_timestamp(Some("1736035200")), 1_736_035_200);
        assert_eq!(parse_timestamp(Some("oops")), 0);
        assert_eq!(parse_timestamp(None), 0);
    }

    #[test]
    fn normalize_franchise_id_pads_numeric_ids() {
        assert_eq!(normalize_franchise_id("7"), "0007");
        assert_eq!(normalize_franchise_id("0007"), "0007");
        assert_eq!(normalize_franchise_id("16"), "0016");
        assert_eq!(normalize_franchise_id(" 3 "), "0003");
    }

    #[test]
    fn normalize_franchise_id_passes_non_numeric_through() {
        assert_eq!(normalize_franchise_id("FA"), "FA");
        assert_eq!(normalize_franchise_id(""), "");
    }

    #[test]
    fn load_snapshot_round_trip() {
        let tmp = std::env::temp_dir().join("capkeeper_feed_snapshot");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        fs::write(
            tmp.join("standings.json"),
            r#"{"leagueStandings": {"franchise": [
                {"id": "0001", "h2hw": "10", "h2hl": "4", "h2ht": "0", "pf": "1601.2"},
                {"id": "0002", "h2hw": "3", "h2hl": "11", "h2ht": "0", "pf": "1288.9"}
            ]}}"#,
        )
        .unwrap();
        fs::write(
            tmp.join("transactions.json"),
            r#"{"transactions": {"transaction": [
                {"type": "TRADE", "franchise": "0001", "franchise2": "0002",
                 "franchise1_gave_up": "FP_0001_2026_1,", "franchise2_gave_up": "12345,",
                 "timestamp": "1719800000"}
            ]}}"#,
        )
        .unwrap();
        fs::write(
            tmp.join("draft_results.json"),
            r#"{"draftResults": {"draftPick": [
                {"round": "01", "pick": "01", "franchise": "0002",
                 "comments": "[Pick traded from Moss Point Mallards.]"}
            ]}}"#,
        )
        .unwrap();
        fs::write(
            tmp.join("brackets.json"),
            r#"{"bracketWinners": {"item": []}}"#,
        )
        .unwrap();

        let paths = DataPaths {
            standings: "standings.json".into(),
            transactions: "transactions.json".into(),
            draft_results: "draft_results.json".into(),
            playoff_brackets: "brackets.json".into(),
        };

        let snapshot = load_snapshot(&tmp, &paths).expect("should load snapshot");
        assert_eq!(snapshot.standings.len(), 2);
        assert_eq!(snapshot.standings[0].id, "0001");
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].kind, "TRADE");
        assert_eq!(snapshot.draft_results.len(), 1);
        assert!(snapshot.playoff_brackets.get("bracketWinners").is_some());

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_snapshot_missing_file_is_io_error() {
        let tmp = std::env::temp_dir().join("capkeeper_feed_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = load_standings(&tmp.join("nope.json")).unwrap_err();
        match err {
            FeedError::Io { path, .. } => assert!(path.ends_with("nope.json")),
            other => panic!("expected Io error, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn load_snapshot_bad_json_is_parse_error() {
        let tmp = std::env::temp_dir().join("capkeeper_feed_bad_json");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();
        fs::write(tmp.join("standings.json"), "{not json").unwrap();

        let err = load_standings(&tmp.join("standings.json")).unwrap_err();
        match err {
            FeedError::Parse { path, .. } => assert!(path.ends_with("standings.json")),
            other => panic!("expected Parse error, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }
}

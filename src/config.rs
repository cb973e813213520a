// Configuration loading and parsing (config/league.toml).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Wrapper for the top-level tables in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub name: String,
    /// League ids allowed to submit contract changes.
    pub allowed_league_ids: Vec<String>,
    pub num_franchises: usize,
    pub draft_rounds: u8,
    /// The draft year assets are computed for.
    pub season: u16,
    /// Franchise id -> display name. Franchises missing here render with an
    /// id-based fallback name.
    #[serde(default)]
    pub franchises: HashMap<String, String>,
}

/// Snapshot JSON export paths, relative to the config's base directory.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub standings: String,
    pub transactions: String,
    pub draft_results: String,
    pub playoff_brackets: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub data_paths: DataPaths,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// the given `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = base_dir.join("config").join("league.toml");
    let league_text =
        std::fs::read_to_string(&league_path).map_err(|_| ConfigError::FileNotFound {
            path: league_path.clone(),
        })?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        data_paths: league_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working
/// directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.league.num_franchises == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.num_franchises".into(),
            message: "must be greater than 0".into(),
        });
    }

    if !(1..=5).contains(&config.league.draft_rounds) {
        return Err(ConfigError::ValidationError {
            field: "league.draft_rounds".into(),
            message: format!(
                "must be between 1 and 5, got {}",
                config.league.draft_rounds
            ),
        });
    }

    if config.league.allowed_league_ids.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.allowed_league_ids".into(),
            message: "at least one league id is required".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_LEAGUE_TOML: &str = r#"
[league]
name = "TheLeague"
allowed_league_ids = ["12345", "67890"]
num_franchises = 16
draft_rounds = 3
season = 2026

[league.franchises]
"0001" = "Moss Point Mallards"
"0002" = "Hill Valley Hawks"

[data_paths]
standings = "data/standings.json"
transactions = "data/transactions.json"
draft_results = "data/draft_results.json"
playoff_brackets = "data/playoff_brackets.json"
"#;

    fn write_config(dir_name: &str, contents: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(dir_name);
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/league.toml"), contents).unwrap();
        tmp
    }

    #[test]
    fn load_valid_config() {
        let tmp = write_config("capkeeper_config_valid", VALID_LEAGUE_TOML);
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.league.name, "TheLeague");
        assert_eq!(config.league.allowed_league_ids, vec!["12345", "67890"]);
        assert_eq!(config.league.num_franchises, 16);
        assert_eq!(config.league.draft_rounds, 3);
        assert_eq!(config.league.season, 2026);
        assert_eq!(
            config.league.franchises.get("0001").map(String::as_str),
            Some("Moss Point Mallards")
        );
        assert_eq!(config.data_paths.standings, "data/standings.json");

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let tmp = std::env::temp_dir().join("capkeeper_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("league.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let tmp = write_config("capkeeper_config_bad_toml", "this is not [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("league.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_franchises() {
        let modified = VALID_LEAGUE_TOML.replace("num_franchises = 16", "num_franchises = 0");
        let tmp = write_config("capkeeper_config_zero_franchises", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.num_franchises");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_out_of_range_rounds() {
        let modified = VALID_LEAGUE_TOML.replace("draft_rounds = 3", "draft_rounds = 0");
        let tmp = write_config("capkeeper_config_zero_rounds", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.draft_rounds");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_league_allow_list() {
        let modified = VALID_LEAGUE_TOML.replace(
            r#"allowed_league_ids = ["12345", "67890"]"#,
            "allowed_league_ids = []",
        );
        let tmp = write_config("capkeeper_config_empty_leagues", &modified);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "league.allowed_league_ids");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn franchises_table_is_optional() {
        let mut modified = VALID_LEAGUE_TOML.replace("[league.franchises]", "[league.unused]");
        modified = modified.replace(r#""0001" = "Moss Point Mallards""#, "");
        modified = modified.replace(r#""0002" = "Hill Valley Hawks""#, "");
        let tmp = write_config("capkeeper_config_no_franchises", &modified);
        let config = load_config_from(&tmp).expect("franchise table should be optional");
        assert!(config.league.franchises.is_empty());
        let _ = fs::remove_dir_all(&tmp);
    }
}

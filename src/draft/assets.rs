// Pick ownership: who holds which draft pick right now.
//
// Two independent derivations, used depending on which export is available:
// - draft-result rows, whose free-text comments name the prior owner of a
//   traded pick ("[Pick traded from X.]");
// - the transaction history, replayed chronologically against an initial
//   "every franchise owns its own picks" map.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::feed::{normalize_franchise_id, parse_count, parse_timestamp};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("transaction data is missing or empty")]
    MissingTransactions,
}

// ---------------------------------------------------------------------------
// Feed row types
// ---------------------------------------------------------------------------

/// One row of the draft-results export. All fields are feed strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftResultRow {
    pub round: String,
    pub pick: String,
    pub franchise: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// One row of the transaction-history export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction type ("TRADE", "FREE_AGENT", "BBID_WAIVER", ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub franchise: String,
    #[serde(default)]
    pub franchise2: Option<String>,
    /// Comma-joined item ids the first franchise surrendered.
    #[serde(default)]
    pub franchise1_gave_up: Option<String>,
    #[serde(default)]
    pub franchise2_gave_up: Option<String>,
    /// Unix seconds, as a numeric string.
    #[serde(default)]
    pub timestamp: Option<String>,
}

// ---------------------------------------------------------------------------
// Comments-based derivation
// ---------------------------------------------------------------------------

/// Ownership of one completed draft slot, enriched from its comment text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickOwnership {
    pub current_franchise_id: String,
    /// The prior owner's team name, when the comment names one.
    pub original_team_name: Option<String>,
    pub is_traded: bool,
}

/// Trade provenance rebuilt from a comment. Single hop: the comment only
/// ever names the immediately prior owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeChain {
    pub original_team_name: String,
    /// Intermediate owners, oldest first.
    pub chain: Vec<String>,
}

// Static regex patterns compiled once. The longer "traded from" form must
// be tried first; the short form would otherwise capture "from X".
static RE_TRADED_FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Pick traded from (.+?)\.\]").unwrap());
static RE_TRADED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[Pick traded (.+?)\.\]").unwrap());

/// Extract the prior owner's team name from a draft-result comment.
///
/// Best-effort enrichment: a comment that mentions a trade but matches
/// neither known pattern yields `None`, never an error.
pub fn parse_traded_from(comment: &str) -> Option<String> {
    let captured = RE_TRADED_FROM
        .captures(comment)
        .or_else(|| RE_TRADED.captures(comment))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());
    if captured.is_none() && comment.contains("traded") {
        debug!(comment, "unparseable trade comment");
    }
    captured
}

/// Build the single-hop trade chain for a comment, if it records a trade.
pub fn trade_chain(comment: &str) -> Option<TradeChain> {
    let original = parse_traded_from(comment)?;
    Some(TradeChain {
        chain: vec![original.clone()],
        original_team_name: original,
    })
}

/// Rebuild current pick ownership from draft-result rows, keyed by pick id
/// (`"round.pick"`).
pub fn extract_pick_ownership(rows: &[DraftResultRow]) -> HashMap<String, PickOwnership> {
    rows.iter()
        .map(|row| {
            let key = format!(
                "{}.{}",
                parse_count(Some(row.round.as_str())),
                parse_count(Some(row.pick.as_str()))
            );
            let original = row.comments.as_deref().and_then(parse_traded_from);
            (
                key,
                PickOwnership {
                    current_franchise_id: normalize_franchise_id(&row.franchise),
                    is_traded: original.is_some(),
                    original_team_name: original,
                },
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Transaction-replay derivation
// ---------------------------------------------------------------------------

/// An owned draft pick. `original_franchise_id` is set when the pick was
/// acquired in a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPick {
    pub year: u16,
    pub round: u8,
    #[serde(default)]
    pub original_franchise_id: Option<String>,
}

/// All picks currently held by one franchise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsFranchise {
    pub franchise_id: String,
    pub picks: Vec<AssetPick>,
}

/// A future-pick item id: `FP_<franchise>_<year>_<round>`.
fn parse_future_pick(item: &str) -> Option<(String, u16, u8)> {
    let mut parts = item.split('_');
    if parts.next() != Some("FP") {
        return None;
    }
    let franchise = normalize_franchise_id(parts.next()?);
    let year: u16 = parts.next()?.trim().parse().ok()?;
    let round: u8 = parts.next()?.trim().parse().ok()?;
    Some((franchise, year, round))
}

/// Derive current pick ownership for `year` by replaying the trade history.
///
/// Starts from "every franchise owns its own round 1..=rounds picks", then
/// applies TRADE transactions in timestamp order, transferring each
/// `FP_` item to the other side of its trade. Replay order means the latest
/// assignment for a given (original franchise, year, round) key wins.
/// Non-pick items (players, waiver claims) are ignored.
pub fn extract_assets_from_transactions(
    transactions: &[Transaction],
    franchise_ids: &[String],
    year: u16,
    rounds: u8,
) -> Result<Vec<AssetsFranchise>, AssetError> {
    if transactions.is_empty() {
        return Err(AssetError::MissingTransactions);
    }

    // (original franchise, year, round) -> current owner
    let mut ownership: HashMap<(String, u16, u8), String> = HashMap::new();
    for id in franchise_ids {
        let id = normalize_franchise_id(id);
        for round in 1..=rounds {
            ownership.insert((id.clone(), year, round), id.clone());
        }
    }

    let mut trades: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == "TRADE")
        .collect();
    trades.sort_by_key(|t| parse_timestamp(t.timestamp.as_deref()));

    for trade in trades {
        let franchise1 = normalize_franchise_id(&trade.franchise);
        let Some(franchise2) = trade
            .franchise2
            .as_deref()
            .map(normalize_franchise_id)
            .filter(|f| !f.is_empty())
        else {
            debug!(franchise = %franchise1, "TRADE transaction without a counterparty");
            continue;
        };

        transfer_items(&mut ownership, trade.franchise1_gave_up.as_deref(), &franchise2);
        transfer_items(&mut ownership, trade.franchise2_gave_up.as_deref(), &franchise1);
    }

    // Group by current owner; franchises with no remaining picks still get
    // an (empty) entry so callers can render every roster.
    let mut by_owner: HashMap<String, Vec<AssetPick>> = franchise_ids
        .iter()
        .map(|id| (normalize_franchise_id(id), Vec::new()))
        .collect();
    for ((original, pick_year, round), owner) in &ownership {
        if *pick_year != year {
            continue;
        }
        by_owner.entry(owner.clone()).or_default().push(AssetPick {
            year: *pick_year,
            round: *round,
            original_franchise_id: (original != owner).then(|| original.clone()),
        });
    }

    let mut assets: Vec<AssetsFranchise> = by_owner
        .into_iter()
        .map(|(franchise_id, mut picks)| {
            picks.sort_by(|a, b| {
                (a.round, &a.original_franchise_id).cmp(&(b.round, &b.original_franchise_id))
            });
            AssetsFranchise {
                franchise_id,
                picks,
            }
        })
        .collect();
    assets.sort_by(|a, b| a.franchise_id.cmp(&b.franchise_id));

    Ok(assets)
}

fn transfer_items(
    ownership: &mut HashMap<(String, u16, u8), String>,
    gave_up: Option<&str>,
    new_owner: &str,
) {
    let Some(items) = gave_up else {
        return;
    };
    for item in items.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !item.starts_with("FP_") {
            continue;
        }
        match parse_future_pick(item) {
            Some((franchise, year, round)) => {
                ownership.insert((franchise, year, round), new_owner.to_string());
            }
            None => debug!(item, "unparseable future-pick item"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

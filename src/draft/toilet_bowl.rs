// Toilet-bowl resolution: playoff-bracket payload -> consolation-ladder winners.
//
// The bracket export is loosely typed and its shape has drifted across
// seasons, so extraction works over raw JSON. A missing payload is the
// normal "no playoffs yet" state and yields an empty result, not an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::feed::normalize_franchise_id;

// ---------------------------------------------------------------------------
// Consolation-ladder levels
// ---------------------------------------------------------------------------

/// The three consolation-ladder outcomes, each granting a bonus draft pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToiletBowlLevel {
    Winner,
    Consolation,
    Consolation2,
}

impl ToiletBowlLevel {
    /// Map a numeric bracket id from the export to a level.
    pub fn from_bracket_id(id: u32) -> Option<Self> {
        match id {
            4 => Some(ToiletBowlLevel::Winner),
            5 => Some(ToiletBowlLevel::Consolation),
            6 => Some(ToiletBowlLevel::Consolation2),
            _ => None,
        }
    }

    /// Map a tier-name string to a level. Exact match against the variants
    /// the platform has used over the years.
    pub fn from_tier_name(name: &str) -> Option<Self> {
        match name {
            "Toilet Bowl" | "Toilet Bowl Championship" => Some(ToiletBowlLevel::Winner),
            "Consolation" | "Consolation Bracket" => Some(ToiletBowlLevel::Consolation),
            "Consolation 2" | "Second Consolation" => Some(ToiletBowlLevel::Consolation2),
            _ => None,
        }
    }

    /// The draft round whose bonus pick this level awards.
    pub fn bonus_round(&self) -> u8 {
        match self {
            ToiletBowlLevel::Winner => 1,
            ToiletBowlLevel::Consolation | ToiletBowlLevel::Consolation2 => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToiletBowlLevel::Winner => "winner",
            ToiletBowlLevel::Consolation => "consolation",
            ToiletBowlLevel::Consolation2 => "consolation2",
        }
    }
}

/// A resolved consolation-ladder outcome. At most one per level per season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToiletBowlResult {
    pub level: ToiletBowlLevel,
    /// 4-digit zero-padded franchise id.
    pub franchise_id: String,
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Extract the consolation-ladder winners from a bracket export payload.
///
/// Accepts either the wrapped export (`{"bracketWinners": {"item": [...]}}`)
/// or a bare item array. Per item, a numeric `bracketId` takes precedence
/// over a `tierName` string match. Items that map to no known level are
/// dropped; a second item for an already-resolved level is ignored.
pub fn extract_toilet_bowl_winners(payload: &Value) -> Vec<ToiletBowlResult> {
    let mut results: Vec<ToiletBowlResult> = Vec::new();

    for item in bracket_items(payload) {
        let Some(level) = level_for_item(item) else {
            debug!(item = %item, "dropping bracket item with unknown level");
            continue;
        };
        let Some(raw_id) = item_franchise_id(item) else {
            debug!(item = %item, "dropping bracket item without a franchise id");
            continue;
        };
        if results.iter().any(|r| r.level == level) {
            continue;
        }
        results.push(ToiletBowlResult {
            level,
            franchise_id: normalize_franchise_id(&raw_id),
        });
    }

    results
}

fn bracket_items(payload: &Value) -> &[Value] {
    let wrapped = payload
        .get("bracketWinners")
        .and_then(|w| w.get("item"))
        .and_then(Value::as_array);
    match wrapped {
        Some(items) => items,
        None => payload.as_array().map(Vec::as_slice).unwrap_or(&[]),
    }
}

fn level_for_item(item: &Value) -> Option<ToiletBowlLevel> {
    // bracketId may arrive as a JSON number or a numeric string.
    if let Some(id) = item.get("bracketId").and_then(value_as_u32) {
        if let Some(level) = ToiletBowlLevel::from_bracket_id(id) {
            return Some(level);
        }
    }
    item.get("tierName")
        .and_then(Value::as_str)
        .and_then(ToiletBowlLevel::from_tier_name)
}

fn item_franchise_id(item: &Value) -> Option<String> {
    let raw = item.get("franchise_id").or_else(|| item.get("id"))?;
    match raw {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_u32(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

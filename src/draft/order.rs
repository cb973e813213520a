// Draft-order prediction.
//
// Produces the full ordered list of predicted picks for the coming rookie
// draft: reverse-standings order for the regular rounds, plus the three
// bonus picks awarded to the consolation ladder. Traded picks are merged in
// afterwards from the transaction-replay assets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::assets::AssetsFranchise;
use super::standings::{cmp_reverse_record, StandingsFranchise};
use super::toilet_bowl::{ToiletBowlLevel, ToiletBowlResult};
use crate::feed::normalize_franchise_id;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DraftOrderError {
    #[error("standings data is missing or empty")]
    MissingStandings,
}

// ---------------------------------------------------------------------------
// Prediction types
// ---------------------------------------------------------------------------

/// Display metadata for one franchise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMeta {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// The record snapshot carried on each prediction for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub record: String,
    pub points_for: f64,
}

/// Trade provenance for a pick that no longer belongs to its original owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    pub original_franchise_id: String,
    /// Intermediate owners, oldest first. Currently a single hop: the
    /// immediately prior owner is all the source data names.
    pub chain: Vec<String>,
}

/// A single predicted draft slot. Never mutated after construction; display
/// order is ascending `overall_pick_number`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftPrediction {
    pub overall_pick_number: u32,
    pub round: u8,
    pub pick_in_round: u32,
    pub franchise_id: String,
    pub team: TeamMeta,
    pub standing: Option<RecordSnapshot>,
    #[serde(default)]
    pub trade: Option<TradeInfo>,
    #[serde(default)]
    pub toilet_bowl: Option<ToiletBowlLevel>,
    pub is_league_winner: bool,
}

// ---------------------------------------------------------------------------
// Order calculation
// ---------------------------------------------------------------------------

/// Compute the predicted draft order for the coming season.
///
/// Regular picks go worst-record-first (see `cmp_reverse_record`), one per
/// franchise per round. The consolation ladder adds up to three bonus
/// picks: round 1 slot N+1 for the toilet-bowl winner and round 2 slots
/// N+1 / N+2 for the two consolation levels, where N is the franchise
/// count. A level with no recorded winner simply emits nothing.
///
/// Overall pick numbers are assigned sequentially over the display order,
/// so they are unique; with no toilet-bowl picks the numbering equals
/// `(round - 1) * N + pick_in_round`.
///
/// The league winner, when known, is flagged on their picks but keeps the
/// slot their record earned.
pub fn calculate_draft_order(
    standings: &[StandingsFranchise],
    teams: &HashMap<String, TeamMeta>,
    league_winner: Option<&str>,
    toilet_bowl: &[ToiletBowlResult],
    rounds: u8,
) -> Result<Vec<DraftPrediction>, DraftOrderError> {
    if standings.is_empty() {
        return Err(DraftOrderError::MissingStandings);
    }

    let mut order: Vec<&StandingsFranchise> = standings.iter().collect();
    order.sort_by(|a, b| cmp_reverse_record(a, b));

    let n = order.len() as u32;
    let winner_id = league_winner.map(normalize_franchise_id);
    let winner_for = |level: ToiletBowlLevel| toilet_bowl.iter().find(|r| r.level == level);

    let mut predictions = Vec::new();
    let mut overall = 0u32;

    for round in 1..=rounds {
        for (i, franchise) in order.iter().enumerate() {
            let id = normalize_franchise_id(&franchise.id);
            overall += 1;
            predictions.push(DraftPrediction {
                overall_pick_number: overall,
                round,
                pick_in_round: i as u32 + 1,
                team: team_meta(teams, &id),
                standing: Some(RecordSnapshot {
                    record: franchise.record(),
                    points_for: franchise.points_for(),
                }),
                trade: None,
                toilet_bowl: None,
                is_league_winner: winner_id.as_deref() == Some(id.as_str()),
                franchise_id: id,
            });
        }

        let specials: &[(ToiletBowlLevel, u32)] = match round {
            1 => &[(ToiletBowlLevel::Winner, 1)],
            2 => &[
                (ToiletBowlLevel::Consolation, 1),
                (ToiletBowlLevel::Consolation2, 2),
            ],
            _ => &[],
        };
        for &(level, offset) in specials {
            let Some(result) = winner_for(level) else {
                continue;
            };
            let standing = standings
                .iter()
                .find(|f| normalize_franchise_id(&f.id) == result.franchise_id)
                .map(|f| RecordSnapshot {
                    record: f.record(),
                    points_for: f.points_for(),
                });
            overall += 1;
            predictions.push(DraftPrediction {
                overall_pick_number: overall,
                round,
                pick_in_round: n + offset,
                franchise_id: result.franchise_id.clone(),
                team: team_meta(teams, &result.franchise_id),
                standing,
                trade: None,
                toilet_bowl: Some(level),
                is_league_winner: winner_id.as_deref() == Some(result.franchise_id.as_str()),
            });
        }
    }

    Ok(predictions)
}

fn team_meta(teams: &HashMap<String, TeamMeta>, franchise_id: &str) -> TeamMeta {
    teams.get(franchise_id).cloned().unwrap_or(TeamMeta {
        name: format!("Franchise {franchise_id}"),
        icon: None,
    })
}

/// Reassign predictions for picks whose ownership has moved through trades.
///
/// For each asset pick carrying an original owner, the matching regular
/// prediction (same round, still owned by the original franchise) is handed
/// to the asset's current owner with a `TradeInfo` recording provenance.
/// Toilet-bowl picks are never reassigned.
pub fn apply_traded_picks(
    predictions: &mut [DraftPrediction],
    assets: &[AssetsFranchise],
    teams: &HashMap<String, TeamMeta>,
) {
    for owner in assets {
        for pick in &owner.picks {
            let Some(original) = &pick.original_franchise_id else {
                continue;
            };
            let target = predictions.iter_mut().find(|p| {
                p.toilet_bowl.is_none()
                    && p.round == pick.round
                    && p.trade.is_none()
                    && p.franchise_id == *original
            });
            if let Some(pred) = target {
                pred.franchise_id = owner.franchise_id.clone();
                pred.team = team_meta(teams, &owner.franchise_id);
                pred.trade = Some(TradeInfo {
                    original_franchise_id: original.clone(),
                    chain: vec![original.clone()],
                });
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

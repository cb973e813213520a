// Roster display rows: sorting, dividers, and striping.
//
// Players arrive in three buckets (active, practice squad, injured reserve)
// and leave as one flat, sorted list annotated with presentation flags. The
// flags are recomputed on every call and never persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// Canonical roster positions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    Kicker,
    Defense,
}

impl Position {
    /// Parse a feed position code. Unknown codes return `None` and sort
    /// after every known position.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "QB" => Some(Position::Quarterback),
            "RB" => Some(Position::RunningBack),
            "WR" => Some(Position::WideReceiver),
            "TE" => Some(Position::TightEnd),
            "PK" | "K" => Some(Position::Kicker),
            "DEF" | "DST" => Some(Position::Defense),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "PK",
            Position::Defense => "DEF",
        }
    }

    /// Deterministic ordering index for roster display.
    pub fn sort_order(&self) -> u8 {
        match self {
            Position::Quarterback => 0,
            Position::RunningBack => 1,
            Position::WideReceiver => 2,
            Position::TightEnd => 3,
            Position::Kicker => 4,
            Position::Defense => 5,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Sort rank for a raw feed position code; unknown codes rank last.
fn position_rank(code: &str) -> u8 {
    Position::from_code(code).map_or(u8::MAX, |p| p.sort_order())
}

// ---------------------------------------------------------------------------
// Players and display rows
// ---------------------------------------------------------------------------

/// Display tier a player is rostered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterTier {
    Active,
    Practice,
    Injured,
}

/// One player row as delivered by the roster feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub id: String,
    pub name: String,
    /// Feed position code; canonical ordering comes from `Position`.
    pub position: String,
    pub salary: f64,
    pub contract_years: u8,
    pub tier: RosterTier,
}

/// A roster row annotated for rendering. The flags are display-only and
/// must be recomputed whenever the underlying list changes.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub player: RosterPlayer,
    /// First row of a position run.
    pub position_divider: bool,
    /// Last row of a position run.
    pub position_divider_end: bool,
    /// First row after the active tier ends.
    pub tier_divider: bool,
    /// Alternating shade, toggled per position run within the active tier.
    pub active_stripe: bool,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Build the flat, sorted, annotated display list from the three buckets.
///
/// Each bucket is sorted by canonical position order (unknown positions
/// last), salary descending within position, then concatenated
/// active / practice / injured. Annotation passes mark position-run
/// boundaries, the tier break after the active section, and the
/// active-only stripe flag.
pub fn build_display_rows(
    active: &[RosterPlayer],
    practice: &[RosterPlayer],
    injured: &[RosterPlayer],
) -> Vec<DisplayRow> {
    let mut players = Vec::with_capacity(active.len() + practice.len() + injured.len());
    players.extend(sorted_bucket(active));
    players.extend(sorted_bucket(practice));
    players.extend(sorted_bucket(injured));

    let mut rows: Vec<DisplayRow> = players
        .into_iter()
        .map(|player| DisplayRow {
            player,
            position_divider: false,
            position_divider_end: false,
            tier_divider: false,
            active_stripe: false,
        })
        .collect();

    annotate_position_runs(&mut rows);
    annotate_tier_divider(&mut rows);
    annotate_active_stripes(&mut rows);

    rows
}

fn sorted_bucket(bucket: &[RosterPlayer]) -> Vec<RosterPlayer> {
    let mut sorted = bucket.to_vec();
    sorted.sort_by(|a, b| {
        position_rank(&a.position)
            .cmp(&position_rank(&b.position))
            .then_with(|| {
                b.salary
                    .partial_cmp(&a.salary)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    sorted
}

fn annotate_position_runs(rows: &mut [DisplayRow]) {
    let len = rows.len();
    for i in 0..len {
        let starts_run = i == 0 || rows[i - 1].player.position != rows[i].player.position;
        let ends_run = i + 1 == len || rows[i + 1].player.position != rows[i].player.position;
        rows[i].position_divider = starts_run;
        rows[i].position_divider_end = ends_run;
    }
}

fn annotate_tier_divider(rows: &mut [DisplayRow]) {
    for i in 1..rows.len() {
        if rows[i - 1].player.tier == RosterTier::Active
            && rows[i].player.tier != RosterTier::Active
        {
            rows[i].tier_divider = true;
            break;
        }
    }
}

fn annotate_active_stripes(rows: &mut [DisplayRow]) {
    let mut stripe = true;
    let mut last_position: Option<String> = None;
    for row in rows {
        if row.player.tier != RosterTier::Active {
            break;
        }
        if last_position.as_deref() != Some(row.player.position.as_str()) {
            stripe = !stripe;
            last_position = Some(row.player.position.clone());
        }
        row.active_stripe = stripe;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, position: &str, salary: f64, tier: RosterTier) -> RosterPlayer {
        RosterPlayer {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            position: position.to_string(),
            salary,
            contract_years: 2,
            tier,
        }
    }

    #[test]
    fn position_codes_round_trip() {
        for pos in [
            Position::Quarterback,
            Position::RunningBack,
            Position::WideReceiver,
            Position::TightEnd,
            Position::Kicker,
            Position::Defense,
        ] {
            assert_eq!(Position::from_code(pos.code()), Some(pos));
        }
    }

    #[test]
    fn position_aliases_and_unknowns() {
        assert_eq!(Position::from_code("K"), Some(Position::Kicker));
        assert_eq!(Position::from_code("DST"), Some(Position::Defense));
        assert_eq!(Position::from_code("qb"), Some(Position::Quarterback));
        assert_eq!(Position::from_code("LB"), None);
        assert_eq!(Position::from_code(""), None);
    }

    #[test]
    fn buckets_sort_by_position_then_salary_desc() {
        let active = vec![
            player("WR Two", "WR", 900_000.0, RosterTier::Active),
            player("QB One", "QB", 5_000_000.0, RosterTier::Active),
            player("WR One", "WR", 2_400_000.0, RosterTier::Active),
            player("RB One", "RB", 3_100_000.0, RosterTier::Active),
        ];
        let rows = build_display_rows(&active, &[], &[]);
        let names: Vec<_> = rows.iter().map(|r| r.player.name.as_str()).collect();
        assert_eq!(names, vec!["QB One", "RB One", "WR One", "WR Two"]);
    }

    #[test]
    fn unknown_positions_sort_last() {
        let active = vec![
            player("Linebacker", "LB", 9_000_000.0, RosterTier::Active),
            player("Kicker", "PK", 300_000.0, RosterTier::Active),
            player("Defense", "DEF", 500_000.0, RosterTier::Active),
        ];
        let rows = build_display_rows(&active, &[], &[]);
        let names: Vec<_> = rows.iter().map(|r| r.player.name.as_str()).collect();
        assert_eq!(names, vec!["Kicker", "Defense", "Linebacker"]);
    }

    #[test]
    fn tiers_concatenate_active_practice_injured() {
        let active = vec![player("A", "QB", 1.0, RosterTier::Active)];
        let practice = vec![player("P", "QB", 1.0, RosterTier::Practice)];
        let injured = vec![player("I", "QB", 1.0, RosterTier::Injured)];
        let rows = build_display_rows(&active, &practice, &injured);
        let names: Vec<_> = rows.iter().map(|r| r.player.name.as_str()).collect();
        assert_eq!(names, vec!["A", "P", "I"]);
    }

    #[test]
    fn position_run_boundaries() {
        let active = vec![
            player("QB One", "QB", 3.0, RosterTier::Active),
            player("QB Two", "QB", 2.0, RosterTier::Active),
            player("RB One", "RB", 4.0, RosterTier::Active),
        ];
        let rows = build_display_rows(&active, &[], &[]);
        assert!(rows[0].position_divider);
        assert!(!rows[0].position_divider_end);
        assert!(!rows[1].position_divider);
        assert!(rows[1].position_divider_end);
        assert!(rows[2].position_divider);
        assert!(rows[2].position_divider_end);
    }

    #[test]
    fn tier_divider_marks_first_non_active_row() {
        let active = vec![
            player("A1", "QB", 2.0, RosterTier::Active),
            player("A2", "RB", 2.0, RosterTier::Active),
        ];
        let practice = vec![player("P1", "WR", 1.0, RosterTier::Practice)];
        let injured = vec![player("I1", "TE", 1.0, RosterTier::Injured)];
        let rows = build_display_rows(&active, &practice, &injured);

        let dividers: Vec<_> = rows.iter().map(|r| r.tier_divider).collect();
        assert_eq!(dividers, vec![false, false, true, false]);
    }

    #[test]
    fn tier_divider_with_no_practice_squad() {
        let active = vec![player("A1", "QB", 2.0, RosterTier::Active)];
        let injured = vec![player("I1", "TE", 1.0, RosterTier::Injured)];
        let rows = build_display_rows(&active, &[], &injured);
        assert!(!rows[0].tier_divider);
        assert!(rows[1].tier_divider);
    }

    #[test]
    fn stripes_alternate_by_position_within_active_only() {
        let active = vec![
            player("QB One", "QB", 3.0, RosterTier::Active),
            player("RB One", "RB", 2.0, RosterTier::Active),
        ];
        let practice = vec![player("P1", "WR", 1.0, RosterTier::Practice)];
        let injured = vec![player("I1", "TE", 1.0, RosterTier::Injured)];
        let rows = build_display_rows(&active, &practice, &injured);

        // Two active rows, two positions: stripe values alternate.
        assert!(!rows[0].active_stripe);
        assert!(rows[1].active_stripe);
        // Practice and injured rows never stripe.
        assert!(!rows[2].active_stripe);
        assert!(!rows[3].active_stripe);
    }

    #[test]
    fn stripe_is_shared_within_a_position_run() {
        let active = vec![
            player("QB One", "QB", 3.0, RosterTier::Active),
            player("QB Two", "QB", 2.0, RosterTier::Active),
            player("RB One", "RB", 5.0, RosterTier::Active),
            player("RB Two", "RB", 4.0, RosterTier::Active),
            player("WR One", "WR", 6.0, RosterTier::Active),
        ];
        let rows = build_display_rows(&active, &[], &[]);
        let stripes: Vec<_> = rows.iter().map(|r| r.active_stripe).collect();
        assert_eq!(stripes, vec![false, false, true, true, false]);
    }

    #[test]
    fn annotations_are_idempotent() {
        let active = vec![
            player("QB One", "QB", 3.0, RosterTier::Active),
            player("RB One", "RB", 2.0, RosterTier::Active),
            player("RB Two", "RB", 1.0, RosterTier::Active),
        ];
        let practice = vec![player("P1", "WR", 1.0, RosterTier::Practice)];
        let injured = vec![player("I1", "TE", 1.0, RosterTier::Injured)];

        let first = build_display_rows(&active, &practice, &injured);

        // Re-run the pipeline on the players recovered from its own output.
        let recovered_active: Vec<_> = first
            .iter()
            .filter(|r| r.player.tier == RosterTier::Active)
            .map(|r| r.player.clone())
            .collect();
        let recovered_practice: Vec<_> = first
            .iter()
            .filter(|r| r.player.tier == RosterTier::Practice)
            .map(|r| r.player.clone())
            .collect();
        let recovered_injured: Vec<_> = first
            .iter()
            .filter(|r| r.player.tier == RosterTier::Injured)
            .map(|r| r.player.clone())
            .collect();
        let second = build_display_rows(&recovered_active, &recovered_practice, &recovered_injured);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.player.id, b.player.id);
            assert_eq!(a.position_divider, b.position_divider);
            assert_eq!(a.position_divider_end, b.position_divider_end);
            assert_eq!(a.tier_divider, b.tier_divider);
            assert_eq!(a.active_stripe, b.active_stripe);
        }
    }

    #[test]
    fn empty_buckets_yield_empty_rows() {
        assert!(build_display_rows(&[], &[], &[]).is_empty());
    }
}

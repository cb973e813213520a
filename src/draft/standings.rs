// Season standings snapshot and the reverse-record draft comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::feed::{parse_count, parse_stat};

/// One league member's seasonal record as delivered by the standings export.
///
/// Every numeric field arrives as a string and is coerced on access; a field
/// the export omits reads as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsFranchise {
    pub id: String,
    /// Overall head-to-head record.
    #[serde(default)]
    pub h2hw: Option<String>,
    #[serde(default)]
    pub h2hl: Option<String>,
    #[serde(default)]
    pub h2ht: Option<String>,
    /// Divisional record.
    #[serde(default)]
    pub divw: Option<String>,
    #[serde(default)]
    pub divl: Option<String>,
    #[serde(default)]
    pub divt: Option<String>,
    /// All-play winning percentage, as a decimal string (".5624").
    #[serde(default)]
    pub all_play_pct: Option<String>,
    /// Points for / against.
    #[serde(default)]
    pub pf: Option<String>,
    #[serde(default)]
    pub pa: Option<String>,
    /// Power rating.
    #[serde(default)]
    pub pwr: Option<String>,
    /// Victory points.
    #[serde(default)]
    pub vp: Option<String>,
}

impl StandingsFranchise {
    pub fn wins(&self) -> u32 {
        parse_count(self.h2hw.as_deref())
    }

    pub fn losses(&self) -> u32 {
        parse_count(self.h2hl.as_deref())
    }

    pub fn ties(&self) -> u32 {
        parse_count(self.h2ht.as_deref())
    }

    /// Winning percentage with ties counted as half a win. 0.0 before any
    /// games have been played.
    pub fn win_pct(&self) -> f64 {
        let games = self.wins() + self.losses() + self.ties();
        if games == 0 {
            return 0.0;
        }
        (self.wins() as f64 + 0.5 * self.ties() as f64) / games as f64
    }

    pub fn all_play_pct(&self) -> f64 {
        parse_stat(self.all_play_pct.as_deref())
    }

    pub fn points_for(&self) -> f64 {
        parse_stat(self.pf.as_deref())
    }

    pub fn points_against(&self) -> f64 {
        parse_stat(self.pa.as_deref())
    }

    pub fn power_rating(&self) -> f64 {
        parse_stat(self.pwr.as_deref())
    }

    pub fn victory_points(&self) -> f64 {
        parse_stat(self.vp.as_deref())
    }

    /// Display record, "W-L-T".
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins(), self.losses(), self.ties())
    }

    /// Display divisional record, "W-L-T".
    pub fn division_record(&self) -> String {
        format!(
            "{}-{}-{}",
            parse_count(self.divw.as_deref()),
            parse_count(self.divl.as_deref()),
            parse_count(self.divt.as_deref())
        )
    }
}

/// Worse-record-first comparator used for draft-order assignment.
///
/// Ascending winning percentage, then five cascading tiebreakers, each also
/// ascending so the weaker team sorts first: all-play percentage, points
/// for, power rating, victory points, points against. Franchises equal on
/// every field compare `Equal`; a stable sort then preserves input order,
/// which the order predictor relies on for determinism.
pub fn cmp_reverse_record(a: &StandingsFranchise, b: &StandingsFranchise) -> Ordering {
    let keys = |f: &StandingsFranchise| {
        [
            f.win_pct(),
            f.all_play_pct(),
            f.points_for(),
            f.power_rating(),
            f.victory_points(),
            f.points_against(),
        ]
    };
    for (ka, kb) in keys(a).iter().zip(keys(b).iter()) {
        match ka.partial_cmp(kb).unwrap_or(Ordering::Equal) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

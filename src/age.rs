// Player age utilities for the roster age-distribution widget.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::Serialize;

use crate::feed::parse_timestamp;

/// Compute a player's age in whole years as of `as_of`.
///
/// `birthdate_secs` is a Unix-seconds timestamp (a numeric string upstream;
/// see `age_from_birthdate_field`). A birthday not yet reached in the
/// `as_of` year counts as one year younger.
pub fn age_from_birthdate(birthdate_secs: i64, as_of: NaiveDate) -> u32 {
    let birth = match DateTime::from_timestamp(birthdate_secs, 0) {
        Some(dt) => dt.date_naive(),
        None => return 0,
    };
    let mut years = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Age from the feed's string birthdate field. Missing or unparseable
/// fields coerce to the epoch, like every other feed numeric.
pub fn age_from_birthdate_field(raw: Option<&str>, as_of: NaiveDate) -> u32 {
    age_from_birthdate(parse_timestamp(raw), as_of)
}

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

/// Age buckets for the distribution chart, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AgeBucket {
    Under25,
    TwentyFiveToTwentyNine,
    ThirtyToThirtyThree,
    ThirtyFourPlus,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 4] = [
        AgeBucket::Under25,
        AgeBucket::TwentyFiveToTwentyNine,
        AgeBucket::ThirtyToThirtyThree,
        AgeBucket::ThirtyFourPlus,
    ];

    pub fn from_age(age: u32) -> Self {
        match age {
            0..=24 => AgeBucket::Under25,
            25..=29 => AgeBucket::TwentyFiveToTwentyNine,
            30..=33 => AgeBucket::ThirtyToThirtyThree,
            _ => AgeBucket::ThirtyFourPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Under25 => "Under 25",
            AgeBucket::TwentyFiveToTwentyNine => "25-29",
            AgeBucket::ThirtyToThirtyThree => "30-33",
            AgeBucket::ThirtyFourPlus => "34+",
        }
    }

    /// Chart segment color for this bucket.
    pub fn color(&self) -> &'static str {
        match self {
            AgeBucket::Under25 => "#4ade80",
            AgeBucket::TwentyFiveToTwentyNine => "#60a5fa",
            AgeBucket::ThirtyToThirtyThree => "#facc15",
            AgeBucket::ThirtyFourPlus => "#f87171",
        }
    }
}

/// Count ages into buckets, in fixed bucket order. Empty buckets are
/// included so the chart legend stays stable.
pub fn age_distribution(ages: &[u32]) -> Vec<(AgeBucket, usize)> {
    AgeBucket::ALL
        .iter()
        .map(|&bucket| {
            let count = ages
                .iter()
                .filter(|&&age| AgeBucket::from_age(age) == bucket)
                .count();
            (bucket, count)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

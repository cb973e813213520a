// Contract-change validation: submission windows and rule checks.
//
// All times are league-local naive datetimes supplied by the caller; the
// library never reads the wall clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Submission windows
// ---------------------------------------------------------------------------

/// Which submission window, if any, a given instant falls inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionWindow {
    /// February 15 through the third Sunday of August at 20:45.
    Offseason,
    /// September 1 through the following February 14.
    InSeason,
    /// The gap between the August deadline and September 1.
    Closed,
}

impl SubmissionWindow {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionWindow::Offseason => "offseason",
            SubmissionWindow::InSeason => "in-season",
            SubmissionWindow::Closed => "closed",
        }
    }
}

/// The third Sunday of August for a given year: the first Sunday plus two
/// weeks.
pub fn third_sunday_of_august(year: i32) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(year, 8, 1).expect("August 1 is a valid date");
    let to_sunday = match first.weekday() {
        Weekday::Sun => 0,
        other => 7 - other.num_days_from_sunday() as i64,
    };
    first + Duration::days(to_sunday + 14)
}

/// Classify an instant against the two submission windows.
pub fn submission_window(now: NaiveDateTime) -> SubmissionWindow {
    let year = now.date().year();

    let offseason_open = NaiveDate::from_ymd_opt(year, 2, 15)
        .expect("February 15 is a valid date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    let offseason_close = third_sunday_of_august(year)
        .and_hms_opt(20, 45, 0)
        .expect("20:45 is a valid time");
    if now >= offseason_open && now <= offseason_close {
        return SubmissionWindow::Offseason;
    }

    let season_open = NaiveDate::from_ymd_opt(year, 9, 1)
        .expect("September 1 is a valid date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    let season_tail_close = NaiveDate::from_ymd_opt(year, 2, 14)
        .expect("February 14 is a valid date")
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid time");
    if now >= season_open || now <= season_tail_close {
        return SubmissionWindow::InSeason;
    }

    SubmissionWindow::Closed
}

// ---------------------------------------------------------------------------
// Contract-change validation
// ---------------------------------------------------------------------------

/// A proposed change to a player's contract length.
#[derive(Debug, Clone)]
pub struct ContractChangeRequest {
    pub league_id: String,
    pub franchise_id: String,
    pub player_id: String,
    pub current_years: i64,
    pub new_years: i64,
}

/// One violated rule, tagged with the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

/// The outcome of validating a contract change. Constructed fresh per call;
/// never stored.
#[derive(Debug, Clone, Serialize)]
pub struct ContractValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub window: SubmissionWindow,
}

/// Validate a proposed contract-year change.
///
/// Rules, in order: the league must be allow-listed; player and franchise
/// ids must be present; the new length must differ from the old; the new
/// length must be 1..=5 years; and the submission must land inside an open
/// window. Every violated rule is collected — validation never
/// short-circuits and never panics.
pub fn validate_contract_change(
    request: &ContractChangeRequest,
    allowed_league_ids: &[String],
    now: NaiveDateTime,
) -> ContractValidationResult {
    let mut errors = Vec::new();
    let mut fail = |field: &str, message: String| {
        errors.push(ValidationIssue {
            field: field.to_string(),
            message,
        });
    };

    if !allowed_league_ids
        .iter()
        .any(|id| id == &request.league_id)
    {
        fail(
            "league_id",
            format!(
                "league {} is not eligible for contract changes",
                request.league_id
            ),
        );
    }

    if request.player_id.trim().is_empty() {
        fail("player_id", "a player id is required".to_string());
    }
    if request.franchise_id.trim().is_empty() {
        fail("franchise_id", "a franchise id is required".to_string());
    }

    if request.new_years == request.current_years {
        fail(
            "new_years",
            "the new contract length matches the current length".to_string(),
        );
    }
    if !(1..=5).contains(&request.new_years) {
        fail(
            "new_years",
            format!(
                "contract length must be between 1 and 5 years, got {}",
                request.new_years
            ),
        );
    }

    let window = submission_window(now);
    if window == SubmissionWindow::Closed {
        fail(
            "window",
            "contract changes are closed: outside both the offseason window \
             (February 15 through the third Sunday of August at 20:45) and \
             the in-season window (September 1 through February 14)"
                .to_string(),
        );
    }

    ContractValidationResult {
        valid: errors.is_empty(),
        errors,
        window,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

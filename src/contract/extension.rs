// Extension salary calculation.
//
// Pure arithmetic, no I/O. A two-year extension is priced against the
// league-wide average salary of the top 5 players at the player's position,
// amortized over the extended contract length.

use serde::Serialize;

/// Fixed annual salary escalation applied to every contract year.
pub const ANNUAL_ESCALATION: f64 = 0.10;

/// The priced terms of a two-year extension.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExtensionSalary {
    /// Extra salary per year the extension adds.
    pub extension_value_per_year: f64,
    /// Salary per year under the extended contract.
    pub new_contract_salary: f64,
    /// Total value over the full extended length.
    pub total_new_value: f64,
}

/// Price a two-year extension.
///
/// - `extension_value_per_year = (top5_average * 2) / (current_years + 2)`
/// - `new_contract_salary = current_salary + extension_value_per_year`
/// - `total_new_value = new_contract_salary * (current_years + 2)`
///
/// `top5_average` of 0 prices a zero-value extension: the player re-signs
/// at their current salary. `current_years` of 0 is permitted; the divisor
/// is always at least 2.
pub fn calculate_extension(
    current_salary: f64,
    current_years: u8,
    top5_average: f64,
) -> ExtensionSalary {
    let new_length = current_years as f64 + 2.0;
    let extension_value_per_year = (top5_average * 2.0) / new_length;
    let new_contract_salary = current_salary + extension_value_per_year;
    ExtensionSalary {
        extension_value_per_year,
        new_contract_salary,
        total_new_value: new_contract_salary * new_length,
    }
}

/// Project a base salary `years_from_now` years into the future by
/// compounding the fixed annual escalation.
pub fn projected_salary(base: f64, years_from_now: u32) -> f64 {
    base * (1.0 + ANNUAL_ESCALATION).powi(years_from_now as i32)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

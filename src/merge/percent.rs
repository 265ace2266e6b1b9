//! Percentage helpers shared by every derived field

/// `numerator / denominator * 100`, rounded to one decimal place.
///
/// A zero denominator yields `0.0`.
pub fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round1(numerator as f64 / denominator as f64 * 100.0)
}

/// Rounds to one decimal place, exact halves to the even digit
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

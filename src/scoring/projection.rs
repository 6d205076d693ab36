/// All rate extrapolation is measured from this year.
const BASELINE_YEAR: i32 = 2020;

/// Estimate the year the aggregate reaches 100% at the current linear rate.
///
/// Returns `None` when there is no signal to extrapolate from: a non-positive
/// aggregate, or a current year at or before the baseline.
#[must_use]
pub fn projected_completion_year(agi_percent: f64, current_year: i32) -> Option<i32> {
    if agi_percent <= 0.0 {
        return None;
    }

    let elapsed_years = current_year - BASELINE_YEAR;
    if elapsed_years <= 0 {
        return None;
    }

    let rate_per_year = agi_percent / f64::from(elapsed_years);
    let years_remaining = (100.0 - agi_percent) / rate_per_year;

    #[expect(clippy::cast_possible_truncation, reason = "bounded by the percentage arithmetic")]
    Some(current_year + years_remaining.max(0.0).floor() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_progress_has_no_projection() {
        assert_eq!(projected_completion_year(0.0, 2027), None);
        assert_eq!(projected_completion_year(-3.0, 2027), None);
    }

    #[test]
    fn test_pre_baseline_year_has_no_projection() {
        assert_eq!(projected_completion_year(50.0, 2020), None);
        assert_eq!(projected_completion_year(50.0, 2019), None);
    }

    #[test]
    fn test_linear_extrapolation() {
        // 35% over 7 years is 5%/year; 65% remaining takes 13 more years.
        assert_eq!(projected_completion_year(35.0, 2027), Some(2040));
    }

    #[test]
    fn test_complete_progress_projects_current_year() {
        assert_eq!(projected_completion_year(100.0, 2027), Some(2027));
    }
}

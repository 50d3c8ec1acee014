/// Number of monthly periods in every projection.
pub const HORIZON_MONTHS: usize = 48;

/// Reshape a coverage ramp to exactly [`HORIZON_MONTHS`] entries.
///
/// Short ramps plateau at their last value, long ramps are truncated and an
/// empty ramp means no automation at all. Values are passed through untouched.
pub fn normalize_ramp(ramp: &[f64]) -> Vec<f64> {
    let Some(&last) = ramp.iter().take(HORIZON_MONTHS).last() else {
        return vec![0.0; HORIZON_MONTHS];
    };

    let mut normalized = Vec::with_capacity(HORIZON_MONTHS);
    normalized.extend(ramp.iter().take(HORIZON_MONTHS).copied());
    normalized.resize(HORIZON_MONTHS, last);
    normalized
}

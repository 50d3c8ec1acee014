use super::types::{PeriodPoint, ProjectionTrace};

/// Horizon-level metrics derived from a full-precision trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub break_even_month: Option<u32>,
    pub roi_12m: f64,
    pub roi_24m: f64,
    pub roi_36m: f64,
    pub roi_48m: f64,
    pub total_savings: f64,
    pub total_automated_cost: f64,
    pub total_manual_cost: f64,
    pub cost_savings_pct: f64,
    pub remaining_fte: f64,
    pub freed_fte: f64,
}

/// Cumulative savings recorded at `month`, clamped to the last simulated month.
pub fn cumulative_savings_at(periods: &[PeriodPoint], month: usize) -> f64 {
    month
        .min(periods.len())
        .checked_sub(1)
        .and_then(|idx| periods.get(idx))
        .map_or(0.0, |point| point.cumulative_savings)
}

/// Total automated cost spent over months `1..=month`.
pub fn cumulative_investment_at(periods: &[PeriodPoint], month: usize) -> f64 {
    periods
        .iter()
        .take(month)
        .map(|point| point.total_automated_cost)
        .sum()
}

/// Return on investment in percent; 0 while nothing has been spent.
pub fn roi_at(periods: &[PeriodPoint], month: usize) -> f64 {
    let investment = cumulative_investment_at(periods, month);
    if investment == 0.0 {
        return 0.0;
    }
    cumulative_savings_at(periods, month) / investment * 100.0
}

pub fn summarize(trace: &ProjectionTrace) -> Summary {
    let periods = trace.periods.as_slice();
    let last = periods.last();
    let total_savings = last.map_or(0.0, |p| p.cumulative_savings);
    let total_automated_cost = last.map_or(0.0, |p| p.cumulative_automated_cost);
    let total_manual_cost = last.map_or(0.0, |p| p.cumulative_manual_cost);

    let cost_savings_pct = if total_manual_cost > 0.0 {
        total_savings / total_manual_cost * 100.0
    } else {
        0.0
    };

    Summary {
        break_even_month: trace.break_even_month,
        roi_12m: roi_at(periods, 12),
        roi_24m: roi_at(periods, 24),
        roi_36m: roi_at(periods, 36),
        roi_48m: roi_at(periods, 48),
        total_savings,
        total_automated_cost,
        total_manual_cost,
        cost_savings_pct,
        remaining_fte: trace.fte_count * (1.0 - trace.peak_coverage),
        freed_fte: trace.fte_count * trace.peak_coverage,
    }
}

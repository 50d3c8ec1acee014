use rayon::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::channels::CostChannels;
use super::ramp::normalize_ramp;
use super::summary::summarize;
use super::types::{
    Assumptions, PeriodPoint, PeriodRecord, ProjectionTrace, Scenario, ScenarioOutcome,
    SimulationResult,
};

const MONTHS_PER_YEAR: u32 = 12;
const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;
const TOKENS_PER_PRICE_UNIT: f64 = 1000.0;
const CHARS_PER_PRICE_UNIT: f64 = 1000.0;
const CHARS_PER_OUTPUT_TOKEN: f64 = 4.0;

const DEFAULT_AMORTIZATION_MONTHS: u32 = 12;

const MONEY_DP: u32 = 2;
const COVERAGE_DP: u32 = 4;
const PER_CASE_DP: u32 = 6;

#[derive(Debug, Clone, Copy, Default)]
struct RunningTotals {
    cumulative_savings: f64,
    cumulative_automated_cost: f64,
    cumulative_manual_cost: f64,
    break_even_month: Option<u32>,
}

impl RunningTotals {
    fn advance(self, month: u32, savings: f64, automated_cost: f64, manual_cost: f64) -> Self {
        let cumulative_savings = self.cumulative_savings + savings;
        let break_even_month = match self.break_even_month {
            None if cumulative_savings > 0.0 => Some(month),
            found => found,
        };
        Self {
            cumulative_savings,
            cumulative_automated_cost: self.cumulative_automated_cost + automated_cost,
            cumulative_manual_cost: self.cumulative_manual_cost + manual_cost,
            break_even_month,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PerCaseCost {
    token: f64,
    voice: f64,
    image: f64,
}

impl PerCaseCost {
    fn total(self) -> f64 {
        self.token + self.voice + self.image
    }
}

#[derive(Debug, Clone, Copy)]
struct Amortization {
    per_month: f64,
    months: u32,
}

impl Amortization {
    /// A zero-month period falls back to the default schedule.
    fn new(total_cost: f64, months: u32) -> Self {
        let months = if months == 0 {
            DEFAULT_AMORTIZATION_MONTHS
        } else {
            months
        };
        Self {
            per_month: total_cost / months as f64,
            months,
        }
    }

    fn charge_for(self, month: u32) -> f64 {
        if month <= self.months {
            self.per_month
        } else {
            0.0
        }
    }
}

/// Run-wide constants shared by every period step.
struct PeriodModel<'a> {
    assumptions: &'a Assumptions,
    scenario: &'a Scenario,
    channels: CostChannels,
    fte_count: f64,
    manual_labor_cost: f64,
    amortization: Amortization,
}

impl<'a> PeriodModel<'a> {
    fn new(assumptions: &'a Assumptions, scenario: &'a Scenario) -> Self {
        let fte_count = assumptions.fte_count as f64;
        Self {
            assumptions,
            scenario,
            channels: CostChannels::resolve(&assumptions.modality),
            fte_count,
            manual_labor_cost: fte_count * assumptions.avg_fte_annual_cost / 12.0
                + assumptions.fte_monthly_overhead,
            amortization: Amortization::new(
                assumptions.implementation_cost,
                assumptions.implementation_amortization_months,
            ),
        }
    }

    fn per_case_cost(&self, complexity_factor: f64) -> PerCaseCost {
        let a = self.assumptions;
        let s = self.scenario;
        let tokens_in = a.token_density_input as f64 * complexity_factor;
        let tokens_out = a.token_density_output as f64 * complexity_factor;
        let output_cost = (tokens_out / TOKENS_PER_PRICE_UNIT) * s.llm_output_price_per_1k;

        let token = if self.channels.realtime_audio_tokens {
            (tokens_in / TOKENS_PER_PRICE_UNIT) * s.llm_input_price_per_1k + output_cost
        } else {
            let cached = tokens_in * a.caching_ratio;
            let uncached = tokens_in * (1.0 - a.caching_ratio);
            (cached / TOKENS_PER_PRICE_UNIT) * s.cached_input_price_per_1k
                + (uncached / TOKENS_PER_PRICE_UNIT) * s.llm_input_price_per_1k
                + output_cost
        };

        let mut voice = 0.0;
        if self.channels.stt {
            voice += a.avg_duration_minutes * s.stt_price_per_minute;
        }
        if self.channels.tts {
            let chars = tokens_out * CHARS_PER_OUTPUT_TOKEN;
            voice += (chars / CHARS_PER_PRICE_UNIT) * s.tts_price_per_1k_chars;
        }
        if self.channels.telephony {
            voice += a.avg_duration_minutes * s.ivr_price_per_minute;
        }

        let image = if self.channels.image {
            s.image_price_per_image
        } else {
            0.0
        };

        PerCaseCost {
            token,
            voice,
            image,
        }
    }

    fn step(&self, index: usize, coverage: f64, totals: RunningTotals) -> (PeriodPoint, RunningTotals) {
        let a = self.assumptions;
        let month = index as u32 + 1;
        let year = index as u32 / MONTHS_PER_YEAR;

        let period_volume =
            a.weekly_volume as f64 * growth_factor(a.volume_growth_rate_yoy, year) * WEEKS_PER_MONTH;
        let automated_cases = period_volume * coverage;
        let human_cases = period_volume * (1.0 - coverage);

        let per_case = self.per_case_cost(growth_factor(a.complexity_growth_rate_yoy, year));
        let variable_cost_per_case = per_case.total();

        let fixed_cost = (a.monthly_infra_cost + a.monthly_maintenance_cost)
            * growth_factor(a.inflation_rate_yoy, year)
            + self.amortization.charge_for(month);
        let total_automated_cost = variable_cost_per_case * automated_cases + fixed_cost;
        let cost_per_case = if automated_cases == 0.0 {
            0.0
        } else {
            total_automated_cost / automated_cases
        };

        let period_savings = self.manual_labor_cost - total_automated_cost;
        let totals = totals.advance(
            month,
            period_savings,
            total_automated_cost,
            self.manual_labor_cost,
        );

        let point = PeriodPoint {
            month,
            period_volume,
            automated_cases,
            human_cases,
            coverage,
            token_cost_per_case: per_case.token,
            voice_cost_per_case: per_case.voice,
            image_cost_per_case: per_case.image,
            variable_cost_per_case,
            fixed_cost,
            total_automated_cost,
            cost_per_case,
            manual_labor_cost: self.manual_labor_cost,
            period_savings,
            cumulative_savings: totals.cumulative_savings,
            cumulative_automated_cost: totals.cumulative_automated_cost,
            cumulative_manual_cost: totals.cumulative_manual_cost,
            remaining_fte: self.fte_count * (1.0 - coverage),
            freed_fte: self.fte_count * coverage,
        };
        (point, totals)
    }
}

fn growth_factor(rate: f64, year: u32) -> f64 {
    (1.0 + rate).powi(year as i32)
}

/// Run the 48-month model and keep every intermediate value at full precision.
pub fn simulate_trace(assumptions: &Assumptions, scenario: &Scenario) -> ProjectionTrace {
    let ramp = normalize_ramp(&assumptions.coverage_ramp);
    let model = PeriodModel::new(assumptions, scenario);

    let (periods, totals) = ramp.iter().enumerate().fold(
        (Vec::with_capacity(ramp.len()), RunningTotals::default()),
        |(mut periods, totals), (index, &coverage)| {
            let (point, totals) = model.step(index, coverage, totals);
            periods.push(point);
            (periods, totals)
        },
    );

    ProjectionTrace {
        periods,
        break_even_month: totals.break_even_month,
        peak_coverage: ramp.iter().copied().reduce(f64::max).unwrap_or(0.0),
        fte_count: model.fte_count,
    }
}

/// Run the model for one scenario and round the trace for presentation.
pub fn simulate(assumptions: &Assumptions, scenario: &Scenario) -> SimulationResult {
    build_result(&simulate_trace(assumptions, scenario))
}

/// Simulate every scenario of a business case, ordered by `sort_order`.
///
/// Runs are independent, so they are spread over the rayon pool; the output is
/// identical to simulating each scenario in sequence.
pub fn simulate_scenarios(assumptions: &Assumptions, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    let mut ordered = scenarios.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|scenario| scenario.sort_order);

    ordered
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            name: scenario.name.clone(),
            sort_order: scenario.sort_order,
            results: simulate(assumptions, scenario),
        })
        .collect()
}

pub fn build_result(trace: &ProjectionTrace) -> SimulationResult {
    let summary = summarize(trace);

    SimulationResult {
        periods: trace.periods.iter().map(period_record).collect(),
        break_even_month: summary.break_even_month,
        roi_12m: round_to(summary.roi_12m, MONEY_DP),
        roi_24m: round_to(summary.roi_24m, MONEY_DP),
        roi_36m: round_to(summary.roi_36m, MONEY_DP),
        roi_48m: round_to(summary.roi_48m, MONEY_DP),
        total_savings_48m: round_to(summary.total_savings, MONEY_DP),
        total_automated_cost_48m: round_to(summary.total_automated_cost, MONEY_DP),
        total_manual_cost_48m: round_to(summary.total_manual_cost, MONEY_DP),
        cost_savings_pct: round_to(summary.cost_savings_pct, MONEY_DP),
        remaining_fte: round_to(summary.remaining_fte, MONEY_DP),
        freed_fte: round_to(summary.freed_fte, MONEY_DP),
    }
}

fn period_record(point: &PeriodPoint) -> PeriodRecord {
    PeriodRecord {
        month: point.month,
        period_volume: round_to(point.period_volume, MONEY_DP),
        automated_cases: round_to(point.automated_cases, MONEY_DP),
        human_cases: round_to(point.human_cases, MONEY_DP),
        coverage: round_to(point.coverage, COVERAGE_DP),
        token_cost_per_case: round_to(point.token_cost_per_case, PER_CASE_DP),
        voice_cost_per_case: round_to(point.voice_cost_per_case, PER_CASE_DP),
        image_cost_per_case: round_to(point.image_cost_per_case, PER_CASE_DP),
        cost_per_case: round_to(point.cost_per_case, PER_CASE_DP),
        total_automated_cost: round_to(point.total_automated_cost, MONEY_DP),
        manual_labor_cost: round_to(point.manual_labor_cost, MONEY_DP),
        period_savings: round_to(point.period_savings, MONEY_DP),
        cumulative_savings: round_to(point.cumulative_savings, MONEY_DP),
        remaining_fte: round_to(point.remaining_fte, MONEY_DP),
        freed_fte: round_to(point.freed_fte, MONEY_DP),
    }
}

/// Round the exact binary value of `value`, breaking exact ties to even.
fn round_to(value: f64, places: u32) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let rounded = exact
        .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
        .to_string()
        .parse::<f64>()
        .unwrap_or(value);
    // keep -0.0 out of the serialized output
    if rounded == 0.0 { 0.0 } else { rounded }
}

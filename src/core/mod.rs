mod channels;
mod engine;
mod ramp;
mod summary;
mod types;

pub use channels::CostChannels;
pub use engine::{build_result, simulate, simulate_scenarios, simulate_trace};
pub use ramp::{HORIZON_MONTHS, normalize_ramp};
pub use summary::{Summary, cumulative_investment_at, cumulative_savings_at, roi_at, summarize};
pub use types::{
    Assumptions, Modality, PeriodPoint, PeriodRecord, ProjectionTrace, Scenario,
    ScenarioOutcome, SimulationResult,
};

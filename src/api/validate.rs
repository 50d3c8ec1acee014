use thiserror::Error;

use crate::core::{Assumptions, HORIZON_MONTHS, Scenario};

pub const MAX_SCENARIO_NAME_LEN: usize = 255;

/// Reasons a business case is rejected before it reaches the engine.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("coverageRamp cannot have more than {max} entries, got {len}")]
    RampTooLong { len: usize, max: usize },
    #[error("coverageRamp[{index}] must be between 0 and 1, got {value}")]
    RampValueOutOfRange { index: usize, value: f64 },
    #[error("{field} must be between 0 and 1")]
    FractionOutOfRange { field: &'static str },
    #[error("{field} must be a finite value >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be a finite rate above -1")]
    InvalidGrowthRate { field: &'static str },
    #[error("at least one scenario is required")]
    NoScenarios,
    #[error("scenario name cannot be empty")]
    EmptyScenarioName,
    #[error("scenario name cannot exceed {} characters", MAX_SCENARIO_NAME_LEN)]
    ScenarioNameTooLong,
}

fn is_fraction(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() || value < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(())
}

fn growth_rate(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() || value <= -1.0 {
        return Err(InputError::InvalidGrowthRate { field });
    }
    Ok(())
}

pub fn validate_assumptions(assumptions: &Assumptions) -> Result<(), InputError> {
    let ramp = &assumptions.coverage_ramp;
    if ramp.len() > HORIZON_MONTHS {
        return Err(InputError::RampTooLong {
            len: ramp.len(),
            max: HORIZON_MONTHS,
        });
    }
    if let Some((index, &value)) = ramp.iter().enumerate().find(|(_, v)| !is_fraction(**v)) {
        return Err(InputError::RampValueOutOfRange { index, value });
    }

    if !is_fraction(assumptions.caching_ratio) {
        return Err(InputError::FractionOutOfRange {
            field: "cachingRatio",
        });
    }

    for (field, value) in [
        ("avgDurationMinutes", assumptions.avg_duration_minutes),
        ("avgFteAnnualCost", assumptions.avg_fte_annual_cost),
        ("fteMonthlyOverhead", assumptions.fte_monthly_overhead),
        ("implementationCost", assumptions.implementation_cost),
        ("monthlyInfraCost", assumptions.monthly_infra_cost),
        ("monthlyMaintenanceCost", assumptions.monthly_maintenance_cost),
    ] {
        non_negative(field, value)?;
    }

    for (field, value) in [
        ("volumeGrowthRateYoy", assumptions.volume_growth_rate_yoy),
        ("complexityGrowthRateYoy", assumptions.complexity_growth_rate_yoy),
        ("inflationRateYoy", assumptions.inflation_rate_yoy),
    ] {
        growth_rate(field, value)?;
    }

    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), InputError> {
    if scenario.name.is_empty() {
        return Err(InputError::EmptyScenarioName);
    }
    if scenario.name.chars().count() > MAX_SCENARIO_NAME_LEN {
        return Err(InputError::ScenarioNameTooLong);
    }

    for (field, value) in [
        ("llmInputPricePer1k", scenario.llm_input_price_per_1k),
        ("llmOutputPricePer1k", scenario.llm_output_price_per_1k),
        ("cachedInputPricePer1k", scenario.cached_input_price_per_1k),
        ("sttPricePerMinute", scenario.stt_price_per_minute),
        ("ttsPricePer1kChars", scenario.tts_price_per_1k_chars),
        ("ivrPricePerMinute", scenario.ivr_price_per_minute),
        ("imagePricePerImage", scenario.image_price_per_image),
    ] {
        non_negative(field, value)?;
    }

    Ok(())
}

pub fn validate_scenarios(scenarios: &[Scenario]) -> Result<(), InputError> {
    if scenarios.is_empty() {
        return Err(InputError::NoScenarios);
    }
    scenarios.iter().try_for_each(validate_scenario)
}

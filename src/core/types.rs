use serde::{Deserialize, Serialize};

/// Which interaction modalities the automated process uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Modality {
    pub has_voice: bool,
    pub has_realtime_audio: bool,
    pub has_image_processing: bool,
    pub has_text_only: bool,
    pub stt_service: Option<String>,
    pub tts_service: Option<String>,
    pub llm_model: Option<String>,
    pub ivr_service: Option<String>,
}

impl Default for Modality {
    fn default() -> Self {
        Self {
            has_voice: false,
            has_realtime_audio: false,
            has_image_processing: false,
            has_text_only: true,
            stt_service: None,
            tts_service: None,
            llm_model: None,
            ivr_service: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Assumptions {
    #[serde(flatten)]
    pub modality: Modality,

    pub weekly_volume: u64,
    pub avg_duration_minutes: f64,
    pub token_density_input: u64,
    pub token_density_output: u64,
    pub caching_ratio: f64,
    pub fte_count: u32,
    pub avg_fte_annual_cost: f64,
    pub fte_monthly_overhead: f64,

    pub coverage_ramp: Vec<f64>,

    pub implementation_cost: f64,
    pub implementation_amortization_months: u32,
    pub monthly_infra_cost: f64,
    pub monthly_maintenance_cost: f64,

    pub volume_growth_rate_yoy: f64,
    pub complexity_growth_rate_yoy: f64,
    pub inflation_rate_yoy: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            modality: Modality::default(),
            weekly_volume: 0,
            avg_duration_minutes: 0.0,
            token_density_input: 0,
            token_density_output: 0,
            caching_ratio: 0.3,
            fte_count: 1,
            avg_fte_annual_cost: 0.0,
            fte_monthly_overhead: 0.0,
            coverage_ramp: Vec::new(),
            implementation_cost: 0.0,
            implementation_amortization_months: 12,
            monthly_infra_cost: 0.0,
            monthly_maintenance_cost: 0.0,
            volume_growth_rate_yoy: 0.0,
            complexity_growth_rate_yoy: 0.0,
            inflation_rate_yoy: 0.0,
        }
    }
}

/// A pricing configuration. Token prices are per 1,000 tokens, TTS per 1,000
/// characters, STT and telephony per minute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub sort_order: u32,
    pub llm_input_price_per_1k: f64,
    pub llm_output_price_per_1k: f64,
    pub cached_input_price_per_1k: f64,
    pub stt_price_per_minute: f64,
    pub tts_price_per_1k_chars: f64,
    pub ivr_price_per_minute: f64,
    pub image_price_per_image: f64,
}

/// One simulated period at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodPoint {
    pub month: u32,
    pub period_volume: f64,
    pub automated_cases: f64,
    pub human_cases: f64,
    pub coverage: f64,
    pub token_cost_per_case: f64,
    pub voice_cost_per_case: f64,
    pub image_cost_per_case: f64,
    pub variable_cost_per_case: f64,
    pub fixed_cost: f64,
    pub total_automated_cost: f64,
    pub cost_per_case: f64,
    pub manual_labor_cost: f64,
    pub period_savings: f64,
    pub cumulative_savings: f64,
    pub cumulative_automated_cost: f64,
    pub cumulative_manual_cost: f64,
    pub remaining_fte: f64,
    pub freed_fte: f64,
}

/// The un-rounded simulation trace for one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionTrace {
    pub periods: Vec<PeriodPoint>,
    pub break_even_month: Option<u32>,
    pub peak_coverage: f64,
    pub fte_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRecord {
    pub month: u32,
    pub period_volume: f64,
    pub automated_cases: f64,
    pub human_cases: f64,
    pub coverage: f64,
    pub token_cost_per_case: f64,
    pub voice_cost_per_case: f64,
    pub image_cost_per_case: f64,
    pub cost_per_case: f64,
    pub total_automated_cost: f64,
    pub manual_labor_cost: f64,
    pub period_savings: f64,
    pub cumulative_savings: f64,
    pub remaining_fte: f64,
    pub freed_fte: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub periods: Vec<PeriodRecord>,
    pub break_even_month: Option<u32>,
    pub roi_12m: f64,
    pub roi_24m: f64,
    pub roi_36m: f64,
    pub roi_48m: f64,
    pub total_savings_48m: f64,
    pub total_automated_cost_48m: f64,
    pub total_manual_cost_48m: f64,
    pub cost_savings_pct: f64,
    pub remaining_fte: f64,
    pub freed_fte: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub sort_order: u32,
    pub results: SimulationResult,
}

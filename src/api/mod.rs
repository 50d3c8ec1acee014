mod validate;

use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::core::{
    Assumptions, Scenario, ScenarioOutcome, SimulationResult, simulate, simulate_scenarios,
};

pub use validate::{
    InputError, MAX_SCENARIO_NAME_LEN, validate_assumptions, validate_scenario, validate_scenarios,
};

/// One assumptions record paired with one pricing scenario.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulateRequest {
    pub assumptions: Assumptions,
    pub scenario: Scenario,
}

/// A whole business case: shared assumptions and every sibling scenario.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculateRequest {
    pub assumptions: Assumptions,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub scenarios: Vec<ScenarioOutcome>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn simulate_request(request: &SimulateRequest) -> Result<SimulationResult, InputError> {
    validate_assumptions(&request.assumptions)?;
    validate_scenario(&request.scenario)?;
    Ok(simulate(&request.assumptions, &request.scenario))
}

pub fn calculate_request(request: &CalculateRequest) -> Result<CalculateResponse, InputError> {
    validate_assumptions(&request.assumptions)?;
    validate_scenarios(&request.scenarios)?;
    Ok(CalculateResponse {
        scenarios: simulate_scenarios(&request.assumptions, &request.scenarios),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/simulate", post(simulate_handler))
        .route("/api/calculate", post(calculate_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "business case projection API listening");

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn simulate_handler(payload: Result<Json<SimulateRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(&rejection.body_text()),
    };

    match simulate_request(&request) {
        Ok(result) => {
            debug!(
                scenario = %request.scenario.name,
                break_even_month = ?result.break_even_month,
                "simulated scenario"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => rejected(&err.to_string()),
    }
}

async fn calculate_handler(payload: Result<Json<CalculateRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejected(&rejection.body_text()),
    };

    match calculate_request(&request) {
        Ok(response) => {
            info!(scenarios = response.scenarios.len(), "calculated business case");
            json_response(StatusCode::OK, response)
        }
        Err(err) => rejected(&err.to_string()),
    }
}

fn rejected(msg: &str) -> Response {
    warn!(error = msg, "rejected projection request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn calculate_request_from_json(json: &str) -> Result<CalculateRequest, String> {
    serde_json::from_str::<CalculateRequest>(json)
        .map_err(|e| format!("Invalid API JSON payload: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HORIZON_MONTHS;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    const CONTACT_CENTER_JSON: &str = r#"{
      "assumptions": {
        "hasVoice": true,
        "hasTextOnly": false,
        "ivrService": "carrier",
        "weeklyVolume": 1200,
        "avgDurationMinutes": 5,
        "tokenDensityInput": 2000,
        "tokenDensityOutput": 500,
        "cachingRatio": 0.25,
        "fteCount": 4,
        "avgFteAnnualCost": 60000,
        "fteMonthlyOverhead": 1000,
        "coverageRamp": [0.5],
        "implementationCost": 24000,
        "implementationAmortizationMonths": 12,
        "monthlyInfraCost": 1000,
        "monthlyMaintenanceCost": 500
      },
      "scenarios": [
        {
          "name": "Premium",
          "sortOrder": 1,
          "llmInputPricePer1k": 0.01,
          "llmOutputPricePer1k": 0.03
        },
        {
          "name": "Baseline",
          "sortOrder": 0,
          "llmInputPricePer1k": 0.002,
          "llmOutputPricePer1k": 0.008,
          "cachedInputPricePer1k": 0.001,
          "sttPricePerMinute": 0.01,
          "ttsPricePer1kChars": 0.015,
          "ivrPricePerMinute": 0.02,
          "imagePricePerImage": 0.05
        }
      ]
    }"#;

    #[test]
    fn calculate_request_parses_camel_case_keys() {
        let request = calculate_request_from_json(CONTACT_CENTER_JSON).expect("json should parse");
        let assumptions = &request.assumptions;

        assert!(assumptions.modality.has_voice);
        assert!(!assumptions.modality.has_realtime_audio);
        assert_eq!(assumptions.modality.ivr_service.as_deref(), Some("carrier"));
        assert_eq!(assumptions.weekly_volume, 1_200);
        assert_eq!(assumptions.token_density_input, 2_000);
        assert_eq!(assumptions.fte_count, 4);
        assert_approx(assumptions.caching_ratio, 0.25);
        assert_eq!(assumptions.coverage_ramp, vec![0.5]);
        assert_eq!(request.scenarios.len(), 2);
        assert_approx(request.scenarios[1].tts_price_per_1k_chars, 0.015);
    }

    #[test]
    fn missing_fields_fall_back_to_business_case_defaults() {
        let request = calculate_request_from_json(r#"{"scenarios": [{"name": "Empty"}]}"#)
            .expect("json should parse");
        let assumptions = &request.assumptions;

        assert!(assumptions.modality.has_text_only);
        assert!(!assumptions.modality.has_voice);
        assert_approx(assumptions.caching_ratio, 0.3);
        assert_eq!(assumptions.fte_count, 1);
        assert_eq!(assumptions.implementation_amortization_months, 12);
        assert!(assumptions.coverage_ramp.is_empty());
        assert_approx(request.scenarios[0].llm_input_price_per_1k, 0.0);
    }

    #[test]
    fn calculate_request_orders_outcomes_and_matches_single_simulation() {
        let request = calculate_request_from_json(CONTACT_CENTER_JSON).expect("json should parse");
        let response = calculate_request(&request).expect("valid business case");

        assert_eq!(response.scenarios[0].name, "Baseline");
        assert_eq!(response.scenarios[1].name, "Premium");

        let single = simulate_request(&SimulateRequest {
            assumptions: request.assumptions.clone(),
            scenario: request.scenarios[1].clone(),
        })
        .expect("valid scenario");
        assert_eq!(response.scenarios[0].results, single);
        assert_eq!(single.periods.len(), HORIZON_MONTHS);
        assert_eq!(single.break_even_month, Some(1));
        assert_approx(single.roi_48m, 744.22);
    }

    #[test]
    fn calculate_request_rejects_empty_scenario_list() {
        let request = calculate_request_from_json(r#"{"assumptions": {"weeklyVolume": 10}}"#)
            .expect("json should parse");
        let err = calculate_request(&request).expect_err("must require scenarios");
        assert_eq!(err, InputError::NoScenarios);
    }

    #[test]
    fn simulate_request_rejects_ramp_longer_than_horizon() {
        let request = SimulateRequest {
            assumptions: Assumptions {
                coverage_ramp: vec![0.1; HORIZON_MONTHS + 2],
                ..Assumptions::default()
            },
            scenario: Scenario::default(),
        };
        let err = simulate_request(&request).expect_err("must reject long ramp");
        assert!(err.to_string().contains("coverageRamp"));
    }

    #[test]
    fn simulation_result_serialization_contains_expected_fields() {
        let request = calculate_request_from_json(CONTACT_CENTER_JSON).expect("json should parse");
        let response = calculate_request(&request).expect("valid business case");
        let json = serde_json::to_string(&response).expect("response should serialize");

        for key in [
            "\"scenarios\"",
            "\"sortOrder\"",
            "\"periods\"",
            "\"breakEvenMonth\"",
            "\"roi12m\"",
            "\"roi24m\"",
            "\"roi36m\"",
            "\"roi48m\"",
            "\"totalSavings48m\"",
            "\"totalAutomatedCost48m\"",
            "\"totalManualCost48m\"",
            "\"costSavingsPct\"",
            "\"month\"",
            "\"periodVolume\"",
            "\"automatedCases\"",
            "\"humanCases\"",
            "\"coverage\"",
            "\"tokenCostPerCase\"",
            "\"voiceCostPerCase\"",
            "\"imageCostPerCase\"",
            "\"costPerCase\"",
            "\"totalAutomatedCost\"",
            "\"manualLaborCost\"",
            "\"periodSavings\"",
            "\"cumulativeSavings\"",
            "\"remainingFte\"",
            "\"freedFte\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn unreached_break_even_serializes_as_null() {
        let request = SimulateRequest {
            assumptions: Assumptions {
                monthly_infra_cost: 100.0,
                avg_fte_annual_cost: 0.0,
                ..Assumptions::default()
            },
            scenario: Scenario {
                name: "Infra only".to_string(),
                ..Scenario::default()
            },
        };
        let result = simulate_request(&request).expect("valid request");
        let json = serde_json::to_value(&result).expect("result should serialize");
        assert!(json["breakEvenMonth"].is_null());
    }

    #[test]
    fn error_response_is_bad_request_with_no_store() {
        let response = error_response(StatusCode::BAD_REQUEST, "bad input");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let body = serde_json::from_slice(&bytes).expect("body should be JSON");
        (status, cache_control, body)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request")
    }

    #[tokio::test]
    async fn health_route_reports_ok() {
        let (status, cache_control, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn calculate_route_returns_ordered_outcomes_without_caching() {
        let (status, cache_control, body) =
            send(post_json("/api/calculate", CONTACT_CENTER_JSON)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["scenarios"][0]["name"], "Baseline");
        assert_eq!(body["scenarios"][1]["name"], "Premium");
        assert_eq!(body["scenarios"][0]["results"]["breakEvenMonth"], 1);
        assert_eq!(body["scenarios"][0]["results"]["roi48m"], 744.22);
    }

    #[tokio::test]
    async fn simulate_route_returns_single_result() {
        let payload = r#"{
          "assumptions": {"weeklyVolume": 100, "coverageRamp": [0.5]},
          "scenario": {"name": "Only", "llmInputPricePer1k": 0.01}
        }"#;
        let (status, cache_control, body) = send(post_json("/api/simulate", payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(
            body["periods"].as_array().map(Vec::len),
            Some(HORIZON_MONTHS)
        );
    }

    #[tokio::test]
    async fn malformed_json_body_is_bad_request() {
        let (status, cache_control, body) =
            send(post_json("/api/simulate", "{\"assumptions\": [")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn invalid_business_case_is_bad_request_with_field_name() {
        let payload = r#"{
          "assumptions": {"cachingRatio": 1.5},
          "scenarios": [{"name": "Baseline"}]
        }"#;
        let (status, cache_control, body) = send(post_json("/api/calculate", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        let error = body["error"].as_str().expect("error message");
        assert!(error.contains("cachingRatio"), "unexpected error: {error}");
    }

    #[tokio::test]
    async fn empty_scenario_name_is_bad_request() {
        let payload = r#"{"assumptions": {}, "scenario": {"name": ""}}"#;
        let (status, _, body) = send(post_json("/api/simulate", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "scenario name cannot be empty");
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (status, cache_control, body) = send(get("/api/unknown")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["error"], "Not found");
    }
}

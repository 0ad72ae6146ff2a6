//! Axum route handler for the Simulator API.

use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::extract::ApiJson;
use crate::models::js_value::{to_display_string, to_number};
use crate::simulator::calculator::simulate;

/// Fields are taken as raw JSON so that any value (or none) is accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default, deserialize_with = "present")]
    pub budget: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub target_population: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub policy_category: Option<Value>,
}

/// Keeps an explicit `null` as `Some(Value::Null)`; only an absent field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SimulationRequest {
    /// The category as it should appear in the response message.
    fn category_label(&self) -> String {
        to_display_string(self.policy_category.as_ref())
    }
}

/// Non-finite results serialize as `null`.
#[derive(Debug, Serialize)]
pub struct SimulationResult {
    pub result: f64,
    pub message: String,
}

/// POST /api/simulator
pub async fn handle_simulate(
    ApiJson(request): ApiJson<SimulationRequest>,
) -> Json<SimulationResult> {
    let budget = to_number(request.budget.as_ref());
    let target_population = to_number(request.target_population.as_ref());
    let category = request.policy_category.as_ref().and_then(Value::as_str);

    let result = simulate(budget, target_population, category);
    debug!("Simulation: budget={budget} population={target_population} result={result}");

    Json(SimulationResult {
        result,
        message: format!("Simulation complete for {}", request.category_label()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> SimulationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_category_label() {
        assert_eq!(
            parse(json!({"policyCategory": "public-health"})).category_label(),
            "public-health"
        );
        assert_eq!(parse(json!({})).category_label(), "undefined");
        assert_eq!(parse(json!({"policyCategory": 7})).category_label(), "7");
        assert_eq!(
            parse(json!({"policyCategory": null})).category_label(),
            "null"
        );
        assert_eq!(
            parse(json!({"policyCategory": ["public-health"]})).category_label(),
            "public-health"
        );
    }

    #[test]
    fn test_explicit_null_is_distinct_from_absent() {
        let req = parse(json!({"budget": null}));
        assert_eq!(req.budget, Some(Value::Null));
        assert_eq!(req.target_population, None);
    }

    #[test]
    fn test_infinite_result_serializes_as_null() {
        let body = serde_json::to_value(SimulationResult {
            result: f64::INFINITY,
            message: "m".to_string(),
        })
        .unwrap();
        assert_eq!(body["result"], Value::Null);
    }
}

//! Axum route handlers for the Recommendations API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::models::js_value::{is_truthy, to_display_string};
use crate::models::category::PolicyCategory;
use crate::recommendations::generator::{
    generate_all, generate_recommendations, CombinedRecommendations,
};
use crate::state::AppState;

pub const MISSING_FIELDS: &str = "Location and description are required";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Fields are taken as raw JSON; any truthy value is accepted and rendered as text.
#[derive(Debug, Default, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub location: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
}

impl RecommendationRequest {
    /// Both fields must be truthy (`""`, `0`, `false`, `null` and absent are not).
    /// Whitespace is not trimmed.
    fn require_fields(&self) -> Result<(String, String), AppError> {
        match (present(&self.location), present(&self.description)) {
            (Some(location), Some(description)) => Ok((location, description)),
            _ => Err(AppError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

fn present(field: &Option<Value>) -> Option<String> {
    let field = field.as_ref();
    is_truthy(field).then(|| to_display_string(field))
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

async fn recommend(
    state: &AppState,
    category: PolicyCategory,
    request: &RecommendationRequest,
) -> Result<Json<RecommendationResponse>, AppError> {
    let (location, description) = request.require_fields()?;

    let recommendations =
        generate_recommendations(state.generator.as_ref(), &location, &description, category)
            .await?;

    Ok(Json(RecommendationResponse { recommendations }))
}

/// POST /api/recommendations/economic-equity
pub async fn handle_economic_equity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    recommend(&state, PolicyCategory::EconomicEquity, &request).await
}

/// POST /api/recommendations/public-health
pub async fn handle_public_health(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    recommend(&state, PolicyCategory::PublicHealth, &request).await
}

/// POST /api/recommendations/disaster-preparedness
pub async fn handle_disaster_preparedness(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    recommend(&state, PolicyCategory::DisasterPreparedness, &request).await
}

/// POST /api/recommendations/all
///
/// Generates all three categories concurrently; any single failure fails the request.
pub async fn handle_all(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<CombinedRecommendations>, AppError> {
    let (location, description) = request.require_fields()?;

    let combined = generate_all(state.generator.clone(), &location, &description).await?;

    Ok(Json(combined))
}

//! Recommendation generation — single category, or all three fanned out concurrently.

use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::POLICY_ADVISOR_SYSTEM;
use crate::llm_client::{GenerationError, TextGenerator};
use crate::models::category::PolicyCategory;
use crate::recommendations::prompts::build_prompt;

/// Recommendations for every category, keyed by the category each was generated for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedRecommendations {
    pub economic_equity: String,
    pub public_health: String,
    pub disaster_preparedness: String,
}

/// Builds the prompt for `category` and asks the generator for recommendations.
pub async fn generate_recommendations(
    generator: &dyn TextGenerator,
    location: &str,
    description: &str,
    category: PolicyCategory,
) -> Result<String, GenerationError> {
    info!("Generating {category} recommendations for {location}");

    let prompt = build_prompt(location, description, category);
    generator.generate(POLICY_ADVISOR_SYSTEM, &prompt).await
}

/// Runs the three category generations as independent tasks.
///
/// Fails fast: the first error is returned and the remaining tasks are left
/// to finish in the background with their results discarded.
pub async fn generate_all(
    generator: Arc<dyn TextGenerator>,
    location: &str,
    description: &str,
) -> Result<CombinedRecommendations, AppError> {
    let spawn = |category: PolicyCategory| {
        let generator = Arc::clone(&generator);
        let location = location.to_owned();
        let description = description.to_owned();
        tokio::spawn(async move {
            generate_recommendations(generator.as_ref(), &location, &description, category).await
        })
    };

    let (economic_equity, public_health, disaster_preparedness) = tokio::try_join!(
        settle(spawn(PolicyCategory::EconomicEquity)),
        settle(spawn(PolicyCategory::PublicHealth)),
        settle(spawn(PolicyCategory::DisasterPreparedness)),
    )?;

    Ok(CombinedRecommendations {
        economic_equity,
        public_health,
        disaster_preparedness,
    })
}

async fn settle(handle: JoinHandle<Result<String, GenerationError>>) -> Result<String, AppError> {
    let outcome = handle.await.context("recommendation task failed")?;
    Ok(outcome?)
}

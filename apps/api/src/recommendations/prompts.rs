use crate::models::category::PolicyCategory;

/// Builds the user prompt asking for 3–5 titled, actionable recommendations
/// for `category`, grounded in the supplied community context.
pub fn build_prompt(location: &str, description: &str, category: PolicyCategory) -> String {
    format!(
        "Generate policy recommendations for {category} for a community located in {location} \
         with the following description: {description}.\n\
         The recommendations should be specific, actionable, and relevant to the local context.\n\
         Format the response with 3-5 specific policy recommendations, each with a title and explanation.",
        category = category.label(),
    )
}

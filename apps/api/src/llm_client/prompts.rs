// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System role sent with every generation request.
pub const POLICY_ADVISOR_SYSTEM: &str = "You are SocioMap®, an AI policy advisor \
    specialized in social equity and community resilience.";

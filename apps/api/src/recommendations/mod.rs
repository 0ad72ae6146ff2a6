// Policy recommendations: prompt construction, generation fan-out, and handlers.
// All LLM calls go through the `TextGenerator` trait — no direct OpenAI calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;

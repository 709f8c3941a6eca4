// Screening wizard: stage machine, validators, question generation and sentiment.
// All LLM calls go through llm_client; persistence goes through storage.

pub mod handlers;
pub mod machine;
pub mod policy;
pub mod prompts;
pub mod questions;
pub mod sentiment;
pub mod stage;
pub mod validators;
pub mod view;

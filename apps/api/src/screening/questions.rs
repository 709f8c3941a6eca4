//! Question Generator — builds the interview prompt and parses numbered
//! questions out of the model reply.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::prompts::{QUESTION_PREFIXES, QUESTION_PROMPT_TEMPLATE};
use crate::screening::stage::Language;

/// Upper bound on questions kept from one reply.
pub const MAX_QUESTIONS: usize = 5;

/// Text-completion capability used for question generation.
///
/// `LlmClient` is the production implementation; tests plug in canned replies.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl QuestionSource for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        LlmClient::complete(self, prompt).await
    }
}

pub fn build_question_prompt(techstack: &str, experience: &str, language: Language) -> String {
    QUESTION_PROMPT_TEMPLATE
        .replace("{language}", language.name())
        .replace("{experience}", experience)
        .replace("{techstack}", techstack)
}

/// Keeps the trimmed lines that start with `1.` to `5.`, in reply order.
/// Anything else (preamble, blank lines, closing remarks) is dropped. No padding.
pub fn parse_questions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| QUESTION_PREFIXES.iter().any(|p| line.starts_with(p)))
        .map(str::to_string)
        .collect()
}

/// Requests questions for `techstack` at the given experience level.
/// A reply with fewer than five numbered lines is returned as-is.
pub async fn generate_questions(
    source: &dyn QuestionSource,
    techstack: &str,
    experience: &str,
    language: Language,
) -> Result<Vec<String>, LlmError> {
    let prompt = build_question_prompt(techstack, experience, language);
    let raw = source.complete(&prompt).await?;
    let questions = parse_questions(&raw);

    if questions.len() < MAX_QUESTIONS {
        warn!(
            "Expected {} questions, parsed {} from the model reply",
            MAX_QUESTIONS,
            questions.len()
        );
    } else {
        info!("Generated {} interview questions", questions.len());
    }

    Ok(questions)
}

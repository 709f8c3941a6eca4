// All LLM prompt constants for the Screening module.

/// Interview question prompt, sent as a single system message.
/// Replace: {techstack}, {experience}, {language}
pub const QUESTION_PROMPT_TEMPLATE: &str = "
Generate exactly 5 concise professional interview questions.
Tech Stack: {techstack}
Experience: {experience} years
Rules:
- Only questions
- Numbered 1 to 5
- No explanations
- Language: {language}
";

/// Line prefixes that mark a question in the model reply.
pub const QUESTION_PREFIXES: [&str; 5] = ["1.", "2.", "3.", "4.", "5."];

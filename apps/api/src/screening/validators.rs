use once_cell::sync::Lazy;
use regex::Regex;

/// The only accepted e-mail domain.
const GMAIL_SUFFIX: &str = "@gmail.com";

pub const OFF_TOPIC_MESSAGE: &str = "I am here strictly for recruitment screening. \
    Please provide relevant professional information.";
pub const EMPTY_INPUT_MESSAGE: &str =
    "This field cannot be empty. Please provide the required information.";

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[0-9]{10,15}$").expect("phone pattern is a valid regex")
});

/// Accepts Gmail addresses only. Not a general syntax check.
pub fn is_valid_email(email: &str) -> bool {
    email.ends_with(GMAIL_SUFFIX)
}

/// A leading `+` followed by 10 to 15 ASCII digits and nothing else.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Content guard for free-text fields.
///
/// Returns a rejection message when the lower-cased input contains a
/// blocklisted term or when the trimmed input is empty; `None` accepts.
/// Substring matching is a heuristic and will both miss and over-match.
pub fn guard<S: AsRef<str>>(input: &str, blocklist: &[S]) -> Option<String> {
    let lowered = input.to_lowercase();
    let off_topic = blocklist.iter().any(|term| {
        let term: &str = term.as_ref();
        lowered.contains(term)
    });
    if off_topic {
        return Some(OFF_TOPIC_MESSAGE.to_string());
    }
    if input.trim().is_empty() {
        return Some(EMPTY_INPUT_MESSAGE.to_string());
    }
    None
}

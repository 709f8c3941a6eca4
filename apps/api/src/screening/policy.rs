use serde::Serialize;

/// Off-topic terms rejected by the guard unless overridden by configuration.
pub const DEFAULT_BLOCKLIST: &[&str] = &["joke", "movie", "politics", "ipl", "religion"];
pub const DEFAULT_LOW_SENTIMENT_THRESHOLD: f64 = -0.3;
pub const DEFAULT_HIGH_SENTIMENT_THRESHOLD: f64 = 0.5;

const LOW_MESSAGE: &str =
    "We appreciate your effort. If any question felt challenging, that\u{2019}s completely okay.";
const HIGH_MESSAGE: &str = "Your enthusiasm and confidence were clearly reflected in your responses.";
const NEUTRAL_MESSAGE: &str = "Thank you for your professional responses.";

/// Editorial knobs of the screening flow: the guard vocabulary and the
/// sentiment bands used for the closing message.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningPolicy {
    /// Lower-case terms; an input containing any of them is off-topic.
    pub blocklist: Vec<String>,
    pub low_sentiment_threshold: f64,
    pub high_sentiment_threshold: f64,
}

impl Default for ScreeningPolicy {
    fn default() -> Self {
        Self {
            blocklist: DEFAULT_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
            low_sentiment_threshold: DEFAULT_LOW_SENTIMENT_THRESHOLD,
            high_sentiment_threshold: DEFAULT_HIGH_SENTIMENT_THRESHOLD,
        }
    }
}

/// Sentiment band of the final screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Encouragement {
    Low,
    Neutral,
    High,
}

impl Encouragement {
    pub fn message(self) -> &'static str {
        match self {
            Encouragement::Low => LOW_MESSAGE,
            Encouragement::Neutral => NEUTRAL_MESSAGE,
            Encouragement::High => HIGH_MESSAGE,
        }
    }
}

impl ScreeningPolicy {
    /// Both thresholds are exclusive: a score equal to either one is neutral.
    pub fn encouragement(&self, avg_sentiment: f64) -> Encouragement {
        if avg_sentiment < self.low_sentiment_threshold {
            Encouragement::Low
        } else if avg_sentiment > self.high_sentiment_threshold {
            Encouragement::High
        } else {
            Encouragement::Neutral
        }
    }
}

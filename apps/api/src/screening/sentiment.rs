//! Sentiment scoring: pluggable, trait-based polarity scorer for free-text answers.
//!
//! Default: `VaderSentimentScorer` (VADER lexicon, deterministic, no network).
//! `StageMachine` holds an `Arc<dyn SentimentScorer>`, so another backend can
//! be swapped in at startup without touching the machine.

use vader_sentiment::SentimentIntensityAnalyzer;

/// Maps a text to a polarity in [-1, 1]: negative below zero, positive above.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;
}

/// Mean polarity over the answers whose trimmed text is non-empty.
/// Blank answers are skipped, not counted as zero. No scored answers → 0.0.
pub fn aggregate_sentiment<S: AsRef<str>>(scorer: &dyn SentimentScorer, answers: &[S]) -> f64 {
    let mut scores = Vec::with_capacity(answers.len());
    for answer in answers {
        let answer: &str = answer.as_ref();
        if !answer.trim().is_empty() {
            scores.push(scorer.score(answer));
        }
    }

    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Polarity from the VADER lexicon: the `compound` score, already
/// normalized to [-1, 1]. Text with no sentiment-bearing words scores 0.0.
#[derive(Debug, Default, Clone, Copy)]
pub struct VaderSentimentScorer;

impl SentimentScorer for VaderSentimentScorer {
    fn score(&self, text: &str) -> f64 {
        let analyzer = SentimentIntensityAnalyzer::new();
        let scores = analyzer.polarity_scores(text);
        scores
            .get("compound")
            .copied()
            .unwrap_or(0.0)
            .clamp(-1.0, 1.0)
    }
}

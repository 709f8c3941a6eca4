//! Screen view — what the renderer needs to draw the current stage.

use serde::Serialize;
use uuid::Uuid;

use crate::models::candidate::CandidateField;
use crate::screening::machine::Session;
use crate::screening::policy::{Encouragement, ScreeningPolicy};
use crate::screening::stage::{Language, Stage, BACK_LABEL, TOTAL_STAGES};

const CLOSING_MESSAGE: &str = "Our recruitment team will review your answers carefully.";

#[derive(Debug, Clone, Serialize)]
pub struct Buttons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward: Option<&'static str>,
}

/// One line of the sidebar summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Completion {
    pub headline: &'static str,
    pub band: Encouragement,
    pub encouragement: &'static str,
    pub closing: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScreenView {
    pub session_id: Uuid,
    pub stage: u8,
    pub total_stages: u8,
    /// stage / total, capped at 1.0
    pub progress: f64,
    pub language: Language,
    pub title: &'static str,
    pub prompt: &'static str,
    /// Previously stored value of this stage's field, for re-editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefill: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
    pub buttons: Buttons,
    pub summary: Vec<SummaryItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<Completion>,
}

impl ScreenView {
    pub fn render(session: &Session, policy: &ScreeningPolicy) -> Self {
        let stage = session.stage();
        let language = session.language();
        let translations = language.translations();

        let back = match stage {
            Stage::Name | Stage::Complete => None,
            _ => Some(BACK_LABEL),
        };

        let completion = (stage == Stage::Complete).then(|| {
            let band = policy.encouragement(session.record().avg_sentiment.unwrap_or(0.0));
            Completion {
                headline: translations.complete,
                band,
                encouragement: band.message(),
                closing: CLOSING_MESSAGE,
            }
        });

        let questions = if stage == Stage::Answers {
            session.questions().to_vec()
        } else {
            Vec::new()
        };

        ScreenView {
            session_id: session.id(),
            stage: stage.number(),
            total_stages: TOTAL_STAGES,
            progress: (f64::from(stage.number()) / f64::from(TOTAL_STAGES)).min(1.0),
            language,
            title: translations.title,
            prompt: stage.prompt(),
            prefill: stage
                .field()
                .and_then(|field| session.record().get(field))
                .map(str::to_string),
            questions,
            buttons: Buttons {
                back,
                forward: language.forward_label(stage),
            },
            summary: summarize(session),
            completion,
        }
    }
}

/// Captured fields in display order. Answers are left out; the sentiment
/// average is shown once scored.
fn summarize(session: &Session) -> Vec<SummaryItem> {
    let record = session.record();
    if record.is_empty() {
        return Vec::new();
    }
    let mut items: Vec<SummaryItem> = CandidateField::ALL
        .iter()
        .filter_map(|&field| {
            record.get(field).map(|value| SummaryItem {
                label: field.label(),
                value: value.to_string(),
            })
        })
        .collect();

    if let Some(avg) = record.avg_sentiment {
        items.push(SummaryItem {
            label: "Avg_sentiment".to_string(),
            value: avg.to_string(),
        });
    }
    items
}

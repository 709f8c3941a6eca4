//! Axum route handlers for the Screening API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::screening::machine::{StageInput, Transition};
use crate::screening::stage::Language;
use crate::screening::view::ScreenView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body of a forward transition: `value` for stages 1–7, `answers` for stage 8.
#[derive(Debug, Deserialize)]
pub struct NextRequest {
    pub value: Option<String>,
    pub answers: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub language: Language,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Advanced,
    Retreated,
    Rejected,
}

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub screen: ScreenView,
}

#[derive(Debug, Serialize)]
pub struct RecordCountResponse {
    pub records: usize,
}

impl NextRequest {
    fn into_input(self) -> Result<StageInput, AppError> {
        match (self.value, self.answers) {
            (Some(value), None) => Ok(StageInput::Text(value)),
            (None, Some(answers)) => Ok(StageInput::Answers(answers)),
            _ => Err(AppError::Validation(
                "provide exactly one of `value` or `answers`".to_string(),
            )),
        }
    }
}

fn transition_response(transition: Transition, screen: ScreenView) -> TransitionResponse {
    let (outcome, message) = match transition {
        Transition::Advanced { .. } => (Outcome::Advanced, None),
        Transition::Retreated { .. } => (Outcome::Retreated, None),
        Transition::Rejected { message, .. } => (Outcome::Rejected, Some(message)),
    };
    TransitionResponse {
        outcome,
        message,
        screen,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/screening
pub async fn handle_get_screen(State(state): State<AppState>) -> Json<ScreenView> {
    let session = state.session.lock().await;
    Json(ScreenView::render(&session, state.machine.policy()))
}

/// POST /api/v1/screening/next
///
/// Validation rejections are a normal outcome (200 with `outcome = "rejected"`);
/// the session stays on its stage.
pub async fn handle_next(
    State(state): State<AppState>,
    Json(request): Json<NextRequest>,
) -> Result<Json<TransitionResponse>, AppError> {
    let input = request.into_input()?;
    let mut session = state.session.lock().await;
    let transition = state.machine.advance(&mut session, input).await?;
    let screen = ScreenView::render(&session, state.machine.policy());
    Ok(Json(transition_response(transition, screen)))
}

/// POST /api/v1/screening/back
pub async fn handle_back(
    State(state): State<AppState>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = state.session.lock().await;
    let transition = state.machine.back(&mut session)?;
    let screen = ScreenView::render(&session, state.machine.policy());
    Ok(Json(transition_response(transition, screen)))
}

/// PUT /api/v1/screening/language
pub async fn handle_set_language(
    State(state): State<AppState>,
    Json(request): Json<LanguageRequest>,
) -> Json<ScreenView> {
    let mut session = state.session.lock().await;
    state.machine.set_language(&mut session, request.language);
    Json(ScreenView::render(&session, state.machine.policy()))
}

/// POST /api/v1/screening/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<ScreenView> {
    let mut session = state.session.lock().await;
    state.machine.reset(&mut session);
    Json(ScreenView::render(&session, state.machine.policy()))
}

/// GET /api/v1/records/count
///
/// Number of anonymized records in the store, for operators.
pub async fn handle_record_count(
    State(state): State<AppState>,
) -> Result<Json<RecordCountResponse>, AppError> {
    let store = state.store.clone();
    let records = tokio::task::spawn_blocking(move || store.count())
        .await
        .map_err(|e| AppError::Storage(format!("spawn_blocking failed in record count: {e}")))?
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(Json(RecordCountResponse { records }))
}

//! Stage Machine — drives one candidate through the nine screening stages.
//!
//! The machine is stateless apart from its collaborators; all progress lives
//! in a `Session` owned by the caller and passed in by `&mut` on every call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::llm_client::LlmError;
use crate::models::candidate::{CandidateField, CandidateRecord};
use crate::screening::policy::ScreeningPolicy;
use crate::screening::questions::{generate_questions, QuestionSource};
use crate::screening::sentiment::{aggregate_sentiment, SentimentScorer};
use crate::screening::stage::{Language, Stage};
use crate::screening::validators::{guard, is_valid_email, is_valid_phone};
use crate::storage::anonymize::anonymize;
use crate::storage::{CandidateStore, StoreError};

pub const INVALID_EMAIL_MESSAGE: &str = "Invalid Gmail address";
pub const INVALID_PHONE_MESSAGE: &str = "Invalid phone format";

/// Experience level assumed when generating questions before stage 4 was filled.
const DEFAULT_EXPERIENCE: &str = "1";

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("cannot {action} from stage {stage}")]
    InvalidTransition { stage: u8, action: &'static str },

    #[error("stage {stage} expects {expected}")]
    UnexpectedInput { stage: u8, expected: &'static str },

    #[error("received {got} answers for {expected} questions")]
    TooManyAnswers { expected: usize, got: usize },

    #[error("question generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("could not persist candidate record: {0}")]
    Persistence(#[from] StoreError),
}

/// Input submitted with a forward transition.
#[derive(Debug, Clone, PartialEq)]
pub enum StageInput {
    /// The single value of stages 1–7.
    Text(String),
    /// One answer per generated question, stage 8 only.
    Answers(Vec<String>),
}

/// Outcome of a transition that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced { from: Stage, to: Stage },
    Retreated { from: Stage, to: Stage },
    /// Validation refused the value; nothing was written.
    Rejected { stage: Stage, message: String },
}

/// Everything one wizard run accumulates.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    stage: Stage,
    record: CandidateRecord,
    questions: Vec<String>,
    language: Language,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            id: Uuid::new_v4(),
            stage: Stage::Name,
            record: CandidateRecord::default(),
            questions: Vec::new(),
            language,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn record(&self) -> &CandidateRecord {
        &self.record
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Orchestrates validation, question generation, scoring and persistence.
#[derive(Clone)]
pub struct StageMachine {
    policy: ScreeningPolicy,
    question_source: Arc<dyn QuestionSource>,
    scorer: Arc<dyn SentimentScorer>,
    store: Arc<dyn CandidateStore>,
}

impl StageMachine {
    pub fn new(
        policy: ScreeningPolicy,
        question_source: Arc<dyn QuestionSource>,
        scorer: Arc<dyn SentimentScorer>,
        store: Arc<dyn CandidateStore>,
    ) -> Self {
        Self {
            policy,
            question_source,
            scorer,
            store,
        }
    }

    pub fn policy(&self) -> &ScreeningPolicy {
        &self.policy
    }

    /// Forward transition from the session's current stage.
    ///
    /// A rejected value leaves the session untouched. Generation and
    /// persistence failures leave the session on its current stage with the
    /// already-collected fields intact, so the same call can be retried.
    pub async fn advance(
        &self,
        session: &mut Session,
        input: StageInput,
    ) -> Result<Transition, ScreeningError> {
        let stage = session.stage;
        match (stage, input) {
            (Stage::Complete, _) => Err(ScreeningError::InvalidTransition {
                stage: stage.number(),
                action: "advance",
            }),
            (Stage::Answers, StageInput::Answers(answers)) => {
                self.submit_answers(session, answers).await
            }
            (Stage::Answers, StageInput::Text(_)) => Err(ScreeningError::UnexpectedInput {
                stage: stage.number(),
                expected: "a list of answers",
            }),
            (_, StageInput::Answers(_)) => Err(ScreeningError::UnexpectedInput {
                stage: stage.number(),
                expected: "a single text value",
            }),
            (Stage::TechStack, StageInput::Text(techstack)) => {
                self.submit_techstack(session, techstack).await
            }
            (_, StageInput::Text(value)) => Ok(self.submit_text(session, value)),
        }
    }

    /// Moves one stage back. Stored fields are kept for re-editing.
    /// Not available on the first stage or once the screening is complete.
    pub fn back(&self, session: &mut Session) -> Result<Transition, ScreeningError> {
        let from = session.stage;
        let to = match from {
            Stage::Name | Stage::Complete => None,
            other => other.previous(),
        }
        .ok_or(ScreeningError::InvalidTransition {
            stage: from.number(),
            action: "go back",
        })?;

        session.stage = to;
        info!(
            "Session {} moved back from stage {} to {}",
            session.id,
            from.number(),
            to.number()
        );
        Ok(Transition::Retreated { from, to })
    }

    /// Starts over with an empty record, keeping the selected language.
    pub fn reset(&self, session: &mut Session) {
        let previous = session.id;
        *session = Session::new(session.language);
        info!("Session {} replaced by {}", previous, session.id);
    }

    pub fn set_language(&self, session: &mut Session, language: Language) {
        session.language = language;
        debug!("Session {} language set to {:?}", session.id, language);
    }

    /// Stages 1–6: validate, then store and advance.
    fn submit_text(&self, session: &mut Session, value: String) -> Transition {
        let stage = session.stage;
        if let Some(message) = self.rejection(stage, &value) {
            debug!(
                "Session {} stage {} rejected input: {}",
                session.id,
                stage.number(),
                message
            );
            return Transition::Rejected { stage, message };
        }

        if let Some(field) = stage.field() {
            session.record.set(field, value);
        }
        self.move_forward(session)
    }

    /// Email and phone use their format checks only; the free-text stages use the guard.
    fn rejection(&self, stage: Stage, value: &str) -> Option<String> {
        match stage {
            Stage::Email if !is_valid_email(value) => Some(INVALID_EMAIL_MESSAGE.to_string()),
            Stage::Phone if !is_valid_phone(value) => Some(INVALID_PHONE_MESSAGE.to_string()),
            Stage::Email | Stage::Phone => None,
            Stage::Name | Stage::Experience | Stage::Position | Stage::Location => {
                guard(value, &self.policy.blocklist)
            }
            Stage::TechStack | Stage::Answers | Stage::Complete => None,
        }
    }

    /// Stage 7: store the tech stack, then replace the question set.
    async fn submit_techstack(
        &self,
        session: &mut Session,
        techstack: String,
    ) -> Result<Transition, ScreeningError> {
        session.record.set(CandidateField::TechStack, techstack.clone());
        let experience = session
            .record
            .get(CandidateField::Experience)
            .unwrap_or(DEFAULT_EXPERIENCE)
            .to_string();

        let questions = generate_questions(
            self.question_source.as_ref(),
            &techstack,
            &experience,
            session.language,
        )
        .await
        .map_err(|e| {
            warn!("Session {} question generation failed: {}", session.id, e);
            e
        })?;

        session.questions = questions;
        Ok(self.move_forward(session))
    }

    /// Stage 8: score, record, anonymize and append, then finish.
    async fn submit_answers(
        &self,
        session: &mut Session,
        mut answers: Vec<String>,
    ) -> Result<Transition, ScreeningError> {
        let expected = session.questions.len();
        if answers.len() > expected {
            return Err(ScreeningError::TooManyAnswers {
                expected,
                got: answers.len(),
            });
        }
        answers.resize(expected, String::new());

        let avg_sentiment = round_to_hundredths(aggregate_sentiment(self.scorer.as_ref(), &answers));
        session.record.technical_answers = Some(answers);
        session.record.avg_sentiment = Some(avg_sentiment);

        let anonymized = anonymize(&session.record);
        let store = Arc::clone(&self.store);
        let persisted = tokio::task::spawn_blocking(move || store.persist(&anonymized))
            .await
            .map_err(StoreError::from)
            .and_then(|result| result);
        if let Err(e) = persisted {
            error!("Session {} could not persist record: {}", session.id, e);
            return Err(e.into());
        }

        info!(
            "Session {} persisted screening record (avg_sentiment={})",
            session.id, avg_sentiment
        );
        Ok(self.move_forward(session))
    }

    fn move_forward(&self, session: &mut Session) -> Transition {
        let from = session.stage;
        // Only called below stage 9, which always has a successor.
        let to = from.next().unwrap_or(Stage::Complete);
        session.stage = to;
        info!(
            "Session {} advanced from stage {} to {}",
            session.id,
            from.number(),
            to.number()
        );
        Transition::Advanced { from, to }
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::models::candidate::AnonymizedRecord;
    use crate::storage::anonymize::sha256_hex;

    struct CannedSource {
        reply: Result<String, u16>,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl CannedSource {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(String::new()),
            }
        }
    }

    #[async_trait]
    impl QuestionSource for CannedSource {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "unavailable".to_string(),
                }),
            }
        }
    }

    /// "great experience" → 0.8, "meh" → 0.1, anything else → -0.5.
    struct FixedScorer;

    impl SentimentScorer for FixedScorer {
        fn score(&self, text: &str) -> f64 {
            match text {
                "great experience" => 0.8,
                "meh" => 0.1,
                _ => -0.5,
            }
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<Vec<AnonymizedRecord>>,
        fail: bool,
    }

    impl CandidateStore for MemoryStore {
        fn persist(&self, record: &AnonymizedRecord) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Io {
                    path: "memory".to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    const FIVE_QUESTIONS: &str =
        "Here are your questions:\n1. Q1?\n2. Q2?\n3. Q3?\n4. Q4?\n5. Q5?\nGood luck!";

    fn machine_with(
        source: Arc<CannedSource>,
        store: Arc<MemoryStore>,
    ) -> StageMachine {
        StageMachine::new(
            ScreeningPolicy::default(),
            source,
            Arc::new(FixedScorer),
            store,
        )
    }

    fn machine() -> StageMachine {
        machine_with(
            Arc::new(CannedSource::replying(FIVE_QUESTIONS)),
            Arc::new(MemoryStore::default()),
        )
    }

    fn text(value: &str) -> StageInput {
        StageInput::Text(value.to_string())
    }

    /// Drives a fresh session through stages 1–6 with valid values.
    async fn session_at_techstack(machine: &StageMachine) -> Session {
        let mut session = Session::default();
        for value in [
            "John Doe",
            "john@gmail.com",
            "+11234567890",
            "3",
            "Backend Engineer",
            "Chennai",
        ] {
            let t = machine.advance(&mut session, text(value)).await.unwrap();
            assert!(matches!(t, Transition::Advanced { .. }), "{value}: {t:?}");
        }
        assert_eq!(session.stage(), Stage::TechStack);
        session
    }

    #[tokio::test]
    async fn test_valid_name_advances_and_stores() {
        let machine = machine();
        let mut session = Session::default();
        let t = machine.advance(&mut session, text("John Doe")).await.unwrap();
        assert_eq!(
            t,
            Transition::Advanced {
                from: Stage::Name,
                to: Stage::Email
            }
        );
        assert_eq!(session.stage().number(), 2);
        assert_eq!(session.record().name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_invalid_email_stays_and_does_not_store() {
        let machine = machine();
        let mut session = Session::default();
        machine.advance(&mut session, text("John Doe")).await.unwrap();
        let t = machine
            .advance(&mut session, text("john@yahoo.com"))
            .await
            .unwrap();
        assert_eq!(
            t,
            Transition::Rejected {
                stage: Stage::Email,
                message: INVALID_EMAIL_MESSAGE.to_string()
            }
        );
        assert_eq!(session.stage().number(), 2);
        assert_eq!(session.record().email, None);
    }

    #[tokio::test]
    async fn test_guard_rejections_on_free_text_stages() {
        let machine = machine();
        let mut session = Session::default();
        let t = machine.advance(&mut session, text("   ")).await.unwrap();
        assert!(matches!(t, Transition::Rejected { stage: Stage::Name, .. }));
        assert_eq!(session.record().name, None);

        let t = machine
            .advance(&mut session, text("tell me a joke"))
            .await
            .unwrap();
        assert!(matches!(t, Transition::Rejected { stage: Stage::Name, .. }));
        assert_eq!(session.stage(), Stage::Name);
    }

    #[tokio::test]
    async fn test_guard_not_applied_to_email_and_phone() {
        let machine = machine();
        let mut session = Session::default();
        machine.advance(&mut session, text("John Doe")).await.unwrap();
        // "movie" is blocklisted, but the email check alone decides
        let t = machine
            .advance(&mut session, text("moviebuff@gmail.com"))
            .await
            .unwrap();
        assert!(matches!(t, Transition::Advanced { to: Stage::Phone, .. }));

        let t = machine.advance(&mut session, text("+91 98765")).await.unwrap();
        assert_eq!(
            t,
            Transition::Rejected {
                stage: Stage::Phone,
                message: INVALID_PHONE_MESSAGE.to_string()
            }
        );
        assert_eq!(session.record().phone, None);
    }

    #[tokio::test]
    async fn test_back_then_resubmit_overwrites_only_that_field() {
        let machine = machine();
        let mut session = Session::default();
        machine.advance(&mut session, text("John Doe")).await.unwrap();
        machine
            .advance(&mut session, text("john@gmail.com"))
            .await
            .unwrap();
        assert_eq!(session.stage(), Stage::Phone);

        let t = machine.back(&mut session).unwrap();
        assert_eq!(
            t,
            Transition::Retreated {
                from: Stage::Phone,
                to: Stage::Email
            }
        );
        // stored value is kept for pre-filling
        assert_eq!(session.record().email.as_deref(), Some("john@gmail.com"));

        machine
            .advance(&mut session, text("jdoe@gmail.com"))
            .await
            .unwrap();
        assert_eq!(session.stage(), Stage::Phone);
        assert_eq!(session.record().email.as_deref(), Some("jdoe@gmail.com"));
        assert_eq!(session.record().name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn test_back_not_allowed_on_first_stage() {
        let machine = machine();
        let mut session = Session::default();
        let err = machine.back(&mut session).unwrap_err();
        assert!(matches!(
            err,
            ScreeningError::InvalidTransition { stage: 1, .. }
        ));
        assert_eq!(session.stage(), Stage::Name);
    }

    #[tokio::test]
    async fn test_techstack_generates_questions_with_experience() {
        let source = Arc::new(CannedSource::replying(FIVE_QUESTIONS));
        let machine = machine_with(source.clone(), Arc::new(MemoryStore::default()));
        let mut session = session_at_techstack(&machine).await;
        machine.set_language(&mut session, Language::Tamil);

        let t = machine
            .advance(&mut session, text("Rust, PostgreSQL"))
            .await
            .unwrap();
        assert!(matches!(t, Transition::Advanced { to: Stage::Answers, .. }));
        assert_eq!(session.questions().len(), 5);
        assert_eq!(session.questions()[0], "1. Q1?");
        assert_eq!(session.record().techstack.as_deref(), Some("Rust, PostgreSQL"));

        let prompt = source.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("Tech Stack: Rust, PostgreSQL"));
        assert!(prompt.contains("Experience: 3 years"));
        assert!(prompt.contains("Language: Tamil"));
    }

    #[tokio::test]
    async fn test_techstack_without_experience_defaults_to_one_year() {
        let source = Arc::new(CannedSource::replying("1. Only?"));
        let machine = machine_with(source.clone(), Arc::new(MemoryStore::default()));
        let mut session = Session::default();
        session.stage = Stage::TechStack;

        machine.advance(&mut session, text("Go")).await.unwrap();
        let prompt = source.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("Experience: 1 years"));
    }

    #[tokio::test]
    async fn test_regeneration_replaces_question_set() {
        let machine = machine();
        let mut session = session_at_techstack(&machine).await;
        machine.advance(&mut session, text("Rust")).await.unwrap();
        assert_eq!(session.questions().len(), 5);

        machine.back(&mut session).unwrap();
        let short = machine_with(
            Arc::new(CannedSource::replying("1. Fresh?\n2. Also fresh?")),
            Arc::new(MemoryStore::default()),
        );
        short.advance(&mut session, text("Go")).await.unwrap();
        assert_eq!(session.questions(), ["1. Fresh?", "2. Also fresh?"]);
    }

    #[tokio::test]
    async fn test_generation_failure_keeps_stage_and_techstack() {
        let source = Arc::new(CannedSource::failing(503));
        let machine = machine_with(source.clone(), Arc::new(MemoryStore::default()));
        let mut session = session_at_techstack(&machine).await;

        let err = machine
            .advance(&mut session, text("Rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScreeningError::Generation(_)));
        assert_eq!(session.stage(), Stage::TechStack);
        assert_eq!(session.record().techstack.as_deref(), Some("Rust"));
        assert_eq!(session.record().name.as_deref(), Some("John Doe"));
        assert!(session.questions().is_empty());

        // resubmitting retries the call
        let _ = machine.advance(&mut session, text("Rust")).await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_answers_scored_persisted_and_completed() {
        let store = Arc::new(MemoryStore::default());
        let machine = machine_with(
            Arc::new(CannedSource::replying("1. A?\n2. B?\n3. C?")),
            store.clone(),
        );
        let mut session = session_at_techstack(&machine).await;
        machine.advance(&mut session, text("Rust")).await.unwrap();

        let answers = vec![
            String::new(),
            "great experience".to_string(),
            String::new(),
        ];
        let t = machine
            .advance(&mut session, StageInput::Answers(answers.clone()))
            .await
            .unwrap();
        assert!(matches!(t, Transition::Advanced { to: Stage::Complete, .. }));

        let avg = session.record().avg_sentiment.unwrap();
        assert!((avg - 0.8).abs() < 1e-9, "avg was {avg}");
        assert_eq!(session.record().technical_answers.as_ref(), Some(&answers));

        let stored = store.records.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email.as_deref(), Some(sha256_hex("john@gmail.com").as_str()));
        assert_eq!(stored[0].phone.as_deref(), Some(sha256_hex("+11234567890").as_str()));
        assert_eq!(stored[0].name.as_deref(), Some("John Doe"));
        // the live record keeps the clear-text contact details
        assert_eq!(session.record().email.as_deref(), Some("john@gmail.com"));
    }

    #[tokio::test]
    async fn test_average_is_rounded_to_hundredths() {
        let machine = machine_with(
            Arc::new(CannedSource::replying("1. A?\n2. B?\n3. C?")),
            Arc::new(MemoryStore::default()),
        );
        let mut session = Session::default();
        session.stage = Stage::TechStack;
        machine.advance(&mut session, text("Rust")).await.unwrap();

        // (0.8 + 0.1 + 0.1) / 3 = 0.333…
        let answers = vec!["great experience".into(), "meh".into(), "meh".into()];
        machine
            .advance(&mut session, StageInput::Answers(answers))
            .await
            .unwrap();
        assert_eq!(session.record().avg_sentiment, Some(0.33));
    }

    #[tokio::test]
    async fn test_zero_questions_submit_with_zero_answers() {
        let store = Arc::new(MemoryStore::default());
        let machine = machine_with(
            Arc::new(CannedSource::replying("Sorry, I can't help with that.")),
            store.clone(),
        );
        let mut session = session_at_techstack(&machine).await;
        machine.advance(&mut session, text("COBOL")).await.unwrap();
        assert_eq!(session.stage(), Stage::Answers);
        assert!(session.questions().is_empty());

        machine
            .advance(&mut session, StageInput::Answers(Vec::new()))
            .await
            .unwrap();
        assert_eq!(session.stage(), Stage::Complete);
        assert_eq!(session.record().avg_sentiment, Some(0.0));
        assert_eq!(store.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_answers_are_padded_blank() {
        let machine = machine();
        let mut session = Session::default();
        session.stage = Stage::TechStack;
        machine.advance(&mut session, text("Rust")).await.unwrap();

        machine
            .advance(&mut session, StageInput::Answers(vec!["meh".into()]))
            .await
            .unwrap();
        let answers = session.record().technical_answers.clone().unwrap();
        assert_eq!(answers.len(), 5);
        assert_eq!(answers[0], "meh");
        assert!(answers[1..].iter().all(String::is_empty));
        assert_eq!(session.record().avg_sentiment, Some(0.1));
    }

    #[tokio::test]
    async fn test_too_many_answers_rejected() {
        let machine = machine_with(
            Arc::new(CannedSource::replying("1. Only?")),
            Arc::new(MemoryStore::default()),
        );
        let mut session = Session::default();
        session.stage = Stage::TechStack;
        machine.advance(&mut session, text("Rust")).await.unwrap();

        let err = machine
            .advance(
                &mut session,
                StageInput::Answers(vec!["a".into(), "b".into()]),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ScreeningError::TooManyAnswers {
                expected: 1,
                got: 2
            }
        ));
        assert_eq!(session.stage(), Stage::Answers);
        assert_eq!(session.record().technical_answers, None);
    }

    #[tokio::test]
    async fn test_persistence_failure_keeps_answers_and_stage() {
        let store = Arc::new(MemoryStore {
            fail: true,
            ..MemoryStore::default()
        });
        let machine = machine_with(Arc::new(CannedSource::replying("1. A?")), store);
        let mut session = Session::default();
        session.stage = Stage::TechStack;
        machine.advance(&mut session, text("Rust")).await.unwrap();

        let err = machine
            .advance(
                &mut session,
                StageInput::Answers(vec!["great experience".into()]),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ScreeningError::Persistence(_)));
        assert_eq!(session.stage(), Stage::Answers);
        assert_eq!(
            session.record().technical_answers,
            Some(vec!["great experience".to_string()])
        );
    }

    /// Remembers which thread ran `persist`.
    #[derive(Default)]
    struct ThreadRecordingStore {
        thread: Mutex<Option<std::thread::ThreadId>>,
    }

    impl CandidateStore for ThreadRecordingStore {
        fn persist(&self, _record: &AnonymizedRecord) -> Result<(), StoreError> {
            *self.thread.lock().unwrap() = Some(std::thread::current().id());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_persist_runs_on_blocking_pool() {
        let store = Arc::new(ThreadRecordingStore::default());
        let machine = StageMachine::new(
            ScreeningPolicy::default(),
            Arc::new(CannedSource::replying("1. A?")),
            Arc::new(FixedScorer),
            store.clone(),
        );
        let mut session = Session::default();
        session.stage = Stage::TechStack;
        machine.advance(&mut session, text("Rust")).await.unwrap();
        machine
            .advance(&mut session, StageInput::Answers(vec!["meh".into()]))
            .await
            .unwrap();

        assert_eq!(session.stage(), Stage::Complete);
        let persisted_on = *store.thread.lock().unwrap();
        assert_ne!(persisted_on.expect("persist was called"), std::thread::current().id());
    }

    #[tokio::test]
    async fn test_wrong_input_kind_and_terminal_stage() {
        let machine = machine();
        let mut session = Session::default();
        let err = machine
            .advance(&mut session, StageInput::Answers(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, ScreeningError::UnexpectedInput { stage: 1, .. }));

        session.stage = Stage::Answers;
        let err = machine.advance(&mut session, text("x")).await.unwrap_err();
        assert!(matches!(err, ScreeningError::UnexpectedInput { stage: 8, .. }));

        session.stage = Stage::Complete;
        let err = machine.advance(&mut session, text("x")).await.unwrap_err();
        assert!(matches!(
            err,
            ScreeningError::InvalidTransition { stage: 9, .. }
        ));
        assert!(machine.back(&mut session).is_err());
    }

    #[tokio::test]
    async fn test_reset_keeps_language_only() {
        let machine = machine();
        let mut session = Session::default();
        machine.set_language(&mut session, Language::Hindi);
        machine.advance(&mut session, text("John Doe")).await.unwrap();
        let old_id = session.id();

        machine.reset(&mut session);
        assert_eq!(session.stage(), Stage::Name);
        assert!(session.record().is_empty());
        assert!(session.questions().is_empty());
        assert_eq!(session.language(), Language::Hindi);
        assert_ne!(session.id(), old_id);
    }
}

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::screening::machine::{Session, StageMachine};
use crate::storage::JsonlCandidateStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub machine: StageMachine,
    /// The one screening session of this process. Each request performs a
    /// single transition while holding the lock.
    pub session: Arc<Mutex<Session>>,
    /// Same file the machine appends to; read back for operator endpoints.
    pub store: JsonlCandidateStore,
}

impl AppState {
    pub fn new(machine: StageMachine, store: JsonlCandidateStore) -> Self {
        Self {
            machine,
            session: Arc::new(Mutex::new(Session::default())),
            store,
        }
    }
}

//! Per-session state and the handlers that act on it
//!
//! A [`Session`] holds everything one user accumulates: the submitted trip, the
//! transcript and the lifecycle state. It is created when the user starts and
//! dropped when they leave; nothing is written to disk. [`TripAssistant`] owns
//! the external clients and is handed the session on every call.

mod assistant;
mod state;
mod transcript;

pub use assistant::{SessionError, TripAssistant};
pub use state::SessionState;
pub use transcript::Transcript;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::domain::TripInfo;

/// One user's trip and conversation
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    trip: Option<TripInfo>,
    transcript: Transcript,
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        let id = Uuid::now_v7();
        debug!(%id, "Session::new: called");
        Self {
            id,
            started_at: Utc::now(),
            trip: None,
            transcript: Transcript::new(),
            state: SessionState::Empty,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn trip(&self) -> Option<&TripInfo> {
        self.trip.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Short id for display
    pub fn short_id(&self) -> String {
        // v7 ids share their leading timestamp bits; the tail is random
        let hex = self.id.simple().to_string();
        hex[hex.len() - 8..].to_string()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

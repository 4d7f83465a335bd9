//! Session lifecycle state

use std::fmt;

/// Where a session is in the plan-then-chat flow
///
/// Ordered; a session only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionState {
    /// No trip submitted yet
    Empty,
    /// Trip validated and forecast fetched
    TripReady,
    /// Artifacts generated or a follow-up answered
    ChatActive,
}

impl SessionState {
    /// Move to `next` unless that would go backwards
    pub fn advance(&mut self, next: SessionState) {
        if next > *self {
            *self = next;
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Empty => "empty",
            SessionState::TripReady => "trip-ready",
            SessionState::ChatActive => "chat-active",
        };
        write!(f, "{s}")
    }
}

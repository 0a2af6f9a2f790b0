//! Link verification state definitions
//!
//! A link moves `Pending -> Done` when its first response settles it, or
//! `Pending -> HeadFailed -> Retrying -> Done` when a HEAD answer is not OK
//! and the link is queued again as a GET.

use std::fmt;

/// Which request a link task represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Attempt {
    /// First request (HEAD unless content must be read)
    #[default]
    First,
    /// GET issued after a HEAD that was not OK
    Retry,
}

impl Attempt {
    /// Returns true if this attempt is the GET retry
    pub fn is_retry(&self) -> bool {
        matches!(self, Self::Retry)
    }

    /// State a task with this attempt starts in
    pub fn initial_state(&self) -> LinkState {
        match self {
            Self::First => LinkState::Pending,
            Self::Retry => LinkState::Retrying,
        }
    }
}

/// Represents the current state of a link under verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    /// Queued; no response yet
    Pending,

    /// HEAD answered with a non-OK status; a GET retry will follow
    HeadFailed,

    /// The GET retry is in flight
    Retrying,

    /// Outcome recorded
    Done,
}

impl LinkState {
    /// Returns true if no further processing is needed
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the transition is allowed by the state machine
    pub fn can_transition_to(&self, next: LinkState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::HeadFailed)
                | (Self::Pending, Self::Done)
                | (Self::HeadFailed, Self::Retrying)
                | (Self::Retrying, Self::Done)
        )
    }

    /// Moves to `next`, or returns `None` if the transition is not allowed
    pub fn transition(self, next: LinkState) -> Option<LinkState> {
        if self.can_transition_to(next) {
            Some(next)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::HeadFailed => "head_failed",
            Self::Retrying => "retrying",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

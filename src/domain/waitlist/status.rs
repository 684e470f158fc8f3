//! Waitlist entry status state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Waitlist entry lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    /// Standing request awaiting a freed slot.
    Pending,

    /// Promoted into a booking. Terminal.
    Processed,

    /// Withdrawn by the client. Terminal.
    Cancelled,
}

impl StateMachine for WaitlistStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WaitlistStatus::*;
        matches!((self, target), (Pending, Processed) | (Pending, Cancelled))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WaitlistStatus::*;
        match self {
            Pending => vec![Processed, Cancelled],
            Processed => vec![],
            Cancelled => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_process_or_cancel() {
        assert!(WaitlistStatus::Pending.can_transition_to(&WaitlistStatus::Processed));
        assert!(WaitlistStatus::Pending.can_transition_to(&WaitlistStatus::Cancelled));
    }

    #[test]
    fn processed_and_cancelled_are_terminal() {
        assert!(WaitlistStatus::Processed.is_terminal());
        assert!(WaitlistStatus::Cancelled.is_terminal());
    }
}

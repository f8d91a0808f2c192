//! State for the presentation driver.

use crate::ui::gesture::Outcome;
use crate::ui::mvi::UiState;

/// Identifies one scheduled settle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SettleTicket(u64);

impl SettleTicket {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Driver state machine.
///
/// Input is accepted only in `Ready`. `Committing` lasts from release
/// classification until the settle ticket it carries fires.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DriverState {
    /// Showing the current item, input enabled.
    #[default]
    Ready,

    /// Exit animation in flight, input disabled.
    Committing {
        ticket: SettleTicket,
        outcome: Outcome,
    },

    /// Deck exhausted. Terminal.
    Done,
}

impl UiState for DriverState {}

impl DriverState {
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_committing(&self) -> bool {
        matches!(self, Self::Committing { .. })
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Ticket of the commit in flight.
    pub fn pending_ticket(&self) -> Option<SettleTicket> {
        match self {
            Self::Committing { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }
}

//! Intents for the presentation driver.

use crate::ui::gesture::Outcome;
use crate::ui::mvi::Intent;

use super::state::SettleTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverIntent {
    /// A release or button press committed the current item.
    /// Dropped unless the driver is Ready.
    Commit {
        ticket: SettleTicket,
        outcome: Outcome,
    },

    /// Settle delay elapsed. `exhausted` reports the deck after advancing.
    /// Dropped unless `ticket` matches the commit in flight.
    Settled { ticket: SettleTicket, exhausted: bool },

    /// Nothing left to present (empty deck at start).
    Finish,
}

impl Intent for DriverIntent {}

//! Reducer for the presentation driver.

use crate::ui::mvi::Reducer;

use super::intent::DriverIntent;
use super::state::DriverState;

/// Pure function; the caller applies the matching side effects
/// around the dispatch.
pub struct DriverReducer;

impl Reducer for DriverReducer {
    type State = DriverState;
    type Intent = DriverIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            DriverIntent::Commit { ticket, outcome } => match state {
                DriverState::Ready => DriverState::Committing { ticket, outcome },
                other => other,
            },

            DriverIntent::Settled { ticket, exhausted } => match state {
                DriverState::Committing { ticket: pending, .. } if pending == ticket => {
                    if exhausted {
                        DriverState::Done
                    } else {
                        DriverState::Ready
                    }
                }
                other => other,
            },

            DriverIntent::Finish => DriverState::Done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::driver::SettleTicket;
    use crate::ui::gesture::Outcome;

    fn committing(id: u64) -> DriverState {
        DriverState::Committing {
            ticket: SettleTicket::new(id),
            outcome: Outcome::Accept,
        }
    }

    #[test]
    fn ready_commit_transitions_to_committing() {
        let new = DriverReducer::reduce(
            DriverState::Ready,
            DriverIntent::Commit {
                ticket: SettleTicket::new(1),
                outcome: Outcome::Reject,
            },
        );
        assert_eq!(
            new,
            DriverState::Committing {
                ticket: SettleTicket::new(1),
                outcome: Outcome::Reject,
            }
        );
        assert!(!new.accepts_input());
    }

    #[test]
    fn committing_commit_is_dropped() {
        let new = DriverReducer::reduce(
            committing(1),
            DriverIntent::Commit {
                ticket: SettleTicket::new(2),
                outcome: Outcome::Reject,
            },
        );
        assert_eq!(new, committing(1));
    }

    #[test]
    fn matching_settle_returns_to_ready() {
        let new = DriverReducer::reduce(
            committing(3),
            DriverIntent::Settled {
                ticket: SettleTicket::new(3),
                exhausted: false,
            },
        );
        assert_eq!(new, DriverState::Ready);
    }

    #[test]
    fn matching_settle_on_exhausted_deck_is_done() {
        let new = DriverReducer::reduce(
            committing(3),
            DriverIntent::Settled {
                ticket: SettleTicket::new(3),
                exhausted: true,
            },
        );
        assert!(new.is_done());
    }

    #[test]
    fn stale_settle_is_noop() {
        let new = DriverReducer::reduce(
            committing(4),
            DriverIntent::Settled {
                ticket: SettleTicket::new(3),
                exhausted: false,
            },
        );
        assert_eq!(new, committing(4));

        let new = DriverReducer::reduce(
            DriverState::Ready,
            DriverIntent::Settled {
                ticket: SettleTicket::new(3),
                exhausted: true,
            },
        );
        assert_eq!(new, DriverState::Ready);
    }

    #[test]
    fn done_is_terminal() {
        let new = DriverReducer::reduce(
            DriverState::Done,
            DriverIntent::Commit {
                ticket: SettleTicket::new(9),
                outcome: Outcome::Accept,
            },
        );
        assert_eq!(new, DriverState::Done);
    }
}

//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::UiState;

/// The single place a state machine changes state.
///
/// `reduce` is pure: no I/O, no clocks, no visual calls. Side effects are
/// applied by whoever dispatches the intent, after reading the new state.
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;

    /// Folds a sequence of intents, in order, starting from `state`.
    fn reduce_all<I>(state: Self::State, intents: I) -> Self::State
    where
        I: IntoIterator<Item = Self::Intent>,
    {
        intents.into_iter().fold(state, Self::reduce)
    }
}

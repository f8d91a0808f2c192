//! Reducer for the gesture tracker.

use crate::ui::mvi::Reducer;

use super::intent::GestureIntent;
use super::state::{GestureState, Point};

/// Reducer for gesture tracker state transitions.
///
/// Pure function. The caller reads [`GestureState::displacement`] before
/// dispatching `End`, since the released state no longer carries positions.
pub struct GestureReducer;

impl Reducer for GestureReducer {
    type State = GestureState;
    type Intent = GestureIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // A new press always starts over, even if a release was lost.
            GestureIntent::Start { x, y } => {
                let point = Point::new(x, y);
                GestureState::Dragging {
                    origin: point,
                    current: point,
                }
            }

            GestureIntent::Move { x, y } => match state {
                GestureState::Dragging { origin, .. } => GestureState::Dragging {
                    origin,
                    current: Point::new(x, y),
                },
                GestureState::Idle => GestureState::Idle,
            },

            GestureIntent::End => GestureState::Idle,
        }
    }
}

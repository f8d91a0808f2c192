//! Gesture tracker.
//!
//! Converts pointer press/drag/release into a displacement vector and
//! classifies it against the swipe thresholds.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Tracker state (Idle → Dragging → Idle)
//! - `intent.rs` - Pointer events (Start, Move, End)
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `feedback.rs` - Displacement → visual feedback and commit classification

mod feedback;
mod intent;
mod reducer;
mod state;

pub use feedback::{Classification, Feedback, Outcome};
pub use intent::GestureIntent;
pub use reducer::GestureReducer;
pub use state::{Displacement, GestureState, Point};

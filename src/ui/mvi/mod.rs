//! Model-View-Intent (MVI) primitives.
//!
//! The gesture tracker and the presentation driver are both expressed as
//! reducers over explicit state enums, so every transition is a single
//! match arm instead of a set of boolean flags.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ VisualSink
//!    ↑                                 │
//!    └──────── pointer / timer ────────┘
//! ```
//!
//! - **State**: value describing where a state machine is
//! - **Intent**: pointer input or timer event
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;

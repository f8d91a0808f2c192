//! Presentation driver lifecycle.
//!
//! Gates pointer input around the exit animation of a committed card.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `state.rs` - Driver state (Ready → Committing → Ready | Done)
//! - `intent.rs` - Commit, settle timer, deck exhausted
//! - `reducer.rs` - State transitions (pure, no side effects)

mod intent;
mod reducer;
mod state;

pub use intent::DriverIntent;
pub use reducer::DriverReducer;
pub use state::{DriverState, SettleTicket};

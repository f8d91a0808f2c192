//! Intents for the gesture tracker.

use crate::ui::mvi::Intent;

/// Pointer events, already normalized to the primary contact point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// Pointer pressed on the card.
    Start { x: f64, y: f64 },

    /// Pointer moved. Ignored unless a gesture is in progress.
    Move { x: f64, y: f64 },

    /// Pointer released. Ignored unless a gesture is in progress.
    End,
}

impl Intent for GestureIntent {}

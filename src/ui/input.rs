//! Pointer and keyboard normalization.
//!
//! Mouse and touch input both reduce to [`PointerEvent`]. Only the primary
//! contact point is used; additional touches are ignored.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::TerminalConfig;
use crate::ui::gesture::{GestureIntent, Outcome};

/// Device-agnostic pointer event in distance units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
}

impl From<PointerEvent> for GestureIntent {
    fn from(event: PointerEvent) -> Self {
        match event {
            PointerEvent::Down { x, y } => GestureIntent::Start { x, y },
            PointerEvent::Move { x, y } => GestureIntent::Move { x, y },
            PointerEvent::Up => GestureIntent::End,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

impl PointerEvent {
    /// Builds a pointer event from a touch contact list, first contact only.
    ///
    /// `End` needs no contacts (the lifted finger is no longer listed).
    pub fn from_touches(phase: TouchPhase, touches: &[(f64, f64)]) -> Option<Self> {
        match phase {
            TouchPhase::Start => touches.first().map(|&(x, y)| Self::Down { x, y }),
            TouchPhase::Move => touches.first().map(|&(x, y)| Self::Move { x, y }),
            TouchPhase::End => Some(Self::Up),
        }
    }
}

/// Converts terminal cells into distance units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub column_units: f64,
    pub row_units: f64,
}

impl From<&TerminalConfig> for CellScale {
    fn from(config: &TerminalConfig) -> Self {
        Self {
            column_units: config.column_units,
            row_units: config.row_units,
        }
    }
}

/// Maps a left-button mouse event to a pointer event.
pub fn pointer_from_mouse(event: &MouseEvent, scale: CellScale) -> Option<PointerEvent> {
    let x = f64::from(event.column) * scale.column_units;
    let y = f64::from(event.row) * scale.row_units;
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Move { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}

/// Action to take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Decide the current item without a gesture.
    Decide(Outcome),
    /// Leave the session.
    Quit,
}

pub fn classify_key(key: KeyEvent) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Right => Some(InputAction::Decide(Outcome::Accept)),
        KeyCode::Left => Some(InputAction::Decide(Outcome::Reject)),
        KeyCode::Esc | KeyCode::Char('q') => Some(InputAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputAction::Quit)
        }
        _ => None,
    }
}

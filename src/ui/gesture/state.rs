//! State for the gesture tracker.

use crate::ui::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// `current - origin` of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Gesture tracker state machine.
///
/// Positions only exist while dragging, so a released gesture cannot leak
/// a stale origin into the next one.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,

    /// Pointer is down; `current` follows every move.
    Dragging { origin: Point, current: Point },
}

impl UiState for GestureState {}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Displacement of the gesture in progress, `None` while idle.
    pub fn displacement(&self) -> Option<Displacement> {
        match self {
            Self::Idle => None,
            Self::Dragging { origin, current } => Some(Displacement {
                dx: current.x - origin.x,
                dy: current.y - origin.y,
            }),
        }
    }
}

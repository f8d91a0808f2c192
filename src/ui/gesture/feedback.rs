//! Displacement → visual feedback, and release classification.
//!
//! Two thresholds with hysteresis:
//!
//! ```text
//!        reject preview         dead zone          accept preview
//! ──|──────────|──────────|────────0────────|──────────|──────────|──
//!  -release  -commit                      +commit   +release
//!   commit on release beyond ±release_threshold, snap back otherwise
//! ```

use serde::{Deserialize, Serialize};

use crate::config::SwipeConfig;

use super::state::Displacement;

/// Direction of a committed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Swiped right.
    Accept,
    /// Swiped left.
    Reject,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }

    /// Horizontal direction of the exit animation.
    pub fn direction(&self) -> f64 {
        match self {
            Self::Accept => 1.0,
            Self::Reject => -1.0,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a released gesture amounts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    SnapBack,
    Commit(Outcome),
}

impl Classification {
    /// Classifies a released gesture. Only `dx` matters.
    pub fn of(displacement: Displacement, config: &SwipeConfig) -> Self {
        let dx = displacement.dx;
        if dx.abs() > config.release_threshold {
            if dx > 0.0 {
                Self::Commit(Outcome::Accept)
            } else {
                Self::Commit(Outcome::Reject)
            }
        } else {
            Self::SnapBack
        }
    }
}

/// Visual state derived from a displacement. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Feedback {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_degrees: f64,
    pub accept_opacity: f64,
    pub reject_opacity: f64,
}

impl Feedback {
    /// Centered, upright, no indicator.
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Feedback while dragging. Rotation is linear and unclamped.
    pub fn from_displacement(displacement: Displacement, config: &SwipeConfig) -> Self {
        let dx = displacement.dx;
        let opacity = |distance: f64| (distance / config.full_opacity_distance).min(1.0);

        let (accept_opacity, reject_opacity) = if dx > config.commit_threshold {
            (opacity(dx), 0.0)
        } else if dx < -config.commit_threshold {
            (0.0, opacity(dx.abs()))
        } else {
            (0.0, 0.0)
        };

        Self {
            translate_x: dx,
            translate_y: displacement.dy,
            rotation_degrees: dx * config.rotation_factor,
            accept_opacity,
            reject_opacity,
        }
    }

    /// Off-screen state for a committed card. Indicators are hidden.
    pub fn exit(outcome: Outcome, displacement: Displacement, config: &SwipeConfig) -> Self {
        let translate_x = outcome.direction() * config.exit_distance;
        Self {
            translate_x,
            translate_y: displacement.dy,
            rotation_degrees: translate_x * config.rotation_factor,
            accept_opacity: 0.0,
            reject_opacity: 0.0,
        }
    }
}

//! Base trait for intents in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Pointer input (press, drag, release)
/// - Decisions taken without a gesture (buttons, arrow keys)
/// - Timer events (settle delay elapsed)
pub trait Intent: Send + 'static {}

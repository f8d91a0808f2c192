//! Base trait for state machines in MVI architecture.

/// Marker trait for state objects.
///
/// States should be:
/// - Cheap to clone
/// - Self-contained (everything needed to derive the visual state)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}

//! Card view state shared between the session task and the draw loop.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::deck::Item;
use crate::session::VisualSink;
use crate::ui::gesture::Outcome;
use crate::ui::mvi::UiState;

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardSnapshot {
    pub item: Option<Item>,
    /// Number of items presented so far, the current one included.
    pub presented: usize,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_degrees: f64,
    pub accept_opacity: f64,
    pub reject_opacity: f64,
    pub input_enabled: bool,
    pub complete: bool,
}

impl UiState for CardSnapshot {}

impl CardSnapshot {
    pub fn opacity(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Accept => self.accept_opacity,
            Outcome::Reject => self.reject_opacity,
        }
    }
}

/// [`VisualSink`] writing into a shared [`CardSnapshot`].
#[derive(Clone, Default)]
pub struct CardView {
    inner: Arc<Mutex<CardSnapshot>>,
}

impl CardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> CardSnapshot {
        self.inner.lock().clone()
    }

    /// Called from the session completion callback.
    pub fn mark_complete(&self) {
        let mut state = self.inner.lock();
        state.complete = true;
        state.item = None;
        state.input_enabled = false;
    }
}

impl VisualSink for CardView {
    fn set_transform(&mut self, translate_x: f64, translate_y: f64, rotation_degrees: f64) {
        let mut state = self.inner.lock();
        state.translate_x = translate_x;
        state.translate_y = translate_y;
        state.rotation_degrees = rotation_degrees;
    }

    fn set_indicator_opacity(&mut self, which: Outcome, value: f64) {
        let mut state = self.inner.lock();
        match which {
            Outcome::Accept => state.accept_opacity = value,
            Outcome::Reject => state.reject_opacity = value,
        }
    }

    fn set_item_visual(&mut self, item: &Item) {
        let mut state = self.inner.lock();
        state.item = Some(item.clone());
        state.presented += 1;
    }

    fn enable_input(&mut self) {
        self.inner.lock().input_enabled = true;
    }

    fn disable_input(&mut self) {
        self.inner.lock().input_enabled = false;
    }
}

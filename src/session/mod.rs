//! Swipe session: deck, gesture tracker and presentation driver wired together.
//!
//! A [`Session`] owns all mutable state of one run. It is driven by pointer
//! events and by settle callbacks; it never sleeps itself. When a commit
//! happens it hands back a [`SettleTicket`] that the caller must deliver to
//! [`Session::settle`] once the settle delay has elapsed ([`SessionRunner`]
//! does this with a tokio timer).

mod runner;

pub use runner::{SessionEvent, SessionHandle, SessionRunner};

use serde::{Deserialize, Serialize};

use crate::config::SwipeConfig;
use crate::deck::{Deck, Item};
use crate::ui::driver::{DriverIntent, DriverReducer, DriverState, SettleTicket};
use crate::ui::gesture::{
    Classification, Displacement, Feedback, GestureIntent, GestureReducer, GestureState, Outcome,
};
use crate::ui::input::PointerEvent;
use crate::ui::mvi::Reducer;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Where the card is drawn.
pub trait VisualSink: Send {
    fn set_transform(&mut self, translate_x: f64, translate_y: f64, rotation_degrees: f64);
    fn set_indicator_opacity(&mut self, which: Outcome, value: f64);
    fn set_item_visual(&mut self, item: &Item);
    fn enable_input(&mut self);
    fn disable_input(&mut self);
}

/// Receives every committed decision. Best effort: errors are logged and
/// never undo the commit.
pub trait DecisionSink: Send {
    fn record(&mut self, record: &DecisionRecord) -> anyhow::Result<()>;
}

/// Invoked once, when the deck runs out.
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// A committed item. Appended once per item, never modified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub item: Item,
    pub outcome: Outcome,
}

/// What the decision sink gets to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub identifier: String,
    pub outcome: Outcome,
}

impl From<&Decision> for DecisionRecord {
    fn from(decision: &Decision) -> Self {
        Self {
            identifier: decision.item.id.clone(),
            outcome: decision.outcome,
        }
    }
}

pub struct Session<V: VisualSink> {
    deck: Deck,
    gesture: GestureState,
    driver: DriverState,
    decisions: Vec<Decision>,
    config: SwipeConfig,
    visual: V,
    decision_sink: Option<Box<dyn DecisionSink>>,
    on_complete: Option<CompletionCallback>,
    last_ticket: SettleTicket,
    started: bool,
}

impl<V: VisualSink> Session<V> {
    pub fn new(deck: Deck, config: SwipeConfig, visual: V) -> Self {
        Self {
            deck,
            gesture: GestureState::default(),
            driver: DriverState::default(),
            decisions: Vec::new(),
            config,
            visual,
            decision_sink: None,
            on_complete: None,
            last_ticket: SettleTicket::default(),
            started: false,
        }
    }

    pub fn with_decision_sink(mut self, sink: impl DecisionSink + 'static) -> Self {
        self.decision_sink = Some(Box::new(sink));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Presents the first item. Input is ignored until this is called.
    ///
    /// An empty deck completes immediately.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        if self.deck.is_exhausted() {
            tracing::info!("Deck is empty, nothing to present");
            self.visual.disable_input();
            dispatch_mvi!(self, driver, DriverReducer, DriverIntent::Finish);
            self.complete();
            return;
        }

        tracing::info!(items = self.deck.len(), "Session started");
        self.present_current();
    }

    /// Single entry point for pointer input.
    ///
    /// Returns a ticket when the event committed the current item; the
    /// caller must hand it to [`Session::settle`] after the settle delay.
    pub fn handle(&mut self, event: PointerEvent) -> Option<SettleTicket> {
        match event {
            PointerEvent::Down { .. } => {
                if !self.started || !self.driver.accepts_input() {
                    tracing::debug!(driver = ?self.driver, "Pointer down dropped, input disabled");
                    return None;
                }
                dispatch_mvi!(self, gesture, GestureReducer, GestureIntent::from(event));
                None
            }
            PointerEvent::Move { .. } => {
                if !self.gesture.is_dragging() {
                    return None;
                }
                dispatch_mvi!(self, gesture, GestureReducer, GestureIntent::from(event));
                if let Some(displacement) = self.gesture.displacement() {
                    self.apply(Feedback::from_displacement(displacement, &self.config));
                }
                None
            }
            PointerEvent::Up => {
                let displacement = self.gesture.displacement()?;
                dispatch_mvi!(self, gesture, GestureReducer, GestureIntent::End);

                match Classification::of(displacement, &self.config) {
                    Classification::SnapBack => {
                        tracing::debug!(dx = displacement.dx, "Snap back");
                        self.apply(Feedback::neutral());
                        None
                    }
                    Classification::Commit(outcome) => self.commit(outcome, displacement),
                }
            }
        }
    }

    /// Commits the current item without a gesture (buttons, arrow keys).
    ///
    /// Follows the same sequencing as a released swipe and is dropped
    /// while input is disabled. A gesture in progress is discarded.
    pub fn decide(&mut self, outcome: Outcome) -> Option<SettleTicket> {
        if !self.started || !self.driver.accepts_input() {
            tracing::debug!(driver = ?self.driver, "Decision dropped, input disabled");
            return None;
        }
        let displacement = self.gesture.displacement().unwrap_or_default();
        dispatch_mvi!(self, gesture, GestureReducer, GestureIntent::End);
        self.commit(outcome, displacement)
    }

    /// Finishes the exit animation for `ticket`: advances the deck and
    /// presents the next item, or completes the session.
    ///
    /// Returns false (and changes nothing) if `ticket` is not the commit
    /// in flight.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if self.driver.pending_ticket() != Some(ticket) {
            tracing::debug!(ticket = ticket.id(), driver = ?self.driver, "Stale settle ignored");
            return false;
        }

        self.deck.advance();
        let exhausted = self.deck.is_exhausted();
        dispatch_mvi!(self, driver, DriverReducer, DriverIntent::Settled { ticket, exhausted });

        if exhausted {
            tracing::info!(decisions = self.decisions.len(), "Deck exhausted, session complete");
            self.complete();
        } else {
            self.present_current();
        }
        true
    }

    fn commit(&mut self, outcome: Outcome, displacement: Displacement) -> Option<SettleTicket> {
        if !self.driver.accepts_input() {
            return None;
        }
        let item = self.deck.current()?.clone();
        let ticket = self.last_ticket.next();
        self.last_ticket = ticket;

        // Input goes off before anything else so no second gesture can
        // land on this item while it animates out.
        dispatch_mvi!(self, driver, DriverReducer, DriverIntent::Commit { ticket, outcome });
        self.visual.disable_input();

        self.visual.set_indicator_opacity(Outcome::Accept, 0.0);
        self.visual.set_indicator_opacity(Outcome::Reject, 0.0);

        let decision = Decision { item, outcome };
        if let Some(sink) = self.decision_sink.as_mut() {
            if let Err(err) = sink.record(&DecisionRecord::from(&decision)) {
                tracing::warn!(item = %decision.item.id, error = %err, "Decision sink failed");
            }
        }
        tracing::info!(item = %decision.item.id, %outcome, "Committed");
        self.decisions.push(decision);

        let exit = Feedback::exit(outcome, displacement, &self.config);
        self.visual
            .set_transform(exit.translate_x, exit.translate_y, exit.rotation_degrees);

        Some(ticket)
    }

    fn present_current(&mut self) {
        if let Some(item) = self.deck.current() {
            self.visual.set_item_visual(item);
        }
        self.apply(Feedback::neutral());
        self.visual.enable_input();
    }

    fn apply(&mut self, feedback: Feedback) {
        self.visual.set_transform(
            feedback.translate_x,
            feedback.translate_y,
            feedback.rotation_degrees,
        );
        self.visual
            .set_indicator_opacity(Outcome::Accept, feedback.accept_opacity);
        self.visual
            .set_indicator_opacity(Outcome::Reject, feedback.reject_opacity);
    }

    fn complete(&mut self) {
        if let Some(callback) = self.on_complete.take() {
            callback();
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current(&self) -> Option<&Item> {
        self.deck.current()
    }

    pub fn decisions(&self) -> &[Decision] {
        &self.decisions
    }

    pub fn into_decisions(self) -> Vec<Decision> {
        self.decisions
    }

    pub fn gesture_state(&self) -> &GestureState {
        &self.gesture
    }

    pub fn driver_state(&self) -> &DriverState {
        &self.driver
    }

    pub fn is_input_enabled(&self) -> bool {
        self.started && self.driver.accepts_input()
    }

    pub fn is_done(&self) -> bool {
        self.driver.is_done()
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }
}

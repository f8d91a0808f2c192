//! Event loop that owns a [`Session`] and schedules its settle timers.
//!
//! All session state is touched from the single task running
//! [`SessionRunner::run`]. Pointer input and timer expiry arrive through the
//! same channel, so they are processed strictly one after another.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session::{Decision, Session, VisualSink};
use crate::ui::driver::SettleTicket;
use crate::ui::gesture::Outcome;
use crate::ui::input::PointerEvent;

const EVENT_CHANNEL_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Pointer(PointerEvent),
    /// Decision without a gesture (buttons, arrow keys).
    Decide(Outcome),
    /// Posted by the settle timer.
    SettleElapsed(SettleTicket),
    /// Stop before the deck is exhausted.
    Shutdown,
}

/// Cloneable sender side of a running session.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Returns false once the runner has stopped.
    pub async fn send(&self, event: SessionEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }
}

pub struct SessionRunner<V: VisualSink> {
    session: Session<V>,
    tx: mpsc::Sender<SessionEvent>,
    rx: mpsc::Receiver<SessionEvent>,
    settle_task: Option<JoinHandle<()>>,
}

impl<V: VisualSink + 'static> SessionRunner<V> {
    pub fn new(session: Session<V>) -> Self {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        Self {
            session,
            tx,
            rx,
            settle_task: None,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            tx: self.tx.clone(),
        }
    }

    /// Starts the session and processes events until the deck is exhausted
    /// or [`SessionEvent::Shutdown`] arrives. Returns the decision log.
    pub async fn run(mut self) -> Vec<Decision> {
        self.session.start();

        while !self.session.is_done() {
            let Some(event) = self.rx.recv().await else {
                break;
            };

            match event {
                SessionEvent::Pointer(pointer) => {
                    if let Some(ticket) = self.session.handle(pointer) {
                        self.schedule_settle(ticket);
                    }
                }
                SessionEvent::Decide(outcome) => {
                    if let Some(ticket) = self.session.decide(outcome) {
                        self.schedule_settle(ticket);
                    }
                }
                SessionEvent::SettleElapsed(ticket) => {
                    self.session.settle(ticket);
                }
                SessionEvent::Shutdown => {
                    tracing::info!(
                        decisions = self.session.decisions().len(),
                        "Session stopped before completion"
                    );
                    break;
                }
            }
        }

        if let Some(task) = self.settle_task.take() {
            task.abort();
        }
        self.session.into_decisions()
    }

    /// One-shot timer posting `SettleElapsed(ticket)` back into the loop.
    ///
    /// Only one commit can be in flight, so a previous timer has always
    /// fired by the time a new one is scheduled.
    fn schedule_settle(&mut self, ticket: SettleTicket) {
        let delay = self.session.config().settle_delay();
        let tx = self.tx.clone();
        tracing::debug!(ticket = ticket.id(), delay_ms = delay.as_millis() as u64, "Settle scheduled");
        self.settle_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(SessionEvent::SettleElapsed(ticket)).await;
        }));
    }
}

use std::time::Duration;

use anyhow::Context;
use crossterm::event::MouseEventKind;
use ratatui::layout::Rect;

use crate::config::Config;
use crate::deck::Deck;
use crate::preferences::PreferenceStore;
use crate::session::{Decision, Session, SessionEvent, SessionRunner};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::{classify_key, pointer_from_mouse, CellScale, InputAction};
use crate::ui::layout::{hits_card, layout_regions};
use crate::ui::render::draw;
use crate::ui::terminal::setup_terminal;
use crate::ui::view::CardView;

const REDRAW_INTERVAL: Duration = Duration::from_millis(33);

/// Runs the terminal deck until the user quits. Returns the decisions made,
/// in order.
pub async fn run(config: Config) -> anyhow::Result<Vec<Decision>> {
    let deck = match config.terminal.deck_path.as_ref() {
        Some(path) => Deck::load_from(path)?,
        None => Deck::sample(),
    };
    if deck.is_empty() {
        tracing::warn!("Deck has no items");
    }
    let total = deck.len();
    let scale = CellScale::from(&config.terminal);
    let preferences = PreferenceStore::new(config.server.preferences_path.clone());

    let view = CardView::new();
    let completion_view = view.clone();
    let (decision_sink, decision_writer) = preferences.decision_sink();
    let session = Session::new(deck, config.swipe.clone(), view.clone())
        .with_decision_sink(decision_sink)
        .on_complete(move || completion_view.mark_complete());
    let runner = SessionRunner::new(session);
    let handle = runner.handle();
    let mut session_task = tokio::spawn(runner.run());

    let (mut terminal, guard) = setup_terminal().context("Failed to set up terminal")?;
    let mut events = EventHandler::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);
    let mut finished: Option<Vec<Decision>> = None;
    let mut body = Rect::default();

    loop {
        let snapshot = view.snapshot();
        terminal.draw(|frame| {
            body = layout_regions(frame.area()).1;
            draw(frame, &snapshot, total, scale);
        })?;

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => match classify_key(key) {
                    Some(InputAction::Quit) => break,
                    Some(InputAction::Decide(outcome)) => {
                        handle.send(SessionEvent::Decide(outcome)).await;
                    }
                    None => {}
                },
                Some(AppEvent::Mouse(mouse)) => {
                    // Presses only grab the card when they land on it.
                    let off_card = matches!(mouse.kind, MouseEventKind::Down(_))
                        && !hits_card(
                            body,
                            snapshot.translate_x,
                            snapshot.translate_y,
                            scale,
                            mouse.column,
                            mouse.row,
                        );
                    if off_card {
                        continue;
                    }
                    if let Some(pointer) = pointer_from_mouse(&mouse, scale) {
                        handle.send(SessionEvent::Pointer(pointer)).await;
                    }
                }
                Some(AppEvent::Resize) => {}
                None => break,
            },
            result = &mut session_task, if finished.is_none() => {
                finished = Some(result.context("Session task failed")?);
            }
            _ = redraw.tick() => {}
        }
    }

    let decisions = match finished {
        Some(decisions) => decisions,
        None => {
            handle.send(SessionEvent::Shutdown).await;
            session_task.await.context("Session task failed")?
        }
    };

    // The session (and with it the sink) is gone, so the writer drains and stops.
    if let Err(err) = decision_writer.await {
        tracing::warn!(error = %err, "Decision writer failed");
    }

    drop(events);
    drop(guard);
    tracing::info!(decisions = decisions.len(), "Terminal deck closed");
    Ok(decisions)
}

use crate::ui::theme::{ACCEPT, GLOBAL_BORDER, HEADER_TEXT, REJECT};
use crate::ui::view::CardSnapshot;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const HINTS: &str = " Drag: Swipe │ ←: Nope │ →: Like │ q: Quit";

pub struct Footer {
    total: usize,
}

impl Footer {
    pub fn new(total: usize) -> Self {
        Self { total }
    }

    /// Progress counts decided items, so it reads `len/len` once finished.
    fn progress(&self, snapshot: &CardSnapshot) -> usize {
        if snapshot.complete {
            self.total
        } else {
            snapshot.presented.saturating_sub(1)
        }
    }

    pub fn widget(&self, snapshot: &CardSnapshot, area: Rect) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let (input_text, input_style) = if snapshot.input_enabled {
            ("input on", Style::default().fg(ACCEPT))
        } else {
            ("input off", Style::default().fg(REJECT))
        };

        let status = format!(
            "{}/{} │ tilt {:+.1}° │ ",
            self.progress(snapshot),
            self.total,
            snapshot.rotation_degrees
        );

        // Char count, not byte count (for Unicode)
        let used = HINTS.chars().count() + status.chars().count() + input_text.chars().count() + 1;
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width.saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(HINTS, text_style),
            Span::styled(" ".repeat(padding), text_style),
            Span::styled(status, text_style),
            Span::styled(input_text, input_style),
            Span::styled(" ", text_style),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Left)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            )
    }
}

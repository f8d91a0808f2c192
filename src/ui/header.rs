use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use crate::ui::view::CardSnapshot;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, snapshot: &CardSnapshot) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let title_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

        let current = match (&snapshot.item, snapshot.complete) {
            (_, true) => "All done".to_string(),
            (Some(item), false) => item.caption.clone(),
            (None, false) => "Loading".to_string(),
        };

        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled("swipedeck", title_style),
            Span::styled("  │  ", separator_style),
            Span::styled(current, text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

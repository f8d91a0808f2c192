use crate::ui::footer::Footer;
use crate::ui::gesture::Outcome;
use crate::ui::header::Header;
use crate::ui::input::CellScale;
use crate::ui::layout::{card_rect, layout_regions};
use crate::ui::theme::{ACCENT, ACCEPT, CARD_BORDER, HEADER_TEXT, MUTED, REJECT};
use crate::ui::view::CardSnapshot;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Opacity below which an indicator is drawn dimmed.
const FAINT_OPACITY: f64 = 0.5;

pub fn draw(frame: &mut Frame<'_>, snapshot: &CardSnapshot, total: usize, scale: CellScale) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    frame.render_widget(Header::new().widget(snapshot), header);
    frame.render_widget(Clear, body);

    if snapshot.complete {
        draw_summary(frame, body, total);
    } else if snapshot.item.is_some() {
        if let Some(card) =
            card_rect(body, snapshot.translate_x, snapshot.translate_y, scale)
        {
            draw_card(frame, card, snapshot);
        }
    }

    frame.render_widget(Footer::new(total).widget(snapshot, footer), footer);
}

fn draw_card(frame: &mut Frame<'_>, area: Rect, snapshot: &CardSnapshot) {
    let Some(item) = snapshot.item.as_ref() else {
        return;
    };

    let mut lines = vec![
        indicator_line(snapshot),
        Line::from(""),
        Line::from(Span::styled(
            item.caption.clone(),
            Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, value) in &item.attributes {
        lines.push(Line::from(vec![
            Span::styled(format!("{key}: "), Style::default().fg(MUTED)),
            Span::styled(value.clone(), Style::default().fg(HEADER_TEXT)),
        ]));
    }
    if let Some(image) = item.image.as_ref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            image.clone(),
            Style::default().fg(MUTED).add_modifier(Modifier::DIM),
        )));
    }

    frame.render_widget(Clear, area);
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(snapshot)));
    frame.render_widget(
        Paragraph::new(lines)
            .block(card)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// "LIKE" on the left, "NOPE" on the right, each only while visible.
fn indicator_line(snapshot: &CardSnapshot) -> Line<'static> {
    let mut spans = Vec::new();
    if let Some(span) = indicator(snapshot, Outcome::Accept) {
        spans.push(span);
    }
    spans.push(Span::raw("  "));
    if let Some(span) = indicator(snapshot, Outcome::Reject) {
        spans.push(span);
    }
    Line::from(spans)
}

fn indicator(snapshot: &CardSnapshot, outcome: Outcome) -> Option<Span<'static>> {
    let opacity = snapshot.opacity(outcome);
    if opacity <= 0.0 {
        return None;
    }

    let (label, color) = match outcome {
        Outcome::Accept => ("LIKE", ACCEPT),
        Outcome::Reject => ("NOPE", REJECT),
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if opacity < FAINT_OPACITY {
        style = style.add_modifier(Modifier::DIM);
    }
    Some(Span::styled(
        format!(" {} {:>3.0}% ", label, opacity * 100.0),
        style,
    ))
}

fn border_color(snapshot: &CardSnapshot) -> Color {
    if snapshot.accept_opacity > snapshot.reject_opacity {
        ACCEPT
    } else if snapshot.reject_opacity > 0.0 {
        REJECT
    } else {
        CARD_BORDER
    }
}

fn draw_summary(frame: &mut Frame<'_>, body: Rect, total: usize) {
    let lines = vec![
        Line::from(Span::styled(
            "No more profiles",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} decided. Press q to exit.", total),
            Style::default().fg(MUTED),
        )),
    ];
    let height = (lines.len() as u16).min(body.height);
    let area = Rect {
        x: body.x,
        y: body.y + body.height.saturating_sub(height) / 2,
        width: body.width,
        height,
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

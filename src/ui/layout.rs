use ratatui::layout::{Position, Rect};

use crate::ui::input::CellScale;

pub const CARD_WIDTH: u16 = 40;
pub const CARD_HEIGHT: u16 = 14;

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Where the card lands inside `body` once translated by the given
/// distance-unit offsets. The result is clipped to `body`; `None` when the
/// card is entirely outside it.
pub fn card_rect(body: Rect, translate_x: f64, translate_y: f64, scale: CellScale) -> Option<Rect> {
    let width = i32::from(CARD_WIDTH.min(body.width));
    let height = i32::from(CARD_HEIGHT.min(body.height));
    if width == 0 || height == 0 {
        return None;
    }

    // Anything past one screen is off it anyway; clamping keeps the
    // arithmetic below in range.
    let offset_x = clamp_offset(translate_x / scale.column_units, body.width);
    let offset_y = clamp_offset(translate_y / scale.row_units, body.height);
    let left = i32::from(body.x) + (i32::from(body.width) - width) / 2 + offset_x;
    let top = i32::from(body.y) + (i32::from(body.height) - height) / 2 + offset_y;

    let clip_left = left.max(i32::from(body.x));
    let clip_top = top.max(i32::from(body.y));
    let clip_right = (left + width).min(i32::from(body.x) + i32::from(body.width));
    let clip_bottom = (top + height).min(i32::from(body.y) + i32::from(body.height));
    if clip_right <= clip_left || clip_bottom <= clip_top {
        return None;
    }

    Some(Rect {
        x: clip_left as u16,
        y: clip_top as u16,
        width: (clip_right - clip_left) as u16,
        height: (clip_bottom - clip_top) as u16,
    })
}

/// Whether the cell at (`column`, `row`) is on the card as currently drawn.
pub fn hits_card(
    body: Rect,
    translate_x: f64,
    translate_y: f64,
    scale: CellScale,
    column: u16,
    row: u16,
) -> bool {
    card_rect(body, translate_x, translate_y, scale)
        .is_some_and(|card| card.contains(Position::new(column, row)))
}

fn clamp_offset(cells: f64, extent: u16) -> i32 {
    let limit = f64::from(extent) + f64::from(CARD_WIDTH.max(CARD_HEIGHT));
    cells.round().clamp(-limit, limit) as i32
}

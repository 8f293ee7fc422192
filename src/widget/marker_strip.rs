//! Placement of the jump-to-question markers and page arrows.
//!
//! Positions are computed separately from drawing so mouse clicks can be
//! mapped back to markers with the same geometry.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::theme::Base16Palette;
use crate::view::{MarkerView, QuizView};

pub const PREVIOUS_ARROW: &str = "◀";
pub const NEXT_ARROW: &str = "▶";
const ARROW_WIDTH: u16 = 2;
const MARKER_GAP: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedMarker {
    pub marker: MarkerView,
    pub area: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripLayout {
    pub markers: Vec<PlacedMarker>,
    pub previous_page: Option<Rect>,
    pub next_page: Option<Rect>,
    pub rows: u16,
}

impl StripLayout {
    /// Drops the markers and arrows that fall outside `clip`, so only what
    /// gets drawn can be clicked.
    pub fn clipped(mut self, clip: Rect) -> Self {
        self.markers.retain(|placed| fits(clip, placed.area));
        self.previous_page = self.previous_page.filter(|area| fits(clip, *area));
        self.next_page = self.next_page.filter(|area| fits(clip, *area));
        self
    }
}

fn marker_label(marker: &MarkerView) -> String {
    format!(" {} ", marker.number)
}

/// Lays markers out left to right, wrapping onto new rows inside `width`.
/// The first row starts with the previous-page arrow slot, the next-page
/// arrow follows the last marker.
pub fn layout_strip(view: &QuizView, origin_x: u16, origin_y: u16, width: u16) -> StripLayout {
    let mut layout = StripLayout::default();
    let right_edge = origin_x.saturating_add(width);

    if view.show_previous_page {
        layout.previous_page = Some(Rect::new(origin_x, origin_y, 1, 1));
    }

    let mut x = origin_x + ARROW_WIDTH;
    let mut row = 0u16;

    for marker in &view.markers {
        let label_width = marker_label(marker).chars().count() as u16;
        if x + label_width > right_edge && x > origin_x + ARROW_WIDTH {
            row += 1;
            x = origin_x + ARROW_WIDTH;
        }
        layout.markers.push(PlacedMarker {
            marker: *marker,
            area: Rect::new(x, origin_y + row, label_width, 1),
        });
        x += label_width + MARKER_GAP;
    }

    if view.show_next_page {
        if x + 1 > right_edge {
            row += 1;
            x = origin_x + ARROW_WIDTH;
        }
        layout.next_page = Some(Rect::new(x, origin_y + row, 1, 1));
    }

    layout.rows = row + 1;
    layout
}

/// Rows a strip for `view` needs at `width`.
pub fn required_rows(view: &QuizView, width: u16) -> u16 {
    layout_strip(view, 0, 0, width).rows
}

fn fits(clip: Rect, area: Rect) -> bool {
    area.y >= clip.y && area.y < clip.bottom() && area.x >= clip.x && area.right() <= clip.right()
}

pub fn render_strip(
    f: &mut Frame,
    clip: Rect,
    layout: &StripLayout,
    palette: &Base16Palette,
    marker_cursor: Option<usize>,
) {
    let buf = f.buffer_mut();
    let arrow_style = Style::default()
        .fg(palette.base_0d)
        .add_modifier(Modifier::BOLD);

    if let Some(area) = layout.previous_page.filter(|a| fits(clip, *a)) {
        buf.set_string(area.x, area.y, PREVIOUS_ARROW, arrow_style);
    }

    for placed in layout.markers.iter().filter(|p| fits(clip, p.area)) {
        let marker = &placed.marker;
        let mut style = if marker.is_current {
            Style::default()
                .fg(palette.base_00)
                .bg(palette.base_0d)
                .add_modifier(Modifier::BOLD)
        } else if marker.is_answered {
            Style::default().fg(palette.base_00).bg(palette.base_0b)
        } else {
            Style::default().fg(palette.base_05).bg(palette.base_01)
        };
        if marker_cursor == Some(marker.index) {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
        }
        buf.set_string(placed.area.x, placed.area.y, marker_label(marker), style);
    }

    if let Some(area) = layout.next_page.filter(|a| fits(clip, *a)) {
        buf.set_string(area.x, area.y, NEXT_ARROW, arrow_style);
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::current_theme;
use crate::view::QuizView;
use crate::widget::marker_strip::{self, StripLayout};

const SELECTED_PREFIX: &str = "(•) ";
const UNSELECTED_PREFIX: &str = "( ) ";
const CONTINUATION_PREFIX: &str = "    ";

/// Interaction state the panel needs on top of the projected view.
#[derive(Debug, Clone, Copy)]
pub struct QuizPanelState<'a> {
    pub document_name: &'a str,
    pub option_cursor: usize,
    pub marker_cursor: Option<usize>,
    pub markers_focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizHit {
    Option(usize),
    Marker(usize),
    PreviousPage,
    NextPage,
}

/// Screen regions recorded during the last draw.
#[derive(Debug, Clone, Default)]
pub struct QuizHitAreas {
    options: Vec<(usize, Rect)>,
    strip: StripLayout,
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.right() && row >= area.y && row < area.bottom()
}

impl QuizHitAreas {
    pub fn hit(&self, column: u16, row: u16) -> Option<QuizHit> {
        if self
            .strip
            .previous_page
            .is_some_and(|area| contains(area, column, row))
        {
            return Some(QuizHit::PreviousPage);
        }
        if self
            .strip
            .next_page
            .is_some_and(|area| contains(area, column, row))
        {
            return Some(QuizHit::NextPage);
        }
        if let Some(placed) = self
            .strip
            .markers
            .iter()
            .find(|placed| contains(placed.area, column, row))
        {
            return Some(QuizHit::Marker(placed.marker.index));
        }
        self.options
            .iter()
            .find(|(_, area)| contains(*area, column, row))
            .map(|(index, _)| QuizHit::Option(*index))
    }
}

fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let wrapped: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect();
    if wrapped.is_empty() {
        vec![String::new()]
    } else {
        wrapped
    }
}

pub fn render(f: &mut Frame, area: Rect, view: &QuizView, state: QuizPanelState) -> QuizHitAreas {
    let palette = current_theme();
    let (text_color, border_color, bg_color) = palette.get_panel_colors(!state.markers_focused);
    let (_, strip_border, _) = palette.get_panel_colors(state.markers_focused);
    let (selection_bg, selection_fg) = palette.get_selection_colors(!state.markers_focused);

    let strip_width = area.width.saturating_sub(2);
    let strip_rows = marker_strip::required_rows(view, strip_width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(strip_rows + 2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    let strip_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.document_name))
        .title_top(
            Line::from(format!(" Page {} / {} ", view.nav_page + 1, view.total_pages))
                .right_aligned(),
        )
        .border_style(Style::default().fg(strip_border))
        .style(Style::default().bg(bg_color));
    let strip_inner = strip_block.inner(chunks[0]);
    f.render_widget(strip_block, chunks[0]);

    let strip = marker_strip::layout_strip(view, strip_inner.x, strip_inner.y, strip_inner.width)
        .clipped(strip_inner);
    marker_strip::render_strip(f, strip_inner, &strip, palette, state.marker_cursor);

    let mut question_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " Question {} / {} ",
            view.question_number, view.total_questions
        ))
        .title_top(Line::from(format!(" {} ", view.progress_label())).right_aligned())
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(bg_color));
    if view.can_go_previous {
        question_block = question_block.title_bottom(Line::from(" ◀ h: Previous "));
    }
    if view.can_go_next {
        question_block =
            question_block.title_bottom(Line::from(" l: Next ▶ ").right_aligned());
    }
    let inner = question_block.inner(chunks[1]);
    f.render_widget(question_block, chunks[1]);

    let mut lines: Vec<Line> = Vec::new();
    for segment in wrap_text(&view.prompt, inner.width) {
        lines.push(Line::from(Span::styled(
            segment,
            Style::default().fg(text_color).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::default());

    let mut options = Vec::with_capacity(view.options.len());
    let option_width = inner.width.saturating_sub(CONTINUATION_PREFIX.len() as u16);
    for (index, option) in view.options.iter().enumerate() {
        let start_row = lines.len() as u16;
        let style = if !state.markers_focused && index == state.option_cursor {
            Style::default()
                .fg(selection_fg)
                .bg(selection_bg)
                .add_modifier(Modifier::BOLD)
        } else if option.selected {
            Style::default()
                .fg(palette.base_0b)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_color)
        };
        let prefix = if option.selected {
            SELECTED_PREFIX
        } else {
            UNSELECTED_PREFIX
        };

        for (row, segment) in wrap_text(&option.text, option_width).into_iter().enumerate() {
            let lead = if row == 0 { prefix } else { CONTINUATION_PREFIX };
            lines.push(Line::from(vec![
                Span::styled(lead, style),
                Span::styled(segment, style),
            ]));
        }

        let end_row = (lines.len() as u16).min(inner.height);
        if start_row < end_row {
            options.push((
                index,
                Rect::new(inner.x, inner.y + start_row, inner.width, end_row - start_row),
            ));
        }
    }

    if view.options.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no answer options)",
            Style::default().fg(palette.base_03),
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);

    let help = if state.markers_focused {
        " h/l: Move | Enter: Jump | [ ]: Page | Tab/Esc: Back to options"
    } else {
        " j/k: Option | Enter: Select | h/l: Prev/Next | [ ]: Page | Tab: Markers | e: Export | o: Open | ?: Help"
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            help,
            Style::default().fg(palette.base_03),
        ))),
        chunks[2],
    );

    QuizHitAreas { options, strip }
}

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::notification::{Notification, NotificationLevel};
use crate::theme::Base16Palette;

pub fn styled_line(notification: &Notification, palette: &Base16Palette) -> Line<'static> {
    let style = match notification.level {
        NotificationLevel::Info => Style::default()
            .fg(palette.base_06)
            .bg(palette.base_02)
            .add_modifier(Modifier::BOLD),
        NotificationLevel::Warning => Style::default()
            .fg(palette.base_00)
            .bg(palette.base_0a)
            .add_modifier(Modifier::BOLD),
        NotificationLevel::Error => Style::default()
            .fg(palette.base_07)
            .bg(palette.base_08)
            .add_modifier(Modifier::BOLD),
    };

    Line::from(vec![Span::styled(format!(" {} ", notification.message), style)]).centered()
}

/// Draws the newest notification on the last row of `area`.
pub fn render(f: &mut Frame, area: Rect, notification: &Notification, palette: &Base16Palette) {
    if area.height == 0 {
        return;
    }
    let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    f.render_widget(Clear, row);
    f.render_widget(Paragraph::new(styled_line(notification, palette)), row);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::current_theme;
    use std::time::Duration;

    #[test]
    fn error_lines_use_red_background() {
        let palette = current_theme();
        let notification =
            Notification::new("boom", NotificationLevel::Error, Duration::from_secs(1));
        let line = styled_line(&notification, palette);

        assert_eq!(line.spans[0].content, " boom ");
        assert_eq!(line.spans[0].style.bg, Some(palette.base_08));
    }
}

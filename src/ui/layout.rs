//! Layout components (panes and status bar)

use crate::app::App;
use crate::platform::{FOCUS_SHORTCUT, THEME_SHORTCUT};
use crate::state::Focus;
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Areas of the main screen
pub struct ScreenLayout {
    pub form: Rect,
    pub list: Rect,
    pub status: Rect,
}

/// Split the screen into form (left), user list (right) and a status bar
pub fn create_layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Form
            Constraint::Percentage(50), // User list
        ])
        .split(rows[0]);

    ScreenLayout {
        form: columns[0],
        list: columns[1],
        status: rows[1],
    }
}

/// Draw the status bar: feedback message on the left, key hints on the right
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let hints = match app.state.focus {
        Focus::Form => "Tab: next  Enter: add user  Esc: quit",
        Focus::List => "j/k: move  Enter: select  Esc: clear",
    };

    let mut spans = Vec::new();
    if app.is_submitting() {
        spans.push(Span::styled(
            "Adding user... ",
            Style::default().fg(palette.accent),
        ));
    } else if let Some(ref message) = app.status_message {
        spans.push(Span::styled(
            format!("{message} "),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        format!(
            "| {hints}  {FOCUS_SHORTCUT}: switch pane  {THEME_SHORTCUT}: {} theme",
            app.state.theme.toggle().label()
        ),
        Style::default().fg(palette.muted),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

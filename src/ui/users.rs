//! User list, selected user panel and statistics

use crate::app::App;
use crate::state::{Focus, UserRecord};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Draw the user list pane
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let focused = app.state.focus == Focus::List;
    let block = Block::default()
        .title(format!(" User List ({}) ", app.state.users.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            palette.accent
        } else {
            palette.muted
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let current_height = if app.state.current_user.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(current_height), // Selected user
            Constraint::Min(0),                 // List
            Constraint::Length(1),              // Statistics
        ])
        .split(inner);

    if let Some(ref user) = app.state.current_user {
        draw_current_user(frame, chunks[0], user, palette);
    }

    if app.state.users.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No users found. Add some users using the form!",
            Style::default().fg(palette.muted),
        )));
        frame.render_widget(empty, chunks[1]);
    } else {
        let items: Vec<ListItem> = app
            .state
            .users
            .iter()
            .map(|user| user_item(user, app.state.is_current(user), palette))
            .collect();
        let list = List::new(items).highlight_style(
            Style::default()
                .bg(palette.highlight_bg)
                .add_modifier(Modifier::BOLD),
        );
        let selected = focused.then_some(app.state.selected_index);
        let mut list_state = ListState::default().with_selected(selected);
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    let stats = Line::from(Span::styled(
        format!(
            "Total Users: {}  Selected: {}  In Storage: {}",
            app.state.users.len(),
            usize::from(app.state.current_user.is_some()),
            app.stored_count()
        ),
        Style::default().fg(palette.text),
    ));
    frame.render_widget(Paragraph::new(stats), chunks[2]);
}

fn user_item<'a>(user: &'a UserRecord, is_current: bool, palette: &Palette) -> ListItem<'a> {
    let marker = if is_current { "● " } else { "  " };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(marker, Style::default().fg(palette.success)),
            Span::styled(
                user.name(),
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("  {}  {}", user.email(), user.phone()),
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            format!("  {} years old  ID: {}", user.age(), user.id()),
            Style::default().fg(palette.muted),
        )),
    ])
}

fn draw_current_user(frame: &mut Frame, area: Rect, user: &UserRecord, palette: &Palette) {
    let block = Block::default()
        .title(" Selected User ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.success));
    let lines = vec![
        Line::from(Span::styled(user.name(), Style::default().fg(palette.success))),
        Line::from(Span::styled(user.email(), Style::default().fg(palette.text))),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

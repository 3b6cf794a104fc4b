//! User entry form rendering

use super::field_renderer::{draw_field, FieldView, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{Focus, Form};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the form, its submit button and the validity summary
pub fn draw_user_form(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let form = &app.form;
    let focused = app.state.focus == Focus::Form;

    let block = Block::default()
        .title(" Add New User ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            palette.accent
        } else {
            palette.muted
        }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = (0..form.field_count())
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Length(1)); // Submit button
    constraints.push(Constraint::Min(0)); // Summary

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for index in 0..form.field_count() {
        let Some(field) = form.get_field(index) else {
            continue;
        };
        let view = FieldView {
            field,
            error: form.errors().get(field.field),
            is_active: focused && form.active_field_index() == index,
            disabled: form.is_submitting(),
        };
        draw_field(frame, chunks[index], view, palette);
    }

    let button_index = form.field_count();
    let valid = form.is_form_valid();
    let (label, style) = if form.is_submitting() {
        ("[ Adding User... ]", Style::default().fg(palette.muted))
    } else if valid {
        (
            "[ Add User ]",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ Add User ]", Style::default().fg(palette.muted))
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(label, style))),
        chunks[button_index],
    );

    let (valid_label, valid_color) = if valid {
        ("yes", palette.success)
    } else {
        ("no", palette.error)
    };
    let summary = vec![
        Line::from(vec![
            Span::styled("Form Valid: ", Style::default().fg(palette.text)),
            Span::styled(valid_label, Style::default().fg(valid_color)),
        ]),
        Line::from(Span::styled(
            format!("Total Characters: {}", form.total_chars()),
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            "Name: letters and spaces, min 2 chars",
            Style::default().fg(palette.muted),
        )),
        Line::from(Span::styled(
            "Phone: 10-15 digits  Age: 18-120",
            Style::default().fg(palette.muted),
        )),
    ];
    frame.render_widget(Paragraph::new(summary), chunks[button_index + 1]);
}

//! Field rendering utilities for forms

use crate::state::{FieldError, FormField};
use crate::ui::theme::Palette;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: a bordered input plus the error line below it
pub const FIELD_HEIGHT: u16 = 4;

/// How a field should be drawn
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub field: &'a FormField,
    pub error: Option<FieldError>,
    pub is_active: bool,
    pub disabled: bool,
}

/// Draw a form field with its error message underneath
pub fn draw_field(frame: &mut Frame, area: Rect, view: FieldView, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_color = if view.error.is_some() {
        palette.error
    } else if view.is_active && !view.disabled {
        palette.accent
    } else {
        palette.muted
    };

    let is_empty = view.field.as_text().is_empty();
    let value_style = if is_empty || view.disabled {
        Style::default().fg(palette.muted)
    } else {
        Style::default().fg(palette.text)
    };

    let mut spans = vec![Span::styled(view.field.display_value(), value_style)];
    if view.is_active && !view.disabled {
        spans.push(Span::styled("▌", Style::default().fg(palette.accent)));
    }

    let block = Block::default()
        .title(format!(" {} ", view.field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    if let Some(error) = view.error {
        let message = Paragraph::new(Line::from(Span::styled(
            format!(" {error}"),
            Style::default()
                .fg(palette.error)
                .add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(message, chunks[1]);
    }
}

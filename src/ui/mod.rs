//! UI module for rendering the TUI

mod forms;
mod layout;
mod theme;
mod users;

use crate::app::App;
use ratatui::{style::Style, widgets::Block, Frame};
use theme::Palette;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.state.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let screen = layout::create_layout(area);
    forms::draw_user_form(frame, screen.form, app, &palette);
    users::draw_list(frame, screen.list, app, &palette);
    layout::draw_status_bar(frame, screen.status, app, &palette);
}

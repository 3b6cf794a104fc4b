//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `user_form`: The user entry form

mod field_renderer;
mod user_form;

pub use user_form::draw_user_form;

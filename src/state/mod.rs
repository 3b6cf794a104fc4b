//! Application state module

mod app_state;
mod forms;
mod user;

pub use app_state::*;
pub use forms::*;
pub use user::*;

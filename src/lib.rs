//! Roster TUI library
//!
//! The user entry form engine (`state`), the persistence port (`storage`),
//! the user creation gateway (`service`) and the terminal shell (`app`, `ui`).

pub mod app;
pub mod config;
pub mod platform;
pub mod service;
pub mod state;
pub mod storage;
pub mod ui;

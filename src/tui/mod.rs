//! Interactive terminal UI: registration form, user table and edit form
//! over the user-records backend.

pub mod app;
pub mod screens;
pub mod ui;

pub use app::App;

pub mod cli;
pub mod config;
pub mod form;
pub mod gateway;
pub mod models;
pub mod tui;

//! Terminal front end: drives the core state machine and renders its view.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod ui;

pub use app::{run_app, EXIT_SETUP_FAILED};

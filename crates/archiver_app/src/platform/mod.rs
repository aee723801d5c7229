//! Console front-end: configuration, effect execution and the interactive
//! shell driving the core state machine.
pub mod app;
pub mod config;
pub mod effects;
pub mod ui;

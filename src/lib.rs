// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod canvas;
pub mod config;
pub mod error;
pub mod guess;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod timer;
pub mod ui;
pub mod words;

//! Form editor for JSON and YAML documents that exposes only approved paths
//! and keeps a raw text view in sync with the form.

pub mod config;
pub mod core;
pub mod runtime;
pub mod source;
pub mod state;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use config::Config;
pub use state::{AppState, Session};

pub mod command;
pub mod effect;
pub mod event;
pub mod key_bindings;
pub mod reducer;
pub mod runner;

pub use runner::Runtime;

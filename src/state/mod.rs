pub mod app;
pub mod session;

pub use app::{AppState, Pane};
pub use session::{Session, SessionError};

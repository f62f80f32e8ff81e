//! Interactive chat sessions with bounded history

mod history;
mod session;

pub use history::{History, Turn};
pub use session::{Session, SessionMode, EXIT_WORD};

pub mod tui;

pub use tui::{TerminalDialogs, TuiApplication};

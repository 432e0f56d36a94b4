//! UIモジュール
//!
//! ratatuiベースのターミナルUI機能

pub mod menu;
pub mod popup;
pub mod renderer;
pub mod text_area;

// 公開API
pub use menu::{MenuOutcome, MenuState};
pub use renderer::{window_title, Renderer, ScreenLayout, APP_TITLE};
pub use text_area::{TextArea, WrapLayout};

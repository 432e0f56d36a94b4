//! 入力処理モジュール
//!
//! メニューコマンドの定義とキーバインド

pub mod commands;
pub mod keybinding;

// 公開API
pub use commands::{Command, Menu, MENUS};
pub use keybinding::{Action, EditAction, Key, KeyCode, KeyMap, KeyModifiers};

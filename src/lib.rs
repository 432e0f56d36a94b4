//! noteit - Note It Down
//!
//! メニューバー、テキストエリア、単語数ステータスバーを持つ最小構成のテキストエディタ

// コアモジュール
pub mod error;
pub mod logging;
pub mod options;

// データ層
pub mod document;
pub mod display;
pub mod file;

// 外部サービス
pub mod clipboard;
pub mod print;

// ロジック層
pub mod dialog;
pub mod input;
pub mod shell;

// 表示層
pub mod frontend;
pub mod ui;

// 公開API
pub use document::Document;
pub use display::{word_count, DisplayState, Theme};
pub use error::{NoteError, Result};
pub use frontend::TuiApplication;
pub use input::Command;
pub use shell::{DispatchOutcome, EditorShell};

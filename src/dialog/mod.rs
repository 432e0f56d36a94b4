//! モーダルダイアログ
//!
//! 各ダイアログは呼び出しスレッドをブロックし、ユーザーの選択を値として返す

pub mod confirm;
pub mod file_chooser;

pub use confirm::{ConfirmChoice, ConfirmPrompt};
pub use file_chooser::{ChooserEntry, ChooserMode, ChooserOutcome, FileChooser};

use std::path::{Path, PathBuf};

/// ダイアログ表示のトレイト
pub trait Dialogs {
    /// 未保存の変更をどうするか確認する
    fn confirm_unsaved(&mut self) -> ConfirmChoice;

    /// 開くファイルを選ぶ。キャンセル時は `None`
    fn choose_open_path(&mut self) -> Option<PathBuf>;

    /// 保存先を選ぶ。`suggested` は初期表示するファイル
    fn choose_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf>;

    /// バージョン情報を表示する
    fn show_about(&mut self);
}

/// About ダイアログの本文
pub fn about_text() -> String {
    format!(
        "Note It Down {}\nA minimal terminal text editor",
        env!("CARGO_PKG_VERSION")
    )
}

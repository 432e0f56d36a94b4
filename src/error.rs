//! エラーハンドリングシステム
//!
//! noteit 全体で使用される統一されたエラー型とユーティリティを定義
//! ファイル・印刷エラーはシェル内でログに記録し、UIエラーのみ呼び出し元へ伝播する

use std::io;
use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug, Clone)]
pub enum NoteError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// 印刷エラー
    #[error("Print failed: {0}")]
    Print(#[from] PrintError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Encoding error in {path}: {message}")]
    Encoding { path: String, message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

impl FileError {
    /// `std::io::Error` を対象パス付きで分類
    pub fn from_io(error: &io::Error, path: &std::path::Path) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            io::ErrorKind::NotFound => FileError::NotFound { path },
            io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            io::ErrorKind::InvalidData => FileError::Encoding {
                path,
                message: error.to_string(),
            },
            _ => FileError::Io {
                message: format!("{}: {}", path, error),
            },
        }
    }
}

/// 印刷固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    #[error("Failed to start print command `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("Print command `{command}` exited with {status}")]
    Failed { command: String, status: String },

    #[error("Print IO error: {message}")]
    Io { message: String },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone)]
pub enum UiError {
    #[error("Terminal initialization failed")]
    TerminalInit,

    #[error("Rendering failed: {component}")]
    RenderingFailed { component: String },
}

/// 設定固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown option: {option}")]
    UnknownOption { option: String },

    #[error("Missing value for {option}")]
    MissingValue { option: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, NoteError>;

/// 各モジュール固有のResult型
pub mod file {
    pub type Result<T> = std::result::Result<T, super::FileError>;
}

pub mod print {
    pub type Result<T> = std::result::Result<T, super::PrintError>;
}

/// パニックハンドラの設定
///
/// raw モードと代替画面を解除してからパニック内容を出力する
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        crate::frontend::tui::restore_terminal();

        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        log::error!("PANIC at {}: {}", location, panic_info);

        default_hook(panic_info);
    }));
}

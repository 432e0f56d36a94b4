//! ロギングシステム
//!
//! `log` クレートのバックエンドとして診断ログをファイルへ出力する
//! 端末が raw モードの間は標準エラー出力を使わない

use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// ログ出力先ファイルの既定パス（キャッシュディレクトリ配下）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("noteit").join("noteit.log"))
}

/// ファイル出力ロガー
///
/// * ログレベルで出力を絞り込む
/// * 1行ごとにファイルを開いて追記する（スコープ内でハンドルを解放）
#[derive(Debug)]
pub struct FileLogger {
    level: LevelFilter,
    output_file: Option<PathBuf>,
    // 追記の順序を保つためのロック
    write_lock: Mutex<()>,
}

impl FileLogger {
    /// デフォルト構築
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            output_file: None,
            write_lock: Mutex::new(()),
        }
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// 出力先ファイル
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    fn should_log(&self, level: log::Level) -> bool {
        level <= self.level
    }

    fn write_line(&self, line: &str) {
        let Some(path) = &self.output_file else {
            return;
        };

        let _guard = self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{}", line);
        }
    }
}

/// 1行分のログを整形
pub fn format_record(record: &Record<'_>) -> String {
    format!("{:<5} {}: {}", record.level(), record.target(), record.args())
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.should_log(metadata.level())
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.write_line(&format_record(record));
        }
    }

    fn flush(&self) {}
}

/// グローバルロガーを初期化
///
/// 既に初期化済みの場合は何もしない（テストで複数回呼ばれるため）
pub fn init(level: LevelFilter, path: Option<&Path>) {
    let mut logger = FileLogger::new(level);
    if let Some(path) = path {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        logger = logger.with_file_output(path);
    }

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

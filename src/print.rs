//! 印刷
//!
//! ドキュメントのテキストをOSの印刷スプーラー（既定は `lpr`）へ標準入力で渡す。
//! ページ分けはスプーラーの既定に従う。

use crate::error::{print::Result, PrintError};
use std::io::Write;
use std::process::{Command, Stdio};

/// 印刷のトレイト
pub trait Printer {
    fn print(&mut self, text: &str) -> Result<()>;
}

/// スプーラーコマンド経由の印刷
#[derive(Debug, Clone)]
pub struct SpoolPrinter {
    command: String,
    args: Vec<String>,
}

impl SpoolPrinter {
    /// コマンドライン文字列から作成（空白区切りで引数を分ける）
    pub fn new(command_line: &str) -> Self {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let command = parts.next().unwrap_or_default();
        Self {
            command,
            args: parts.collect(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Printer for SpoolPrinter {
    fn print(&mut self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| PrintError::Spawn {
                command: self.command.clone(),
                message: e.to_string(),
            })?;

        // stdin はこのスコープの終わりで閉じる
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                drop(stdin);
                // 入力を読まずに終了したスプーラーも回収する
                if let Err(wait_err) = child.wait() {
                    log::warn!("failed to reap `{}`: {}", self.command, wait_err);
                }
                return Err(PrintError::Io { message: e.to_string() });
            }
        }

        let status = child
            .wait()
            .map_err(|e| PrintError::Io { message: e.to_string() })?;
        if !status.success() {
            return Err(PrintError::Failed {
                command: self.command.clone(),
                status: status.to_string(),
            });
        }

        log::info!("sent {} bytes to `{}`", text.len(), self.command);
        Ok(())
    }
}

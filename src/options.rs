//! 起動オプション
//!
//! 設定ファイルは持たず、コマンドライン引数のみを解釈する

use crate::error::ConfigError;
use log::LevelFilter;
use std::path::PathBuf;

/// 既定の印刷スプーラーコマンド
pub const DEFAULT_PRINT_COMMAND: &str = "lpr";

/// 起動時の動作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// エディタを起動
    Edit(AppOptions),
    /// 使い方を表示して終了
    Help,
    /// バージョンを表示して終了
    Version,
}

/// エディタ起動オプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    /// 起動時に開くファイル
    pub file: Option<PathBuf>,
    /// 診断ログの出力先
    pub debug_log: Option<PathBuf>,
    /// ログレベル
    pub log_level: LevelFilter,
    /// 印刷スプーラーコマンド
    pub print_command: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            file: None,
            debug_log: crate::logging::default_log_path(),
            log_level: LevelFilter::Info,
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
        }
    }
}

/// 使い方
pub fn usage() -> String {
    format!(
        "noteit {}\n\
         Note It Down - a minimal terminal text editor\n\n\
         USAGE:\n    noteit [OPTIONS] [FILE]\n\n\
         OPTIONS:\n\
         \x20   --debug-log <PATH>       write diagnostics to PATH\n\
         \x20   --log-level <LEVEL>      error, warn, info, debug or trace\n\
         \x20   --print-command <CMD>    print spooler command (default: {})\n\
         \x20   -h, --help               show this help\n\
         \x20   -V, --version            show version\n",
        env!("CARGO_PKG_VERSION"),
        DEFAULT_PRINT_COMMAND
    )
}

/// 引数列（プログラム名を除く）を解釈
pub fn parse_args<I, S>(args: I) -> Result<RunMode, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut options = AppOptions::default();
    let mut iter = args.into_iter().map(Into::into).peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(RunMode::Help),
            "-V" | "--version" => return Ok(RunMode::Version),
            "--debug-log" => {
                let value = take_value(&mut iter, &arg)?;
                options.debug_log = Some(PathBuf::from(value));
            }
            "--log-level" => {
                let value = take_value(&mut iter, &arg)?;
                options.log_level = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "log-level".to_string(),
                    value: value.clone(),
                })?;
            }
            "--print-command" => {
                let value = take_value(&mut iter, &arg)?;
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        key: "print-command".to_string(),
                        value,
                    });
                }
                options.print_command = value;
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(ConfigError::UnknownOption {
                    option: flag.to_string(),
                });
            }
            _ => {
                if options.file.is_some() {
                    return Err(ConfigError::InvalidValue {
                        key: "file".to_string(),
                        value: arg,
                    });
                }
                options.file = Some(PathBuf::from(arg));
            }
        }
    }

    Ok(RunMode::Edit(options))
}

fn take_value<I>(iter: &mut std::iter::Peekable<I>, option: &str) -> Result<String, ConfigError>
where
    I: Iterator<Item = String>,
{
    match iter.peek() {
        Some(next) if !next.starts_with('-') => Ok(iter.next().unwrap_or_default()),
        _ => Err(ConfigError::MissingValue {
            option: option.to_string(),
        }),
    }
}

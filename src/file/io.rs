//! ファイルI/O操作
//!
//! テキストファイルの読み込みと保存。ファイルハンドルは1回の呼び出しの中でのみ保持する。

use crate::error::{file::Result, FileError};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// ファイル操作のトレイト
pub trait FileOperations {
    /// ファイルからテキストを読み込み
    fn read_file(&self, path: &Path) -> Result<String>;

    /// テキストをファイルに書き込み
    fn write_file(&self, path: &Path, content: &str) -> Result<()>;
}

/// プレーンテキストファイル操作の実装
#[derive(Debug, Clone)]
pub struct TextFileOperations {
    /// 一時ファイル経由で保存するか
    atomic_save: bool,
}

impl TextFileOperations {
    pub fn new() -> Self {
        Self { atomic_save: true }
    }

    /// 直接書き込みに切り替える
    pub fn with_direct_save(mut self) -> Self {
        self.atomic_save = false;
        self
    }

    /// アトミック保存（一時ファイル経由）
    fn atomic_save_impl(&self, path: &Path, content: &str) -> Result<()> {
        let temp_path = generate_temp_path(path)?;
        log::debug!("atomic save via {}", temp_path.display());

        self.direct_save_impl(&temp_path, content)?;

        fs::rename(&temp_path, path).map_err(|e| {
            // 一時ファイル削除を試行
            let _ = fs::remove_file(&temp_path);
            FileError::from_io(&e, path)
        })
    }

    /// 直接保存
    fn direct_save_impl(&self, path: &Path, content: &str) -> Result<()> {
        let file = File::create(path).map_err(|e| FileError::from_io(&e, path))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| FileError::from_io(&e, path))
    }
}

impl Default for TextFileOperations {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOperations for TextFileOperations {
    fn read_file(&self, path: &Path) -> Result<String> {
        // ディレクトリではないことを確認
        if path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| FileError::from_io(&e, path))?;
        let mut content = String::new();
        BufReader::new(file)
            .read_to_string(&mut content)
            .map_err(|e| FileError::from_io(&e, path))?;

        Ok(content)
    }

    fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if path.file_name().is_none() || path.is_dir() {
            return Err(FileError::InvalidPath {
                path: path.display().to_string(),
            });
        }

        if self.atomic_save {
            self.atomic_save_impl(path, content)
        } else {
            self.direct_save_impl(path, content)
        }
    }
}

fn generate_temp_path(original: &Path) -> Result<PathBuf> {
    let filename = original.file_name().ok_or_else(|| FileError::InvalidPath {
        path: original.display().to_string(),
    })?;

    // 一意な一時ファイル名生成
    let temp_name = format!(".{}_{}", filename.to_string_lossy(), std::process::id());

    Ok(match original.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

/// ファイル読み込みの便利関数
pub fn read_text(path: &Path) -> Result<String> {
    TextFileOperations::new().read_file(path)
}

/// ファイル書き込みの便利関数
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    TextFileOperations::new().write_file(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_and_read_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        let content = "Hello, World!\r\nこんにちは！\n";

        write_text(&file_path, content).unwrap();
        assert_eq!(read_text(&file_path).unwrap(), content);

        // 一時ファイルが残っていないこと
        let leftovers: Vec<_> = fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_direct_save_overwrites() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("direct.txt");
        let ops = TextFileOperations::new().with_direct_save();

        ops.write_file(&file_path, "first version").unwrap();
        ops.write_file(&file_path, "second").unwrap();
        assert_eq!(ops.read_file(&file_path).unwrap(), "second");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing.txt");
        assert!(matches!(read_text(&missing), Err(FileError::NotFound { .. })));
    }

    #[test]
    fn test_read_directory_is_invalid() {
        let temp_dir = tempdir().unwrap();
        assert!(matches!(
            read_text(temp_dir.path()),
            Err(FileError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_read_invalid_utf8_is_encoding_error() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("binary.txt");
        fs::write(&file_path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(read_text(&file_path), Err(FileError::Encoding { .. })));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("no").join("such").join("dir.txt");
        assert!(write_text(&file_path, "x").is_err());
    }
}

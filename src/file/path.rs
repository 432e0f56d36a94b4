//! パス処理ユーティリティ
//!
//! `.txt` 拡張子の判定・付与と、ダイアログ入力のパス展開

use std::path::{Path, PathBuf};

/// 対象とするテキストファイルの拡張子
pub const TEXT_EXTENSION: &str = "txt";

/// `.txt` ファイルかどうか（大文字小文字を区別しない）
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(TEXT_EXTENSION))
        .unwrap_or(false)
}

/// 保存時に付与する接尾辞
pub const TEXT_SUFFIX: &str = ".txt";

/// ファイル名に `.txt` が含まれていなければ付与する（大文字小文字を区別する）
///
/// `notes` → `notes.txt`、`notes.txt` と `notes.txt.bak` はそのまま、`NOTES.TXT` → `NOTES.TXT.txt`。
pub fn ensure_txt_extension(path: &Path) -> PathBuf {
    let Some(name) = path.file_name() else {
        return path.to_path_buf();
    };
    if name.to_string_lossy().contains(TEXT_SUFFIX) {
        return path.to_path_buf();
    }

    let mut name = name.to_os_string();
    name.push(TEXT_SUFFIX);
    path.with_file_name(name)
}

/// ダイアログに入力された文字列をパスに展開
///
/// `~` をホームディレクトリに展開し、相対パスは `base` からの相対として解決する
pub fn expand_input(input: &str, base: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(input.trim());
    let path = PathBuf::from(expanded.as_ref());
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

//! ファイル選択ダイアログ
//!
//! ディレクトリと `.txt` ファイルのみを一覧表示する（「すべてのファイル」は選べない）

use crate::file::{expand_input, is_text_file};
use crate::input::{Key, KeyCode};
use std::fs;
use std::path::{Path, PathBuf};

/// ダイアログの用途
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChooserMode {
    Open,
    Save,
}

impl ChooserMode {
    pub fn title(self) -> &'static str {
        match self {
            ChooserMode::Open => "Open",
            ChooserMode::Save => "Save",
        }
    }
}

/// 一覧の1項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserEntry {
    /// 親ディレクトリ（`..`）
    Parent,
    Directory(String),
    File(String),
}

impl ChooserEntry {
    /// 表示名
    pub fn display_name(&self) -> String {
        match self {
            ChooserEntry::Parent => "../".to_string(),
            ChooserEntry::Directory(name) => format!("{}/", name),
            ChooserEntry::File(name) => name.clone(),
        }
    }
}

/// キー入力処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooserOutcome {
    /// 入力継続中
    Pending,
    /// パスが選ばれた
    Approved(PathBuf),
    /// キャンセルされた
    Cancelled,
}

/// ファイル選択ダイアログの状態
#[derive(Debug, Clone)]
pub struct FileChooser {
    mode: ChooserMode,
    dir: PathBuf,
    entries: Vec<ChooserEntry>,
    selected: usize,
    input: String,
}

impl FileChooser {
    /// 指定ディレクトリで開始
    pub fn new(mode: ChooserMode, dir: &Path) -> Self {
        let dir = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        let mut chooser = Self {
            mode,
            dir,
            entries: Vec::new(),
            selected: 0,
            input: String::new(),
        };
        chooser.refresh();
        chooser
    }

    /// 既存ファイルを初期選択として開始（保存ダイアログ用）
    pub fn with_suggestion(mode: ChooserMode, fallback_dir: &Path, suggested: Option<&Path>) -> Self {
        let dir = suggested
            .and_then(Path::parent)
            .filter(|parent| parent.is_dir())
            .unwrap_or(fallback_dir);
        let mut chooser = Self::new(mode, dir);
        if let Some(name) = suggested.and_then(Path::file_name) {
            chooser.input = name.to_string_lossy().into_owned();
        }
        chooser
    }

    pub fn mode(&self) -> ChooserMode {
        self.mode
    }

    /// 表示中のディレクトリ
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[ChooserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// ファイル名入力欄
    pub fn input(&self) -> &str {
        &self.input
    }

    /// キー入力を処理
    pub fn handle_key(&mut self, key: &Key) -> ChooserOutcome {
        match &key.code {
            KeyCode::Esc => ChooserOutcome::Cancelled,
            KeyCode::Enter => self.submit(),
            KeyCode::Up => {
                self.select(self.selected.saturating_sub(1));
                ChooserOutcome::Pending
            }
            KeyCode::Down => {
                self.select(self.selected + 1);
                ChooserOutcome::Pending
            }
            KeyCode::Backspace => {
                self.input.pop();
                ChooserOutcome::Pending
            }
            KeyCode::Char(ch) if !key.modifiers.ctrl && !key.modifiers.alt => {
                self.input.push(*ch);
                ChooserOutcome::Pending
            }
            _ => ChooserOutcome::Pending,
        }
    }

    fn select(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = index.min(self.entries.len() - 1);
        // ファイルを選ぶと入力欄に名前が入る
        match &self.entries[self.selected] {
            ChooserEntry::File(name) => self.input = name.clone(),
            ChooserEntry::Parent | ChooserEntry::Directory(_) => self.input.clear(),
        }
    }

    fn submit(&mut self) -> ChooserOutcome {
        if !self.input.trim().is_empty() {
            let path = expand_input(&self.input, &self.dir);
            if path.is_dir() {
                self.navigate(path);
                return ChooserOutcome::Pending;
            }
            return ChooserOutcome::Approved(path);
        }

        match self.entries.get(self.selected).cloned() {
            Some(ChooserEntry::Parent) => {
                if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
                    self.navigate(parent);
                }
                ChooserOutcome::Pending
            }
            Some(ChooserEntry::Directory(name)) => {
                let target = self.dir.join(name);
                self.navigate(target);
                ChooserOutcome::Pending
            }
            Some(ChooserEntry::File(name)) => ChooserOutcome::Approved(self.dir.join(name)),
            None => ChooserOutcome::Pending,
        }
    }

    fn navigate(&mut self, dir: PathBuf) {
        self.dir = fs::canonicalize(&dir).unwrap_or(dir);
        self.input.clear();
        self.refresh();
    }

    /// 一覧を読み直す
    fn refresh(&mut self) {
        self.entries = list_entries(&self.dir);
        self.selected = 0;
    }
}

/// ディレクトリの一覧（ディレクトリ → `.txt` ファイルの順、隠しファイルは除外）
pub fn list_entries(dir: &Path) -> Vec<ChooserEntry> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    match fs::read_dir(dir) {
        Ok(read_dir) => {
            for entry in read_dir.flatten() {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    continue;
                }
                let path = entry.path();
                if path.is_dir() {
                    dirs.push(name);
                } else if is_text_file(&path) {
                    files.push(name);
                }
            }
        }
        Err(err) => log::warn!("cannot list {}: {}", dir.display(), err),
    }

    dirs.sort();
    files.sort();

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if dir.parent().is_some() {
        entries.push(ChooserEntry::Parent);
    }
    entries.extend(dirs.into_iter().map(ChooserEntry::Directory));
    entries.extend(files.into_iter().map(ChooserEntry::File));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(code: KeyCode) -> Key {
        Key::plain(code)
    }

    fn type_text(chooser: &mut FileChooser, text: &str) {
        for ch in text.chars() {
            chooser.handle_key(&key(KeyCode::Char(ch)));
        }
    }

    fn fixture() -> tempfile::TempDir {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();
        fs::write(temp_dir.path().join("a.TXT"), "a").unwrap();
        fs::write(temp_dir.path().join("image.png"), "png").unwrap();
        fs::write(temp_dir.path().join(".hidden.txt"), "h").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        fs::write(temp_dir.path().join("sub").join("inner.txt"), "inner").unwrap();
        temp_dir
    }

    #[test]
    fn test_lists_only_directories_and_text_files() {
        let temp_dir = fixture();
        let entries = list_entries(temp_dir.path());
        assert_eq!(
            entries,
            vec![
                ChooserEntry::Parent,
                ChooserEntry::Directory("sub".to_string()),
                ChooserEntry::File("a.TXT".to_string()),
                ChooserEntry::File("b.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_navigate_into_directory_and_pick_file() {
        let temp_dir = fixture();
        let mut chooser = FileChooser::new(ChooserMode::Open, temp_dir.path());

        chooser.handle_key(&key(KeyCode::Down));
        assert_eq!(chooser.entries()[chooser.selected()], ChooserEntry::Directory("sub".to_string()));
        assert_eq!(chooser.handle_key(&key(KeyCode::Enter)), ChooserOutcome::Pending);
        assert!(chooser.dir().ends_with("sub"));

        chooser.handle_key(&key(KeyCode::Down));
        assert_eq!(chooser.input(), "inner.txt");
        match chooser.handle_key(&key(KeyCode::Enter)) {
            ChooserOutcome::Approved(path) => assert!(path.ends_with("sub/inner.txt")),
            other => panic!("Expected approval, got {:?}", other),
        }
    }

    #[test]
    fn test_parent_entry_goes_up() {
        let temp_dir = fixture();
        let mut chooser = FileChooser::new(ChooserMode::Open, &temp_dir.path().join("sub"));
        assert_eq!(chooser.entries()[0], ChooserEntry::Parent);
        chooser.handle_key(&key(KeyCode::Enter));
        assert_eq!(chooser.dir(), fs::canonicalize(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_typed_name_is_resolved_against_current_directory() {
        let temp_dir = fixture();
        let mut chooser = FileChooser::new(ChooserMode::Save, temp_dir.path());
        type_text(&mut chooser, "notez");
        chooser.handle_key(&key(KeyCode::Backspace));
        type_text(&mut chooser, "s");

        assert_eq!(
            chooser.handle_key(&key(KeyCode::Enter)),
            ChooserOutcome::Approved(fs::canonicalize(temp_dir.path()).unwrap().join("notes"))
        );
    }

    #[test]
    fn test_typed_directory_navigates() {
        let temp_dir = fixture();
        let mut chooser = FileChooser::new(ChooserMode::Open, temp_dir.path());
        type_text(&mut chooser, "sub");
        assert_eq!(chooser.handle_key(&key(KeyCode::Enter)), ChooserOutcome::Pending);
        assert!(chooser.dir().ends_with("sub"));
        assert_eq!(chooser.input(), "");
    }

    #[test]
    fn test_escape_cancels() {
        let temp_dir = fixture();
        let mut chooser = FileChooser::new(ChooserMode::Open, temp_dir.path());
        assert_eq!(chooser.handle_key(&key(KeyCode::Esc)), ChooserOutcome::Cancelled);
    }

    #[test]
    fn test_suggestion_prefills_name_and_directory() {
        let temp_dir = fixture();
        let suggested = temp_dir.path().join("sub").join("inner.txt");
        let chooser = FileChooser::with_suggestion(ChooserMode::Save, Path::new("/"), Some(&suggested));
        assert!(chooser.dir().ends_with("sub"));
        assert_eq!(chooser.input(), "inner.txt");
    }
}

//! ドキュメントモデル
//!
//! エディタが保持する唯一のテキストと、キャレット・選択範囲・変更フラグを管理する。
//! 位置はすべて文字単位（バイトではない）で扱う。

use std::ops::Range;
use std::path::{Path, PathBuf};

/// キャレット移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    DocumentStart,
    DocumentEnd,
    /// 指定行数だけ上へ
    PageUp(usize),
    /// 指定行数だけ下へ
    PageDown(usize),
}

/// 行・列で表したキャレット位置（0始まり、列は文字数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

/// 編集中のドキュメント
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: String,
    /// キャレット位置（文字インデックス）
    caret: usize,
    /// 選択開始位置。キャレットと異なるときのみ選択範囲が存在する
    anchor: Option<usize>,
    /// 上下移動時に維持する列
    preferred_column: Option<usize>,
    dirty: bool,
    path: Option<PathBuf>,
}

impl Document {
    /// 空のドキュメントを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// テキストを指定して作成（未変更扱い）
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut document = Self::new();
        document.replace_text(text, None);
        document
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// 文字数
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    /// 保存されていない変更があるか
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// 最後に開いた/保存したファイル
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 選択範囲（文字インデックス）
    pub fn selection(&self) -> Option<Range<usize>> {
        match self.anchor {
            Some(anchor) if anchor != self.caret => {
                Some(anchor.min(self.caret)..anchor.max(self.caret))
            }
            _ => None,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selection().is_some()
    }

    /// 選択中のテキスト
    pub fn selected_text(&self) -> Option<&str> {
        let range = self.selection()?;
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        Some(&self.text[start..end])
    }

    /// 全消去（New）
    pub fn clear(&mut self) {
        self.replace_text(String::new(), None);
    }

    /// テキストを丸ごと置き換える（Open）
    pub fn replace_text(&mut self, text: impl Into<String>, path: Option<PathBuf>) {
        self.text = text.into();
        self.caret = 0;
        self.anchor = None;
        self.preferred_column = None;
        self.dirty = false;
        self.path = path;
    }

    /// 保存完了を記録
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.dirty = false;
        self.path = Some(path);
    }

    /// 全選択
    pub fn select_all(&mut self) {
        self.anchor = Some(0);
        self.caret = self.char_len();
        self.preferred_column = None;
    }

    /// 文字を挿入（選択範囲は置き換え）
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// 文字列を挿入（選択範囲は置き換え）
    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        if text.is_empty() {
            return;
        }

        let at = self.byte_index(self.caret);
        self.text.insert_str(at, text);
        self.caret += text.chars().count();
        self.preferred_column = None;
        self.dirty = true;
    }

    /// 選択範囲を削除して、削除したテキストを返す
    pub fn delete_selection(&mut self) -> Option<String> {
        let range = self.selection()?;
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        let removed: String = self.text.drain(start..end).collect();

        self.caret = range.start;
        self.anchor = None;
        self.preferred_column = None;
        self.dirty = true;
        Some(removed)
    }

    /// キャレット前の1文字（または選択範囲）を削除
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection().is_some() {
            return true;
        }
        self.anchor = None;
        if self.caret == 0 {
            return false;
        }
        self.caret -= 1;
        self.remove_char_at_caret();
        true
    }

    /// キャレット位置の1文字（または選択範囲）を削除
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection().is_some() {
            return true;
        }
        self.anchor = None;
        if self.caret >= self.char_len() {
            return false;
        }
        self.remove_char_at_caret();
        true
    }

    fn remove_char_at_caret(&mut self) {
        let at = self.byte_index(self.caret);
        self.text.remove(at);
        self.preferred_column = None;
        self.dirty = true;
    }

    /// キャレットを移動。`extend` が真なら選択範囲を伸ばす
    pub fn move_caret(&mut self, movement: Movement, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.caret);
            }
        } else if let Some(range) = self.selection() {
            // 選択解除のみで左右移動は行わない
            match movement {
                Movement::Left => {
                    self.collapse_to(range.start);
                    return;
                }
                Movement::Right => {
                    self.collapse_to(range.end);
                    return;
                }
                _ => self.anchor = None,
            }
        } else {
            self.anchor = None;
        }

        let len = self.char_len();
        match movement {
            Movement::Left => {
                self.caret = self.caret.saturating_sub(1);
                self.preferred_column = None;
            }
            Movement::Right => {
                self.caret = (self.caret + 1).min(len);
                self.preferred_column = None;
            }
            Movement::Up => self.move_vertically(-1),
            Movement::Down => self.move_vertically(1),
            Movement::PageUp(lines) => self.move_vertically(-(lines.max(1) as isize)),
            Movement::PageDown(lines) => self.move_vertically(lines.max(1) as isize),
            Movement::LineStart => {
                let position = self.line_column(self.caret);
                self.caret = self.index_of(position.line, 0);
                self.preferred_column = None;
            }
            Movement::LineEnd => {
                let position = self.line_column(self.caret);
                self.caret = self.index_of(position.line, usize::MAX);
                self.preferred_column = None;
            }
            Movement::DocumentStart => {
                self.caret = 0;
                self.preferred_column = None;
            }
            Movement::DocumentEnd => {
                self.caret = len;
                self.preferred_column = None;
            }
        }
    }

    fn collapse_to(&mut self, index: usize) {
        self.caret = index;
        self.anchor = None;
        self.preferred_column = None;
    }

    fn move_vertically(&mut self, delta: isize) {
        let position = self.line_column(self.caret);
        let column = *self.preferred_column.get_or_insert(position.column);
        let last_line = self.line_count() - 1;
        let target = if delta < 0 {
            position.line.saturating_sub(delta.unsigned_abs())
        } else {
            (position.line + delta as usize).min(last_line)
        };

        if target == position.line {
            // 先頭行/最終行では行頭/行末へ
            self.caret = if delta < 0 { self.index_of(target, 0) } else { self.index_of(target, usize::MAX) };
            return;
        }
        self.caret = self.index_of(target, column);
    }

    /// 論理行数（空でも1行）
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// 文字インデックスを行・列に変換
    pub fn line_column(&self, index: usize) -> LineColumn {
        let mut position = LineColumn::default();
        for ch in self.text.chars().take(index) {
            if ch == '\n' {
                position.line += 1;
                position.column = 0;
            } else {
                position.column += 1;
            }
        }
        position
    }

    /// 行・列を文字インデックスに変換（列は行末でクランプ）
    pub fn index_of(&self, line: usize, column: usize) -> usize {
        let mut index = 0;
        let mut current_line = 0;
        let mut current_column = 0;
        for ch in self.text.chars() {
            if current_line == line {
                if ch == '\n' || current_column == column {
                    return index;
                }
                current_column += 1;
            } else if ch == '\n' {
                current_line += 1;
            }
            index += 1;
        }
        index
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_marks_dirty() {
        let mut doc = Document::new();
        assert!(!doc.is_dirty());

        doc.insert_str("hello");
        doc.insert_char(' ');
        doc.insert_str("world");

        assert_eq!(doc.text(), "hello world");
        assert_eq!(doc.caret(), 11);
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_multibyte_editing() {
        let mut doc = Document::new();
        doc.insert_str("こんにちは");
        doc.move_caret(Movement::Left, false);
        doc.move_caret(Movement::Left, false);
        doc.insert_char('X');
        assert_eq!(doc.text(), "こんにXちは");

        assert!(doc.backspace());
        assert!(doc.delete_forward());
        assert_eq!(doc.text(), "こんには");
        assert_eq!(doc.caret(), 3);
    }

    #[test]
    fn test_backspace_and_delete_at_edges() {
        let mut doc = Document::from_text("ab");
        assert!(!doc.backspace());
        doc.move_caret(Movement::DocumentEnd, false);
        assert!(!doc.delete_forward());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_selection_with_shift_movement() {
        let mut doc = Document::from_text("hello world");
        doc.move_caret(Movement::LineEnd, true);
        assert_eq!(doc.selection(), Some(0..11));

        doc.move_caret(Movement::Left, true);
        assert_eq!(doc.selected_text(), Some("hello worl"));

        // 非拡張の左移動は選択の先頭へ折りたたむ
        doc.move_caret(Movement::Left, false);
        assert_eq!(doc.caret(), 0);
        assert!(!doc.has_selection());
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut doc = Document::from_text("hello world");
        doc.move_caret(Movement::Right, false);
        for _ in 0..4 {
            doc.move_caret(Movement::Right, true);
        }
        assert_eq!(doc.selected_text(), Some("ello"));

        doc.insert_char('i');
        assert_eq!(doc.text(), "hi world");
        assert_eq!(doc.caret(), 2);
    }

    #[test]
    fn test_select_all_and_delete() {
        let mut doc = Document::from_text("one\ntwo");
        doc.select_all();
        assert_eq!(doc.selected_text(), Some("one\ntwo"));
        assert_eq!(doc.delete_selection().as_deref(), Some("one\ntwo"));
        assert!(doc.is_empty());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_select_all_on_empty_document_has_no_selection() {
        let mut doc = Document::new();
        doc.select_all();
        assert!(!doc.has_selection());
    }

    #[test]
    fn test_vertical_movement_keeps_column() {
        let mut doc = Document::from_text("abcdef\nxy\nlonger line");
        doc.move_caret(Movement::LineEnd, false);
        assert_eq!(doc.caret(), 6);

        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.line_column(doc.caret()), LineColumn { line: 1, column: 2 });

        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.line_column(doc.caret()), LineColumn { line: 2, column: 6 });

        doc.move_caret(Movement::Down, false);
        assert_eq!(doc.caret(), doc.char_len());

        doc.move_caret(Movement::PageUp(10), false);
        assert_eq!(doc.line_column(doc.caret()).line, 0);
    }

    #[test]
    fn test_line_column_round_trip() {
        let doc = Document::from_text("ab\n\ncde");
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.line_column(3), LineColumn { line: 1, column: 0 });
        assert_eq!(doc.index_of(2, 1), 5);
        assert_eq!(doc.index_of(0, 99), 2);
        assert_eq!(doc.index_of(9, 0), doc.char_len());
    }

    #[test]
    fn test_replace_and_save_reset_dirty_flag() {
        let mut doc = Document::new();
        doc.insert_str("draft");
        doc.mark_saved(PathBuf::from("draft.txt"));
        assert!(!doc.is_dirty());
        assert_eq!(doc.path(), Some(Path::new("draft.txt")));

        doc.insert_char('!');
        assert!(doc.is_dirty());

        doc.replace_text("opened", Some(PathBuf::from("other.txt")));
        assert!(!doc.is_dirty());
        assert_eq!(doc.caret(), 0);

        doc.clear();
        assert!(doc.is_empty());
        assert!(!doc.is_dirty());
        assert_eq!(doc.path(), None);
    }
}

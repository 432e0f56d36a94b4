//! テキストエリア描画
//!
//! 単語単位の折り返し、選択範囲の強調、キャレット位置の計算

use crate::display::Theme;
use crate::document::Document;
use ratatui::{
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// タブの表示幅
pub const TAB_WIDTH: usize = 4;

/// 1文字の表示幅
pub fn char_width(ch: char) -> usize {
    match ch {
        '\t' => TAB_WIDTH,
        _ => ch.width().unwrap_or(0),
    }
}

/// 折り返し後の1表示行（文字インデックスの範囲、改行は含まない）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub start: usize,
    pub end: usize,
}

/// 折り返しレイアウト
#[derive(Debug, Clone)]
pub struct WrapLayout {
    chars: Vec<char>,
    lines: Vec<VisualLine>,
    width: usize,
}

impl WrapLayout {
    /// テキストを指定幅で折り返す
    pub fn new(text: &str, width: usize) -> Self {
        let width = width.max(1);
        let chars: Vec<char> = text.chars().collect();
        let mut lines = Vec::new();

        let mut line_start = 0;
        for (idx, ch) in chars.iter().enumerate() {
            if *ch == '\n' {
                wrap_line(&chars[line_start..idx], line_start, width, &mut lines);
                line_start = idx + 1;
            }
        }
        wrap_line(&chars[line_start..], line_start, width, &mut lines);

        Self { chars, lines, width }
    }

    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    /// 表示行のテキスト
    pub fn line_text(&self, line: VisualLine) -> String {
        self.chars[line.start..line.end].iter().collect()
    }

    /// キャレットの表示位置（行, 列）
    ///
    /// 折り返し位置のキャレットは次の表示行の先頭に置く
    pub fn caret_position(&self, caret: usize) -> (usize, usize) {
        let row = self
            .lines
            .iter()
            .rposition(|line| line.start <= caret)
            .unwrap_or(0);
        let line = self.lines[row];
        let end = caret.min(line.end);
        let column: usize = self.chars[line.start..end].iter().map(|ch| char_width(*ch)).sum();
        (row, column.min(self.width - 1))
    }
}

fn wrap_line(chars: &[char], offset: usize, width: usize, out: &mut Vec<VisualLine>) {
    let mut start = 0;
    let mut column = 0;
    let mut last_break: Option<usize> = None;
    let mut idx = 0;

    while idx < chars.len() {
        let ch = chars[idx];
        let w = char_width(ch);

        if column + w > width && idx > start {
            if ch.is_whitespace() {
                // 行末の空白は行にぶら下げる
                idx += 1;
                out.push(VisualLine { start: offset + start, end: offset + idx });
                start = idx;
                column = 0;
                last_break = None;
                continue;
            }

            let split = match last_break {
                Some(brk) if brk > start => brk,
                _ => idx,
            };
            out.push(VisualLine { start: offset + start, end: offset + split });
            start = split;
            column = chars[start..idx].iter().map(|c| char_width(*c)).sum();
            last_break = None;
            continue;
        }

        column += w;
        if ch.is_whitespace() {
            last_break = Some(idx + 1);
        }
        idx += 1;
    }

    out.push(VisualLine { start: offset + start, end: offset + chars.len() });
}

/// テキストエリア描画器
#[derive(Debug, Default)]
pub struct TextArea {
    /// 表示先頭の表示行
    scroll: usize,
}

impl TextArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// キャレット行が見えるようにスクロール位置を調整
    fn follow_caret(&mut self, caret_row: usize, height: usize, total_rows: usize) {
        let height = height.max(1);
        self.scroll = self.scroll.min(total_rows.saturating_sub(1));
        if caret_row < self.scroll {
            self.scroll = caret_row;
        } else if caret_row >= self.scroll + height {
            self.scroll = caret_row + 1 - height;
        }
    }

    /// ドキュメントを描画し、キャレット位置にカーソルを置く
    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect, document: &Document, theme: Theme) {
        let layout = WrapLayout::new(document.text(), area.width as usize);
        let (caret_row, caret_col) = layout.caret_position(document.caret());
        self.follow_caret(caret_row, area.height as usize, layout.lines().len());

        let selection = document.selection();
        let lines: Vec<Line<'static>> = layout
            .lines()
            .iter()
            .skip(self.scroll)
            .take(area.height as usize)
            .map(|line| styled_line(&layout, *line, selection.as_ref(), theme))
            .collect();

        let paragraph = Paragraph::new(lines).block(Block::default().style(theme.text_style()));
        frame.render_widget(paragraph, area);

        if area.width > 0 && area.height > 0 {
            let x = area.x + caret_col as u16;
            let y = area.y + (caret_row - self.scroll) as u16;
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

/// 選択範囲を反転表示した1行
fn styled_line(
    layout: &WrapLayout,
    line: VisualLine,
    selection: Option<&Range<usize>>,
    theme: Theme,
) -> Line<'static> {
    let segment = |range: Range<usize>| -> String {
        layout.chars[range]
            .iter()
            .map(|ch| match ch {
                '\t' => " ".repeat(TAB_WIDTH),
                _ => ch.to_string(),
            })
            .collect()
    };

    let Some(selection) = selection else {
        return Line::from(Span::styled(segment(line.start..line.end), theme.text_style()));
    };

    let sel_start = selection.start.clamp(line.start, line.end);
    let sel_end = selection.end.clamp(line.start, line.end);
    let spans = vec![
        Span::styled(segment(line.start..sel_start), theme.text_style()),
        Span::styled(segment(sel_start..sel_end), theme.selection_style()),
        Span::styled(segment(sel_end..line.end), theme.text_style()),
    ];
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str, width: usize) -> Vec<String> {
        let layout = WrapLayout::new(text, width);
        layout.lines().iter().map(|line| layout.line_text(*line)).collect()
    }

    #[test]
    fn test_short_lines_are_not_wrapped() {
        assert_eq!(rows("ab\ncd", 10), vec!["ab", "cd"]);
        assert_eq!(rows("", 10), vec![""]);
        assert_eq!(rows("x\n", 10), vec!["x", ""]);
    }

    #[test]
    fn test_wraps_at_word_boundary() {
        assert_eq!(rows("hello world again", 11), vec!["hello world ", "again"]);
        assert_eq!(rows("hello world", 8), vec!["hello ", "world"]);
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(rows("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wide_characters() {
        // 全角文字は幅2
        assert_eq!(rows("日本語です", 4), vec!["日本", "語で", "す"]);
    }

    #[test]
    fn test_caret_position() {
        let layout = WrapLayout::new("hello world\nxy", 8);
        assert_eq!(layout.caret_position(0), (0, 0));
        assert_eq!(layout.caret_position(3), (0, 3));
        // 折り返し位置は次の行の先頭
        assert_eq!(layout.caret_position(6), (1, 0));
        assert_eq!(layout.caret_position(11), (1, 5));
        assert_eq!(layout.caret_position(12), (2, 0));
        assert_eq!(layout.caret_position(14), (2, 2));
    }

    #[test]
    fn test_caret_after_tab() {
        let layout = WrapLayout::new("\tx", 20);
        assert_eq!(layout.caret_position(1), (0, TAB_WIDTH));
    }

    #[test]
    fn test_follow_caret() {
        let mut area = TextArea::new();
        area.follow_caret(10, 5, 20);
        assert_eq!(area.scroll(), 6);
        area.follow_caret(2, 5, 20);
        assert_eq!(area.scroll(), 2);
        area.follow_caret(0, 5, 1);
        assert_eq!(area.scroll(), 0);
    }
}

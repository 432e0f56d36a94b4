//! 表示状態
//!
//! ドキュメントから導出される単語数と、テキストエリアの配色テーマ

use ratatui::style::{Color, Style};

/// 単語数を数える
///
/// 前後の空白を取り除いたテキスト中の、空白で区切られた非空白文字の連なりの数。
/// 空白のみのテキストは 0。
pub fn word_count(text: &str) -> usize {
    text.trim().split_whitespace().count()
}

/// ステータスバー表示用の文字列
pub fn status_text(words: usize) -> String {
    format!("Words: {}", words)
}

/// テキストエリアの配色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// もう一方のテーマ
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn foreground(self) -> Color {
        match self {
            Theme::Light => Color::Black,
            Theme::Dark => Color::Gray,
        }
    }

    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::White,
            Theme::Dark => Color::DarkGray,
        }
    }

    /// テキストエリアのスタイル
    pub fn text_style(self) -> Style {
        Style::default().fg(self.foreground()).bg(self.background())
    }

    /// 選択範囲のスタイル（前景と背景を反転）
    pub fn selection_style(self) -> Style {
        Style::default().fg(self.background()).bg(self.foreground())
    }
}

/// ドキュメントから導出される表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayState {
    pub word_count: usize,
    pub theme: Theme,
}

impl DisplayState {
    /// キャレット変更通知。テキストから単語数を再計算する
    pub fn on_caret_changed(&mut self, text: &str) {
        self.word_count = word_count(text);
    }

    /// ダークモード切り替え
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub fn status_text(&self) -> String {
        status_text(self.word_count)
    }
}

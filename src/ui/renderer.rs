//! 画面全体の描画
//!
//! メニューバー（1行目）、テキストエリア、ステータスバー（最終行）を配置する

use crate::input::MENUS;
use crate::shell::EditorShell;
use crate::ui::menu::MenuState;
use crate::ui::popup::{menu_title_offsets, render_menu_dropdown};
use crate::ui::text_area::TextArea;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// ウィンドウタイトル
pub const APP_TITLE: &str = "Note It Down";

/// 画面領域の割り当て
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub text_area: Rect,
    pub status_bar: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        Self {
            menu_bar: chunks[0],
            text_area: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// 画面描画器
#[derive(Debug, Default)]
pub struct Renderer {
    text_area: TextArea,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// エディタ画面を描画
    pub fn render(&mut self, frame: &mut Frame<'_>, shell: &EditorShell, menu: &MenuState) {
        let layout = ScreenLayout::new(frame.area());

        render_menu_bar(frame, layout.menu_bar, shell, menu);
        self.text_area
            .render(frame, layout.text_area, shell.document(), shell.display().theme);
        render_status_bar(frame, layout.status_bar, shell);
        render_menu_dropdown(frame, menu, layout.menu_bar);
    }
}

/// ウィンドウタイトル（ファイル名と変更印付き）
pub fn window_title(shell: &EditorShell) -> String {
    let document = shell.document();
    let name = document
        .path()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned());
    let modified = if document.is_dirty() { "*" } else { "" };
    match name {
        Some(name) => format!("{} - {}{}", APP_TITLE, name, modified),
        None => format!("{}{}", APP_TITLE, modified),
    }
}

fn render_menu_bar(frame: &mut Frame<'_>, area: Rect, shell: &EditorShell, menu: &MenuState) {
    let bar_style = Style::default().add_modifier(Modifier::REVERSED);
    let offsets = menu_title_offsets();

    let mut spans = Vec::with_capacity(MENUS.len() * 2 + 2);
    let mut used = 0usize;
    for (index, item) in MENUS.iter().enumerate() {
        let padding = offsets[index] as usize - used;
        spans.push(Span::styled(" ".repeat(padding), bar_style));
        let style = if menu.open_menu() == Some(index) {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            bar_style
        };
        spans.push(Span::styled(item.title, style));
        used = offsets[index] as usize + item.title.len();
    }

    let title = window_title(shell);
    let remaining = (area.width as usize).saturating_sub(used);
    let title_pad = remaining.saturating_sub(title.len() + 1);
    spans.push(Span::styled(" ".repeat(title_pad), bar_style));
    spans.push(Span::styled(format!("{} ", title), bar_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
}

fn render_status_bar(frame: &mut Frame<'_>, area: Rect, shell: &EditorShell) {
    let status = format!(" {}", shell.display().status_text());
    frame.render_widget(Paragraph::new(status), area);
}

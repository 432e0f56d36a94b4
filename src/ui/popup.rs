//! ポップアップ描画
//!
//! 確認・ファイル選択・バージョン情報ダイアログとメニューのドロップダウン

use crate::dialog::{ConfirmChoice, ConfirmPrompt, FileChooser};
use crate::input::MENUS;
use crate::ui::menu::MenuState;
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// 画面中央の矩形
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

/// メニューバーの x 座標（各タイトルの開始位置）
pub fn menu_title_offsets() -> Vec<u16> {
    let mut offsets = Vec::with_capacity(MENUS.len());
    let mut x = 1u16;
    for menu in MENUS.iter() {
        offsets.push(x);
        x += menu.title.len() as u16 + 2;
    }
    offsets
}

/// 開いているメニューのドロップダウン
pub fn render_menu_dropdown(frame: &mut Frame<'_>, menu: &MenuState, bar: Rect) {
    let Some(index) = menu.open_menu() else {
        return;
    };
    let items = MENUS[index].items;

    let rows: Vec<(String, String)> = items
        .iter()
        .map(|command| (command.label().to_string(), command.shortcut_label().unwrap_or_default()))
        .collect();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let shortcut_width = rows.iter().map(|(_, shortcut)| shortcut.len()).max().unwrap_or(0);
    let inner_width = (label_width + shortcut_width + 3) as u16;

    let screen = frame.area();
    let x = bar.x + menu_title_offsets()[index].saturating_sub(1);
    let width = (inner_width + 2).min(screen.width.saturating_sub(x));
    let height = (items.len() as u16 + 2).min(screen.height.saturating_sub(bar.y + 1));
    let area = Rect { x, y: bar.y + 1, width, height };

    let list_items: Vec<ListItem<'_>> = rows
        .into_iter()
        .map(|(label, shortcut)| {
            ListItem::new(format!(
                " {:<label_width$} {:>shortcut_width$} ",
                label,
                shortcut,
                label_width = label_width,
                shortcut_width = shortcut_width
            ))
        })
        .collect();
    let list = List::new(list_items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(menu.selected()));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

/// 未保存確認ダイアログ
pub fn render_confirm(frame: &mut Frame<'_>, prompt: &ConfirmPrompt) {
    let area = centered_rect(44, 7, frame.area());
    let focused = prompt.focused();

    let mut buttons = Vec::new();
    for choice in ConfirmChoice::BUTTONS {
        let style = if choice == focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        buttons.push(Span::styled(format!("[ {} ]", choice.label()), style));
        buttons.push(Span::raw("  "));
    }
    buttons.pop();

    let text = vec![
        Line::from(""),
        Line::from(prompt.message()),
        Line::from(""),
        Line::from(buttons),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(dialog_block("Warning"));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// バージョン情報ダイアログ
pub fn render_about(frame: &mut Frame<'_>, text: &str) {
    let mut lines: Vec<Line<'_>> = vec![Line::from("")];
    lines.extend(text.lines().map(Line::from));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::REVERSED))));

    let width = text.lines().map(str::len).max().unwrap_or(0) as u16 + 6;
    let area = centered_rect(width.max(24), lines.len() as u16 + 2, frame.area());
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(dialog_block("About"));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// ファイル選択ダイアログ
pub fn render_file_chooser(frame: &mut Frame<'_>, chooser: &FileChooser) {
    let screen = frame.area();
    let area = centered_rect(screen.width.saturating_sub(8).max(30), screen.height.saturating_sub(4).max(8), screen);
    let block = dialog_block(chooser.mode().title());
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    if inner.height < 4 || inner.width < 4 {
        return;
    }

    let dir_area = Rect { height: 1, ..inner };
    let list_area = Rect {
        y: inner.y + 1,
        height: inner.height - 3,
        ..inner
    };
    let input_area = Rect {
        y: inner.y + inner.height - 2,
        height: 1,
        ..inner
    };
    let hint_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };

    frame.render_widget(
        Paragraph::new(format!("Look in: {}", chooser.dir().display())),
        dir_area,
    );

    let items: Vec<ListItem<'_>> = chooser
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry.display_name()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::TOP | Borders::BOTTOM))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(chooser.selected()));
    frame.render_stateful_widget(list, list_area, &mut state);

    let label = "File name: ";
    frame.render_widget(Paragraph::new(format!("{}{}", label, chooser.input())), input_area);
    frame.render_widget(
        Paragraph::new("Only Text Files (.txt)   Enter: choose   Esc: cancel")
            .style(Style::default().add_modifier(Modifier::DIM)),
        hint_area,
    );

    let cursor_x = input_area.x + (label.len() + unicode_width::UnicodeWidthStr::width(chooser.input())) as u16;
    if cursor_x < input_area.x + input_area.width {
        frame.set_cursor_position(Position::new(cursor_x, input_area.y));
    }
}

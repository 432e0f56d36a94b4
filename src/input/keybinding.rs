//! キーバインドシステム
//!
//! キー入力をメニューコマンド・メニュー操作・編集操作へ変換する

use super::commands::{menu_index_for_hotkey, Command};
use crate::document::Movement;
use crossterm::event::{KeyCode as CrosstermKeyCode, KeyEvent, KeyModifiers as CrosstermModifiers};
use std::collections::HashMap;

/// キー入力の内部表現
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    /// 修飾キー
    pub modifiers: KeyModifiers,
    /// 基本キー
    pub code: KeyCode,
}

/// 修飾キーの組み合わせ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

/// 基本キーコード
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
    Esc,
    Unknown,
}

impl Key {
    /// 修飾なしのキー
    pub fn plain(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers::default(),
            code,
        }
    }

    /// Ctrl+文字
    pub fn ctrl(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: true, alt: false, shift: false },
            code: KeyCode::Char(ch),
        }
    }

    /// Alt+文字
    pub fn alt(ch: char) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: false, alt: true, shift: false },
            code: KeyCode::Char(ch),
        }
    }

    /// Shift付きのキー
    pub fn shifted(code: KeyCode) -> Self {
        Self {
            modifiers: KeyModifiers { ctrl: false, alt: false, shift: true },
            code,
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        let modifiers = KeyModifiers {
            ctrl: event.modifiers.contains(CrosstermModifiers::CONTROL),
            alt: event.modifiers.contains(CrosstermModifiers::ALT),
            shift: event.modifiers.contains(CrosstermModifiers::SHIFT),
        };

        let code = match event.code {
            // Ctrl+Shift+N などは小文字に揃える
            CrosstermKeyCode::Char(c) if modifiers.ctrl || modifiers.alt => {
                KeyCode::Char(c.to_ascii_lowercase())
            }
            CrosstermKeyCode::Char(c) => KeyCode::Char(c),
            CrosstermKeyCode::Enter => KeyCode::Enter,
            CrosstermKeyCode::Backspace => KeyCode::Backspace,
            CrosstermKeyCode::Delete => KeyCode::Delete,
            CrosstermKeyCode::Tab => KeyCode::Tab,
            CrosstermKeyCode::Up => KeyCode::Up,
            CrosstermKeyCode::Down => KeyCode::Down,
            CrosstermKeyCode::Left => KeyCode::Left,
            CrosstermKeyCode::Right => KeyCode::Right,
            CrosstermKeyCode::Home => KeyCode::Home,
            CrosstermKeyCode::End => KeyCode::End,
            CrosstermKeyCode::PageUp => KeyCode::PageUp,
            CrosstermKeyCode::PageDown => KeyCode::PageDown,
            CrosstermKeyCode::F(n) => KeyCode::F(n),
            CrosstermKeyCode::Esc => KeyCode::Esc,
            _ => KeyCode::Unknown,
        };

        Key { modifiers, code }
    }
}

/// テキスト編集操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    InsertChar(char),
    /// 貼り付けイベントなどでまとめて届いたテキスト
    InsertText(String),
    Newline,
    Tab,
    Backspace,
    Delete,
    Move { movement: Movement, extend: bool },
    /// 表示行数ぶん上へ
    PageUp { extend: bool },
    /// 表示行数ぶん下へ
    PageDown { extend: bool },
}

/// キー入力の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// メニューコマンド
    Command(Command),
    /// 指定番号のメニューを開く
    OpenMenu(usize),
    /// 編集操作
    Edit(EditAction),
    /// 何もしない
    Ignore,
}

/// キーマップ
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Command>,
}

impl KeyMap {
    /// 既定のショートカットを登録したキーマップを作成
    pub fn new() -> Self {
        let bindings = Command::ALL
            .iter()
            .filter_map(|command| command.shortcut().map(|key| (Key::ctrl(key), *command)))
            .collect();
        Self { bindings }
    }

    /// キーに割り当てられたコマンド
    ///
    /// Ctrl 付きの文字キーは Shift の有無を区別しない
    pub fn command_for(&self, key: &Key) -> Option<Command> {
        if key.modifiers.ctrl && key.modifiers.shift {
            if let KeyCode::Char(_) = key.code {
                let unshifted = Key {
                    modifiers: KeyModifiers { shift: false, ..key.modifiers },
                    code: key.code.clone(),
                };
                return self.bindings.get(&unshifted).copied();
            }
        }
        self.bindings.get(key).copied()
    }

    /// キー入力を解釈
    pub fn resolve(&self, key: &Key) -> Action {
        if let Some(command) = self.command_for(key) {
            return Action::Command(command);
        }

        let KeyModifiers { ctrl, alt, shift } = key.modifiers;

        if alt && !ctrl {
            return match key.code {
                KeyCode::Char(ch) => menu_index_for_hotkey(ch)
                    .map(Action::OpenMenu)
                    .unwrap_or(Action::Ignore),
                _ => Action::Ignore,
            };
        }

        let movement = |movement: Movement| Action::Edit(EditAction::Move { movement, extend: shift });

        match &key.code {
            KeyCode::F(10) => Action::OpenMenu(0),
            KeyCode::Char(ch) if !ctrl => Action::Edit(EditAction::InsertChar(*ch)),
            KeyCode::Enter if !ctrl => Action::Edit(EditAction::Newline),
            KeyCode::Tab if !ctrl => Action::Edit(EditAction::Tab),
            KeyCode::Backspace => Action::Edit(EditAction::Backspace),
            KeyCode::Delete => Action::Edit(EditAction::Delete),
            KeyCode::Left => movement(Movement::Left),
            KeyCode::Right => movement(Movement::Right),
            KeyCode::Up => movement(Movement::Up),
            KeyCode::Down => movement(Movement::Down),
            KeyCode::Home if ctrl => movement(Movement::DocumentStart),
            KeyCode::End if ctrl => movement(Movement::DocumentEnd),
            KeyCode::Home => movement(Movement::LineStart),
            KeyCode::End => movement(Movement::LineEnd),
            KeyCode::PageUp => Action::Edit(EditAction::PageUp { extend: shift }),
            KeyCode::PageDown => Action::Edit(EditAction::PageDown { extend: shift }),
            _ => Action::Ignore,
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

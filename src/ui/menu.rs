//! メニューバーの状態
//!
//! 開いているメニューと選択中の項目を管理する

use crate::input::{Command, Key, KeyCode, MENUS};

/// メニュー操作の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// メニューは開いたまま
    Pending,
    /// メニューを閉じた
    Closed,
    /// 項目が選ばれた（メニューは閉じる）
    Activated(Command),
}

/// メニューバーの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuState {
    open: Option<usize>,
    selected: usize,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// 開いているメニューの番号
    pub fn open_menu(&self) -> Option<usize> {
        self.open
    }

    /// 選択中の項目番号
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 指定したメニューを開く
    pub fn open(&mut self, index: usize) {
        if index < MENUS.len() {
            self.open = Some(index);
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.open = None;
        self.selected = 0;
    }

    /// メニューが開いている間のキー入力
    pub fn handle_key(&mut self, key: &Key) -> MenuOutcome {
        let Some(index) = self.open else {
            return MenuOutcome::Closed;
        };
        let items = MENUS[index].items;

        match &key.code {
            KeyCode::Esc | KeyCode::F(10) => {
                self.close();
                MenuOutcome::Closed
            }
            KeyCode::Left => {
                self.open((index + MENUS.len() - 1) % MENUS.len());
                MenuOutcome::Pending
            }
            KeyCode::Right => {
                self.open((index + 1) % MENUS.len());
                MenuOutcome::Pending
            }
            KeyCode::Up => {
                self.selected = (self.selected + items.len() - 1) % items.len();
                MenuOutcome::Pending
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % items.len();
                MenuOutcome::Pending
            }
            KeyCode::Enter => {
                let command = items[self.selected];
                self.close();
                MenuOutcome::Activated(command)
            }
            KeyCode::Char(ch) if key.modifiers.alt => {
                // Alt+別のメニューキーで切り替え
                match crate::input::commands::menu_index_for_hotkey(*ch) {
                    Some(other) => {
                        self.open(other);
                        MenuOutcome::Pending
                    }
                    None => MenuOutcome::Pending,
                }
            }
            _ => MenuOutcome::Pending,
        }
    }
}

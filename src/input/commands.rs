//! コマンドシステム
//!
//! メニュー項目に対応するコマンドと、メニューバーの構成

/// メニューから実行できるコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    New,
    Open,
    Save,
    Print,
    Exit,
    Cut,
    Copy,
    Paste,
    SelectAll,
    About,
    ToggleDarkMode,
}

impl Command {
    /// 全コマンド（メニュー順）
    pub const ALL: [Command; 11] = [
        Command::New,
        Command::Open,
        Command::Save,
        Command::Print,
        Command::Exit,
        Command::Cut,
        Command::Copy,
        Command::Paste,
        Command::SelectAll,
        Command::About,
        Command::ToggleDarkMode,
    ];

    /// メニュー表示名
    pub fn label(self) -> &'static str {
        match self {
            Command::New => "New",
            Command::Open => "Open",
            Command::Save => "Save",
            Command::Print => "Print",
            Command::Exit => "Exit",
            Command::Cut => "Cut",
            Command::Copy => "Copy",
            Command::Paste => "Paste",
            Command::SelectAll => "Select All",
            Command::About => "About",
            Command::ToggleDarkMode => "Toggle Dark Mode",
        }
    }

    /// Ctrl と組み合わせるショートカットキー
    pub fn shortcut(self) -> Option<char> {
        match self {
            Command::New => Some('n'),
            Command::Open => Some('o'),
            Command::Save => Some('s'),
            Command::Print => Some('p'),
            Command::Exit => Some('w'),
            Command::Cut => Some('x'),
            Command::Copy => Some('c'),
            Command::Paste => Some('v'),
            Command::SelectAll => Some('a'),
            Command::About => Some('j'),
            Command::ToggleDarkMode => None,
        }
    }

    /// ショートカットの表示名（例: `Ctrl+N`）
    pub fn shortcut_label(self) -> Option<String> {
        self.shortcut()
            .map(|key| format!("Ctrl+{}", key.to_ascii_uppercase()))
    }

    /// 未保存の内容を破棄しうるコマンドか
    pub fn is_destructive(self) -> bool {
        matches!(self, Command::New | Command::Open)
    }
}

/// メニューバーの1メニュー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    /// Alt と組み合わせて開くキー
    pub hotkey: char,
    pub items: &'static [Command],
}

/// メニューバー構成（File / Edit / Help）
pub const MENUS: [Menu; 3] = [
    Menu {
        title: "File",
        hotkey: 'f',
        items: &[
            Command::New,
            Command::Open,
            Command::Save,
            Command::Print,
            Command::Exit,
        ],
    },
    Menu {
        title: "Edit",
        hotkey: 'e',
        items: &[Command::Cut, Command::Copy, Command::Paste, Command::SelectAll],
    },
    Menu {
        title: "Help",
        hotkey: 'h',
        items: &[Command::About, Command::ToggleDarkMode],
    },
];

/// Alt+キーに対応するメニュー番号
pub fn menu_index_for_hotkey(key: char) -> Option<usize> {
    let key = key.to_ascii_lowercase();
    MENUS.iter().position(|menu| menu.hotkey == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_command_appears_in_exactly_one_menu() {
        let listed: Vec<Command> = MENUS.iter().flat_map(|menu| menu.items.iter().copied()).collect();
        assert_eq!(listed, Command::ALL.to_vec());
    }

    #[test]
    fn test_shortcuts_are_unique() {
        let keys: Vec<char> = Command::ALL.iter().filter_map(|c| c.shortcut()).collect();
        let unique: HashSet<char> = keys.iter().copied().collect();
        assert_eq!(keys.len(), unique.len());
        assert_eq!(keys.len(), 10);
    }

    #[test]
    fn test_shortcut_labels() {
        assert_eq!(Command::Save.shortcut_label().as_deref(), Some("Ctrl+S"));
        assert_eq!(Command::About.shortcut_label().as_deref(), Some("Ctrl+J"));
        assert_eq!(Command::ToggleDarkMode.shortcut_label(), None);
    }

    #[test]
    fn test_only_new_and_open_are_destructive() {
        let destructive: Vec<Command> = Command::ALL.iter().copied().filter(|c| c.is_destructive()).collect();
        assert_eq!(destructive, vec![Command::New, Command::Open]);
    }

    #[test]
    fn test_menu_hotkeys() {
        assert_eq!(menu_index_for_hotkey('f'), Some(0));
        assert_eq!(menu_index_for_hotkey('E'), Some(1));
        assert_eq!(menu_index_for_hotkey('h'), Some(2));
        assert_eq!(menu_index_for_hotkey('z'), None);
    }
}

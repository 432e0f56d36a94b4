//! 未保存確認ダイアログ

use crate::input::{Key, KeyCode};

/// 確認ダイアログでの選択
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    /// 保存してから続行
    Save,
    /// 破棄して続行
    Discard,
    /// 中止
    Cancel,
}

impl ConfirmChoice {
    /// ボタン表示順
    pub const BUTTONS: [ConfirmChoice; 3] = [ConfirmChoice::Save, ConfirmChoice::Discard, ConfirmChoice::Cancel];

    pub fn label(self) -> &'static str {
        match self {
            ConfirmChoice::Save => "Yes",
            ConfirmChoice::Discard => "No",
            ConfirmChoice::Cancel => "Cancel",
        }
    }
}

/// 確認ダイアログの状態
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    message: &'static str,
    focus: usize,
}

impl ConfirmPrompt {
    pub fn new() -> Self {
        Self {
            message: "Do you want to save changes?",
            focus: 0,
        }
    }

    pub fn message(&self) -> &str {
        self.message
    }

    /// フォーカス中のボタン
    pub fn focused(&self) -> ConfirmChoice {
        ConfirmChoice::BUTTONS[self.focus]
    }

    /// キー入力を処理。選択が確定したら返す
    pub fn handle_key(&mut self, key: &Key) -> Option<ConfirmChoice> {
        let count = ConfirmChoice::BUTTONS.len();
        match &key.code {
            KeyCode::Esc => Some(ConfirmChoice::Cancel),
            KeyCode::Enter => Some(self.focused()),
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(ConfirmChoice::Save),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(ConfirmChoice::Discard),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(ConfirmChoice::Cancel),
            KeyCode::Left => {
                self.focus = (self.focus + count - 1) % count;
                None
            }
            KeyCode::Right | KeyCode::Tab => {
                self.focus = (self.focus + 1) % count;
                None
            }
            _ => None,
        }
    }
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_answers() {
        let mut prompt = ConfirmPrompt::new();
        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Char('y'))), Some(ConfirmChoice::Save));
        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Char('n'))), Some(ConfirmChoice::Discard));
        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Esc)), Some(ConfirmChoice::Cancel));
        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_focus_cycles_and_enter_confirms() {
        let mut prompt = ConfirmPrompt::new();
        assert_eq!(prompt.focused(), ConfirmChoice::Save);

        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Left)), None);
        assert_eq!(prompt.focused(), ConfirmChoice::Cancel);

        prompt.handle_key(&Key::plain(KeyCode::Right));
        prompt.handle_key(&Key::plain(KeyCode::Tab));
        assert_eq!(prompt.focused(), ConfirmChoice::Discard);
        assert_eq!(prompt.handle_key(&Key::plain(KeyCode::Enter)), Some(ConfirmChoice::Discard));
    }
}

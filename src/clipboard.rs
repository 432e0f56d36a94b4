//! クリップボード
//!
//! システムクリップボード（arboard）を優先し、使えない端末ではプロセス内バッファで代替する

/// クリップボードのトレイト
pub trait Clipboard {
    /// 現在のテキストを取得
    fn get_text(&mut self) -> Option<String>;

    /// テキストを設定
    fn set_text(&mut self, text: &str);
}

/// プロセス内クリップボード
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.content.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }
}

/// システムクリップボード（ベストエフォート）
pub struct SystemClipboard {
    system: Option<arboard::Clipboard>,
    fallback: MemoryClipboard,
}

impl SystemClipboard {
    pub fn new() -> Self {
        // ヘッドレス環境では arboard の初期化が失敗する
        let system = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                log::warn!("system clipboard unavailable, using in-process clipboard: {}", err);
                None
            }
        };
        Self {
            system,
            fallback: MemoryClipboard::new(),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        if let Some(system) = self.system.as_mut() {
            match system.get_text() {
                Ok(text) => return Some(text),
                Err(err) => log::debug!("clipboard read failed: {}", err),
            }
        }
        self.fallback.get_text()
    }

    fn set_text(&mut self, text: &str) {
        self.fallback.set_text(text);
        if let Some(system) = self.system.as_mut() {
            if let Err(err) = system.set_text(text.to_string()) {
                log::warn!("clipboard write failed: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.get_text(), None);

        clipboard.set_text("copied");
        assert_eq!(clipboard.get_text().as_deref(), Some("copied"));

        clipboard.set_text("");
        assert_eq!(clipboard.get_text().as_deref(), Some(""));
    }
}

//! エディタシェル
//!
//! ドキュメントと表示状態を所有し、メニューコマンドと編集操作を1か所で処理する。
//! ファイル・印刷エラーはここでログに記録し、呼び出し元へは伝播しない。

use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::dialog::{ConfirmChoice, Dialogs};
use crate::display::DisplayState;
use crate::document::{Document, Movement};
use crate::file::{ensure_txt_extension, FileOperations, TextFileOperations};
use crate::input::{Command, EditAction};
use crate::options::DEFAULT_PRINT_COMMAND;
use crate::print::{Printer, SpoolPrinter};
use std::path::{Path, PathBuf};

/// 既定のページ移動行数（表示領域が未確定の間）
const DEFAULT_PAGE_LINES: usize = 20;

/// コマンド実行後にアプリケーションが取るべき動作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Continue,
    Exit,
}

/// エディタ本体の状態
pub struct EditorShell {
    document: Document,
    display: DisplayState,
    clipboard: Box<dyn Clipboard>,
    printer: Box<dyn Printer>,
    files: Box<dyn FileOperations>,
    page_lines: usize,
}

impl EditorShell {
    /// プロセス内クリップボードと既定スプーラーで作成
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            display: DisplayState::default(),
            clipboard: Box::new(MemoryClipboard::new()),
            printer: Box::new(SpoolPrinter::new(DEFAULT_PRINT_COMMAND)),
            files: Box::new(TextFileOperations::new()),
            page_lines: DEFAULT_PAGE_LINES,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_printer(mut self, printer: Box<dyn Printer>) -> Self {
        self.printer = printer;
        self
    }

    pub fn with_file_operations(mut self, files: Box<dyn FileOperations>) -> Self {
        self.files = files;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// ページ移動の行数（表示領域の高さ）
    pub fn set_page_lines(&mut self, lines: usize) {
        self.page_lines = lines.max(1);
    }

    /// 起動時に指定されたファイルを読み込む
    ///
    /// 存在しないファイルは空のドキュメントとして扱い、保存先の候補にする
    pub fn load_initial(&mut self, path: &Path) {
        if path.exists() {
            self.open_path(path);
        } else {
            log::info!("{} does not exist yet, starting empty", path.display());
            self.document.replace_text(String::new(), Some(path.to_path_buf()));
            self.caret_changed();
        }
    }

    /// メニューコマンドを実行
    pub fn dispatch(&mut self, command: Command, dialogs: &mut dyn Dialogs) -> DispatchOutcome {
        log::debug!("dispatch {:?}", command);

        if command.is_destructive() && !self.confirm_unsaved(dialogs) {
            return DispatchOutcome::Continue;
        }

        match command {
            Command::New => self.document.clear(),
            Command::Open => {
                if let Some(path) = dialogs.choose_open_path() {
                    self.open_path(&path);
                }
            }
            Command::Save => {
                self.save(dialogs);
            }
            Command::Print => self.print(),
            Command::Exit => {
                log::info!("exit requested");
                return DispatchOutcome::Exit;
            }
            Command::Cut => self.cut(),
            Command::Copy => self.copy(),
            Command::Paste => self.paste(),
            Command::SelectAll => self.document.select_all(),
            Command::About => dialogs.show_about(),
            Command::ToggleDarkMode => {
                self.display.toggle_theme();
                log::debug!("theme is now {:?}", self.display.theme);
            }
        }

        self.caret_changed();
        DispatchOutcome::Continue
    }

    /// 編集操作を実行
    pub fn edit(&mut self, action: EditAction) {
        match action {
            EditAction::InsertChar(ch) => self.document.insert_char(ch),
            EditAction::InsertText(text) => self.document.insert_str(&text),
            EditAction::Newline => self.document.insert_char('\n'),
            EditAction::Tab => self.document.insert_char('\t'),
            EditAction::Backspace => {
                self.document.backspace();
            }
            EditAction::Delete => {
                self.document.delete_forward();
            }
            EditAction::Move { movement, extend } => self.document.move_caret(movement, extend),
            EditAction::PageUp { extend } => {
                self.document.move_caret(Movement::PageUp(self.page_lines), extend)
            }
            EditAction::PageDown { extend } => {
                self.document.move_caret(Movement::PageDown(self.page_lines), extend)
            }
        }

        self.caret_changed();
    }

    /// キャレット変更通知
    fn caret_changed(&mut self) {
        self.display.on_caret_changed(self.document.text());
    }

    /// 未保存確認。続行してよければ真
    fn confirm_unsaved(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !self.document.is_dirty() {
            return true;
        }

        match dialogs.confirm_unsaved() {
            ConfirmChoice::Cancel => {
                log::debug!("operation cancelled at unsaved-changes prompt");
                false
            }
            ConfirmChoice::Discard => true,
            ConfirmChoice::Save => {
                if !self.save(dialogs) {
                    log::warn!("changes were not saved, continuing anyway");
                }
                true
            }
        }
    }

    /// ファイルを読み込んでドキュメントを置き換える。失敗時はドキュメントを変更しない
    fn open_path(&mut self, path: &Path) {
        match self.files.read_file(path) {
            Ok(text) => {
                log::info!("opened {} ({} bytes)", path.display(), text.len());
                self.document.replace_text(text, Some(path.to_path_buf()));
                self.caret_changed();
            }
            Err(err) => log::error!("failed to open {}: {}", path.display(), err),
        }
    }

    /// 保存ダイアログを出して保存する。保存できたら真
    fn save(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        let suggested: Option<PathBuf> = self.document.path().map(Path::to_path_buf);
        let Some(chosen) = dialogs.choose_save_path(suggested.as_deref()) else {
            log::debug!("save dialog cancelled");
            return false;
        };

        let path = ensure_txt_extension(&chosen);
        match self.files.write_file(&path, self.document.text()) {
            Ok(()) => {
                log::info!("saved {}", path.display());
                self.document.mark_saved(path);
                true
            }
            Err(err) => {
                log::error!("failed to save {}: {}", path.display(), err);
                false
            }
        }
    }

    fn print(&mut self) {
        if let Err(err) = self.printer.print(self.document.text()) {
            log::error!("print failed: {}", err);
        }
    }

    fn cut(&mut self) {
        if let Some(text) = self.document.delete_selection() {
            self.clipboard.set_text(&text);
        }
    }

    fn copy(&mut self) {
        if let Some(text) = self.document.selected_text() {
            self.clipboard.set_text(text);
        }
    }

    fn paste(&mut self) {
        match self.clipboard.get_text() {
            Some(text) if !text.is_empty() => self.document.insert_str(&text),
            _ => log::debug!("clipboard is empty"),
        }
    }
}

impl Default for EditorShell {
    fn default() -> Self {
        Self::new()
    }
}

//! ターミナルフロントエンド
//!
//! 端末の初期化・復元、イベントループ、端末上で動くモーダルダイアログ

use crate::clipboard::SystemClipboard;
use crate::dialog::{about_text, ChooserMode, ChooserOutcome, ConfirmChoice, ConfirmPrompt, Dialogs, FileChooser};
use crate::error::{NoteError, Result, UiError};
use crate::input::{Action, EditAction, Key, KeyMap};
use crate::options::AppOptions;
use crate::print::SpoolPrinter;
use crate::shell::{DispatchOutcome, EditorShell};
use crate::ui::{popup, MenuOutcome, MenuState, Renderer, ScreenLayout};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, Frame, Terminal};
use std::io::stdout;
use std::path::{Path, PathBuf};

pub struct TuiApplication {
    shell: EditorShell,
    keymap: KeyMap,
    menu: MenuState,
    renderer: Renderer,
    /// 直前に描画したエディタ画面（ダイアログの背景）
    backdrop: Option<Buffer>,
    running: bool,
}

impl TuiApplication {
    pub fn new(options: &AppOptions) -> Result<Self> {
        let mut shell = EditorShell::new()
            .with_clipboard(Box::new(SystemClipboard::new()))
            .with_printer(Box::new(SpoolPrinter::new(&options.print_command)));
        if let Some(path) = &options.file {
            shell.load_initial(path);
        }

        Ok(Self {
            shell,
            keymap: KeyMap::new(),
            menu: MenuState::new(),
            renderer: Renderer::new(),
            backdrop: None,
            running: true,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            self.render(terminal)?;

            // モーダルダイアログと同じく、入力があるまでブロックする
            match event::read().map_err(|err| terminal_error("event read", err))? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    self.handle_key(Key::from(key_event), terminal);
                }
                Event::Paste(text) => {
                    if !self.menu.is_open() {
                        self.shell.edit(EditAction::InsertText(text));
                    }
                }
                Event::Key(_) | Event::Resize(_, _) | Event::Mouse(_) | Event::FocusGained | Event::FocusLost => {}
            }
        }

        Ok(())
    }

    fn handle_key<B: ratatui::backend::Backend>(&mut self, key: Key, terminal: &mut Terminal<B>) {
        if self.menu.is_open() {
            if let MenuOutcome::Activated(command) = self.menu.handle_key(&key) {
                // ドロップダウンを消した画面をダイアログの背景にする
                if let Err(err) = self.render(terminal) {
                    log::warn!("{}", err);
                }
                self.run_command(command, terminal);
            }
            return;
        }

        match self.keymap.resolve(&key) {
            Action::Command(command) => self.run_command(command, terminal),
            Action::OpenMenu(index) => self.menu.open(index),
            Action::Edit(action) => self.shell.edit(action),
            Action::Ignore => {}
        }
    }

    fn run_command<B: ratatui::backend::Backend>(&mut self, command: crate::input::Command, terminal: &mut Terminal<B>) {
        let mut dialogs = TerminalDialogs::new(terminal, self.backdrop.as_ref());
        if self.shell.dispatch(command, &mut dialogs) == DispatchOutcome::Exit {
            self.running = false;
        }
    }

    fn render<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let shell = &mut self.shell;
        let renderer = &mut self.renderer;
        let menu = &self.menu;

        let completed = terminal
            .draw(|frame| {
                let layout = ScreenLayout::new(frame.area());
                shell.set_page_lines(layout.text_area.height as usize);
                renderer.render(frame, shell, menu);
            })
            .map_err(|err| terminal_error("render", err))?;
        self.backdrop = Some(completed.buffer.clone());
        Ok(())
    }
}

/// 端末上のモーダルダイアログ
///
/// 各メソッドは応答があるまで描画とキー読み取りを繰り返す
pub struct TerminalDialogs<'a, B: ratatui::backend::Backend> {
    terminal: &'a mut Terminal<B>,
    backdrop: Option<&'a Buffer>,
    start_dir: PathBuf,
}

impl<'a, B: ratatui::backend::Backend> TerminalDialogs<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: Option<&'a Buffer>) -> Self {
        let start_dir = std::env::current_dir()
            .ok()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("/"));
        Self {
            terminal,
            backdrop,
            start_dir,
        }
    }

    /// 背景の上にポップアップを描画し、次のキー入力を待つ
    fn draw_and_read<F>(&mut self, draw_popup: F) -> Option<Key>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        let backdrop = self.backdrop;
        let drawn = self.terminal.draw(|frame| {
            if let Some(backdrop) = backdrop {
                if backdrop.area == frame.area() {
                    *frame.buffer_mut() = backdrop.clone();
                }
            }
            draw_popup(frame);
        });
        if let Err(err) = drawn {
            log::error!("dialog render failed: {}", err);
            return None;
        }

        loop {
            match event::read() {
                Ok(Event::Key(key_event)) if key_event.kind != KeyEventKind::Release => {
                    return Some(Key::from(key_event));
                }
                // リサイズ時は再描画のため空のキーを返す
                Ok(Event::Resize(_, _)) => return Some(Key::plain(crate::input::KeyCode::Unknown)),
                Ok(_) => {}
                Err(err) => {
                    log::error!("dialog input failed: {}", err);
                    return None;
                }
            }
        }
    }

    fn run_chooser(&mut self, mut chooser: FileChooser) -> Option<PathBuf> {
        loop {
            let key = self.draw_and_read(|frame| popup::render_file_chooser(frame, &chooser))?;
            match chooser.handle_key(&key) {
                ChooserOutcome::Pending => {}
                ChooserOutcome::Approved(path) => return Some(path),
                ChooserOutcome::Cancelled => return None,
            }
        }
    }
}

impl<'a, B: ratatui::backend::Backend> Dialogs for TerminalDialogs<'a, B> {
    fn confirm_unsaved(&mut self) -> ConfirmChoice {
        let mut prompt = ConfirmPrompt::new();
        loop {
            let Some(key) = self.draw_and_read(|frame| popup::render_confirm(frame, &prompt)) else {
                return ConfirmChoice::Cancel;
            };
            if let Some(choice) = prompt.handle_key(&key) {
                return choice;
            }
        }
    }

    fn choose_open_path(&mut self) -> Option<PathBuf> {
        let chooser = FileChooser::new(ChooserMode::Open, &self.start_dir);
        self.run_chooser(chooser)
    }

    fn choose_save_path(&mut self, suggested: Option<&Path>) -> Option<PathBuf> {
        let chooser = FileChooser::with_suggestion(ChooserMode::Save, &self.start_dir, suggested);
        self.run_chooser(chooser)
    }

    fn show_about(&mut self) {
        let text = about_text();
        loop {
            match self.draw_and_read(|frame| popup::render_about(frame, &text)) {
                Some(key) if key.code == crate::input::KeyCode::Unknown => continue,
                _ => return,
            }
        }
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|_| NoteError::Ui(UiError::TerminalInit))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableBracketedPaste)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, DisableBracketedPaste, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

/// 端末をできる限り元に戻す（パニック時用、エラーは無視）
pub fn restore_terminal() {
    let mut out = stdout();
    let _ = execute!(
        out,
        DisableBracketedPaste,
        LeaveAlternateScreen,
        crossterm::cursor::Show
    );
    let _ = disable_raw_mode();
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> NoteError {
    NoteError::Ui(UiError::RenderingFailed {
        component: format!("{}: {}", context, err),
    })
}

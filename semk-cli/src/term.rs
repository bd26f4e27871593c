//! Crossterm-backed terminal for the editor.

use std::io::{Stdout, Write};
use std::sync::mpsc;

use crossterm::cursor::{MoveTo, Show};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use semk_core::{Key, Style, Terminal};

/// Terminal that draws with crossterm and receives keys over a channel.
pub struct CrosstermTerminal {
    out: Stdout,
    /// Receiver for decoded keys
    key_rx: mpsc::Receiver<Key>,
}

impl CrosstermTerminal {
    /// Switch to the alternate screen. It is left again on drop.
    pub fn new(key_rx: mpsc::Receiver<Key>) -> std::io::Result<Self> {
        let mut out = std::io::stdout();
        execute!(out, EnterAlternateScreen)?;
        Ok(Self { out, key_rx })
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
    }
}

fn colors(style: Style) -> (Color, Color) {
    match style {
        Style::Text => (Color::White, Color::Black),
        Style::Header | Style::Status => (Color::Black, Color::Grey),
        Style::Prompt => (Color::Yellow, Color::Black),
    }
}

impl Terminal for CrosstermTerminal {
    fn draw_text(&mut self, text: &str, col: u16, row: u16, style: Style) {
        let (cols, _) = self.size();
        let room = cols.saturating_sub(col) as usize;
        let visible: String = text.chars().take(room).collect();
        let (fg, bg) = colors(style);
        let _ = queue!(
            self.out,
            MoveTo(col, row),
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(visible),
            ResetColor
        );
    }

    fn place_cursor(&mut self, col: u16, row: u16) {
        let _ = queue!(self.out, MoveTo(col, row), Show);
    }

    fn clear(&mut self) {
        let _ = queue!(self.out, ResetColor, Clear(ClearType::All));
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 25))
    }

    fn wait_for_key(&mut self) -> Option<Key> {
        // Blocking receive; None once the input task has stopped
        self.key_rx.recv().ok()
    }
}

/// Translate crossterm key events to editor keys.
pub fn translate_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Key> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('x') | KeyCode::Char('X') => Some(Key::ExitRequest),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) if c.is_ascii() => Key::from_ascii(c as u8),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        _ => None,
    }
}

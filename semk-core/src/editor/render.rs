//! Draws an editor session onto a terminal.
//!
//! Screen layout, for `text_rows` = 22:
//! - row 0: header with the file name
//! - rows 1..=22: wrapped text, scrolled to keep the cursor visible
//! - row 23: save prompt
//! - row 24: status bar (help text or the last diagnostic)

use super::buffer::{EditBuffer, LINE_BREAK};
use super::key::is_printable;
use super::session::EditorSession;
use crate::terminal::{Style, Terminal};

const TITLE: &str = " Semk Editor: ";
const HELP: &str = "Ctrl+X - Exit and Save/Discard";

/// Text of every screen row of the buffer, starting with row 1.
pub fn wrapped_rows(buffer: &EditBuffer, wrap: usize) -> Vec<String> {
    let mut rows = vec![String::new(); buffer.last_row(wrap)];
    for cell in buffer.replay(wrap) {
        let Some(byte) = cell.byte else { break };
        if byte == LINE_BREAK {
            continue;
        }
        let ch = if is_printable(byte) { byte as char } else { '?' };
        rows[cell.pos.row - 1].push(ch);
    }
    rows
}

/// First buffer row shown at screen row 1.
pub fn scroll_top(cursor_row: usize, text_rows: usize) -> usize {
    let text_rows = text_rows.max(1);
    if cursor_row > text_rows {
        cursor_row - text_rows + 1
    } else {
        1
    }
}

/// Redraw the whole editor screen and place the cursor.
pub fn render<T: Terminal + ?Sized>(session: &EditorSession, text_rows: usize, term: &mut T) {
    term.clear();
    let Some(file) = session.file() else {
        term.flush();
        return;
    };

    let (cols, _) = term.size();
    let bar = " ".repeat(cols as usize);

    term.draw_text(&bar, 0, 0, Style::Header);
    term.draw_text(TITLE, 0, 0, Style::Header);
    term.draw_text(&file.name, TITLE.len() as u16, 0, Style::Header);

    let wrap = session.wrap_width();
    let cursor = session.cursor_screen();
    let top = scroll_top(cursor.row, text_rows);

    let rows = wrapped_rows(session.buffer(), wrap);
    for (i, text) in rows.iter().enumerate().skip(top - 1).take(text_rows) {
        let screen_row = i + 1 - (top - 1);
        term.draw_text(text, 0, screen_row as u16, Style::Text);
    }

    let prompt_row = (text_rows + 1) as u16;
    let status_row = (text_rows + 2) as u16;

    term.draw_text(&bar, 0, status_row, Style::Status);
    term.draw_text(session.status().unwrap_or(HELP), 0, status_row, Style::Status);

    match session.prompt() {
        Some(prompt) => {
            term.draw_text(prompt, 0, prompt_row, Style::Prompt);
            term.place_cursor(prompt.len() as u16, prompt_row);
        }
        None => {
            let row = cursor.row + 1 - top;
            term.place_cursor(cursor.col as u16, row as u16);
        }
    }
    term.flush();
}

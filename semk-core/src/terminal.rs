//! Terminal abstraction: display sink and keystroke source.
//!
//! The `Terminal` trait is all the core needs from the outside world. It
//! works identically for tests (`HeadlessTerminal`) and real terminals.

use std::collections::VecDeque;

use crate::editor::Key;

/// Screen width in character cells.
pub const SCREEN_COLS: u16 = 80;
/// Screen height in character cells.
pub const SCREEN_ROWS: u16 = 25;

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Text,
    /// Black on light grey title bar.
    Header,
    /// Black on light grey help/diagnostic bar.
    Status,
    /// Yellow prompt text.
    Prompt,
}

/// Output commands and decoded input for one terminal.
/// The core never reads display state back.
pub trait Terminal {
    /// Draw `text` starting at `(col, row)`. Text past the right edge is clipped.
    fn draw_text(&mut self, text: &str, col: u16, row: u16, style: Style);

    fn place_cursor(&mut self, col: u16, row: u16);

    fn clear(&mut self);

    /// Flush pending output. Default is a no-op.
    fn flush(&mut self) {}

    /// Size in `(cols, rows)`.
    fn size(&self) -> (u16, u16) {
        (SCREEN_COLS, SCREEN_ROWS)
    }

    /// Wait for the next key. `None` means the source is closed.
    fn wait_for_key(&mut self) -> Option<Key>;
}

/// Headless terminal for testing - keeps a character grid, provides queued input.
pub struct HeadlessTerminal {
    cols: u16,
    rows: u16,
    cells: Vec<Vec<(u8, Style)>>,
    cursor: Option<(u16, u16)>,
    input: VecDeque<Key>,
}

impl Default for HeadlessTerminal {
    fn default() -> Self {
        Self::new(SCREEN_COLS, SCREEN_ROWS)
    }
}

impl HeadlessTerminal {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![(b' ', Style::Text); cols as usize]; rows as usize],
            cursor: None,
            input: VecDeque::new(),
        }
    }

    /// Create with pre-queued keys.
    pub fn with_keys(keys: &[Key]) -> Self {
        let mut term = Self::default();
        term.queue_keys(keys);
        term
    }

    pub fn queue_keys(&mut self, keys: &[Key]) {
        self.input.extend(keys.iter().copied());
    }

    /// Queue the keys for a string (see [`Key::from_ascii`]).
    pub fn queue_text(&mut self, text: &str) {
        self.input.extend(Key::from_text(text));
    }

    /// Contents of one row with trailing blanks removed.
    pub fn row_text(&self, row: u16) -> String {
        self.cells
            .get(row as usize)
            .map(|cells| {
                let text: String = cells.iter().map(|(ch, _)| *ch as char).collect();
                text.trim_end().to_string()
            })
            .unwrap_or_default()
    }

    pub fn style_at(&self, col: u16, row: u16) -> Option<Style> {
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .map(|(_, style)| *style)
    }

    /// Last position given to `place_cursor`, as `(col, row)`.
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.cursor
    }

    pub fn pending_keys(&self) -> usize {
        self.input.len()
    }
}

impl Terminal for HeadlessTerminal {
    fn draw_text(&mut self, text: &str, col: u16, row: u16, style: Style) {
        let Some(cells) = self.cells.get_mut(row as usize) else {
            return;
        };
        for (i, byte) in text.bytes().enumerate() {
            let x = col as usize + i;
            if x >= cells.len() {
                break;
            }
            cells[x] = (byte, style);
        }
    }

    fn place_cursor(&mut self, col: u16, row: u16) {
        self.cursor = Some((col, row));
    }

    fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill((b' ', Style::Text));
        }
        self.cursor = None;
    }

    fn size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    fn wait_for_key(&mut self) -> Option<Key> {
        // For headless, an empty queue means end of input
        self.input.pop_front()
    }
}

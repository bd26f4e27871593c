//! Bounded edit buffer and the offset <-> screen mapping.
//!
//! The buffer is a flat byte sequence with embedded `\n` markers. Screen
//! positions are never stored: they are recomputed by replaying the
//! sequence from the start under one wrap rule:
//!
//! - replay starts at row 1, column 0 (row 0 belongs to the header)
//! - `\n` moves to column 0 of the next row
//! - any other byte advances one column; reaching `wrap` columns moves to
//!   column 0 of the next row
//!
//! # Wrap boundary
//!
//! A full row of `wrap` characters has length `wrap`, and the position
//! `(row, wrap)` is never produced by replay. [`EditBuffer::screen_to_offset`]
//! treats it as an alias of `(row + 1, 0)`: both map to the offset just past
//! the row's last character.

use super::key::Direction;
use crate::error::{SemkError, SemkResult};

/// Line-break marker.
pub const LINE_BREAK: u8 = b'\n';

/// Screen position of a buffer offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenPos {
    pub row: usize,
    pub col: usize,
}

impl ScreenPos {
    /// Where replay starts.
    pub const ORIGIN: ScreenPos = ScreenPos { row: 1, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position after consuming `byte` at this position.
    fn advance(self, byte: u8, wrap: usize) -> Self {
        if byte == LINE_BREAK || self.col + 1 >= wrap {
            ScreenPos::new(self.row + 1, 0)
        } else {
            ScreenPos::new(self.row, self.col + 1)
        }
    }
}

/// One replay step: the position of `offset`, and the byte stored there
/// (`None` at end of sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub offset: usize,
    pub pos: ScreenPos,
    pub byte: Option<u8>,
}

impl Cell {
    /// Whether consuming this cell's byte wraps the row without a line break.
    fn wraps(&self, wrap: usize) -> bool {
        matches!(self.byte, Some(b) if b != LINE_BREAK && self.pos.col + 1 >= wrap)
    }
}

/// Replay of a byte sequence, yielding a [`Cell`] for every offset
/// `0..=len` in order.
#[derive(Clone)]
pub struct Replay<'a> {
    bytes: &'a [u8],
    wrap: usize,
    pos: ScreenPos,
    offset: usize,
    done: bool,
}

impl<'a> Replay<'a> {
    pub fn new(bytes: &'a [u8], wrap: usize) -> Self {
        Self {
            bytes,
            wrap: wrap.max(1),
            pos: ScreenPos::ORIGIN,
            offset: 0,
            done: false,
        }
    }
}

impl Iterator for Replay<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.done {
            return None;
        }

        let byte = self.bytes.get(self.offset).copied();
        let cell = Cell {
            offset: self.offset,
            pos: self.pos,
            byte,
        };

        match byte {
            Some(b) => {
                self.pos = self.pos.advance(b, self.wrap);
                self.offset += 1;
            }
            None => self.done = true,
        }
        Some(cell)
    }
}

/// Fixed-capacity text with a cursor offset.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    bytes: Vec<u8>,
    capacity: usize,
    cursor: usize,
}

impl EditBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Replace the content and move the cursor to the start.
    /// Returns the number of bytes kept (at most the capacity).
    pub fn load(&mut self, data: &[u8]) -> usize {
        let kept = data.len().min(self.capacity);
        self.bytes.clear();
        self.bytes.extend_from_slice(&data[..kept]);
        self.cursor = 0;
        kept
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.bytes.len() >= self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to the end of the text.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.bytes.len());
    }

    /// Store `ch` at `offset`, shifting the rest right.
    ///
    /// Fails with `CapacityExceeded` and leaves the buffer untouched when
    /// full. Offsets past the end insert at the end.
    pub fn insert_before(&mut self, offset: usize, ch: u8) -> SemkResult<()> {
        if self.is_full() {
            return Err(SemkError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let offset = offset.min(self.bytes.len());
        self.bytes.insert(offset, ch);
        Ok(())
    }

    /// Remove the byte just before `offset`. No-op at offset 0.
    pub fn delete_before(&mut self, offset: usize) -> Option<u8> {
        let offset = offset.min(self.bytes.len());
        if offset == 0 {
            return None;
        }
        let removed = self.bytes.remove(offset - 1);
        self.cursor = self.cursor.min(self.bytes.len());
        Some(removed)
    }

    /// Insert at the cursor and advance past the new byte.
    pub fn insert_at_cursor(&mut self, ch: u8) -> SemkResult<()> {
        self.insert_before(self.cursor, ch)?;
        self.cursor += 1;
        Ok(())
    }

    /// Delete before the cursor and step back. Returns false at offset 0.
    pub fn backspace(&mut self) -> bool {
        let at = self.cursor;
        if self.delete_before(at).is_some() {
            self.cursor = at - 1;
            true
        } else {
            false
        }
    }

    pub fn replay(&self, wrap: usize) -> Replay<'_> {
        Replay::new(&self.bytes, wrap)
    }

    /// Screen position of `offset` (clamped to the end of the text).
    pub fn offset_to_screen(&self, offset: usize, wrap: usize) -> ScreenPos {
        let offset = offset.min(self.bytes.len());
        self.replay(wrap)
            .nth(offset)
            .map(|cell| cell.pos)
            .unwrap_or(ScreenPos::ORIGIN)
    }

    /// First offset whose position is `target`, or the end of the text if
    /// none matches. `(row, wrap)` matches the end of a wrapped row.
    ///
    /// Callers clamp `target.col` with [`row_length`](Self::row_length)
    /// first; a column past the end of a short row matches nothing.
    pub fn screen_to_offset(&self, target: ScreenPos, wrap: usize) -> usize {
        let wrap = wrap.max(1);
        for cell in self.replay(wrap) {
            if cell.pos == target {
                return cell.offset;
            }
            if cell.wraps(wrap) && target == ScreenPos::new(cell.pos.row, wrap) {
                return cell.offset + 1;
            }
        }
        self.bytes.len()
    }

    /// Column at which `row`'s text ends, or `None` when no offset lies on
    /// that row. Wrapped rows have length `wrap`.
    pub fn row_length(&self, row: usize, wrap: usize) -> Option<usize> {
        let wrap = wrap.max(1);
        let mut length = None;
        for cell in self.replay(wrap) {
            if cell.pos.row > row {
                break;
            }
            if cell.pos.row == row {
                length = Some(if cell.wraps(wrap) { wrap } else { cell.pos.col });
            }
        }
        length
    }

    /// Screen position of the cursor.
    pub fn cursor_screen(&self, wrap: usize) -> ScreenPos {
        self.offset_to_screen(self.cursor, wrap)
    }

    /// Last row holding an offset.
    pub fn last_row(&self, wrap: usize) -> usize {
        self.offset_to_screen(self.bytes.len(), wrap).row
    }

    /// Move the cursor one step. Returns false when it cannot move.
    ///
    /// Vertical moves keep the column unless the destination row is
    /// shorter. Horizontal moves cross row boundaries but never go before
    /// the first or past the last offset.
    pub fn move_cursor(&mut self, direction: Direction, wrap: usize) -> bool {
        match direction {
            // Stepping back from column 0 lands on the previous row's line
            // break, or on its last character when that row wrapped.
            Direction::Left => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                true
            }
            Direction::Right => {
                if self.cursor >= self.bytes.len() {
                    return false;
                }
                self.cursor += 1;
                true
            }
            Direction::Up => {
                let pos = self.cursor_screen(wrap);
                if pos.row <= ScreenPos::ORIGIN.row {
                    return false;
                }
                self.move_to_row(pos.row - 1, pos.col, wrap)
            }
            Direction::Down => {
                let pos = self.cursor_screen(wrap);
                self.move_to_row(pos.row + 1, pos.col, wrap)
            }
        }
    }

    fn move_to_row(&mut self, row: usize, col: usize, wrap: usize) -> bool {
        match self.row_length(row, wrap) {
            Some(length) => {
                self.cursor = self.screen_to_offset(ScreenPos::new(row, col.min(length)), wrap);
                true
            }
            None => false,
        }
    }
}

//! Editor session - one open file driven by key events.
//!
//! The session is a three-state machine. [`transition`] is the complete
//! `(mode, key) -> (mode, action)` table; [`EditorSession::handle_key`]
//! applies the chosen action to the buffer and the filesystem.

use super::buffer::{EditBuffer, ScreenPos, LINE_BREAK};
use super::key::{is_printable, Direction, Key};
use crate::config::Config;
use crate::error::{SemkError, SemkResult};
use crate::fs::{EntryId, Namespace, NodeRef};

/// Session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No file open.
    Absent,
    Editing,
    /// Waiting for a y/n answer after an exit request.
    SavePrompt,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Absent => "ABSENT",
            Mode::Editing => "EDITING",
            Mode::SavePrompt => "SAVE PROMPT",
        }
    }
}

/// Effect of one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ignore,
    Insert(u8),
    Backspace,
    Move(Direction),
    /// Show the save prompt.
    Prompt,
    /// Answer was neither yes nor no; ask again.
    Reprompt,
    Save,
    Discard,
}

/// The session transition table. Every `(mode, key)` pair is handled.
pub fn transition(mode: Mode, key: Key) -> (Mode, Action) {
    match (mode, key) {
        (Mode::Absent, _) => (Mode::Absent, Action::Ignore),

        (Mode::Editing, Key::Char(ch)) if is_printable(ch) => (Mode::Editing, Action::Insert(ch)),
        (Mode::Editing, Key::Char(_)) => (Mode::Editing, Action::Ignore),
        (Mode::Editing, Key::Enter) => (Mode::Editing, Action::Insert(LINE_BREAK)),
        (Mode::Editing, Key::Backspace) => (Mode::Editing, Action::Backspace),
        (Mode::Editing, Key::Up) => (Mode::Editing, Action::Move(Direction::Up)),
        (Mode::Editing, Key::Down) => (Mode::Editing, Action::Move(Direction::Down)),
        (Mode::Editing, Key::Left) => (Mode::Editing, Action::Move(Direction::Left)),
        (Mode::Editing, Key::Right) => (Mode::Editing, Action::Move(Direction::Right)),
        (Mode::Editing, Key::ExitRequest) => (Mode::SavePrompt, Action::Prompt),

        (Mode::SavePrompt, Key::Char(b'y' | b'Y')) => (Mode::Absent, Action::Save),
        (Mode::SavePrompt, Key::Char(b'n' | b'N')) => (Mode::Absent, Action::Discard),
        (Mode::SavePrompt, _) => (Mode::SavePrompt, Action::Reprompt),
    }
}

/// What a key event did, for the caller's redraw decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Edited,
    CursorMoved,
    /// Insert dropped because the buffer is full.
    BufferFull,
    Prompted,
    Reprompted,
    Saved { bytes: usize },
    Discarded,
}

/// The file a session is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFile {
    pub id: EntryId,
    pub name: String,
    pub dir: NodeRef,
}

/// Editor session state.
#[derive(Debug, Clone)]
pub struct EditorSession {
    mode: Mode,
    file: Option<OpenFile>,
    buffer: EditBuffer,
    wrap_width: usize,
    status: Option<String>,
    invalid_answer: bool,
    /// Enable event tracing on stderr.
    pub trace: bool,
}

impl EditorSession {
    /// Create an idle session with a `capacity`-byte buffer.
    pub fn new(capacity: usize, wrap_width: usize) -> Self {
        Self {
            mode: Mode::Absent,
            file: None,
            buffer: EditBuffer::new(capacity),
            wrap_width: wrap_width.max(1),
            status: None,
            invalid_answer: false,
            trace: false,
        }
    }

    /// Buffer sized to the file capacity, so a save never truncates.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.layout.file_capacity, config.editor.wrap_width)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode != Mode::Absent
    }

    pub fn file(&self) -> Option<&OpenFile> {
        self.file.as_ref()
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Last diagnostic, cleared by the next successful edit.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn cursor_screen(&self) -> ScreenPos {
        self.buffer.cursor_screen(self.wrap_width)
    }

    /// Prompt line text while waiting for a save answer.
    pub fn prompt(&self) -> Option<&'static str> {
        match (self.mode, self.invalid_answer) {
            (Mode::SavePrompt, false) => Some(" Save changes? (y/n): "),
            (Mode::SavePrompt, true) => Some(" Invalid. Save changes? (y/n): "),
            _ => None,
        }
    }

    /// Open `name` in `dir`, creating it empty if it does not exist.
    pub fn open<N: Namespace>(&mut self, table: &mut N, name: &str, dir: NodeRef) -> SemkResult<EntryId> {
        if self.is_active() {
            return Err(SemkError::SessionActive);
        }

        let (id, content) = table.open_or_create(name, dir)?;
        let kept = self.buffer.load(&content);
        if kept < content.len() {
            self.status = Some(format!(
                "File truncated to {} bytes",
                self.buffer.capacity()
            ));
        } else {
            self.status = None;
        }

        self.file = Some(OpenFile {
            id,
            name: name.to_string(),
            dir,
        });
        self.invalid_answer = false;
        self.mode = Mode::Editing;

        if self.trace {
            eprintln!("[EDIT] open {} ({}): {} bytes", name, id, kept);
        }
        Ok(id)
    }

    /// Apply one key event.
    ///
    /// When saving fails the session stays at the save prompt.
    pub fn handle_key<N: Namespace>(&mut self, key: Key, table: &mut N) -> SemkResult<Outcome> {
        let (next, action) = transition(self.mode, key);
        if self.trace {
            eprintln!("[EDIT] {} {:?} -> {:?}", self.mode.as_str(), key, action);
        }

        let outcome = match action {
            Action::Ignore => Outcome::Unchanged,
            Action::Insert(ch) => match self.buffer.insert_at_cursor(ch) {
                Ok(()) => {
                    self.status = None;
                    Outcome::Edited
                }
                Err(SemkError::CapacityExceeded { capacity }) => {
                    self.status = Some(format!("Buffer full ({} bytes), input dropped", capacity));
                    if self.trace {
                        eprintln!("[EDIT] buffer full, dropped {:#04X}", ch);
                    }
                    Outcome::BufferFull
                }
                Err(e) => return Err(e),
            },
            Action::Backspace => {
                if self.buffer.backspace() {
                    self.status = None;
                    Outcome::Edited
                } else {
                    Outcome::Unchanged
                }
            }
            Action::Move(direction) => {
                if self.buffer.move_cursor(direction, self.wrap_width) {
                    Outcome::CursorMoved
                } else {
                    Outcome::Unchanged
                }
            }
            Action::Prompt => {
                self.invalid_answer = false;
                Outcome::Prompted
            }
            Action::Reprompt => {
                self.invalid_answer = true;
                Outcome::Reprompted
            }
            Action::Save => {
                let bytes = self.save(table)?;
                self.close();
                Outcome::Saved { bytes }
            }
            Action::Discard => {
                self.close();
                Outcome::Discarded
            }
        };

        self.mode = next;
        Ok(outcome)
    }

    /// Write the buffer back to the file by name. A file deleted while open
    /// is recreated; its old slot may by now belong to another entry.
    fn save<N: Namespace>(&mut self, table: &mut N) -> SemkResult<usize> {
        let file = self.file.as_mut().ok_or(SemkError::InvalidHandle(u16::MAX))?;

        match table.store(&file.name, file.dir, self.buffer.as_bytes()) {
            Ok((id, bytes)) => {
                file.id = id;
                if self.trace {
                    eprintln!("[EDIT] saved {} ({}): {} bytes", file.name, file.id, bytes);
                }
                Ok(bytes)
            }
            Err(e) => {
                self.status = Some(format!("Save failed: {}", e));
                Err(e)
            }
        }
    }

    fn close(&mut self) {
        self.file = None;
        self.buffer.clear();
        self.status = None;
        self.invalid_answer = false;
    }
}

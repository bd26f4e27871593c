//! Line-wrapped text editor.
//!
//! - `EditBuffer`: bounded byte sequence with a cursor and the offset <-> screen mapping
//! - `EditorSession`: three-state session over one name table entry
//! - `render`: draws a session through the `Terminal` trait

mod buffer;
mod key;
mod render;
mod session;

pub use buffer::{Cell, EditBuffer, Replay, ScreenPos, LINE_BREAK};
pub use key::{is_printable, Direction, Key};
pub use render::{render, scroll_top, wrapped_rows};
pub use session::{transition, Action, EditorSession, Mode, OpenFile, Outcome};

//! Semk RAM filesystem and editor core
//!
//! This crate provides the core components of the Semk system:
//! - Hierarchical in-memory filesystem stored in a flat, fixed-capacity table
//! - Line-wrapped text buffer with offset <-> screen position mapping
//! - Editor session state machine that loads and saves table entries
//! - Terminal abstraction for display output and key input
//!
//! # Architecture
//!
//! The core uses a layered design:
//! - `NameTable`: arena of entries addressed by stable `EntryId` handles
//! - `Namespace` trait: the operation set, implemented by `NameTable` and `SharedTable`
//! - `EditorSession`: drives an `EditBuffer` against one entry
//! - `Terminal` trait: display sink + keystroke source
//! - `Context`: table, working directory and session, threaded through dispatch

pub mod bootstrap;
pub mod config;
pub mod context;
pub mod editor;
pub mod error;
pub mod fs;
pub mod terminal;

pub use bootstrap::bootstrap;
pub use config::{BootstrapConfig, Config, EditorConfig, Layout};
pub use context::Context;
pub use editor::{
    render, transition, Action, Direction, EditBuffer, EditorSession, Key, Mode, OpenFile,
    Outcome, ScreenPos,
};
pub use error::{SemkError, SemkResult};
pub use fs::{
    validate_name, DirEntry, Entry, EntryId, EntryKind, NameTable, Namespace, NodeRef,
    SharedTable,
};
pub use terminal::{HeadlessTerminal, Style, Terminal};

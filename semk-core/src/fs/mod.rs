//! RAM filesystem.
//!
//! This module provides the layered filesystem architecture:
//! - `NameTable`: flat, fixed-capacity arena of entries linked by parent handle
//! - `ContentStore`: fixed-capacity content owned by each file entry
//! - `Namespace`: the operation set every caller goes through
//! - `SharedTable`: lock-guarded handle for sharing one table

mod content;
mod entry;
mod name_table;
mod namespace;
mod path;
mod shared;

pub use content::ContentStore;
pub use entry::{Entry, EntryId, EntryKind, NodeRef};
pub use name_table::{Children, NameTable};
pub use namespace::{DirEntry, Namespace};
pub use path::{components, is_absolute, is_dot_name, validate_name, SEPARATOR};
pub use shared::SharedTable;

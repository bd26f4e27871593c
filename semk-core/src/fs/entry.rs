//! Entry records and handles.

use std::fmt;

use super::content::ContentStore;

/// Stable handle to a live entry: its slot index in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub(crate) u16);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A position in the namespace: the root sentinel or a materialized entry.
///
/// The root is never stored in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRef {
    Root,
    Entry(EntryId),
}

impl NodeRef {
    /// The entry handle, or `None` for the root.
    pub fn entry(self) -> Option<EntryId> {
        match self {
            NodeRef::Root => None,
            NodeRef::Entry(id) => Some(id),
        }
    }
}

impl From<EntryId> for NodeRef {
    fn from(id: EntryId) -> Self {
        NodeRef::Entry(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

/// One record in the name table.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) parent: NodeRef,
    pub(crate) kind: EntryKind,
    /// Present for files only.
    pub(crate) content: Option<ContentStore>,
}

impl Entry {
    pub(crate) fn new(name: &str, parent: NodeRef, kind: EntryKind, file_capacity: usize) -> Self {
        let content = match kind {
            EntryKind::File => Some(ContentStore::new(file_capacity)),
            EntryKind::Directory => None,
        };
        Self {
            name: name.to_string(),
            parent,
            kind,
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> NodeRef {
        self.parent
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Content length in bytes; always 0 for directories.
    pub fn size(&self) -> usize {
        self.content.as_ref().map_or(0, ContentStore::len)
    }

    /// Case-insensitive name comparison used for lookup and uniqueness.
    pub(crate) fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

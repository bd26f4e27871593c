//! Namespace trait - the public operation set of the filesystem.

use super::entry::{EntryId, EntryKind, NodeRef};
use super::name_table::NameTable;
use crate::error::{SemkError, SemkResult};

/// Snapshot of one directory child, as returned by [`Namespace::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub id: EntryId,
    pub name: String,
    pub kind: EntryKind,
    pub size: usize,
}

/// The operations through which entries are created, read and mutated.
/// Nothing else may touch an entry.
pub trait Namespace {
    fn lookup(&self, name: &str, parent: NodeRef) -> SemkResult<NodeRef>;

    fn create(&mut self, name: &str, parent: NodeRef, kind: EntryKind) -> SemkResult<EntryId>;

    fn delete(&mut self, name: &str, parent: NodeRef) -> SemkResult<EntryId>;

    /// Replace a file's content; returns the bytes stored.
    fn write(&mut self, id: EntryId, data: &[u8]) -> SemkResult<usize>;

    fn read(&self, id: EntryId, max_len: usize) -> SemkResult<Vec<u8>>;

    /// Children of `parent` in table order.
    fn list(&self, parent: NodeRef) -> SemkResult<Vec<DirEntry>>;

    fn parent(&self, node: NodeRef) -> SemkResult<NodeRef>;

    fn path_of(&self, node: NodeRef) -> SemkResult<String>;

    fn resolve(&self, path: &str, cwd: NodeRef) -> SemkResult<NodeRef>;

    fn is_dir(&self, node: NodeRef) -> bool;

    /// Fixed content capacity of every file.
    fn file_capacity(&self) -> usize;

    /// Find a file, or create it empty, and return its handle and content.
    ///
    /// Implementations guarding the table with a lock should override this
    /// so the whole sequence runs under a single acquisition.
    fn open_or_create(&mut self, name: &str, parent: NodeRef) -> SemkResult<(EntryId, Vec<u8>)> {
        match self.lookup(name, parent) {
            Ok(NodeRef::Entry(id)) => {
                let content = self.read(id, self.file_capacity())?;
                Ok((id, content))
            }
            Ok(NodeRef::Root) => Err(SemkError::IsDirectory(name.to_string())),
            Err(SemkError::NotFound(_)) => {
                let id = self.create(name, parent, EntryKind::File)?;
                Ok((id, Vec::new()))
            }
            Err(e) => Err(e),
        }
    }

    /// Write `data` to the file `name` in `parent`, creating it if it is
    /// missing. The file is found by name, never by a remembered handle.
    /// Returns the file's handle and the bytes stored.
    ///
    /// Lock-guarded implementations should override this like
    /// [`open_or_create`](Self::open_or_create).
    fn store(&mut self, name: &str, parent: NodeRef, data: &[u8]) -> SemkResult<(EntryId, usize)> {
        let id = match self.lookup(name, parent) {
            Ok(NodeRef::Entry(id)) => id,
            Ok(NodeRef::Root) => return Err(SemkError::IsDirectory(name.to_string())),
            Err(SemkError::NotFound(_)) => self.create(name, parent, EntryKind::File)?,
            Err(e) => return Err(e),
        };
        let stored = self.write(id, data)?;
        Ok((id, stored))
    }
}

impl Namespace for NameTable {
    fn lookup(&self, name: &str, parent: NodeRef) -> SemkResult<NodeRef> {
        NameTable::lookup(self, name, parent)
    }

    fn create(&mut self, name: &str, parent: NodeRef, kind: EntryKind) -> SemkResult<EntryId> {
        NameTable::create(self, name, parent, kind)
    }

    fn delete(&mut self, name: &str, parent: NodeRef) -> SemkResult<EntryId> {
        NameTable::delete(self, name, parent)
    }

    fn write(&mut self, id: EntryId, data: &[u8]) -> SemkResult<usize> {
        NameTable::write(self, id, data)
    }

    fn read(&self, id: EntryId, max_len: usize) -> SemkResult<Vec<u8>> {
        NameTable::read(self, id, max_len)
    }

    fn list(&self, parent: NodeRef) -> SemkResult<Vec<DirEntry>> {
        Ok(NameTable::list(self, parent)
            .map(|(id, e)| DirEntry {
                id,
                name: e.name().to_string(),
                kind: e.kind(),
                size: e.size(),
            })
            .collect())
    }

    fn parent(&self, node: NodeRef) -> SemkResult<NodeRef> {
        NameTable::parent(self, node)
    }

    fn path_of(&self, node: NodeRef) -> SemkResult<String> {
        NameTable::path_of(self, node)
    }

    fn resolve(&self, path: &str, cwd: NodeRef) -> SemkResult<NodeRef> {
        NameTable::resolve(self, path, cwd)
    }

    fn is_dir(&self, node: NodeRef) -> bool {
        NameTable::is_dir(self, node)
    }

    fn file_capacity(&self) -> usize {
        self.layout().file_capacity
    }
}

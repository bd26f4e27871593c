//! Shared name table - one table reachable from several owners.
//!
//! Every operation takes the table lock for its whole duration, so callers
//! on different threads see each operation as atomic. `open_or_create`
//! holds the lock across lookup, create and read.

use std::sync::{Arc, Mutex, MutexGuard};

use super::entry::{EntryId, EntryKind, NodeRef};
use super::name_table::NameTable;
use super::namespace::{DirEntry, Namespace};
use crate::error::{SemkError, SemkResult};

/// Cloneable handle to a mutex-guarded [`NameTable`].
/// Clone is cheap (just clones the Arc).
#[derive(Clone, Default)]
pub struct SharedTable {
    inner: Arc<Mutex<NameTable>>,
}

impl SharedTable {
    pub fn new(table: NameTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(table)),
        }
    }

    /// Lock the table for a sequence of operations.
    pub fn lock(&self) -> SemkResult<MutexGuard<'_, NameTable>> {
        self.inner.lock().map_err(|_| SemkError::LockPoisoned)
    }
}

impl Namespace for SharedTable {
    fn lookup(&self, name: &str, parent: NodeRef) -> SemkResult<NodeRef> {
        self.lock()?.lookup(name, parent)
    }

    fn create(&mut self, name: &str, parent: NodeRef, kind: EntryKind) -> SemkResult<EntryId> {
        self.lock()?.create(name, parent, kind)
    }

    fn delete(&mut self, name: &str, parent: NodeRef) -> SemkResult<EntryId> {
        self.lock()?.delete(name, parent)
    }

    fn write(&mut self, id: EntryId, data: &[u8]) -> SemkResult<usize> {
        self.lock()?.write(id, data)
    }

    fn read(&self, id: EntryId, max_len: usize) -> SemkResult<Vec<u8>> {
        self.lock()?.read(id, max_len)
    }

    fn list(&self, parent: NodeRef) -> SemkResult<Vec<DirEntry>> {
        Namespace::list(&*self.lock()?, parent)
    }

    fn parent(&self, node: NodeRef) -> SemkResult<NodeRef> {
        self.lock()?.parent(node)
    }

    fn path_of(&self, node: NodeRef) -> SemkResult<String> {
        self.lock()?.path_of(node)
    }

    fn resolve(&self, path: &str, cwd: NodeRef) -> SemkResult<NodeRef> {
        self.lock()?.resolve(path, cwd)
    }

    fn is_dir(&self, node: NodeRef) -> bool {
        self.lock().map(|t| t.is_dir(node)).unwrap_or(false)
    }

    fn file_capacity(&self) -> usize {
        self.lock()
            .map(|t| t.layout().file_capacity)
            .unwrap_or_default()
    }

    fn open_or_create(&mut self, name: &str, parent: NodeRef) -> SemkResult<(EntryId, Vec<u8>)> {
        self.lock()?.open_or_create(name, parent)
    }

    fn store(&mut self, name: &str, parent: NodeRef, data: &[u8]) -> SemkResult<(EntryId, usize)> {
        self.lock()?.store(name, parent, data)
    }
}

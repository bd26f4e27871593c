//! Flat, fixed-capacity name table.
//!
//! The namespace tree is stored as an arena of slots. Each entry points at
//! its parent by handle; there are no child lists, so enumeration and
//! emptiness checks are linear scans over the table.

use super::entry::{Entry, EntryId, EntryKind, NodeRef};
use super::path::{components, is_absolute, is_dot_name, validate_name, SEPARATOR};
use crate::config::Layout;
use crate::error::{SemkError, SemkResult};

/// The filesystem: a preallocated table of entry slots.
#[derive(Debug, Clone)]
pub struct NameTable {
    slots: Vec<Option<Entry>>,
    layout: Layout,
    /// Enable operation tracing on stderr.
    pub trace: bool,
}

impl Default for NameTable {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl NameTable {
    /// Create an empty table with `layout.max_entries` free slots.
    pub fn new(layout: Layout) -> Self {
        Self {
            slots: vec![None; layout.max_entries],
            layout,
            trace: false,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Borrow a live entry.
    pub fn entry(&self, id: EntryId) -> SemkResult<&Entry> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(SemkError::InvalidHandle(id.0))
    }

    fn entry_mut(&mut self, id: EntryId) -> SemkResult<&mut Entry> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SemkError::InvalidHandle(id.0))
    }

    /// Resolve a single name inside `parent`.
    ///
    /// `.` resolves to `parent` and `..` to its parent. Other names are
    /// matched case-insensitively against live children.
    pub fn lookup(&self, name: &str, parent: NodeRef) -> SemkResult<NodeRef> {
        match name {
            "." => {
                self.check_live(parent)?;
                Ok(parent)
            }
            ".." => self.parent(parent),
            _ => self
                .live()
                .find(|(_, e)| e.parent == parent && e.name_matches(name))
                .map(|(id, _)| NodeRef::Entry(id))
                .ok_or_else(|| SemkError::NotFound(name.to_string())),
        }
    }

    /// Create a file or directory named `name` inside `parent`.
    ///
    /// Files get an empty content buffer of the configured capacity.
    pub fn create(&mut self, name: &str, parent: NodeRef, kind: EntryKind) -> SemkResult<EntryId> {
        validate_name(name, self.layout.max_name_len)?;
        self.check_dir(parent)?;

        if self.lookup(name, parent).is_ok() {
            return Err(SemkError::AlreadyExists(name.to_string()));
        }

        let index = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(SemkError::TableFull)?;
        self.slots[index] = Some(Entry::new(name, parent, kind, self.layout.file_capacity));

        let id = EntryId(index as u16);
        if self.trace {
            eprintln!("[FS] create {:?} {} in {:?} -> {}", kind, name, parent, id);
        }
        Ok(id)
    }

    /// Delete the entry named `name` inside `parent`.
    ///
    /// A directory is only deleted when no live entry names it as parent.
    /// On failure nothing is changed.
    pub fn delete(&mut self, name: &str, parent: NodeRef) -> SemkResult<EntryId> {
        if is_dot_name(name) {
            return Err(SemkError::InvalidName(name.to_string()));
        }

        let id = match self.lookup(name, parent)? {
            NodeRef::Entry(id) => id,
            NodeRef::Root => return Err(SemkError::InvalidName(name.to_string())),
        };

        let target = NodeRef::Entry(id);
        if self.entry(id)?.is_dir() && self.has_children(target) {
            return Err(SemkError::NotEmpty(name.to_string()));
        }

        self.slots[id.index()] = None;
        if self.trace {
            eprintln!("[FS] delete {} ({})", name, id);
        }
        Ok(id)
    }

    /// Replace a file's content. Returns the number of bytes stored, which
    /// is less than `data.len()` when the data exceeds the file capacity.
    pub fn write(&mut self, id: EntryId, data: &[u8]) -> SemkResult<usize> {
        let trace = self.trace;
        let entry = self.entry_mut(id)?;
        let name = entry.name.clone();
        let content = entry
            .content
            .as_mut()
            .ok_or_else(|| SemkError::IsDirectory(name.clone()))?;

        let stored = content.replace(data);
        if trace {
            eprintln!("[FS] write {} ({}): {} bytes", name, id, stored);
            if stored < data.len() {
                eprintln!(
                    "[FS] write {} truncated: {} of {} bytes dropped",
                    name,
                    data.len() - stored,
                    data.len()
                );
            }
        }
        Ok(stored)
    }

    /// Read up to `max_len` bytes of a file.
    pub fn read(&self, id: EntryId, max_len: usize) -> SemkResult<Vec<u8>> {
        let entry = self.entry(id)?;
        entry
            .content
            .as_ref()
            .map(|c| c.read(max_len).to_vec())
            .ok_or_else(|| SemkError::IsDirectory(entry.name.clone()))
    }

    /// Live children of `parent`, in table order.
    ///
    /// The iterator is lazy and can be cloned to restart the scan.
    pub fn list(&self, parent: NodeRef) -> Children<'_> {
        Children {
            slots: &self.slots,
            parent,
            next: 0,
        }
    }

    /// Parent of a node. The root is its own parent.
    pub fn parent(&self, node: NodeRef) -> SemkResult<NodeRef> {
        match node {
            NodeRef::Root => Ok(NodeRef::Root),
            NodeRef::Entry(id) => Ok(self.entry(id)?.parent),
        }
    }

    /// Absolute path of a node, e.g. `/home/user/hello.txt`.
    pub fn path_of(&self, node: NodeRef) -> SemkResult<String> {
        let mut names = Vec::new();
        let mut current = node;
        while let NodeRef::Entry(id) = current {
            let entry = self.entry(id)?;
            names.push(entry.name.as_str());
            current = entry.parent;
        }

        if names.is_empty() {
            return Ok(SEPARATOR.to_string());
        }

        let mut path = String::new();
        for name in names.iter().rev() {
            path.push(SEPARATOR);
            path.push_str(name);
        }
        Ok(path)
    }

    /// Display name of a node; the root is `/`.
    pub fn name_of(&self, node: NodeRef) -> SemkResult<&str> {
        match node {
            NodeRef::Root => Ok("/"),
            NodeRef::Entry(id) => Ok(self.entry(id)?.name()),
        }
    }

    /// Whether `node` is the root or a live directory.
    pub fn is_dir(&self, node: NodeRef) -> bool {
        match node {
            NodeRef::Root => true,
            NodeRef::Entry(id) => self.entry(id).map(Entry::is_dir).unwrap_or(false),
        }
    }

    /// Resolve a `/`-separated path, absolute or relative to `cwd`.
    pub fn resolve(&self, path: &str, cwd: NodeRef) -> SemkResult<NodeRef> {
        let mut node = if is_absolute(path) { NodeRef::Root } else { cwd };
        for component in components(path) {
            self.check_dir(node)?;
            node = self.lookup(component, node)?;
        }
        Ok(node)
    }

    /// Resolve a directory path, creating any missing directories.
    pub fn create_dir_all(&mut self, path: &str, cwd: NodeRef) -> SemkResult<NodeRef> {
        let mut node = if is_absolute(path) { NodeRef::Root } else { cwd };
        for component in components(path) {
            node = match self.lookup(component, node) {
                Ok(found) if self.is_dir(found) => found,
                Ok(_) => return Err(SemkError::NotADirectory(component.to_string())),
                Err(SemkError::NotFound(_)) => {
                    NodeRef::Entry(self.create(component, node, EntryKind::Directory)?)
                }
                Err(e) => return Err(e),
            };
        }
        Ok(node)
    }

    fn live(&self) -> impl Iterator<Item = (EntryId, &Entry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EntryId(i as u16), e)))
    }

    fn has_children(&self, node: NodeRef) -> bool {
        self.live().any(|(_, e)| e.parent == node)
    }

    fn check_live(&self, node: NodeRef) -> SemkResult<()> {
        match node {
            NodeRef::Root => Ok(()),
            NodeRef::Entry(id) => self.entry(id).map(|_| ()),
        }
    }

    /// `node` must be the root or a live directory.
    fn check_dir(&self, node: NodeRef) -> SemkResult<()> {
        match node {
            NodeRef::Root => Ok(()),
            NodeRef::Entry(id) => {
                let entry = self.entry(id)?;
                if entry.is_dir() {
                    Ok(())
                } else {
                    Err(SemkError::NotADirectory(entry.name.clone()))
                }
            }
        }
    }
}

/// Lazy scan over the children of one directory.
#[derive(Clone)]
pub struct Children<'a> {
    slots: &'a [Option<Entry>],
    parent: NodeRef,
    next: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = (EntryId, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.slots.len() {
            let index = self.next;
            self.next += 1;
            if let Some(entry) = &self.slots[index] {
                if entry.parent == self.parent {
                    return Some((EntryId(index as u16), entry));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table(max_entries: usize) -> NameTable {
        NameTable::new(Layout {
            max_entries,
            max_name_len: 31,
            file_capacity: 8,
        })
    }

    #[test]
    fn test_create_and_lookup() {
        let mut table = NameTable::default();
        let home = table.create("home", NodeRef::Root, EntryKind::Directory).unwrap();

        assert_eq!(table.lookup("home", NodeRef::Root).unwrap(), NodeRef::Entry(home));
        assert_eq!(table.lookup("HOME", NodeRef::Root).unwrap(), NodeRef::Entry(home)); // Case insensitive
        assert!(matches!(
            table.lookup("home", NodeRef::Entry(home)),
            Err(SemkError::NotFound(_))
        ));
    }

    #[test]
    fn test_dot_names() {
        let mut table = NameTable::default();
        let a = table.create("a", NodeRef::Root, EntryKind::Directory).unwrap();
        let b = table.create("b", a.into(), EntryKind::Directory).unwrap();

        assert_eq!(table.lookup(".", b.into()).unwrap(), NodeRef::Entry(b));
        assert_eq!(table.lookup("..", b.into()).unwrap(), NodeRef::Entry(a));
        assert_eq!(table.lookup("..", a.into()).unwrap(), NodeRef::Root);
        assert_eq!(table.lookup("..", NodeRef::Root).unwrap(), NodeRef::Root);
    }

    #[test]
    fn test_create_duplicate_case_insensitive() {
        let mut table = NameTable::default();
        table.create("Notes.txt", NodeRef::Root, EntryKind::File).unwrap();

        let err = table.create("NOTES.TXT", NodeRef::Root, EntryKind::Directory).unwrap_err();
        assert!(matches!(err, SemkError::AlreadyExists(_)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_same_name_in_different_directories() {
        let mut table = NameTable::default();
        let a = table.create("a", NodeRef::Root, EntryKind::Directory).unwrap();
        table.create("x", NodeRef::Root, EntryKind::File).unwrap();
        table.create("x", a.into(), EntryKind::File).unwrap();
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_create_in_file_fails() {
        let mut table = NameTable::default();
        let f = table.create("f", NodeRef::Root, EntryKind::File).unwrap();
        assert!(matches!(
            table.create("x", f.into(), EntryKind::File),
            Err(SemkError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_create_in_deleted_directory_fails() {
        let mut table = NameTable::default();
        let d = table.create("d", NodeRef::Root, EntryKind::Directory).unwrap();
        table.delete("d", NodeRef::Root).unwrap();
        assert!(matches!(
            table.create("x", d.into(), EntryKind::File),
            Err(SemkError::InvalidHandle(_))
        ));
    }

    #[test]
    fn test_table_full() {
        let mut table = small_table(2);
        table.create("a", NodeRef::Root, EntryKind::File).unwrap();
        table.create("b", NodeRef::Root, EntryKind::File).unwrap();
        assert!(matches!(
            table.create("c", NodeRef::Root, EntryKind::File),
            Err(SemkError::TableFull)
        ));
    }

    #[test]
    fn test_delete_frees_slot() {
        let mut table = small_table(1);
        let a = table.create("a", NodeRef::Root, EntryKind::File).unwrap();
        table.delete("a", NodeRef::Root).unwrap();
        assert!(table.is_empty());

        let b = table.create("b", NodeRef::Root, EntryKind::File).unwrap();
        assert_eq!(a, b); // Slot reused
    }

    #[test]
    fn test_delete_non_empty_directory() {
        let mut table = NameTable::default();
        let dir = table.create("dir", NodeRef::Root, EntryKind::Directory).unwrap();
        let file = table.create("f", dir.into(), EntryKind::File).unwrap();

        assert!(matches!(
            table.delete("dir", NodeRef::Root),
            Err(SemkError::NotEmpty(_))
        ));
        assert!(table.entry(dir).is_ok());
        assert!(table.entry(file).is_ok());

        table.delete("f", dir.into()).unwrap();
        table.delete("dir", NodeRef::Root).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_delete_missing_and_dot_names() {
        let mut table = NameTable::default();
        assert!(matches!(
            table.delete("nothing", NodeRef::Root),
            Err(SemkError::NotFound(_))
        ));
        assert!(matches!(
            table.delete("..", NodeRef::Root),
            Err(SemkError::InvalidName(_))
        ));
    }

    #[test]
    fn test_write_read() {
        let mut table = small_table(4);
        let f = table.create("f", NodeRef::Root, EntryKind::File).unwrap();
        assert_eq!(table.read(f, 100).unwrap(), b"");

        assert_eq!(table.write(f, b"hello").unwrap(), 5);
        assert_eq!(table.entry(f).unwrap().size(), 5);
        assert_eq!(table.read(f, 100).unwrap(), b"hello");
        assert_eq!(table.read(f, 3).unwrap(), b"hel");

        // Replaced, not appended; truncated to capacity
        assert_eq!(table.write(f, b"0123456789").unwrap(), 8);
        assert_eq!(table.read(f, 100).unwrap(), b"01234567");
    }

    #[test]
    fn test_write_read_directory() {
        let mut table = NameTable::default();
        let d = table.create("d", NodeRef::Root, EntryKind::Directory).unwrap();
        assert!(matches!(table.write(d, b"x"), Err(SemkError::IsDirectory(_))));
        assert!(matches!(table.read(d, 1), Err(SemkError::IsDirectory(_))));
        assert_eq!(table.entry(d).unwrap().size(), 0);
    }

    #[test]
    fn test_list_table_order_and_restartable() {
        let mut table = NameTable::default();
        let dir = table.create("dir", NodeRef::Root, EntryKind::Directory).unwrap();
        table.create("b", dir.into(), EntryKind::File).unwrap();
        table.create("outside", NodeRef::Root, EntryKind::File).unwrap();
        table.create("a", dir.into(), EntryKind::File).unwrap();

        let children = table.list(dir.into());
        let names: Vec<_> = children.clone().map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["b", "a"]); // Table order, not sorted
        assert_eq!(children.count(), 2);
    }

    #[test]
    fn test_path_of() {
        let mut table = NameTable::default();
        let a = table.create("a", NodeRef::Root, EntryKind::Directory).unwrap();
        let b = table.create("b", a.into(), EntryKind::Directory).unwrap();

        assert_eq!(table.path_of(b.into()).unwrap(), "/a/b");
        assert_eq!(table.path_of(a.into()).unwrap(), "/a");
        assert_eq!(table.path_of(NodeRef::Root).unwrap(), "/");
        assert_eq!(table.name_of(b.into()).unwrap(), "b");
        assert_eq!(table.name_of(NodeRef::Root).unwrap(), "/");
    }

    #[test]
    fn test_resolve() {
        let mut table = NameTable::default();
        let user = table.create_dir_all("/home/user", NodeRef::Root).unwrap();
        let file = table.create("hello.txt", user, EntryKind::File).unwrap();

        assert_eq!(table.resolve("/home/user", NodeRef::Root).unwrap(), user);
        assert_eq!(table.resolve("..", user).unwrap(), table.parent(user).unwrap());
        assert_eq!(table.resolve("../user/./hello.txt", user).unwrap(), NodeRef::Entry(file));
        assert_eq!(table.resolve("/", user).unwrap(), NodeRef::Root);
        assert!(matches!(
            table.resolve("hello.txt/x", user),
            Err(SemkError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_create_dir_all_is_idempotent() {
        let mut table = NameTable::default();
        let first = table.create_dir_all("/home/user", NodeRef::Root).unwrap();
        let second = table.create_dir_all("/home/user", NodeRef::Root).unwrap();
        assert_eq!(first, second);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_invalid_names() {
        let mut table = NameTable::default();
        assert!(matches!(
            table.create("", NodeRef::Root, EntryKind::File),
            Err(SemkError::InvalidName(_))
        ));
        assert!(matches!(
            table.create(&"n".repeat(40), NodeRef::Root, EntryKind::File),
            Err(SemkError::InvalidName(_))
        ));
    }
}

//! Fixed-capacity file content.

/// Byte buffer owned by a file entry. Never grows past `capacity`.
#[derive(Debug, Clone)]
pub struct ContentStore {
    bytes: Vec<u8>,
    capacity: usize,
}

impl ContentStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Replace the content wholesale. Data past the capacity is dropped;
    /// returns the number of bytes stored.
    pub fn replace(&mut self, data: &[u8]) -> usize {
        let stored = data.len().min(self.capacity);
        self.bytes.clear();
        self.bytes.extend_from_slice(&data[..stored]);
        stored
    }

    /// The first `min(len, max_len)` bytes.
    pub fn read(&self, max_len: usize) -> &[u8] {
        &self.bytes[..self.bytes.len().min(max_len)]
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_is_not_append() {
        let mut store = ContentStore::new(16);
        store.replace(b"first write");
        assert_eq!(store.replace(b"second"), 6);
        assert_eq!(store.read(usize::MAX), b"second");
    }

    #[test]
    fn test_replace_truncates_to_capacity() {
        let mut store = ContentStore::new(4);
        assert_eq!(store.replace(b"abcdef"), 4);
        assert_eq!(store.len(), 4);
        assert_eq!(store.read(100), b"abcd");
    }

    #[test]
    fn test_read_bounded() {
        let mut store = ContentStore::new(8);
        store.replace(b"hello");
        assert_eq!(store.read(2), b"he");
        assert_eq!(store.read(0), b"");
    }
}

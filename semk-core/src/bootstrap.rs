//! Startup seeding of the volatile table.

use crate::config::BootstrapConfig;
use crate::error::SemkResult;
use crate::fs::{EntryKind, NameTable, NodeRef};

/// Create the configured directory path and sample file.
///
/// Returns the directory, which is the shell's initial working directory.
/// Safe to call on a table that already holds the seed.
pub fn bootstrap(table: &mut NameTable, config: &BootstrapConfig) -> SemkResult<NodeRef> {
    let dir = table.create_dir_all(&config.directory, NodeRef::Root)?;

    if !config.sample_file.is_empty() {
        let id = match table.lookup(&config.sample_file, dir) {
            Ok(NodeRef::Entry(id)) => id,
            _ => table.create(&config.sample_file, dir, EntryKind::File)?,
        };
        table.write(id, config.sample_content.as_bytes())?;
    }

    if table.trace {
        eprintln!("[FS] bootstrap: {} ({} entries)", config.directory, table.len());
    }
    Ok(dir)
}

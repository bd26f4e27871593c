//! Context - the table, working directory and editor session of one process.
//!
//! All core state lives here and is passed by reference to whoever
//! dispatches input; there are no global singletons.

use crate::bootstrap::bootstrap;
use crate::config::Config;
use crate::editor::{render, EditorSession, Key, Outcome};
use crate::error::{SemkError, SemkResult};
use crate::fs::{is_absolute, EntryId, NameTable, Namespace, NodeRef, SharedTable, SEPARATOR};
use crate::terminal::Terminal;

pub struct Context<N: Namespace> {
    table: N,
    cwd: NodeRef,
    session: EditorSession,
    text_rows: usize,
}

impl Context<SharedTable> {
    /// Build and seed a fresh table from `config`.
    pub fn boot(config: &Config, trace: bool) -> SemkResult<Self> {
        config.validate()?;

        let mut table = NameTable::new(config.layout.clone());
        table.trace = trace;
        let home = bootstrap(&mut table, &config.bootstrap)?;

        let mut ctx = Context::new(SharedTable::new(table), home, config);
        ctx.session.trace = trace;
        Ok(ctx)
    }
}

impl<N: Namespace> Context<N> {
    pub fn new(table: N, cwd: NodeRef, config: &Config) -> Self {
        Self {
            table,
            cwd,
            session: EditorSession::from_config(config),
            text_rows: config.editor.text_rows,
        }
    }

    pub fn table(&self) -> &N {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut N {
        &mut self.table
    }

    pub fn cwd(&self) -> NodeRef {
        self.cwd
    }

    pub fn cwd_path(&self) -> SemkResult<String> {
        self.table.path_of(self.cwd)
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_active()
    }

    /// Change the working directory.
    pub fn change_dir(&mut self, path: &str) -> SemkResult<NodeRef> {
        let target = self.table.resolve(path, self.cwd)?;
        if !self.table.is_dir(target) {
            return Err(SemkError::NotADirectory(path.to_string()));
        }
        self.cwd = target;
        Ok(target)
    }

    /// Split a path into the directory that holds its last component and
    /// that component's name.
    pub fn locate<'p>(&self, path: &'p str) -> SemkResult<(NodeRef, &'p str)> {
        match path.rsplit_once(SEPARATOR) {
            None => Ok((self.cwd, path)),
            Some((dir, name)) => {
                let dir = if dir.is_empty() && is_absolute(path) {
                    NodeRef::Root
                } else {
                    self.table.resolve(dir, self.cwd)?
                };
                Ok((dir, name))
            }
        }
    }

    /// Open a file in the editor, creating it if needed.
    pub fn edit(&mut self, path: &str) -> SemkResult<EntryId> {
        let (dir, name) = self.locate(path)?;
        self.session.open(&mut self.table, name, dir)
    }

    /// Feed one key event to the editor session.
    pub fn handle_key(&mut self, key: Key) -> SemkResult<Outcome> {
        self.session.handle_key(key, &mut self.table)
    }

    /// Redraw the editor.
    pub fn render<T: Terminal + ?Sized>(&self, term: &mut T) {
        render(&self.session, self.text_rows, term);
    }

    /// Run the editor until the session closes or input ends. The screen
    /// is cleared once the session closes.
    ///
    /// A failed save keeps the session at the prompt, with the failure on
    /// the status line.
    pub fn run_editor<T: Terminal + ?Sized>(&mut self, term: &mut T) -> SemkResult<()> {
        self.render(term);
        while self.session.is_active() {
            let Some(key) = term.wait_for_key() else {
                break;
            };
            if let Err(e) = self.handle_key(key) {
                if self.session.trace {
                    eprintln!("[EDIT] {}", e);
                }
            }
            if self.session.is_active() {
                self.render(term);
            }
        }
        if !self.session.is_active() {
            term.clear();
            term.flush();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Mode;
    use crate::terminal::HeadlessTerminal;

    fn booted() -> Context<SharedTable> {
        Context::boot(&Config::default(), false).unwrap()
    }

    #[test]
    fn test_boot_starts_in_home() {
        let ctx = booted();
        assert_eq!(ctx.cwd_path().unwrap(), "/home/user");
        assert!(!ctx.is_editing());
    }

    #[test]
    fn test_change_dir() {
        let mut ctx = booted();
        ctx.change_dir("..").unwrap();
        assert_eq!(ctx.cwd_path().unwrap(), "/home");
        ctx.change_dir("/").unwrap();
        assert_eq!(ctx.cwd(), NodeRef::Root);
        ctx.change_dir("home/user").unwrap();
        assert_eq!(ctx.cwd_path().unwrap(), "/home/user");

        assert!(matches!(
            ctx.change_dir("hello.txt"),
            Err(SemkError::NotADirectory(_))
        ));
        assert!(matches!(ctx.change_dir("nowhere"), Err(SemkError::NotFound(_))));
        assert_eq!(ctx.cwd_path().unwrap(), "/home/user");
    }

    #[test]
    fn test_locate() {
        let ctx = booted();
        assert_eq!(ctx.locate("a.txt").unwrap(), (ctx.cwd(), "a.txt"));
        assert_eq!(ctx.locate("/a.txt").unwrap(), (NodeRef::Root, "a.txt"));
        let (dir, name) = ctx.locate("/home/x").unwrap();
        assert_eq!(ctx.table().path_of(dir).unwrap(), "/home");
        assert_eq!(name, "x");
    }

    #[test]
    fn test_edit_by_path() {
        let mut ctx = booted();
        ctx.change_dir("/").unwrap();
        ctx.edit("/home/user/hello.txt").unwrap();
        assert_eq!(ctx.session().mode(), Mode::Editing);
        assert_eq!(ctx.session().buffer().as_bytes(), b"Hello from the RAM filesystem!");
    }

    #[test]
    fn test_run_editor_saves() {
        let mut ctx = booted();
        let id = ctx.edit("todo.txt").unwrap();

        let mut term = HeadlessTerminal::default();
        term.queue_text("milk");
        term.queue_keys(&[Key::ExitRequest, Key::Char(b'y')]);
        ctx.run_editor(&mut term).unwrap();

        assert!(!ctx.is_editing());
        assert_eq!(ctx.table().read(id, 100).unwrap(), b"milk");
        assert_eq!(term.row_text(0), ""); // Cleared on exit
    }

    #[test]
    fn test_run_editor_input_ends() {
        let mut ctx = booted();
        ctx.edit("todo.txt").unwrap();

        let mut term = HeadlessTerminal::default();
        term.queue_text("ab");
        ctx.run_editor(&mut term).unwrap();
        assert_eq!(term.pending_keys(), 0);

        // Session stays open when input runs out
        assert!(ctx.is_editing());
        assert_eq!(ctx.session().buffer().as_bytes(), b"ab");
    }
}

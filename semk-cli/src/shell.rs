//! Shell commands - turns command lines into name table operations.

use std::io::Write;

use clap::{Parser, Subcommand};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};

use semk_core::{Context, EntryKind, Namespace, NodeRef, SemkError, SemkResult};

/// One shell command line.
#[derive(Parser, Debug)]
#[command(multicall = true, disable_help_subcommand = true)]
struct Line {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// List the current directory
    Ls,
    /// Change directory
    Cd { dir: String },
    /// Print the current directory
    Pwd,
    /// Create a directory
    Mkdir { name: String },
    /// Create an empty file
    Touch { name: String },
    /// Remove a file or an empty directory
    Rm { name: String },
    /// Print a file
    Cat { name: String },
    /// Open a file in the editor
    Edit { name: String },
    /// Clear the screen
    Clear,
    /// Show available commands
    Help,
    /// Leave the shell
    Exit,
}

/// What the caller should do after a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    /// An editor session was opened; run it.
    Edit,
    Exit,
}

const HELP: &str =
    "Commands: ls, cd <dir>, pwd, mkdir <dir>, touch <file>, rm <file/dir>, cat <file>, edit <file>, clear, exit";

/// Prompt text: the current directory's name.
pub fn prompt<N: Namespace>(ctx: &Context<N>) -> String {
    match ctx.cwd() {
        NodeRef::Root => "/ > ".to_string(),
        cwd => {
            let path = ctx.table().path_of(cwd).unwrap_or_default();
            let name = path.rsplit('/').next().unwrap_or_default();
            format!("{} > ", name)
        }
    }
}

/// User-visible message for a failed command.
pub fn describe(command: &str, err: &SemkError) -> String {
    match (command, err) {
        ("cd", SemkError::NotFound(_)) => "Directory not found.".to_string(),
        ("cd", SemkError::NotADirectory(_)) => "Not a directory.".to_string(),
        ("cat", SemkError::NotFound(_) | SemkError::IsDirectory(_)) => "File not found.".to_string(),
        ("rm", SemkError::NotFound(_)) => "Not found.".to_string(),
        ("rm", SemkError::NotEmpty(_)) => {
            "Error deleting directory: Directory not empty.".to_string()
        }
        (_, SemkError::AlreadyExists(name)) => format!("Already exists: {}", name),
        (_, e) => format!("Error: {}", e),
    }
}

/// Parse and run one command line, writing output to `out`.
pub fn execute<N: Namespace, W: Write>(
    ctx: &mut Context<N>,
    line: &str,
    out: &mut W,
) -> std::io::Result<ShellAction> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(first) = words.first().copied() else {
        return Ok(ShellAction::Continue);
    };

    let command = match Line::try_parse_from(words.iter().copied()) {
        Ok(line) => line.command,
        Err(e) if e.kind() == clap::error::ErrorKind::InvalidSubcommand => {
            writeln!(out, "Unknown command: {}", line.trim())?;
            return Ok(ShellAction::Continue);
        }
        Err(e) => {
            write!(out, "{}", e.render())?;
            return Ok(ShellAction::Continue);
        }
    };

    match run(ctx, command, out) {
        Ok(action) => Ok(action),
        Err(ShellError::Io(e)) => Err(e),
        Err(ShellError::Semk(e)) => {
            writeln!(out, "{}", describe(first, &e))?;
            Ok(ShellAction::Continue)
        }
    }
}

enum ShellError {
    Semk(SemkError),
    Io(std::io::Error),
}

impl From<SemkError> for ShellError {
    fn from(e: SemkError) -> Self {
        ShellError::Semk(e)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(e: std::io::Error) -> Self {
        ShellError::Io(e)
    }
}

fn run<N: Namespace, W: Write>(
    ctx: &mut Context<N>,
    command: ShellCommand,
    out: &mut W,
) -> Result<ShellAction, ShellError> {
    match command {
        ShellCommand::Ls => {
            writeln!(out, "Listing directory content:")?;
            for entry in ctx.table().list(ctx.cwd())? {
                match entry.kind {
                    EntryKind::Directory => writeln!(out, "{}{}", "[DIR] ".blue(), entry.name.as_str().blue())?,
                    EntryKind::File => writeln!(out, "      {} ({} bytes)", entry.name, entry.size)?,
                }
            }
        }
        ShellCommand::Cd { dir } => {
            ctx.change_dir(&dir)?;
        }
        ShellCommand::Pwd => {
            writeln!(out, "{}", ctx.cwd_path()?)?;
        }
        ShellCommand::Mkdir { name } => {
            create(ctx, &name, EntryKind::Directory)?;
        }
        ShellCommand::Touch { name } => {
            create(ctx, &name, EntryKind::File)?;
        }
        ShellCommand::Rm { name } => {
            let (dir, name) = ctx.locate(&name)?;
            ctx.table_mut().delete(name, dir)?;
        }
        ShellCommand::Cat { name } => {
            let node = ctx.table().resolve(&name, ctx.cwd())?;
            let NodeRef::Entry(id) = node else {
                return Err(SemkError::IsDirectory(name).into());
            };
            let capacity = ctx.table().file_capacity();
            let content = ctx.table().read(id, capacity)?;
            writeln!(out, "{}", String::from_utf8_lossy(&content))?;
        }
        ShellCommand::Edit { name } => {
            ctx.edit(&name)?;
            return Ok(ShellAction::Edit);
        }
        ShellCommand::Clear => {
            execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        ShellCommand::Help => {
            writeln!(out, "{}", HELP)?;
        }
        ShellCommand::Exit => {
            writeln!(out, "Shutting down...")?;
            return Ok(ShellAction::Exit);
        }
    }
    Ok(ShellAction::Continue)
}

fn create<N: Namespace>(ctx: &mut Context<N>, path: &str, kind: EntryKind) -> SemkResult<()> {
    let (dir, name) = ctx.locate(path)?;
    ctx.table_mut().create(name, dir, kind)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use semk_core::{Config, SharedTable};

    fn booted() -> Context<SharedTable> {
        Context::boot(&Config::default(), false).unwrap()
    }

    fn run_line(ctx: &mut Context<SharedTable>, line: &str) -> (ShellAction, String) {
        let mut out = Vec::new();
        let action = execute(ctx, line, &mut out).unwrap();
        (action, String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn test_parse_commands() {
        let line = Line::try_parse_from(["cd", ".."]).unwrap();
        assert_eq!(line.command, ShellCommand::Cd { dir: "..".to_string() });
        let line = Line::try_parse_from(["ls"]).unwrap();
        assert_eq!(line.command, ShellCommand::Ls);
    }

    #[test]
    fn test_prompt() {
        let mut ctx = booted();
        assert_eq!(prompt(&ctx), "user > ");
        ctx.change_dir("/").unwrap();
        assert_eq!(prompt(&ctx), "/ > ");
    }

    #[test]
    fn test_touch_ls_cat() {
        let mut ctx = booted();
        run_line(&mut ctx, "touch notes.txt");
        run_line(&mut ctx, "mkdir docs");

        let (_, listing) = run_line(&mut ctx, "ls");
        assert!(listing.contains("hello.txt (30 bytes)"));
        assert!(listing.contains("notes.txt (0 bytes)"));
        assert!(listing.contains("docs"));

        let (_, text) = run_line(&mut ctx, "cat hello.txt");
        assert_eq!(text, "Hello from the RAM filesystem!\n");
    }

    #[test]
    fn test_error_messages() {
        let mut ctx = booted();
        assert_eq!(run_line(&mut ctx, "cd nowhere").1, "Directory not found.\n");
        assert_eq!(run_line(&mut ctx, "cd hello.txt").1, "Not a directory.\n");
        assert_eq!(run_line(&mut ctx, "cat missing").1, "File not found.\n");
        assert_eq!(run_line(&mut ctx, "rm missing").1, "Not found.\n");
        assert_eq!(
            run_line(&mut ctx, "touch HELLO.TXT").1,
            "Already exists: HELLO.TXT\n"
        );
        assert_eq!(run_line(&mut ctx, "frobnicate now").1, "Unknown command: frobnicate now\n");
    }

    #[test]
    fn test_rm_non_empty() {
        let mut ctx = booted();
        run_line(&mut ctx, "cd /");
        let (_, msg) = run_line(&mut ctx, "rm home");
        assert_eq!(msg, "Error deleting directory: Directory not empty.\n");
        assert_eq!(run_line(&mut ctx, "cd home/user").1, "");
    }

    #[test]
    fn test_edit_and_exit_actions() {
        let mut ctx = booted();
        assert_eq!(run_line(&mut ctx, "edit new.txt").0, ShellAction::Edit);
        assert!(ctx.is_editing());
        assert_eq!(run_line(&mut ctx, "").0, ShellAction::Continue);
        assert_eq!(run_line(&mut ctx, "exit").0, ShellAction::Exit);
    }
}

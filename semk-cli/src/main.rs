//! Semk CLI - interactive shell and editor over the RAM filesystem.
//!
//! Usage:
//!   semk [--config semk.json] [--wrap-width N] [--trace]
//!
//! Examples:
//!   semk                             # Boot with the built-in defaults
//!   semk --config semk.json          # Load table and editor settings
//!   semk --wrap-width 40 --trace     # Narrow editor, trace table operations

mod shell;
mod term;

use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc as tokio_mpsc;

use semk_core::{Config, Context, Key, SharedTable};

use crate::shell::ShellAction;
use crate::term::{translate_key, CrosstermTerminal};

/// Semk shell
#[derive(Parser, Debug)]
#[command(name = "semk")]
#[command(about = "RAM filesystem shell with a full-screen editor")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the editor wrap width
    #[arg(short, long)]
    wrap_width: Option<usize>,

    /// Enable table and editor tracing
    #[arg(short, long)]
    trace: bool,
}

/// Run the open editor session on the real terminal.
///
/// The context moves into a blocking task for the duration of the session
/// and is handed back when it ends.
async fn run_editor(
    ctx: Context<SharedTable>,
) -> Result<Context<SharedTable>, Box<dyn std::error::Error>> {
    // Create channel for keyboard input
    let (key_tx, key_rx) = mpsc::channel::<Key>();

    // Create shutdown signal
    let (shutdown_tx, mut shutdown_rx) = tokio_mpsc::channel::<()>(1);

    // Enable raw mode (gracefully handle non-TTY)
    let raw_mode_enabled = enable_raw_mode().is_ok();

    // Spawn editor in blocking task
    let editor_handle = tokio::task::spawn_blocking(move || {
        let mut ctx = ctx;
        let result = CrosstermTerminal::new(key_rx)
            .map_err(semk_core::SemkError::from)
            .and_then(|mut term| ctx.run_editor(&mut term));
        (ctx, result)
    });

    // Spawn terminal input reader
    let input_handle = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    break;
                }
                _ = tokio::time::sleep(Duration::from_millis(10)) => {
                    // Poll for terminal events
                    if event::poll(Duration::from_millis(0)).unwrap_or(false) {
                        if let Ok(Event::Key(key_event)) = event::read() {
                            if key_event.kind == KeyEventKind::Release {
                                continue;
                            }
                            if let Some(key) = translate_key(key_event.code, key_event.modifiers) {
                                if key_tx.send(key).is_err() {
                                    break; // Channel closed
                                }
                            }
                        }
                    }
                }
            }
        }
    });

    // Wait for the session to close
    let (ctx, result) = editor_handle.await?;

    // Signal input handler to stop
    let _ = shutdown_tx.send(()).await;
    let _ = input_handle.await;

    // Disable raw mode if we enabled it
    if raw_mode_enabled {
        let _ = disable_raw_mode();
    }

    if let Err(e) = result {
        eprintln!("Editor error: {}", e);
    }
    Ok(ctx)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match Config::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return Err(e.into());
            }
        },
        None => Config::default(),
    };
    if let Some(width) = args.wrap_width {
        config.editor.wrap_width = width;
    }

    let mut ctx = Context::boot(&config, args.trace)?;

    println!("Sem Kernel version 0.1");
    println!("type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        print!("{}", shell::prompt(&ctx));
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break; // End of input
        };

        match shell::execute(&mut ctx, &line, &mut stdout)? {
            ShellAction::Continue => {}
            ShellAction::Edit => {
                ctx = run_editor(ctx).await?;
            }
            ShellAction::Exit => break,
        }
    }

    Ok(())
}

//! Terminal shell for the docket engine.
//!
//! # Responsibility
//! - Parse flags, initialize logging, and open the configured store.
//! - Start the coordinator and feed it one command per input line.

mod command;
mod view;

use clap::Parser;
use command::{parse_line, Command, HELP};
use docket_core::db::open_db;
use docket_core::{
    default_log_level, init_logging, Coordinator, EntryStoreError, GestureResult,
    IgnoreReason, KeyValueRepository, MemoryKeyValueRepository, MutationOutcome,
    SqliteKeyValueRepository, StoreConfig, DEFAULT_STORAGE_KEY, MAX_ENTRY_ID,
};
use log::{error, info};
use std::error::Error;
use std::io::{self, BufRead, Stdout, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use view::TerminalView;

#[derive(Parser)]
#[command(name = "docket", version, about = "Keep a persistent list of dockets")]
struct Cli {
    /// SQLite database file holding the list.
    #[arg(long, default_value = "docket.sqlite3")]
    db: PathBuf,

    /// Keep the list in memory only; nothing survives exit.
    #[arg(long, conflicts_with = "db")]
    memory: bool,

    /// Storage key the list is saved under.
    #[arg(long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("docket: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }
    let config = StoreConfig::with_storage_key(cli.key)?;

    if cli.memory {
        info!("event=cli_start module=cli status=ok store=memory");
        serve(MemoryKeyValueRepository::new(), config)
    } else {
        let conn = open_db(&cli.db)?;
        info!(
            "event=cli_start module=cli status=ok store=sqlite path={}",
            cli.db.display()
        );
        serve(SqliteKeyValueRepository::new(conn), config)
    }
}

fn serve<R: KeyValueRepository + 'static>(
    repo: R,
    config: StoreConfig,
) -> Result<(), Box<dyn Error>> {
    let view: Rc<TerminalView<Stdout>> = Rc::new(TerminalView::new(io::stdout()));
    let coordinator = Coordinator::start_with_config(repo, config, Rc::clone(&view));

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                view.print(&message);
                continue;
            }
        };

        let result = match command {
            Command::Add(text) => view.submit(&text),
            Command::Edit { id, text } => view.edit(id, &text),
            Command::Toggle(id) => view.toggle(id),
            Command::Delete(id) => view.delete(id),
            Command::List => {
                coordinator.refresh();
                continue;
            }
            Command::Help => {
                view.print(HELP);
                continue;
            }
            Command::Quit => break,
        };
        report(&view, result);
    }

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}

fn report<W: Write>(view: &TerminalView<W>, result: Option<GestureResult>) {
    match result {
        None => view.print("ignored: no handler is bound for this command"),
        Some(Ok(MutationOutcome::Applied { .. })) => {}
        Some(Ok(MutationOutcome::Ignored(reason))) => view.print(&ignored_message(reason)),
        Some(Err(err)) => {
            let code = match err {
                EntryStoreError::PersistenceFailure(_) => "persist_failed",
                EntryStoreError::Encode(_) => "encode_failed",
            };
            error!("event=cli_gesture module=cli status=error error_code={code}");
            eprintln!("docket: change not saved: {err}");
        }
    }
}

fn ignored_message(reason: IgnoreReason) -> String {
    match reason {
        IgnoreReason::EmptyText => "ignored: text must not be blank".to_string(),
        IgnoreReason::UnknownId(id) => format!("ignored: no entry with id {id}"),
        IgnoreReason::IdSpaceExhausted => {
            format!("ignored: the list already holds id {MAX_ENTRY_ID}; delete it first")
        }
    }
}

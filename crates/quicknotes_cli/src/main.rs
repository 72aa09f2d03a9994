//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `quicknotes_core` linkage without any UI runtime.
//! - Start core logging, open the note store at the path given as first
//!   argument (in-memory when absent) and report how many notes it holds.
//!
//! Usage: `quicknotes_cli [db_path] [log_dir]`. `log_dir` must be absolute
//! and defaults to `<temp>/quicknotes-logs`.

use quicknotes_core::db::{open_db, open_db_in_memory};
use quicknotes_core::{init_logging, NoteStore, QuickNotesConfig, SqliteKvStore};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_LOG_DIR_NAME: &str = "quicknotes-logs";

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let log_dir = resolve_log_dir(args.next());

    println!("quicknotes_core ping={}", quicknotes_core::ping());
    println!("quicknotes_core version={}", quicknotes_core::core_version());

    let config = QuickNotesConfig::default();
    match init_logging(&config.log_level, &log_dir.to_string_lossy()) {
        Ok(()) => println!("quicknotes_core log_dir={}", log_dir.display()),
        // Storage still works without a logger; report and carry on.
        Err(err) => eprintln!("quicknotes_core logging=error error={err}"),
    }

    let opened = match db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("quicknotes_core storage=error error={err}");
            return ExitCode::FAILURE;
        }
    };
    let storage = match SqliteKvStore::try_new(&conn) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("quicknotes_core storage=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    let mut store = NoteStore::new(storage, config.storage_key);
    store.load();
    println!("quicknotes_core notes={}", store.len());
    ExitCode::SUCCESS
}

fn resolve_log_dir(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME))
}

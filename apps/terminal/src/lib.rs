//! # QuickBill Terminal Library
//!
//! Core library for the QuickBill terminal application.
//! [`run`] wires configuration, storage, the shell and the receipt printer.
//!
//! ## Module Organization
//! ```text
//! quickbill_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── quickbill.toml + environment overrides
//! ├── state.rs        ◄─── AppState (repo, session, bill, views)
//! ├── views.rs        ◄─── View coordinator and screen rendering
//! ├── commands/
//! │   ├── mod.rs      ◄─── Line grammar and dispatch
//! │   ├── session.rs  ◄─── login / logout / view / show
//! │   ├── item.rs     ◄─── Inventory commands
//! │   ├── bill.rs     ◄─── Bill composition and save
//! │   └── history.rs  ◄─── Transaction delete, clear-all
//! ├── shell.rs        ◄─── Read/execute/print loop, [y/N] prompts
//! ├── printer.rs      ◄─── Delayed receipt printing task
//! └── error.rs        ◄─── AppError
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod printer;
pub mod shell;
pub mod state;
pub mod views;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use quickbill_store::keys::{quarantine_key, INVENTORY_KEY, TRANSACTIONS_KEY};
use quickbill_store::{
    FileStore, KeyValueStore, ListLoad, LoadReport, MemoryStore, SessionHolder, StateRepository,
};

use config::{QuickBillConfig, StorageBackend};
use error::AppResult;
use printer::{spawn_printer, PrinterSettings};
use shell::Shell;
use state::AppState;

/// Startup flags.
#[derive(Debug, Parser)]
#[command(name = "quickbill", about = "Point-of-sale billing in your terminal", version)]
pub struct Cli {
    /// Config file (default: quickbill.toml in the platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, conflicts_with = "data_dir")]
    pub memory: bool,

    /// Directory for the stored lists and profile
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Runs the terminal application until the operator quits.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber on stderr with env filter                      │
/// │     • Default: info,quickbill=debug, overridable with RUST_LOG          │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → quickbill.toml → QUICKBILL_* → flags                   │
/// │                                                                         │
/// │  3. Open Store & Load State ──────────────────────────────────────────► │
/// │     • FileStore in the data dir, or MemoryStore                         │
/// │     • StateRepository::load (Loading → Ready), SessionHolder::load      │
/// │                                                                         │
/// │  4. Start Receipt Printer ────────────────────────────────────────────► │
/// │     • tokio task fed by the repository's TransactionListener            │
/// │                                                                         │
/// │  5. Run Shell ────────────────────────────────────────────────────────► │
/// │     • blocking thread reading stdin                                     │
/// │     • on quit: printer drains pending receipts, then exit               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();

    info!("Starting QuickBill");

    let mut config = QuickBillConfig::load(cli.config)?;
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    if let Some(dir) = cli.data_dir {
        config.storage.backend = StorageBackend::File;
        config.storage.data_dir = Some(dir);
    }

    let store = open_store(&config)?;

    let mut repo = StateRepository::new(store.clone()).with_seed(config.inventory.seed.clone());
    let report = repo.load()?;
    for notice in load_notices(&report) {
        eprintln!("{}", notice);
    }

    let mut session = SessionHolder::new(store);
    session.load()?;

    let (operator_tx, operator_rx) = watch::channel(None);
    let settings = PrinterSettings {
        delay: config.print_delay(),
        options: config.receipt_options(),
    };
    let (queue, printer) = spawn_printer(settings, operator_rx, std::io::stdout());
    repo.subscribe(Box::new(queue));

    let state = AppState::new(repo, session, config.receipt.currency.clone(), operator_tx);
    let mut shell = Shell::new(state);

    // Dropping the shell drops the print queue, which lets the printer finish.
    let outcome = tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        shell.run(stdin.lock(), std::io::stdout())
    })
    .await?;

    let printed = printer.await?;
    info!(printed, "QuickBill stopped");

    outcome
}

/// Opens the configured backend.
fn open_store(config: &QuickBillConfig) -> AppResult<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::File => {
            let dir = config.data_dir()?;
            let store = FileStore::open(dir)?;
            if !store.health_check() {
                warn!(dir = ?store.dir(), "Data directory is not writable");
            }
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; nothing will be saved");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Operator-facing lines for lists that could not be read.
fn load_notices(report: &LoadReport) -> Vec<String> {
    let mut notices = Vec::new();
    for (label, key, load) in [
        (
            "inventory",
            INVENTORY_KEY,
            &report.inventory,
        ),
        (
            "transaction history",
            TRANSACTIONS_KEY,
            &report.transactions,
        ),
    ] {
        if let ListLoad::Corrupted { .. } = load {
            notices.push(format!(
                "warning: stored {} could not be read and starts empty; \
                 the original is kept as {}",
                label,
                quarantine_key(key)
            ));
        }
    }
    notices
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quickbill_store=trace` - Show trace for the store only
/// - Default: info, debug for the quickbill crates
///
/// Logs go to stderr so they never interleave with receipts on stdout.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,quickbill=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! # QuickBill Entry Point
//!
//! ```text
//! $ quickbill --data-dir ./shop
//! == QuickBill: Login ==
//! No profile yet. The first login creates it.
//! quickbill> login 03001234567 1234
//! ```
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

use clap::Parser;

use quickbill_terminal::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match quickbill_terminal::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("quickbill: {}", e);
            ExitCode::FAILURE
        }
    }
}

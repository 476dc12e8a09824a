//! # Receipt Printer
//!
//! Prints the receipt of every saved transaction after a short delay.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Printing                                     │
//! │                                                                         │
//! │  StateRepository::save_transaction                                      │
//! │       │ (after persisting)                                              │
//! │       ▼                                                                 │
//! │  PrintQueue (TransactionListener) ── mpsc ──► printer task              │
//! │                                                 │                       │
//! │                                                 │ sleep(print_delay)    │
//! │                                                 │ render_receipt        │
//! │                                                 ▼                       │
//! │                                               stdout                    │
//! │                                                                         │
//! │  The operator's phone is read from a watch channel at print time.       │
//! │  When every PrintQueue is dropped the task drains the queue and ends.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use quickbill_core::{render_receipt, ReceiptOptions, Transaction, User};
use quickbill_store::TransactionListener;

/// Listener half: hands saved transactions to the printer task.
#[derive(Debug, Clone)]
pub struct PrintQueue {
    jobs: mpsc::UnboundedSender<Transaction>,
}

impl TransactionListener for PrintQueue {
    fn transaction_saved(&mut self, transaction: &Transaction) {
        debug!(id = %transaction.id, "Queueing receipt");
        if self.jobs.send(transaction.clone()).is_err() {
            warn!(id = %transaction.id, "Printer has stopped; receipt not printed");
        }
    }
}

/// Printer settings.
#[derive(Debug, Clone)]
pub struct PrinterSettings {
    pub delay: Duration,
    pub options: ReceiptOptions,
}

/// Starts the printer task on the current runtime.
///
/// Returns the queue to register with the repository and the task handle,
/// which resolves to the number of receipts printed.
pub fn spawn_printer<W>(
    settings: PrinterSettings,
    operator: watch::Receiver<Option<User>>,
    out: W,
) -> (PrintQueue, JoinHandle<usize>)
where
    W: Write + Send + 'static,
{
    let (jobs, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_printer(settings, operator, rx, out));
    (PrintQueue { jobs }, handle)
}

async fn run_printer<W: Write>(
    settings: PrinterSettings,
    operator: watch::Receiver<Option<User>>,
    mut jobs: mpsc::UnboundedReceiver<Transaction>,
    mut out: W,
) -> usize {
    let mut printed = 0;

    while let Some(transaction) = jobs.recv().await {
        tokio::time::sleep(settings.delay).await;

        let user = operator.borrow().clone();
        let receipt = render_receipt(&transaction, user.as_ref(), &settings.options);

        match out
            .write_all(receipt.as_bytes())
            .and_then(|_| out.flush())
        {
            Ok(()) => {
                printed += 1;
                debug!(id = %transaction.id, "Receipt printed");
            }
            Err(e) => error!(id = %transaction.id, error = %e, "Failed to print receipt"),
        }
    }

    debug!(printed, "Printer stopped");
    printed
}

//! # Shell
//!
//! The read/execute/print loop. Confirmation prompts read their answer from
//! the same input as commands, so a scripted session is just a text file.
//!
//! ```text
//! quickbill> item delete 3f2a
//! Are you sure you want to delete this item? [y/N] y
//! Deleted item [3f2a9c1e]
//! ```

use std::io::{BufRead, Write};

use tracing::{debug, error};

use quickbill_store::{Confirm, KeyValueStore};

use crate::commands::session::show;
use crate::commands::{execute, parse_line, Flow};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const PROMPT: &str = "quickbill> ";

/// Answers confirmation prompts from a line of input. Only `y`/`yes`
/// confirms; end of input declines.
pub struct LineConfirm<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> LineConfirm<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        LineConfirm { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<'_, R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{} [y/N] ", prompt)
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        }
    }
}

/// Interactive shell over an [`AppState`].
pub struct Shell<S> {
    state: AppState<S>,
}

impl<S: KeyValueStore> Shell<S> {
    pub fn new(state: AppState<S>) -> Self {
        Shell { state }
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    /// Reads commands until `quit` or end of input.
    ///
    /// Command errors are printed and the loop continues; only failing to
    /// read input or write output ends it with an error.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> AppResult<()> {
        writeln!(output, "{}", show(&self.state))?;

        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                break;
            }

            let reply = match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => {
                    debug!(?command, "Executing");
                    let mut confirm = LineConfirm::new(&mut input, &mut output);
                    execute(&mut self.state, command, &mut confirm)
                }
                Err(e) => Err(e),
            };

            match reply {
                Ok(Flow::Continue(text)) => writeln!(output, "{}", text.trim_end())?,
                Ok(Flow::Quit) => break,
                Err(AppError::Usage(text)) => writeln!(output, "{}", text)?,
                Err(e) => {
                    if matches!(e, AppError::Store(_) | AppError::Io(_)) {
                        error!(error = %e, "Command failed");
                    }
                    writeln!(output, "error: {}", e)?;
                }
            }
        }

        writeln!(output, "Goodbye.")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use tokio::sync::watch;

    use quickbill_core::Transaction;
    use quickbill_store::keys::{INVENTORY_KEY, TRANSACTIONS_KEY, USER_PROFILE_KEY};
    use quickbill_store::{MemoryStore, SessionHolder, StateRepository};

    fn shell_with(store: Arc<MemoryStore>) -> Shell<Arc<MemoryStore>> {
        let mut repo = StateRepository::new(store.clone());
        repo.load().unwrap();
        let mut session = SessionHolder::new(store);
        session.load().unwrap();
        let (operator, _) = watch::channel(None);
        Shell::new(AppState::new(repo, session, "RS.", operator))
    }

    fn run(shell: &mut Shell<Arc<MemoryStore>>, script: &str) -> String {
        let mut output = Vec::new();
        shell.run(Cursor::new(script.to_string()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_line_confirm() {
        let mut input = Cursor::new("yes\nn\n");
        let mut output = Vec::new();
        let mut confirm = LineConfirm::new(&mut input, &mut output);

        assert!(confirm.confirm("Delete?"));
        assert!(!confirm.confirm("Delete?"));
        assert!(!confirm.confirm("Delete?"));

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Delete? [y/N] Delete? [y/N] Delete? [y/N] "
        );
    }

    #[test]
    fn test_commands_require_login() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store.clone());

        let out = run(&mut shell, "item add 10 Beverage Tea\nview history\n");

        assert!(out.contains("No profile yet"));
        assert_eq!(out.matches("error: Log in first").count(), 2);
        assert!(shell.state().repo.items().is_empty());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_billing_session_saves_transaction() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store.clone());

        let out = run(
            &mut shell,
            "login 03001234567 1234\n\
             item add 12 Beverage Tea\n\
             quit\n",
        );
        assert!(out.contains("Profile saved. Logged in as 03001234567."));
        assert!(out.contains("Added item"));
        assert!(store.contains(USER_PROFILE_KEY));

        let tea_id = shell.state().repo.items()[0].id.clone();
        let out = run(
            &mut shell,
            &format!(
                "bill customer Ali Khan\nbill add {} 2\nbill save\nview history\n",
                &tea_id[..6]
            ),
        );

        assert!(out.contains("Added Tea (x2) to bill. Bill total: RS. 24.00"));
        assert!(out.contains("Saved transaction"));
        assert!(out.contains("Ali Khan"));
        assert!(shell.state().bill.is_empty());

        let saved = &shell.state().repo.transactions()[0];
        assert_eq!(saved.total_amount, 24.0);
        assert_eq!(saved.customer_name.as_deref(), Some("Ali Khan"));

        let stored: Vec<Transaction> =
            serde_json::from_str(&store.get(TRANSACTIONS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn test_wrong_pin_is_rejected_for_stored_phone() {
        let store = Arc::new(MemoryStore::with_entries([(
            USER_PROFILE_KEY,
            r#"{"phone":"03001234567","pin":"1234"}"#,
        )]));
        let mut shell = shell_with(store);

        let out = run(&mut shell, "login 03001234567 9999\nlogin 03001234567 1234\n");

        assert!(out.contains("Welcome back, 03001234567."));
        assert!(out.contains("error: Incorrect PIN for 03001234567"));
        assert!(shell.state().session.is_authenticated());
    }

    #[test]
    fn test_delete_prompts_on_same_input() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store);
        run(&mut shell, "login 03001234567 1234\nitem add 5 - Water\n");
        let id = shell.state().repo.items()[0].id.clone();
        assert_eq!(shell.state().repo.items()[0].category, "General");

        let out = run(&mut shell, &format!("item delete {}\nno\n", id));
        assert!(out.contains("Are you sure you want to delete this item? [y/N]"));
        assert!(out.contains("Cancelled."));
        assert_eq!(shell.state().repo.items().len(), 1);

        run(&mut shell, &format!("item delete {}\ny\n", id));
        assert!(shell.state().repo.items().is_empty());
    }

    #[test]
    fn test_clear_all_keeps_profile() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store.clone());

        let out = run(
            &mut shell,
            "login 03001234567 1234\nitem add 5 Drinks Water\nclear-all\ny\n",
        );

        assert!(out.contains("CRITICAL: This will delete ALL items"));
        assert!(out.contains("All data cleared."));
        assert!(!store.contains(INVENTORY_KEY));
        assert!(!store.contains(TRANSACTIONS_KEY));
        assert!(store.contains(USER_PROFILE_KEY));
    }

    #[test]
    fn test_errors_do_not_stop_the_shell() {
        let store = Arc::new(MemoryStore::new());
        let mut shell = shell_with(store);

        let out = run(
            &mut shell,
            "login 123 1234\nlogin 03001234567 1234\nbill save\nbill add nothing\nfrobnicate\nshow\n",
        );

        assert!(out.contains("error: phone has invalid format"));
        assert!(out.contains("error: Bill has no items"));
        assert!(out.contains("error: Item not found: nothing"));
        assert!(out.contains("== Billing =="));
        assert!(out.ends_with("Goodbye.\n"));
    }
}

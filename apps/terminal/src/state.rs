//! # Application State
//!
//! Everything the shell's commands operate on, owned in one place.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppState                                             │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐    │
//! │  │  repo        │ │  session     │ │  bill        │ │  views       │    │
//! │  │              │ │              │ │              │ │              │    │
//! │  │ items        │ │ profile      │ │ lines being  │ │ active view  │    │
//! │  │ transactions │ │ logged in?   │ │ composed     │ │              │    │
//! │  │ (persisted)  │ │ (persisted)  │ │ (memory)     │ │ (memory)     │    │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘    │
//! │                                                                         │
//! │  operator: watch::Sender<Option<User>> ──► receipt printer              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::watch;

use quickbill_core::{Bill, User};
use quickbill_store::{KeyValueStore, SessionHolder, StateRepository};

use crate::error::{AppError, AppResult};
use crate::views::ViewCoordinator;

/// State shared by every shell command.
pub struct AppState<S> {
    pub repo: StateRepository<S>,
    pub session: SessionHolder<S>,
    pub bill: Bill,
    pub views: ViewCoordinator,
    pub currency: String,
    operator: watch::Sender<Option<User>>,
}

impl<S: KeyValueStore> AppState<S> {
    /// Wraps loaded repositories. `operator` is told who is logged in.
    pub fn new(
        repo: StateRepository<S>,
        session: SessionHolder<S>,
        currency: impl Into<String>,
        operator: watch::Sender<Option<User>>,
    ) -> Self {
        AppState {
            repo,
            session,
            bill: Bill::new(),
            views: ViewCoordinator::new(),
            currency: currency.into(),
            operator,
        }
    }

    /// Fails with `NotLoggedIn` unless an operator is logged in.
    pub fn require_login(&self) -> AppResult<&User> {
        self.session.current_user().ok_or(AppError::NotLoggedIn)
    }

    /// Publishes the current operator to the printer.
    pub fn publish_operator(&self) {
        self.operator
            .send_replace(self.session.current_user().cloned());
    }
}

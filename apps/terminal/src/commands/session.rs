//! # Session Commands
//!
//! Login gate and view navigation.
//!
//! ## Login Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login <phone> <pin>                                                    │
//! │       │                                                                 │
//! │       ├── phone 7-15 digits, pin 4-6 digits? ── no ──► error            │
//! │       │                                                                 │
//! │       ├── stored profile has this phone?                                │
//! │       │        yes ── pin matches? ── no ──► IncorrectPin               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store profile (overwrite), authenticated, view = billing               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{info, warn};

use quickbill_core::validation::{validate_phone, validate_pin};
use quickbill_core::{AppView, User};
use quickbill_store::KeyValueStore;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{render_auth, render_billing, render_history, render_inventory};

/// Logs the operator in, creating or replacing the stored profile.
pub fn login<S: KeyValueStore>(
    state: &mut AppState<S>,
    phone: &str,
    pin: &str,
) -> AppResult<String> {
    let phone = validate_phone(phone)?;
    validate_pin(pin)?;

    let returning = state
        .session
        .profile()
        .is_some_and(|profile| profile.phone == phone);
    if returning && !state.session.verify_pin(pin) {
        warn!(phone = %phone, "Rejected login with incorrect PIN");
        return Err(AppError::IncorrectPin { phone });
    }

    state.session.login(User {
        phone: phone.clone(),
        pin: pin.to_string(),
    })?;
    state.views.on_login();
    state.publish_operator();

    let greeting = if returning {
        format!("Welcome back, {}.", phone)
    } else {
        format!("Profile saved. Logged in as {}.", phone)
    };
    Ok(format!("{}\n{}", greeting, show(state)))
}

pub fn logout<S: KeyValueStore>(state: &mut AppState<S>) -> String {
    state.session.logout();
    state.views.on_logout();
    state.publish_operator();
    info!("Returned to login screen");

    format!("Logged out.\n{}", show(state))
}

pub fn switch_view<S: KeyValueStore>(state: &mut AppState<S>, view: AppView) -> AppResult<String> {
    let authenticated = state.session.is_authenticated();
    state.views.switch(view, authenticated)?;
    Ok(show(state))
}

/// Renders the active view.
pub fn show<S: KeyValueStore>(state: &AppState<S>) -> String {
    match state.views.current() {
        AppView::Auth => render_auth(state.session.profile()),
        AppView::Billing => render_billing(state.repo.items(), &state.bill, &state.currency),
        AppView::History => render_history(state.repo.transactions(), &state.currency),
        AppView::Inventory => render_inventory(state.repo.items(), &state.currency),
    }
}

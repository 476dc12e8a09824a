//! Operator session: the one stored profile and whether it is logged in.
//!
//! The profile lives under its own key and is independent of the list
//! keys, so Clear All leaves it in place.

use tracing::{debug, info, warn};

use quickbill_core::User;

use crate::backend::KeyValueStore;
use crate::error::StoreResult;
use crate::keys::USER_PROFILE_KEY;

/// Holds the stored profile and the authenticated flag.
#[derive(Debug)]
pub struct SessionHolder<S> {
    store: S,
    profile: Option<User>,
    authenticated: bool,
}

impl<S: KeyValueStore> SessionHolder<S> {
    pub fn new(store: S) -> Self {
        SessionHolder {
            store,
            profile: None,
            authenticated: false,
        }
    }

    /// Reads the stored profile. Absent or undecodable means no profile.
    ///
    /// Loading never authenticates; the operator still has to log in.
    pub fn load(&mut self) -> StoreResult<Option<&User>> {
        self.profile = match self.store.get(USER_PROFILE_KEY)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Stored profile could not be decoded");
                    None
                }
            },
        };
        self.authenticated = false;

        debug!(has_profile = self.profile.is_some(), "Profile loaded");
        Ok(self.profile.as_ref())
    }

    /// Stores `user` as the profile (overwriting) and marks the session
    /// authenticated.
    pub fn login(&mut self, user: User) -> StoreResult<()> {
        let encoded = serde_json::to_string(&user)?;
        self.store.set(USER_PROFILE_KEY, &encoded)?;

        info!(phone = %user.phone, "Operator logged in");
        self.profile = Some(user);
        self.authenticated = true;
        Ok(())
    }

    /// Compares `pin` with the stored profile's PIN. False without a profile.
    pub fn verify_pin(&self, pin: &str) -> bool {
        self.profile.as_ref().is_some_and(|p| p.pin == pin)
    }

    /// Drops the authenticated flag. The profile stays stored.
    pub fn logout(&mut self) {
        if self.authenticated {
            info!("Operator logged out");
        }
        self.authenticated = false;
    }

    /// The stored profile, logged in or not.
    pub fn profile(&self) -> Option<&User> {
        self.profile.as_ref()
    }

    /// The logged-in operator.
    pub fn current_user(&self) -> Option<&User> {
        if self.authenticated {
            self.profile.as_ref()
        } else {
            None
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

//! Storage key layout.
//!
//! Three independent string slots. The `v2` in the list keys is the only
//! schema versioning there is.

/// Encoded transaction list.
pub const TRANSACTIONS_KEY: &str = "quickbill_v2_transactions";

/// Encoded inventory list.
pub const INVENTORY_KEY: &str = "quickbill_v2_inventory";

/// Encoded operator profile.
pub const USER_PROFILE_KEY: &str = "quickbill_user_profile";

const QUARANTINE_SUFFIX: &str = "_corrupt";

/// Key under which an undecodable payload for `key` is preserved.
pub fn quarantine_key(key: &str) -> String {
    format!("{}{}", key, QUARANTINE_SUFFIX)
}

/// Candidate keys for preserving a payload of `key`, in order: the
/// [`quarantine_key`] first, then `_2`, `_3`, ... so earlier copies are never
/// overwritten.
pub fn quarantine_keys(key: &str) -> impl Iterator<Item = String> {
    let base = quarantine_key(key);
    std::iter::once(base.clone()).chain((2u32..).map(move |n| format!("{}_{}", base, n)))
}

//! Account identity generation
//!
//! Produces random 9-digit account ids that do not collide with the ids
//! already stored, and the 4-digit PINs issued with each card.

use crate::types::{AccountId, Pin};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Number of digits in an account id
pub const ACCOUNT_ID_LEN: usize = 9;

/// Number of digits in a PIN
pub const PIN_LEN: usize = 4;

/// Build a string of `len` digits drawn from `next_digit`
fn digits<F>(len: usize, next_digit: &mut F) -> String
where
    F: FnMut() -> u8,
{
    (0..len)
        .map(|_| char::from(b'0' + next_digit() % 10))
        .collect()
}

/// Generate an account id absent from `existing_ids`
///
/// Each digit is drawn independently and uniformly, leading zeros included.
/// Draws are repeated until the id is unused. The caller supplies the full
/// current id set on every call.
pub fn generate_unique_id(existing_ids: &HashSet<AccountId>) -> AccountId {
    let mut rng = rand::thread_rng();
    generate_unique_id_with(existing_ids, || rng.gen_range(0..10))
}

/// Generate an account id using `next_digit` as the source of digits
///
/// Values returned by `next_digit` are taken modulo 10.
pub fn generate_unique_id_with<F>(existing_ids: &HashSet<AccountId>, mut next_digit: F) -> AccountId
where
    F: FnMut() -> u8,
{
    let mut attempts: u64 = 0;
    loop {
        let candidate = digits(ACCOUNT_ID_LEN, &mut next_digit);
        if !existing_ids.contains(&candidate) {
            return candidate;
        }
        attempts += 1;
        debug!(attempts, "account id collision, drawing again");
    }
}

/// Generate a random 4-digit PIN
pub fn generate_pin() -> Pin {
    let mut rng = rand::thread_rng();
    generate_pin_with(|| rng.gen_range(0..10))
}

/// Generate a PIN using `next_digit` as the source of digits
pub fn generate_pin_with<F>(mut next_digit: F) -> Pin
where
    F: FnMut() -> u8,
{
    digits(PIN_LEN, &mut next_digit)
}

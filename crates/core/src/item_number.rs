//! Item number generation.
//!
//! An item number is the short natural key printed on gear labels and used to
//! match rows during CSV import. Numbers are random lowercase base-36 tokens;
//! uniqueness is finally enforced by the `uq_items_item_number` constraint and
//! the repository retries on the rare collision.

use rand::Rng;

/// Length of a generated item number.
pub const ITEM_NUMBER_LENGTH: usize = 8;

/// Upper bound on caller-supplied item numbers (CSV import).
pub const MAX_ITEM_NUMBER_LENGTH: usize = 50;

/// How many fresh numbers the repository tries before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new random item number, e.g. `"k3x9q0ab"`.
pub fn generate_item_number() -> String {
    let mut rng = rand::rng();
    (0..ITEM_NUMBER_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

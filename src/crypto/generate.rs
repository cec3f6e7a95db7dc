//! Random secret generation.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Default length of generated secrets.
pub const DEFAULT_SECRET_LEN: usize = 30;

/// Generate a random secret of `length` characters.
///
/// Each character is drawn independently and uniformly from
/// `a-z`, `A-Z` and `0-9`.
pub fn generate_secret(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

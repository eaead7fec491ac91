//! Numeric one-time codes.

use rand::Rng;

/// Generate a numeric code of `length` digits.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Whether `code` has the expected length and only digits.
pub fn is_well_formed(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

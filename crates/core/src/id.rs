// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rand::Rng;

use crate::error::{Error, Result};

/// Characters ids are drawn from.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length of user, wish and wishlist ids.
pub const ID_LEN: usize = 6;

/// Length of wishlist invitation codes.
pub const INVITATION_CODE_LEN: usize = 11;

/// Upper bound on collision retries before giving up.
pub const MAX_ATTEMPTS: usize = 64;

/// Generate a random id of `len` characters from [`ALPHABET`].
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// Generate an id not rejected by `exists`, retrying on collision.
///
/// The server hands out the full list of ids in use; callers pass a lookup
/// into that list. With 62^6 candidates a retry is rare, so the bound only
/// matters when `exists` is broken.
pub fn generate_unique_id<R, F>(rng: &mut R, len: usize, exists: F) -> Result<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..MAX_ATTEMPTS {
        let id = generate_id(rng, len);
        if !exists(&id) {
            return Ok(id);
        }
    }
    Err(Error::IdGenerationFailed {
        attempts: MAX_ATTEMPTS,
    })
}

/// Check that `id` has exactly `len` characters, all from [`ALPHABET`].
pub fn is_valid_id(id: &str, len: usize) -> bool {
    id.len() == len && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Like [`is_valid_id`], but returns an error naming the bad id.
pub fn validate_id(id: &str, len: usize) -> Result<()> {
    if is_valid_id(id, len) {
        Ok(())
    } else {
        Err(Error::InvalidId {
            id: id.to_string(),
            len,
        })
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

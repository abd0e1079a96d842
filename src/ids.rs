//! Client-assigned resource identifiers.
//!
//! Pages, calculations, and statements require the caller to supply an ID
//! up front. The service accepts 21-character strings over the URL-safe
//! alphabet `[A-Za-z0-9_-]`; anything else fails validation server-side.
//! Uniqueness is probabilistic (126 bits of randomness), never verified
//! against the server.

use rand::Rng;

/// Length of a generated identifier.
pub const LEN: usize = 21;

/// The 64-character URL-safe alphabet accepted by the service.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates a new identifier from the thread-local CSPRNG.
pub fn generate() -> String {
    generate_with(&mut rand::rng())
}

/// Generates an identifier from any random source.
///
/// Used with a seeded RNG in tests; `generate` is the entry point for
/// production code.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Whether `id` has the exact length and charset the service accepts.
pub fn is_valid(id: &str) -> bool {
    id.len() == LEN && id.bytes().all(|b| ALPHABET.contains(&b))
}

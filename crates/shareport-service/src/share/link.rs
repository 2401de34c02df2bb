//! Share link candidate generation.

use rand::{Rng, RngExt};

/// URL-safe 64-character alphabet for generated link candidates.
///
/// A subset of the allowed link character set, so generated candidates
/// always pass link validation.
const LINK_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of generated link candidates.
const LINK_LENGTH: usize = 7;

/// Generates short share link candidates.
///
/// Candidates carry no uniqueness guarantee; collisions are expected to
/// be rare and are handled by the allocator's retry loop. The output is
/// not cryptographically secured.
#[derive(Debug, Clone)]
pub struct LinkGenerator;

impl LinkGenerator {
    /// Creates a new link generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a 7-character candidate from the given entropy source.
    ///
    /// The RNG is passed in so callers and tests control determinism.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> String {
        (0..LINK_LENGTH)
            .map(|_| LINK_ALPHABET[rng.random_range(0..LINK_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for LinkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

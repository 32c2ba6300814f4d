//! Short link slug generation.
//!
//! Slugs are random ASCII letters. The stored form carries a fixed prefix
//! (`s/` by default) so that the public short URL is `<base>/<stored slug>`.

use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default number of random characters in a slug.
pub const DEFAULT_SLUG_LENGTH: usize = 6;

/// Default prefix prepended to every stored slug.
pub const DEFAULT_SLUG_PREFIX: &str = "s/";

/// Produces random slugs of a fixed length with a fixed storage prefix.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    length: usize,
    prefix: String,
}

impl SlugGenerator {
    pub fn new(length: usize, prefix: impl Into<String>) -> Self {
        Self {
            length,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generates the random part of a slug.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// Generates a fresh slug in its stored (prefixed) form.
    pub fn generate_stored(&self) -> String {
        self.storage_key(&self.generate())
    }

    /// Maps a bare slug taken from a request path to its stored form.
    pub fn storage_key(&self, slug: &str) -> String {
        format!("{}{}", self.prefix, slug)
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SLUG_LENGTH, DEFAULT_SLUG_PREFIX)
    }
}

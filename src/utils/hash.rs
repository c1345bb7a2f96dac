//! Content hashing for page identity keys.
//!
//! Uses blake3, so a key depends only on its inputs: the same page gets
//! the same key (and the same temp file) in every build.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let fp = hash::fingerprint(["docs/a.md", "/a.html"]); // -> "3f1c9a0b7d2e4c61"
//! let key = hash::page_key(None, Some("/a.html"));      // -> "v-…"
//! ```

use std::path::Path;

/// Hex characters kept from the digest (64 bits).
const FINGERPRINT_LEN: usize = 16;

/// Prefix of every page key.
pub const KEY_PREFIX: &str = "v-";

/// Hash a sequence of parts, NUL-separated so `("ab", "c")` ≠ `("a", "bc")`.
pub fn compute<I, T>(parts: I) -> blake3::Hash
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hasher = blake3::Hasher::new();
    for (idx, part) in parts.into_iter().enumerate() {
        if idx > 0 {
            hasher.update(&[0]);
        }
        hasher.update(part.as_ref());
    }
    hasher.finalize()
}

/// Hash parts and return a 16-char hex fingerprint.
pub fn fingerprint<I, T>(parts: I) -> String
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut hex = hex::encode(compute(parts).as_bytes());
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Identity key of a page: `v-` + fingerprint of (source file, regular path).
///
/// Either component may be absent (inline and route-only pages have no file
/// yet at construction); an absent component hashes as empty.
pub fn page_key(file_path: Option<&Path>, regular_path: Option<&str>) -> String {
    let file = file_path
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let regular = regular_path.unwrap_or_default();
    format!("{KEY_PREFIX}{}", fingerprint([file.as_bytes(), regular.as_bytes()]))
}

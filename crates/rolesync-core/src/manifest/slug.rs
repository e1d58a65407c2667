//! Stable manifest ids.

use sha2::{Digest, Sha256};

/// Length of the hexadecimal fallback id.
pub const FALLBACK_ID_LEN: usize = 8;

/// Lowercase `text` and replace every run of non-alphanumeric characters
/// with one `-`, trimming hyphens at both ends.
///
/// Alphanumeric is Unicode-aware, so CJK names survive. May return an
/// empty string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Slug of `key`, or the first [`FALLBACK_ID_LEN`] hex characters of its
/// SHA-256 digest when the slug is empty.
pub fn stable_id(key: &str) -> String {
    let slug = slugify(key);
    if !slug.is_empty() {
        return slug;
    }
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(FALLBACK_ID_LEN);
    digest
}

/// Composite key an entry id is derived from.
pub fn composite_key(category: &str, name: &str, file: &str) -> String {
    format!("{}:{}:{}", category, name, file)
}

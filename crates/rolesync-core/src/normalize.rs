//! Identifier canonicalization.
//!
//! `canonical` is the equality key wherever identifiers are compared, across
//! locales or within one dataset, so that `Fortune_Teller`, `fortune-teller`
//! and `FortuneTeller` all meet at `fortuneteller`.

/// Characters dropped from identifiers before comparison.
const SEPARATORS: [char; 2] = ['_', '-'];

/// Canonical form of an identifier.
///
/// Lowercases, removes `_` and `-`, and trims surrounding whitespace.
/// Total and idempotent: `canonical(&canonical(x)) == canonical(x)`.
pub fn canonical(id: &str) -> String {
    id.trim()
        .chars()
        .filter(|c| !SEPARATORS.contains(c))
        .flat_map(char::to_lowercase)
        .collect::<String>()
        .trim()
        .to_string()
}

/// True when two identifiers share a canonical form.
pub fn same_canonical(a: &str, b: &str) -> bool {
    canonical(a) == canonical(b)
}

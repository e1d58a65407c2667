//! Directional identifier mapping between locales.
//!
//! A mapping declaration text may hold several sections; only the forward
//! section named by a marker is read:
//!
//! ```text
//! export const CN_TO_EN_ID_MAP: Record<string, string> = {
//!   'fortune_teller': 'fortuneteller',
//!   'pit_hag': 'pithag',
//! };
//! export const EN_TO_CN_ID_MAP: Record<string, string> = { ... };
//! ```
//!
//! The section's extent comes from the same depth-tracking scan used for
//! record blocks, so a reverse section later in the file never leaks in.
//! Lookups are keyed by canonical source id; unmapped ids resolve to
//! themselves.

use crate::errors::RoleSyncError;
use crate::extract::fields::{parse_value, top_level_fields};
use crate::extract::scanner::{matching_close, Lexer, Token};
use crate::extract::{FieldValue, SourceText};
use crate::normalize::canonical;
use serde::Serialize;
use std::collections::BTreeMap;

/// Marker of the forward (source → target) section.
pub const DEFAULT_FORWARD_MARKER: &str = "CN_TO_EN_ID_MAP";

/// Immutable source → target id lookup with identity fallback.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IdentifierMapping {
    /// Declarations in source order, raw ids
    declarations: Vec<(String, String)>,
    /// Canonical source id → raw target id; later declarations win
    index: BTreeMap<String, String>,
}

impl IdentifierMapping {
    /// Build from `(source, target)` pairs in declaration order.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut mapping = Self::default();
        for (source, target) in pairs {
            let (source, target) = (source.into(), target.into());
            mapping.index.insert(canonical(&source), target.clone());
            mapping.declarations.push((source, target));
        }
        mapping
    }

    /// Parse the section introduced by `marker` out of a declaration text.
    ///
    /// Only `"source": "target"` string pairs are read; entries with other
    /// value shapes are skipped.
    ///
    /// # Errors
    ///
    /// `MappingSectionMissing` when the marker (or the brace after it) is
    /// absent; `MappingSectionUnbalanced` when the section never closes.
    pub fn parse(text: &str, marker: &str) -> Result<Self, RoleSyncError> {
        let source = SourceText::new(text);
        let text = source.as_str();

        let open = section_open(text, marker).ok_or_else(|| RoleSyncError::MappingSectionMissing {
            marker: marker.to_string(),
        })?;
        let close =
            matching_close(text, open).ok_or_else(|| RoleSyncError::MappingSectionUnbalanced {
                marker: marker.to_string(),
            })?;

        let pairs = top_level_fields(&text[open + 1..close])
            .into_iter()
            .filter_map(|(key, raw)| match parse_value(raw) {
                Some(FieldValue::Text(target)) => Some((key, target)),
                _ => {
                    tracing::debug!(record_id = %key, "skipping non-string mapping entry");
                    None
                }
            })
            .collect::<Vec<_>>();

        Ok(Self::from_pairs(pairs))
    }

    /// Target id for `source_id`, or `source_id` itself when unmapped.
    pub fn resolve(&self, source_id: &str) -> String {
        self.get(source_id)
            .map(str::to_string)
            .unwrap_or_else(|| source_id.to_string())
    }

    /// Explicit mapping for `source_id`, without identity fallback.
    pub fn get(&self, source_id: &str) -> Option<&str> {
        self.index.get(&canonical(source_id)).map(String::as_str)
    }

    /// True when both ids resolve to the same canonical target.
    pub fn same_entity(&self, a: &str, b: &str) -> bool {
        canonical(&self.resolve(a)) == canonical(&self.resolve(b))
    }

    /// Reverse (target → source) mapping.
    ///
    /// When several sources share a target, the last declaration wins.
    pub fn inverse(&self) -> Self {
        Self::from_pairs(
            self.declarations
                .iter()
                .map(|(source, target)| (target.clone(), source.clone())),
        )
    }

    /// Declarations in source order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
    }

    /// Number of distinct canonical source ids.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Opening brace of the object literal that follows `marker`.
fn section_open(text: &str, marker: &str) -> Option<usize> {
    let mut after_marker = false;
    for spanned in Lexer::new(text) {
        match spanned.token {
            Token::Word(word) | Token::Str(word) if word == marker => after_marker = true,
            Token::Open(b'{') if after_marker => return Some(spanned.start),
            // A statement boundary before any brace means the marker was a reference
            Token::Other(b';') if after_marker => after_marker = false,
            _ => {}
        }
    }
    None
}

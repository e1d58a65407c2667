//! Structured record extraction from brace-delimited source text.
//!
//! A source is a blob of object-literal text (a TypeScript data module, a
//! JSON-ish dump) holding one block per identifier:
//!
//! ```text
//! "fortune_teller": {
//!   "name": "占卜师",        // comments are allowed
//!   "reminders": ["红鲱鱼"],
//!   "ability": "每个夜晚，你要选择两名玩家：
//!               你会得知他们之中是否有恶魔。"
//! },
//! ```
//!
//! ## Pipeline
//!
//! 1. Comments are stripped once per source ([`SourceText::new`]).
//! 2. The block for an identifier is located by key (`"id": {`) or, failing
//!    that, as the object literal whose own `id` field is the identifier.
//!    Its end is found with a depth-tracking, string-aware scan, so nested
//!    braces and braces inside strings never close it early.
//! 3. Each field of a [`FieldSpec`] is read with typed rules (string,
//!    integer, boolean, list of strings) and falls back to its default.
//!
//! Failures are values ([`ExtractionFailure`]) scoped to one identifier; a
//! batch never aborts on them.

pub mod fields;
pub mod record;
pub mod scanner;

pub use fields::{FieldDefault, FieldRule, FieldSpec, FieldValue};
pub use record::{Dataset, Record};

use crate::errors::RoleSyncError;
use crate::{log_item_skip, log_op_end, log_op_start};
use scanner::{matching_close, strip_comments, unescape, Lexer, Spanned, Token};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Why a block could not be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureKind {
    /// No block is associated with the identifier
    NotFound,
    /// The block opens at `offset` but never closes
    Unbalanced { offset: usize },
}

/// Extraction failure scoped to one identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("extraction failed for {identifier}: {kind:?}")]
pub struct ExtractionFailure {
    pub identifier: String,
    pub kind: FailureKind,
}

impl From<ExtractionFailure> for RoleSyncError {
    fn from(failure: ExtractionFailure) -> Self {
        match failure.kind {
            FailureKind::NotFound => RoleSyncError::BlockNotFound {
                identifier: failure.identifier,
            },
            FailureKind::Unbalanced { offset } => RoleSyncError::UnbalancedBlock {
                identifier: failure.identifier,
                offset,
            },
        }
    }
}

/// Byte offsets of a block's opening and closing braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpan {
    pub open: usize,
    pub close: usize,
}

/// Outcome of extracting many identifiers from one source.
#[derive(Debug, Clone, Default)]
pub struct BatchExtraction {
    pub records: Dataset,
    pub failures: Vec<ExtractionFailure>,
}

/// Comment-free source text, ready for block lookups.
#[derive(Debug, Clone)]
pub struct SourceText {
    text: String,
}

impl SourceText {
    pub fn new(raw: &str) -> Self {
        Self {
            text: strip_comments(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn tokens(&self) -> Vec<Spanned<'_>> {
        Lexer::new(&self.text).collect()
    }

    /// Locate the block for `identifier`.
    ///
    /// An outermost keyed block wins over one nested inside another keyed
    /// block; nested keys are only used when no outermost one matches.
    ///
    /// # Errors
    ///
    /// `NotFound` when neither a keyed block nor an object with a matching
    /// `id` field exists; `Unbalanced` when the block never closes.
    pub fn locate(&self, identifier: &str) -> Result<BlockSpan, ExtractionFailure> {
        let tokens = self.tokens();
        let open = self
            .outer_keyed_blocks(&tokens)
            .into_iter()
            .find(|&(key_idx, _)| is_key(&tokens[key_idx].token, identifier))
            .map(|(_, open)| open)
            .or_else(|| keyed_block_open(&tokens, identifier))
            .or_else(|| object_with_id_open(&tokens, identifier))
            .ok_or_else(|| ExtractionFailure {
                identifier: identifier.to_string(),
                kind: FailureKind::NotFound,
            })?;

        match matching_close(&self.text, open) {
            Some(close) => Ok(BlockSpan { open, close }),
            None => Err(ExtractionFailure {
                identifier: identifier.to_string(),
                kind: FailureKind::Unbalanced { offset: open },
            }),
        }
    }

    /// Ids of the outermost quoted-key blocks, in first-appearance order.
    ///
    /// Blocks nested inside another keyed block are not listed. Repeated
    /// keys are listed once.
    pub fn block_ids(&self) -> Vec<String> {
        let tokens = self.tokens();
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        for (key_idx, _) in self.outer_keyed_blocks(&tokens) {
            if let Token::Str(key) = tokens[key_idx].token {
                let id = unescape(key);
                if seen.insert(id.clone()) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// `(key token index, opening brace offset)` of every `"key": {` that is
    /// not inside another such block. An unbalanced block does not hide
    /// what follows it.
    fn outer_keyed_blocks(&self, tokens: &[Spanned<'_>]) -> Vec<(usize, usize)> {
        let mut blocks = Vec::new();
        let mut idx = 0;

        while idx + 2 < tokens.len() {
            let (Token::Str(_), Token::Colon, Token::Open(b'{')) =
                (tokens[idx].token, tokens[idx + 1].token, tokens[idx + 2].token)
            else {
                idx += 1;
                continue;
            };

            let open = tokens[idx + 2].start;
            blocks.push((idx, open));
            idx = match matching_close(&self.text, open) {
                Some(close) => tokens
                    .iter()
                    .position(|t| t.start > close)
                    .unwrap_or(tokens.len()),
                None => idx + 3,
            };
        }
        blocks
    }

    /// Extract one record.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionFailure`] when the block cannot be located.
    pub fn extract(&self, identifier: &str, spec: &FieldSpec) -> Result<Record, ExtractionFailure> {
        let span = self.locate(identifier)?;
        let body = &self.text[span.open + 1..span.close];
        Ok(read_block(identifier, body, spec))
    }

    /// Extract every identifier, collecting failures instead of stopping.
    pub fn extract_all<'a, I>(&self, identifiers: I, spec: &FieldSpec) -> BatchExtraction
    where
        I: IntoIterator<Item = &'a str>,
    {
        log_op_start!("extract_all");
        let start = std::time::Instant::now();

        let mut batch = BatchExtraction::default();
        for identifier in identifiers {
            match self.extract(identifier, spec) {
                Ok(record) => batch.records.push(record),
                Err(failure) => {
                    log_item_skip!("extract_all", RoleSyncError::from(failure.clone()));
                    batch.failures.push(failure);
                }
            }
        }

        log_op_end!(
            "extract_all",
            duration_ms = start.elapsed().as_millis() as u64,
            record_count = batch.records.len() as u64,
            failure_count = batch.failures.len() as u64
        );
        batch
    }
}

/// Extract one record from raw (comment-bearing) text.
///
/// # Errors
///
/// Returns an [`ExtractionFailure`] when the block cannot be located.
pub fn extract(raw_text: &str, identifier: &str, spec: &FieldSpec) -> Result<Record, ExtractionFailure> {
    SourceText::new(raw_text).extract(identifier, spec)
}

fn is_key(token: &Token<'_>, expected: &str) -> bool {
    token
        .key_text()
        .map(|raw| raw == expected || unescape(raw) == expected)
        .unwrap_or(false)
}

/// Opening brace of the first `identifier: {` at any depth.
fn keyed_block_open(tokens: &[Spanned<'_>], identifier: &str) -> Option<usize> {
    tokens.windows(3).find_map(|w| {
        match (w[1].token, w[2].token) {
            (Token::Colon, Token::Open(b'{')) if is_key(&w[0].token, identifier) => Some(w[2].start),
            _ => None,
        }
    })
}

/// Opening brace of the object literal holding `id: "<identifier>"`.
fn object_with_id_open(tokens: &[Spanned<'_>], identifier: &str) -> Option<usize> {
    let mut stack: Vec<(u8, usize)> = Vec::new();
    for (idx, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::Open(b) => stack.push((b, spanned.start)),
            Token::Close(_) => {
                stack.pop();
            }
            _ if is_key(&spanned.token, "id") => {
                let value = tokens.get(idx + 2).map(|t| t.token);
                let colon = tokens.get(idx + 1).map(|t| t.token);
                if let (Some(Token::Colon), Some(Token::Str(raw))) = (colon, value) {
                    if unescape(raw) == identifier {
                        if let Some(&(b'{', open)) = stack.last() {
                            return Some(open);
                        }
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Read the fields of an already-located block body (the text between its braces).
pub fn read_block(identifier: &str, body: &str, spec: &FieldSpec) -> Record {
    let fields = fields::top_level_fields(body);
    let mut record = Record::new(identifier);

    for rule in spec.rules() {
        let parsed = fields
            .iter()
            .find(|(key, _)| *key == rule.name)
            .and_then(|(_, raw)| fields::parse_value(raw));

        if rule.name == "id" {
            if let Some(FieldValue::Text(id)) = parsed {
                record.id = id;
            }
            continue;
        }

        match (parsed, &rule.default) {
            (Some(FieldValue::List(items)), FieldDefault::Omit) if items.is_empty() => {}
            (Some(value), _) => record.insert(rule.name.clone(), value),
            (None, FieldDefault::Value(default)) => record.insert(rule.name.clone(), default.clone()),
            (None, FieldDefault::Identifier) => {
                record.insert(rule.name.clone(), FieldValue::Text(identifier.to_string()))
            }
            (None, FieldDefault::Omit) => {}
        }
    }
    record
}

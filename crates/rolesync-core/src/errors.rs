use thiserror::Error;

/// Result type alias using RoleSyncError
pub type Result<T> = std::result::Result<T, RoleSyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// test assertions and rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Per-item conditions (recovered locally)
    /// Malformed document or text block
    ParseFailure,
    /// Delimiter scan found no balanced close for a block
    AmbiguousBlock,
    /// No block exists for the requested identifier
    BlockNotFound,
    /// Empty or colliding ids detected in a dataset
    SchemaAnomaly,

    // Run-level conditions
    /// A declared root path or source does not exist or is unreadable
    FatalInput,
    Config,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ParseFailure => "ERR_PARSE_FAILURE",
            ExErrorKind::AmbiguousBlock => "ERR_AMBIGUOUS_BLOCK",
            ExErrorKind::BlockNotFound => "ERR_BLOCK_NOT_FOUND",
            ExErrorKind::SchemaAnomaly => "ERR_SCHEMA_ANOMALY",
            ExErrorKind::FatalInput => "ERR_FATAL_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// Whether a run can continue after an error of this kind.
    ///
    /// Per-item kinds are recorded and skipped; everything else aborts.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::ParseFailure
                | ExErrorKind::AmbiguousBlock
                | ExErrorKind::BlockNotFound
                | ExErrorKind::SchemaAnomaly
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    path: Option<String>,
    message: String,
    entity_ids: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            path: None,
            message: String::new(),
            entity_ids: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the ids involved in a multi-entity anomaly (e.g. merge collisions)
    pub fn with_entity_ids(mut self, ids: Vec<String>) -> Self {
        self.entity_ids = Some(ids);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the entity ids of a multi-entity anomaly, if any
    pub fn entity_ids(&self) -> Option<&[String]> {
        self.entity_ids.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for rolesync operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoleSyncError {
    // ===== Extraction Errors =====
    /// No block is keyed by (or identified as) the identifier
    #[error("Block not found for identifier: {identifier}")]
    BlockNotFound { identifier: String },

    /// The block opens but its closing delimiter is never reached
    #[error("Unbalanced block for identifier {identifier}: no closing delimiter after offset {offset}")]
    UnbalancedBlock { identifier: String, offset: usize },

    /// The forward-mapping section marker is absent from the declaration text
    #[error("Mapping section not found: {marker}")]
    MappingSectionMissing { marker: String },

    /// The forward-mapping section opens but never closes
    #[error("Mapping section is unbalanced: {marker}")]
    MappingSectionUnbalanced { marker: String },

    // ===== Dataset Errors =====
    /// Merging would introduce colliding canonical ids
    #[error("Duplicate ids rejected: {canonical_ids:?}")]
    DuplicateIds { canonical_ids: Vec<String> },

    /// A record in a merge batch has no id
    #[error("Record at index {index} has an empty id")]
    EmptyId { index: usize },

    // ===== Document Errors =====
    /// A document could not be interpreted
    #[error("Invalid document {path}: {reason}")]
    InvalidDocument { path: String, reason: String },
}

impl From<RoleSyncError> for ExError {
    fn from(err: RoleSyncError) -> Self {
        match err {
            RoleSyncError::BlockNotFound { identifier } => {
                ExError::new(ExErrorKind::BlockNotFound)
                    .with_entity_id(identifier)
                    .with_message("No block found for identifier")
            }
            RoleSyncError::UnbalancedBlock { identifier, offset } => {
                ExError::new(ExErrorKind::AmbiguousBlock)
                    .with_entity_id(identifier)
                    .with_message(format!("Block opened at offset {} never closes", offset))
            }
            RoleSyncError::MappingSectionMissing { marker } => {
                ExError::new(ExErrorKind::ParseFailure)
                    .with_op("parse_mapping")
                    .with_entity_id(marker)
                    .with_message("Mapping section marker not found")
            }
            RoleSyncError::MappingSectionUnbalanced { marker } => {
                ExError::new(ExErrorKind::AmbiguousBlock)
                    .with_op("parse_mapping")
                    .with_entity_id(marker)
                    .with_message("Mapping section never closes")
            }
            RoleSyncError::DuplicateIds { canonical_ids } => {
                ExError::new(ExErrorKind::SchemaAnomaly)
                    .with_op("merge_datasets")
                    .with_message(format!("{} colliding id(s)", canonical_ids.len()))
                    .with_entity_ids(canonical_ids)
            }
            RoleSyncError::EmptyId { index } => ExError::new(ExErrorKind::SchemaAnomaly)
                .with_op("merge_datasets")
                .with_message(format!("Record at index {} has an empty id", index)),
            RoleSyncError::InvalidDocument { path, reason } => {
                ExError::new(ExErrorKind::ParseFailure)
                    .with_op("read_document")
                    .with_path(path)
                    .with_message(reason)
            }
        }
    }
}

use std::path::Path;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, test assertions and machine-readable reports.
///
/// `FileUnavailable` and `ManifestMissing` are recoverable: the reconciliation
/// engine degrades around them (skip the file, bootstrap the manifest).
/// Everything else aborts the operation that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Reference tree / manifest
    /// A declared output or reference file does not exist where expected
    FileUnavailable,
    /// No persisted reference manifest exists
    ManifestMissing,
    /// A persisted manifest exists but cannot be parsed
    ManifestCorrupt,
    /// A file-locator pattern matched more than one file
    AmbiguousSource,
    /// A hash kind name is not supported by the checksum computer
    UnknownHashKind,

    // Configuration
    /// A model name is not present in the registry
    UnknownModel,
    /// A configuration file is malformed or inconsistent
    Config,

    // Performance metrics
    /// A required metric label is absent from the scheduler summary
    MetricMissing,
    /// A metric label appears more than once in the scheduler summary
    MetricAmbiguous,
    /// A metric value cannot be converted to a number
    InvalidMetric,

    // Generic
    InvalidInput,
    Io,
    Serialization,
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::FileUnavailable => "ERR_FILE_UNAVAILABLE",
            ExErrorKind::ManifestMissing => "ERR_MANIFEST_MISSING",
            ExErrorKind::ManifestCorrupt => "ERR_MANIFEST_CORRUPT",
            ExErrorKind::AmbiguousSource => "ERR_AMBIGUOUS_SOURCE",
            ExErrorKind::UnknownHashKind => "ERR_UNKNOWN_HASH_KIND",
            ExErrorKind::UnknownModel => "ERR_UNKNOWN_MODEL",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::MetricMissing => "ERR_METRIC_MISSING",
            ExErrorKind::MetricAmbiguous => "ERR_METRIC_AMBIGUOUS",
            ExErrorKind::InvalidMetric => "ERR_INVALID_METRIC",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether callers are expected to degrade around this kind instead of aborting
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExErrorKind::FileUnavailable | ExErrorKind::ManifestMissing
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation name,
/// offending path, candidate matches) for debugging and reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the offending path
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().display().to_string());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add candidate matches (used for AmbiguousSource)
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.candidates = Some(candidates);
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

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the offending path, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Get candidate matches, if any
    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(candidates) = &self.candidates {
            write!(f, " (candidates: {})", candidates.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Create a file-unavailable error
pub fn file_unavailable(op: &str, path: &Path) -> ExError {
    ExError::new(ExErrorKind::FileUnavailable)
        .with_op(op)
        .with_path(path)
        .with_message("file does not exist")
}

/// Create a manifest-corrupt error
pub fn manifest_corrupt(path: Option<&Path>, reason: impl Into<String>) -> ExError {
    let err = ExError::new(ExErrorKind::ManifestCorrupt)
        .with_op("manifest_decode")
        .with_message(reason);
    match path {
        Some(p) => err.with_path(p),
        None => err,
    }
}

/// Create an IO error with the offending path attached
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
}

/// Value-conversion failures raised while parsing scheduler summaries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricParseError {
    /// Value is not a decimal number
    #[error("'{value}' is not a number")]
    InvalidNumber { value: String },

    /// Value is not an `h:m:s` duration
    #[error("'{value}' is not an h:m:s duration")]
    InvalidDuration { value: String },

    /// Value is not a number followed by a byte unit
    #[error("'{value}' is not a size with a byte unit")]
    InvalidSize { value: String },

    /// Byte unit is not one of B, KB, MB, GB, TB, PB
    #[error("unknown byte unit '{unit}'")]
    UnknownUnit { unit: String },
}

impl From<MetricParseError> for ExError {
    fn from(err: MetricParseError) -> Self {
        ExError::new(ExErrorKind::InvalidMetric)
            .with_op("parse_metric")
            .with_message(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExError {
    fn from(err: serde_yaml::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}

use std::fmt;
use std::path::PathBuf;

/// A single schema constraint a document failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer to the offending value in the document ("" for the root).
    pub instance_path: String,
    /// JSON pointer to the failing keyword in the schema.
    pub schema_path: String,
    /// Engine message, e.g. `"abc" is not of type "integer"`.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "at {at}: {} (schema: {})", self.message, self.schema_path)
    }
}

/// Errors that can occur while loading schemas or validating documents.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A schema or document file does not exist.
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A schema or document file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A schema or document file is not valid JSON.
    #[error("{} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An in-memory schema is not valid JSON.
    #[error("schema {label} is not valid JSON: {source}")]
    InvalidSchemaJson {
        label: String,
        #[source]
        source: serde_json::Error,
    },

    /// The schema engine rejected the schema.
    #[error("failed to compile schema {label}: {message}")]
    CompileFailed { label: String, message: String },

    /// The document exceeds the configured size limit.
    #[error("{} is too large ({size} bytes, max {max})", .path.display())]
    DocumentTooLarge { path: PathBuf, size: u64, max: usize },

    /// The document does not conform to the schema.
    #[error("{} does not conform to schema {schema}: {}", .document.display(), summarize(.violations))]
    Violation {
        document: PathBuf,
        schema: String,
        violations: Vec<Violation>,
    },
}

impl SchemaError {
    /// Path of the file the error is about, when there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SchemaError::NotFound { path }
            | SchemaError::Io { path, .. }
            | SchemaError::Parse { path, .. }
            | SchemaError::DocumentTooLarge { path, .. } => Some(path),
            SchemaError::Violation { document, .. } => Some(document),
            SchemaError::InvalidSchemaJson { .. } | SchemaError::CompileFailed { .. } => None,
        }
    }

    /// Violations carried by a `Violation` error; empty for every other kind.
    pub fn violations(&self) -> &[Violation] {
        match self {
            SchemaError::Violation { violations, .. } => violations,
            _ => &[],
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    match violations {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

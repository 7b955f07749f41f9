use std::borrow::Cow;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use tracing::debug;

use crate::config::ValidatorConfig;
use crate::document::read_json_file;
use crate::error::{Result, SchemaError, Violation};
use crate::strict::close_object_schemas;

/// A compiled JSON Schema bound to a reusable validation operation.
///
/// The schema is compiled once at construction and never changes afterwards,
/// so one validator can check any number of documents (and can be shared
/// across threads).
pub struct SchemaValidator {
    label: String,
    validator: Validator,
    config: ValidatorConfig,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("label", &self.label)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load and compile the schema file at `path` with default config.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_config(path, ValidatorConfig::default())
    }

    /// Load and compile the schema file at `path`.
    pub fn from_file_with_config(path: &Path, config: ValidatorConfig) -> Result<Self> {
        let schema = read_json_file(path, config.max_document_size)?;
        Self::from_value_with_config(path.display().to_string(), &schema, config)
    }

    /// Compile a schema from a JSON string.
    pub fn from_json(label: impl Into<String>, schema_json: &str) -> Result<Self> {
        let label = label.into();
        let schema: Value = serde_json::from_str(schema_json).map_err(|source| {
            SchemaError::InvalidSchemaJson {
                label: label.clone(),
                source,
            }
        })?;
        Self::from_value_with_config(label, &schema, ValidatorConfig::default())
    }

    /// Compile a schema from a JSON value with default config.
    pub fn from_value(label: impl Into<String>, schema: &Value) -> Result<Self> {
        Self::from_value_with_config(label, schema, ValidatorConfig::default())
    }

    /// Compile a schema from a JSON value.
    pub fn from_value_with_config(
        label: impl Into<String>,
        schema: &Value,
        config: ValidatorConfig,
    ) -> Result<Self> {
        let label = label.into();
        let schema = if config.strict_mode {
            let mut closed = schema.clone();
            close_object_schemas(&mut closed);
            Cow::Owned(closed)
        } else {
            Cow::Borrowed(schema)
        };

        let compiled =
            jsonschema::validator_for(&schema).map_err(|err| SchemaError::CompileFailed {
                label: label.clone(),
                message: err.to_string(),
            })?;

        debug!(schema = %label, strict = config.strict_mode, "compiled schema");
        Ok(Self {
            label,
            validator: compiled,
            config,
        })
    }

    /// Read the document at `path` and check it against the schema.
    pub fn validate_file(&self, path: &Path) -> Result<()> {
        let document = read_json_file(path, self.config.max_document_size)?;
        let violations = self.check(&document);
        if violations.is_empty() {
            debug!(schema = %self.label, document = %path.display(), "document conforms");
            return Ok(());
        }

        Err(SchemaError::Violation {
            document: path.to_path_buf(),
            schema: self.label.clone(),
            violations,
        })
    }

    /// Check an in-memory document; an empty result means it conforms.
    ///
    /// At most `max_reported_violations` entries are returned (never fewer
    /// than one when the document fails).
    pub fn check(&self, document: &Value) -> Vec<Violation> {
        let limit = self.config.max_reported_violations.max(1);
        self.validator
            .iter_errors(document)
            .take(limit)
            .map(|err| Violation {
                instance_path: err.instance_path().to_string(),
                schema_path: err.schema_path().to_string(),
                message: err.to_string(),
            })
            .collect()
    }

    /// Whether an in-memory document conforms.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }

    /// Human-readable name of the schema (its file path when loaded from disk).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

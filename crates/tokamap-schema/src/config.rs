/// Controls how schemas are compiled and documents are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
    /// Maximum bytes accepted for a single document file.
    pub max_document_size: usize,
    /// Maximum number of violations carried in one `SchemaError::Violation`.
    pub max_reported_violations: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_document_size: 16 * 1024 * 1024,
            max_reported_violations: 8,
        }
    }
}

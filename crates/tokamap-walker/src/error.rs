use std::path::PathBuf;

/// Errors that end a walk before (or instead of) validating documents.
///
/// Document-level failures are not errors at this layer; they are recorded
/// in the [`WalkReport`](crate::WalkReport).
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// The mapping root is missing or is not a directory.
    #[error("argument '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The mapping root has no `mappings.cfg.json`.
    #[error("configuration file '{}' does not exist", .0.display())]
    MissingConfig(PathBuf),

    /// The mapping root has no top-level `globals.json`.
    #[error("root level globals file '{}' does not exist", .0.display())]
    MissingRootGlobals(PathBuf),

    /// The configuration file could not be read.
    #[error("failed to read configuration file '{}': {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not JSON or does not have the expected shape.
    #[error("configuration file '{}' is invalid: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The selected version key is not in the configuration's mapping table.
    #[error(
        "mapping version '{version}' not found in '{}' (available: {})",
        .path.display(),
        list_or_none(.available)
    )]
    UnknownVersion {
        version: String,
        path: PathBuf,
        available: Vec<String>,
    },

    /// A configured mapping name would escape the mapping root.
    #[error("invalid mapping name '{name}' in '{}': {reason}", .path.display())]
    InvalidMappingName {
        name: String,
        path: PathBuf,
        reason: &'static str,
    },
}

impl WalkError {
    /// True when the fix is a different invocation (path or version) rather
    /// than an edit to the tree's contents.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            WalkError::NotADirectory(_)
                | WalkError::MissingConfig(_)
                | WalkError::MissingRootGlobals(_)
                | WalkError::UnknownVersion { .. }
        )
    }
}

fn list_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

pub type Result<T> = std::result::Result<T, WalkError>;

use crate::config::DEFAULT_MAPPING_VERSION;

/// What the walker does after a document fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing document.
    #[default]
    FailFast,
    /// Validate every document and report all failures.
    CollectAll,
}

/// Controls a single walk over a mapping tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// Version key looked up in the configuration's `mappings` table.
    pub version: String,
    pub failure_policy: FailurePolicy,
    /// When true, numerically named subdirectories of a mapping directory
    /// are validated as separate shots.
    pub expand_shots: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_MAPPING_VERSION.to_string(),
            failure_policy: FailurePolicy::default(),
            expand_shots: false,
        }
    }
}

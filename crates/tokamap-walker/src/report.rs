use std::fmt;
use std::path::{Path, PathBuf};

use tokamap_schema::SchemaError;

/// A unit of work in a walk: the root globals, or one configured mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    RootGlobals,
    Mapping(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::RootGlobals => write!(f, "top-level globals"),
            Target::Mapping(name) => write!(f, "mapping '{name}'"),
        }
    }
}

/// Which schema a document is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Globals,
    Mappings,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Globals => "globals",
            DocumentKind::Mappings => "mappings",
        }
    }
}

/// Result of validating one document.
#[derive(Debug)]
pub struct FileCheck {
    pub path: PathBuf,
    pub kind: DocumentKind,
    pub error: Option<SchemaError>,
}

impl FileCheck {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Every document checked for one target, in validation order.
#[derive(Debug)]
pub struct TargetOutcome {
    pub target: Target,
    pub checks: Vec<FileCheck>,
}

impl TargetOutcome {
    pub(crate) fn new(target: Target) -> Self {
        Self {
            target,
            checks: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.checks.iter().all(FileCheck::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> {
        self.checks.iter().filter(|check| !check.is_ok())
    }
}

/// Outcome of a walk that got past its preconditions.
#[derive(Debug)]
pub struct WalkReport {
    pub root: PathBuf,
    pub version: String,
    /// Root globals first, then mappings in configured order.
    pub outcomes: Vec<TargetOutcome>,
    /// Set when fail-fast ended the walk at a failing document.
    pub stopped_early: bool,
}

impl WalkReport {
    pub(crate) fn new(root: &Path, version: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            version: version.to_string(),
            outcomes: Vec::new(),
            stopped_early: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_ok)
    }

    /// All failed document checks, in validation order.
    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> {
        self.outcomes.iter().flat_map(|outcome| outcome.failures())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn first_error(&self) -> Option<&SchemaError> {
        self.failures().find_map(|check| check.error.as_ref())
    }

    /// Number of documents validated, passing or not.
    pub fn files_checked(&self) -> usize {
        self.outcomes.iter().map(|outcome| outcome.checks.len()).sum()
    }
}

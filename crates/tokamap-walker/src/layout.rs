use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CONFIG_FILE_NAME;
use crate::error::{Result, WalkError};

/// Globals document name, at the root and in every mapping directory.
pub const GLOBALS_FILE_NAME: &str = "globals.json";

/// Mappings document name inside every mapping directory.
pub const MAPPINGS_FILE_NAME: &str = "mappings.json";

/// A mapping root that passed the preflight checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRoot {
    root: PathBuf,
    config_path: PathBuf,
    globals_path: PathBuf,
}

/// The two documents of one mapping directory (or one shot of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingFiles {
    /// Shot number when the directory is shot-partitioned.
    pub shot: Option<u32>,
    pub globals: PathBuf,
    pub mappings: PathBuf,
}

impl MappingRoot {
    /// Check that `root` is a directory holding a configuration file and a
    /// top-level globals file. Only file metadata is inspected.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(WalkError::NotADirectory(root.to_path_buf()));
        }

        let config_path = root.join(CONFIG_FILE_NAME);
        if !config_path.is_file() {
            return Err(WalkError::MissingConfig(config_path));
        }

        let globals_path = root.join(GLOBALS_FILE_NAME);
        if !globals_path.is_file() {
            return Err(WalkError::MissingRootGlobals(globals_path));
        }

        Ok(Self {
            root: root.to_path_buf(),
            config_path,
            globals_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn globals_path(&self) -> &Path {
        &self.globals_path
    }

    /// Directory of the named mapping.
    pub fn mapping_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Document pairs to validate for the named mapping.
    ///
    /// Without `expand_shots`, or when the directory has no numeric
    /// subdirectories, this is the single pair directly inside the mapping
    /// directory. Otherwise it is one pair per shot directory, ascending.
    pub fn mapping_files(&self, name: &str, expand_shots: bool) -> Vec<MappingFiles> {
        let dir = self.mapping_dir(name);
        let shots = if expand_shots {
            shot_dirs(&dir)
        } else {
            Vec::new()
        };

        if shots.is_empty() {
            return vec![MappingFiles::in_dir(&dir, None)];
        }
        shots
            .into_iter()
            .map(|shot| MappingFiles::in_dir(&dir.join(shot.to_string()), Some(shot)))
            .collect()
    }
}

impl MappingFiles {
    fn in_dir(dir: &Path, shot: Option<u32>) -> Self {
        Self {
            shot,
            globals: dir.join(GLOBALS_FILE_NAME),
            mappings: dir.join(MAPPINGS_FILE_NAME),
        }
    }
}

fn shot_dirs(dir: &Path) -> Vec<u32> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            // Left to the per-file checks to report.
            debug!(dir = %dir.display(), error = %err, "cannot list mapping directory");
            return Vec::new();
        }
    };

    let mut shots: Vec<u32> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
        .collect();
    shots.sort_unstable();
    shots.dedup();
    shots
}

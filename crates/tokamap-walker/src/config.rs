use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, WalkError};

/// Name of the configuration file at the root of a mapping tree.
pub const CONFIG_FILE_NAME: &str = "mappings.cfg.json";

/// Version key selected when the caller does not name one.
pub const DEFAULT_MAPPING_VERSION: &str = "3.39.0";

/// Contents of `mappings.cfg.json`.
///
/// ```json
/// { "mappings": { "3.39.0": ["equilibrium", "magnetics"] } }
/// ```
///
/// Keys other than `mappings` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingConfig {
    /// Version key -> ordered list of mapping directory names.
    pub mappings: BTreeMap<String, Vec<String>>,
    #[serde(skip)]
    source: PathBuf,
}

impl MappingConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read(path).map_err(|source| WalkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        // Decoding happens in the parser so bad UTF-8 is reported as bad JSON.
        let mut config: Self =
            serde_json::from_slice(&content).map_err(|source| WalkError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.source = path.to_path_buf();
        Ok(config)
    }

    /// Parse configuration text that did not come from a file.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Version keys present in the configuration, sorted.
    pub fn versions(&self) -> Vec<String> {
        self.mappings.keys().cloned().collect()
    }

    /// Mapping directory names configured for `version`, in listed order.
    ///
    /// Fails if the version is absent or if any name is empty, absolute, or
    /// climbs out of the root with `..`.
    pub fn mappings_for(&self, version: &str) -> Result<&[String]> {
        let names = self
            .mappings
            .get(version)
            .ok_or_else(|| WalkError::UnknownVersion {
                version: version.to_string(),
                path: self.source.clone(),
                available: self.versions(),
            })?;

        for name in names {
            if let Some(reason) = reject_mapping_name(name) {
                return Err(WalkError::InvalidMappingName {
                    name: name.clone(),
                    path: self.source.clone(),
                    reason,
                });
            }
        }
        Ok(names)
    }
}

fn reject_mapping_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("name is empty");
    }
    let path = Path::new(name);
    if path.has_root() {
        return Some("name must be relative to the mapping root");
    }
    path.components().find_map(|component| match component {
        Component::ParentDir => Some("name must not contain '..'"),
        Component::Prefix(_) | Component::RootDir => {
            Some("name must be relative to the mapping root")
        }
        Component::CurDir | Component::Normal(_) => None,
    })
}

use std::path::{Path, PathBuf};

use tokamap_schema::{SchemaValidator, ValidatorConfig};
use tracing::debug;

use crate::exit::{schema_load_error, CliError, CliResult, USAGE};

pub const GLOBALS_SCHEMA_FILE: &str = "globals.schema.json";
pub const MAPPINGS_SCHEMA_FILE: &str = "mappings.schema.json";

/// The two compiled schemas a walk needs.
pub struct SchemaSet {
    pub globals: SchemaValidator,
    pub mappings: SchemaValidator,
}

impl SchemaSet {
    pub fn load(dir: &Path, config: ValidatorConfig) -> CliResult<Self> {
        let globals =
            SchemaValidator::from_file_with_config(&dir.join(GLOBALS_SCHEMA_FILE), config)
                .map_err(|err| schema_load_error("loading globals schema", err))?;
        let mappings =
            SchemaValidator::from_file_with_config(&dir.join(MAPPINGS_SCHEMA_FILE), config)
                .map_err(|err| schema_load_error("loading mappings schema", err))?;
        Ok(Self { globals, mappings })
    }
}

/// Pick the schema directory: the explicit one if given, otherwise the first
/// install location next to the executable that holds both schema files.
pub fn resolve_schema_dir(explicit: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(dir) = explicit {
        return if holds_schemas(dir) {
            Ok(dir.to_path_buf())
        } else {
            Err(CliError::new(
                USAGE,
                format!(
                    "schema directory '{}' must contain {GLOBALS_SCHEMA_FILE} and {MAPPINGS_SCHEMA_FILE}",
                    dir.display()
                ),
            ))
        };
    }

    let exe = std::env::current_exe()
        .map_err(|err| CliError::new(USAGE, format!("cannot locate executable: {err}")))?;
    let candidates = exe.parent().map(install_candidates).unwrap_or_default();
    for dir in &candidates {
        debug!(dir = %dir.display(), "probing schema directory");
        if holds_schemas(dir) {
            return Ok(dir.clone());
        }
    }

    Err(CliError::new(
        USAGE,
        "no schema directory found; pass --schema-dir or set TOKAMAP_SCHEMA_DIR",
    ))
}

/// Locations probed relative to the executable's directory, in order.
fn install_candidates(exe_dir: &Path) -> Vec<PathBuf> {
    vec![
        exe_dir.join("schemas"),
        exe_dir.join("../share/tokamap/schemas"),
        // cargo's target/<profile>/ inside a checkout
        exe_dir.join("../../schemas"),
    ]
}

fn holds_schemas(dir: &Path) -> bool {
    dir.join(GLOBALS_SCHEMA_FILE).is_file() && dir.join(MAPPINGS_SCHEMA_FILE).is_file()
}

use std::fmt;
use std::io;

use tokamap_schema::SchemaError;
use tokamap_walker::WalkError;

// Exit codes follow sysexits where one fits.
pub const SUCCESS: i32 = 0;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const NO_INPUT: i32 = 66;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => NO_INPUT,
        _ => INTERNAL,
    }
}

/// Exit code for a document that failed to load or validate.
pub fn schema_error_code(err: &SchemaError) -> i32 {
    match err {
        SchemaError::NotFound { .. } => NO_INPUT,
        SchemaError::Io { source, .. } => io_code(source),
        SchemaError::Parse { .. }
        | SchemaError::InvalidSchemaJson { .. }
        | SchemaError::DocumentTooLarge { .. }
        | SchemaError::Violation { .. } => DATA_INVALID,
        SchemaError::CompileFailed { .. } => INTERNAL,
    }
}

/// Failure to load one of the tool's own schemas.
pub fn schema_load_error(context: &str, err: SchemaError) -> CliError {
    let code = match &err {
        SchemaError::NotFound { .. } => USAGE,
        SchemaError::Parse { .. } | SchemaError::CompileFailed { .. } => INTERNAL,
        other => schema_error_code(other),
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn walk_error(err: WalkError) -> CliError {
    let code = match &err {
        WalkError::ConfigRead { source, .. } => io_code(source),
        WalkError::ConfigParse { .. } | WalkError::InvalidMappingName { .. } => DATA_INVALID,
        WalkError::NotADirectory(_)
        | WalkError::MissingConfig(_)
        | WalkError::MissingRootGlobals(_)
        | WalkError::UnknownVersion { .. } => USAGE,
    };
    CliError::new(code, err.to_string())
}

//! JSON Schema validation of TokaMap documents.
//!
//! A [`SchemaValidator`] compiles one schema (globals or mappings) and checks
//! documents on disk against it. Failures are typed: a missing file, a file
//! that is not JSON, or a document that does not conform, with the offending
//! instance location and the schema keyword it violated.

pub mod config;
pub mod document;
pub mod error;
mod strict;
pub mod validator;

pub use config::ValidatorConfig;
pub use document::read_json_file;
pub use error::{Result, SchemaError, Violation};
pub use validator::SchemaValidator;

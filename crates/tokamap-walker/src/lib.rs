//! Walks a TokaMap mapping tree and validates it.
//!
//! A mapping tree looks like:
//!
//! ```text
//! root/
//!   mappings.cfg.json     { "mappings": { "3.39.0": ["magnetics", ...] } }
//!   globals.json
//!   magnetics/
//!     globals.json
//!     mappings.json
//! ```
//!
//! [`Walker::run`] checks the root layout, reads the configuration, validates
//! the root globals and then each configured mapping directory in order.

pub mod config;
pub mod error;
pub mod layout;
pub mod options;
pub mod progress;
pub mod report;
pub mod walker;

pub use config::{MappingConfig, CONFIG_FILE_NAME, DEFAULT_MAPPING_VERSION};
pub use error::{Result, WalkError};
pub use layout::{MappingFiles, MappingRoot, GLOBALS_FILE_NAME, MAPPINGS_FILE_NAME};
pub use options::{FailurePolicy, WalkOptions};
pub use progress::{Progress, Silent};
pub use report::{DocumentKind, FileCheck, Target, TargetOutcome, WalkReport};
pub use walker::Walker;

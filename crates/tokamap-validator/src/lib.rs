//! Validate TokaMap mapping directories against JSON Schema.
//!
//! The `tokamap-validator` binary is the usual entry point. The library
//! re-exports the two building blocks for callers that want to embed the
//! validation:
//!
//! - [`schema`]: compile a schema once, validate documents against it
//! - [`walker`]: walk a mapping tree driven by `mappings.cfg.json`

/// Re-export schema validation types.
pub mod schema {
    pub use tokamap_schema::*;
}

/// Re-export mapping tree walking types.
pub mod walker {
    pub use tokamap_walker::*;
}

use std::path::Path;

use crate::report::{Target, TargetOutcome};

/// Observer for walk progress. Every method defaults to doing nothing.
///
/// Calls arrive in walk order: `reading_config`, `mappings_found`, then a
/// `target_started`/`target_finished` pair per target. Implementations only
/// observe; they cannot change the walk.
pub trait Progress {
    fn reading_config(&mut self, _path: &Path) {}

    fn mappings_found(&mut self, _version: &str, _names: &[String]) {}

    fn target_started(&mut self, _target: &Target) {}

    fn target_finished(&mut self, _outcome: &TargetOutcome) {}
}

/// Progress sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Progress for Silent {}

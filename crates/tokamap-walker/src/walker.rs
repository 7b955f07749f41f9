use std::path::Path;

use tokamap_schema::SchemaValidator;
use tracing::{debug, info, warn};

use crate::config::MappingConfig;
use crate::error::Result;
use crate::layout::MappingRoot;
use crate::options::{FailurePolicy, WalkOptions};
use crate::progress::Progress;
use crate::report::{DocumentKind, FileCheck, Target, TargetOutcome, WalkReport};

/// Validates a mapping tree against the globals and mappings schemas.
///
/// The two validators are compiled once and reused for every document.
#[derive(Debug)]
pub struct Walker {
    globals: SchemaValidator,
    mappings: SchemaValidator,
    options: WalkOptions,
}

impl Walker {
    pub fn new(globals: SchemaValidator, mappings: SchemaValidator) -> Self {
        Self::with_options(globals, mappings, WalkOptions::default())
    }

    pub fn with_options(
        globals: SchemaValidator,
        mappings: SchemaValidator,
        options: WalkOptions,
    ) -> Self {
        Self {
            globals,
            mappings,
            options,
        }
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walk the tree at `root`.
    ///
    /// Returns `Err` only when a precondition or the configuration fails;
    /// document failures are recorded in the report.
    pub fn run(&self, root: &Path, progress: &mut dyn Progress) -> Result<WalkReport> {
        let root = MappingRoot::open(root)?;

        progress.reading_config(root.config_path());
        let config = MappingConfig::load(root.config_path())?;
        let names = config.mappings_for(&self.options.version)?;
        progress.mappings_found(&self.options.version, names);

        info!(
            root = %root.path().display(),
            version = %self.options.version,
            mappings = names.len(),
            "validating mapping tree"
        );

        let mut report = WalkReport::new(root.path(), &self.options.version);

        let root_globals = [(root.globals_path(), DocumentKind::Globals)];
        if !self.check_target(Target::RootGlobals, &root_globals, &mut report, progress) {
            return Ok(report);
        }

        for name in names {
            let owned: Vec<_> = root
                .mapping_files(name, self.options.expand_shots)
                .into_iter()
                .flat_map(|files| {
                    [
                        (files.globals, DocumentKind::Globals),
                        (files.mappings, DocumentKind::Mappings),
                    ]
                })
                .collect();
            let documents: Vec<_> = owned
                .iter()
                .map(|(path, kind)| (path.as_path(), *kind))
                .collect();

            let target = Target::Mapping(name.clone());
            if !self.check_target(target, &documents, &mut report, progress) {
                return Ok(report);
            }
        }

        info!(
            files = report.files_checked(),
            failures = report.failure_count(),
            "mapping tree validated"
        );
        Ok(report)
    }

    /// Validate the documents of one target and append the outcome.
    /// Returns false when the walk must stop.
    fn check_target(
        &self,
        target: Target,
        documents: &[(&Path, DocumentKind)],
        report: &mut WalkReport,
        progress: &mut dyn Progress,
    ) -> bool {
        progress.target_started(&target);
        let mut outcome = TargetOutcome::new(target);

        for (path, kind) in documents {
            let validator = match kind {
                DocumentKind::Globals => &self.globals,
                DocumentKind::Mappings => &self.mappings,
            };
            debug!(document = %path.display(), schema = kind.as_str(), "validating document");

            let error = validator.validate_file(path).err();
            if let Some(err) = &error {
                warn!(target_name = %outcome.target, error = %err, "document failed validation");
            }
            let failed = error.is_some();
            outcome.checks.push(FileCheck {
                path: path.to_path_buf(),
                kind: *kind,
                error,
            });

            if failed && self.options.failure_policy == FailurePolicy::FailFast {
                break;
            }
        }

        progress.target_finished(&outcome);
        let keep_going =
            outcome.is_ok() || self.options.failure_policy == FailurePolicy::CollectAll;
        report.outcomes.push(outcome);
        if !keep_going {
            report.stopped_early = true;
        }
        keep_going
    }
}

use std::io::Write;
use std::path::Path;

use tokamap_walker::{Progress, Target, TargetOutcome};

/// Verbose progress lines, e.g. `Validating mapping 'magnetics' ... ok`.
///
/// Write errors are ignored: progress is informational and must not change
/// the outcome of a walk.
pub struct VerboseProgress<W: Write> {
    out: W,
}

impl<W: Write> VerboseProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Progress for VerboseProgress<W> {
    fn reading_config(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        let _ = writeln!(self.out, "Reading configuration file '{name}'");
    }

    fn mappings_found(&mut self, _version: &str, names: &[String]) {
        let _ = writeln!(self.out, "Mappings found: {names:?}");
    }

    fn target_started(&mut self, target: &Target) {
        let _ = write!(self.out, "Validating {target} ... ");
        let _ = self.out.flush();
    }

    fn target_finished(&mut self, outcome: &TargetOutcome) {
        let status = if outcome.is_ok() { "ok" } else { "FAILED" };
        let _ = writeln!(self.out, "{status}");
        let _ = self.out.flush();
    }
}

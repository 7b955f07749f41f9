use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use tokamap_schema::{SchemaError, Violation};
use tokamap_walker::{FileCheck, WalkReport};

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Nothing on success; failures with their schema locations otherwise.
    Text,
    /// One JSON report object.
    Json,
    /// One row per validated document.
    Table,
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    schema_id: &'static str,
    root: String,
    version: &'a str,
    success: bool,
    stopped_early: bool,
    files_checked: usize,
    targets: Vec<TargetOutput>,
}

#[derive(Serialize)]
struct TargetOutput {
    target: String,
    ok: bool,
    files: Vec<FileOutput>,
}

#[derive(Serialize)]
struct FileOutput {
    path: String,
    schema: &'static str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorOutput>,
}

#[derive(Serialize)]
struct ErrorOutput {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    violations: Vec<ViolationOutput>,
}

#[derive(Serialize)]
struct ViolationOutput {
    instance_path: String,
    schema_path: String,
    message: String,
}

pub fn print_report(report: &WalkReport, format: OutputFormat) {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(&report_output(report)).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => print_table(report),
    }
}

fn print_text(report: &WalkReport) {
    for line in failure_lines(report) {
        println!("{line}");
    }
}

/// Human-readable description of every failed document.
pub fn failure_lines(report: &WalkReport) -> Vec<String> {
    let mut lines = Vec::new();
    for check in report.failures() {
        let Some(err) = &check.error else { continue };
        match err {
            SchemaError::Violation { .. } => lines.push(format!(
                "{}: does not conform to the {} schema",
                check.path.display(),
                check.kind.as_str()
            )),
            other => lines.push(other.to_string()),
        }
        lines.extend(err.violations().iter().map(|v| format!("  {v}")));
    }
    if report.stopped_early {
        lines.push("validation stopped at the first failure (use --keep-going to continue)".into());
    }
    lines
}

fn print_table(report: &WalkReport) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["TARGET", "FILE", "SCHEMA", "STATUS", "DETAIL"]);

    for outcome in &report.outcomes {
        for check in &outcome.checks {
            table.add_row(vec![
                outcome.target.to_string(),
                relative(&report.root, &check.path),
                check.kind.as_str().to_string(),
                status_text(check).to_string(),
                detail_text(check),
            ]);
        }
    }
    println!("{table}");
}

fn report_output(report: &WalkReport) -> ReportOutput<'_> {
    let targets = report
        .outcomes
        .iter()
        .map(|outcome| TargetOutput {
            target: outcome.target.to_string(),
            ok: outcome.is_ok(),
            files: outcome
                .checks
                .iter()
                .map(|check| FileOutput {
                    path: check.path.display().to_string(),
                    schema: check.kind.as_str(),
                    ok: check.is_ok(),
                    error: check.error.as_ref().map(error_output),
                })
                .collect(),
        })
        .collect();

    ReportOutput {
        schema_id: "https://tokamap.dev/schemas/validator/v1/walk-report.schema.json",
        root: report.root.display().to_string(),
        version: &report.version,
        success: report.is_success(),
        stopped_early: report.stopped_early,
        files_checked: report.files_checked(),
        targets,
    }
}

fn error_output(err: &SchemaError) -> ErrorOutput {
    ErrorOutput {
        kind: error_kind(err),
        message: err.to_string(),
        violations: err.violations().iter().map(violation_output).collect(),
    }
}

fn violation_output(violation: &Violation) -> ViolationOutput {
    ViolationOutput {
        instance_path: violation.instance_path.clone(),
        schema_path: violation.schema_path.clone(),
        message: violation.message.clone(),
    }
}

fn error_kind(err: &SchemaError) -> &'static str {
    match err {
        SchemaError::NotFound { .. } => "file_not_found",
        SchemaError::Io { .. } => "io",
        SchemaError::Parse { .. } | SchemaError::InvalidSchemaJson { .. } => "parse",
        SchemaError::CompileFailed { .. } => "schema_compile",
        SchemaError::DocumentTooLarge { .. } => "too_large",
        SchemaError::Violation { .. } => "schema_violation",
    }
}

fn status_text(check: &FileCheck) -> &'static str {
    match &check.error {
        None => "ok",
        Some(err) => error_kind(err),
    }
}

fn detail_text(check: &FileCheck) -> String {
    match &check.error {
        None => String::new(),
        Some(err @ SchemaError::Violation { .. }) => err
            .violations()
            .iter()
            .map(Violation::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        Some(err) => err.to_string(),
    }
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tokamap_schema::ValidatorConfig;
use tokamap_walker::{
    FailurePolicy, MappingRoot, Silent, WalkOptions, WalkReport, Walker, DEFAULT_MAPPING_VERSION,
};

use crate::exit::{schema_error_code, walk_error, CliError, CliResult, SUCCESS};
use crate::output::{print_report, OutputFormat};
use crate::progress::VerboseProgress;
use crate::schemas::{resolve_schema_dir, SchemaSet};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// TokaMap mapping directory to validate.
    pub directory: PathBuf,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Version key whose mapping list is read from mappings.cfg.json.
    #[arg(
        long,
        value_name = "VERSION",
        env = "TOKAMAP_MAPPING_VERSION",
        default_value = DEFAULT_MAPPING_VERSION
    )]
    pub mapping_version: String,

    /// Validate every document and report all failures instead of stopping
    /// at the first one.
    #[arg(long)]
    pub keep_going: bool,

    /// Validate numbered shot subdirectories of a mapping separately.
    #[arg(long)]
    pub shots: bool,

    /// Reject object properties the schemas do not declare.
    #[arg(long)]
    pub strict: bool,

    /// Directory containing globals.schema.json and mappings.schema.json.
    #[arg(long, value_name = "DIR", env = "TOKAMAP_SCHEMA_DIR")]
    pub schema_dir: Option<PathBuf>,
}

impl ValidateArgs {
    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            version: self.mapping_version.clone(),
            failure_policy: if self.keep_going {
                FailurePolicy::CollectAll
            } else {
                FailurePolicy::FailFast
            },
            expand_shots: self.shots,
        }
    }
}

pub fn run(args: ValidateArgs, format: OutputFormat) -> CliResult<i32> {
    // Layout problems are reported before anything else is loaded.
    MappingRoot::open(&args.directory).map_err(walk_error)?;

    let schema_dir = resolve_schema_dir(args.schema_dir.as_deref())?;
    let schemas = SchemaSet::load(
        &schema_dir,
        ValidatorConfig {
            strict_mode: args.strict,
            ..ValidatorConfig::default()
        },
    )?;
    let walker = Walker::with_options(schemas.globals, schemas.mappings, args.walk_options());

    let result = if args.verbose {
        // Keep stdout parseable when it carries the JSON report.
        let out: Box<dyn Write> = match format {
            OutputFormat::Json => Box::new(std::io::stderr()),
            OutputFormat::Text | OutputFormat::Table => Box::new(std::io::stdout()),
        };
        walker.run(&args.directory, &mut VerboseProgress::new(out))
    } else {
        walker.run(&args.directory, &mut Silent)
    };
    let report = result.map_err(walk_error)?;

    print_report(&report, format);
    outcome(&report)
}

fn outcome(report: &WalkReport) -> CliResult<i32> {
    match report.first_error() {
        None => Ok(SUCCESS),
        Some(first) => Err(CliError::new(
            schema_error_code(first),
            format!(
                "{} of {} checked documents failed validation",
                report.failure_count(),
                report.files_checked()
            ),
        )),
    }
}

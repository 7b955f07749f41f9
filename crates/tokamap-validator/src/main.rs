mod exit;
mod logging;
mod output;
mod progress;
mod schemas;
mod validate;

use clap::Parser;

use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;
use crate::validate::ValidateArgs;

#[derive(Parser, Debug)]
#[command(
    name = "tokamap-validator",
    version,
    about = "Validate a TokaMap mapping directory"
)]
struct Cli {
    #[command(flatten)]
    validate: ValidateArgs,

    /// Report format (stdout).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", env = "TOKAMAP_LOG_LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match validate::run(cli.validate, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{EmitCommandInput, run_emit, run_levels, run_services};
use error::{CliError, ExitCode};
use fanlog_domain::{ServiceName, SeverityLevel};
use format::OutputArgs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fanlog",
    version,
    about = "Multi-transport leveled logger",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the severity table.
    Levels,
    /// Show the service registry.
    Services,
    /// Emit one record through every enabled sink.
    Emit {
        /// Registered service name (e.g. `WberReport`).
        #[arg(long, conflicts_with_all = ["tag", "name", "filename", "topic_id"])]
        service: Option<ServiceName>,
        /// Short service code, for unregistered services.
        #[arg(long)]
        tag: Option<String>,
        /// Full service name, for unregistered services.
        #[arg(long)]
        name: Option<String>,
        /// Log file stem, for unregistered services.
        #[arg(long)]
        filename: Option<String>,
        /// Alert topic id, for unregistered services.
        #[arg(long)]
        topic_id: Option<u64>,
        /// Calling-context name stamped on the record.
        #[arg(long = "fn")]
        fn_name: Option<String>,
        /// Severity level.
        #[arg(long, default_value = "info")]
        level: SeverityLevel,
        /// Message body.
        #[arg(long)]
        message: String,
        /// JSON payload attached to the record.
        #[arg(long)]
        data: Option<String>,
        /// Transport configuration as JSON.
        #[arg(long)]
        config: Option<String>,
        /// Override the deployment environment.
        #[arg(long)]
        environment: Option<String>,
        /// Alert regardless of the configured alert level.
        #[arg(long)]
        force_alert: bool,
        /// Record network deliveries instead of sending them.
        #[arg(long)]
        dry_run: bool,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(cli: Cli) -> Result<CliOutput, CliError> {
    let format = cli.output.output;
    match cli.command {
        Commands::Levels => run_levels(format),
        Commands::Services => run_services(format),
        Commands::Emit {
            service,
            tag,
            name,
            filename,
            topic_id,
            fn_name,
            level,
            message,
            data,
            config,
            environment,
            force_alert,
            dry_run,
        } => run_emit(
            format,
            &EmitCommandInput {
                service,
                tag,
                name,
                filename,
                topic_id,
                fn_name,
                level,
                message,
                data,
                config,
                environment,
                force_alert,
                dry_run,
            },
        ),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

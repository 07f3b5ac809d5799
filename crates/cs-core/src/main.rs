//! cisp-stats - vehicle recovery statistics per police precinct (RJ)
//!
//! Commands:
//! - `run` (default): fetch the ISP-RJ file, print the report, write the chart
//! - `config show|schema|validate`: inspect configuration
//! - `version`

use clap::{Args, Parser, Subcommand};
use cs_common::{format_error_human, Error, OutputFormat, StructuredError};
use cs_config::{config_schema, load_config, validate_config, ConfigError, ResolvedConfig};
use cs_core::exit_codes::ExitCode;
use cs_core::log_event;
use cs_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage,
};
use cs_core::pipeline;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Descriptive statistics of vehicle recoveries per police precinct in Rio de Janeiro
#[derive(Parser)]
#[command(name = "cisp-stats")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to config.json
    #[arg(long, global = true, env = "CISP_STATS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, analyze and report (default)
    Run(RunArgs),

    /// Inspect and validate configuration
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Source location: http(s) URL, file:// URL or local path
    #[arg(long)]
    source: Option<String>,

    /// Source character encoding label (e.g. iso-8859-1, utf-8)
    #[arg(long)]
    encoding: Option<String>,

    /// Where to write the SVG chart
    #[arg(long, conflicts_with = "no_chart")]
    chart: Option<PathBuf>,

    /// Skip the chart
    #[arg(long)]
    no_chart: bool,

    /// Length of the top/bottom rankings
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Print the JSON schema for config.json
    Schema,
    /// Validate a configuration file
    Validate {
        /// File to validate (defaults to the resolved config)
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let exit_code = match cli.command {
        None => run_pipeline(&cli.global, &RunArgs::default()),
        Some(Commands::Run(args)) => run_pipeline(&cli.global, &args),
        Some(Commands::Config(args)) => run_config(&cli.global, &args),
        Some(Commands::Version) => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run_pipeline(global: &GlobalOpts, args: &RunArgs) -> ExitCode {
    let ctx = LogContext::new(generate_run_id());

    let resolved = match load_config(global.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(global, &config_error(e)),
    };
    log_config_source(&ctx, &resolved);

    let mut config = resolved.config;
    if let Some(source) = &args.source {
        config.source.url = source.clone();
    }
    if let Some(encoding) = &args.encoding {
        config.source.encoding = encoding.clone();
    }
    if let Some(top) = args.top {
        config.report = config.report.with_top_n(top);
    }
    if let Some(chart) = &args.chart {
        config.report = config.report.with_chart_path(chart.clone());
    }
    if args.no_chart {
        config.report = config.report.with_chart(false);
    }
    if let Err(e) = validate_config(&config) {
        return output_error(global, &Error::InvalidConfig(e.to_string()));
    }

    let config_hash = resolved
        .snapshot
        .from_file()
        .then(|| resolved.snapshot.short_id().to_string());

    match pipeline::run(&config, config_hash, global.format, &ctx) {
        Ok(outcome) => {
            print_payload(&outcome.output);
            outcome.exit_code
        }
        Err(e) => output_error(global, &e),
    }
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> ExitCode {
    match &args.command {
        ConfigCommands::Show => run_config_show(global),
        ConfigCommands::Schema => {
            print_json(&config_schema());
            ExitCode::Clean
        }
        ConfigCommands::Validate { path } => {
            run_config_validate(global, path.as_deref().or(global.config.as_deref()))
        }
    }
}

/// Display the resolved configuration (defaults when no file is present).
fn run_config_show(global: &GlobalOpts) -> ExitCode {
    let resolved = match load_config(global.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(global, &config_error(e)),
    };

    let response = serde_json::json!({
        "snapshot": resolved.snapshot,
        "config": resolved.config,
    });
    print_json(&response);
    ExitCode::Clean
}

fn run_config_validate(global: &GlobalOpts, path: Option<&std::path::Path>) -> ExitCode {
    let resolved = match load_config(path) {
        Ok(resolved) => resolved,
        Err(e) => return output_error(global, &config_error(e)),
    };
    let snapshot = &resolved.snapshot;

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "status": "valid",
                "path": snapshot.path,
                "source": snapshot.source,
                "hash": snapshot.hash,
                "schema_version": snapshot.schema_version,
            });
            print_json(&response);
        }
        OutputFormat::Summary => {
            println!("config validate: OK ({})", snapshot.short_id());
        }
        OutputFormat::Text => {
            println!("Status: ✓ Valid");
            match &snapshot.path {
                Some(path) => println!("Config: {} ({})", path, snapshot.source),
                None => println!("Config: using built-in defaults"),
            }
        }
    }

    ExitCode::Clean
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "cisp_stats_version": env!("CARGO_PKG_VERSION"),
                "config_schema_version": cs_config::CONFIG_SCHEMA_VERSION,
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            });
            print_json(&version_info);
        }
        _ => {
            println!("cisp-stats {}", env!("CARGO_PKG_VERSION"));
            println!("config schema version: {}", cs_config::CONFIG_SCHEMA_VERSION);
        }
    }
}

fn log_config_source(ctx: &LogContext, resolved: &ResolvedConfig) {
    match &resolved.snapshot.path {
        Some(path) => log_event!(
            ctx,
            INFO,
            event_names::CONFIG_LOADED,
            Stage::Init,
            "Configuration loaded",
            path = path.as_str(),
            source = resolved.snapshot.source.as_str()
        ),
        None => log_event!(
            ctx,
            DEBUG,
            event_names::CONFIG_DEFAULT_USED,
            Stage::Init,
            "No config file found; using built-in defaults"
        ),
    }
}

fn config_error(err: ConfigError) -> Error {
    match err {
        ConfigError::NotFound { .. } => Error::Config(err.to_string()),
        ConfigError::Invalid { .. } | ConfigError::ValidationError(_) => {
            Error::InvalidConfig(err.to_string())
        }
    }
}

/// Print an error on stderr and pick the exit code.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            eprintln!("{}", StructuredError::from(err).to_json());
        }
        _ => {
            let use_color = std::io::stderr().is_terminal();
            eprintln!("{}", format_error_human(err, use_color));
        }
    }
    ExitCode::for_error(err)
}

fn print_payload(output: &str) {
    if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{}", format_error_human(&Error::Json(e), false)),
    }
}

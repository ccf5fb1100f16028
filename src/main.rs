//! CLI entry point for schemagate.
//!
//! Resolves generator inputs, finds connection strings and computes the
//! build fingerprint that gates code generation.

use clap::{
    Args, Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use console::style;
use schemagate::connection::ConnectionContext;
use schemagate::fingerprint::{FingerprintInputs, SchemaInput, compute_fingerprint};
use schemagate::io::{ExitCode, JsonResponse, OutputFormat};
use schemagate::resolve::{
    ResolutionContext, build_candidate_names, resolve_directory, resolve_file,
};
use schemagate::{SchemagateError, Settings, resolve_connection_string};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::Level;

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Build gate for schema-to-code generation
#[derive(Parser)]
#[command(
    name = "schemagate",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve generator inputs and decide whether code generation can be skipped",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Path to a custom schemagate.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Write a default schemagate.toml into the project directory")]
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Display effective settings")]
    Config,

    #[command(
        name = "resolve-file",
        about = "Locate a file through override, project, solution and defaults tiers",
        after_help = "Examples:\n  schemagate resolve-file efcpt-config.json\n  schemagate resolve-file --override config/custom.json efcpt-config.json"
    )]
    ResolveFile(ResolveArgs),

    #[command(name = "resolve-dir", about = "Locate a directory through the same tiers")]
    ResolveDir(ResolveArgs),

    #[command(
        name = "connection-string",
        about = "Find the database connection string, if one is configured"
    )]
    ConnectionString(ConnectionArgs),

    #[command(
        about = "Compute the build fingerprint and report whether inputs changed",
        after_help = "Note: the config file, renaming file and template directory must resolve \
                      through the override, project, solution or defaults tiers; a missing one \
                      fails with exit code 3 instead of fingerprinting as empty."
    )]
    Fingerprint(FingerprintArgs),
}

#[derive(Args)]
struct ResolveArgs {
    /// Explicit override path or name
    #[arg(long = "override")]
    override_path: Option<String>,

    /// Solution directory, relative to the project
    #[arg(long)]
    solution: Option<String>,

    /// Skip the solution directory tier
    #[arg(long)]
    no_solution_probe: bool,

    /// Packaged defaults directory
    #[arg(long)]
    defaults: Option<PathBuf>,

    /// Candidate names, highest priority first
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Connection string to use verbatim
    #[arg(long)]
    value: Option<String>,

    /// Explicit JSON settings file
    #[arg(long)]
    settings_file: Option<String>,

    /// Explicit XML app/web config file
    #[arg(long)]
    config_file: Option<String>,

    /// Connection string name
    #[arg(long)]
    name: Option<String>,

    /// JSON key path, e.g. ConnectionStrings:Default
    #[arg(long)]
    key_path: Option<String>,
}

#[derive(Args)]
struct FingerprintArgs {
    /// Schema artifact (dacpac)
    #[arg(
        long,
        conflicts_with = "schema_fingerprint",
        required_unless_present = "schema_fingerprint"
    )]
    schema: Option<PathBuf>,

    /// Schema fingerprint computed elsewhere (connection mode)
    #[arg(long)]
    schema_fingerprint: Option<String>,

    /// Generator configuration override
    #[arg(long)]
    config_file: Option<String>,

    /// Renaming rules override
    #[arg(long)]
    renaming_file: Option<String>,

    /// Template directory override
    #[arg(long)]
    template_dir: Option<String>,

    /// Cache file (defaults to settings)
    #[arg(long)]
    cache_file: Option<PathBuf>,

    /// Generator version folded into the fingerprint
    #[arg(long)]
    tool_version: Option<String>,

    /// Configuration property override, KEY=VALUE (repeatable)
    #[arg(long = "set", value_parser = parse_key_value)]
    overrides: Vec<(String, String)>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

#[derive(Serialize)]
struct ResolvedPathOutput {
    path: PathBuf,
}

#[derive(Serialize)]
struct ConnectionOutput {
    connection_string: Option<String>,
    source: Option<schemagate::ConnectionSource>,
}

fn main() {
    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    let code = match run(&cli, format) {
        Ok(code) => code,
        Err(e) => {
            let code = e.exit_code();
            if format.is_json() {
                let response = JsonResponse::from_error(&e);
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{json}"),
                    Err(_) => eprintln!("Error: {e}"),
                }
            } else {
                eprintln!("{} {e}", error_label(code));
            }
            code
        }
    };

    std::process::exit(code.into());
}

fn error_label(code: ExitCode) -> String {
    style(format!("Error ({}):", code.description()))
        .red()
        .bold()
        .to_string()
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: &Cli, format: OutputFormat) -> Result<ExitCode, SchemagateError> {
    let settings = Settings::load_from(&cli.project, cli.config.as_deref())?;
    init_logging(cli.verbose || settings.debug);

    match &cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(&cli.project, *force).map_err(|e| {
                SchemagateError::Io(std::io::Error::other(e.to_string()))
            })?;
            emit(format, &ResolvedPathOutput { path: path.clone() }, || {
                println!("Created configuration file at: {}", path.display());
            });
        }

        Commands::Config => {
            if format.is_json() {
                print_json(&settings);
            } else {
                match toml::to_string_pretty(&settings) {
                    Ok(toml_str) => println!("{toml_str}"),
                    Err(e) => eprintln!("Error displaying config: {e}"),
                }
            }
        }

        Commands::ResolveFile(args) => {
            let path = resolve_file(&resolve_context(&cli.project, &settings, args))?;
            emit(format, &ResolvedPathOutput { path: path.clone() }, || {
                println!("{}", path.display());
            });
        }

        Commands::ResolveDir(args) => {
            let path = resolve_directory(&resolve_context(&cli.project, &settings, args))?;
            emit(format, &ResolvedPathOutput { path: path.clone() }, || {
                println!("{}", path.display());
            });
        }

        Commands::ConnectionString(args) => {
            let ctx = ConnectionContext {
                project_dir: cli.project.clone(),
                explicit_value: args.value.clone(),
                settings_file: args.settings_file.clone(),
                config_file: args.config_file.clone(),
                name: args
                    .name
                    .clone()
                    .unwrap_or_else(|| settings.connection.name.clone()),
                key_path: args
                    .key_path
                    .clone()
                    .or_else(|| settings.connection.key_path.clone()),
            };
            let resolved = resolve_connection_string(&ctx);
            let output = ConnectionOutput {
                connection_string: resolved.as_ref().map(|r| r.connection_string.clone()),
                source: resolved.map(|r| r.source),
            };
            emit(format, &output, || match &output.connection_string {
                Some(value) => println!("{value}"),
                None => eprintln!(
                    "{}",
                    style("No connection string configured; use database project mode").dim()
                ),
            });
        }

        Commands::Fingerprint(args) => {
            let outcome = run_fingerprint(&cli.project, &settings, args)?;
            emit(format, &outcome, || {
                println!("{}", outcome.fingerprint);
                if outcome.has_changed {
                    println!("{}", style("changed").yellow().bold());
                } else {
                    println!("{}", style("unchanged").green());
                }
            });
        }
    }

    Ok(ExitCode::Success)
}

fn resolve_context(project: &Path, settings: &Settings, args: &ResolveArgs) -> ResolutionContext {
    let names = build_candidate_names(args.override_path.as_deref(), &args.names);
    ResolutionContext::new(project, names)
        .with_override(args.override_path.clone())
        .with_solution_dir(
            args.solution
                .clone()
                .or_else(|| settings.resources.solution_dir.clone()),
            settings.resources.probe_solution_dir && !args.no_solution_probe,
        )
        .with_defaults_root(
            args.defaults
                .clone()
                .or_else(|| settings.resources.defaults_root.clone()),
        )
}

fn input_context(
    project: &Path,
    settings: &Settings,
    override_path: Option<&str>,
    fallbacks: &[String],
) -> ResolutionContext {
    ResolutionContext::new(project, build_candidate_names(override_path, fallbacks))
        .with_override(override_path)
        .with_solution_dir(
            settings.resources.solution_dir.clone(),
            settings.resources.probe_solution_dir,
        )
        .with_defaults_root(settings.resources.defaults_root.clone())
}

fn run_fingerprint(
    project: &Path,
    settings: &Settings,
    args: &FingerprintArgs,
) -> Result<schemagate::FingerprintOutcome, SchemagateError> {
    let resources = &settings.resources;
    let config_file = resolve_file(&input_context(
        project,
        settings,
        args.config_file.as_deref(),
        &resources.config_names,
    ))?;
    let renaming_file = resolve_file(&input_context(
        project,
        settings,
        args.renaming_file.as_deref(),
        &resources.renaming_names,
    ))?;
    let template_dir = resolve_directory(&input_context(
        project,
        settings,
        args.template_dir.as_deref(),
        &resources.template_dir_names,
    ))?;

    let schema = match (&args.schema, &args.schema_fingerprint) {
        (Some(path), _) => SchemaInput::Artifact(project.join(path)),
        (None, Some(value)) => SchemaInput::Fingerprint(value.clone()),
        (None, None) => SchemaInput::Fingerprint(String::new()),
    };

    let mut inputs = FingerprintInputs::new(schema);
    inputs.config_file = Some(config_file);
    inputs.renaming_file = Some(renaming_file);
    inputs.template_dir = Some(template_dir);
    inputs.tool_version = args
        .tool_version
        .clone()
        .or_else(|| settings.fingerprint.tool_version.clone());
    inputs.overrides = args.overrides.iter().cloned().collect::<BTreeMap<_, _>>();

    let cache_file = match &args.cache_file {
        Some(path) => project.join(path),
        None => settings.cache_file(project),
    };

    Ok(compute_fingerprint(&inputs, &cache_file)?)
}

fn emit<T: Serialize>(format: OutputFormat, data: &T, text: impl FnOnce()) {
    if format.is_json() {
        print_json(data);
    } else {
        text();
    }
}

fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(&JsonResponse::success(data)) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing output: {e}"),
    }
}

//! Clap derive structures for the `boardwatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// boardwatch -- device telemetry and configuration from the command line
#[derive(Debug, Parser)]
#[command(
    name = "boardwatch",
    version,
    about = "Watch embedded device telemetry and edit its network configuration",
    long_about = "A CLI dashboard for embedded boards exposing the submodel API.\n\n\
        Polls SystemInformation for CPU, temperature, and RAM history,\n\
        and drives an edit-commit workflow over NetworkConfiguration.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Device profile to use
    #[arg(long, short = 'p', env = "BOARDWATCH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device base URL (overrides profile)
    #[arg(long, short = 'd', env = "BOARDWATCH_DEVICE", global = true)]
    pub device: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "BOARDWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "BOARDWATCH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "BOARDWATCH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the submodels the device exposes
    #[command(alias = "sub")]
    Submodels,

    /// View live telemetry
    #[command(alias = "sys", alias = "s")]
    System(SystemArgs),

    /// View and edit the network configuration
    #[command(alias = "net", alias = "n")]
    Network(NetworkArgs),

    /// Manage boardwatch configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── System ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SystemArgs {
    #[command(subcommand)]
    pub command: SystemCommand,
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Fetch the current telemetry once
    Info,

    /// Poll telemetry continuously until interrupted
    Watch(WatchArgs),
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Polling cadence in seconds (default: the configured poll interval)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Stop after this many applied fetches (default: run until Ctrl-C)
    #[arg(long)]
    pub count: Option<u64>,
}

// ── Network ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NetworkArgs {
    #[command(subcommand)]
    pub command: NetworkCommand,
}

#[derive(Debug, Subcommand)]
pub enum NetworkCommand {
    /// Show the current network configuration
    Show,

    /// Edit interface fields and save in one commit
    Set(NetworkSetArgs),
}

#[derive(Debug, Args)]
pub struct NetworkSetArgs {
    /// Interface to edit (e.g. eth0)
    pub interface: String,

    /// Field assignments, `FIELD=VALUE` (repeatable)
    #[arg(required = true, value_parser = parse_assignment)]
    pub assignments: Vec<Assignment>,
}

/// One `FIELD=VALUE` pair from the command line.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub field: String,
    pub value: String,
}

fn parse_assignment(raw: &str) -> Result<Assignment, String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    if field.is_empty() {
        return Err(format!("empty field name in '{raw}'"));
    }
    Ok(Assignment {
        field: field.to_owned(),
        value: value.to_owned(),
    })
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a device profile
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// List profile names
    Profiles,
}

#[derive(Debug, Args)]
pub struct ConfigInitArgs {
    /// Device base URL for the profile
    #[arg(long)]
    pub device: String,

    /// Profile name
    #[arg(long, default_value = "default")]
    pub name: String,

    /// Mark the profile as the default
    #[arg(long)]
    pub make_default: bool,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

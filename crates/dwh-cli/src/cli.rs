//! Clap derive structures for the `dwh` CLI.
//!
//! Defines the command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// dwh -- query Portal relay analytics from the Data Warehouse
#[derive(Debug, Parser)]
#[command(
    name = "dwh",
    version,
    about = "Query Portal relay analytics from the Data Warehouse",
    long_about = "A CLI for the Portal Data Warehouse analytics API.\n\n\
        Fetches relay totals per portal application or per account over a\n\
        date range, authenticated with a warehouse API key.",
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
    /// Warehouse profile to use
    #[arg(long, short = 'p', env = "DWH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Warehouse base URL (overrides profile)
    #[arg(long, short = 'u', env = "DWH_API_URL", global = true)]
    pub url: Option<String>,

    /// Warehouse API key
    #[arg(long, env = "DWH_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DWH_OUTPUT",
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
    #[arg(long, short = 'k', env = "DWH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "DWH_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
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
    /// Plain text, one identifier per line (scripting)
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
    /// Query relay totals
    #[command(alias = "r")]
    Relays(RelaysArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ── Relays ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RelaysArgs {
    #[command(subcommand)]
    pub command: RelaysCommand,
}

#[derive(Debug, Subcommand)]
pub enum RelaysCommand {
    /// Total relays per portal application
    #[command(name = "portal-apps", alias = "apps")]
    PortalApps(RelaysQuery),

    /// Total relays per account
    #[command(alias = "accts")]
    Accounts(RelaysQuery),
}

#[derive(Debug, Args)]
pub struct RelaysQuery {
    /// Range start (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Range end (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub to: Option<String>,

    /// Identifiers to filter on
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,
    /// Show the resolved configuration (API keys redacted)
    Show,
}

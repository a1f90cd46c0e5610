//! Clap derive structures for the `hotelops` CLI.
//!
//! Defines the command tree, global flags, and shared filter arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use hotelops_core::Resource;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// hotelops -- hotel back-office lists, records, and reports
#[derive(Debug, Parser)]
#[command(
    name = "hotelops",
    version,
    about = "Browse and manage hotel back-office records from the command line",
    long_about = "Lists employees, advances, expenses, materials, payment ledgers and \
        reports page by page with the same filters the back-office screens use, \
        and exports them as printable HTML.",
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
    /// Profile to use
    #[arg(long, short = 'p', env = "HOTELOPS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API root URL (overrides profile)
    #[arg(long, env = "HOTELOPS_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token (overrides profile and keyring)
    #[arg(long, env = "HOTELOPS_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "HOTELOPS_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "HOTELOPS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "HOTELOPS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Records per page (overrides profile)
    #[arg(long, env = "HOTELOPS_PER_PAGE", global = true, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub per_page: Option<u32>,
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
    /// Plain text, one id per line (scripting)
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
    /// List records page by page with filters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one record
    Get(GetArgs),

    /// Create a record from JSON
    Create(CreateArgs),

    /// Update a record from JSON
    Update(UpdateArgs),

    /// Delete a record
    #[command(alias = "rm")]
    Delete(GetArgs),

    /// Export a filtered list as a printable HTML report
    Export(ExportArgs),

    /// List hotels (shared reference data)
    Hotels,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Filters shared by `list` and `export`.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Hotel id or name (defaults to the profile's hotel)
    #[arg(long)]
    pub hotel: Option<String>,

    /// Employee id
    #[arg(long)]
    pub employee: Option<String>,

    /// Material id
    #[arg(long)]
    pub material: Option<String>,

    /// Platform id
    #[arg(long)]
    pub platform: Option<String>,

    /// Entry type / mode (e.g. credit, debit, cash)
    #[arg(long = "type")]
    pub mode: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<NaiveDate>,

    /// Free-text search
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// How far to scroll through the list.
#[derive(Debug, Default, Args)]
pub struct PagingArgs {
    /// Load this many pages (default: 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..), conflicts_with = "all")]
    pub pages: Option<u32>,

    /// Load every page
    #[arg(long, short = 'a')]
    pub all: bool,
}

impl PagingArgs {
    /// Page limit for scrolling: `None` means every page.
    pub fn limit(&self) -> Option<u32> {
        if self.all { None } else { Some(self.pages.unwrap_or(1)) }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub paging: PagingArgs,

    /// Columns to show (comma-separated field names)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    /// Record id
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    /// JSON object with the record fields, or @path to read it from a file
    #[arg(long, short = 'd')]
    pub data: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    /// Record id
    pub id: String,

    /// JSON object with the fields to change, or @path to read it from a file
    #[arg(long, short = 'd')]
    pub data: String,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(value_parser = parse_resource)]
    pub resource: Resource,

    #[command(flatten)]
    pub filters: FilterArgs,

    #[command(flatten)]
    pub paging: PagingArgs,

    /// Columns to include (comma-separated field names)
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Report title (defaults to the resource name)
    #[arg(long)]
    pub title: Option<String>,

    /// Output file; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken {
        /// Profile name (defaults to active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

// ── Value parsers ────────────────────────────────────────────────────

fn parse_resource(raw: &str) -> Result<Resource, String> {
    raw.parse::<Resource>().map_err(|_| {
        let known: Vec<&'static str> = Resource::all().map(Into::into).collect();
        format!("unknown resource '{raw}' (expected one of: {})", known.join(", "))
    })
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    hotelops_core::parse_date(raw).map_err(|e| e.to_string())
}

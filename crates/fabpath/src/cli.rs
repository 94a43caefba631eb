//! Clap derive structures for the `fabpath` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fabpath_core::ReportMode;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fabpath -- static path reports for fabric controllers
#[derive(Debug, Parser)]
#[command(
    name = "fabpath",
    version,
    about = "Report which VLANs are statically bound to which leaf interfaces",
    long_about = "Reads access port blocks and static path attachments from a fabric\n\
        controller, expands port-channel and vPC selectors to physical\n\
        interfaces, and writes interface-to-VLAN reports.",
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
    /// Controller profile to use
    #[arg(long, short = 'p', env = "FABPATH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "FABPATH_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Login user (overrides profile)
    #[arg(long, short = 'u', env = "FABPATH_USERNAME", global = true)]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "FABPATH_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FABPATH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Read class queries from a directory written by `fabpath dump`
    /// instead of a live controller
    #[arg(long, value_name = "DIR", env = "FABPATH_FROM_DUMP", global = true)]
    pub from_dump: Option<PathBuf>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FABPATH_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FABPATH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline and write report files
    Report(ReportArgs),

    /// List resolved interface bindings
    #[command(alias = "b")]
    Bindings(BindingsArgs),

    /// Show the per-interface tagged/untagged VLAN summary
    #[command(alias = "intf")]
    Interfaces(InterfacesArgs),

    /// Show the port-selector index
    Selectors,

    /// List static paths that reference unknown port selectors
    Bogus,

    /// Save raw class queries for offline use with --from-dump
    Dump(DumpArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REPORT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// Which representation to write
    #[arg(long, short = 'm', value_enum, default_value = "flat")]
    pub mode: ReportModeArg,

    /// Directory for report files (defaults to the configured out_dir)
    #[arg(long, short = 'd')]
    pub out_dir: Option<PathBuf>,

    /// Flat CSV file name
    #[arg(long, default_value = "static_paths.csv")]
    pub flat_file: String,

    /// Collated JSON file name
    #[arg(long, default_value = "interfaces.json")]
    pub collated_file: String,

    /// Diagnostics file name
    #[arg(long, default_value = "bogus_paths.txt")]
    pub diagnostics_file: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReportModeArg {
    /// One CSV row per interface binding
    Flat,
    /// JSON keyed by leaf and interface
    Collated,
    /// Both files
    Both,
}

impl From<ReportModeArg> for ReportMode {
    fn from(arg: ReportModeArg) -> Self {
        match arg {
            ReportModeArg::Flat => Self::Flat,
            ReportModeArg::Collated => Self::Collated,
            ReportModeArg::Both => Self::Both,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  QUERIES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BindingsArgs {
    /// Only bindings on this leaf node
    #[arg(long, short = 'n')]
    pub node: Option<String>,

    /// Only bindings for this EPG
    #[arg(long, short = 'e')]
    pub epg: Option<String>,
}

#[derive(Debug, Args)]
pub struct InterfacesArgs {
    /// Only interfaces on this leaf node
    #[arg(long, short = 'n')]
    pub node: Option<String>,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Directory to write `<class>.json` files into
    #[arg(long, short = 'd')]
    pub dir: PathBuf,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a password in the system keyring
    SetPassword {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

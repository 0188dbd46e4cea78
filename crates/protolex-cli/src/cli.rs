//! CLI argument parsing and command definitions.

use clap::{Args, Parser, Subcommand};
use protolex_core::{Category, Difficulty};

// ============================================================================
// CLI argument types
// ============================================================================

/// Build-time tooling for the protocol catalog.
#[derive(Parser, Debug)]
#[command(name = "protolex", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "PROTOLEX_CONFIG", global = true)]
    pub config: Option<String>,

    /// Protocol records (JSON file or directory); overrides `content.protocols`.
    #[arg(short, long, global = true)]
    pub data: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the corpus and print every violation.
    Validate {
        /// Treat dangling related-protocol references as fatal.
        #[arg(long)]
        strict: bool,

        /// Also validate authored quiz questions at this path.
        #[arg(long)]
        quiz: Option<String>,
    },

    /// Search the catalog.
    Search(SearchArgs),

    /// Reference graph operations.
    Graph(GraphCommand),

    /// Search index operations.
    Index(IndexCommand),

    /// Generate multiple-choice questions about a protocol.
    Quiz {
        /// Protocol id.
        id: String,

        /// Number of questions.
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,

        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Arguments of `search`.
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free text; every term must match.
    pub text: Option<String>,

    /// Restrict to one category label, e.g. "Security".
    #[arg(long)]
    pub category: Option<Category>,

    /// Restrict to one difficulty label.
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Restrict to protocols listening on this port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Page size.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Results to skip.
    #[arg(long)]
    pub offset: Option<usize>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Graph-specific subcommands.
#[derive(Parser, Debug)]
pub struct GraphCommand {
    #[command(subcommand)]
    pub command: GraphSubcommand,
}

/// Available graph subcommands.
#[derive(Subcommand, Debug)]
pub enum GraphSubcommand {
    /// Protocols linked to or from a protocol.
    Related {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Shortest reference path between two protocols.
    Path {
        from: String,
        to: String,

        #[arg(long)]
        json: bool,
    },

    /// Show graph statistics.
    Stats {
        #[arg(long)]
        json: bool,
    },

    /// Write the graph as JSON.
    Export {
        /// Output file path (defaults to `output.graph_path`).
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Index-specific subcommands.
#[derive(Parser, Debug)]
pub struct IndexCommand {
    #[command(subcommand)]
    pub command: IndexSubcommand,
}

/// Available index subcommands.
#[derive(Subcommand, Debug)]
pub enum IndexSubcommand {
    /// Build the search index and write it to disk.
    Build {
        /// Output file path (defaults to `output.index_path`).
        #[arg(short, long)]
        output: Option<String>,

        /// Check index freshness without rebuilding.
        #[arg(long)]
        check: bool,
    },
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

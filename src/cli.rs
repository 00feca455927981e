use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Gridlock - deadlock detection and resource-allocation analysis
#[derive(Parser, Debug)]
#[command(name = "gridlock")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'gridlock shell' for an interactive session.")]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the safety algorithm over a scenario and report the outcome
    Detect {
        /// Scenario file (JSON) to analyze
        #[arg(short, long, conflicts_with = "example")]
        scenario: Option<PathBuf>,

        /// Analyze the built-in example scenario
        #[arg(long)]
        example: bool,

        /// Use the wait-cycle search instead of the safety algorithm
        /// (only sound when every resource is single-instance)
        #[arg(long, hide = true)]
        via_cycles: bool,
    },

    /// Show allocation/request matrices and available resources
    Show {
        /// Scenario file (JSON) to display
        #[arg(short, long, conflicts_with = "example")]
        scenario: Option<PathBuf>,

        /// Display the built-in example scenario
        #[arg(long)]
        example: bool,
    },

    /// Project a scenario into a node/edge graph
    Graph {
        /// Scenario file (JSON) to project
        #[arg(short, long, conflicts_with = "example")]
        scenario: Option<PathBuf>,

        /// Project the built-in example scenario
        #[arg(long)]
        example: bool,

        /// Emit Graphviz DOT instead of JSON
        #[arg(long)]
        dot: bool,
    },

    /// Write the built-in example scenario as JSON
    Example {
        /// Destination file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Interactive line-oriented shell for editing and analyzing a system
    Shell,
}

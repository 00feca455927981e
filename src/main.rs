//! Gridlock CLI - deadlock detection and resource-allocation analysis
//!
//! Usage: gridlock <COMMAND>
//!
//! Commands:
//!   detect   Run the safety algorithm over a scenario
//!   show     Show allocation/request matrices and available resources
//!   graph    Project a scenario into a node/edge graph
//!   example  Write the built-in example scenario
//!   shell    Interactive line-oriented session

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Detect {
            scenario,
            example,
            via_cycles,
        } => commands::detect::cmd_detect(
            scenario.as_deref(),
            example,
            via_cycles,
            cli.json,
            cli.verbose,
        ),
        Commands::Show { scenario, example } => {
            commands::show::cmd_show(scenario.as_deref(), example, cli.json)
        }
        Commands::Graph {
            scenario,
            example,
            dot,
        } => commands::graph::cmd_graph(scenario.as_deref(), example, dot, cli.json),
        Commands::Example { out } => commands::example::cmd_example(out.as_deref(), cli.json),
        Commands::Shell => commands::shell::cmd_shell(),
    }
}

//! Subcommand implementations, one module per command

pub mod detect;
pub mod example;
pub mod graph;
pub mod shell;
pub mod show;

use std::path::Path;

use anyhow::{bail, Context, Result};
use gridlock::{ResourceManager, Scenario};

/// Build a manager from the `--scenario`/`--example` flags shared by the
/// read-only subcommands
pub fn load_manager(scenario: Option<&Path>, example: bool) -> Result<ResourceManager> {
    let mut manager = ResourceManager::new();

    if example {
        manager.load_example();
        return Ok(manager);
    }

    let Some(path) = scenario else {
        bail!("provide a scenario with --scenario <FILE>, or use --example");
    };

    let doc = Scenario::load(path)
        .with_context(|| format!("failed to load scenario from {}", path.display()))?;
    doc.apply(&mut manager)
        .with_context(|| format!("invalid scenario in {}", path.display()))?;
    Ok(manager)
}

use std::path::Path;

use anyhow::{Context, Result};
use gridlock::Scenario;

use crate::ui;

pub fn cmd_example(out: Option<&Path>, json: bool) -> Result<()> {
    let scenario = Scenario::example();

    match out {
        Some(path) => {
            scenario
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if json {
                ui::json::emit(serde_json::json!({
                    "event": "complete",
                    "command": "example",
                    "path": path.display().to_string(),
                }))?;
            } else {
                println!("Wrote example scenario to {}", path.display());
            }
        }
        None => {
            println!("{}", serde_json::to_string_pretty(&scenario)?);
        }
    }
    Ok(())
}

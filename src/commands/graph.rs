use std::path::Path;

use anyhow::Result;
use gridlock::project_graph;

use crate::ui;

pub fn cmd_graph(scenario: Option<&Path>, example: bool, dot: bool, json: bool) -> Result<()> {
    let manager = super::load_manager(scenario, example)?;
    let graph = project_graph(manager.matrix());

    if dot {
        print!("{}", graph.to_dot());
        return Ok(());
    }

    if json {
        ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "graph",
            "graph": graph,
        }))?;
    } else {
        println!("{}", serde_json::to_string_pretty(&graph)?);
    }
    Ok(())
}

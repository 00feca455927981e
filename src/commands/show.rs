use std::path::Path;

use anyhow::Result;
use gridlock::{AllocationMatrix, Scenario};

use crate::ui;

pub fn cmd_show(scenario: Option<&Path>, example: bool, json: bool) -> Result<()> {
    let manager = super::load_manager(scenario, example)?;
    let matrix = manager.matrix();

    if json {
        ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "show",
            "scenario": Scenario::from_manager(&manager),
            "available": manager.get_available_resources(),
        }))?;
        return Ok(());
    }

    if matrix.is_empty() {
        println!("No processes or resources defined yet");
        return Ok(());
    }

    print!("{}", render_matrices(matrix));
    println!("\nAvailable Resources:");
    print!("{}", ui::table::render_available(&manager.get_available_resources()));
    Ok(())
}

/// Allocation and request tables, in insertion order
pub fn render_matrices(matrix: &AllocationMatrix) -> String {
    let columns: Vec<String> = matrix.resources.iter().map(|r| r.id.clone()).collect();

    let allocation_rows: Vec<(String, Vec<u32>)> = matrix
        .processes
        .iter()
        .map(|p| {
            let values = matrix.resources.iter().map(|r| p.allocated(&r.id)).collect();
            (p.id.clone(), values)
        })
        .collect();
    let request_rows: Vec<(String, Vec<u32>)> = matrix
        .processes
        .iter()
        .map(|p| {
            let values = matrix.resources.iter().map(|r| p.requested(&r.id)).collect();
            (p.id.clone(), values)
        })
        .collect();

    let mut out = String::new();
    out.push_str("Allocation Matrix:\n");
    out.push_str(&ui::table::render_matrix("", &columns, &allocation_rows));
    out.push_str("\nRequest Matrix:\n");
    out.push_str(&ui::table::render_matrix("", &columns, &request_rows));
    out
}

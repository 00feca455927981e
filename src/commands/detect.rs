use std::path::Path;

use anyhow::Result;
use gridlock::{detect_deadlock, find_wait_cycle};

use crate::ui;

pub fn cmd_detect(
    scenario: Option<&Path>,
    example: bool,
    via_cycles: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let manager = super::load_manager(scenario, example)?;
    let snapshot = manager.snapshot();

    if via_cycles {
        return cmd_detect_via_cycles(&snapshot, json);
    }

    let result = detect_deadlock(&snapshot);

    if json {
        ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "detect",
            "deadlocked": &result.deadlocked,
            "safe_sequence": &result.safe_sequence,
            "steps": &result.steps,
        }))?;
    } else {
        print!("{}", ui::report::render_detection(&result));
        if verbose > 0 {
            println!("\n({} processes, {} resources, {} steps)",
                snapshot.processes.len(),
                snapshot.resources.len(),
                result.steps.len());
        }
    }

    // Non-zero exit on deadlock so scripts can branch on the outcome.
    if result.is_deadlocked() {
        std::process::exit(1);
    }
    Ok(())
}

/// Debug alternative: wait-cycle search over single-instance resources.
/// Unsound for multi-instance resources; kept behind a hidden flag.
fn cmd_detect_via_cycles(snapshot: &gridlock::AllocationMatrix, json: bool) -> Result<()> {
    let cycle = find_wait_cycle(snapshot);

    if json {
        ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "detect",
            "strategy": "cycles",
            "cycle": &cycle,
        }))?;
    } else {
        println!("Wait-cycle search (single-instance resources only; illustrative)");
        match &cycle {
            Some(nodes) => println!("Cycle found: {}", nodes.join(" → ")),
            None => println!("No cycle found."),
        }
    }

    if cycle.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

//! Detection-trace rendering shared by `detect` and the shell

use std::collections::BTreeMap;

use gridlock::DetectionResult;

/// Render the outcome banner and the full step-by-step explanation
pub fn render_detection(result: &DetectionResult) -> String {
    let mut out = String::new();
    let rule = "=".repeat(50);

    out.push_str(&rule);
    out.push('\n');
    if result.is_deadlocked() {
        out.push_str(&format!(
            "DEADLOCK DETECTED! Processes involved: {}\n",
            result.deadlocked.join(", ")
        ));
    } else {
        out.push_str("No deadlock detected.\n");
        let sequence = result.safe_sequence.as_deref().unwrap_or(&[]);
        if sequence.is_empty() {
            out.push_str("Safe sequence: (no processes)\n");
        } else {
            out.push_str(&format!("Safe sequence: {}\n", sequence.join(" → ")));
        }
    }
    out.push_str(&rule);
    out.push('\n');

    out.push_str("\nStep-by-step explanation:\n");
    for (i, step) in result.steps.iter().enumerate() {
        out.push_str(&format!("\nStep {}: {}\n", i + 1, step.description));
        if !step.processed_this_round.is_empty() {
            out.push_str(&format!(
                "Processed: {}\n",
                step.processed_this_round.join(", ")
            ));
        }
        out.push_str(&format!(
            "Available resources: {}\n",
            format_available(&step.available_resources)
        ));
        if !step.remaining_processes.is_empty() {
            out.push_str(&format!(
                "Remaining processes: {}\n",
                step.remaining_processes.join(", ")
            ));
        }
    }
    out
}

fn format_available(available: &BTreeMap<String, u32>) -> String {
    if available.is_empty() {
        return "(none)".to_string();
    }
    available
        .iter()
        .map(|(id, count)| format!("{}={}", id, count))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Deadlock Detector
//!
//! Pure, deterministic functions from an `AllocationMatrix` snapshot to a
//! `DetectionResult`. Nothing here mutates the input or touches I/O; run it
//! twice on the same snapshot and you get the same answer.
//!
//! `detect_deadlock` is the canonical detector: a single-resolution-per-round
//! variant of the Banker's safety algorithm, producing a readable step trace.
//!
//! `find_wait_cycle` is an illustrative alternative based on cycle search in
//! the resource↔process wait graph. A cycle implies deadlock ONLY when every
//! resource involved has a single instance; with multi-instance resources it
//! produces false positives. It exists for debugging and teaching, never as
//! the primary contract.

use std::collections::{BTreeMap, HashSet};

use crate::models::{AllocationMatrix, DetectionResult, DetectionStep};

/// Run the safety algorithm over a snapshot of the allocation model
///
/// Availability is always recomputed from totals and allocations; any
/// externally tracked "available" value is ignored. Each round scans the
/// processes in insertion order and resolves the first one whose every
/// request fits the current availability (zero requests are vacuously
/// satisfied), releasing what it *holds* back into the pool. One resolution
/// per round keeps the trace readable.
///
/// Never fails for a well-formed matrix: an empty system is trivially safe
/// with an empty sequence.
pub fn detect_deadlock(matrix: &AllocationMatrix) -> DetectionResult {
    let mut available = matrix.available_resources();

    let all_ids: Vec<String> = matrix.processes.iter().map(|p| p.id.clone()).collect();
    let mut finished: HashSet<String> = HashSet::new();
    let mut safe_sequence: Vec<String> = Vec::new();
    let mut steps: Vec<DetectionStep> = Vec::new();

    steps.push(DetectionStep::new(
        "Initial available resources",
        all_ids.clone(),
        available.clone(),
        vec![],
    ));

    loop {
        let Some(process) = matrix
            .processes
            .iter()
            .find(|p| !finished.contains(&p.id) && can_finish(p, &available))
        else {
            break;
        };

        // Completion returns what the process holds, not what it requested.
        for (resource_id, &held) in &process.allocation {
            *available.entry(resource_id.clone()).or_insert(0) += held;
        }
        finished.insert(process.id.clone());
        safe_sequence.push(process.id.clone());

        let mut description = format!(
            "Process {} can be executed with the available resources.",
            process.id
        );
        if process.request.values().any(|&v| v > 0) {
            description.push_str(" Its resource requests can be satisfied.");
        }
        description.push_str(&format!(
            " After completion, {} releases its resources.",
            process.id
        ));

        steps.push(DetectionStep::new(
            description,
            remaining(&all_ids, &finished),
            available.clone(),
            vec![process.id.clone()],
        ));
    }

    if finished.len() < matrix.processes.len() {
        // Still-unfinished processes never completed, so they keep their
        // original insertion order.
        let deadlocked = remaining(&all_ids, &finished);
        steps.push(DetectionStep::new(
            format!(
                "No process can be satisfied with the available resources. \
                 Deadlock detected involving processes: {}",
                deadlocked.join(", ")
            ),
            deadlocked.clone(),
            available.clone(),
            vec![],
        ));
        return DetectionResult {
            deadlocked,
            safe_sequence: None,
            steps,
        };
    }

    // The summary step is skipped for an empty system, whose trace is just
    // the initial step.
    if steps.len() > 1 {
        steps.push(DetectionStep::new(
            format!(
                "All processes have been executed successfully. \
                 System is in a safe state. Safe sequence: {}",
                safe_sequence.join(" → ")
            ),
            vec![],
            available.clone(),
            vec![],
        ));
    }

    DetectionResult {
        deadlocked: vec![],
        safe_sequence: Some(safe_sequence),
        steps,
    }
}

fn can_finish(process: &crate::models::Process, available: &BTreeMap<String, u32>) -> bool {
    process.request.iter().all(|(resource_id, &requested)| {
        requested == 0 || requested <= available.get(resource_id).copied().unwrap_or(0)
    })
}

fn remaining(all_ids: &[String], finished: &HashSet<String>) -> Vec<String> {
    all_ids
        .iter()
        .filter(|id| !finished.contains(*id))
        .cloned()
        .collect()
}

/// Search the wait graph for a cycle, returning the node ids along it
///
/// The wait graph is bipartite and directed: `resource → process` for each
/// non-zero allocation and `process → resource` for each non-zero request.
/// Only single-instance resources (`total == 1`) participate; edges through
/// multi-instance resources are excluded because a cycle through them does
/// not imply deadlock.
///
/// Debug/illustration only. `detect_deadlock` is the authoritative check;
/// in particular this can miss deadlocks that involve multi-instance
/// resources, and proves nothing about safety when it returns `None`.
pub fn find_wait_cycle(matrix: &AllocationMatrix) -> Option<Vec<String>> {
    let single_instance: HashSet<&str> = matrix
        .resources
        .iter()
        .filter(|r| r.total == 1)
        .map(|r| r.id.as_str())
        .collect();

    // Node order fixes the DFS order, so results are deterministic.
    let mut nodes: Vec<&str> = matrix.processes.iter().map(|p| p.id.as_str()).collect();
    nodes.extend(
        matrix
            .resources
            .iter()
            .filter(|r| r.total == 1)
            .map(|r| r.id.as_str()),
    );

    let mut edges: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for process in &matrix.processes {
        for (resource_id, &held) in &process.allocation {
            if held > 0 && single_instance.contains(resource_id.as_str()) {
                edges.entry(resource_id.as_str()).or_default().push(&process.id);
            }
        }
        for (resource_id, &wanted) in &process.request {
            if wanted > 0 && single_instance.contains(resource_id.as_str()) {
                edges.entry(&process.id).or_default().push(resource_id.as_str());
            }
        }
    }

    let mut visited: HashSet<&str> = HashSet::new();
    for start in nodes {
        if visited.contains(start) {
            continue;
        }
        let mut path: Vec<&str> = Vec::new();
        let mut on_path: HashSet<&str> = HashSet::new();
        if let Some(cycle) = dfs(start, &edges, &mut visited, &mut path, &mut on_path) {
            return Some(cycle);
        }
    }
    None
}

fn dfs<'a>(
    node: &'a str,
    edges: &BTreeMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    on_path: &mut HashSet<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    path.push(node);
    on_path.insert(node);

    for &next in edges.get(node).map(Vec::as_slice).unwrap_or(&[]) {
        if on_path.contains(next) {
            let start = path.iter().position(|&n| n == next).unwrap_or(0);
            return Some(path[start..].iter().map(|s| s.to_string()).collect());
        }
        if !visited.contains(next) {
            if let Some(cycle) = dfs(next, edges, visited, path, on_path) {
                return Some(cycle);
            }
        }
    }

    path.pop();
    on_path.remove(node);
    None
}

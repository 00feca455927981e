//! End-to-end library scenarios over the public API.

use gridlock::{detect_deadlock, AllocationMatrix, ResourceManager};

/// Classic two-process circular wait: P1 holds R1 and wants R2, P2 holds R2
/// and wants R1.
#[test]
fn scenario_classic_deadlock() {
    let mut mgr = ResourceManager::new();
    mgr.add_resource("R1", 1, false).unwrap();
    mgr.add_resource("R2", 1, false).unwrap();
    mgr.add_process("P1").unwrap();
    mgr.add_process("P2").unwrap();
    mgr.update_allocation("P1", "R1", 1).unwrap();
    mgr.update_allocation("P2", "R2", 1).unwrap();
    mgr.update_request("P1", "R2", 1).unwrap();
    mgr.update_request("P2", "R1", 1).unwrap();

    let result = detect_deadlock(&mgr.snapshot());

    assert_eq!(result.deadlocked, vec!["P1", "P2"]);
    assert_eq!(result.safe_sequence, None);
}

/// Three processes over two two-instance resources; spare capacity means a
/// safe sequence exists.
#[test]
fn scenario_safe_three_process_system() {
    let mut mgr = ResourceManager::new();
    mgr.add_resource("R1", 2, true).unwrap();
    mgr.add_resource("R2", 2, true).unwrap();
    mgr.add_process("P1").unwrap();
    mgr.add_process("P2").unwrap();
    mgr.add_process("P3").unwrap();
    mgr.update_allocation("P1", "R1", 1).unwrap();
    mgr.update_request("P1", "R2", 1).unwrap();
    mgr.update_allocation("P2", "R2", 1).unwrap();
    mgr.update_request("P3", "R1", 1).unwrap();
    mgr.update_request("P3", "R2", 1).unwrap();

    let result = detect_deadlock(&mgr.snapshot());

    assert!(result.deadlocked.is_empty());
    let sequence = result.safe_sequence.expect("system is safe");
    assert_eq!(sequence.len(), 3);
}

/// Over-allocating a fully-committed resource clamps to zero.
#[test]
fn scenario_capacity_clamp() {
    let mut mgr = ResourceManager::new();
    mgr.add_resource("R1", 1, false).unwrap();
    mgr.add_process("P1").unwrap();
    mgr.add_process("P2").unwrap();

    assert_eq!(mgr.update_allocation("P1", "R1", 1).unwrap(), 1);
    assert_eq!(mgr.update_allocation("P2", "R1", 1).unwrap(), 0);
    assert_eq!(mgr.get_available_resources()["R1"], 0);
}

/// An empty system is trivially safe.
#[test]
fn scenario_empty_system() {
    let result = detect_deadlock(&AllocationMatrix::new());

    assert!(result.deadlocked.is_empty());
    assert_eq!(result.safe_sequence, Some(vec![]));
}

/// A process with all-zero requests is eligible in the first round no matter
/// how scarce resources are.
#[test]
fn scenario_zero_request_process_always_finishes_first_round() {
    let mut mgr = ResourceManager::new();
    mgr.add_resource("R1", 1, false).unwrap();
    mgr.add_process("P1").unwrap();
    mgr.add_process("P2").unwrap();
    mgr.update_allocation("P1", "R1", 1).unwrap();
    mgr.update_request("P1", "R1", 1).unwrap();

    let result = detect_deadlock(&mgr.snapshot());

    let first_resolution = &result.steps[1];
    assert_eq!(first_resolution.processed_this_round, vec!["P2"]);
    assert!(!result.is_deadlocked());
}

/// Removing a process twice has the same observable effect as once.
#[test]
fn scenario_remove_process_idempotence() {
    let mut mgr = ResourceManager::new();
    mgr.add_resource("R1", 1, false).unwrap();
    mgr.add_process("P1").unwrap();
    mgr.add_process("P2").unwrap();
    mgr.update_allocation("P1", "R1", 1).unwrap();

    mgr.remove_process("P1");
    let after_once = mgr.snapshot();
    mgr.remove_process("P1");

    assert_eq!(mgr.snapshot(), after_once);
    assert_eq!(mgr.get_available_resources()["R1"], 1);
}

/// Mutating live state after taking a snapshot does not affect a detection
/// run over that snapshot.
#[test]
fn scenario_snapshot_isolation() {
    let mut mgr = ResourceManager::new();
    mgr.load_example();
    let snapshot = mgr.snapshot();

    mgr.clear_all();
    mgr.add_resource("R1", 1, false).unwrap();
    mgr.add_process("P9").unwrap();

    let result = detect_deadlock(&snapshot);
    assert_eq!(
        result.safe_sequence,
        Some(vec!["P3".to_string(), "P1".to_string(), "P2".to_string()])
    );
}

//! Property tests for the deadlock detector.

use proptest::prelude::*;

use gridlock::{detect_deadlock, find_wait_cycle, ResourceManager};

use super::manager::{apply, ops};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Detection is deterministic: the same snapshot yields the
    /// same result, step for step.
    #[test]
    fn property_detection_is_deterministic(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let snapshot = mgr.snapshot();

        prop_assert_eq!(detect_deadlock(&snapshot), detect_deadlock(&snapshot));
    }

    /// PROPERTY: Exactly one outcome holds, and together the safe sequence
    /// and the deadlocked list partition the process set.
    #[test]
    fn property_outcomes_partition_the_process_set(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let snapshot = mgr.snapshot();
        let result = detect_deadlock(&snapshot);

        let mut covered: Vec<String> = match &result.safe_sequence {
            Some(sequence) => {
                prop_assert!(result.deadlocked.is_empty());
                sequence.clone()
            }
            None => {
                prop_assert!(!result.deadlocked.is_empty());
                let finished: Vec<String> = snapshot
                    .processes
                    .iter()
                    .map(|p| p.id.clone())
                    .filter(|id| !result.deadlocked.contains(id))
                    .collect();
                let mut all = finished;
                all.extend(result.deadlocked.iter().cloned());
                all
            }
        };

        covered.sort_unstable();
        let mut expected: Vec<String> =
            snapshot.processes.iter().map(|p| p.id.clone()).collect();
        expected.sort_unstable();
        prop_assert_eq!(covered, expected);
    }

    /// PROPERTY: The detector never mutates its input snapshot.
    #[test]
    fn property_detection_is_side_effect_free(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let snapshot = mgr.snapshot();
        let before = snapshot.clone();

        let _ = detect_deadlock(&snapshot);
        let _ = find_wait_cycle(&snapshot);

        prop_assert_eq!(snapshot, before);
    }

    /// PROPERTY: The step trace always opens with the initial-availability
    /// step and records one resolution per intermediate round.
    #[test]
    fn property_step_trace_shape(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let result = detect_deadlock(&mgr.snapshot());

        prop_assert!(!result.steps.is_empty());
        prop_assert!(result.steps[0].processed_this_round.is_empty());
        for step in &result.steps[1..] {
            prop_assert!(step.processed_this_round.len() <= 1);
        }
    }

    /// PROPERTY: A wait cycle only ever involves single-instance resources
    /// and processes.
    #[test]
    fn property_wait_cycle_nodes_are_well_formed(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let snapshot = mgr.snapshot();

        if let Some(cycle) = find_wait_cycle(&snapshot) {
            prop_assert!(cycle.len() >= 2);
            for node in &cycle {
                let is_process = snapshot.has_process(node);
                let is_single_resource = snapshot
                    .resource(node)
                    .is_some_and(|r| r.total == 1);
                prop_assert!(is_process || is_single_resource);
            }
        }
    }
}

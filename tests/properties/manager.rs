//! Property tests for the resource manager's invariants.

use proptest::prelude::*;

use gridlock::ResourceManager;

/// One random mutation against the manager. Ids are drawn from small pools so
/// duplicates, unknown-id errors, and re-adds after removal all occur often.
#[derive(Debug, Clone)]
pub enum Op {
    AddProcess(String),
    AddResource(String, u32, bool),
    UpdateAllocation(String, String, i64),
    UpdateRequest(String, String, i64),
    RemoveProcess(String),
    RemoveResource(String),
    ClearAll,
}

fn process_id() -> impl Strategy<Value = String> {
    (0..4u8).prop_map(|n| format!("P{}", n))
}

fn resource_id() -> impl Strategy<Value = String> {
    (0..3u8).prop_map(|n| format!("R{}", n))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        process_id().prop_map(Op::AddProcess),
        (resource_id(), 0..5u32, any::<bool>())
            .prop_map(|(id, n, multi)| Op::AddResource(id, n, multi)),
        (process_id(), resource_id(), -3..8i64)
            .prop_map(|(p, r, v)| Op::UpdateAllocation(p, r, v)),
        (process_id(), resource_id(), -3..8i64)
            .prop_map(|(p, r, v)| Op::UpdateRequest(p, r, v)),
        process_id().prop_map(Op::RemoveProcess),
        resource_id().prop_map(Op::RemoveResource),
        Just(Op::ClearAll),
    ]
}

/// Apply one op, ignoring the recoverable errors a random sequence provokes.
pub fn apply(mgr: &mut ResourceManager, op: &Op) {
    match op {
        Op::AddProcess(id) => {
            let _ = mgr.add_process(id);
        }
        Op::AddResource(id, instances, multi) => {
            let _ = mgr.add_resource(id, *instances, *multi);
        }
        Op::UpdateAllocation(p, r, v) => {
            let _ = mgr.update_allocation(p, r, *v);
        }
        Op::UpdateRequest(p, r, v) => {
            let _ = mgr.update_request(p, r, *v);
        }
        Op::RemoveProcess(id) => mgr.remove_process(id),
        Op::RemoveResource(id) => mgr.remove_resource(id),
        Op::ClearAll => mgr.clear_all(),
    }
}

pub fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 0..40)
}

fn assert_invariants(mgr: &ResourceManager) {
    let matrix = mgr.matrix();

    // Capacity: per resource, allocations across processes never exceed total.
    for resource in &matrix.resources {
        let allocated: u32 = matrix
            .processes
            .iter()
            .map(|p| p.allocated(&resource.id))
            .sum();
        assert!(
            allocated <= resource.total,
            "resource {} over-allocated: {} > {}",
            resource.id,
            allocated,
            resource.total
        );
    }

    // Key alignment: every process map has exactly the current resource keys.
    let resource_ids: Vec<&str> = matrix.resources.iter().map(|r| r.id.as_str()).collect();
    for process in &matrix.processes {
        let alloc_keys: Vec<&str> = process.allocation.keys().map(String::as_str).collect();
        let request_keys: Vec<&str> = process.request.keys().map(String::as_str).collect();
        let mut expected = resource_ids.clone();
        expected.sort_unstable();
        assert_eq!(alloc_keys, expected, "allocation keys drifted for {}", process.id);
        assert_eq!(request_keys, expected, "request keys drifted for {}", process.id);
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Model invariants hold after every operation in any sequence.
    #[test]
    fn property_invariants_hold_under_random_mutation(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
            assert_invariants(&mgr);
        }
    }

    /// PROPERTY: The lenient allocation path reports exactly what it stored.
    #[test]
    fn property_update_allocation_returns_stored_value(
        ops in ops(),
        value in -3..10i64,
    ) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }
        let _ = mgr.add_process("P0");
        let _ = mgr.add_resource("R0", 2, true);

        if let Ok(stored) = mgr.update_allocation("P0", "R0", value) {
            prop_assert_eq!(
                mgr.matrix().process("P0").unwrap().allocated("R0"),
                stored
            );
            prop_assert!(i64::from(stored) <= value.max(0));
        }
    }

    /// PROPERTY: Availability never exceeds the resource total and always
    /// equals total minus the allocation sum.
    #[test]
    fn property_available_is_total_minus_allocated(ops in ops()) {
        let mut mgr = ResourceManager::new();
        for op in &ops {
            apply(&mut mgr, op);
        }

        let available = mgr.get_available_resources();
        let matrix = mgr.matrix();
        prop_assert_eq!(available.len(), matrix.resources.len());
        for resource in &matrix.resources {
            let allocated: u32 = matrix
                .processes
                .iter()
                .map(|p| p.allocated(&resource.id))
                .sum();
            prop_assert_eq!(available[&resource.id], resource.total - allocated);
        }
    }
}

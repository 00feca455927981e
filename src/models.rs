//! Core data models for Gridlock
//!
//! Defines the fundamental data structures used throughout Gridlock:
//! - `Process` / `Resource`: the entities of the allocation model
//! - `AllocationMatrix`: the aggregate owning both entity collections
//! - `DetectionStep` / `DetectionResult`: the immutable output of a detection run
//!
//! Mutation goes through `ResourceManager`; everything here is plain data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A process holding and requesting resource units
///
/// `allocation` and `request` always contain an entry (possibly 0) for every
/// resource currently in the matrix, and no entries for removed resources.
/// `ResourceManager` maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    /// Unique identifier (e.g. "P1")
    pub id: String,

    /// Units of each resource currently held, keyed by resource id
    pub allocation: BTreeMap<String, u32>,

    /// Units of each resource currently wanted, keyed by resource id
    pub request: BTreeMap<String, u32>,
}

impl Process {
    /// Create a process with empty allocation/request maps
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            allocation: BTreeMap::new(),
            request: BTreeMap::new(),
        }
    }

    /// Units of `resource_id` currently held (0 for unknown ids)
    pub fn allocated(&self, resource_id: &str) -> u32 {
        self.allocation.get(resource_id).copied().unwrap_or(0)
    }

    /// Units of `resource_id` currently requested (0 for unknown ids)
    pub fn requested(&self, resource_id: &str) -> u32 {
        self.request.get(resource_id).copied().unwrap_or(0)
    }
}

/// A resource with a fixed number of instances
///
/// There is no stored `available` count. Availability is always derived as
/// `total - Σ allocation` so it can never drift out of sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier (e.g. "R1")
    pub id: String,

    /// Total instance count, fixed at creation (always >= 1)
    pub total: u32,

    /// Informational flag; a single-instance resource is eligible for the
    /// wait-cycle debug view
    pub is_multi_instance: bool,
}

impl Resource {
    pub fn new(id: impl Into<String>, total: u32, is_multi_instance: bool) -> Self {
        Self {
            id: id.into(),
            total,
            is_multi_instance,
        }
    }
}

/// The aggregate owning the ordered process and resource collections
///
/// Insertion order is preserved for deterministic iteration and display.
/// Mutate only through `ResourceManager`; the detector and graph projection
/// take this by shared reference (or a `clone()` snapshot) and never write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationMatrix {
    pub processes: Vec<Process>,
    pub resources: Vec<Resource>,
}

impl AllocationMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    pub(crate) fn process_mut(&mut self, id: &str) -> Option<&mut Process> {
        self.processes.iter_mut().find(|p| p.id == id)
    }

    pub fn resource(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn has_process(&self, id: &str) -> bool {
        self.process(id).is_some()
    }

    pub fn has_resource(&self, id: &str) -> bool {
        self.resource(id).is_some()
    }

    /// Units of `resource_id` held across all processes
    pub fn total_allocated(&self, resource_id: &str) -> u32 {
        self.processes.iter().map(|p| p.allocated(resource_id)).sum()
    }

    /// Derived availability for every resource, in a deterministic order
    pub fn available_resources(&self) -> BTreeMap<String, u32> {
        self.resources
            .iter()
            .map(|r| {
                let available = r.total.saturating_sub(self.total_allocated(&r.id));
                (r.id.clone(), available)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty() && self.resources.is_empty()
    }
}

/// One iteration of the safety algorithm, recorded for the step trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStep {
    /// Human-readable explanation of what happened this round
    pub description: String,

    /// Processes still unresolved after this round
    pub remaining_processes: Vec<String>,

    /// Availability vector at this point in the walk
    pub available_resources: BTreeMap<String, u32>,

    /// Processes resolved this round (empty or a single id)
    pub processed_this_round: Vec<String>,
}

impl DetectionStep {
    pub fn new(
        description: impl Into<String>,
        remaining_processes: Vec<String>,
        available_resources: BTreeMap<String, u32>,
        processed_this_round: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            remaining_processes,
            available_resources,
            processed_this_round,
        }
    }
}

/// Immutable outcome of one detection run
///
/// Exactly one of the two outcomes holds: `deadlocked` is non-empty and
/// `safe_sequence` is `None`, or `deadlocked` is empty and `safe_sequence`
/// lists every process in finish order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Process ids that can never finish, in original insertion order
    pub deadlocked: Vec<String>,

    /// Finish order of all processes, when the state is safe
    pub safe_sequence: Option<Vec<String>>,

    /// The full step trace justifying the outcome
    pub steps: Vec<DetectionStep>,
}

impl DetectionResult {
    pub fn is_deadlocked(&self) -> bool {
        !self.deadlocked.is_empty()
    }
}

//! Gridlock - deadlock detection and resource-allocation analysis
//!
//! Gridlock models resource allocation among concurrent processes and
//! determines whether a snapshot of the system is safe or deadlocked, using a
//! Banker's-algorithm-style safety walk that produces a step-by-step trace.
//!
//! The core is split along ownership lines:
//! - `models`: the entity model (`Process`, `Resource`, `AllocationMatrix`)
//!   and detection outputs (`DetectionStep`, `DetectionResult`)
//! - `manager`: `ResourceManager`, the sole mutation gateway
//! - `detector`: the pure safety algorithm plus a debug wait-cycle search
//! - `graph`: the node/edge projection for visualization consumers
//! - `scenario`: JSON snapshot files

pub mod detector;
pub mod error;
pub mod graph;
pub mod manager;
pub mod models;
pub mod scenario;

// Re-exports for convenience
pub use detector::{detect_deadlock, find_wait_cycle};
pub use error::{EntityKind, GridlockError, GridlockResult};
pub use graph::{project_graph, EdgeKind, GraphEdge, GraphNode, NodeKind, ResourceGraph};
pub use manager::ResourceManager;
pub use models::{AllocationMatrix, DetectionResult, DetectionStep, Process, Resource};
pub use scenario::Scenario;

//! Resource Manager - the sole mutation gateway for the allocation model
//!
//! Every write to the `AllocationMatrix` goes through this type so the model
//! invariants hold after every operation:
//!
//! - every process's allocation/request maps carry exactly the keys of the
//!   current resource set;
//! - per resource, the allocation sum across processes never exceeds `total`;
//! - ids are unique and insertion order is preserved.
//!
//! Allocation updates clamp by default (the original interactive behavior);
//! `update_allocation_strict` errors with `CapacityExceeded` instead, for
//! programmatic callers such as scenario loading.

use std::collections::BTreeMap;

use crate::error::{EntityKind, GridlockError, GridlockResult};
use crate::models::{AllocationMatrix, Process, Resource};

/// Owns the allocation matrix and keeps it consistent across mutations
#[derive(Debug, Clone, Default)]
pub struct ResourceManager {
    matrix: AllocationMatrix,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for rendering collaborators. Never hand out `&mut`.
    pub fn matrix(&self) -> &AllocationMatrix {
        &self.matrix
    }

    /// Deep copy of the current state, for a side-effect-free detection run
    pub fn snapshot(&self) -> AllocationMatrix {
        self.matrix.clone()
    }

    /// Add a process with zeroed allocation/request entries for every
    /// existing resource
    pub fn add_process(&mut self, id: &str) -> GridlockResult<()> {
        if self.matrix.has_process(id) {
            return Err(GridlockError::DuplicateId {
                kind: EntityKind::Process,
                id: id.to_string(),
            });
        }

        let mut process = Process::new(id);
        for resource in &self.matrix.resources {
            process.allocation.insert(resource.id.clone(), 0);
            process.request.insert(resource.id.clone(), 0);
        }
        self.matrix.processes.push(process);
        Ok(())
    }

    /// Add a resource and zeroed entries for it to every existing process
    ///
    /// Policy preserved from the original tool: `is_multi_instance = false`
    /// forces `instances` to 1 regardless of the passed value. A passed 0 is
    /// raised to 1, since `total` must stay positive.
    pub fn add_resource(
        &mut self,
        id: &str,
        instances: u32,
        is_multi_instance: bool,
    ) -> GridlockResult<()> {
        if self.matrix.has_resource(id) {
            return Err(GridlockError::DuplicateId {
                kind: EntityKind::Resource,
                id: id.to_string(),
            });
        }

        let instances = if is_multi_instance { instances.max(1) } else { 1 };

        for process in &mut self.matrix.processes {
            process.allocation.insert(id.to_string(), 0);
            process.request.insert(id.to_string(), 0);
        }
        self.matrix
            .resources
            .push(Resource::new(id, instances, is_multi_instance));
        Ok(())
    }

    /// Set an allocation cell, clamping to the remaining capacity
    ///
    /// Negative values clamp to 0. Values beyond what the resource has left
    /// (total minus what every *other* process holds) clamp down silently.
    /// Returns the value actually stored so callers can detect truncation.
    pub fn update_allocation(
        &mut self,
        process_id: &str,
        resource_id: &str,
        value: i64,
    ) -> GridlockResult<u32> {
        let (wanted, ceiling) = self.admission_check(process_id, resource_id, value)?;
        let stored = wanted.min(ceiling);
        self.set_cell(process_id, resource_id, stored, Cell::Allocation);
        Ok(stored)
    }

    /// Set an allocation cell, failing with `CapacityExceeded` instead of
    /// clamping when the value does not fit
    ///
    /// Negative values still clamp to 0 (a "hold nothing" request is always
    /// admissible). The matrix is untouched on error.
    pub fn update_allocation_strict(
        &mut self,
        process_id: &str,
        resource_id: &str,
        value: i64,
    ) -> GridlockResult<u32> {
        let (wanted, ceiling) = self.admission_check(process_id, resource_id, value)?;
        if wanted > ceiling {
            return Err(GridlockError::CapacityExceeded {
                resource: resource_id.to_string(),
                requested: wanted,
                available: ceiling,
            });
        }
        self.set_cell(process_id, resource_id, wanted, Cell::Allocation);
        Ok(wanted)
    }

    /// Set a request cell. Negative values clamp to 0. No capacity check:
    /// requests beyond availability are exactly what the detector evaluates.
    pub fn update_request(
        &mut self,
        process_id: &str,
        resource_id: &str,
        value: i64,
    ) -> GridlockResult<()> {
        self.require_process(process_id)?;
        self.require_resource(resource_id)?;
        self.set_cell(process_id, resource_id, clamp_units(value), Cell::Request);
        Ok(())
    }

    /// Remove a process. Silent no-op when the id is absent.
    pub fn remove_process(&mut self, id: &str) {
        self.matrix.processes.retain(|p| p.id != id);
    }

    /// Remove a resource and purge its key from every process's maps.
    /// Silent no-op when the id is absent.
    pub fn remove_resource(&mut self, id: &str) {
        self.matrix.resources.retain(|r| r.id != id);
        for process in &mut self.matrix.processes {
            process.allocation.remove(id);
            process.request.remove(id);
        }
    }

    /// Availability per resource, recomputed fresh from current allocations
    pub fn get_available_resources(&self) -> BTreeMap<String, u32> {
        self.matrix.available_resources()
    }

    /// Reset to an empty matrix
    pub fn clear_all(&mut self) {
        self.matrix = AllocationMatrix::new();
    }

    /// Seed the canonical demonstration scenario: a single-instance R1, a
    /// two-instance R2, and three processes where P1 holds R1 and wants R2
    /// while P2 and P3 hold the R2 instances
    pub fn load_example(&mut self) {
        self.clear_all();

        // Seed data is static and self-consistent, so these cannot fail.
        let _ = self.add_resource("R1", 1, false);
        let _ = self.add_resource("R2", 2, true);

        let _ = self.add_process("P1");
        let _ = self.add_process("P2");
        let _ = self.add_process("P3");

        let _ = self.update_allocation("P1", "R1", 1);
        let _ = self.update_allocation("P2", "R2", 1);
        let _ = self.update_allocation("P3", "R2", 1);

        let _ = self.update_request("P1", "R2", 1);
        let _ = self.update_request("P2", "R1", 1);
    }

    fn require_process(&self, id: &str) -> GridlockResult<()> {
        if self.matrix.has_process(id) {
            Ok(())
        } else {
            Err(GridlockError::NotFound {
                kind: EntityKind::Process,
                id: id.to_string(),
            })
        }
    }

    fn require_resource(&self, id: &str) -> GridlockResult<()> {
        if self.matrix.has_resource(id) {
            Ok(())
        } else {
            Err(GridlockError::NotFound {
                kind: EntityKind::Resource,
                id: id.to_string(),
            })
        }
    }

    /// Validate both ids and compute the admission ceiling for an allocation:
    /// the resource total minus what every other process currently holds
    fn admission_check(
        &self,
        process_id: &str,
        resource_id: &str,
        value: i64,
    ) -> GridlockResult<(u32, u32)> {
        self.require_process(process_id)?;
        let resource =
            self.matrix
                .resource(resource_id)
                .ok_or_else(|| GridlockError::NotFound {
                    kind: EntityKind::Resource,
                    id: resource_id.to_string(),
                })?;

        let held_by_others: u32 = self
            .matrix
            .processes
            .iter()
            .filter(|p| p.id != process_id)
            .map(|p| p.allocated(resource_id))
            .sum();

        Ok((clamp_units(value), resource.total.saturating_sub(held_by_others)))
    }

    fn set_cell(&mut self, process_id: &str, resource_id: &str, value: u32, cell: Cell) {
        // Ids were validated by the caller; a miss here is unreachable.
        if let Some(process) = self.matrix.process_mut(process_id) {
            let map = match cell {
                Cell::Allocation => &mut process.allocation,
                Cell::Request => &mut process.request,
            };
            map.insert(resource_id.to_string(), value);
        }
    }
}

#[derive(Clone, Copy)]
enum Cell {
    Allocation,
    Request,
}

fn clamp_units(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}

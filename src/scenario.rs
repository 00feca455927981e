//! Scenario files
//!
//! A scenario is the JSON on-disk form of an allocation snapshot, used to
//! feed the `detect`/`show`/`graph` subcommands and to save/restore shell
//! sessions. Loading replays the document through a fresh `ResourceManager`
//! so every model invariant is re-validated; in particular allocations are
//! applied in strict mode, so an over-committed file is a `CapacityExceeded`
//! error rather than being silently reshaped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridlockError, GridlockResult};
use crate::manager::ResourceManager;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResource {
    pub id: String,

    #[serde(default = "default_instances")]
    pub instances: u32,

    #[serde(default = "default_multi_instance")]
    pub multi_instance: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioProcess {
    pub id: String,

    /// resource id → units held; omitted ids mean 0
    #[serde(default)]
    pub allocation: BTreeMap<String, u32>,

    /// resource id → units wanted; omitted ids mean 0
    #[serde(default)]
    pub request: BTreeMap<String, u32>,
}

/// On-disk snapshot of the allocation model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub resources: Vec<ScenarioResource>,

    #[serde(default)]
    pub processes: Vec<ScenarioProcess>,
}

fn default_instances() -> u32 {
    1
}

fn default_multi_instance() -> bool {
    true
}

impl Scenario {
    /// Capture the manager's current state as a scenario document
    pub fn from_manager(manager: &ResourceManager) -> Self {
        let matrix = manager.matrix();
        Self {
            resources: matrix
                .resources
                .iter()
                .map(|r| ScenarioResource {
                    id: r.id.clone(),
                    instances: r.total,
                    multi_instance: r.is_multi_instance,
                })
                .collect(),
            processes: matrix
                .processes
                .iter()
                .map(|p| ScenarioProcess {
                    id: p.id.clone(),
                    allocation: non_zero_cells(&p.allocation),
                    request: non_zero_cells(&p.request),
                })
                .collect(),
        }
    }

    /// The canonical demonstration scenario (same data as
    /// `ResourceManager::load_example`)
    pub fn example() -> Self {
        let mut manager = ResourceManager::new();
        manager.load_example();
        Self::from_manager(&manager)
    }

    /// Replay this scenario into `manager`, replacing its state
    ///
    /// Builds into a scratch manager first; on any error the passed manager
    /// is left untouched.
    pub fn apply(&self, manager: &mut ResourceManager) -> GridlockResult<()> {
        self.validate()?;

        let mut staged = ResourceManager::new();
        for resource in &self.resources {
            staged.add_resource(&resource.id, resource.instances, resource.multi_instance)?;
        }
        for process in &self.processes {
            staged.add_process(&process.id)?;
        }
        for process in &self.processes {
            for (resource_id, &value) in &process.allocation {
                staged.update_allocation_strict(&process.id, resource_id, i64::from(value))?;
            }
            for (resource_id, &value) in &process.request {
                staged.update_request(&process.id, resource_id, i64::from(value))?;
            }
        }

        *manager = staged;
        Ok(())
    }

    pub fn load(path: &Path) -> GridlockResult<Self> {
        let content = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&content)?;
        Ok(scenario)
    }

    pub fn save(&self, path: &Path) -> GridlockResult<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> GridlockResult<()> {
        for resource in &self.resources {
            if resource.instances == 0 {
                return Err(GridlockError::InvalidScenario {
                    message: format!("resource '{}' declares 0 instances", resource.id),
                });
            }
            if resource.id.trim().is_empty() {
                return Err(GridlockError::InvalidScenario {
                    message: "resource with empty id".to_string(),
                });
            }
        }
        for process in &self.processes {
            if process.id.trim().is_empty() {
                return Err(GridlockError::InvalidScenario {
                    message: "process with empty id".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn non_zero_cells(cells: &BTreeMap<String, u32>) -> BTreeMap<String, u32> {
    cells
        .iter()
        .filter(|(_, &v)| v > 0)
        .map(|(k, &v)| (k.clone(), v))
        .collect()
}

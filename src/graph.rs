//! Graph Projection
//!
//! One-way, stateless transform from the allocation model to a node/edge
//! graph for visualization consumers. Zero-valued matrix cells produce no
//! edge. Safe to call at any time; never mutates anything.

use serde::{Deserialize, Serialize};

use crate::models::AllocationMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Process,
    Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Resource → process: units currently held
    Allocation,
    /// Process → resource: units currently wanted
    Request,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,

    /// Instance count, resource nodes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub amount: u32,
}

/// Node/edge projection of an allocation matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl ResourceGraph {
    /// Render as Graphviz DOT. Processes are ellipses, resources are boxes
    /// labelled with their instance count; request edges are dashed.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph gridlock {\n");
        for node in &self.nodes {
            match node.kind {
                NodeKind::Process => {
                    out.push_str(&format!("    \"{}\" [shape=ellipse];\n", node.id));
                }
                NodeKind::Resource => {
                    let instances = node.instances.unwrap_or(1);
                    out.push_str(&format!(
                        "    \"{}\" [shape=box, label=\"{} ({})\"];\n",
                        node.id, node.id, instances
                    ));
                }
            }
        }
        for edge in &self.edges {
            let style = match edge.kind {
                EdgeKind::Allocation => "solid",
                EdgeKind::Request => "dashed",
            };
            out.push_str(&format!(
                "    \"{}\" -> \"{}\" [style={}, label=\"{}\"];\n",
                edge.source, edge.target, style, edge.amount
            ));
        }
        out.push_str("}\n");
        out
    }
}

/// Project the matrix into nodes and edges
///
/// Node order follows insertion order (processes, then resources). Allocation
/// edges point resource → process, request edges process → resource; both
/// carry the cell value as `amount` and zero cells are omitted.
pub fn project_graph(matrix: &AllocationMatrix) -> ResourceGraph {
    let mut nodes = Vec::with_capacity(matrix.processes.len() + matrix.resources.len());
    for process in &matrix.processes {
        nodes.push(GraphNode {
            id: process.id.clone(),
            kind: NodeKind::Process,
            instances: None,
        });
    }
    for resource in &matrix.resources {
        nodes.push(GraphNode {
            id: resource.id.clone(),
            kind: NodeKind::Resource,
            instances: Some(resource.total),
        });
    }

    let mut edges = Vec::new();
    for process in &matrix.processes {
        for resource in &matrix.resources {
            let held = process.allocated(&resource.id);
            if held > 0 {
                edges.push(GraphEdge {
                    source: resource.id.clone(),
                    target: process.id.clone(),
                    kind: EdgeKind::Allocation,
                    amount: held,
                });
            }
        }
    }
    for process in &matrix.processes {
        for resource in &matrix.resources {
            let wanted = process.requested(&resource.id);
            if wanted > 0 {
                edges.push(GraphEdge {
                    source: process.id.clone(),
                    target: resource.id.clone(),
                    kind: EdgeKind::Request,
                    amount: wanted,
                });
            }
        }
    }

    ResourceGraph { nodes, edges }
}

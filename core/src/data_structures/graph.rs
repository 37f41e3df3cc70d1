//! Undirected graph model for matching algorithms
//!
//! This module defines the [`GraphModel`] contract consumed by the matching
//! engine, a concrete adjacency-list [`Graph`] implementing it, and the dense
//! [`GraphSnapshot`] the engine works on during a run.
//!
//! The model rejects malformed input at its boundary (self-loops, unknown
//! endpoints, duplicates) so that algorithms never see an edge that cannot
//! participate in a matching.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::warn;

use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Read-only view of an undirected graph
///
/// # Contract
/// - `vertex_ids` enumerates every vertex exactly once, in a stable order
/// - every id returned by `neighbors` is itself a vertex
/// - adjacency is symmetric: `b` is a neighbor of `a` iff `a` is a neighbor of `b`
pub trait GraphModel {
    /// All vertex ids in enumeration order
    fn vertex_ids(&self) -> Vec<NodeId>;

    /// Neighbors of `node`; empty for an unknown node
    fn neighbors(&self, node: NodeId) -> &[NodeId];

    /// Whether the undirected edge `a - b` exists
    fn has_edge(&self, a: NodeId, b: NodeId) -> bool;
}

/// Adjacency-list graph with insertion-ordered vertices
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Vertex ids in insertion order
    nodes: Vec<NodeId>,

    /// Position of each vertex in `nodes`
    index: HashMap<NodeId, usize>,

    /// Neighbor lists, parallel to `nodes`
    adjacency: Vec<Vec<NodeId>>,

    edge_count: usize,

    /// Bumped on every mutation
    version: u64,
}

impl Graph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an edge list, adding vertices in order of first appearance
    pub fn from_edges<I>(edges: I) -> Result<Self, AlgorithmError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            for v in [a, b] {
                if !graph.has_node(v) {
                    graph.add_node(v)?;
                }
            }
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }

    /// Adds an isolated vertex
    pub fn add_node(&mut self, id: NodeId) -> Result<(), AlgorithmError> {
        if self.index.contains_key(&id) {
            return Err(AlgorithmError::DuplicateNode(id));
        }

        self.index.insert(id, self.nodes.len());
        self.nodes.push(id);
        self.adjacency.push(Vec::new());
        self.increment_version();

        Ok(())
    }

    /// Adds the undirected edge `a - b`
    ///
    /// Self-loops are rejected as [`AlgorithmError::InvalidEdge`]: an edge
    /// `v - v` can never be part of a matching.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<(), AlgorithmError> {
        if a == b {
            return Err(AlgorithmError::InvalidEdge {
                from: a,
                to: b,
                reason: "self-loops cannot participate in a matching".into(),
            });
        }

        let ia = self.position(a)?;
        let ib = self.position(b)?;

        if self.adjacency[ia].contains(&b) {
            return Err(AlgorithmError::DuplicateEdge(a, b));
        }

        self.adjacency[ia].push(b);
        self.adjacency[ib].push(a);
        self.edge_count += 1;
        self.increment_version();

        Ok(())
    }

    /// Removes the edge `a - b`; returns whether it existed
    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let (Some(&ia), Some(&ib)) = (self.index.get(&a), self.index.get(&b)) else {
            return false;
        };

        let before = self.adjacency[ia].len();
        self.adjacency[ia].retain(|&n| n != b);
        if self.adjacency[ia].len() == before {
            return false;
        }
        self.adjacency[ib].retain(|&n| n != a);

        self.edge_count -= 1;
        self.increment_version();
        true
    }

    /// Removes a vertex and all incident edges; returns whether it existed
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(position) = self.index.remove(&id) else {
            return false;
        };

        let incident = self.adjacency.remove(position);
        for neighbor in &incident {
            if let Some(&np) = self.index.get(neighbor) {
                let np = if np > position { np - 1 } else { np };
                self.adjacency[np].retain(|&n| n != id);
            }
        }
        self.edge_count -= incident.len();

        self.nodes.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }

        self.increment_version();
        true
    }

    #[inline]
    pub fn has_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every edge once, in vertex insertion order
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (position, &a) in self.nodes.iter().enumerate() {
            for &b in &self.adjacency[position] {
                if self.index[&b] > position {
                    edges.push((a, b));
                }
            }
        }
        edges
    }

    /// Gets current graph version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Validates graph integrity
    pub fn validate(&self) -> Result<(), AlgorithmError> {
        let mut endpoints = 0;
        for (position, &a) in self.nodes.iter().enumerate() {
            for &b in &self.adjacency[position] {
                let Some(&pb) = self.index.get(&b) else {
                    return Err(AlgorithmError::InvalidGraph(format!(
                        "edge {} - {} references a missing vertex",
                        a, b
                    )));
                };
                if !self.adjacency[pb].contains(&a) {
                    return Err(AlgorithmError::InvalidGraph(format!(
                        "edge {} - {} is not symmetric",
                        a, b
                    )));
                }
                endpoints += 1;
            }
        }

        if endpoints != 2 * self.edge_count {
            return Err(AlgorithmError::InvalidGraph(
                "edge count does not match adjacency lists".into(),
            ));
        }

        Ok(())
    }

    /// Dense snapshot for algorithms
    pub fn create_snapshot(&self) -> Result<GraphSnapshot, AlgorithmError> {
        GraphSnapshot::capture(self)
    }

    fn position(&self, id: NodeId) -> Result<usize, AlgorithmError> {
        self.index
            .get(&id)
            .copied()
            .ok_or(AlgorithmError::InvalidNode(id))
    }

    #[inline]
    fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl GraphModel for Graph {
    fn vertex_ids(&self) -> Vec<NodeId> {
        self.nodes.clone()
    }

    fn neighbors(&self, node: NodeId) -> &[NodeId] {
        self.index
            .get(&node)
            .map(|&position| self.adjacency[position].as_slice())
            .unwrap_or(&[])
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Dense, index-addressed copy of a [`GraphModel`]
///
/// Vertices are renumbered `0..n` in enumeration order so per-vertex state can
/// live in plain vectors. Capturing validates the model: a neighbor that is not
/// a vertex, a duplicated vertex id or an asymmetric edge fails with
/// [`AlgorithmError::InvalidGraph`].
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    ids: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl GraphSnapshot {
    pub fn capture<G: GraphModel + ?Sized>(graph: &G) -> Result<Self, AlgorithmError> {
        let ids = graph.vertex_ids();

        let mut index = HashMap::with_capacity(ids.len());
        for (position, &id) in ids.iter().enumerate() {
            if index.insert(id, position).is_some() {
                return Err(AlgorithmError::InvalidGraph(format!(
                    "vertex {} is enumerated more than once",
                    id
                )));
            }
        }

        let mut adjacency = Vec::with_capacity(ids.len());
        for &id in &ids {
            let mut row = Vec::with_capacity(graph.neighbors(id).len());
            for &neighbor in graph.neighbors(id) {
                if neighbor == id {
                    warn!("ignoring self-loop on vertex {}", id);
                    continue;
                }
                let Some(&position) = index.get(&neighbor) else {
                    return Err(AlgorithmError::InvalidGraph(format!(
                        "edge {} - {} references a vertex missing from the graph",
                        id, neighbor
                    )));
                };
                if !graph.has_edge(neighbor, id) {
                    return Err(AlgorithmError::InvalidGraph(format!(
                        "edge {} - {} is not symmetric",
                        id, neighbor
                    )));
                }
                row.push(position);
            }
            adjacency.push(row);
        }

        Ok(Self {
            ids,
            index,
            adjacency,
        })
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// External id of dense vertex `v`
    #[inline]
    pub fn id(&self, v: usize) -> NodeId {
        self.ids[v]
    }

    #[inline]
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].contains(&b)
    }
}

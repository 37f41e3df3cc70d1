//! Progress observation for matching runs
//!
//! The engine reports structural changes (tree growth, blossom contraction,
//! augmentation) through the [`ProgressSink`] trait. Sinks are called
//! synchronously from inside the run, receive only borrowed immutable data and
//! cannot reach engine state. Passing no sink at all is the default and costs
//! nothing: event payloads are only assembled when a sink is present.
//!
//! Two sinks ship with the crate:
//! - [`ExecutionTracer`] records a numbered, serialisable event trace
//! - [`LogSink`] forwards every event to the `log` facade
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::NodeId;

/// Observer of matching progress
///
/// All methods default to no-ops so an observer implements only what it
/// renders. Implementations must return promptly.
pub trait ProgressSink {
    /// `child` joined the alternating tree below `parent`
    fn tree_edge_added(&mut self, _parent: NodeId, _child: NodeId) {}

    /// An odd cycle was contracted; `members` lists every vertex whose base is
    /// now `base`, starting with `base` itself, including vertices of nested
    /// blossoms contracted earlier in the phase
    fn blossom_contracted(&mut self, _base: NodeId, _members: &[NodeId]) {}

    /// The matching was augmented; `pairs` are the edges matched along the path
    fn path_augmented(&mut self, _pairs: &[(NodeId, NodeId)]) {}
}

/// Structural event recorded by [`ExecutionTracer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    TreeEdgeAdded {
        parent: NodeId,
        child: NodeId,
    },
    BlossomContracted {
        base: NodeId,
        members: Vec<NodeId>,
    },
    PathAugmented {
        pairs: Vec<(NodeId, NodeId)>,
    },
}

/// Numbered trace entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracePoint {
    /// Position in the trace, starting at zero
    pub step: usize,
    pub event: TraceEvent,
}

/// Recording sink that keeps every event in order
#[derive(Debug, Clone)]
pub struct ExecutionTracer {
    points: Vec<TracePoint>,
    /// Record tree-edge events; they dominate trace size on large graphs
    record_tree_edges: bool,
}

impl ExecutionTracer {
    /// Creates a tracer recording all event kinds
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            record_tree_edges: true,
        }
    }

    /// Creates a tracer that keeps only blossom and augmentation events
    pub fn structural_only() -> Self {
        Self {
            points: Vec::new(),
            record_tree_edges: false,
        }
    }

    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of recorded blossom contractions
    pub fn blossom_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| matches!(p.event, TraceEvent::BlossomContracted { .. }))
            .count()
    }

    /// Number of recorded augmentations
    pub fn augmentation_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| matches!(p.event, TraceEvent::PathAugmented { .. }))
            .count()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn into_points(self) -> Vec<TracePoint> {
        self.points
    }

    /// Serialises the trace as a JSON array
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.points)
    }

    fn record(&mut self, event: TraceEvent) {
        let step = self.points.len();
        self.points.push(TracePoint { step, event });
    }
}

impl Default for ExecutionTracer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ExecutionTracer {
    fn tree_edge_added(&mut self, parent: NodeId, child: NodeId) {
        if self.record_tree_edges {
            self.record(TraceEvent::TreeEdgeAdded { parent, child });
        }
    }

    fn blossom_contracted(&mut self, base: NodeId, members: &[NodeId]) {
        self.record(TraceEvent::BlossomContracted {
            base,
            members: members.to_vec(),
        });
    }

    fn path_augmented(&mut self, pairs: &[(NodeId, NodeId)]) {
        self.record(TraceEvent::PathAugmented {
            pairs: pairs.to_vec(),
        });
    }
}

/// Sink that writes events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn tree_edge_added(&mut self, parent: NodeId, child: NodeId) {
        trace!("tree edge {} -> {}", parent, child);
    }

    fn blossom_contracted(&mut self, base: NodeId, members: &[NodeId]) {
        debug!("blossom with base {} contracted: {:?}", base, members);
    }

    fn path_augmented(&mut self, pairs: &[(NodeId, NodeId)]) {
        debug!("augmented along {} matched edges: {:?}", pairs.len(), pairs);
    }
}

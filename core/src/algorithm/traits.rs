//! Core algorithm trait definitions for the Edmonds matching engine
//!
//! This module establishes the shared vocabulary of the crate: strongly typed
//! vertex identifiers, the unified error type, execution metrics and the
//! [`Algorithm`] abstraction through which drivers configure and run an
//! engine without knowing its concrete type.
//!
//! # Key Design Principles
//! - Newtype identifiers so vertex ids never mix with dense indices
//! - One error enum for graph, configuration and invariant failures
//! - String-keyed parameters backed by a typed configuration
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::algorithm::state::Matching;
use crate::data_structures::graph::GraphModel;
use crate::execution::tracer::ProgressSink;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Node identifier ensuring type safety and preventing mixing with other numeric types
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Algorithm parameter with strongly typed values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmParameter {
    pub name: String,
    pub value: String,
    pub value_type: ParameterType,
    pub description: String,
}

/// Parameter type enumeration for type-safe parameter handling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Boolean,
    Enum(Vec<String>),
}

/// Comprehensive error types for algorithm operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid node: {0}")]
    InvalidNode(NodeId),

    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Duplicate edge: {0} - {1}")]
    DuplicateEdge(NodeId, NodeId),

    #[error("Invalid edge {from} - {to}: {reason}")]
    InvalidEdge {
        from: NodeId,
        to: NodeId,
        reason: String,
    },

    #[error("Invalid graph state: {0}")]
    InvalidGraph(String),

    #[error("Invalid matching: {0}")]
    InvalidMatching(String),

    /// A broken engine invariant. The matching computed so far must not be trusted.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

/// Algorithm execution metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    /// Phases started, one per root attempt
    pub phases: usize,
    /// Outer passes over the free vertex set
    pub outer_passes: usize,
    /// Successful augmentations
    pub augmentations: usize,
    /// Blossoms contracted across all phases
    pub blossoms_contracted: usize,
    /// Vertices popped from the forest queue across all phases
    pub vertices_scanned: usize,
    /// Wall-clock time of the run (zero when timing is disabled)
    pub execution_time: Duration,
    pub custom_metrics: HashMap<String, f64>,
}

/// Execution result from algorithm invocation
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub matching: Matching,
    pub metrics: AlgorithmMetrics,
}

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Main algorithm trait
///
/// # Invariants
/// - State isolation between runs
/// - Deterministic behavior for given inputs
pub trait Algorithm {
    /// Returns the algorithm's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the algorithm's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the algorithm's category (e.g., graph_matching)
    fn category(&self) -> &'static str;

    /// Returns the algorithm's description
    fn description(&self) -> String;

    /// Returns the algorithm's asymptotic complexity in Big-O notation
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns supported parameters with type information
    fn parameters(&self) -> Vec<AlgorithmParameter>;

    /// Sets algorithm parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError>;

    /// Gets algorithm parameter value
    fn get_parameter(&self, name: &str) -> Option<String>;

    /// Executes the algorithm, reporting structural events to `tracer` when present
    fn execute_with_tracing<G: GraphModel>(
        &mut self,
        graph: &G,
        tracer: Option<&mut dyn ProgressSink>,
    ) -> Result<ExecutionResult, AlgorithmError>;
}

/// Performance profiling integration
#[derive(Debug)]
pub struct AlgorithmProfiler {
    metrics: AlgorithmMetrics,
    start_time: Option<Instant>,
    enabled: bool,
}

impl AlgorithmProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            metrics: AlgorithmMetrics::default(),
            start_time: None,
            enabled,
        }
    }

    pub fn start(&mut self) {
        if self.enabled {
            self.start_time = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.metrics.execution_time = start.elapsed();
        }
    }

    pub fn record_phase(&mut self) {
        self.metrics.phases += 1;
    }

    pub fn record_outer_pass(&mut self) {
        self.metrics.outer_passes += 1;
    }

    pub fn record_augmentation(&mut self) {
        self.metrics.augmentations += 1;
    }

    pub fn record_blossom(&mut self) {
        self.metrics.blossoms_contracted += 1;
    }

    pub fn record_scan(&mut self) {
        self.metrics.vertices_scanned += 1;
    }

    pub fn record_custom(&mut self, name: &str, value: f64) {
        self.metrics.custom_metrics.insert(name.to_owned(), value);
    }

    pub fn get_metrics(&self) -> AlgorithmMetrics {
        self.metrics.clone()
    }
}

impl Default for AlgorithmProfiler {
    fn default() -> Self {
        Self::new(true)
    }
}

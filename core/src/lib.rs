//! Edmonds Matching Core
//! Maximum cardinality matching on general undirected graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod data_structures;
pub mod execution;
pub mod validation;

pub use algorithm::graph::matching::{find_maximum_matching, BlossomMatcher, MatcherConfig};
pub use algorithm::state::Matching;
pub use algorithm::traits::{Algorithm, AlgorithmError, AlgorithmMetrics, NodeId};
pub use data_structures::graph::{Graph, GraphModel};
pub use execution::tracer::{ExecutionTracer, LogSink, ProgressSink, TraceEvent};
pub use validation::correctness::{verify_matching, VerificationLevel};

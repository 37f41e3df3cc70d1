//! Matching Correctness Verification
//!
//! Independent checks for a matching against the graph it was computed on.
//! The checks do not share code with the engine, so a defect in the engine
//! cannot mask itself here.
//!
//! # Verification Levels
//! - [`VerificationLevel::Basic`]: every matched pair is an edge of the graph
//!   and the mate relation is symmetric (hence injective)
//! - [`VerificationLevel::Full`]: additionally no edge joins two free
//!   vertices. This is the cheap maximality corollary; it holds for every
//!   maximum matching but does not prove maximum cardinality on its own.

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::state::Matching;
use crate::algorithm::traits::{AlgorithmError, NodeId};
use crate::data_structures::graph::GraphModel;

/// How thoroughly a result is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationLevel {
    /// No checks
    None,
    /// Pairs are edges, mate relation is symmetric
    #[default]
    Basic,
    /// Basic plus maximality
    Full,
}

impl VerificationLevel {
    pub const ALL: [VerificationLevel; 3] = [Self::None, Self::Basic, Self::Full];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Basic => "basic",
            Self::Full => "full",
        }
    }
}

impl Display for VerificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationLevel {
    type Err = AlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| AlgorithmError::InvalidParameter {
                name: "verification".into(),
                reason: format!("unknown level '{}', expected none, basic or full", s),
            })
    }
}

/// Summary of a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub level: VerificationLevel,
    pub matched_edges: usize,
    pub free_vertices: usize,
}

/// Verifies `matching` against `graph` at the requested level.
///
/// Fails with [`AlgorithmError::InvalidMatching`] naming the first violation.
pub fn verify_matching<G: GraphModel + ?Sized>(
    graph: &G,
    matching: &Matching,
    level: VerificationLevel,
) -> Result<ValidationReport, AlgorithmError> {
    let vertices: HashSet<NodeId> = graph.vertex_ids().into_iter().collect();
    let matched = matching.as_map().len();

    let report = ValidationReport {
        level,
        matched_edges: matching.len(),
        free_vertices: vertices.len().saturating_sub(matched),
    };

    if level == VerificationLevel::None {
        return Ok(report);
    }

    for (&v, &u) in matching.as_map() {
        if !vertices.contains(&v) || !vertices.contains(&u) {
            return Err(AlgorithmError::InvalidMatching(format!(
                "pair {} - {} references a vertex missing from the graph",
                v, u
            )));
        }
        if !graph.has_edge(v, u) {
            return Err(AlgorithmError::InvalidMatching(format!(
                "pair {} - {} is not an edge of the graph",
                v, u
            )));
        }
        if matching.mate(u) != Some(v) {
            return Err(AlgorithmError::InvalidMatching(format!(
                "pair {} - {} is not symmetric",
                v, u
            )));
        }
    }

    if level == VerificationLevel::Full {
        check_maximal(graph, matching)?;
    }

    Ok(report)
}

/// Fails when some edge has two free endpoints
pub fn check_maximal<G: GraphModel + ?Sized>(
    graph: &G,
    matching: &Matching,
) -> Result<(), AlgorithmError> {
    for v in graph.vertex_ids() {
        if matching.is_matched(v) {
            continue;
        }
        if let Some(&u) = graph
            .neighbors(v)
            .iter()
            .find(|&&u| u != v && !matching.is_matched(u))
        {
            return Err(AlgorithmError::InvalidMatching(format!(
                "edge {} - {} joins two free vertices",
                v, u
            )));
        }
    }
    Ok(())
}

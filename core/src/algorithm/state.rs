//! Matching state abstraction
//!
//! The matching is the only piece of algorithm state that outlives a phase.
//! It is stored as a symmetric mate map: whenever `v` is matched to `u`, both
//! `v -> u` and `u -> v` are present. A vertex absent from the map is free.
//!
//! # Invariants
//! - Symmetry: `mate[mate[v]] == v` for every matched `v`
//! - Injectivity: no vertex is the mate of two different vertices
//! - Irreflexivity: no vertex is its own mate

use std::collections::{BTreeSet, HashMap};

use serde::{Serialize, Serializer};

use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Symmetric vertex-to-vertex matching
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matching {
    mate: HashMap<NodeId, NodeId>,
}

impl Matching {
    /// Creates an empty matching
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a matching from a list of matched edges.
    ///
    /// Fails with [`AlgorithmError::InvalidMatching`] when an edge is a
    /// self-loop or when a vertex would be matched twice.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, AlgorithmError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut matching = Self::new();
        for (a, b) in pairs {
            if a == b {
                return Err(AlgorithmError::InvalidMatching(format!(
                    "vertex {} cannot be matched to itself",
                    a
                )));
            }
            for v in [a, b] {
                if matching.is_matched(v) {
                    return Err(AlgorithmError::InvalidMatching(format!(
                        "vertex {} is matched more than once",
                        v
                    )));
                }
            }
            matching.mate.insert(a, b);
            matching.mate.insert(b, a);
        }
        Ok(matching)
    }

    /// Wraps a raw mate map, checking symmetry and irreflexivity.
    ///
    /// Symmetry implies injectivity: if two keys shared a mate, that mate
    /// would have to map back to both of them.
    pub fn from_map(mate: HashMap<NodeId, NodeId>) -> Result<Self, AlgorithmError> {
        for (&v, &u) in &mate {
            if v == u {
                return Err(AlgorithmError::InvalidMatching(format!(
                    "vertex {} cannot be matched to itself",
                    v
                )));
            }
            if mate.get(&u) != Some(&v) {
                return Err(AlgorithmError::InvalidMatching(format!(
                    "mate map is not symmetric at {} -> {}",
                    v, u
                )));
            }
        }
        Ok(Self { mate })
    }

    /// Returns the vertex matched to `v`, if any
    #[inline]
    pub fn mate(&self, v: NodeId) -> Option<NodeId> {
        self.mate.get(&v).copied()
    }

    #[inline]
    pub fn is_matched(&self, v: NodeId) -> bool {
        self.mate.contains_key(&v)
    }

    /// Number of matched edges (half the number of matched vertices)
    pub fn len(&self) -> usize {
        self.mate.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.mate.is_empty()
    }

    /// Matched edges, each reported once as `(smaller, larger)`, in ascending order
    pub fn pairs(&self) -> Vec<(NodeId, NodeId)> {
        let pairs: BTreeSet<(NodeId, NodeId)> = self
            .mate
            .iter()
            .map(|(&a, &b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        pairs.into_iter().collect()
    }

    pub fn as_map(&self) -> &HashMap<NodeId, NodeId> {
        &self.mate
    }

    pub fn into_map(self) -> HashMap<NodeId, NodeId> {
        self.mate
    }
}

impl Serialize for Matching {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.pairs().serialize(serializer)
    }
}

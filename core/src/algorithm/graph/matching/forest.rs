//! Alternating forest growth
//!
//! A phase grows one alternating tree breadth-first from a single free root.
//! Even vertices are reached from the root by an alternating path whose last
//! edge is matched (or are the root); odd vertices are reached over an
//! unmatched edge. Only even vertices are ever queued for expansion, and an
//! odd vertex is expanded solely through its matched partner, which keeps every
//! root-to-vertex tree path alternating.

use std::collections::VecDeque;

use log::{debug, trace};

use super::augmentation::augment;
use super::blossom::contract_blossom;
use super::MatchingRun;
use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::union_find::BaseUnionFind;

/// Per-phase vertex label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Unvisited,
    Even,
    Odd,
}

/// Labels, parent pointers and the expansion queue of one alternating tree
#[derive(Debug, Clone)]
pub struct AlternatingForest {
    root: usize,
    label: Vec<Label>,
    /// Odd vertices point at the even vertex that reached them; even vertices
    /// point at their mate until a blossom redirects them.
    parent: Vec<Option<usize>>,
    queue: VecDeque<usize>,
}

impl AlternatingForest {
    pub fn new(n: usize) -> Self {
        Self {
            root: 0,
            label: vec![Label::Unvisited; n],
            parent: vec![None; n],
            queue: VecDeque::new(),
        }
    }

    /// Clears all per-phase state and plants `root` as the only even vertex
    pub fn reset(&mut self, root: usize) {
        self.label.fill(Label::Unvisited);
        self.parent.fill(None);
        self.queue.clear();

        self.root = root;
        self.label[root] = Label::Even;
        self.queue.push_back(root);
    }

    #[inline]
    pub fn root(&self) -> usize {
        self.root
    }

    #[inline]
    pub fn label(&self, v: usize) -> Label {
        self.label[v]
    }

    #[inline]
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parent[v]
    }

    #[inline]
    pub fn set_parent(&mut self, v: usize, parent: usize) {
        self.parent[v] = Some(parent);
    }

    /// Labels `v` odd, reached from the even vertex `parent` over an unmatched edge
    pub fn mark_odd(&mut self, v: usize, parent: usize) {
        self.label[v] = Label::Odd;
        self.parent[v] = Some(parent);
    }

    /// Labels `v` even, reached from its mate `parent`, and queues it
    pub fn mark_even(&mut self, v: usize, parent: usize) {
        self.label[v] = Label::Even;
        self.parent[v] = Some(parent);
        self.queue.push_back(v);
    }

    /// Makes a vertex swallowed by a blossom even.
    ///
    /// Returns `true` when the vertex was not even before and has been queued.
    pub fn absorb(&mut self, v: usize) -> bool {
        if self.label[v] == Label::Even {
            return false;
        }
        self.label[v] = Label::Even;
        self.queue.push_back(v);
        true
    }

    #[inline]
    pub fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

/// Everything a phase mutates besides the matching itself.
///
/// Buffers are allocated once per run and cleared by [`PhaseContext::begin`],
/// so no blossom or label survives into the next phase.
#[derive(Debug, Clone)]
pub struct PhaseContext {
    pub forest: AlternatingForest,
    pub bases: BaseUnionFind,
    /// Scratch marks for the ancestor search, all `false` between searches
    pub(super) ancestor_marks: Vec<bool>,
}

impl PhaseContext {
    pub fn new(n: usize) -> Self {
        Self {
            forest: AlternatingForest::new(n),
            bases: BaseUnionFind::new(n),
            ancestor_marks: vec![false; n],
        }
    }

    pub fn begin(&mut self, root: usize) {
        self.forest.reset(root);
        self.bases.reset();
    }
}

/// Result of one phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// An augmenting path was found and applied
    Augmented,
    /// The tree stopped growing without reaching a free vertex
    Exhausted,
}

/// Grows an alternating tree from `root` and augments along the first
/// augmenting path found.
pub(super) fn grow_and_augment(
    run: &mut MatchingRun<'_, '_>,
    phase: &mut PhaseContext,
    root: usize,
) -> Result<PhaseOutcome, AlgorithmError> {
    let graph = run.graph;
    phase.begin(root);
    run.profiler.record_phase();
    debug!("phase rooted at {}", graph.id(root));

    while let Some(v) = phase.forest.pop() {
        run.profiler.record_scan();

        for &u in graph.neighbors(v) {
            // Same blossom, or the matched edge v already hangs from
            if phase.bases.same_set(u, v) || run.mate[v] == Some(u) {
                continue;
            }

            match phase.forest.label(u) {
                Label::Unvisited => {
                    phase.forest.mark_odd(u, v);
                    run.notify_tree_edge(v, u);

                    match run.mate[u] {
                        None => {
                            augment(run, phase, u)?;
                            return Ok(PhaseOutcome::Augmented);
                        }
                        Some(w) => {
                            phase.forest.mark_even(w, u);
                            run.notify_tree_edge(u, w);
                        }
                    }
                }
                _ => {
                    let base = phase.bases.find(u);
                    if phase.forest.label(base) == Label::Even {
                        contract_blossom(run, phase, v, u)?;
                    }
                }
            }
        }
    }

    trace!("phase rooted at {} exhausted", graph.id(root));
    Ok(PhaseOutcome::Exhausted)
}

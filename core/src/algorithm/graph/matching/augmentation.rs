//! Path reconstruction and augmentation
//!
//! Once the tree touches a free vertex `u`, the augmenting path is read back
//! from `u` toward the root by alternating parent pointers (unmatched edges)
//! and mates (matched edges). Flipping the path matches its first and last
//! vertices and re-pairs every interior vertex with its other path neighbour.

use log::debug;

use super::forest::PhaseContext;
use super::MatchingRun;
use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Augments the matching along the tree path ending at the free vertex `free`
pub(super) fn augment(
    run: &mut MatchingRun<'_, '_>,
    phase: &PhaseContext,
    free: usize,
) -> Result<(), AlgorithmError> {
    let path = reconstruct_path(run, phase, free)?;
    let root = phase.forest.root();

    if path.len() % 2 != 0 || path.first() != Some(&root) {
        return Err(run.inconsistency(format!(
            "augmenting path of length {} does not start at root {}",
            path.len(),
            run.graph.id(root)
        )));
    }
    if run.mate[root].is_some() || run.mate[free].is_some() {
        return Err(run.inconsistency(format!(
            "augmenting path endpoints {} and {} are not both free",
            run.graph.id(root),
            run.graph.id(free)
        )));
    }

    for pair in path.chunks_exact(2) {
        run.mate[pair[0]] = Some(pair[1]);
        run.mate[pair[1]] = Some(pair[0]);
    }
    run.matched_vertices += 2;

    // A repeated vertex on the path would leave a one-sided mate behind
    for &x in &path {
        let symmetric = run.mate[x].map_or(false, |m| run.mate[m] == Some(x));
        if !symmetric {
            return Err(run.inconsistency(format!(
                "mate of {} is not symmetric after augmentation",
                run.graph.id(x)
            )));
        }
    }

    run.profiler.record_augmentation();
    debug!(
        "augmented {} -> {} along {} vertices, matching size now {}",
        run.graph.id(root),
        run.graph.id(free),
        path.len(),
        run.matched_vertices / 2
    );

    if run.sink.is_some() {
        let pairs: Vec<(NodeId, NodeId)> = path
            .chunks_exact(2)
            .map(|pair| (run.graph.id(pair[0]), run.graph.id(pair[1])))
            .collect();
        run.notify_augmented(&pairs);
    }

    Ok(())
}

/// Reads the path `root, ..., parent(free), free` out of the forest.
///
/// The walk is bounded by the vertex count; a missing parent or an overlong
/// walk is an internal inconsistency.
pub(super) fn reconstruct_path(
    run: &MatchingRun<'_, '_>,
    phase: &PhaseContext,
    free: usize,
) -> Result<Vec<usize>, AlgorithmError> {
    let limit = run.graph.node_count();
    let mut path = vec![free];
    let mut x = free;

    loop {
        let p = phase.forest.parent(x).ok_or_else(|| {
            run.inconsistency(format!(
                "vertex {} on the augmenting path has no parent",
                run.graph.id(x)
            ))
        })?;
        path.push(p);

        match run.mate[p] {
            None => break,
            Some(m) => {
                path.push(m);
                x = m;
            }
        }

        if path.len() > limit {
            return Err(run.inconsistency(format!(
                "augmenting path from {} exceeds {} vertices",
                run.graph.id(free),
                limit
            )));
        }
    }

    path.reverse();
    Ok(path)
}

//! Blossom detection and contraction
//!
//! An edge between two even vertices with different bases closes an odd
//! alternating cycle. The cycle is contracted in place: every vertex on it is
//! merged into the union-find set of the cycle's topmost vertex (the lowest
//! common ancestor of the two endpoints), and every odd vertex on it turns
//! even, since an odd cycle lets the tree reach it with either parity.
//!
//! Contraction is never undone within a phase and never survives one; the
//! union-find is reset when the next phase begins.
//!
//! # Parent redirection
//! The walks from each endpoint up to the ancestor re-point the parent of
//! every even vertex they pass at the vertex across the closing edge. After
//! that, reconstructing a path through a formerly even vertex that is now
//! entered "from the odd side" follows the other way around the cycle, which
//! is the only direction that stays alternating.

use log::debug;

use super::forest::PhaseContext;
use super::MatchingRun;
use crate::algorithm::traits::{AlgorithmError, NodeId};

/// Contracts the blossom closed by the edge `v - u`
pub(super) fn contract_blossom(
    run: &mut MatchingRun<'_, '_>,
    phase: &mut PhaseContext,
    v: usize,
    u: usize,
) -> Result<(), AlgorithmError> {
    let lca = lowest_common_ancestor(run, phase, v, u)?;

    let mut absorbed = Vec::new();
    mark_cycle_side(run, phase, v, lca, u, &mut absorbed)?;
    mark_cycle_side(run, phase, u, lca, v, &mut absorbed)?;

    for &b in &absorbed {
        phase.bases.contract(b, lca);
    }
    for &b in &absorbed {
        phase.forest.absorb(b);
    }

    if phase.bases.find(v) != lca || phase.bases.find(u) != lca {
        return Err(run.inconsistency(format!(
            "blossom over {} - {} did not merge into base {}",
            run.graph.id(v),
            run.graph.id(u),
            run.graph.id(lca)
        )));
    }

    run.profiler.record_blossom();
    debug!(
        "contracted blossom at base {} ({} sub-vertices)",
        run.graph.id(lca),
        absorbed.len()
    );

    if run.sink.is_some() {
        let members = blossom_members(run, phase, lca);
        run.notify_blossom(lca, &members);
    }

    Ok(())
}

/// Every vertex whose base is `base`, the base first and the rest in
/// enumeration order. Vertices of blossoms nested inside are included.
fn blossom_members(run: &MatchingRun<'_, '_>, phase: &mut PhaseContext, base: usize) -> Vec<NodeId> {
    let mut members = vec![run.graph.id(base)];
    for x in 0..run.graph.node_count() {
        if x != base && phase.bases.find(x) == base {
            members.push(run.graph.id(x));
        }
    }
    members
}

/// Finds the base of the lowest common ancestor of `a` and `b` in the current tree.
///
/// Both walks climb `base -> mate -> parent` and compare bases, never raw
/// vertices, because earlier contractions alias whole cycles to one base.
/// Each walk is bounded by the vertex count.
pub(super) fn lowest_common_ancestor(
    run: &MatchingRun<'_, '_>,
    phase: &mut PhaseContext,
    a: usize,
    b: usize,
) -> Result<usize, AlgorithmError> {
    let mut marked = Vec::new();
    let outcome = search_ancestor(run, phase, a, b, &mut marked);

    for base in marked {
        phase.ancestor_marks[base] = false;
    }

    outcome.map_err(|message| run.inconsistency(message))
}

fn search_ancestor(
    run: &MatchingRun<'_, '_>,
    phase: &mut PhaseContext,
    a: usize,
    b: usize,
    marked: &mut Vec<usize>,
) -> Result<usize, String> {
    let limit = run.graph.node_count();
    let root = phase.forest.root();

    let mut x = a;
    let mut steps = 0;
    loop {
        let base = phase.bases.find(x);
        phase.ancestor_marks[base] = true;
        marked.push(base);

        match run.mate[base] {
            None if base == root => break,
            None => {
                return Err(format!(
                    "ancestor walk from {} stopped at free vertex {} instead of the root",
                    run.graph.id(a),
                    run.graph.id(base)
                ));
            }
            Some(m) => x = tree_parent(run, phase, m)?,
        }

        steps += 1;
        if steps > limit {
            return Err(format!(
                "ancestor walk from {} exceeded {} steps",
                run.graph.id(a),
                limit
            ));
        }
    }

    let mut y = b;
    let mut steps = 0;
    loop {
        let base = phase.bases.find(y);
        if phase.ancestor_marks[base] {
            return Ok(base);
        }

        match run.mate[base] {
            None => {
                return Err(format!(
                    "no common ancestor for {} and {}",
                    run.graph.id(a),
                    run.graph.id(b)
                ));
            }
            Some(m) => y = tree_parent(run, phase, m)?,
        }

        steps += 1;
        if steps > limit {
            return Err(format!(
                "ancestor walk from {} exceeded {} steps",
                run.graph.id(b),
                limit
            ));
        }
    }
}

fn tree_parent(run: &MatchingRun<'_, '_>, phase: &PhaseContext, odd: usize) -> Result<usize, String> {
    phase
        .forest
        .parent(odd)
        .ok_or_else(|| format!("odd vertex {} has no parent", run.graph.id(odd)))
}

/// Walks from `v` up to the blossom base `lca`, collecting the bases of every
/// matched pair met and redirecting parents toward `child`.
fn mark_cycle_side(
    run: &MatchingRun<'_, '_>,
    phase: &mut PhaseContext,
    mut v: usize,
    lca: usize,
    mut child: usize,
    absorbed: &mut Vec<usize>,
) -> Result<(), AlgorithmError> {
    let limit = run.graph.node_count();
    let mut steps = 0;

    while phase.bases.find(v) != lca {
        steps += 1;
        if steps > limit {
            return Err(run.inconsistency(format!(
                "blossom walk exceeded {} steps before reaching base {}",
                limit,
                run.graph.id(lca)
            )));
        }

        let m = run.mate[v].ok_or_else(|| {
            run.inconsistency(format!(
                "even vertex {} below base {} is unmatched",
                run.graph.id(v),
                run.graph.id(lca)
            ))
        })?;

        absorbed.push(phase.bases.find(v));
        absorbed.push(phase.bases.find(m));

        phase.forest.set_parent(v, child);
        child = m;
        v = phase.forest.parent(m).ok_or_else(|| {
            run.inconsistency(format!("odd vertex {} has no parent", run.graph.id(m)))
        })?;
    }

    Ok(())
}

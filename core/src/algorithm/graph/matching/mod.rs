//! Maximum Cardinality Matching in General Graphs
//!
//! Implementation of Edmonds' blossom algorithm for maximum cardinality
//! matching on undirected graphs that need not be bipartite. Augmenting paths
//! are searched breadth-first in an alternating tree; odd cycles (blossoms)
//! are contracted through a union-find over blossom bases, which is what makes
//! the search complete on non-bipartite graphs.
//!
//! # Mathematical Foundations
//!
//! Berge's theorem: a matching is maximum iff it admits no augmenting path.
//! The engine stops only after a full pass over every free vertex has shown
//! that no augmenting path starts there.
//!
//! Edmonds' lemma: an augmenting path exists in `G` iff one exists in the
//! graph `G/B` obtained by contracting a blossom `B`. Contraction therefore
//! preserves the search's correctness while removing the odd cycle that
//! would otherwise trap a bipartite-style search.
//!
//! # Algorithmic Complexity
//!
//! - **Time Complexity**: O(V · (V + E) · α(V)). A free vertex that fails to
//!   root an augmenting path never succeeds later, so the confirming pass is
//!   bounded by the first one.
//! - **Space Complexity**: O(V + E) for the dense snapshot and phase buffers
//!
//! # Structure
//!
//! - `forest`: labels, parents, queue and the growth loop of one phase
//! - `blossom`: ancestor search and in-place contraction
//! - `augmentation`: path reconstruction and matching flip
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod augmentation;
mod blossom;
mod forest;

use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};

pub use self::forest::{AlternatingForest, Label, PhaseContext, PhaseOutcome};

use crate::algorithm::state::Matching;
use crate::algorithm::traits::{
    Algorithm, AlgorithmComplexity, AlgorithmError, AlgorithmId, AlgorithmMetrics,
    AlgorithmParameter, AlgorithmProfiler, ExecutionResult, NodeId, ParameterType,
};
use crate::data_structures::graph::{GraphModel, GraphSnapshot};
use crate::execution::tracer::ProgressSink;
use crate::validation::correctness::{verify_matching, VerificationLevel};

// ═══════════════════════════════════════════════════════════════════════════════════════
// CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Typed configuration behind the string parameters of [`BlossomMatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Checks applied to the result before it is returned
    pub verification: VerificationLevel,

    /// Whether the run is timed
    pub record_metrics: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            verification: VerificationLevel::Basic,
            record_metrics: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// RUN STATE
// ═══════════════════════════════════════════════════════════════════════════════════════

/// State shared by all phases of one run.
///
/// The matching lives here and outlives phases; everything phase-scoped lives
/// in [`PhaseContext`], which the phase loop owns and lends to helpers.
struct MatchingRun<'g, 's> {
    graph: &'g GraphSnapshot,
    /// Dense mate array; `None` marks a free vertex
    mate: Vec<Option<usize>>,
    matched_vertices: usize,
    sink: Option<&'s mut dyn ProgressSink>,
    profiler: AlgorithmProfiler,
}

impl<'g, 's> MatchingRun<'g, 's> {
    fn new(
        graph: &'g GraphSnapshot,
        mate: Vec<Option<usize>>,
        sink: Option<&'s mut dyn ProgressSink>,
        profiler: AlgorithmProfiler,
    ) -> Self {
        let matched_vertices = mate.iter().filter(|m| m.is_some()).count();
        Self {
            graph,
            mate,
            matched_vertices,
            sink,
            profiler,
        }
    }

    /// Runs outer passes until one completes without augmenting.
    fn execute(&mut self) -> Result<(), AlgorithmError> {
        let n = self.graph.node_count();
        let mut phase = PhaseContext::new(n);
        let mut passes = 0;

        loop {
            passes += 1;
            self.begin_pass(passes)?;

            let mut augmented = 0;
            for root in 0..n {
                if self.mate[root].is_some() {
                    continue;
                }
                if forest::grow_and_augment(self, &mut phase, root)? == PhaseOutcome::Augmented {
                    augmented += 1;
                }
            }

            debug!(
                "outer pass {} augmented {} paths, matching size {}",
                passes,
                augmented,
                self.matched_vertices / 2
            );

            if augmented == 0 {
                return Ok(());
            }
        }
    }

    /// Opens outer pass number `pass` (1-based).
    ///
    /// Every pass but the last augments at least once, so more than
    /// `n / 2 + 1` passes means the matching stopped growing without the
    /// loop noticing.
    fn begin_pass(&mut self, pass: usize) -> Result<(), AlgorithmError> {
        let max_passes = self.graph.node_count() / 2 + 1;
        if pass > max_passes {
            return Err(self.inconsistency(format!(
                "outer pass limit of {} exceeded",
                max_passes
            )));
        }
        self.profiler.record_outer_pass();
        Ok(())
    }

    fn into_matching(self) -> Result<Matching, AlgorithmError> {
        let graph = self.graph;
        let pairs = self
            .mate
            .iter()
            .enumerate()
            .filter_map(|(v, m)| m.filter(|&u| v < u).map(|u| (graph.id(v), graph.id(u))));
        Matching::from_pairs(pairs)
    }

    fn notify_tree_edge(&mut self, parent: usize, child: usize) {
        let (parent, child) = (self.graph.id(parent), self.graph.id(child));
        trace!("tree edge {} -> {}", parent, child);
        if let Some(sink) = self.sink.as_mut() {
            sink.tree_edge_added(parent, child);
        }
    }

    fn notify_blossom(&mut self, base: usize, members: &[NodeId]) {
        let base = self.graph.id(base);
        if let Some(sink) = self.sink.as_mut() {
            sink.blossom_contracted(base, members);
        }
    }

    fn notify_augmented(&mut self, pairs: &[(NodeId, NodeId)]) {
        if let Some(sink) = self.sink.as_mut() {
            sink.path_augmented(pairs);
        }
    }

    /// Builds (and logs) an internal inconsistency error
    fn inconsistency(&self, message: String) -> AlgorithmError {
        error!("matching invariant violated: {}", message);
        AlgorithmError::InternalInconsistency(message)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// BLOSSOM MATCHER
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Edmonds' blossom algorithm for maximum cardinality matching
///
/// # Determinism
/// Roots are tried in the graph's vertex enumeration order and neighbours in
/// adjacency order, so the returned matching is a pure function of the graph
/// (and seed). Its size never depends on those orders.
#[derive(Debug, Clone, Default)]
pub struct BlossomMatcher {
    config: MatcherConfig,
    last_metrics: Option<AlgorithmMetrics>,
}

impl BlossomMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatcherConfig) -> Self {
        Self {
            config,
            last_metrics: None,
        }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Metrics of the most recent successful run
    pub fn metrics(&self) -> Option<&AlgorithmMetrics> {
        self.last_metrics.as_ref()
    }

    /// Computes a maximum matching of `graph` starting from the empty matching
    pub fn find_maximum_matching<G: GraphModel + ?Sized>(
        &mut self,
        graph: &G,
        sink: Option<&mut dyn ProgressSink>,
    ) -> Result<Matching, AlgorithmError> {
        self.find_maximum_matching_from(graph, &Matching::new(), sink)
    }

    /// Computes a maximum matching of `graph`, resuming from `seed`.
    ///
    /// The seed must be a matching of `graph`: every pair an edge, every
    /// vertex known. The graph is validated before any matching state exists,
    /// so a malformed graph fails with [`AlgorithmError::InvalidGraph`] and a
    /// malformed seed with [`AlgorithmError::InvalidMatching`].
    pub fn find_maximum_matching_from<G: GraphModel + ?Sized>(
        &mut self,
        graph: &G,
        seed: &Matching,
        sink: Option<&mut dyn ProgressSink>,
    ) -> Result<Matching, AlgorithmError> {
        let snapshot = GraphSnapshot::capture(graph)?;
        let mate = seed_mates(&snapshot, seed)?;

        let mut run = MatchingRun::new(
            &snapshot,
            mate,
            sink,
            AlgorithmProfiler::new(self.config.record_metrics),
        );

        run.profiler.start();
        let outcome = run.execute();
        run.profiler.stop();
        outcome?;

        let free_vertices = snapshot.node_count() - run.matched_vertices;
        run.profiler.record_custom("free_vertices", free_vertices as f64);
        let metrics = run.profiler.get_metrics();
        let matching = run.into_matching()?;

        if self.config.verification != VerificationLevel::None {
            verify_matching(graph, &matching, self.config.verification).map_err(|err| {
                error!("matching failed {} verification: {}", self.config.verification, err);
                AlgorithmError::InternalInconsistency(err.to_string())
            })?;
        }

        info!(
            "maximum matching of size {} on {} vertices ({} phases, {} blossoms)",
            matching.len(),
            snapshot.node_count(),
            metrics.phases,
            metrics.blossoms_contracted
        );

        self.last_metrics = Some(metrics);
        Ok(matching)
    }
}

/// Translates a seed matching into the dense mate array
fn seed_mates(snapshot: &GraphSnapshot, seed: &Matching) -> Result<Vec<Option<usize>>, AlgorithmError> {
    let mut mate = vec![None; snapshot.node_count()];

    for (&v, &u) in seed.as_map() {
        let (Some(iv), Some(iu)) = (snapshot.index_of(v), snapshot.index_of(u)) else {
            return Err(AlgorithmError::InvalidMatching(format!(
                "seed pair {} - {} references a vertex missing from the graph",
                v, u
            )));
        };
        if !snapshot.contains_edge(iv, iu) {
            return Err(AlgorithmError::InvalidMatching(format!(
                "seed pair {} - {} is not an edge of the graph",
                v, u
            )));
        }
        mate[iv] = Some(iu);
    }

    Ok(mate)
}

/// Computes a maximum matching of `graph` with the default configuration
pub fn find_maximum_matching<G: GraphModel + ?Sized>(graph: &G) -> Result<Matching, AlgorithmError> {
    BlossomMatcher::new().find_maximum_matching(graph, None)
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// ALGORITHM TRAIT IMPLEMENTATION
// ═══════════════════════════════════════════════════════════════════════════════════════

impl Algorithm for BlossomMatcher {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("edmonds_blossom")
    }

    fn name(&self) -> &'static str {
        "Edmonds' Blossom Maximum Matching"
    }

    fn category(&self) -> &'static str {
        "graph_matching"
    }

    fn description(&self) -> String {
        "Maximum cardinality matching on general undirected graphs using Edmonds' \
         blossom algorithm: breadth-first alternating trees, union-find blossom \
         contraction and augmentation until no augmenting path remains."
            .to_string()
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(V * (V + E) * alpha(V))".to_string(),
            space_complexity: "O(V + E)".to_string(),
        }
    }

    fn parameters(&self) -> Vec<AlgorithmParameter> {
        vec![
            AlgorithmParameter {
                name: "verification".to_string(),
                value: self.config.verification.to_string(),
                value_type: ParameterType::Enum(
                    VerificationLevel::ALL.iter().map(|l| l.to_string()).collect(),
                ),
                description: "Checks applied to the result before it is returned".to_string(),
            },
            AlgorithmParameter {
                name: "record_metrics".to_string(),
                value: self.config.record_metrics.to_string(),
                value_type: ParameterType::Boolean,
                description: "Time the run and report it in the metrics".to_string(),
            },
        ]
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "verification" => {
                self.config.verification = value.parse()?;
                Ok(())
            }
            "record_metrics" => match value {
                "true" | "false" => {
                    self.config.record_metrics = value == "true";
                    Ok(())
                }
                _ => Err(AlgorithmError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("Invalid value '{}'. Valid options: true, false", value),
                }),
            },
            _ => Err(AlgorithmError::InvalidParameter {
                name: name.to_string(),
                reason: "Unknown parameter. Valid parameters: verification, record_metrics"
                    .to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<String> {
        match name {
            "verification" => Some(self.config.verification.to_string()),
            "record_metrics" => Some(self.config.record_metrics.to_string()),
            _ => None,
        }
    }

    fn execute_with_tracing<G: GraphModel>(
        &mut self,
        graph: &G,
        tracer: Option<&mut dyn ProgressSink>,
    ) -> Result<ExecutionResult, AlgorithmError> {
        let matching = self.find_maximum_matching(graph, tracer)?;
        let metrics = self.last_metrics.clone().unwrap_or_default();
        Ok(ExecutionResult { matching, metrics })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// UNIT TESTS
// ═══════════════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::graph::Graph;
    use crate::execution::tracer::{ExecutionTracer, LogSink, TraceEvent};
    use crate::validation::correctness::check_maximal;
    use proptest::prelude::*;

    fn n(id: usize) -> NodeId {
        NodeId(id)
    }

    fn graph(edges: &[(usize, usize)]) -> Graph {
        Graph::from_edges(edges.iter().map(|&(a, b)| (n(a), n(b)))).unwrap()
    }

    /// Checks symmetry, injectivity and that every pair is an edge
    fn assert_valid(graph: &Graph, matching: &Matching) {
        let mut seen = std::collections::HashSet::new();
        for (&v, &u) in matching.as_map() {
            assert_eq!(matching.mate(u), Some(v), "mate of {u} should be {v}");
            assert!(graph.has_edge(v, u), "{v} - {u} is not an edge");
            assert!(seen.insert(u), "{u} is the mate of two vertices");
        }
    }

    /// Exhaustive maximum matching size for small graphs
    fn brute_force_size(n: usize, edges: &[(usize, usize)]) -> usize {
        fn solve(v: usize, n: usize, adj: &[Vec<bool>], used: &mut Vec<bool>) -> usize {
            let Some(v) = (v..n).find(|&x| !used[x]) else {
                return 0;
            };
            used[v] = true;
            let mut best = solve(v + 1, n, adj, used);
            for u in (v + 1)..n {
                if adj[v][u] && !used[u] {
                    used[u] = true;
                    best = best.max(1 + solve(v + 1, n, adj, used));
                    used[u] = false;
                }
            }
            used[v] = false;
            best
        }

        let mut adj = vec![vec![false; n]; n];
        for &(a, b) in edges {
            adj[a][b] = true;
            adj[b][a] = true;
        }
        solve(0, n, &adj, &mut vec![false; n])
    }

    #[test]
    fn test_empty_graph() {
        let matching = find_maximum_matching(&Graph::new()).unwrap();
        assert!(matching.is_empty());
    }

    #[test]
    fn test_edgeless_graph() {
        let mut g = Graph::new();
        for id in 0..5 {
            g.add_node(n(id)).unwrap();
        }
        let matching = find_maximum_matching(&g).unwrap();
        assert!(matching.is_empty());
    }

    #[test]
    fn test_single_edge() {
        let g = graph(&[(1, 2)]);
        let matching = find_maximum_matching(&g).unwrap();
        assert_eq!(matching.pairs(), vec![(n(1), n(2))]);
    }

    #[test]
    fn test_isolated_vertex_stays_free() {
        let mut g = graph(&[(1, 2), (2, 3)]);
        g.add_node(n(7)).unwrap();

        let matching = find_maximum_matching(&g).unwrap();
        assert_eq!(matching.len(), 1);
        assert!(!matching.is_matched(n(7)));
    }

    #[test]
    fn test_bipartite_path() {
        let g = graph(&[(1, 2), (2, 3), (3, 4)]);
        let matching = find_maximum_matching(&g).unwrap();

        assert_eq!(matching.len(), 2);
        assert_eq!(matching.pairs(), vec![(n(1), n(2)), (n(3), n(4))]);
    }

    #[test]
    fn test_path_requires_augmentation_through_matched_edge() {
        // Greedy picks 2-3 first; the optimum needs 1-2 and 3-4
        let g = graph(&[(2, 3), (1, 2), (3, 4)]);
        let matching = find_maximum_matching(&g).unwrap();

        assert_eq!(matching.len(), 2);
        assert_eq!(matching.mate(n(1)), Some(n(2)));
        assert_eq!(matching.mate(n(4)), Some(n(3)));
    }

    #[test]
    fn test_triangle_with_three_pendants() {
        let g = graph(&[(1, 2), (2, 3), (3, 1), (1, 4), (2, 5), (3, 6)]);
        let matching = find_maximum_matching(&g).unwrap();

        assert_eq!(matching.len(), 3);
        assert_valid(&g, &matching);
    }

    #[test]
    fn test_triangle_with_one_pendant_augments_through_blossom() {
        let g = graph(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        let mut tracer = ExecutionTracer::new();
        let mut matcher = BlossomMatcher::new();

        let matching = matcher.find_maximum_matching(&g, Some(&mut tracer)).unwrap();

        assert_eq!(matching.len(), 2);
        assert_eq!(matching.mate(n(4)), Some(n(1)));
        assert_eq!(matching.mate(n(2)), Some(n(3)));
        assert_eq!(tracer.blossom_count(), 1);
        assert_eq!(matcher.metrics().unwrap().blossoms_contracted, 1);
    }

    #[test]
    fn test_five_cycle_with_pendant_contracts_blossom() {
        // Vertex order 2, 3, 4, 5, 1, 6: roots 2 and 4 match 2-3 and 4-5 first,
        // leaving 1 and 6 free with the odd cycle between them.
        let g = graph(&[(2, 3), (4, 5), (5, 1), (1, 2), (3, 4), (5, 6)]);
        let mut tracer = ExecutionTracer::new();

        let matching = BlossomMatcher::new()
            .find_maximum_matching(&g, Some(&mut tracer))
            .unwrap();

        assert_eq!(matching.len(), 3);
        assert_eq!(
            matching.pairs(),
            vec![(n(1), n(2)), (n(3), n(4)), (n(5), n(6))]
        );
        assert!(tracer.blossom_count() >= 1);

        let blossom = tracer
            .points()
            .iter()
            .find_map(|p| match &p.event {
                TraceEvent::BlossomContracted { base, members } => Some((*base, members.clone())),
                _ => None,
            })
            .unwrap();
        assert_eq!(blossom.0, n(1));
        assert_eq!(blossom.1.len(), 5);
    }

    #[test]
    fn test_five_cycle_with_pendant_in_natural_order() {
        let g = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (5, 6)]);
        let matching = find_maximum_matching(&g).unwrap();
        assert_eq!(matching.len(), 3);
    }

    #[test]
    fn test_seeded_five_cycle_contracts_blossom() {
        let g = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (5, 6)]);
        let seed = Matching::from_pairs([(n(2), n(3)), (n(4), n(5))]).unwrap();
        let mut tracer = ExecutionTracer::structural_only();

        let matching = BlossomMatcher::new()
            .find_maximum_matching_from(&g, &seed, Some(&mut tracer))
            .unwrap();

        assert_eq!(matching.len(), 3);
        assert_eq!(tracer.blossom_count(), 1);
        assert_eq!(tracer.augmentation_count(), 1);

        match &tracer.points().last().unwrap().event {
            TraceEvent::PathAugmented { pairs } => {
                assert_eq!(pairs, &vec![(n(1), n(2)), (n(3), n(4)), (n(5), n(6))]);
            }
            other => panic!("expected augmentation, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_blossom_reports_all_members() {
        // Root 0 is the only free vertex. The first blossom 0-1-2-5-6 closes
        // over 2 - 5; the second closes over 4 - 6 and swallows it whole.
        let g = graph(&[(0, 1), (1, 2), (2, 3), (3, 4), (2, 5), (5, 6), (4, 6), (6, 0)]);
        let seed = Matching::from_pairs([(n(1), n(2)), (n(3), n(4)), (n(5), n(6))]).unwrap();
        let mut tracer = ExecutionTracer::structural_only();

        let matching = BlossomMatcher::new()
            .find_maximum_matching_from(&g, &seed, Some(&mut tracer))
            .unwrap();
        assert_eq!(matching, seed);

        let blossoms: Vec<(NodeId, Vec<NodeId>)> = tracer
            .points()
            .iter()
            .filter_map(|p| match &p.event {
                TraceEvent::BlossomContracted { base, members } => Some((*base, members.clone())),
                _ => None,
            })
            .collect();

        assert_eq!(blossoms.len(), 2);
        assert_eq!(blossoms[0], (n(0), vec![n(0), n(1), n(2), n(5), n(6)]));
        assert_eq!(blossoms[1].0, n(0));
        assert_eq!(blossoms[1].1, (0..7).map(n).collect::<Vec<_>>());
    }

    #[test]
    fn test_outer_pass_limit() {
        let g = graph(&[(1, 2), (3, 4)]);
        let snapshot = GraphSnapshot::capture(&g).unwrap();
        let mut run = MatchingRun::new(&snapshot, vec![None; 4], None, AlgorithmProfiler::new(false));

        // Four vertices allow at most three passes
        assert!(run.begin_pass(3).is_ok());
        assert!(matches!(
            run.begin_pass(4),
            Err(AlgorithmError::InternalInconsistency(_))
        ));
        assert_eq!(run.profiler.get_metrics().outer_passes, 1);
    }

    #[test]
    fn test_petersen_graph_has_perfect_matching() {
        let outer = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
        let spokes = [(0, 5), (1, 6), (2, 7), (3, 8), (4, 9)];
        let inner = [(5, 7), (7, 9), (9, 6), (6, 8), (8, 5)];
        let edges: Vec<_> = outer.iter().chain(&spokes).chain(&inner).copied().collect();
        let g = graph(&edges);

        let matching = find_maximum_matching(&g).unwrap();
        assert_eq!(matching.len(), 5);
        assert_valid(&g, &matching);
    }

    #[test]
    fn test_nested_blossoms() {
        // Two triangles chained through 3 - 4, with stems hanging off both
        let edges = [
            (1, 2),
            (2, 3),
            (3, 1),
            (3, 4),
            (4, 5),
            (5, 6),
            (6, 4),
            (6, 7),
            (2, 8),
            (8, 9),
            (9, 10),
        ];
        let g = graph(&edges);

        let matching = find_maximum_matching(&g).unwrap();
        assert_eq!(matching.len(), brute_force_size(11, &edges));
        assert_valid(&g, &matching);
        check_maximal(&g, &matching).unwrap();
    }

    #[test]
    fn test_rerun_from_result_does_not_grow() {
        let g = graph(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1), (5, 6), (6, 7), (7, 3)]);
        let mut matcher = BlossomMatcher::new();

        let first = matcher.find_maximum_matching(&g, None).unwrap();
        let second = matcher.find_maximum_matching_from(&g, &first, None).unwrap();

        assert_eq!(first, second);
        assert_eq!(matcher.metrics().unwrap().augmentations, 0);
        assert_eq!(matcher.metrics().unwrap().outer_passes, 1);
    }

    #[test]
    fn test_seed_must_be_graph_matching() {
        let g = graph(&[(1, 2), (2, 3)]);
        let mut matcher = BlossomMatcher::new();

        let not_an_edge = Matching::from_pairs([(n(1), n(3))]).unwrap();
        assert!(matches!(
            matcher.find_maximum_matching_from(&g, &not_an_edge, None),
            Err(AlgorithmError::InvalidMatching(_))
        ));

        let unknown = Matching::from_pairs([(n(1), n(42))]).unwrap();
        assert!(matches!(
            matcher.find_maximum_matching_from(&g, &unknown, None),
            Err(AlgorithmError::InvalidMatching(_))
        ));
    }

    /// Adjacency list model that lets tests inject malformed structure
    struct ListModel {
        ids: Vec<NodeId>,
        adjacency: Vec<Vec<NodeId>>,
    }

    impl GraphModel for ListModel {
        fn vertex_ids(&self) -> Vec<NodeId> {
            self.ids.clone()
        }

        fn neighbors(&self, node: NodeId) -> &[NodeId] {
            self.ids
                .iter()
                .position(|&id| id == node)
                .map(|i| self.adjacency[i].as_slice())
                .unwrap_or(&[])
        }

        fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
            self.neighbors(a).contains(&b)
        }
    }

    #[test]
    fn test_dangling_endpoint_is_invalid_graph() {
        let model = ListModel {
            ids: vec![n(1), n(2)],
            adjacency: vec![vec![n(2), n(3)], vec![n(1)]],
        };

        assert!(matches!(
            find_maximum_matching(&model),
            Err(AlgorithmError::InvalidGraph(_))
        ));
    }

    #[test]
    fn test_foreign_self_loop_is_ignored() {
        let model = ListModel {
            ids: vec![n(1), n(2)],
            adjacency: vec![vec![n(1), n(2)], vec![n(1)]],
        };

        let matching = find_maximum_matching(&model).unwrap();
        assert_eq!(matching.pairs(), vec![(n(1), n(2))]);
    }

    #[test]
    fn test_sink_receives_tree_edges_and_augmentations() {
        let g = graph(&[(2, 3), (1, 2), (3, 4)]);
        let mut tracer = ExecutionTracer::new();

        BlossomMatcher::new()
            .find_maximum_matching(&g, Some(&mut tracer))
            .unwrap();

        // 2-3 matched directly, then 1 -> 2 -> 3 -> 4
        assert_eq!(tracer.augmentation_count(), 2);
        assert!(tracer.points().iter().any(|p| p.event
            == TraceEvent::TreeEdgeAdded {
                parent: n(2),
                child: n(3),
            }));
        assert_eq!(tracer.blossom_count(), 0);
    }

    #[test]
    fn test_log_sink_does_not_change_result() {
        let g = graph(&[(2, 3), (4, 5), (5, 1), (1, 2), (3, 4), (5, 6)]);
        let mut sink = LogSink;

        let logged = BlossomMatcher::new()
            .find_maximum_matching(&g, Some(&mut sink))
            .unwrap();
        let silent = find_maximum_matching(&g).unwrap();

        assert_eq!(logged, silent);
    }

    #[test]
    fn test_parameters_round_trip() {
        let mut matcher = BlossomMatcher::new();
        assert_eq!(matcher.get_parameter("verification").as_deref(), Some("basic"));

        matcher.set_parameter("verification", "full").unwrap();
        matcher.set_parameter("record_metrics", "false").unwrap();
        assert_eq!(matcher.config().verification, VerificationLevel::Full);
        assert!(!matcher.config().record_metrics);
        assert_eq!(matcher.get_parameter("record_metrics").as_deref(), Some("false"));

        assert!(matcher.set_parameter("record_metrics", "yes").is_err());
        assert!(matcher.set_parameter("verification", "paranoid").is_err());
        assert!(matcher.set_parameter("strategy", "lazy").is_err());
        assert_eq!(matcher.get_parameter("strategy"), None);
        assert_eq!(matcher.parameters().len(), 2);
    }

    #[test]
    fn test_execute_with_tracing_reports_metrics() {
        let g = graph(&[(1, 2), (2, 3), (3, 1), (1, 4)]);
        let mut matcher = BlossomMatcher::with_config(MatcherConfig {
            verification: VerificationLevel::Full,
            record_metrics: true,
        });
        let mut tracer = ExecutionTracer::structural_only();

        let result = matcher.execute_with_tracing(&g, Some(&mut tracer)).unwrap();

        assert_eq!(result.matching.len(), 2);
        assert_eq!(result.metrics.augmentations, 2);
        assert_eq!(result.metrics.blossoms_contracted, 1);
        // One pass that augments, one that confirms
        assert_eq!(result.metrics.outer_passes, 2);
        assert_eq!(result.metrics.custom_metrics.get("free_vertices"), Some(&0.0));
        assert_eq!(matcher.category(), "graph_matching");
        assert_eq!(matcher.id(), AlgorithmId::new("edmonds_blossom"));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: MatcherConfig = serde_json::from_str(r#"{"verification":"full"}"#).unwrap();
        assert_eq!(config.verification, VerificationLevel::Full);
        assert!(config.record_metrics);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_matches_brute_force(
            size in 1usize..9,
            raw_edges in prop::collection::vec((0usize..9, 0usize..9), 0..24),
        ) {
            let mut edges: Vec<(usize, usize)> = raw_edges
                .into_iter()
                .map(|(a, b)| (a % size, b % size))
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect();
            edges.sort_unstable();
            edges.dedup();

            let mut g = Graph::new();
            for id in 0..size {
                g.add_node(n(id)).unwrap();
            }
            for &(a, b) in &edges {
                g.add_edge(n(a), n(b)).unwrap();
            }

            let mut matcher = BlossomMatcher::with_config(MatcherConfig {
                verification: VerificationLevel::Full,
                record_metrics: false,
            });
            let matching = matcher.find_maximum_matching(&g, None).unwrap();

            prop_assert_eq!(matching.len(), brute_force_size(size, &edges));
            for (&v, &u) in matching.as_map() {
                prop_assert_eq!(matching.mate(u), Some(v));
                prop_assert!(g.has_edge(v, u));
            }
        }
    }
}

use rand::Rng;
use tracing::{debug, trace};

use crate::config::InputConfig;
use crate::error::InputError;
use crate::graph::{generate_weighted_connected_graph, Graph, Vertex, Weight, WeightedEdge};
use crate::heap::MinHeap;
use crate::step::Stepper;
use crate::uptrees::UpTrees;

/// Kruskal's minimum spanning tree, one accepted edge per step.
///
/// [`Kruskal::new`] only stores the graph; [`Kruskal::setup`] fills the
/// forest and the edge queue. Stepping a run that was never set up finishes
/// immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Kruskal {
    pub graph: Graph<WeightedEdge>,
    pub disjoint_sets: UpTrees<Vertex>,
    pub edge_queue: MinHeap<WeightedEdge, Weight>,
    pub most_recent_edge: Option<WeightedEdge>,
    pub tree_edges: Vec<WeightedEdge>,
    pub finished: bool,
}

impl Kruskal {
    pub fn new(graph: Graph<WeightedEdge>) -> Self {
        Self {
            graph,
            disjoint_sets: UpTrees::new(),
            edge_queue: MinHeap::with_key(WeightedEdge::weight_key),
            most_recent_edge: None,
            tree_edges: Vec::new(),
            finished: false,
        }
    }

    /// [`Kruskal::new`] followed by [`Kruskal::setup`].
    pub fn prepared(graph: Graph<WeightedEdge>) -> Self {
        let mut kruskal = Self::new(graph);
        kruskal.setup();
        kruskal
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let n = config.mst_vertices.sample(rng);
        Ok(Self::prepared(generate_weighted_connected_graph(rng, n)?))
    }

    /// Reset progress: every vertex becomes a singleton set and every edge
    /// is queued by weight.
    pub fn setup(&mut self) {
        self.disjoint_sets = UpTrees::new();
        self.edge_queue = MinHeap::with_key(WeightedEdge::weight_key);
        self.most_recent_edge = None;
        self.tree_edges.clear();
        self.graph.clear_highlights();
        self.finished = false;

        for &v in self.graph.vertices() {
            self.disjoint_sets.add(v);
        }
        for &e in self.graph.edges().keys() {
            self.disjoint_sets.add(e.from);
            self.disjoint_sets.add(e.to);
            self.edge_queue.insert(e);
        }
        debug!(
            vertices = self.disjoint_sets.len(),
            edges = self.edge_queue.len(),
            "kruskal set up"
        );
    }

    pub fn total_weight(&self) -> Weight {
        self.tree_edges.iter().map(|e| e.weight).sum()
    }
}

impl Stepper for Kruskal {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }

        let next = loop {
            let Some(e) = self.edge_queue.remove_min() else {
                break None;
            };
            if self.disjoint_sets.same_set(e.from, e.to) {
                trace!(edge = %e, "kruskal rejected cycle edge");
                continue;
            }
            break Some(e);
        };

        let Some(edge) = next else {
            self.finished = true;
            self.most_recent_edge = None;
            debug!(total_weight = self.total_weight(), "kruskal finished");
            return self;
        };

        self.most_recent_edge = Some(edge);
        self.disjoint_sets.union(edge.from, edge.to);
        self.graph.set_highlighted(edge.from, edge.to, true);
        self.tree_edges.push(edge);
        debug!(edge = %edge, sets = self.disjoint_sets.set_count(), "kruskal accepted edge");
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

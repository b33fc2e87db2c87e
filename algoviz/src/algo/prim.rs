use std::fmt;

use rand::Rng;
use tracing::{debug, trace};

use crate::config::InputConfig;
use crate::error::{GraphError, InputError};
use crate::graph::{generate_weighted_connected_graph, Graph, Vertex, Weight, WeightedEdge};
use crate::heap::MinHeap;
use crate::step::Stepper;

use super::random_start;

/// A queued frontier edge. `from` is `None` only for the seed entry that
/// brings the start vertex into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreeEdge {
    pub from: Option<Vertex>,
    pub to: Vertex,
    pub weight: Weight,
}

impl TreeEdge {
    pub fn seed(start: Vertex) -> Self {
        Self {
            from: None,
            to: start,
            weight: 0,
        }
    }

    pub fn weight_key(e: &TreeEdge) -> &Weight {
        &e.weight
    }

    /// The graph edge this entry stands for, `None` for the seed.
    pub fn as_weighted(&self) -> Option<WeightedEdge> {
        self.from.map(|from| WeightedEdge::new(from, self.to, self.weight))
    }
}

impl From<WeightedEdge> for TreeEdge {
    fn from(e: WeightedEdge) -> Self {
        Self {
            from: Some(e.from),
            to: e.to,
            weight: e.weight,
        }
    }
}

impl fmt::Display for TreeEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from {
            Some(from) => write!(f, "{}-{}({})", from, self.to, self.weight),
            None => write!(f, "start {}", self.to),
        }
    }
}

/// Prim's minimum spanning tree, one vertex added per step.
///
/// Edges are pruned lazily: an edge whose endpoints are both in the tree is
/// discarded when it reaches the top of the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Prim {
    pub graph: Graph<WeightedEdge>,
    pub adjacency: Vec<Vec<WeightedEdge>>,
    /// Vertices in the order they joined the tree.
    pub visited: Vec<Vertex>,
    pub edge_queue: MinHeap<TreeEdge, Weight>,
    /// The entry that brought in the most recently added vertex.
    pub most_recent_edge: Option<TreeEdge>,
    /// Accepted graph edges in order.
    pub tree_edges: Vec<WeightedEdge>,
    pub finished: bool,
}

impl Prim {
    /// A run with an empty queue. It finishes on its first step.
    pub fn unseeded(graph: Graph<WeightedEdge>) -> Self {
        let adjacency = graph.adjacency_lists();
        Self {
            graph,
            adjacency,
            visited: Vec::new(),
            edge_queue: MinHeap::with_key(TreeEdge::weight_key),
            most_recent_edge: None,
            tree_edges: Vec::new(),
            finished: false,
        }
    }

    /// A run growing the tree from `start`.
    pub fn new(graph: Graph<WeightedEdge>, start: Vertex) -> Result<Self, GraphError> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::UnknownStart(start));
        }
        let mut prim = Self::unseeded(graph);
        prim.edge_queue.insert(TreeEdge::seed(start));
        Ok(prim)
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let n = config.mst_vertices.sample(rng);
        let graph = generate_weighted_connected_graph(rng, n)?;
        Ok(match random_start(rng, &graph) {
            Some(start) => Self::new(graph, start)?,
            None => Self::unseeded(graph),
        })
    }

    pub fn total_weight(&self) -> Weight {
        self.tree_edges.iter().map(|e| e.weight).sum()
    }

    fn is_internal(&self, e: &TreeEdge) -> bool {
        e.from.is_some_and(|from| self.visited.contains(&from)) && self.visited.contains(&e.to)
    }
}

impl Stepper for Prim {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }

        let next = loop {
            let Some(e) = self.edge_queue.remove_min() else {
                break None;
            };
            if self.is_internal(&e) {
                trace!(edge = %e, "prim discarded internal edge");
                continue;
            }
            break Some(e);
        };

        let Some(edge) = next else {
            self.finished = true;
            self.most_recent_edge = None;
            debug!(total_weight = self.total_weight(), "prim finished");
            return self;
        };

        let vertex = match edge.from {
            None => edge.to,
            Some(from) if self.visited.contains(&edge.to) => from,
            Some(_) => edge.to,
        };
        self.visited.push(vertex);
        self.most_recent_edge = Some(edge);
        if let Some(accepted) = edge.as_weighted() {
            self.graph.set_highlighted(accepted.from, accepted.to, true);
            self.tree_edges.push(accepted);
        }

        for &e in &self.adjacency[vertex] {
            self.edge_queue.insert(e.into());
        }
        debug!(vertex, edge = %edge, queued = self.edge_queue.len(), "prim added vertex");
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VERTEX_UNIVERSE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn weighted(vertices: &[Vertex], edges: &[(Vertex, Vertex, Weight)]) -> Graph<WeightedEdge> {
        Graph::new(
            vertices.to_vec(),
            edges.iter().map(|&(a, b, w)| WeightedEdge::new(a, b, w)),
        )
        .unwrap()
    }

    fn scenario_graph() -> Graph<WeightedEdge> {
        weighted(
            &[1, 2, 3, 4, 5],
            &[(1, 2, 13), (1, 5, 2), (2, 3, 6), (2, 5, 3), (3, 4, 0), (4, 5, 9)],
        )
    }

    fn queue(prim: &Prim) -> Vec<(Vertex, Vertex, Weight)> {
        prim.edge_queue
            .as_slice()
            .iter()
            .map(|e| (e.from.unwrap(), e.to, e.weight))
            .collect()
    }

    fn edge(from: Vertex, to: Vertex, weight: Weight) -> Option<TreeEdge> {
        Some(WeightedEdge::new(from, to, weight).into())
    }

    #[test]
    fn scenario_queue_layouts() {
        let mut prim = Prim::new(scenario_graph(), 1).unwrap().step();
        assert_eq!(prim.visited, vec![1]);
        assert_eq!(queue(&prim), vec![(1, 5, 2), (1, 2, 13)]);
        assert_eq!(prim.most_recent_edge, Some(TreeEdge::seed(1)));

        prim = prim.step();
        assert_eq!(prim.visited, vec![1, 5]);
        assert_eq!(queue(&prim), vec![(1, 5, 2), (4, 5, 9), (2, 5, 3), (1, 2, 13)]);
        assert_eq!(prim.most_recent_edge, edge(1, 5, 2));

        prim = prim.step();
        assert_eq!(prim.visited, vec![1, 5, 2]);
        assert_eq!(
            queue(&prim),
            vec![(2, 5, 3), (2, 3, 6), (1, 2, 13), (1, 2, 13), (4, 5, 9)]
        );
        assert_eq!(prim.most_recent_edge, edge(2, 5, 3));

        prim = prim.step();
        assert_eq!(prim.visited, vec![1, 5, 2, 3]);
        assert_eq!(
            queue(&prim),
            vec![(3, 4, 0), (2, 3, 6), (1, 2, 13), (1, 2, 13), (4, 5, 9)]
        );
        assert_eq!(prim.most_recent_edge, edge(2, 3, 6));

        prim = prim.step();
        assert_eq!(prim.visited, vec![1, 5, 2, 3, 4]);
        assert_eq!(
            queue(&prim),
            vec![(3, 4, 0), (2, 3, 6), (4, 5, 9), (1, 2, 13), (4, 5, 9), (1, 2, 13)]
        );
        assert_eq!(prim.most_recent_edge, edge(3, 4, 0));
        assert!(!prim.finished);

        prim = prim.step();
        assert_eq!(prim.visited, vec![1, 5, 2, 3, 4]);
        assert!(prim.edge_queue.is_empty());
        assert_eq!(prim.most_recent_edge, None);
        assert!(prim.finished);
        assert_eq!(prim.total_weight(), 11);
        assert_eq!(prim.graph.highlighted_edges().count(), 4);
    }

    #[test]
    fn start_vertex_comes_from_seed_edge() {
        let mut prim = Prim::new(weighted(&[1, 2, 3], &[(1, 2, 13), (2, 3, 6)]), 3)
            .unwrap()
            .step();
        assert_eq!(prim.visited, vec![3]);
        assert_eq!(queue(&prim), vec![(2, 3, 6)]);
        assert_eq!(prim.most_recent_edge, Some(TreeEdge::seed(3)));

        prim = prim.step();
        assert_eq!(prim.visited, vec![3, 2]);
        assert_eq!(queue(&prim), vec![(2, 3, 6), (1, 2, 13)]);
        assert_eq!(prim.most_recent_edge, edge(2, 3, 6));

        prim = prim.step();
        assert_eq!(prim.visited, vec![3, 2, 1]);
        assert_eq!(queue(&prim), vec![(1, 2, 13)]);
        assert_eq!(prim.most_recent_edge, edge(1, 2, 13));
        assert!(!prim.finished);

        prim = prim.step();
        assert_eq!(prim.visited, vec![3, 2, 1]);
        assert!(prim.edge_queue.is_empty());
        assert_eq!(prim.most_recent_edge, None);
        assert!(prim.finished);
        assert_eq!(
            prim.tree_edges,
            vec![WeightedEdge::new(2, 3, 6), WeightedEdge::new(1, 2, 13)]
        );
    }

    #[test]
    fn unknown_start_is_rejected() {
        assert_eq!(
            Prim::new(scenario_graph(), 0).unwrap_err(),
            GraphError::UnknownStart(0)
        );
    }

    #[test]
    fn seed_edge_display() {
        assert_eq!(TreeEdge::seed(4).to_string(), "start 4");
        assert_eq!(edge(1, 5, 2).unwrap().to_string(), "1-5(2)");
    }

    #[test]
    fn random_runs_span_the_graph() {
        let mut rng = StdRng::seed_from_u64(31);
        let config = InputConfig::default();
        for _ in 0..500 {
            let prim = Prim::random(&mut rng, &config).unwrap();
            let n = prim.graph.vertex_count();
            assert!((7..=9).contains(&n));
            let done = prim.run_to_end();
            assert_eq!(done.visited.len(), n);
            assert_eq!(done.tree_edges.len(), n - 1);
            assert!(done.visited.iter().all(|&v| v < VERTEX_UNIVERSE));
        }
    }
}

use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, trace};

use crate::config::InputConfig;
use crate::error::{GraphError, InputError};
use crate::graph::{generate_connected_graph, Edge, Graph, Vertex};
use crate::step::Stepper;

use super::{discovery_edge, random_start};

/// Breadth-first traversal with lazy visited filtering.
///
/// Neighbors are enqueued whether or not they were already visited; stale
/// entries are discarded when they reach the front of the queue.
/// `enqueued_list[i]` is the vertex that enqueued `queue[i]`, `None` for
/// the start vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bfs {
    pub graph: Graph<Edge>,
    /// Neighbor labels indexed by vertex label.
    pub adjacency: Vec<Vec<Vertex>>,
    pub queue: VecDeque<Vertex>,
    pub enqueued_list: VecDeque<Option<Vertex>>,
    pub visited: Vec<Vertex>,
    /// Who enqueued the most recently visited vertex.
    pub enqueued_by: Option<Vertex>,
    pub finished: bool,
}

impl Bfs {
    /// A traversal with an empty queue. It finishes on its first step.
    pub fn unseeded(graph: Graph<Edge>) -> Self {
        let adjacency = graph.adjacency_lists();
        Self {
            graph,
            adjacency,
            queue: VecDeque::new(),
            enqueued_list: VecDeque::new(),
            visited: Vec::new(),
            enqueued_by: None,
            finished: false,
        }
    }

    /// A traversal seeded with `start`.
    pub fn new(graph: Graph<Edge>, start: Vertex) -> Result<Self, GraphError> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::UnknownStart(start));
        }
        let mut bfs = Self::unseeded(graph);
        bfs.queue.push_back(start);
        bfs.enqueued_list.push_back(None);
        Ok(bfs)
    }

    /// A traversal over a random connected graph from a random start.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let n = config.bfs_vertices.sample(rng);
        let graph = generate_connected_graph(rng, n)?;
        Ok(match random_start(rng, &graph) {
            Some(start) => Self::new(graph, start)?,
            None => Self::unseeded(graph),
        })
    }

    /// The most recently visited vertex.
    pub fn current(&self) -> Option<Vertex> {
        self.visited.last().copied()
    }

    /// The edge through which the most recently visited vertex was reached.
    pub fn discovery_edge(&self) -> Option<Edge> {
        discovery_edge(&self.graph, self.enqueued_by, self.current())
    }
}

impl Stepper for Bfs {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }

        let next = loop {
            let Some(v) = self.queue.pop_front() else {
                break None;
            };
            let by = self.enqueued_list.pop_front().flatten();
            if self.visited.contains(&v) {
                trace!(vertex = v, "bfs skipped visited vertex");
                continue;
            }
            break Some((v, by));
        };

        let Some((v, by)) = next else {
            self.finished = true;
            self.enqueued_by = None;
            debug!(visited = ?self.visited, "bfs finished");
            return self;
        };

        self.visited.push(v);
        self.enqueued_by = by;
        if let Some(by) = by {
            self.graph.set_highlighted(by, v, true);
        }
        for &n in &self.adjacency[v] {
            self.queue.push_back(n);
            self.enqueued_list.push_back(Some(v));
        }
        debug!(vertex = v, enqueued_by = ?by, queue = ?self.queue, "bfs visited vertex");
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

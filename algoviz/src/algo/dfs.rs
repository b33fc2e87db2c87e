use rand::Rng;
use tracing::{debug, trace};

use crate::config::InputConfig;
use crate::error::{GraphError, InputError};
use crate::graph::{generate_connected_graph, Edge, Graph, Vertex};
use crate::step::Stepper;

use super::{discovery_edge, random_start};

/// Depth-first traversal driven by an explicit stack.
///
/// Same bookkeeping as [`Bfs`](super::Bfs) with a LIFO frontier:
/// `pushed_list[i]` is the vertex that pushed `stack[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Dfs {
    pub graph: Graph<Edge>,
    pub adjacency: Vec<Vec<Vertex>>,
    pub stack: Vec<Vertex>,
    pub pushed_list: Vec<Option<Vertex>>,
    pub visited: Vec<Vertex>,
    pub pushed_by: Option<Vertex>,
    pub finished: bool,
}

impl Dfs {
    pub fn unseeded(graph: Graph<Edge>) -> Self {
        let adjacency = graph.adjacency_lists();
        Self {
            graph,
            adjacency,
            stack: Vec::new(),
            pushed_list: Vec::new(),
            visited: Vec::new(),
            pushed_by: None,
            finished: false,
        }
    }

    pub fn new(graph: Graph<Edge>, start: Vertex) -> Result<Self, GraphError> {
        if !graph.contains_vertex(start) {
            return Err(GraphError::UnknownStart(start));
        }
        let mut dfs = Self::unseeded(graph);
        dfs.stack.push(start);
        dfs.pushed_list.push(None);
        Ok(dfs)
    }

    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        config.validate()?;
        let n = config.dfs_vertices.sample(rng);
        let graph = generate_connected_graph(rng, n)?;
        Ok(match random_start(rng, &graph) {
            Some(start) => Self::new(graph, start)?,
            None => Self::unseeded(graph),
        })
    }

    pub fn current(&self) -> Option<Vertex> {
        self.visited.last().copied()
    }

    pub fn discovery_edge(&self) -> Option<Edge> {
        discovery_edge(&self.graph, self.pushed_by, self.current())
    }
}

impl Stepper for Dfs {
    fn step(mut self) -> Self {
        if self.finished {
            return self;
        }

        let next = loop {
            let Some(v) = self.stack.pop() else {
                break None;
            };
            let by = self.pushed_list.pop().flatten();
            if self.visited.contains(&v) {
                trace!(vertex = v, "dfs skipped visited vertex");
                continue;
            }
            break Some((v, by));
        };

        let Some((v, by)) = next else {
            self.finished = true;
            self.pushed_by = None;
            debug!(visited = ?self.visited, "dfs finished");
            return self;
        };

        self.visited.push(v);
        self.pushed_by = by;
        if let Some(by) = by {
            self.graph.set_highlighted(by, v, true);
        }
        for &n in &self.adjacency[v] {
            self.stack.push(n);
            self.pushed_list.push(Some(v));
        }
        debug!(vertex = v, pushed_by = ?by, stack = ?self.stack, "dfs visited vertex");
        self
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

//! The seven step state machines and a closed enum over them.

mod bfs;
mod binary_search;
mod dfs;
mod insertion_sort;
mod kruskal;
mod prim;
mod selection_sort;

pub use bfs::Bfs;
pub use binary_search::BinarySearch;
pub use dfs::Dfs;
pub use insertion_sort::InsertionSort;
pub use kruskal::Kruskal;
pub use prim::{Prim, TreeEdge};
pub use selection_sort::SelectionSort;

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::InputConfig;
use crate::error::InputError;
use crate::graph::{vertices_of, Edge, Graph, GraphEdge, Vertex, WeightedEdge};
use crate::step::Stepper;

/// Names accepted by [`AlgorithmKind::from_name`].
pub const ALGORITHM_NAMES: &[&str] = &[
    "binary-search",
    "insertion-sort",
    "selection-sort",
    "bfs",
    "dfs",
    "prim",
    "kruskal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum AlgorithmKind {
    BinarySearch,
    InsertionSort,
    SelectionSort,
    Bfs,
    Dfs,
    Prim,
    Kruskal,
}

impl AlgorithmKind {
    pub fn all() -> &'static [AlgorithmKind] {
        &[
            AlgorithmKind::BinarySearch,
            AlgorithmKind::InsertionSort,
            AlgorithmKind::SelectionSort,
            AlgorithmKind::Bfs,
            AlgorithmKind::Dfs,
            AlgorithmKind::Prim,
            AlgorithmKind::Kruskal,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlgorithmKind::BinarySearch => "binary-search",
            AlgorithmKind::InsertionSort => "insertion-sort",
            AlgorithmKind::SelectionSort => "selection-sort",
            AlgorithmKind::Bfs => "bfs",
            AlgorithmKind::Dfs => "dfs",
            AlgorithmKind::Prim => "prim",
            AlgorithmKind::Kruskal => "kruskal",
        }
    }

    /// Look up a kind by name. Case and `_`/`-` are ignored.
    pub fn from_name(name: &str) -> Result<AlgorithmKind, InputError> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        AlgorithmKind::all()
            .iter()
            .find(|k| k.name() == wanted)
            .copied()
            .ok_or_else(|| InputError::UnknownAlgorithm(name.to_string()))
    }

    /// One of the seven kinds, uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> AlgorithmKind {
        let all = AlgorithmKind::all();
        all[rng.gen_range(0..all.len())]
    }

    pub fn is_graph(&self) -> bool {
        matches!(
            self,
            AlgorithmKind::Bfs | AlgorithmKind::Dfs | AlgorithmKind::Prim | AlgorithmKind::Kruskal
        )
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Explicit problem input. Which fields are required depends on the
/// algorithm; unused fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(default))]
pub struct Input {
    pub array: Option<Vec<i32>>,
    /// Binary search target.
    pub target: Option<i32>,
    /// Defaults to the edge endpoints in order of first mention.
    pub vertices: Option<Vec<Vertex>>,
    /// Weights are ignored by the traversals.
    pub edges: Option<Vec<WeightedEdge>>,
    /// Traversal or Prim start. Defaults to the first listed vertex.
    pub start: Option<Vertex>,
}

impl Input {
    fn array(&self, kind: AlgorithmKind) -> Result<Vec<i32>, InputError> {
        self.array.clone().ok_or(InputError::Missing {
            algorithm: kind.name(),
            what: "an array",
        })
    }

    fn weighted_graph(&self, kind: AlgorithmKind) -> Result<Graph<WeightedEdge>, InputError> {
        let edges = self.edges.clone().unwrap_or_default();
        let vertices = match &self.vertices {
            Some(vertices) => vertices.clone(),
            None if !edges.is_empty() => vertices_of(&edges),
            None => {
                return Err(InputError::Missing {
                    algorithm: kind.name(),
                    what: "a vertex list or edges",
                });
            }
        };
        Ok(Graph::new(vertices, edges)?)
    }

    fn graph(&self, kind: AlgorithmKind) -> Result<Graph<Edge>, InputError> {
        let weighted = self.weighted_graph(kind)?;
        let edges: Vec<Edge> = weighted
            .edges()
            .keys()
            .map(|e| Edge::new(e.from, e.to))
            .collect();
        Ok(Graph::new(weighted.vertices().to_vec(), edges)?)
    }

    fn start<E: GraphEdge>(&self, graph: &Graph<E>) -> Option<Vertex> {
        self.start.or_else(|| graph.vertices().first().copied())
    }
}

/// Any of the seven state machines.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "algorithm", content = "state", rename_all = "kebab-case")
)]
pub enum AlgorithmState {
    BinarySearch(BinarySearch),
    InsertionSort(InsertionSort),
    SelectionSort(SelectionSort),
    Bfs(Bfs),
    Dfs(Dfs),
    Prim(Prim),
    Kruskal(Kruskal),
}

impl AlgorithmState {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            AlgorithmState::BinarySearch(_) => AlgorithmKind::BinarySearch,
            AlgorithmState::InsertionSort(_) => AlgorithmKind::InsertionSort,
            AlgorithmState::SelectionSort(_) => AlgorithmKind::SelectionSort,
            AlgorithmState::Bfs(_) => AlgorithmKind::Bfs,
            AlgorithmState::Dfs(_) => AlgorithmKind::Dfs,
            AlgorithmState::Prim(_) => AlgorithmKind::Prim,
            AlgorithmState::Kruskal(_) => AlgorithmKind::Kruskal,
        }
    }

    /// Build `kind` over random input drawn according to `config`.
    pub fn random<R: Rng + ?Sized>(
        kind: AlgorithmKind,
        rng: &mut R,
        config: &InputConfig,
    ) -> Result<Self, InputError> {
        Ok(match kind {
            AlgorithmKind::BinarySearch => {
                AlgorithmState::BinarySearch(BinarySearch::random(rng, config)?)
            }
            AlgorithmKind::InsertionSort => {
                AlgorithmState::InsertionSort(InsertionSort::random(rng, config)?)
            }
            AlgorithmKind::SelectionSort => {
                AlgorithmState::SelectionSort(SelectionSort::random(rng, config)?)
            }
            AlgorithmKind::Bfs => AlgorithmState::Bfs(Bfs::random(rng, config)?),
            AlgorithmKind::Dfs => AlgorithmState::Dfs(Dfs::random(rng, config)?),
            AlgorithmKind::Prim => AlgorithmState::Prim(Prim::random(rng, config)?),
            AlgorithmKind::Kruskal => AlgorithmState::Kruskal(Kruskal::random(rng, config)?),
        })
    }

    /// Build `kind` over explicit input.
    ///
    /// Binary search sorts its array first. Graph algorithms start from
    /// `input.start`, or the first listed vertex.
    pub fn from_input(kind: AlgorithmKind, input: &Input) -> Result<Self, InputError> {
        Ok(match kind {
            AlgorithmKind::BinarySearch => {
                let mut array = input.array(kind)?;
                array.sort_unstable();
                let target = input.target.ok_or(InputError::Missing {
                    algorithm: kind.name(),
                    what: "a target",
                })?;
                AlgorithmState::BinarySearch(BinarySearch::new(array, target))
            }
            AlgorithmKind::InsertionSort => {
                AlgorithmState::InsertionSort(InsertionSort::new(input.array(kind)?))
            }
            AlgorithmKind::SelectionSort => {
                AlgorithmState::SelectionSort(SelectionSort::new(input.array(kind)?))
            }
            AlgorithmKind::Bfs => {
                let graph = input.graph(kind)?;
                AlgorithmState::Bfs(match input.start(&graph) {
                    Some(start) => Bfs::new(graph, start)?,
                    None => Bfs::unseeded(graph),
                })
            }
            AlgorithmKind::Dfs => {
                let graph = input.graph(kind)?;
                AlgorithmState::Dfs(match input.start(&graph) {
                    Some(start) => Dfs::new(graph, start)?,
                    None => Dfs::unseeded(graph),
                })
            }
            AlgorithmKind::Prim => {
                let graph = input.weighted_graph(kind)?;
                AlgorithmState::Prim(match input.start(&graph) {
                    Some(start) => Prim::new(graph, start)?,
                    None => Prim::unseeded(graph),
                })
            }
            AlgorithmKind::Kruskal => {
                AlgorithmState::Kruskal(Kruskal::prepared(input.weighted_graph(kind)?))
            }
        })
    }
}

impl Stepper for AlgorithmState {
    fn step(self) -> Self {
        match self {
            AlgorithmState::BinarySearch(s) => AlgorithmState::BinarySearch(s.step()),
            AlgorithmState::InsertionSort(s) => AlgorithmState::InsertionSort(s.step()),
            AlgorithmState::SelectionSort(s) => AlgorithmState::SelectionSort(s.step()),
            AlgorithmState::Bfs(s) => AlgorithmState::Bfs(s.step()),
            AlgorithmState::Dfs(s) => AlgorithmState::Dfs(s.step()),
            AlgorithmState::Prim(s) => AlgorithmState::Prim(s.step()),
            AlgorithmState::Kruskal(s) => AlgorithmState::Kruskal(s.step()),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            AlgorithmState::BinarySearch(s) => s.is_finished(),
            AlgorithmState::InsertionSort(s) => s.is_finished(),
            AlgorithmState::SelectionSort(s) => s.is_finished(),
            AlgorithmState::Bfs(s) => s.is_finished(),
            AlgorithmState::Dfs(s) => s.is_finished(),
            AlgorithmState::Prim(s) => s.is_finished(),
            AlgorithmState::Kruskal(s) => s.is_finished(),
        }
    }
}

fn join<T: fmt::Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary of the progress fields.
impl fmt::Display for AlgorithmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmState::BinarySearch(s) => write!(
                f,
                "[{}] target={} left={} mid={} right={} found={}",
                join(&s.array),
                s.target,
                s.left,
                s.mid,
                s.right,
                s.found
            ),
            AlgorithmState::InsertionSort(s) => write!(
                f,
                "[{}] sorted={} gap={} picked_up={}",
                join(&s.array),
                s.sorted_up_to_index,
                s.gap_index,
                s.is_picked_up
            ),
            AlgorithmState::SelectionSort(s) => {
                write!(f, "[{}] index={}", join(&s.array), s.index)
            }
            AlgorithmState::Bfs(s) => write!(
                f,
                "visited=[{}] queue=[{}]",
                join(&s.visited),
                join(&s.queue)
            ),
            AlgorithmState::Dfs(s) => write!(
                f,
                "visited=[{}] stack=[{}]",
                join(&s.visited),
                join(&s.stack)
            ),
            AlgorithmState::Prim(s) => write!(
                f,
                "visited=[{}] edge={} queued={} weight={}",
                join(&s.visited),
                s.most_recent_edge
                    .map_or_else(|| "-".to_string(), |e| e.to_string()),
                s.edge_queue.len(),
                s.total_weight()
            ),
            AlgorithmState::Kruskal(s) => write!(
                f,
                "edge={} queued={} sets={} weight={}",
                s.most_recent_edge
                    .map_or_else(|| "-".to_string(), |e| e.to_string()),
                s.edge_queue.len(),
                s.disjoint_sets.set_count(),
                s.total_weight()
            ),
        }?;
        if self.is_finished() {
            f.write_str(" (finished)")?;
        }
        Ok(())
    }
}

/// A uniformly chosen vertex of `graph` to start a traversal from.
fn random_start<R: Rng + ?Sized, E: GraphEdge>(rng: &mut R, graph: &Graph<E>) -> Option<Vertex> {
    graph.vertices().choose(rng).copied()
}

/// The edge joining `by` to `reached`, if both are known.
fn discovery_edge(graph: &Graph<Edge>, by: Option<Vertex>, reached: Option<Vertex>) -> Option<Edge> {
    let (by, reached) = (by?, reached?);
    graph.edges().keys().find(|e| e.connects(by, reached)).copied()
}

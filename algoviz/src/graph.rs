use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use rand::Rng;
use tracing::trace;

use crate::error::GraphError;

/// Vertex label. Labels live in `0..VERTEX_UNIVERSE`.
pub type Vertex = usize;

pub type Weight = u32;

/// Number of distinct vertex labels a graph may draw from.
pub const VERTEX_UNIVERSE: usize = 12;

/// Largest weight the weighted generator assigns.
pub const MAX_WEIGHT: Weight = 99;

/// Common view of the two edge flavours: identity is structural, so two
/// edges with the same fields are the same edge.
pub trait GraphEdge: Copy + Eq + Hash + fmt::Debug {
    /// The `(from, to)` endpoints.
    fn endpoints(&self) -> (Vertex, Vertex);

    /// Whether this edge joins `a` and `b`, in either direction.
    fn connects(&self, a: Vertex, b: Vertex) -> bool {
        let (from, to) = self.endpoints();
        (from == a && to == b) || (from == b && to == a)
    }

    /// Whether `v` is one of the endpoints.
    fn touches(&self, v: Vertex) -> bool {
        let (from, to) = self.endpoints();
        from == v || to == v
    }
}

/// Undirected, unweighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
}

impl Edge {
    pub fn new(from: Vertex, to: Vertex) -> Self {
        Self { from, to }
    }
}

impl GraphEdge for Edge {
    fn endpoints(&self) -> (Vertex, Vertex) {
        (self.from, self.to)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// Undirected edge carrying an integer weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedEdge {
    pub from: Vertex,
    pub to: Vertex,
    pub weight: Weight,
}

impl WeightedEdge {
    pub fn new(from: Vertex, to: Vertex, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    /// Ordering key for edge priority queues.
    pub fn weight_key(e: &WeightedEdge) -> &Weight {
        &e.weight
    }
}

impl GraphEdge for WeightedEdge {
    fn endpoints(&self) -> (Vertex, Vertex) {
        (self.from, self.to)
    }
}

impl fmt::Display for WeightedEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}({})", self.from, self.to, self.weight)
    }
}

/// Edges in insertion order, each with its highlight flag.
pub type EdgeMap<E> = IndexMap<E, bool>;

/// A vertex list plus an edge collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph<E: GraphEdge> {
    vertices: Vec<Vertex>,
    edges: EdgeMap<E>,
}

impl<E: GraphEdge> Graph<E> {
    /// Build a graph from explicit input, checking it is well formed.
    ///
    /// Rejects labels outside the universe, repeated vertices, self-loops,
    /// repeated unordered pairs and endpoints missing from `vertices`.
    pub fn new(
        vertices: Vec<Vertex>,
        edges: impl IntoIterator<Item = E>,
    ) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        for &v in &vertices {
            if v >= VERTEX_UNIVERSE {
                return Err(GraphError::LabelOutOfRange(v, VERTEX_UNIVERSE));
            }
            if !seen.insert(v) {
                return Err(GraphError::DuplicateVertex(v));
            }
        }

        let mut map = EdgeMap::new();
        for edge in edges {
            let (from, to) = edge.endpoints();
            if from == to {
                return Err(GraphError::SelfLoop(from));
            }
            if !seen.contains(&from) || !seen.contains(&to) {
                return Err(GraphError::UnknownEndpoint(from, to));
            }
            if map.keys().any(|e: &E| e.connects(from, to)) {
                return Err(GraphError::DuplicateEdge(from, to));
            }
            map.insert(edge, false);
        }

        Ok(Self {
            vertices,
            edges: map,
        })
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &EdgeMap<E> {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: Vertex) -> bool {
        self.vertices.contains(&v)
    }

    /// Set the highlight flag on the edge joining `a` and `b`.
    ///
    /// Returns `false` when no such edge exists.
    pub fn set_highlighted(&mut self, a: Vertex, b: Vertex, highlighted: bool) -> bool {
        match self.edges.iter_mut().find(|(e, _)| e.connects(a, b)) {
            Some((_, flag)) => {
                *flag = highlighted;
                true
            }
            None => false,
        }
    }

    pub fn clear_highlights(&mut self) {
        self.edges.values_mut().for_each(|flag| *flag = false);
    }

    pub fn highlighted_edges(&self) -> impl Iterator<Item = &E> {
        self.edges.iter().filter(|(_, &h)| h).map(|(e, _)| e)
    }

    /// Whether every vertex is reachable from every other.
    pub fn is_connected(&self) -> bool {
        let Some(&first) = self.vertices.first() else {
            return true;
        };
        let mut reached = vec![first];
        let mut frontier = vec![first];
        while let Some(v) = frontier.pop() {
            for e in self.edges.keys().filter(|e| e.touches(v)) {
                let (from, to) = e.endpoints();
                let other = if from == v { to } else { from };
                if !reached.contains(&other) {
                    reached.push(other);
                    frontier.push(other);
                }
            }
        }
        reached.len() == self.vertices.len()
    }
}

impl Graph<Edge> {
    /// Neighbor labels for every vertex label, indexed by label.
    pub fn adjacency_lists(&self) -> Vec<Vec<Vertex>> {
        adjacency_lists(&self.edges)
    }
}

impl Graph<WeightedEdge> {
    /// Incident edges for every vertex label, indexed by label.
    pub fn adjacency_lists(&self) -> Vec<Vec<WeightedEdge>> {
        weighted_adjacency_lists(&self.edges)
    }

    pub fn total_weight(&self) -> Weight {
        self.edges.keys().map(|e| e.weight).sum()
    }
}

#[cfg(feature = "serde")]
impl<E: GraphEdge + serde::Serialize> serde::Serialize for Graph<E> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct EdgeEntry<'a, E> {
            #[serde(flatten)]
            edge: &'a E,
            highlighted: bool,
        }

        #[derive(serde::Serialize)]
        struct GraphRepr<'a, E> {
            vertices: &'a [Vertex],
            edges: Vec<EdgeEntry<'a, E>>,
        }

        GraphRepr {
            vertices: &self.vertices,
            edges: self
                .edges
                .iter()
                .map(|(edge, &highlighted)| EdgeEntry { edge, highlighted })
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Neighbor labels of each of the `VERTEX_UNIVERSE` labels, in edge order.
pub fn adjacency_lists(edges: &EdgeMap<Edge>) -> Vec<Vec<Vertex>> {
    (0..VERTEX_UNIVERSE)
        .map(|v| {
            edges
                .keys()
                .filter_map(|e| {
                    if e.to == v {
                        Some(e.from)
                    } else if e.from == v {
                        Some(e.to)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .collect()
}

/// Incident edges of each of the `VERTEX_UNIVERSE` labels, in edge order.
pub fn weighted_adjacency_lists(edges: &EdgeMap<WeightedEdge>) -> Vec<Vec<WeightedEdge>> {
    (0..VERTEX_UNIVERSE)
        .map(|v| edges.keys().filter(|e| e.touches(v)).copied().collect())
        .collect()
}

/// Endpoints of `edges`, in order of first mention.
pub fn vertices_of<E: GraphEdge>(edges: &[E]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for e in edges {
        let (from, to) = e.endpoints();
        for v in [from, to] {
            if !vertices.contains(&v) {
                vertices.push(v);
            }
        }
    }
    vertices
}

/// Generate a random connected graph on `n` distinct labels.
pub fn generate_connected_graph<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<Graph<Edge>, GraphError> {
    generate_with(rng, n, |_, from, to| Edge { from, to })
}

/// Generate a random connected graph whose edges carry weights in `0..=MAX_WEIGHT`.
pub fn generate_weighted_connected_graph<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
) -> Result<Graph<WeightedEdge>, GraphError> {
    generate_with(rng, n, |rng, from, to| WeightedEdge {
        from,
        to,
        weight: rng.gen_range(0..=MAX_WEIGHT),
    })
}

/// Draw `n` labels without replacement; each new vertex links back to a
/// random subset of the vertices drawn before it.
///
/// Every vertex after the first gets at least one edge to an earlier
/// vertex, so the result is connected. Candidates are drawn from a pool
/// that shrinks on every draw, so the inner loop always terminates.
fn generate_with<R, E, F>(rng: &mut R, n: usize, mut make_edge: F) -> Result<Graph<E>, GraphError>
where
    R: Rng + ?Sized,
    E: GraphEdge,
    F: FnMut(&mut R, Vertex, Vertex) -> E,
{
    if n > VERTEX_UNIVERSE {
        return Err(GraphError::TooManyVertices(n, VERTEX_UNIVERSE));
    }

    let mut pool: Vec<Vertex> = (0..VERTEX_UNIVERSE).collect();
    let mut vertices = Vec::with_capacity(n);
    let mut edges: EdgeMap<E> = EdgeMap::new();
    let degree_cap = n.saturating_sub(5).max(1);

    for _ in 0..n {
        let vertex = pool.swap_remove(rng.gen_range(0..pool.len()));
        vertices.push(vertex);

        let desired = (vertices.len() - 1).min(rng.gen_range(1..=degree_cap));
        let mut degree = edges.keys().filter(|e| e.endpoints().1 == vertex).count();
        let mut candidates = vertices[..vertices.len() - 1].to_vec();
        trace!(vertex, desired, "drew vertex");

        while degree < desired && !candidates.is_empty() {
            let j = candidates.swap_remove(rng.gen_range(0..candidates.len()));
            if j == vertex || edges.keys().any(|e| e.connects(vertex, j)) {
                trace!(vertex, candidate = j, "rejected candidate edge");
                continue;
            }
            edges.insert(make_edge(rng, vertex, j), false);
            degree += 1;
        }
    }

    Ok(Graph { vertices, edges })
}

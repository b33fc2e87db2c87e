use thiserror::Error;

use crate::graph::Vertex;

/// Precondition violations on [`MinHeap`](crate::heap::MinHeap) helper queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("no parent exists for index {0}")]
    NoParent(usize),

    #[error("no left child exists for index {0}")]
    NoLeftChild(usize),

    #[error("no right child exists for index {0}")]
    NoRightChild(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex label {0} is outside the universe 0..{1}")]
    LabelOutOfRange(Vertex, usize),

    #[error("cannot draw {0} distinct vertices from a universe of {1}")]
    TooManyVertices(usize, usize),

    #[error("vertex {0} appears more than once")]
    DuplicateVertex(Vertex),

    #[error("edge {0}-{0} is a self-loop")]
    SelfLoop(Vertex),

    #[error("edge {0}-{1} duplicates an existing edge")]
    DuplicateEdge(Vertex, Vertex),

    #[error("edge {0}-{1} references a vertex not in the graph")]
    UnknownEndpoint(Vertex, Vertex),

    #[error("start vertex {0} is not in the graph")]
    UnknownStart(Vertex),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Parse(String),

    #[error("invalid range for {field}: min {min} > max {max}")]
    InvertedRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} must be at least {min}, got {value}")]
    TooSmall {
        field: &'static str,
        min: usize,
        value: usize,
    },

    #[error("{field} may not exceed {max}, got {value}")]
    TooLarge {
        field: &'static str,
        max: usize,
        value: usize,
    },
}

/// Errors raised while building an algorithm state from input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("{algorithm} requires {what}")]
    Missing {
        algorithm: &'static str,
        what: &'static str,
    },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

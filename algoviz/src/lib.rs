//! Step-by-step state machines for classic array and graph algorithms.
//!
//! Every algorithm is a plain value with public progress fields. Calling
//! [`Stepper::step`] consumes one state and returns its successor, so a
//! renderer can diff two successive snapshots to see what changed.
//!
//! ```
//! use algoviz::algo::BinarySearch;
//! use algoviz::Stepper;
//!
//! let done = BinarySearch::new(vec![0, 1, 2, 3, 4], 4).run_to_end();
//! assert!(done.found);
//! assert_eq!(done.mid, 4);
//! ```

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod heap;
pub mod random;
pub mod step;
pub mod uptrees;

pub use algo::{AlgorithmKind, AlgorithmState, Input, ALGORITHM_NAMES};
pub use config::{InputConfig, VertexRange};
pub use error::{ConfigError, GraphError, HeapError, InputError};
pub use graph::{Edge, Graph, Vertex, Weight, WeightedEdge};
pub use heap::MinHeap;
pub use step::{Stepper, Steps};
pub use uptrees::UpTrees;

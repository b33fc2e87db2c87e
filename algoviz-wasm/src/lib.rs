use std::mem;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

use algoviz::algo::SelectionSort;
use algoviz::{
    AlgorithmKind, AlgorithmState, Input, InputConfig, InputError, Stepper, WeightedEdge,
    ALGORITHM_NAMES,
};

// ── Tsify types for TypeScript interface generation ──

/// An edge passed from JavaScript. `weight` is ignored by BFS and DFS.
#[derive(Tsify, Serialize, Deserialize, Clone, Copy)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct WasmEdge {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub weight: u32,
}

/// What to visualize. Any omitted input is generated randomly.
#[derive(Tsify, Serialize, Deserialize, Default)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct VisualizerInput {
    /// Algorithm name (see `Visualizer.algorithms()`), or "random".
    pub algorithm: String,
    #[serde(default)]
    pub array: Option<Vec<i32>>,
    #[serde(default)]
    pub target: Option<i32>,
    #[serde(default)]
    pub vertices: Option<Vec<usize>>,
    #[serde(default)]
    pub edges: Option<Vec<WasmEdge>>,
    /// Start vertex for BFS, DFS and Prim.
    #[serde(default)]
    pub start: Option<usize>,
    /// Seed for random input; omitted means a fresh seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl VisualizerInput {
    /// `None` when no explicit input was given at all. Vertices default to
    /// the edge endpoints.
    fn explicit(&self) -> Option<Input> {
        if self.array.is_none()
            && self.target.is_none()
            && self.vertices.is_none()
            && self.edges.is_none()
        {
            return None;
        }
        Some(Input {
            array: self.array.clone(),
            target: self.target,
            vertices: self.vertices.clone(),
            edges: self.edges.as_ref().map(|edges| {
                edges
                    .iter()
                    .map(|e| WeightedEdge::new(e.from, e.to, e.weight))
                    .collect()
            }),
            start: self.start,
        })
    }
}

/// Resolve the algorithm and build its initial state.
fn build_state(input: &VisualizerInput) -> Result<AlgorithmState, InputError> {
    let mut rng = match input.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let kind = if input.algorithm == "random" {
        AlgorithmKind::random(&mut rng)
    } else {
        AlgorithmKind::from_name(&input.algorithm)?
    };
    match input.explicit() {
        Some(explicit) => AlgorithmState::from_input(kind, &explicit),
        None => AlgorithmState::random(kind, &mut rng, &InputConfig::default()),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

// ── Visualizer wrapper ──

/// One algorithm run, stepped from JavaScript.
#[wasm_bindgen]
pub struct Visualizer {
    initial: AlgorithmState,
    current: AlgorithmState,
}

#[wasm_bindgen]
impl Visualizer {
    #[wasm_bindgen(constructor)]
    pub fn new(input: VisualizerInput) -> Result<Visualizer, JsError> {
        let initial = build_state(&input).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Visualizer {
            current: initial.clone(),
            initial,
        })
    }

    /// Names accepted in `VisualizerInput.algorithm`.
    pub fn algorithms() -> Vec<String> {
        ALGORITHM_NAMES.iter().map(|s| s.to_string()).collect()
    }

    /// Name of the algorithm being run.
    pub fn algorithm(&self) -> String {
        self.current.kind().name().to_string()
    }

    /// Advance one step and return the new snapshot.
    pub fn step(&mut self) -> Result<JsValue, JsError> {
        self.advance();
        self.snapshot()
    }

    /// The current snapshot as `{ algorithm, state }`.
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        to_js(&self.current)
    }

    /// One-line text summary of the current state.
    pub fn describe(&self) -> String {
        self.current.to_string()
    }

    pub fn finished(&self) -> bool {
        self.current.is_finished()
    }

    /// Return to the initial state of this run.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
    }
}

impl Visualizer {
    /// Step `current` in place, moving its queues and forests into the
    /// successor.
    fn advance(&mut self) {
        let state = mem::replace(&mut self.current, placeholder());
        self.current = state.step();
    }
}

/// Stands in for `current` while it is being stepped. Allocates nothing.
fn placeholder() -> AlgorithmState {
    AlgorithmState::SelectionSort(SelectionSort::new(Vec::new()))
}

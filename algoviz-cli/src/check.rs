//! Randomized postcondition checks for the `regression` subcommand.
use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use algoviz::graph::{
    generate_connected_graph, generate_weighted_connected_graph, GraphEdge, VERTEX_UNIVERSE,
};
use algoviz::{AlgorithmKind, AlgorithmState, Graph, InputConfig, Stepper, Weight, WeightedEdge};

use crate::report::{self, CheckReport};

type Outcome = Result<(), String>;

/// A named randomized check.
pub struct Check {
    pub name: &'static str,
    pub category: &'static str,
    trial: fn(&mut StdRng, &InputConfig) -> Outcome,
}

pub fn all_checks() -> Vec<Check> {
    vec![
        Check {
            name: "graph-generator",
            category: "graph",
            trial: generator_trial,
        },
        Check {
            name: "binary-search",
            category: "search",
            trial: |rng, config| algorithm_trial(AlgorithmKind::BinarySearch, rng, config),
        },
        Check {
            name: "insertion-sort",
            category: "sort",
            trial: |rng, config| algorithm_trial(AlgorithmKind::InsertionSort, rng, config),
        },
        Check {
            name: "selection-sort",
            category: "sort",
            trial: |rng, config| algorithm_trial(AlgorithmKind::SelectionSort, rng, config),
        },
        Check {
            name: "bfs",
            category: "traversal",
            trial: |rng, config| algorithm_trial(AlgorithmKind::Bfs, rng, config),
        },
        Check {
            name: "dfs",
            category: "traversal",
            trial: |rng, config| algorithm_trial(AlgorithmKind::Dfs, rng, config),
        },
        Check {
            name: "prim",
            category: "mst",
            trial: |rng, config| algorithm_trial(AlgorithmKind::Prim, rng, config),
        },
        Check {
            name: "kruskal",
            category: "mst",
            trial: |rng, config| algorithm_trial(AlgorithmKind::Kruskal, rng, config),
        },
    ]
}

impl Check {
    /// Run `iterations` independently seeded trials in parallel.
    pub fn run(&self, iterations: u64, base_seed: u64, config: &InputConfig) -> CheckReport {
        let start = Instant::now();
        let results: Vec<(u64, Outcome)> = (0..iterations)
            .into_par_iter()
            .map(|i| {
                let seed = base_seed.wrapping_add(i);
                let mut rng = StdRng::seed_from_u64(seed);
                (seed, (self.trial)(&mut rng, config))
            })
            .collect();
        let elapsed = start.elapsed();
        debug!(check = self.name, iterations, ?elapsed, "check finished");
        report::check_report(
            self.name,
            self.category,
            &results,
            elapsed.as_micros() as u64,
        )
    }
}

fn ensure(cond: bool, msg: impl FnOnce() -> String) -> Outcome {
    if cond {
        Ok(())
    } else {
        Err(msg())
    }
}

/// No self-loops, no repeated unordered pair, connected, labels in range.
fn check_graph<E: GraphEdge>(graph: &Graph<E>, n: usize) -> Outcome {
    ensure(graph.vertex_count() == n, || {
        format!("expected {n} vertices, got {}", graph.vertex_count())
    })?;
    ensure(graph.vertices().iter().all(|&v| v < VERTEX_UNIVERSE), || {
        format!("label out of range in {:?}", graph.vertices())
    })?;
    let mut pairs = HashSet::new();
    for e in graph.edges().keys() {
        let (a, b) = e.endpoints();
        ensure(a != b, || format!("self-loop {e:?}"))?;
        ensure(pairs.insert((a.min(b), a.max(b))), || {
            format!("duplicate edge {e:?}")
        })?;
    }
    ensure(graph.is_connected(), || format!("disconnected graph {graph:?}"))
}

fn generator_trial(rng: &mut StdRng, _config: &InputConfig) -> Outcome {
    let n = rng.gen_range(1..=VERTEX_UNIVERSE);
    check_graph(&generate_connected_graph(rng, n).map_err(|e| e.to_string())?, n)?;
    check_graph(
        &generate_weighted_connected_graph(rng, n).map_err(|e| e.to_string())?,
        n,
    )
}

fn sorted_copy<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut v = items.to_vec();
    v.sort();
    v
}

/// Total weight of a minimum spanning forest, by repeated relabelling.
fn reference_mst_weight(vertices: &[usize], edges: &[WeightedEdge]) -> Weight {
    let mut component: Vec<usize> = (0..VERTEX_UNIVERSE).collect();
    let mut edges = edges.to_vec();
    edges.sort_by_key(|e| e.weight);
    let mut total = 0;
    for e in edges {
        let (a, b) = (component[e.from], component[e.to]);
        if a == b {
            continue;
        }
        for &v in vertices {
            if component[v] == b {
                component[v] = a;
            }
        }
        total += e.weight;
    }
    total
}

fn algorithm_trial(kind: AlgorithmKind, rng: &mut StdRng, config: &InputConfig) -> Outcome {
    let initial = AlgorithmState::random(kind, rng, config).map_err(|e| e.to_string())?;
    let mut steps = 0usize;
    let mut state = initial.clone();
    while !state.is_finished() {
        state = state.step();
        steps += 1;
        ensure(steps <= 10_000, || format!("{kind} did not finish"))?;
    }
    ensure(state.clone().step() == state, || {
        format!("{kind} changed after finishing")
    })?;

    match (&initial, &state) {
        (AlgorithmState::BinarySearch(_), AlgorithmState::BinarySearch(s)) => {
            ensure(s.found && s.array[s.mid] == s.target, || {
                format!("target {} not found in {:?}", s.target, s.array)
            })
        }
        (AlgorithmState::InsertionSort(before), AlgorithmState::InsertionSort(after)) => {
            check_sorted(&before.array, &after.array)
        }
        (AlgorithmState::SelectionSort(before), AlgorithmState::SelectionSort(after)) => {
            check_sorted(&before.array, &after.array)
        }
        (AlgorithmState::Bfs(_), AlgorithmState::Bfs(s)) => {
            check_graph(&s.graph, s.graph.vertex_count())?;
            check_coverage(s.graph.vertices(), &s.visited)?;
            check_tree_size(s.graph.highlighted_edges().count(), s.graph.vertex_count())
        }
        (AlgorithmState::Dfs(_), AlgorithmState::Dfs(s)) => {
            check_graph(&s.graph, s.graph.vertex_count())?;
            check_coverage(s.graph.vertices(), &s.visited)?;
            check_tree_size(s.graph.highlighted_edges().count(), s.graph.vertex_count())
        }
        (AlgorithmState::Prim(_), AlgorithmState::Prim(s)) => {
            check_graph(&s.graph, s.graph.vertex_count())?;
            check_coverage(s.graph.vertices(), &s.visited)?;
            check_tree_size(s.tree_edges.len(), s.graph.vertex_count())?;
            check_weight(&s.graph, s.total_weight())
        }
        (AlgorithmState::Kruskal(_), AlgorithmState::Kruskal(s)) => {
            check_graph(&s.graph, s.graph.vertex_count())?;
            check_tree_size(s.tree_edges.len(), s.graph.vertex_count())?;
            check_weight(&s.graph, s.total_weight())
        }
        _ => Err(format!("{kind} changed variant while stepping")),
    }
}

fn check_sorted(before: &[i32], after: &[i32]) -> Outcome {
    ensure(after.windows(2).all(|w| w[0] <= w[1]), || {
        format!("not sorted: {after:?}")
    })?;
    ensure(sorted_copy(before) == after, || {
        format!("{after:?} is not a permutation of {before:?}")
    })
}

fn check_coverage(vertices: &[usize], visited: &[usize]) -> Outcome {
    ensure(sorted_copy(vertices) == sorted_copy(visited), || {
        format!("visited {visited:?} but graph has {vertices:?}")
    })
}

fn check_tree_size(edges: usize, vertices: usize) -> Outcome {
    ensure(edges + 1 == vertices, || {
        format!("{edges} tree edges for {vertices} vertices")
    })
}

fn check_weight(graph: &Graph<WeightedEdge>, weight: Weight) -> Outcome {
    let edges: Vec<_> = graph.edges().keys().copied().collect();
    let expected = reference_mst_weight(graph.vertices(), &edges);
    ensure(weight == expected, || {
        format!("tree weight {weight}, minimum is {expected}")
    })
}

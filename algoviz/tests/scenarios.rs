/// Integration tests: build states from explicit input, step them through
/// the closed enum and check the documented end states.
use algoviz::algo::{Bfs, Kruskal, Prim};
use algoviz::graph::generate_weighted_connected_graph;
use algoviz::{AlgorithmKind, AlgorithmState, Input, InputConfig, Stepper, WeightedEdge};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn traversal_input() -> Input {
    Input {
        vertices: Some(vec![1, 2, 3, 4, 5]),
        edges: Some(
            [(1, 2), (1, 3), (2, 3), (2, 4), (3, 5)]
                .iter()
                .map(|&(a, b)| WeightedEdge::new(a, b, 0))
                .collect(),
        ),
        start: Some(1),
        ..Input::default()
    }
}

fn mst_input() -> Input {
    Input {
        vertices: Some(vec![1, 2, 3, 4, 5]),
        edges: Some(
            [(1, 2, 13), (1, 5, 2), (2, 3, 6), (2, 5, 3), (3, 4, 0), (4, 5, 9)]
                .iter()
                .map(|&(a, b, w)| WeightedEdge::new(a, b, w))
                .collect(),
        ),
        start: Some(1),
        ..Input::default()
    }
}

#[test]
fn bfs_scenario_visits_everything_in_six_steps() {
    let state = AlgorithmState::from_input(AlgorithmKind::Bfs, &traversal_input()).unwrap();
    let snapshots: Vec<_> = state.steps().collect();
    assert_eq!(snapshots.len(), 6);

    let AlgorithmState::Bfs(first) = &snapshots[0] else {
        panic!("expected a bfs state");
    };
    assert_eq!(first.visited, vec![1]);
    assert_eq!(first.queue.iter().copied().collect::<Vec<_>>(), vec![2, 3]);

    let AlgorithmState::Bfs(last) = &snapshots[5] else {
        panic!("expected a bfs state");
    };
    assert!(last.finished);
    assert!(last.queue.is_empty());
    assert_eq!(last.visited, vec![1, 2, 3, 4, 5]);
}

#[test]
fn dfs_scenario_order_differs_from_bfs() {
    let done = AlgorithmState::from_input(AlgorithmKind::Dfs, &traversal_input())
        .unwrap()
        .run_to_end();
    let AlgorithmState::Dfs(dfs) = done else {
        panic!("expected a dfs state");
    };
    assert_eq!(dfs.visited, vec![1, 3, 5, 2, 4]);
}

#[test]
fn kruskal_accepts_the_minimum_tree() {
    let state = AlgorithmState::from_input(AlgorithmKind::Kruskal, &mst_input()).unwrap();
    let accepted: Vec<_> = state
        .steps()
        .filter_map(|s| match s {
            AlgorithmState::Kruskal(k) => k.most_recent_edge,
            _ => None,
        })
        .map(|e| (e.from, e.to, e.weight))
        .collect();
    assert_eq!(accepted, vec![(3, 4, 0), (1, 5, 2), (2, 5, 3), (2, 3, 6)]);
}

#[test]
fn prim_and_kruskal_agree_on_weight() {
    let prim = AlgorithmState::from_input(AlgorithmKind::Prim, &mst_input())
        .unwrap()
        .run_to_end();
    let AlgorithmState::Prim(prim) = prim else {
        panic!("expected a prim state");
    };
    assert_eq!(prim.total_weight(), 11);

    let mut rng = StdRng::seed_from_u64(99);
    for n in 1..=12 {
        for _ in 0..40 {
            let graph = generate_weighted_connected_graph(&mut rng, n).unwrap();
            let start = graph.vertices()[0];
            let prim = Prim::new(graph.clone(), start).unwrap().run_to_end();
            let kruskal = Kruskal::prepared(graph).run_to_end();
            assert_eq!(prim.total_weight(), kruskal.total_weight());
            assert_eq!(prim.tree_edges.len(), n - 1);
            assert_eq!(kruskal.tree_edges.len(), n - 1);
        }
    }
}

#[test]
fn sorting_sorted_input_is_stable() {
    let sorted = vec![-40, -3, 0, 7, 19, 88];
    for kind in [AlgorithmKind::InsertionSort, AlgorithmKind::SelectionSort] {
        let input = Input {
            array: Some(sorted.clone()),
            ..Input::default()
        };
        let state = AlgorithmState::from_input(kind, &input).unwrap();
        let mut finished = false;
        for snapshot in state.steps() {
            let array = match &snapshot {
                AlgorithmState::InsertionSort(s) => &s.array,
                AlgorithmState::SelectionSort(s) => &s.array,
                other => panic!("unexpected state {other:?}"),
            };
            assert_eq!(array, &sorted, "{kind}");
            finished = snapshot.is_finished();
        }
        assert!(finished, "{kind} never finished");
    }
}

#[test]
fn random_sorts_end_sorted() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = InputConfig::default();
    for kind in [AlgorithmKind::InsertionSort, AlgorithmKind::SelectionSort] {
        for _ in 0..200 {
            let done = AlgorithmState::random(kind, &mut rng, &config)
                .unwrap()
                .run_to_end();
            let array = match &done {
                AlgorithmState::InsertionSort(s) => s.array.clone(),
                AlgorithmState::SelectionSort(s) => s.array.clone(),
                other => panic!("unexpected state {other:?}"),
            };
            assert!(array.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[test]
fn random_binary_search_always_finds_its_target() {
    let mut rng = StdRng::seed_from_u64(8);
    let config = InputConfig::default();
    for _ in 0..500 {
        let done = AlgorithmState::random(AlgorithmKind::BinarySearch, &mut rng, &config)
            .unwrap()
            .run_to_end();
        let AlgorithmState::BinarySearch(s) = done else {
            panic!("expected a binary search state");
        };
        assert!(s.found, "missed {} in {:?}", s.target, s.array);
        assert_eq!(s.array[s.mid], s.target);
    }
}

#[test]
fn stepping_a_finished_state_changes_nothing() {
    let bfs = Bfs::new(
        algoviz::Graph::new(vec![0, 1], [algoviz::Edge::new(0, 1)]).unwrap(),
        0,
    )
    .unwrap()
    .run_to_end();
    assert_eq!(bfs.clone().step(), bfs);
}

#[cfg(feature = "serde")]
#[test]
fn snapshots_serialize_with_algorithm_tag() {
    let state = AlgorithmState::from_input(AlgorithmKind::Kruskal, &mst_input())
        .unwrap()
        .step();
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["algorithm"], "kruskal");
    assert_eq!(json["state"]["most_recent_edge"]["weight"], 0);
    assert_eq!(json["state"]["graph"]["edges"][4]["highlighted"], true);
}

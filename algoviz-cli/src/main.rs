mod check;
mod parse;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use algoviz::graph::{
    adjacency_lists, generate_connected_graph, generate_weighted_connected_graph,
    weighted_adjacency_lists,
};
use algoviz::{
    AlgorithmKind, AlgorithmState, Edge, Graph, Input, InputConfig, Stepper, Vertex,
    WeightedEdge, ALGORITHM_NAMES,
};

use crate::report::FullReport;

/// Step through classic algorithms one state at a time
#[derive(Parser)]
#[command(name = "algoviz", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress output on stderr
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Terminal,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List the available algorithms.
    List,
    /// Run one algorithm to completion, printing every state.
    Run {
        /// Algorithm name, or "random".
        algorithm: String,
        /// Input array, e.g. "3,1,4,0,2".
        #[arg(long, allow_hyphen_values = true)]
        array: Option<String>,
        /// Binary search target.
        #[arg(long, allow_hyphen_values = true)]
        target: Option<i32>,
        /// Vertex labels, e.g. "1,2,3". Defaults to the edge endpoints.
        #[arg(long)]
        vertices: Option<String>,
        /// Edges, e.g. "1-2:13,1-5:2". Weights default to 0.
        #[arg(long)]
        edges: Option<String>,
        /// Start vertex for BFS, DFS and Prim.
        #[arg(long)]
        start: Option<Vertex>,
        /// Seed for random input.
        #[arg(long)]
        seed: Option<u64>,
        /// TOML file with random input sizes.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Terminal)]
        format: Format,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print a random connected graph and its adjacency lists as JSON.
    Graph {
        /// Number of vertices (at most 12).
        vertices: usize,
        /// Give every edge a weight.
        #[arg(long)]
        weighted: bool,
        #[arg(long)]
        seed: Option<u64>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run randomized postcondition checks; exit with code 1 on any failure.
    Regression {
        /// Trials per check.
        #[arg(long, default_value_t = 500)]
        iterations: u64,
        /// First trial seed; trial i uses seed + i.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Only run checks whose name contains this string.
        #[arg(long)]
        check: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Terminal)]
        format: Format,
    },
}

#[derive(Serialize)]
struct StepOutput<'a> {
    step: usize,
    #[serde(flatten)]
    state: &'a AlgorithmState,
}

#[derive(Serialize)]
struct GraphOutput<G: Serialize, A: Serialize> {
    graph: G,
    adjacency: A,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::List => {
            cmd_list();
            Ok(())
        }
        Command::Run {
            algorithm,
            array,
            target,
            vertices,
            edges,
            start,
            seed,
            config,
            format,
            pretty,
        } => {
            let input = build_input(array, target, vertices, edges, start)?;
            cmd_run(
                &algorithm,
                input,
                seed,
                config,
                format,
                pretty,
                cli.quiet,
            )
        }
        Command::Graph {
            vertices,
            weighted,
            seed,
            pretty,
        } => cmd_graph(vertices, weighted, seed, pretty),
        Command::Regression {
            iterations,
            seed,
            config,
            check,
            format,
        } => cmd_regression(iterations, seed, config, check, format, cli.quiet),
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<InputConfig> {
    let Some(path) = path else {
        return Ok(InputConfig::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    InputConfig::from_toml(&text).with_context(|| format!("invalid config: {}", path.display()))
}

/// `None` when no explicit input was given at all.
fn build_input(
    array: Option<String>,
    target: Option<i32>,
    vertices: Option<String>,
    edges: Option<String>,
    start: Option<Vertex>,
) -> Result<Option<Input>> {
    if array.is_none() && target.is_none() && vertices.is_none() && edges.is_none() {
        if start.is_some() {
            bail!("--start needs a graph (--edges or --vertices)");
        }
        return Ok(None);
    }
    Ok(Some(Input {
        array: array.as_deref().map(parse::parse_array).transpose()?,
        target,
        vertices: vertices.as_deref().map(parse::parse_vertices).transpose()?,
        edges: edges.as_deref().map(parse::parse_edges).transpose()?,
        start,
    }))
}

fn cmd_list() {
    for name in ALGORITHM_NAMES {
        println!("{name}");
    }
}

fn cmd_run(
    algorithm: &str,
    input: Option<Input>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    format: Format,
    pretty: bool,
    quiet: bool,
) -> Result<()> {
    let mut rng = rng_from(seed);
    let kind = if algorithm == "random" {
        AlgorithmKind::random(&mut rng)
    } else {
        AlgorithmKind::from_name(algorithm)?
    };

    let state = match &input {
        Some(input) => AlgorithmState::from_input(kind, input)?,
        None => {
            let config = load_config(config)?;
            AlgorithmState::random(kind, &mut rng, &config)?
        }
    };
    if !quiet {
        eprintln!(
            "running {kind} on {} input",
            if input.is_some() { "explicit" } else { "random" }
        );
    }
    info!(algorithm = %kind, "starting run");

    let mut steps = 0;
    print_step(steps, &state, format, pretty)?;
    for snapshot in state.steps() {
        steps += 1;
        print_step(steps, &snapshot, format, pretty)?;
    }

    if !quiet {
        eprintln!("  finished after {steps} steps");
    }
    Ok(())
}

fn print_step(step: usize, state: &AlgorithmState, format: Format, pretty: bool) -> Result<()> {
    match format {
        Format::Terminal => println!("{step:>4}  {state}"),
        Format::Json => {
            let out = StepOutput { step, state };
            let json = if pretty {
                serde_json::to_string_pretty(&out)?
            } else {
                serde_json::to_string(&out)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

fn cmd_graph(vertices: usize, weighted: bool, seed: Option<u64>, pretty: bool) -> Result<()> {
    let mut rng = rng_from(seed);
    let json = if weighted {
        let graph: Graph<WeightedEdge> = generate_weighted_connected_graph(&mut rng, vertices)?;
        let adjacency = weighted_adjacency_lists(graph.edges());
        to_json(&GraphOutput { graph, adjacency }, pretty)?
    } else {
        let graph: Graph<Edge> = generate_connected_graph(&mut rng, vertices)?;
        let adjacency = adjacency_lists(graph.edges());
        to_json(&GraphOutput { graph, adjacency }, pretty)?
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn cmd_regression(
    iterations: u64,
    seed: u64,
    config: Option<PathBuf>,
    filter: Option<String>,
    format: Format,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config)?;
    let mut checks = check::all_checks();
    if let Some(pattern) = &filter {
        checks.retain(|c| c.name.contains(pattern.as_str()));
    }
    if checks.is_empty() {
        bail!("no checks match the filter");
    }

    let mut reports = Vec::new();
    for c in &checks {
        if !quiet {
            eprintln!("checking {} ({iterations} trials)", c.name);
        }
        reports.push(c.run(iterations, seed, &config));
    }

    let full = FullReport::from_checks(reports);
    match format {
        Format::Json => println!("{}", report::to_json(&full)),
        Format::Terminal => report::print_terminal(&full),
    }

    if !full.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_random_input() {
        assert_eq!(build_input(None, None, None, None, None).unwrap(), None);
        assert!(build_input(None, None, None, None, Some(1)).is_err());
    }

    #[test]
    fn vertices_default_to_edge_endpoints() {
        let input = build_input(None, None, None, Some("2-7:4,7-1".into()), Some(7))
            .unwrap()
            .unwrap();
        assert_eq!(input.vertices, None);
        assert_eq!(input.start, Some(7));
        match AlgorithmState::from_input(AlgorithmKind::Prim, &input).unwrap() {
            AlgorithmState::Prim(p) => assert_eq!(p.graph.vertices(), &[2, 7, 1]),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn explicit_input_runs_to_completion() {
        let input = build_input(Some("3,1,4,0,2".into()), None, None, None, None)
            .unwrap()
            .unwrap();
        let done = AlgorithmState::from_input(AlgorithmKind::SelectionSort, &input)
            .unwrap()
            .run_to_end();
        assert_eq!(done.to_string(), "[0 1 2 3 4] index=5 (finished)");
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "algoviz", "run", "prim", "--edges", "1-2:13,2-3:6", "--start", "3", "--format",
            "json",
        ])
        .unwrap();
        match cli.command {
            Command::Run {
                algorithm,
                start,
                format,
                ..
            } => {
                assert_eq!(algorithm, "prim");
                assert_eq!(start, Some(3));
                assert!(format == Format::Json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_accepts_negative_array_elements() {
        let cli = Cli::try_parse_from([
            "algoviz", "run", "insertion-sort", "--array", "-3,1,4", "--target", "-3",
        ])
        .unwrap();
        match cli.command {
            Command::Run { array, target, .. } => {
                assert_eq!(array.as_deref(), Some("-3,1,4"));
                assert_eq!(target, Some(-3));
                let parsed = parse::parse_array(array.as_deref().unwrap()).unwrap();
                assert_eq!(parsed, vec![-3, 1, 4]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn step_output_flattens_state() {
        let state = AlgorithmState::from_input(
            AlgorithmKind::InsertionSort,
            &Input {
                array: Some(vec![2, 1]),
                ..Input::default()
            },
        )
        .unwrap();
        let value = serde_json::to_value(StepOutput { step: 0, state: &state }).unwrap();
        assert_eq!(value["step"], 0);
        assert_eq!(value["algorithm"], "insertion-sort");
        assert_eq!(value["state"]["array"], serde_json::json!([2, 1]));
    }
}

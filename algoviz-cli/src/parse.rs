//! Parsers for the comma-separated command-line inputs.
use anyhow::{bail, Context, Result};

use algoviz::{Vertex, Weight, WeightedEdge};

/// Parse `"3,1,4"` into integers. Whitespace around items is ignored.
pub fn parse_array(s: &str) -> Result<Vec<i32>> {
    items(s)
        .map(|item| {
            item.parse::<i32>()
                .with_context(|| format!("invalid array element: {item}"))
        })
        .collect()
}

pub fn parse_vertices(s: &str) -> Result<Vec<Vertex>> {
    items(s)
        .map(|item| {
            item.parse::<Vertex>()
                .with_context(|| format!("invalid vertex label: {item}"))
        })
        .collect()
}

/// Parse `"1-2:13,1-5:2"` into weighted edges. A missing `:weight` means 0.
pub fn parse_edges(s: &str) -> Result<Vec<WeightedEdge>> {
    items(s).map(parse_edge).collect()
}

fn parse_edge(item: &str) -> Result<WeightedEdge> {
    let (pair, weight) = match item.split_once(':') {
        Some((pair, w)) => {
            let w = w
                .trim()
                .parse::<Weight>()
                .with_context(|| format!("invalid weight in edge: {item}"))?;
            (pair, w)
        }
        None => (item, 0),
    };
    let Some((from, to)) = pair.split_once('-') else {
        bail!("edge must look like FROM-TO[:WEIGHT], got: {item}");
    };
    let from = from
        .trim()
        .parse::<Vertex>()
        .with_context(|| format!("invalid endpoint in edge: {item}"))?;
    let to = to
        .trim()
        .parse::<Vertex>()
        .with_context(|| format!("invalid endpoint in edge: {item}"))?;
    Ok(WeightedEdge::new(from, to, weight))
}

fn items(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

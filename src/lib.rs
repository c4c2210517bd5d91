use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub mod graph;
pub mod map;
pub mod reach;
pub mod search;

pub use map::{Direction, KeySet, Map, Position, Tile};
pub use reach::{accessible_keys, ReachableKey};
pub use search::CollectPath;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Given map has no tile.")]
    EmptyMap,
    #[error("Expect {expect} column(s) in each row, given {given} in line {line}.")]
    InconsistentRow {
        line: usize,
        expect: usize,
        given: usize,
    },
    #[error("Invalid character({0}) for map.")]
    InvalidMapChar(char),
    #[error("Key({0}) appears more than once in map.")]
    DuplicateKey(char),
    #[error("No start position in map.")]
    NoStartPosition,
    #[error("Expect only one start position, given two({0}, {1}).")]
    MultipleStartPosition(Position, Position),
    #[error("Start position{0} isn't surrounded by floor, can't be split.")]
    UnsplittableEntrance(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Exhaustive recursive search, every branch on its own map copy.
    Brute,
    /// Recursive search with sub-paths cached by position and collected keys.
    Memo,
    /// Dijkstra's search over a precomputed graph of routes between keys.
    Graph,
}

impl Strategy {
    pub fn collect(&self, map: &Map) -> Result<CollectPath, Error> {
        let start_pos = map.start_pos()?;
        debug!("Collect keys from {} with {:?} strategy.", start_pos, self);
        let path = match self {
            Strategy::Brute => search::shortest_collect_path(map, &start_pos),
            Strategy::Memo => search::shortest_collect_path_memo(map, &start_pos),
            Strategy::Graph => graph::KeyGraph::build(map).find_shortest_collect_path(),
        };

        Ok(path)
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Find the shortest path collecting every key in a vault.")]
pub struct CLIArgs {
    pub input_path: PathBuf,
    #[arg(short, long, value_enum, default_value_t = Strategy::Memo)]
    pub strategy: Strategy,
}

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Find the shortest path collecting every key with one collector per vault entrance."
)]
pub struct SplitCLIArgs {
    pub input_path: PathBuf,
}

/// Parse command line arguments, exit with code 1 on usage errors.
pub fn parse_args<T: Parser>() -> T {
    T::try_parse().unwrap_or_else(|e| {
        let exit_code = if e.use_stderr() { 1 } else { 0 };
        // Nothing left to report if even printing the usage fails.
        let _ = e.print();
        process::exit(exit_code)
    })
}

/// Log to stderr, filtered by `RUST_LOG`(warnings only by default).
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

pub fn read_map<P: AsRef<Path>>(path: P) -> Result<Map> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(ind, line)| {
            line.with_context(|| {
                format!(
                    "Failed to read line {} from given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let map = Map::try_from_lines(lines.iter().map(|l| l.as_str()))
        .with_context(|| format!("Failed to parse map in given file({}).", path.as_ref().display()))?;
    debug!(
        "Read map({} x {}) with keys {} from {}.",
        map.row_n(),
        map.col_n(),
        map.keys(),
        path.as_ref().display()
    );

    Ok(map)
}

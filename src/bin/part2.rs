use anyhow::{Context, Result};
use key_maze::SplitCLIArgs;
use tracing::info;

fn main() -> Result<()> {
    key_maze::init_logging();
    let args: SplitCLIArgs = key_maze::parse_args();
    let mut map = key_maze::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read vault map from given file({}).",
            args.input_path.display()
        )
    })?;

    // Maps with several entrances are taken as already split.
    if map.start_positions().len() == 1 {
        map.split_entrance()
            .context("Failed to split the entrance of given vault.")?;
        info!("Split the entrance of given vault.");
    }
    println!("{}", map);

    let start_positions = map.start_positions();
    println!(
        "Start positions: {}",
        start_positions
            .iter()
            .map(|pos| pos.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let path = key_maze::graph::find_shortest_collect_path(&map)
        .context("Failed to find any entrance in given vault.")?;
    println!();
    println!(
        "Shortest path with {} collector(s): {}",
        start_positions.len(),
        path
    );
    println!("Distance: {}", path.steps_n());

    Ok(())
}

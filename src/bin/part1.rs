use anyhow::{Context, Result};
use key_maze::CLIArgs;
use tracing::info;

fn main() -> Result<()> {
    key_maze::init_logging();
    let args: CLIArgs = key_maze::parse_args();
    let map = key_maze::read_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read vault map from given file({}).",
            args.input_path.display()
        )
    })?;
    println!("{}", map);

    let start_pos = map
        .start_pos()
        .context("Failed to find the entrance of given vault.")?;
    println!("Start position: {}", start_pos);

    info!("Search with {:?} strategy.", args.strategy);
    let path = args.strategy.collect(&map).with_context(|| {
        format!(
            "Failed to search keys in given vault with {:?} strategy.",
            args.strategy
        )
    })?;
    println!();
    println!("Shortest path: {}", path);
    println!("Distance: {}", path.steps_n());

    Ok(())
}

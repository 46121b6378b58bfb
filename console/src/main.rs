use std::num::NonZero;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use voltaic::{Builder, GridBuilder, Location, Side, Strategy};

/// Lay out a grid, power it, and print the board.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(short = 'W', long, default_value_t = NonZero::new(8).unwrap())]
    width: NonZero<usize>,
    #[arg(short = 'H', long, default_value_t = NonZero::new(8).unwrap())]
    height: NonZero<usize>,
    /// One of manual, fractal, kruskal or empty
    #[arg(short, long, default_value_t = Strategy::Kruskal)]
    strategy: Strategy,
    /// Seed for the random layout; fresh entropy if absent
    #[arg(long)]
    seed: Option<u64>,
    /// Turn every piece a random number of quarter turns
    #[arg(long)]
    scramble: bool,
    /// Start the power source here, as column and row
    #[arg(long, num_args = 2, value_names = ["COL", "ROW"])]
    source: Option<Vec<usize>>,
    /// Walk the source across these sides after building, e.g. `down down right`
    #[arg(long, num_args = 1..)]
    moves: Vec<Side>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut builder = GridBuilder::with_dims((args.width, args.height));
    builder.strategy(args.strategy).scramble(args.scramble);
    if let Some([col, row]) = args.source.as_deref() {
        builder.source(Location(*col, *row));
    }

    let mut grid = builder.build(&mut rng)?;
    println!("{}x{} {} grid, radius {}", grid.width(), grid.height(), args.strategy, grid.radius());

    for side in args.moves {
        let from = grid.source();
        grid.move_source_and_refresh(side)
            .with_context(|| format!("moving the source {} from {:?}", side, from))?;
    }

    print!("{}", grid);
    println!("source at {:?}, {} of {} pieces powered", grid.source(), grid.powered().len(), grid.node_count());
    if grid.solved() {
        println!("solved");
    }

    Ok(())
}

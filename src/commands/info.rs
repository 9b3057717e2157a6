//! Info command handler

use anyhow::{Context, Result};

use towr_replay::cli::InfoArgs;
use towr_replay::{EffectorLayout, TrajectoryFile};

/// Load a trajectory and print a summary of it.
pub fn handle(args: &InfoArgs) -> Result<()> {
    let layout = if args.grouped {
        EffectorLayout::Grouped
    } else {
        EffectorLayout::Interleaved
    };

    let file = TrajectoryFile::parse(&args.file, layout)
        .with_context(|| format!("Failed to load trajectory {}", args.file.display()))?;

    println!("File:       {}", args.file.display());
    println!("Samples:    {}", file.samples.len());
    println!("Effectors:  {}", file.effector_count());
    println!("Timestep:   {:.3} ms", file.timestep * 1_000.0);
    println!("Duration:   {:.3} s", file.duration());
    println!("Columns:    {}", file.columns.len());
    println!("Layout:     {}", layout);

    if let (Some(first), Some(last)) = (file.samples.first(), file.samples.last()) {
        let travel = last.base_position - first.base_position;
        println!(
            "Base moves: ({:.2}, {:.2}, {:.2}) cm",
            travel.x, travel.y, travel.z
        );
    }

    Ok(())
}

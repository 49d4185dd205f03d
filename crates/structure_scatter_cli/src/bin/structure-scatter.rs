use std::path::PathBuf;

use clap::Parser;
use structure_scatter::prelude::*;
use structure_scatter_cli::{
    init_logging, load_config, render_occupancy_ascii, render_occupancy_to_png, write_export,
    RenderConfig,
};
use tracing::warn;

/// Generate structure placements for a chunk-based world.
///
/// Every flag overrides the matching field of `--config` (or the built-in defaults).
#[derive(Parser, Debug)]
#[command(name = "structure-scatter", version)]
struct Args {
    /// JSON generator config to start from.
    #[arg(long)]
    config: Option<PathBuf>,

    /// World size X in chunks.
    #[arg(long)]
    width: Option<u32>,

    /// World size Z in chunks.
    #[arg(long)]
    depth: Option<u32>,

    #[arg(long, allow_negative_numbers = true)]
    y_min: Option<i32>,

    #[arg(long, allow_negative_numbers = true)]
    y_max: Option<i32>,

    /// Region size in chunks (Region algorithm).
    #[arg(long)]
    region_size: Option<u32>,

    #[arg(long, allow_negative_numbers = true, conflicts_with = "structure_type")]
    structure_id: Option<i32>,

    /// Preset structure type: FLOATING_ABOVE_GROUND, ON_GROUND or UNDER_GROUND.
    #[arg(long)]
    structure_type: Option<StructureType>,

    /// Placement chance per region in [0, 1].
    #[arg(long)]
    fill_rate: Option<f32>,

    /// Seed; text that is not a plain number means "no seed".
    #[arg(long)]
    seed: Option<String>,

    /// "Region" or "Poisson".
    #[arg(long)]
    algorithm: Option<Algorithm>,

    /// Minimum distance between placements (Poisson algorithm).
    #[arg(long)]
    min_distance: Option<f32>,

    /// Candidates per active point (Poisson algorithm).
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Write the JSON export here.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render the occupancy grid to a PNG.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Print the occupancy grid to stdout.
    #[arg(long)]
    grid: bool,
}

impl Args {
    /// Applies the flags on top of `base`, returning the config and any notes about
    /// ignored input.
    fn into_config(self, base: GeneratorConfig) -> (GeneratorConfig, Vec<String>) {
        let mut config = base;
        let mut notes = Vec::new();
        if let Some(width) = self.width {
            config.bounds.width = width;
        }
        if let Some(depth) = self.depth {
            config.bounds.depth = depth;
        }
        if let Some(min) = self.y_min {
            config.y_range.min = min;
        }
        if let Some(max) = self.y_max {
            config.y_range.max = max;
        }
        if let Some(region_size) = self.region_size {
            config.region_size = region_size;
        }
        if let Some(id) = self.structure_id {
            config.structure_id = id;
        }
        if let Some(kind) = self.structure_type {
            config.structure_id = kind.id();
        }
        if let Some(fill_rate) = self.fill_rate {
            config.fill_rate = fill_rate;
        }
        if let Some(text) = self.seed.as_deref() {
            config.seed = parse_seed(text);
            if config.seed.is_none() {
                notes.push(format!(
                    "Seed '{text}' is not a number; generating without a seed."
                ));
            }
        }
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(min_distance) = self.min_distance {
            config.min_distance = min_distance;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        (config, notes)
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let output = args.output.clone();
    let png = args.png.clone();
    let show_grid = args.grid;

    let base = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    let (config, notes) = args.into_config(base);
    for note in &notes {
        warn!("{note}");
    }

    let result = generate(&config)?;
    for warning in &result.warnings {
        eprintln!("WARNING: {warning}");
    }

    let grid = OccupancyGrid::from_placements(result.bounds, &result.placements);
    println!(
        "{} placements ({} occupied chunks) in a {}x{} world, algorithm {}, seed {}",
        result.placements.len(),
        grid.occupied_count(),
        result.bounds.width,
        result.bounds.depth,
        config.algorithm,
        result.seed
    );

    if show_grid {
        print!("{}", render_occupancy_ascii(&grid));
    }
    if let Some(path) = png {
        render_occupancy_to_png(&grid, &RenderConfig::default(), &path)?;
    }
    if let Some(path) = output {
        write_export(&path, &ExportDocument::from_result(&config, &result))?;
    }

    Ok(())
}

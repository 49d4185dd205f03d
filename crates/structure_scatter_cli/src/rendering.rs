//! Occupancy views: ASCII for terminals, PNG for files.
use std::path::Path;

use anyhow::Context;
use image::{Rgb, RgbImage};
use structure_scatter::prelude::OccupancyGrid;

/// Installs an `env_logger` backend; library `tracing` events are forwarded to it.
/// Defaults to `info`, override with `RUST_LOG`.
pub fn init_logging() {
    // A second call (tests, embedding) finds a logger already installed.
    if let Err(err) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init()
    {
        tracing::debug!("Logger already initialized: {err}");
    }
}

/// PNG rendering options.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Side of one chunk cell in pixels.
    pub cell_size_px: u32,
    /// Image sides are capped at this size; cells beyond it are cut off.
    pub max_size_px: u32,
    pub occupied: [u8; 3],
    pub empty: [u8; 3],
    pub outline: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size_px: 8,
            max_size_px: 640,
            occupied: [255, 0, 0],
            empty: [255, 255, 255],
            outline: [128, 128, 128],
        }
    }
}

impl RenderConfig {
    /// Image dimensions for `grid`.
    pub fn image_size(&self, grid: &OccupancyGrid) -> (u32, u32) {
        let cell = self.cell_size_px.max(1);
        (
            grid.width.saturating_mul(cell).min(self.max_size_px).max(1),
            grid.depth.saturating_mul(cell).min(self.max_size_px).max(1),
        )
    }
}

/// Renders the grid: X runs right, Z runs down.
pub fn render_occupancy_image(grid: &OccupancyGrid, config: &RenderConfig) -> RgbImage {
    let cell = config.cell_size_px.max(1);
    let (w, h) = config.image_size(grid);
    RgbImage::from_fn(w, h, |px, py| {
        if px % cell == 0 || py % cell == 0 || px == w - 1 || py == h - 1 {
            return Rgb(config.outline);
        }
        let occupied = grid.is_occupied((px / cell) as i32, (py / cell) as i32);
        Rgb(if occupied {
            config.occupied
        } else {
            config.empty
        })
    })
}

pub fn render_occupancy_to_png(
    grid: &OccupancyGrid,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    render_occupancy_image(grid, config)
        .save(path)
        .with_context(|| format!("saving {}", path.display()))
}

/// One line per Z row: `#` for occupied chunks, `.` for empty ones.
pub fn render_occupancy_ascii(grid: &OccupancyGrid) -> String {
    let mut out = String::with_capacity((grid.width as usize + 1) * grid.depth as usize);
    for row in grid.rows() {
        out.extend(row.iter().map(|c| if *c > 0 { '#' } else { '.' }));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use structure_scatter::prelude::*;

    use super::*;

    #[test]
    fn init_logging_can_run_twice() {
        init_logging();
        init_logging();
    }

    fn grid() -> OccupancyGrid {
        let config = GeneratorConfig::new(WorldBounds::new(4, 4))
            .with_region_size(4)
            .with_fill_rate(1.0)
            .with_seed(Some(3));
        let result = generate(&config).unwrap();
        OccupancyGrid::from_placements(result.bounds, &result.placements)
    }

    #[test]
    fn ascii_marks_single_placement() {
        let text = render_occupancy_ascii(&grid());
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.matches('#').count(), 1);
        assert!(text.lines().all(|l| l.len() == 4));
    }

    #[test]
    fn image_size_is_capped() {
        let config = RenderConfig::default();
        let big = OccupancyGrid::new(WorldBounds::new(128, 40));
        assert_eq!(config.image_size(&big), (640, 320));
    }

    #[test]
    fn occupied_cell_is_painted() {
        let grid = grid();
        let config = RenderConfig::default();
        let image = render_occupancy_image(&grid, &config);
        let reds = image
            .pixels()
            .filter(|p| p.0 == config.occupied)
            .count();
        // One cell interior; cells on the right or bottom edge lose a row or column to
        // the image border.
        assert!((6 * 6..=7 * 7).contains(&reds), "unexpected red pixels {reds}");
    }
}

//! Poisson disk placement strategy (Bridson's algorithm).
use std::f32::consts::{SQRT_2, TAU};

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::placement::{Placement, PlacementBuilder};
use crate::sampling::{
    next_down, rand01, rand_index, PlacementRequest, PlacementSampling, PositionSampling,
    DEFAULT_MAX_ATTEMPTS,
};
use crate::world::WorldBounds;

/// Upper bound on acceleration-grid cells for one run.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Acceleration grid dimensions for `radius` over `extent`, or `None` if the grid
/// would exceed [`MAX_GRID_CELLS`].
fn grid_dims(radius: f32, extent: Vec2) -> Option<(usize, usize)> {
    let cell_size = radius / SQRT_2;
    let cols = (extent.x / cell_size).ceil();
    let rows = (extent.y / cell_size).ceil();
    let limit = MAX_GRID_CELLS as f32;
    if !(cols.is_finite() && rows.is_finite() && cols <= limit && rows <= limit) {
        return None;
    }
    let (cols, rows) = ((cols as usize).max(1), (rows as usize).max(1));
    cols.checked_mul(rows)
        .filter(|cells| *cells <= MAX_GRID_CELLS)
        .map(|_| (cols, rows))
}

/// Poisson disk sampling strategy.
///
/// Produces blue-noise positions where no two samples are closer than
/// `min_distance`. Y values and structure ids are attached afterwards, one
/// independent Y draw per accepted sample in acceptance order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonDiskSampling {
    /// Minimum center-to-center distance between samples in chunks.
    pub min_distance: f32,
    /// Candidates tried around an active sample before it is retired.
    pub max_attempts: u32,
}

impl PoissonDiskSampling {
    /// Create a new PoissonDiskSampling with the default attempt budget.
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Override the number of candidates tried per active sample.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn is_valid(&self) -> bool {
        self.min_distance.is_finite() && self.min_distance > 0.0 && self.max_attempts > 0
    }

    /// Runs Bridson's algorithm over `bounds` and returns the accepted samples in
    /// acceptance order.
    pub fn sample_points(&self, bounds: WorldBounds, rng: &mut dyn RngCore) -> Vec<Vec2> {
        if !self.is_valid() || bounds.width == 0 || bounds.depth == 0 {
            return Vec::new();
        }
        let Some(dims) = grid_dims(self.min_distance, bounds.extent()) else {
            return Vec::new();
        };

        let mut sampler = PoissonDiskSampler::new(self.min_distance, bounds.extent(), dims);
        sampler.generate(rng, self.max_attempts)
    }
}

impl PositionSampling for PoissonDiskSampling {
    fn generate(&self, bounds: WorldBounds, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        self.sample_points(bounds, rng)
            .into_iter()
            .map(Into::into)
            .collect()
    }
}

impl PlacementSampling for PoissonDiskSampling {
    fn validate(&self) -> Result<()> {
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_distance must be a finite value > 0 (got {})",
                self.min_distance
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }
        Ok(())
    }

    fn sample(
        &self,
        request: &PlacementRequest,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Vec<Placement>> {
        self.validate()?;
        request.bounds.validate()?;
        if grid_dims(self.min_distance, request.bounds.extent()).is_none() {
            return Err(Error::InvalidConfig(format!(
                "min_distance {} is too small for a {}x{} world (more than {} grid cells)",
                self.min_distance, request.bounds.width, request.bounds.depth, MAX_GRID_CELLS
            )));
        }

        let points = self.sample_points(request.bounds, rng);
        let mut builder = PlacementBuilder::new(request.y_range, request.structure_id);
        let mut placements = Vec::with_capacity(points.len());
        for point in points {
            placements.push(builder.place(point, rng, sink));
        }
        Ok(placements)
    }
}

/// State of one Bridson run. The acceleration grid lives only as long as the run.
struct PoissonDiskSampler {
    radius: f32,
    radius_squared: f32,
    cell_size: f32,
    grid_width: usize,
    grid_height: usize,
    grid: Vec<Option<Vec2>>,
    active_list: Vec<Vec2>,
    bounds: Vec2,
}

impl PoissonDiskSampler {
    fn new(radius: f32, bounds: Vec2, (grid_width, grid_height): (usize, usize)) -> Self {
        debug_assert!(radius > 0.0);
        let cell_size = radius / SQRT_2;

        Self {
            radius,
            radius_squared: radius * radius,
            cell_size,
            grid_width,
            grid_height,
            grid: vec![None; grid_width * grid_height],
            active_list: Vec::new(),
            bounds,
        }
    }

    #[inline]
    fn grid_index(&self, x: usize, y: usize) -> usize {
        y * self.grid_width + x
    }

    #[inline]
    fn point_to_grid(&self, point: Vec2) -> (usize, usize) {
        let x = ((point.x / self.cell_size).floor() as isize)
            .clamp(0, self.grid_width as isize - 1) as usize;
        let y = ((point.y / self.cell_size).floor() as isize)
            .clamp(0, self.grid_height as isize - 1) as usize;
        (x, y)
    }

    #[inline]
    fn in_bounds(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.bounds.x && point.y >= 0.0 && point.y < self.bounds.y
    }

    fn is_valid_point(&self, point: Vec2) -> bool {
        if !self.in_bounds(point) {
            return false;
        }

        let (gx, gy) = self.point_to_grid(point);
        let start_x = gx.saturating_sub(2);
        let end_x = (gx + 3).min(self.grid_width);
        let start_y = gy.saturating_sub(2);
        let end_y = (gy + 3).min(self.grid_height);

        for y in start_y..end_y {
            for x in start_x..end_x {
                if let Some(existing) = self.grid[self.grid_index(x, y)] {
                    if point.distance_squared(existing) < self.radius_squared {
                        return false;
                    }
                }
            }
        }

        true
    }

    fn add_point(&mut self, point: Vec2) {
        let (gx, gy) = self.point_to_grid(point);
        let idx = self.grid_index(gx, gy);
        debug_assert!(self.grid[idx].is_none(), "grid cell already occupied");
        self.grid[idx] = Some(point);
        self.active_list.push(point);
    }

    fn generate_around_point(
        &self,
        rng: &mut dyn RngCore,
        point: Vec2,
        max_attempts: u32,
    ) -> Option<Vec2> {
        for _ in 0..max_attempts {
            let angle = rand01(rng) * TAU;
            let distance = self.radius * (1.0 + rand01(rng));
            let candidate = point + Vec2::from_angle(angle) * distance;

            if self.is_valid_point(candidate) {
                return Some(candidate);
            }
        }

        None
    }

    fn generate(&mut self, rng: &mut dyn RngCore, max_attempts: u32) -> Vec<Vec2> {
        let initial = Vec2::new(
            (rand01(rng) * self.bounds.x).min(next_down(self.bounds.x)),
            (rand01(rng) * self.bounds.y).min(next_down(self.bounds.y)),
        );
        self.add_point(initial);

        let mut points = vec![initial];
        let mut retired = 0usize;

        while !self.active_list.is_empty() {
            let idx = rand_index(rng, self.active_list.len());
            let active = self.active_list[idx];

            match self.generate_around_point(rng, active, max_attempts) {
                Some(p) => {
                    self.add_point(p);
                    points.push(p);
                }
                None => {
                    self.active_list.swap_remove(idx);
                    retired += 1;
                }
            }
        }

        debug!(
            "Poisson disk sampling accepted {} samples on a {}x{} grid ({} retired).",
            points.len(),
            self.grid_width,
            self.grid_height,
            retired
        );

        points
    }
}

//! Jittered region-grid placement strategy.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::events::EventSink;
use crate::placement::{Placement, PlacementBuilder};
use crate::sampling::{rand01, rand_i32_inclusive, PlacementRequest, PlacementSampling};

/// Jitter offsets are drawn from `[-JITTER_MARGIN, region_size + JITTER_MARGIN)`, so a
/// placement may land slightly inside a neighboring region.
pub const JITTER_MARGIN: i32 = 2;

const MAX_REGION_SIZE: u32 = 1 << 30;

/// Region-grid sampling.
///
/// The world is swept in square regions of `region_size` chunks. Each region is
/// occupied with probability `fill_rate`; an occupied region yields one placement
/// jittered around the region origin and clamped to the world.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSampling {
    /// Side length of a region in chunks.
    pub region_size: u32,
    /// Probability in [0, 1] that a region receives a placement.
    pub fill_rate: f32,
}

impl RegionSampling {
    pub fn new(region_size: u32, fill_rate: f32) -> Self {
        Self {
            region_size,
            fill_rate,
        }
    }

    /// Number of regions swept for `bounds`, the upper bound on placements.
    pub fn region_count(&self, request: &PlacementRequest) -> u64 {
        let size = self.region_size.max(1) as u64;
        let cols = (request.bounds.width as u64).div_ceil(size);
        let rows = (request.bounds.depth as u64).div_ceil(size);
        cols * rows
    }
}

impl PlacementSampling for RegionSampling {
    fn validate(&self) -> Result<()> {
        if self.region_size == 0 {
            return Err(Error::InvalidConfig("region_size must be > 0".into()));
        }
        if self.region_size > MAX_REGION_SIZE {
            return Err(Error::InvalidConfig(format!(
                "region_size must be <= {MAX_REGION_SIZE}"
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_rate) {
            return Err(Error::InvalidConfig(format!(
                "fill_rate must be within [0, 1] (got {})",
                self.fill_rate
            )));
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

        let bounds = request.bounds;
        let step = self.region_size as usize;
        let jitter_max = self.region_size as i32 + JITTER_MARGIN - 1;
        let mut builder = PlacementBuilder::new(request.y_range, request.structure_id);
        let mut placements = Vec::new();

        for region_x in (0..bounds.width).step_by(step) {
            for region_z in (0..bounds.depth).step_by(step) {
                if rand01(rng) > self.fill_rate {
                    continue;
                }

                let jx = rand_i32_inclusive(rng, -JITTER_MARGIN, jitter_max);
                let jz = rand_i32_inclusive(rng, -JITTER_MARGIN, jitter_max);
                let (x, z) =
                    bounds.clamp(region_x as i64 + jx as i64, region_z as i64 + jz as i64);

                placements.push(builder.place_at(x, z, rng, sink));
            }
        }

        debug!(
            "Region sampling placed {} of {} regions (size {}, fill rate {}).",
            placements.len(),
            self.region_count(request),
            self.region_size,
            self.fill_rate
        );

        Ok(placements)
    }
}

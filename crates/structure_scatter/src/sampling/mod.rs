//! Sampling strategies for placing structures in a chunk-based world.
//!
//! Two traits live here:
//! - [`PositionSampling`]: produces raw 2D positions in `[0, width) x [0, depth)`.
//! - [`PlacementSampling`]: produces finished [`Placement`]s for a [`PlacementRequest`],
//!   attaching Y and structure ids through a [`crate::placement::PlacementBuilder`].
//!
//! Helpers for drawing uniform values from a [`RngCore`] are shared by all strategies
//! so every sampler consumes the random stream the same way.
use mint::Vector2;
use rand::RngCore;

use crate::error::Result;
use crate::events::EventSink;
use crate::placement::{Placement, StructureId};
use crate::world::{WorldBounds, YRange};

pub mod poisson_disk;
pub mod region;

pub use poisson_disk::PoissonDiskSampling;
pub use region::RegionSampling;

/// Default number of candidates tried around an active point before it is retired.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// Trait for 2D position sampling over the world rectangle.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, bounds: WorldBounds, rng: &mut dyn RngCore) -> Vec<Vector2<f32>>;
}

/// Everything a placement sampler needs besides its own parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub bounds: WorldBounds,
    pub y_range: YRange,
    pub structure_id: StructureId,
}

impl PlacementRequest {
    pub fn new(bounds: WorldBounds, y_range: YRange, structure_id: StructureId) -> Self {
        Self {
            bounds,
            y_range,
            structure_id,
        }
    }
}

/// Trait for strategies producing finished placements.
pub trait PlacementSampling: Send + Sync {
    /// Checks the sampler's own parameters.
    fn validate(&self) -> Result<()>;

    /// Runs the sampler to completion. Validation happens before any random draw.
    fn sample(
        &self,
        request: &PlacementRequest,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<Vec<Placement>>;
}

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    // 24 random bits fill the f32 mantissa exactly, so 1.0 is never produced.
    (rng.next_u32() >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

/// Generate a uniformly distributed integer in `[0, span)`.
///
/// Uses rejection on a 64-bit draw so every value is equally likely. `span` must be
/// non-zero.
pub(crate) fn rand_below(rng: &mut dyn RngCore, span: u64) -> u64 {
    debug_assert!(span > 0, "empty span");
    // 2^64 mod span; draws at or above 2^64 - rem would bias the low values.
    let rem = (u64::MAX % span + 1) % span;
    loop {
        let v = rng.next_u64();
        if rem == 0 || v < 0u64.wrapping_sub(rem) {
            return v % span;
        }
    }
}

/// Generate a uniformly distributed integer in `[lo, hi]`. Callers must ensure `lo <= hi`.
#[inline]
pub(crate) fn rand_i32_inclusive(rng: &mut dyn RngCore, lo: i32, hi: i32) -> i32 {
    debug_assert!(lo <= hi, "empty range {lo}..={hi}");
    let span = (hi as i64 - lo as i64 + 1) as u64;
    (lo as i64 + rand_below(rng, span) as i64) as i32
}

/// Generate a uniformly distributed index in `[0, len)`. `len` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    rand_below(rng, len as u64) as usize
}

/// Compute the next smaller representable float value.
///
/// Returns a value that is strictly less than the input, useful for
/// ensuring bounds are strictly inside a domain.
#[inline]
pub(crate) fn next_down(val: f32) -> f32 {
    if val.is_nan() {
        return f32::NAN;
    }

    if val == f32::NEG_INFINITY {
        return f32::NEG_INFINITY;
    }

    if val == f32::INFINITY {
        return f32::MAX;
    }

    if val == 0.0 {
        return -f32::MIN_POSITIVE;
    }

    let bits = val.to_bits();
    if val > 0.0 {
        f32::from_bits(bits.saturating_sub(1))
    } else {
        f32::from_bits(bits.saturating_add(1))
    }
}

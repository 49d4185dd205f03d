//! World geometry shared by all samplers.
//!
//! The world is a rectangle of chunks `[0, width) x [0, depth)` in the X/Z plane.
//! Samplers work on continuous coordinates inside that rectangle; placements are
//! quantized to integer chunk coordinates.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of blocks along one side of a chunk. Used to scale exported coordinates.
pub const BLOCKS_PER_CHUNK: i64 = 16;

/// Horizontal extent of the world in chunks.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldBounds {
    /// Extent along X in chunks.
    pub width: u32,
    /// Extent along Z in chunks.
    pub depth: u32,
}

impl WorldBounds {
    pub fn new(width: u32, depth: u32) -> Self {
        Self { width, depth }
    }

    /// Validates the bounds, returning an error if either extent is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.depth == 0 {
            return Err(Error::InvalidConfig(format!(
                "world bounds must be > 0 in both components (got {}x{})",
                self.width, self.depth
            )));
        }
        Ok(())
    }

    /// Continuous extent of the world, `x` = width and `y` = depth.
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.depth as f32)
    }

    /// Returns `true` if the integer chunk coordinate lies inside the world.
    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as i64) < self.width as i64 && (z as i64) < self.depth as i64
    }

    /// Clamps a chunk coordinate into `[0, width-1] x [0, depth-1]`.
    #[inline]
    pub fn clamp(&self, x: i64, z: i64) -> (i32, i32) {
        let x = x.clamp(0, self.width as i64 - 1);
        let z = z.clamp(0, self.depth as i64 - 1);
        (x as i32, z as i32)
    }

    /// Total number of chunks in the world.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.depth as u64
    }
}

/// Inclusive vertical range placements draw their Y from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YRange {
    pub min: i32,
    pub max: i32,
}

impl YRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A range holding exactly one value.
    pub fn fixed(y: i32) -> Self {
        Self { min: y, max: y }
    }

    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    #[inline]
    pub fn contains(&self, y: i32) -> bool {
        self.min <= y && y <= self.max
    }
}

/// Scales a chunk coordinate to block units.
#[inline]
pub fn chunk_to_block(chunk: i32) -> i64 {
    chunk as i64 * BLOCKS_PER_CHUNK
}

/// Converts a block coordinate back to its chunk coordinate (floor division).
#[inline]
pub fn block_to_chunk(block: i64) -> i32 {
    block.div_euclid(BLOCKS_PER_CHUNK) as i32
}

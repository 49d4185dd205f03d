//! Occupancy grid built from placements, for display layers.
//!
//! A cell is occupied when at least one placement has exactly its chunk coordinate.
use crate::placement::Placement;
use crate::world::WorldBounds;

/// Per-chunk placement counts for a world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    pub width: u32,
    pub depth: u32,
    counts: Vec<u32>,
}

impl OccupancyGrid {
    /// Create an empty grid for `bounds`.
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            width: bounds.width,
            depth: bounds.depth,
            counts: vec![0; bounds.area() as usize],
        }
    }

    /// Builds the grid for `placements`. Placements outside `bounds` are ignored.
    pub fn from_placements(bounds: WorldBounds, placements: &[Placement]) -> Self {
        let mut grid = Self::new(bounds);
        for p in placements {
            grid.mark(p.x(), p.z());
        }
        grid
    }

    #[inline]
    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x as u32 >= self.width || z as u32 >= self.depth {
            return None;
        }
        Some(z as usize * self.width as usize + x as usize)
    }

    /// Increments the count at a chunk coordinate; returns `false` if it lies outside.
    pub fn mark(&mut self, x: i32, z: i32) -> bool {
        match self.index(x, z) {
            Some(idx) => {
                self.counts[idx] += 1;
                true
            }
            None => false,
        }
    }

    /// Number of placements at a chunk coordinate (0 outside the world).
    pub fn count_at(&self, x: i32, z: i32) -> u32 {
        self.index(x, z).map_or(0, |idx| self.counts[idx])
    }

    pub fn is_occupied(&self, x: i32, z: i32) -> bool {
        self.count_at(x, z) > 0
    }

    /// Number of cells holding at least one placement.
    pub fn occupied_count(&self) -> usize {
        self.counts.iter().filter(|c| **c > 0).count()
    }

    /// Rows of counts, one per Z, each `width` long.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.counts.chunks(self.width.max(1) as usize)
    }
}

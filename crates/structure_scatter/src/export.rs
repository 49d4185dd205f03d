//! Export document for persisting a generation run.
//!
//! The document carries a `metadata` block echoing the run configuration and a
//! `structures` list in generation order. Horizontal coordinates are written in
//! block units ([`crate::world::BLOCKS_PER_CHUNK`] per chunk); Y is written unscaled. With the
//! `serde` feature the document serializes to:
//!
//! ```json
//! { "metadata": { "world_x": 128, "world_z": 96, "region_size": 16, "seed": 42, "algorithm": "Region" },
//!   "structures": [ { "x": 32, "y": 0, "z": 160, "type": 16 } ] }
//! ```
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::placement::{Placement, StructureId};
use crate::runner::{Algorithm, GenerationResult, GeneratorConfig};
use crate::world::{block_to_chunk, chunk_to_block};

/// Run configuration echoed into the export.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportMetadata {
    pub world_x: u32,
    pub world_z: u32,
    pub region_size: u32,
    /// Seed the run used; reproduces the run together with the other fields.
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
}

/// One exported placement in block coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRecord {
    pub x: i64,
    pub y: i32,
    pub z: i64,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub structure_type: StructureId,
}

impl From<&Placement> for StructureRecord {
    fn from(p: &Placement) -> Self {
        Self {
            x: chunk_to_block(p.x()),
            y: p.y(),
            z: chunk_to_block(p.z()),
            structure_type: p.structure_id(),
        }
    }
}

impl StructureRecord {
    /// Converts back to chunk space. Block coordinates are floored to their chunk.
    pub fn to_placement(&self) -> Placement {
        Placement::new(
            block_to_chunk(self.x),
            block_to_chunk(self.z),
            self.y,
            self.structure_type,
        )
    }
}

/// Persisted form of a generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub structures: Vec<StructureRecord>,
}

impl ExportDocument {
    /// Builds the document for `result`, produced from `config`.
    pub fn from_result(config: &GeneratorConfig, result: &GenerationResult) -> Self {
        Self {
            metadata: ExportMetadata {
                world_x: result.bounds.width,
                world_z: result.bounds.depth,
                region_size: config.region_size,
                seed: Some(result.seed),
                algorithm: config.algorithm,
            },
            structures: result.placements.iter().map(StructureRecord::from).collect(),
        }
    }

    /// Placements in chunk coordinates, in document order.
    pub fn chunk_placements(&self) -> Vec<Placement> {
        self.structures
            .iter()
            .map(StructureRecord::to_placement)
            .collect()
    }
}

#![forbid(unsafe_code)]
//! structure_scatter: deterministic structure placement for chunk-based worlds.
//!
//! Modules:
//! - world: world bounds, Y ranges, chunk/block conversion
//! - sampling: placement strategies (jittered region grid, Poisson disk)
//! - placement: placements and the builder attaching Y and structure ids
//! - runner: configuration, algorithm selection, single-run execution
//! - events: observing runs (warnings, placements)
//! - export: persisted document with block-scaled coordinates
//! - occupancy: per-chunk occupancy grid for display layers
pub mod error;
pub mod events;
pub mod export;
pub mod occupancy;
pub mod placement;
pub mod runner;
pub mod sampling;
pub mod world;

/// Convenient re-exports for common types. Import with `use structure_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::events::{EventSink, FnSink, GenerationEvent, GenerationEventKind, VecSink};
    pub use crate::export::{ExportDocument, ExportMetadata, StructureRecord};
    pub use crate::occupancy::OccupancyGrid;
    pub use crate::placement::{Placement, PlacementBuilder, StructureId, StructureType};
    pub use crate::runner::{
        generate, generate_with_events, parse_seed, Algorithm, GenerationResult,
        GeneratorConfig, StructureGenerator,
    };
    pub use crate::sampling::{
        PlacementRequest, PlacementSampling, PoissonDiskSampling, PositionSampling,
        RegionSampling, DEFAULT_MAX_ATTEMPTS,
    };
    pub use crate::world::{WorldBounds, YRange, BLOCKS_PER_CHUNK};
}

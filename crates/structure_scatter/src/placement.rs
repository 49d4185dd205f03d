//! Placements and the builder that finalizes sampler output into them.
//!
//! Samplers produce positions in chunk space; [`PlacementBuilder`] quantizes them,
//! resolves the vertical coordinate from a [`YRange`] and stamps the structure id.
//! Keeping this step separate lets every sampler share one Y policy.
use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Error;
use crate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::sampling::rand_i32_inclusive;
use crate::world::YRange;

/// Identifier of the structure placed at a location.
pub type StructureId = i32;

/// A single structure instance: chunk X/Z, vertical Y and structure id.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    x: i32,
    z: i32,
    y: i32,
    structure_id: StructureId,
}

impl Placement {
    pub(crate) fn new(x: i32, z: i32, y: i32, structure_id: StructureId) -> Self {
        Self {
            x,
            z,
            y,
            structure_id,
        }
    }

    /// Chunk X coordinate.
    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Chunk Z coordinate.
    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// Vertical coordinate, unscaled.
    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn structure_id(&self) -> StructureId {
        self.structure_id
    }
}

/// Built-in structure categories.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureType {
    FloatingAboveGround,
    OnGround,
    UnderGround,
}

impl StructureType {
    pub const ALL: [StructureType; 3] = [
        StructureType::FloatingAboveGround,
        StructureType::OnGround,
        StructureType::UnderGround,
    ];

    /// Numeric structure id written to placements.
    pub fn id(self) -> StructureId {
        match self {
            StructureType::FloatingAboveGround => 0,
            StructureType::OnGround => 1,
            StructureType::UnderGround => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StructureType::FloatingAboveGround => "FLOATING_ABOVE_GROUND",
            StructureType::OnGround => "ON_GROUND",
            StructureType::UnderGround => "UNDER_GROUND",
        }
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_uppercase();
        StructureType::ALL
            .into_iter()
            .find(|t| t.name() == normalized)
            .ok_or_else(|| Error::UnknownStructureType { name: s.to_owned() })
    }
}

/// Attaches Y and a structure id to sampled positions.
///
/// If the configured range is inverted (`min > max`) the first placement reports a
/// warning, uses `min`, and the range is collapsed to `min..=min` for every later
/// placement of the run.
#[derive(Debug, Clone)]
pub struct PlacementBuilder {
    y_range: YRange,
    structure_id: StructureId,
    warnings: Vec<String>,
}

impl PlacementBuilder {
    pub fn new(y_range: YRange, structure_id: StructureId) -> Self {
        Self {
            y_range,
            structure_id,
            warnings: Vec::new(),
        }
    }

    /// The Y range in effect, after any inversion recovery.
    pub fn y_range(&self) -> YRange {
        self.y_range
    }

    pub fn structure_id(&self) -> StructureId {
        self.structure_id
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Resolves the Y coordinate for the next placement.
    pub fn resolve_y(&mut self, rng: &mut dyn RngCore, sink: &mut dyn EventSink) -> i32 {
        if self.y_range.is_inverted() {
            let message = format!(
                "y_min ({}) is higher than y_max ({}); using y_min for the rest of the run",
                self.y_range.min, self.y_range.max
            );
            warn!("{message}");
            if sink.wants(GenerationEventKind::Warning) {
                sink.send(GenerationEvent::Warning {
                    context: "y_range".into(),
                    message: message.clone(),
                });
            }
            self.warnings.push(message);
            self.y_range.max = self.y_range.min;
            return self.y_range.min;
        }
        rand_i32_inclusive(rng, self.y_range.min, self.y_range.max)
    }

    /// Builds a placement at an already quantized chunk coordinate.
    pub fn place_at(
        &mut self,
        x: i32,
        z: i32,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Placement {
        let y = self.resolve_y(rng, sink);
        let placement = Placement::new(x, z, y, self.structure_id);
        if sink.wants(GenerationEventKind::PlacementMade) {
            sink.send(GenerationEvent::PlacementMade { placement });
        }
        placement
    }

    /// Builds a placement from a continuous position, truncating toward zero.
    pub fn place(
        &mut self,
        point: Vec2,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Placement {
        self.place_at(point.x as i32, point.y as i32, rng, sink)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::events::VecSink;

    #[test]
    fn structure_type_ids_match_presets() {
        assert_eq!(StructureType::FloatingAboveGround.id(), 0);
        assert_eq!(StructureType::OnGround.id(), 1);
        assert_eq!(StructureType::UnderGround.id(), 2);
    }

    #[test]
    fn structure_type_parses_loose_names() {
        assert_eq!(
            "on-ground".parse::<StructureType>().unwrap(),
            StructureType::OnGround
        );
        assert_eq!(
            "UNDER_GROUND".parse::<StructureType>().unwrap(),
            StructureType::UnderGround
        );
        assert!("sky".parse::<StructureType>().is_err());
    }

    #[test]
    fn place_truncates_position() {
        let mut builder = PlacementBuilder::new(YRange::fixed(64), 7);
        let mut rng = StdRng::seed_from_u64(1);
        let p = builder.place(Vec2::new(3.99, 0.2), &mut rng, &mut ());
        assert_eq!((p.x(), p.z(), p.y(), p.structure_id()), (3, 0, 64, 7));
    }

    #[test]
    fn resolve_y_stays_inside_range() {
        let mut builder = PlacementBuilder::new(YRange::new(-3, 5), 0);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let y = builder.resolve_y(&mut rng, &mut ());
            assert!((-3..=5).contains(&y));
        }
        assert!(builder.warnings().is_empty());
    }

    #[test]
    fn inverted_range_warns_once_and_collapses_to_min() {
        let mut builder = PlacementBuilder::new(YRange::new(10, 5), 1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut sink = VecSink::new();
        let ys: Vec<_> = (0..5)
            .map(|_| builder.resolve_y(&mut rng, &mut sink))
            .collect();

        assert_eq!(ys, vec![10; 5]);
        assert_eq!(builder.y_range(), YRange::fixed(10));
        assert_eq!(builder.warnings().len(), 1);
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            sink.as_slice()[0],
            GenerationEvent::Warning { .. }
        ));
    }

    #[test]
    fn place_at_reports_placement_event() {
        let mut builder = PlacementBuilder::new(YRange::fixed(0), 2);
        let mut rng = StdRng::seed_from_u64(5);
        let mut sink = VecSink::new();
        let placement = builder.place_at(4, 6, &mut rng, &mut sink);
        match sink.as_slice() {
            [GenerationEvent::PlacementMade { placement: sent }] => assert_eq!(*sent, placement),
            other => panic!("unexpected events: {other:?}"),
        }
    }
}

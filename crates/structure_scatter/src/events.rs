//! Event types and sinks for observing generation runs.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect, or
//! forward events while executing a run via [`crate::runner::generate_with_events`]
//! or a [`crate::sampling::PlacementSampling`] implementation directly.
use crate::placement::Placement;
use crate::runner::Algorithm;
use crate::world::WorldBounds;

/// Describes events emitted during generation.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum GenerationEvent {
    /// Emitted once the configuration was validated and sampling begins.
    RunStarted {
        /// Algorithm used for the run.
        algorithm: Algorithm,
        /// World extent in chunks.
        bounds: WorldBounds,
        /// Seed the random stream was constructed from.
        seed: u64,
    },

    /// Emitted for every finalized placement, in generation order.
    PlacementMade {
        /// The placement data.
        placement: Placement,
    },

    /// Non-fatal warning generated during sampling.
    Warning {
        /// Context string (e.g. the parameter involved).
        context: String,
        /// Human-readable message.
        message: String,
    },

    /// Emitted when the run completed.
    RunFinished {
        /// Number of placements produced.
        placements: usize,
        /// Number of warnings raised.
        warnings: usize,
    },
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::RunStarted { .. } => GenerationEventKind::RunStarted,
            GenerationEvent::PlacementMade { .. } => GenerationEventKind::PlacementMade,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
            GenerationEvent::RunFinished { .. } => GenerationEventKind::RunFinished,
        }
    }
}

/// Discriminant of [`GenerationEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    RunStarted,
    PlacementMade,
    Warning,
    RunFinished,
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: GenerationEvent);

    /// Whether the sink is interested in events of `kind`. Producers skip building
    /// events nobody listens to.
    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}

    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        self.events.push(event);
    }
}

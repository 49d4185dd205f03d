//! High-level runner: validates a [`GeneratorConfig`], builds the selected sampler and
//! executes one deterministic generation run.
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::placement::{Placement, StructureId};
use crate::sampling::{
    PlacementRequest, PlacementSampling, PoissonDiskSampling, RegionSampling,
    DEFAULT_MAX_ATTEMPTS,
};
use crate::world::{WorldBounds, YRange};

/// Sampling algorithm selector.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Jittered region grid, see [`RegionSampling`].
    #[default]
    Region,
    /// Blue-noise sampling, see [`PoissonDiskSampling`].
    Poisson,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Region => "Region",
            Algorithm::Poisson => "Poisson",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "region" => Ok(Algorithm::Region),
            "poisson" => Ok(Algorithm::Poisson),
            _ => Err(Error::UnknownAlgorithm { name: s.to_owned() }),
        }
    }
}

/// Parses seed text from a form field.
///
/// Only plain decimal digits are accepted; anything else (empty text, signs,
/// letters, values beyond `u64`) means "no seed".
pub fn parse_seed(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Configuration for one generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// World extent in chunks.
    pub bounds: WorldBounds,
    /// Inclusive Y range placements draw from.
    pub y_range: YRange,
    /// Region side length in chunks (region sampling).
    pub region_size: u32,
    /// Structure id stamped on every placement.
    pub structure_id: StructureId,
    /// Region occupancy probability in [0, 1] (region sampling).
    pub fill_rate: f32,
    /// Seed for the random stream. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Sampling algorithm.
    pub algorithm: Algorithm,
    /// Minimum sample spacing in chunks (Poisson sampling).
    pub min_distance: f32,
    /// Candidates per active sample (Poisson sampling).
    pub max_attempts: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::new(128, 96),
            y_range: YRange::new(0, 0),
            region_size: 16,
            structure_id: 16,
            fill_rate: 0.8,
            seed: Some(42),
            algorithm: Algorithm::Region,
            min_distance: 16.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorConfig {
    /// Creates a new [`GeneratorConfig`] with the specified world bounds.
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    /// Sets the Y range.
    pub fn with_y_range(mut self, y_range: YRange) -> Self {
        self.y_range = y_range;
        self
    }

    /// Sets the region size.
    pub fn with_region_size(mut self, region_size: u32) -> Self {
        self.region_size = region_size;
        self
    }

    /// Sets the structure id.
    pub fn with_structure_id(mut self, structure_id: StructureId) -> Self {
        self.structure_id = structure_id;
        self
    }

    /// Sets the region fill rate.
    pub fn with_fill_rate(mut self, fill_rate: f32) -> Self {
        self.fill_rate = fill_rate;
        self
    }

    /// Sets or clears the seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the seed from form text, see [`parse_seed`].
    pub fn with_seed_text(mut self, text: &str) -> Self {
        self.seed = parse_seed(text);
        self
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the Poisson minimum distance.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the Poisson attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// The sampler selected by [`GeneratorConfig::algorithm`].
    pub fn sampler(&self) -> Box<dyn PlacementSampling> {
        match self.algorithm {
            Algorithm::Region => Box::new(RegionSampling::new(self.region_size, self.fill_rate)),
            Algorithm::Poisson => Box::new(
                PoissonDiskSampling::new(self.min_distance).with_max_attempts(self.max_attempts),
            ),
        }
    }

    pub fn request(&self) -> PlacementRequest {
        PlacementRequest::new(self.bounds, self.y_range, self.structure_id)
    }

    /// Validates the configuration, returning an error if invalid.
    ///
    /// Only the parameters of the selected algorithm are checked.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        self.sampler().validate()
    }
}

/// Result of a generation run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    /// Placements in generation order.
    pub placements: Vec<Placement>,
    /// World extent the placements were generated for.
    pub bounds: WorldBounds,
    /// Seed the random stream was constructed from.
    pub seed: u64,
    /// Non-fatal warnings raised during the run.
    pub warnings: Vec<String>,
}

/// Runs a validated configuration.
pub struct StructureGenerator {
    config: GeneratorConfig,
}

impl StructureGenerator {
    pub fn try_new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Runs with a fresh [`StdRng`] built from the configured (or a random) seed.
    pub fn run(&self) -> Result<GenerationResult> {
        self.run_with_events(&mut ())
    }

    pub fn run_with_events(&self, sink: &mut dyn EventSink) -> Result<GenerationResult> {
        let seed = self.config.seed.unwrap_or_else(|| {
            let seed = rand::rng().next_u64();
            debug!("No seed configured; drew seed {seed}.");
            seed
        });
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_seeded(seed, &mut rng, sink)
    }

    fn run_seeded(
        &self,
        seed: u64,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        let config = &self.config;
        if sink.wants(GenerationEventKind::RunStarted) {
            sink.send(GenerationEvent::RunStarted {
                algorithm: config.algorithm,
                bounds: config.bounds,
                seed,
            });
        }

        let mut collector = WarningCollector {
            inner: &mut *sink,
            warnings: Vec::new(),
        };
        let placements = config
            .sampler()
            .sample(&config.request(), rng, &mut collector)?;
        let warnings = collector.warnings;

        info!(
            "{} sampling placed {} structures in a {}x{} world (seed {}, {} warnings).",
            config.algorithm,
            placements.len(),
            config.bounds.width,
            config.bounds.depth,
            seed,
            warnings.len()
        );

        if sink.wants(GenerationEventKind::RunFinished) {
            sink.send(GenerationEvent::RunFinished {
                placements: placements.len(),
                warnings: warnings.len(),
            });
        }

        Ok(GenerationResult {
            placements,
            bounds: config.bounds,
            seed,
            warnings,
        })
    }
}

/// Validates `config` and runs it once.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationResult> {
    StructureGenerator::try_new(config.clone())?.run()
}

/// Like [`generate`], forwarding events to `sink`.
pub fn generate_with_events(
    config: &GeneratorConfig,
    sink: &mut dyn EventSink,
) -> Result<GenerationResult> {
    StructureGenerator::try_new(config.clone())?.run_with_events(sink)
}

/// Records warning messages while forwarding everything to the wrapped sink.
struct WarningCollector<'a> {
    inner: &'a mut dyn EventSink,
    warnings: Vec<String>,
}

impl EventSink for WarningCollector<'_> {
    fn send(&mut self, event: GenerationEvent) {
        if let GenerationEvent::Warning { message, .. } = &event {
            self.warnings.push(message.clone());
        }
        if self.inner.wants(event.kind()) {
            self.inner.send(event);
        }
    }

    fn wants(&self, kind: GenerationEventKind) -> bool {
        kind == GenerationEventKind::Warning || self.inner.wants(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::VecSink;

    fn base_config() -> GeneratorConfig {
        GeneratorConfig::new(WorldBounds::new(10, 10))
            .with_region_size(5)
            .with_fill_rate(1.0)
            .with_seed(Some(42))
    }

    #[test]
    fn algorithm_parses_case_insensitively() {
        assert_eq!("Region".parse::<Algorithm>().unwrap(), Algorithm::Region);
        assert_eq!(" poisson ".parse::<Algorithm>().unwrap(), Algorithm::Poisson);
        assert!(matches!(
            "grid".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm { .. })
        ));
        assert_eq!(Algorithm::Poisson.to_string(), "Poisson");
    }

    #[test]
    fn parse_seed_accepts_only_digits() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("  7 "), Some(7));
        assert_eq!(parse_seed("0"), Some(0));
        assert_eq!(parse_seed(""), None);
        assert_eq!(parse_seed("-5"), None);
        assert_eq!(parse_seed("abc"), None);
        assert_eq!(parse_seed("12a"), None);
        assert_eq!(parse_seed("99999999999999999999999"), None);
    }

    #[test]
    fn defaults_match_generator_presets() {
        let config = GeneratorConfig::default();
        assert_eq!(config.bounds, WorldBounds::new(128, 96));
        assert_eq!(config.region_size, 16);
        assert_eq!(config.structure_id, 16);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_attempts, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_configuration_errors() {
        let bad = [
            GeneratorConfig::new(WorldBounds::new(0, 10)),
            base_config().with_region_size(0),
            base_config().with_fill_rate(1.01),
            base_config()
                .with_algorithm(Algorithm::Poisson)
                .with_min_distance(0.0),
            base_config()
                .with_algorithm(Algorithm::Poisson)
                .with_max_attempts(0),
        ];
        for config in bad {
            assert!(
                matches!(generate(&config), Err(Error::InvalidConfig(_))),
                "expected rejection for {config:?}"
            );
        }
    }

    #[test]
    fn validate_only_checks_selected_algorithm() {
        let config = base_config()
            .with_algorithm(Algorithm::Poisson)
            .with_region_size(0)
            .with_min_distance(3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn region_scenario_places_four() {
        let result = generate(&base_config()).unwrap();
        assert_eq!(result.placements.len(), 4);
        assert_eq!(result.seed, 42);
        assert!(result.warnings.is_empty());
        for p in &result.placements {
            assert!((0..10).contains(&p.x()) && (0..10).contains(&p.z()));
        }
    }

    #[test]
    fn same_seed_is_deterministic_for_both_algorithms() {
        for algorithm in [Algorithm::Region, Algorithm::Poisson] {
            let config = GeneratorConfig::default()
                .with_algorithm(algorithm)
                .with_y_range(YRange::new(-16, 48))
                .with_min_distance(7.5)
                .with_seed(Some(1234));
            let a = generate(&config).unwrap();
            let b = generate(&config).unwrap();
            assert_eq!(a.placements, b.placements, "{algorithm} not deterministic");
            assert!(!a.placements.is_empty());
        }
    }

    #[test]
    fn missing_seed_still_generates() {
        let config = base_config().with_seed_text("not a number");
        assert_eq!(config.seed, None);
        let result = generate(&config).unwrap();
        assert_eq!(result.placements.len(), 4);
    }

    #[test]
    fn inverted_range_is_reported_in_result_and_events() {
        let config = base_config().with_y_range(YRange::new(10, 5));
        let mut sink = VecSink::new();
        let result = generate_with_events(&config, &mut sink).unwrap();

        assert!(result.placements.iter().all(|p| p.y() == 10));
        assert_eq!(result.warnings.len(), 1);

        let kinds: Vec<_> = sink.as_slice().iter().map(GenerationEvent::kind).collect();
        assert_eq!(kinds.first(), Some(&GenerationEventKind::RunStarted));
        assert_eq!(kinds.last(), Some(&GenerationEventKind::RunFinished));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == GenerationEventKind::PlacementMade)
                .count(),
            4
        );
        assert!(kinds.contains(&GenerationEventKind::Warning));
    }

    #[test]
    fn warnings_are_collected_even_with_silent_sink() {
        let config = base_config()
            .with_algorithm(Algorithm::Poisson)
            .with_min_distance(3.0)
            .with_y_range(YRange::new(4, -4));
        let result = generate(&config).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.placements.iter().all(|p| p.y() == 4));
    }
}

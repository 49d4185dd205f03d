use std::time::Duration;

use criterion::{Criterion, Throughput};

pub const SAMPLE_SIZE: usize = 30;
pub const WARM_UP: Duration = Duration::from_millis(500);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(3);

/// Criterion tuned for short sampling runs; CLI flags still override it.
pub fn default_criterion() -> Criterion {
    Criterion::default()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
        .configure_from_args()
}

/// Throughput in placements; empty runs count as one so reports stay finite.
pub fn elements_throughput(placements: usize) -> Throughput {
    Throughput::Elements(placements.max(1) as u64)
}

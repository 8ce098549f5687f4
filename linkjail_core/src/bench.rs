//! # Benchmark Runner
//!
//! Throughput measurements are an explicit call: the caller passes an iteration count
//! and the operation to time. Iterations run strictly one after another; an async
//! operation is awaited to completion before the next one starts. Nothing here runs
//! on its own at load time.

use crate::error::{JailError, Result};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Timing summary of one benchmark run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchReport {
    pub iterations: u64,
    pub total: Duration,
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} iterations in {:?} (mean {:?}, min {:?}, max {:?})",
            self.iterations, self.total, self.mean, self.min, self.max
        )
    }
}

#[derive(Debug)]
struct Samples {
    count: u64,
    total: Duration,
    min: Duration,
    max: Duration,
}

impl Samples {
    fn new() -> Self {
        Samples {
            count: 0,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
        }
    }

    fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);
    }

    fn finish(self) -> BenchReport {
        // `count` is never zero here; iterations are validated up front.
        let mean_nanos = self.total.as_nanos() / u128::from(self.count.max(1));
        let report = BenchReport {
            iterations: self.count,
            total: self.total,
            mean: Duration::from_nanos(u64::try_from(mean_nanos).unwrap_or(u64::MAX)),
            min: self.min,
            max: self.max,
        };
        info!("Benchmark finished: {}", report);
        report
    }
}

fn validate_iterations(iterations: u64) -> Result<()> {
    if iterations == 0 {
        return Err(JailError::InvalidBenchmark(
            "iterations must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Await `op` `iterations` times in sequence and report timings.
///
/// The first failing iteration aborts the run and its error is returned.
pub async fn run_sequential<F, Fut, E>(iterations: u64, mut op: F) -> Result<BenchReport, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: From<JailError>,
{
    validate_iterations(iterations)?;
    let mut samples = Samples::new();
    for _ in 0..iterations {
        let start = Instant::now();
        op().await?;
        samples.record(start.elapsed());
    }
    Ok(samples.finish())
}

/// Synchronous counterpart of [`run_sequential`].
pub fn run_blocking<F, E>(iterations: u64, mut op: F) -> Result<BenchReport, E>
where
    F: FnMut() -> Result<(), E>,
    E: From<JailError>,
{
    validate_iterations(iterations)?;
    let mut samples = Samples::new();
    for _ in 0..iterations {
        let start = Instant::now();
        op()?;
        samples.record(start.elapsed());
    }
    Ok(samples.finish())
}

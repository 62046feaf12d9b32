//! Opt-in timing hooks for the surface engine.
//!
//! Timing is only collected when the `surface_metrics` feature is enabled and the
//! target is not WASM (`std::time::Instant` is unavailable on `wasm32`). When
//! disabled, every call compiles down to running the closure.
//!
//! ```ignore
//! use bezier_board::geom::{SurfaceMetrics, TimingBucket};
//!
//! let mut metrics = SurfaceMetrics::default();
//! metrics.begin();
//! metrics.time(TimingBucket::Refresh, || buffer.refresh(&patch));
//! if let Some(report) = metrics.end() {
//!     println!("refresh: {} ns", report.refresh_ns);
//! }
//! ```

/// Categories of surface work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Initial sampling and index construction.
    Build,
    /// Control net animation (`advance`).
    Animation,
    /// Full re-sample of heights and normals (`refresh`).
    Refresh,
}

/// Cumulative nanoseconds per bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceTimingReport {
    pub build_ns: u64,
    pub animation_ns: u64,
    pub refresh_ns: u64,
    /// Number of timed refresh passes.
    pub refresh_count: u64,
}

impl SurfaceTimingReport {
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.build_ns
            .saturating_add(self.animation_ns)
            .saturating_add(self.refresh_ns)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }

    /// Mean refresh cost in milliseconds, or `0.0` before the first refresh.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_refresh_ms(&self) -> f64 {
        if self.refresh_count == 0 {
            return 0.0;
        }
        self.refresh_ns as f64 / self.refresh_count as f64 / 1_000_000.0
    }
}

/// Accumulator for timing surface operations.
///
/// When the `surface_metrics` feature is disabled (or on WASM), all methods are
/// no-ops and [`end`](Self::end) returns `None`.
#[derive(Debug, Default)]
pub struct SurfaceMetrics {
    #[cfg(all(feature = "surface_metrics", not(target_arch = "wasm32")))]
    report: SurfaceTimingReport,
}

impl SurfaceMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "surface_metrics", not(target_arch = "wasm32")))]
        {
            self.report = SurfaceTimingReport::default();
        }
    }

    /// Returns the accumulated report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<SurfaceTimingReport> {
        #[cfg(all(feature = "surface_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "surface_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "surface_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let elapsed = start.elapsed();
            // Cap at u64::MAX to prevent overflow
            let nanos_u64 = elapsed.as_nanos().min(u128::from(u64::MAX)) as u64;
            self.add_to_bucket(bucket, nanos_u64);
            result
        }

        #[cfg(not(all(feature = "surface_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "surface_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        match bucket {
            TimingBucket::Build => {
                self.report.build_ns = self.report.build_ns.saturating_add(nanos);
            }
            TimingBucket::Animation => {
                self.report.animation_ns = self.report.animation_ns.saturating_add(nanos);
            }
            TimingBucket::Refresh => {
                self.report.refresh_ns = self.report.refresh_ns.saturating_add(nanos);
                self.report.refresh_count = self.report.refresh_count.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_report_total() {
        let report = SurfaceTimingReport {
            build_ns: 1000,
            animation_ns: 2000,
            refresh_ns: 3000,
            refresh_count: 3,
        };
        assert_eq!(report.total_ns(), 6000);
        assert!((report.total_ms() - 0.006).abs() < 1e-9);
        assert!((report.mean_refresh_ms() - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_mean_refresh_without_samples() {
        assert_eq!(SurfaceTimingReport::default().mean_refresh_ms(), 0.0);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut metrics = SurfaceMetrics::default();
        metrics.begin();
        let result = metrics.time(TimingBucket::Refresh, || 42);
        assert_eq!(result, 42);
        let _ = metrics.end();
    }
}

use super::config::SurfaceConfig;
use super::control_net::ControlNet;
use super::core::Vec3;
use super::error::{HeightQueryError, SurfaceError};
use super::height_query;
use super::metrics::{SurfaceMetrics, SurfaceTimingReport, TimingBucket};
use super::surface::BezierPatch;
use super::tessellation::{SurfaceVertex, TessellationBuffer};

/// The animated Bezier surface: sole owner of the control net and of the
/// tessellated mesh derived from it.
///
/// Every [`tick`](Self::tick) mutates the control net and then
/// re-samples the whole buffer, so readers only ever observe a fully refreshed
/// mesh between calls.
#[derive(Debug)]
pub struct AnimatedSurface {
    config: SurfaceConfig,
    net: ControlNet,
    buffer: TessellationBuffer,
    metrics: SurfaceMetrics,
    ticks: u64,
}

impl AnimatedSurface {
    pub fn new(config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let net = ControlNet::new(&config)?;
        let mut metrics = SurfaceMetrics::default();
        metrics.begin();
        let buffer = metrics.time(TimingBucket::Build, || {
            TessellationBuffer::build(&BezierPatch::new(&net), config.precision)
        })?;

        log::debug!(
            "animated surface ready: precision={} control_net={}x{} max_height={} board_size={}",
            config.precision,
            net.size(),
            net.size(),
            config.max_height,
            config.board_size
        );
        if config.precision % (2 * config.board_size) != 0 {
            log::debug!(
                "precision {} is not a multiple of {}; board heights snap to the nearest lower grid line",
                config.precision,
                2 * config.board_size
            );
        }

        Ok(Self {
            config,
            net,
            buffer,
            metrics,
            ticks: 0,
        })
    }

    /// Advances the animation by `dt` and re-samples the mesh.
    ///
    /// `dt` must use one consistent time scale; velocities and `max_height`
    /// are tuned to it.
    pub fn tick(&mut self, dt: f64) {
        self.metrics
            .time(TimingBucket::Animation, || self.net.advance(dt));
        self.refresh();
        self.ticks += 1;
        log::trace!("surface tick {} (dt={dt})", self.ticks);
    }

    /// Re-samples heights and normals from the current control net.
    pub fn refresh(&mut self) {
        let patch = BezierPatch::new(&self.net);
        let buffer = &mut self.buffer;
        self.metrics
            .time(TimingBucket::Refresh, || buffer.refresh(&patch));
    }

    /// Sets an interior control height. Call [`refresh`](Self::refresh) (or
    /// [`tick`](Self::tick)) to propagate it to the mesh.
    pub fn set_control_point(
        &mut self,
        row: usize,
        column: usize,
        value: f64,
    ) -> Result<(), SurfaceError> {
        self.net.set(row, column, value)
    }

    #[must_use]
    pub fn patch(&self) -> BezierPatch<'_> {
        BezierPatch::new(&self.net)
    }

    /// Exact surface height at parameters `(x, y)`.
    #[must_use]
    pub fn height(&self, x: f64, y: f64) -> f64 {
        self.patch().height(x, y)
    }

    /// Exact unit normal at `(x, y)` in the height-up scene frame.
    #[must_use]
    pub fn normal(&self, x: f64, y: f64) -> Vec3 {
        self.patch().normal(x, y)
    }

    /// Elevation of the tessellated mesh under board cell `(row, column)`.
    pub fn height_at(&self, row: usize, column: usize) -> Result<f32, HeightQueryError> {
        height_query::height_at(&self.buffer, self.config.board_size, row, column)
    }

    #[must_use]
    pub fn buffer(&self) -> &TessellationBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn vertices(&self) -> &[SurfaceVertex] {
        self.buffer.vertices()
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        self.buffer.indices()
    }

    #[must_use]
    pub fn control_net(&self) -> &ControlNet {
        &self.net
    }

    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    #[must_use]
    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    /// Number of [`tick`](Self::tick) calls so far.
    #[must_use]
    pub fn elapsed_ticks(&self) -> u64 {
        self.ticks
    }

    /// Timing collected since construction (`surface_metrics` feature only).
    #[must_use]
    pub fn metrics(&self) -> Option<SurfaceTimingReport> {
        self.metrics.end()
    }
}

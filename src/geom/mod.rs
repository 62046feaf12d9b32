mod animated;
mod basis;
mod config;
mod control_net;
mod core;
mod error;
mod height_query;
mod metrics;
mod surface;
mod tessellation;
mod triangulation;

pub use animated::AnimatedSurface;
pub use basis::{bernstein, binomial, factorial};
pub use config::{
    DEFAULT_BOARD_SIZE, DEFAULT_DEGREE, DEFAULT_MAX_HEIGHT, DEFAULT_PRECISION, DEFAULT_VELOCITIES,
    SurfaceConfig,
};
pub use control_net::ControlNet;
pub use core::{Point3, Vec3};
pub use error::{HeightQueryError, SurfaceError};
pub use height_query::{board_cell_vertex, height_at};
pub use metrics::{SurfaceMetrics, SurfaceTimingReport, TimingBucket};
pub use surface::{BezierPatch, Surface};
pub use tessellation::{FLOATS_PER_VERTEX, SurfaceVertex, TessellationBuffer};
pub use triangulation::{MAX_PRECISION, grid_vertex_index, triangulate_grid};

#[cfg(test)]
mod tests;

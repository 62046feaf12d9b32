//! Uniform grid tessellation of a [`BezierPatch`] into a GPU-ready triangle mesh.
//!
//! The buffer holds `(precision + 1)²` interleaved vertices in row-major grid
//! order (`i` outer, `j` inner) and `6 · precision²` indices. Each vertex is
//! laid out as
//!
//! | floats | attribute                           |
//! |--------|-------------------------------------|
//! | 3      | position `(x, height, y)`           |
//! | 2      | texture coordinate `(x, y)`         |
//! | 3      | unit normal in the height-up frame  |
//!
//! so [`TessellationBuffer::vertices_flat`] can be bound directly as a vertex
//! buffer with a stride of [`FLOATS_PER_VERTEX`] floats.
//!
//! The index list never changes after [`TessellationBuffer::build`]. Each
//! [`TessellationBuffer::refresh`] rewrites heights and normals in place for
//! every vertex: a full `O((precision + 1)² · D²)` pass with no dirty-region
//! tracking, which is what bounds `precision` for real-time use.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::SurfaceError;
use super::surface::BezierPatch;
use super::triangulation::{grid_vertex_index, triangulate_grid};

/// Number of `f32` values per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 8;

/// One interleaved vertex: position, texture coordinate, normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
    pub normal: [f32; 3],
}

impl SurfaceVertex {
    /// Height component of the position.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.position[1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TessellationBuffer {
    precision: usize,
    vertices: Vec<SurfaceVertex>,
    indices: Vec<u32>,
}

impl TessellationBuffer {
    /// Samples `patch` on a `(precision + 1)²` grid and builds the index list.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn build(patch: &BezierPatch<'_>, precision: usize) -> Result<Self, SurfaceError> {
        if precision == 0 {
            return Err(SurfaceError::InvalidPrecision { precision });
        }
        let indices = triangulate_grid(precision)?;

        let side = precision + 1;
        let mut vertices = Vec::with_capacity(side * side);
        for i in 0..side {
            let x = i as f64 / precision as f64;
            for j in 0..side {
                let y = j as f64 / precision as f64;
                vertices.push(SurfaceVertex {
                    position: [x as f32, 0.0, y as f32],
                    uv: [x as f32, y as f32],
                    normal: [0.0, 1.0, 0.0],
                });
            }
        }

        let mut buffer = Self {
            precision,
            vertices,
            indices,
        };
        buffer.refresh(patch);

        log::debug!(
            "built tessellation buffer: precision={} vertices={} triangles={}",
            precision,
            buffer.vertex_count(),
            buffer.triangle_count()
        );
        Ok(buffer)
    }

    /// Recomputes the height and normal of every vertex from `patch`.
    ///
    /// Grid `x`/`y` and texture coordinates never move, and the index list is
    /// left untouched.
    pub fn refresh(&mut self, patch: &BezierPatch<'_>) {
        let precision = self.precision;
        let side = precision + 1;

        #[cfg(feature = "parallel")]
        {
            self.vertices
                .par_chunks_mut(side)
                .enumerate()
                .for_each(|(i, row)| refresh_row(patch, precision, i, row));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (i, row) in self.vertices.chunks_mut(side).enumerate() {
                refresh_row(patch, precision, i, row);
            }
        }
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    #[must_use]
    pub fn vertices(&self) -> &[SurfaceVertex] {
        &self.vertices
    }

    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flat index of grid vertex `(row, column)`, if inside the grid.
    #[must_use]
    pub fn vertex_index(&self, row: usize, column: usize) -> Option<usize> {
        if row > self.precision || column > self.precision {
            return None;
        }
        Some(grid_vertex_index(self.precision, row, column))
    }

    #[must_use]
    pub fn vertex(&self, row: usize, column: usize) -> Option<&SurfaceVertex> {
        self.vertex_index(row, column).map(|idx| &self.vertices[idx])
    }

    /// Returns the vertex buffer as a flat slice of `8 · vertex_count` floats.
    ///
    /// This is a zero-copy view over `vertices`, useful for wasm/JS adapters and
    /// GPU uploads that expect packed numeric buffers.
    #[must_use]
    pub fn vertices_flat(&self) -> &[f32] {
        let count = self.vertices.len() * FLOATS_PER_VERTEX;
        let ptr = self.vertices.as_ptr().cast::<f32>();
        // SAFETY: `SurfaceVertex` is `repr(C)` and made only of `f32` arrays, so it
        // has no padding and `vertices` is `len * 8` contiguous `f32` values.
        unsafe { std::slice::from_raw_parts(ptr, count) }
    }

    pub fn validate(&self) -> Result<(), SurfaceError> {
        let side = self.precision + 1;
        if self.vertices.len() != side * side {
            return Err(SurfaceError::InvalidMesh(format!(
                "expected {} vertices, found {}",
                side * side,
                self.vertices.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(SurfaceError::InvalidMesh(
                "indices are not a triangle list (len % 3 != 0)".to_string(),
            ));
        }
        let n = self.vertices.len();
        if self.indices.iter().any(|&i| i as usize >= n) {
            return Err(SurfaceError::InvalidMesh(
                "out-of-bounds vertex indices".to_string(),
            ));
        }
        if self.vertices_flat().iter().any(|v| !v.is_finite()) {
            return Err(SurfaceError::InvalidMesh(
                "vertex attributes contain NaN/Inf".to_string(),
            ));
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn refresh_row(patch: &BezierPatch<'_>, precision: usize, i: usize, row: &mut [SurfaceVertex]) {
    let x = i as f64 / precision as f64;
    for (j, vertex) in row.iter_mut().enumerate() {
        let y = j as f64 / precision as f64;
        vertex.position[1] = patch.height(x, y) as f32;
        vertex.normal = patch.normal(x, y).to_f32_array();
    }
}

use super::error::SurfaceError;

/// Largest grid precision this target can tessellate.
///
/// `(precision + 1)²` vertices must be addressable by `u32` indices, and the
/// vertex and index buffers must each fit a single allocation.
#[cfg(target_pointer_width = "64")]
pub const MAX_PRECISION: usize = 65_535;
#[cfg(not(target_pointer_width = "64"))]
pub const MAX_PRECISION: usize = 8_190;

/// Row-major index of grid vertex `(row, column)` in a `(precision + 1)²` grid.
#[must_use]
#[inline]
pub fn grid_vertex_index(precision: usize, row: usize, column: usize) -> usize {
    row * (precision + 1) + column
}

/// Triangle list for a `precision x precision` quad grid.
///
/// Each cell `(i, j)` emits `(tl, tr, bl)` then `(tr, br, bl)` where
/// `tl = (i, j)`, `tr = (i, j + 1)`, `bl = (i + 1, j)`, `br = (i + 1, j + 1)`.
/// Downstream back-face culling depends on this exact winding.
pub fn triangulate_grid(precision: usize) -> Result<Vec<u32>, SurfaceError> {
    if precision > MAX_PRECISION {
        return Err(SurfaceError::PrecisionTooLarge {
            precision,
            max: MAX_PRECISION,
        });
    }

    let index = |row: usize, column: usize| {
        u32::try_from(grid_vertex_index(precision, row, column)).map_err(|_| {
            SurfaceError::PrecisionTooLarge {
                precision,
                max: MAX_PRECISION,
            }
        })
    };

    let mut indices = Vec::with_capacity(6 * precision * precision);
    for i in 0..precision {
        for j in 0..precision {
            let tl = index(i, j)?;
            let tr = index(i, j + 1)?;
            let bl = index(i + 1, j)?;
            let br = index(i + 1, j + 1)?;

            indices.extend_from_slice(&[tl, tr, bl]);
            indices.extend_from_slice(&[tr, br, bl]);
        }
    }

    Ok(indices)
}

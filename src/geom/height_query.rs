use super::error::HeightQueryError;
use super::tessellation::TessellationBuffer;

/// Maps board cell `(row, column)` on an `N x N` board to the tessellation
/// vertex `(vertex_row, vertex_column)` at the centre of that cell.
///
/// With `w = precision / (2N)` the vertex column is `w + 2w · row` and the
/// vertex row is `w + 2w · (N − 1 − column)`; the row axis is mirrored to
/// follow the board's rank ordering. When `precision` is not a multiple of
/// `2N` the integer division snaps to the nearest lower grid line.
pub fn board_cell_vertex(
    precision: usize,
    board_size: usize,
    row: usize,
    column: usize,
) -> Result<(usize, usize), HeightQueryError> {
    if row >= board_size || column >= board_size {
        return Err(HeightQueryError::OutOfRange {
            row,
            column,
            board_size,
        });
    }
    let w = precision / (2 * board_size);
    let vertex_column = w + 2 * w * row;
    let vertex_row = w + 2 * w * (board_size - 1 - column);
    Ok((vertex_row, vertex_column))
}

/// Surface elevation under board cell `(row, column)`.
pub fn height_at(
    buffer: &TessellationBuffer,
    board_size: usize,
    row: usize,
    column: usize,
) -> Result<f32, HeightQueryError> {
    let (vertex_row, vertex_column) =
        board_cell_vertex(buffer.precision(), board_size, row, column)?;
    buffer
        .vertex(vertex_row, vertex_column)
        .map(|v| v.height())
        .ok_or(HeightQueryError::OutOfRange {
            row,
            column,
            board_size,
        })
}

/// Errors raised while configuring or building an animated Bezier surface.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("triangulation precision must be >= 1, got {precision}")]
    InvalidPrecision { precision: usize },
    #[error("triangulation precision {precision} exceeds the maximum of {max}")]
    PrecisionTooLarge { precision: usize, max: usize },
    #[error("patch degree must be >= 2 (control net is degree x degree), got {degree}")]
    InvalidDegree { degree: usize },
    #[error("maximum height must be finite and non-negative, got {max_height}")]
    InvalidAmplitude { max_height: f64 },
    #[error("expected {expected} interior velocities, got {got}")]
    VelocityCount { expected: usize, got: usize },
    #[error("velocity {index} is not finite")]
    NonFiniteVelocity { index: usize },
    #[error("control point ({row}, {column}) lies on the pinned border ring")]
    PinnedControlPoint { row: usize, column: usize },
    #[error("control point ({row}, {column}) is outside a {size}x{size} control net")]
    ControlPointOutOfRange { row: usize, column: usize, size: usize },
    #[error("control point value must be finite")]
    NonFiniteControlPoint,
    #[error("board size must be >= 1, got {board_size}")]
    InvalidBoardSize { board_size: usize },
    #[error("tessellation buffer is invalid: {0}")]
    InvalidMesh(String),
}

/// Errors raised by board-cell height lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeightQueryError {
    #[error("board cell ({row}, {column}) is outside a {board_size}x{board_size} board")]
    OutOfRange {
        row: usize,
        column: usize,
        board_size: usize,
    },
}

//! Chessboard overlay on top of the animated surface.
//!
//! The board keeps an `N x N` grid of pieces and turns every occupied square
//! into a world-space placement that rides the surface: each piece sits at
//! `a1 + (column, height · elevation_scale, −row)`.

use serde::Serialize;

use crate::geom::{AnimatedSurface, HeightQueryError, Point3, SurfaceConfig, SurfaceError, Vec3};

/// World position of square A1 (row 0, column 0) in the scene.
pub const DEFAULT_A1_POSITION: Point3 = Point3::new(-3.5, -1.9, 3.5);
/// The surface mesh is drawn at this scale, so elevations are scaled to match.
pub const DEFAULT_ELEVATION_SCALE: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Rook,
        Self::Knight,
        Self::Bishop,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "pawn" | "p" => Some(Self::Pawn),
            "rook" | "r" => Some(Self::Rook),
            "knight" | "n" => Some(Self::Knight),
            "bishop" | "b" => Some(Self::Bishop),
            "queen" | "q" => Some(Self::Queen),
            "king" | "k" => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Some(Self::White),
            "black" | "b" => Some(Self::Black),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

/// A piece together with the world position it should be drawn at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PiecePlacement {
    pub piece: Piece,
    pub row: usize,
    pub column: usize,
    pub position: [f64; 3],
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("square (column {column}, row {row}) is outside a {size}x{size} board")]
    OutOfBounds {
        column: usize,
        row: usize,
        size: usize,
    },
    #[error("unknown piece kind `{0}`")]
    UnknownPiece(String),
    #[error("unknown piece color `{0}`")]
    UnknownColor(String),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    HeightQuery(#[from] HeightQueryError),
}

#[derive(Debug)]
pub struct ChessBoard {
    surface: AnimatedSurface,
    squares: Vec<Option<Piece>>,
    a1_position: Point3,
    elevation_scale: f64,
}

impl ChessBoard {
    pub fn new(config: SurfaceConfig) -> Result<Self, BoardError> {
        let surface = AnimatedSurface::new(config)?;
        let size = surface.board_size();
        Ok(Self {
            surface,
            squares: vec![None; size * size],
            a1_position: DEFAULT_A1_POSITION,
            elevation_scale: DEFAULT_ELEVATION_SCALE,
        })
    }

    #[must_use]
    pub fn with_a1_position(mut self, a1_position: Point3) -> Self {
        self.a1_position = a1_position;
        self
    }

    #[must_use]
    pub fn with_elevation_scale(mut self, elevation_scale: f64) -> Self {
        self.elevation_scale = elevation_scale;
        self
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.surface.board_size()
    }

    #[must_use]
    pub fn surface(&self) -> &AnimatedSurface {
        &self.surface
    }

    /// Advances the surface animation by `dt`.
    pub fn tick(&mut self, dt: f64) {
        self.surface.tick(dt);
    }

    /// Sets an interior control height and re-samples the surface.
    pub fn set_control_point(
        &mut self,
        row: usize,
        column: usize,
        value: f64,
    ) -> Result<(), BoardError> {
        self.surface.set_control_point(row, column, value)?;
        self.surface.refresh();
        Ok(())
    }

    /// Places a piece, replacing whatever occupied the square.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: PieceColor,
        column: usize,
        row: usize,
    ) -> Result<(), BoardError> {
        let idx = self.square_index(column, row)?;
        if let Some(previous) = self.squares[idx] {
            log::debug!("replacing {previous:?} at column {column}, row {row}");
        }
        self.squares[idx] = Some(Piece { kind, color });
        Ok(())
    }

    pub fn remove_piece(&mut self, column: usize, row: usize) -> Result<Option<Piece>, BoardError> {
        let idx = self.square_index(column, row)?;
        Ok(self.squares[idx].take())
    }

    #[must_use]
    pub fn piece_at(&self, column: usize, row: usize) -> Option<Piece> {
        self.square_index(column, row)
            .ok()
            .and_then(|idx| self.squares[idx])
    }

    /// Occupied squares as `(column, row, piece)`.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, usize, Piece)> + '_ {
        let size = self.size();
        self.squares
            .iter()
            .enumerate()
            .filter_map(move |(idx, square)| square.map(|piece| (idx % size, idx / size, piece)))
    }

    /// World-space placements of every piece on the current surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn placements(&self) -> Result<Vec<PiecePlacement>, BoardError> {
        self.pieces()
            .map(|(column, row, piece)| {
                let height = f64::from(self.surface.height_at(row, column)?);
                let position = self.a1_position.add_vec(Vec3::new(
                    column as f64,
                    height * self.elevation_scale,
                    -(row as f64),
                ));
                Ok(PiecePlacement {
                    piece,
                    row,
                    column,
                    position: position.to_array(),
                })
            })
            .collect()
    }

    fn square_index(&self, column: usize, row: usize) -> Result<usize, BoardError> {
        let size = self.size();
        if column >= size || row >= size {
            return Err(BoardError::OutOfBounds { column, row, size });
        }
        Ok(row * size + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ChessBoard {
        ChessBoard::new(SurfaceConfig::default().with_precision(16)).unwrap()
    }

    #[test]
    fn add_and_remove_pieces() {
        let mut board = board();
        board.add_piece(PieceKind::Rook, PieceColor::White, 0, 0).unwrap();
        board.add_piece(PieceKind::King, PieceColor::Black, 3, 7).unwrap();
        assert_eq!(
            board.piece_at(3, 7),
            Some(Piece { kind: PieceKind::King, color: PieceColor::Black })
        );
        assert_eq!(board.pieces().count(), 2);

        let removed = board.remove_piece(0, 0).unwrap();
        assert_eq!(removed.map(|p| p.kind), Some(PieceKind::Rook));
        assert!(board.piece_at(0, 0).is_none());
    }

    #[test]
    fn add_piece_rejects_out_of_bounds() {
        let mut board = board();
        let err = board
            .add_piece(PieceKind::Pawn, PieceColor::White, 8, 0)
            .unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { column: 8, row: 0, size: 8 });
    }

    #[test]
    fn occupied_square_is_overwritten() {
        let mut board = board();
        board.add_piece(PieceKind::Pawn, PieceColor::White, 2, 2).unwrap();
        board.add_piece(PieceKind::Queen, PieceColor::Black, 2, 2).unwrap();
        assert_eq!(board.pieces().count(), 1);
        assert_eq!(board.piece_at(2, 2).map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn placements_on_flat_surface_use_a1_grid() {
        let mut board = board();
        board.add_piece(PieceKind::Knight, PieceColor::White, 4, 2).unwrap();
        let placements = board.placements().unwrap();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].position, [0.5, -1.9, 1.5]);
    }

    #[test]
    fn placements_follow_surface_elevation() {
        let mut board = board();
        board.add_piece(PieceKind::Bishop, PieceColor::Black, 3, 3).unwrap();
        for _ in 0..5 {
            board.tick(1.0);
        }
        let height = f64::from(board.surface().height_at(3, 3).unwrap());
        assert!(height > 0.0);
        let placement = board.placements().unwrap()[0];
        assert!((placement.position[1] - (-1.9 + height * 8.0)).abs() < 1e-12);
    }

    #[test]
    fn custom_a1_and_elevation_scale_shift_placements() {
        let mut board = board()
            .with_a1_position(Point3::new(10.0, 0.0, -2.0))
            .with_elevation_scale(2.0);
        board.set_control_point(1, 1, 0.15).unwrap();
        board.add_piece(PieceKind::Rook, PieceColor::White, 2, 5).unwrap();

        let height = f64::from(board.surface().height_at(5, 2).unwrap());
        assert!(height > 0.0);
        let placement = board.placements().unwrap()[0];
        assert_eq!(placement.position[0], 12.0);
        assert!((placement.position[1] - height * 2.0).abs() < 1e-12);
        assert_eq!(placement.position[2], -7.0);
    }

    #[test]
    fn every_piece_kind_round_trips_through_its_name() {
        for kind in PieceKind::ALL {
            let name = format!("{kind:?}");
            assert_eq!(PieceKind::from_name(&name), Some(kind));
        }
    }

    #[test]
    fn piece_names_parse() {
        assert_eq!(PieceKind::from_name("Knight"), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_name("q"), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_name("dragon"), None);
        assert_eq!(PieceColor::from_name("BLACK"), Some(PieceColor::Black));
        assert_eq!(PieceColor::from_name("red"), None);
    }
}

//! Construction-time configuration for [`AnimatedSurface`](super::AnimatedSurface).
//!
//! Every field has a default, and `#[serde(default)]` lets callers (for example a
//! partial JS object passed through `serde-wasm-bindgen`) override only the fields
//! they care about:
//!
//! ```ignore
//! use bezier_board::geom::SurfaceConfig;
//!
//! let config = SurfaceConfig::default()
//!     .with_precision(64)
//!     .with_max_height(0.2);
//! config.validate()?;
//! ```

use serde::{Deserialize, Serialize};

use super::error::SurfaceError;
use super::triangulation::MAX_PRECISION;

/// Default number of triangulation steps per patch side.
pub const DEFAULT_PRECISION: usize = 50;
/// Default control net size per side (a bicubic patch).
pub const DEFAULT_DEGREE: usize = 4;
/// Default oscillation bound for interior control heights.
pub const DEFAULT_MAX_HEIGHT: f64 = 0.15;
/// Default board size used by height queries.
pub const DEFAULT_BOARD_SIZE: usize = 8;
/// Interior velocities, row-major over the interior of a 4x4 control net.
pub const DEFAULT_VELOCITIES: [f64; 4] = [0.02, 0.04, 0.07, 0.1];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Grid steps per side; the buffer holds `(precision + 1)²` vertices.
    pub precision: usize,
    /// Control points per side (`D`). The polynomial degree is `D − 1`.
    pub degree: usize,
    /// Amplitude at which an interior control point reverses direction.
    pub max_height: f64,
    /// Row-major `(D − 2)²` interior velocities. `None` cycles
    /// [`DEFAULT_VELOCITIES`] to the required length.
    pub velocities: Option<Vec<f64>>,
    /// Logical board size `N` for [`height_at`](super::height_at) lookups.
    pub board_size: usize,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            degree: DEFAULT_DEGREE,
            max_height: DEFAULT_MAX_HEIGHT,
            velocities: None,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl SurfaceConfig {
    #[must_use]
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    #[must_use]
    pub fn with_max_height(mut self, max_height: f64) -> Self {
        self.max_height = max_height;
        self
    }

    #[must_use]
    pub fn with_velocities(mut self, velocities: Vec<f64>) -> Self {
        self.velocities = Some(velocities);
        self
    }

    #[must_use]
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Number of animated interior control points, `(D − 2)²`.
    #[must_use]
    pub fn interior_count(&self) -> usize {
        let side = self.degree.saturating_sub(2);
        side * side
    }

    /// The velocity table the control net will start with.
    #[must_use]
    pub fn resolved_velocities(&self) -> Vec<f64> {
        match &self.velocities {
            Some(velocities) => velocities.clone(),
            None => DEFAULT_VELOCITIES
                .iter()
                .copied()
                .cycle()
                .take(self.interior_count())
                .collect(),
        }
    }

    pub fn validate(&self) -> Result<(), SurfaceError> {
        if self.precision == 0 {
            return Err(SurfaceError::InvalidPrecision {
                precision: self.precision,
            });
        }
        if self.precision > MAX_PRECISION {
            return Err(SurfaceError::PrecisionTooLarge {
                precision: self.precision,
                max: MAX_PRECISION,
            });
        }
        if self.degree < 2 {
            return Err(SurfaceError::InvalidDegree {
                degree: self.degree,
            });
        }
        if !self.max_height.is_finite() || self.max_height < 0.0 {
            return Err(SurfaceError::InvalidAmplitude {
                max_height: self.max_height,
            });
        }
        if self.board_size == 0 {
            return Err(SurfaceError::InvalidBoardSize {
                board_size: self.board_size,
            });
        }
        if let Some(velocities) = &self.velocities {
            let expected = self.interior_count();
            if velocities.len() != expected {
                return Err(SurfaceError::VelocityCount {
                    expected,
                    got: velocities.len(),
                });
            }
            if let Some(index) = velocities.iter().position(|v| !v.is_finite()) {
                return Err(SurfaceError::NonFiniteVelocity { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SurfaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resolved_velocities(), DEFAULT_VELOCITIES.to_vec());
    }

    #[test]
    fn zero_precision_is_rejected() {
        let err = SurfaceConfig::default().with_precision(0).validate().unwrap_err();
        assert_eq!(err, SurfaceError::InvalidPrecision { precision: 0 });
    }

    #[test]
    fn precision_beyond_u32_indexing_is_rejected() {
        assert!(SurfaceConfig::default().with_precision(MAX_PRECISION).validate().is_ok());
        let err = SurfaceConfig::default()
            .with_precision(MAX_PRECISION + 1)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            SurfaceError::PrecisionTooLarge { precision: MAX_PRECISION + 1, max: MAX_PRECISION }
        );
        assert!(matches!(
            SurfaceConfig::default().with_precision(usize::MAX).validate(),
            Err(SurfaceError::PrecisionTooLarge { .. })
        ));
    }

    #[test]
    fn degenerate_degree_is_rejected() {
        let err = SurfaceConfig::default().with_degree(1).validate().unwrap_err();
        assert_eq!(err, SurfaceError::InvalidDegree { degree: 1 });
    }

    #[test]
    fn velocity_count_must_match_interior() {
        let err = SurfaceConfig::default()
            .with_velocities(vec![0.1; 3])
            .validate()
            .unwrap_err();
        assert_eq!(err, SurfaceError::VelocityCount { expected: 4, got: 3 });
    }

    #[test]
    fn non_finite_velocity_is_rejected() {
        let err = SurfaceConfig::default()
            .with_velocities(vec![0.1, f64::NAN, 0.1, 0.1])
            .validate()
            .unwrap_err();
        assert_eq!(err, SurfaceError::NonFiniteVelocity { index: 1 });
    }

    #[test]
    fn negative_amplitude_is_rejected() {
        let err = SurfaceConfig::default().with_max_height(-0.1).validate();
        assert!(matches!(err, Err(SurfaceError::InvalidAmplitude { .. })));
    }

    #[test]
    fn default_velocities_cycle_for_larger_nets() {
        let config = SurfaceConfig::default().with_degree(5);
        let velocities = config.resolved_velocities();
        assert_eq!(velocities.len(), 9);
        assert_eq!(velocities[4], DEFAULT_VELOCITIES[0]);
        assert!(config.validate().is_ok());
    }
}

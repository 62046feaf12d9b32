use super::config::SurfaceConfig;
use super::error::SurfaceError;

/// Square `D x D` grid of scalar control heights plus the velocities that
/// animate its interior.
///
/// The outer ring (row or column `0` / `D − 1`) is pinned at `0.0` for the
/// lifetime of the net so the patch boundary stays flush with the board frame.
/// Only the `(D − 2)²` interior cells move.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlNet {
    size: usize,
    heights: Vec<f64>,
    velocities: Vec<f64>,
    max_height: f64,
}

impl ControlNet {
    /// Builds a flat net from a validated configuration.
    pub fn new(config: &SurfaceConfig) -> Result<Self, SurfaceError> {
        config.validate()?;
        let size = config.degree;
        Ok(Self {
            size,
            heights: vec![0.0; size * size],
            velocities: config.resolved_velocities(),
            max_height: config.max_height,
        })
    }

    /// Control points per side (`D`).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Polynomial degree of the patch in each direction (`D − 1`).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.size - 1
    }

    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    #[must_use]
    pub fn is_border(&self, row: usize, column: usize) -> bool {
        row == 0 || column == 0 || row + 1 == self.size || column + 1 == self.size
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row < self.size && column < self.size {
            Some(self.heights[row * self.size + column])
        } else {
            None
        }
    }

    /// Control height at `(row, column)` without bounds checking beyond the slice.
    #[inline]
    pub(crate) fn at(&self, row: usize, column: usize) -> f64 {
        self.heights[row * self.size + column]
    }

    /// Velocity of the interior cell `(row, column)`; `None` on the border.
    #[must_use]
    pub fn velocity(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.size || column >= self.size || self.is_border(row, column) {
            return None;
        }
        Some(self.velocities[self.interior_index(row, column)])
    }

    /// Sets an interior control height. Border cells stay pinned.
    pub fn set(&mut self, row: usize, column: usize, value: f64) -> Result<(), SurfaceError> {
        if row >= self.size || column >= self.size {
            return Err(SurfaceError::ControlPointOutOfRange {
                row,
                column,
                size: self.size,
            });
        }
        if self.is_border(row, column) {
            return Err(SurfaceError::PinnedControlPoint { row, column });
        }
        if !value.is_finite() {
            return Err(SurfaceError::NonFiniteControlPoint);
        }
        self.heights[row * self.size + column] = value;
        Ok(())
    }

    /// Row-major view of all `D²` control heights.
    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Advances every interior cell by `dt · velocity`.
    ///
    /// The amplitude check runs after the increment and only flips the sign of
    /// the velocity, so a single step may overshoot `max_height` before the
    /// cell turns around.
    pub fn advance(&mut self, dt: f64) {
        for row in 1..self.size - 1 {
            for column in 1..self.size - 1 {
                let v_idx = self.interior_index(row, column);
                let h_idx = row * self.size + column;
                self.heights[h_idx] += dt * self.velocities[v_idx];
                debug_assert!(
                    self.heights[h_idx].is_finite(),
                    "control height ({row}, {column}) became non-finite"
                );
                if self.heights[h_idx].abs() > self.max_height {
                    self.velocities[v_idx] = -self.velocities[v_idx];
                }
            }
        }
    }

    fn interior_index(&self, row: usize, column: usize) -> usize {
        (row - 1) * (self.size - 2) + (column - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border_is_zero(net: &ControlNet) -> bool {
        let last = net.size() - 1;
        (0..net.size()).all(|k| {
            net.get(0, k) == Some(0.0)
                && net.get(last, k) == Some(0.0)
                && net.get(k, 0) == Some(0.0)
                && net.get(k, last) == Some(0.0)
        })
    }

    #[test]
    fn new_net_is_flat() {
        let net = ControlNet::new(&SurfaceConfig::default()).unwrap();
        assert_eq!(net.size(), 4);
        assert_eq!(net.degree(), 3);
        assert!(net.heights().iter().all(|&h| h == 0.0));
        assert_eq!(net.velocity(1, 1), Some(0.02));
        assert_eq!(net.velocity(2, 2), Some(0.1));
        assert_eq!(net.velocity(0, 1), None);
    }

    #[test]
    fn advance_moves_interior_by_velocity() {
        let mut net = ControlNet::new(&SurfaceConfig::default()).unwrap();
        net.advance(1.0);
        assert!((net.get(1, 1).unwrap() - 0.02).abs() < 1e-12);
        assert!((net.get(1, 2).unwrap() - 0.04).abs() < 1e-12);
        assert!((net.get(2, 1).unwrap() - 0.07).abs() < 1e-12);
        assert!((net.get(2, 2).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn advance_never_moves_border() {
        let mut net = ControlNet::new(&SurfaceConfig::default().with_degree(5)).unwrap();
        for _ in 0..500 {
            net.advance(0.37);
        }
        assert!(border_is_zero(&net));
    }

    #[test]
    fn bounce_flips_after_overshoot() {
        let config = SurfaceConfig::default().with_velocities(vec![0.1, 0.0, 0.0, 0.0]);
        let mut net = ControlNet::new(&config).unwrap();
        net.advance(1.0);
        assert_eq!(net.velocity(1, 1), Some(0.1));
        net.advance(1.0);
        // 0.2 > 0.15: overshoot is kept, direction reverses for the next step.
        assert!((net.get(1, 1).unwrap() - 0.2).abs() < 1e-12);
        assert_eq!(net.velocity(1, 1), Some(-0.1));
        net.advance(1.0);
        assert!((net.get(1, 1).unwrap() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn oscillation_stays_within_soft_bound() {
        let dt = 0.5;
        let mut net = ControlNet::new(&SurfaceConfig::default()).unwrap();
        let max_velocity = 0.1;
        let bound = net.max_height() + dt * max_velocity + 1e-12;
        for _ in 0..10_000 {
            net.advance(dt);
            for row in 1..3 {
                for column in 1..3 {
                    assert!(net.get(row, column).unwrap().abs() <= bound);
                }
            }
        }
    }

    #[test]
    fn set_rejects_border_and_out_of_range() {
        let mut net = ControlNet::new(&SurfaceConfig::default()).unwrap();
        assert_eq!(
            net.set(0, 2, 1.0),
            Err(SurfaceError::PinnedControlPoint { row: 0, column: 2 })
        );
        assert_eq!(
            net.set(4, 1, 1.0),
            Err(SurfaceError::ControlPointOutOfRange { row: 4, column: 1, size: 4 })
        );
        assert_eq!(net.set(1, 1, f64::INFINITY), Err(SurfaceError::NonFiniteControlPoint));
        net.set(1, 2, 0.3).unwrap();
        assert_eq!(net.get(1, 2), Some(0.3));
    }
}

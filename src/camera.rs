use crate::geom::{Point3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("camera position {position:?} coincides with its target")]
    DegenerateOrientation { position: [f64; 3] },
}

/// Camera placement: a position and the unit direction it looks along.
///
/// Projection and input handling belong to the renderer; this type only keeps
/// the orientation valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    position: Point3,
    orientation: Vec3,
}

impl Camera {
    pub fn new(position: Point3, look_at: Point3) -> Result<Self, CameraError> {
        let orientation = view_direction(position, look_at)?;
        Ok(Self {
            position,
            orientation,
        })
    }

    /// Re-aims the camera at `target`. On error the camera is left unchanged.
    pub fn look_at(&mut self, target: Point3) -> Result<(), CameraError> {
        self.orientation = view_direction(self.position, target)?;
        Ok(())
    }

    /// Moves the camera, keeping its orientation.
    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    #[must_use]
    pub fn position(&self) -> Point3 {
        self.position
    }

    #[must_use]
    pub fn orientation(&self) -> Vec3 {
        self.orientation
    }
}

fn view_direction(position: Point3, target: Point3) -> Result<Vec3, CameraError> {
    target
        .sub_point(position)
        .normalized()
        .ok_or(CameraError::DegenerateOrientation {
            position: position.to_array(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_is_unit_direction_to_target() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 5.0), Point3::ORIGIN).unwrap();
        assert_eq!(camera.orientation(), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn coincident_target_is_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        assert_eq!(
            Camera::new(p, p),
            Err(CameraError::DegenerateOrientation { position: [1.0, 2.0, 3.0] })
        );
    }

    #[test]
    fn failed_look_at_keeps_previous_orientation() {
        let mut camera = Camera::new(Point3::new(0.0, 3.0, 0.0), Point3::ORIGIN).unwrap();
        let before = camera.orientation();
        assert!(camera.look_at(Point3::new(0.0, 3.0, 0.0)).is_err());
        assert_eq!(camera.orientation(), before);

        camera.look_at(Point3::new(4.0, 3.0, 0.0)).unwrap();
        assert_eq!(camera.orientation(), Vec3::X);
    }

    #[test]
    fn set_position_keeps_orientation() {
        let mut camera = Camera::new(Point3::ORIGIN, Point3::new(0.0, 0.0, -2.0)).unwrap();
        camera.set_position(Point3::new(1.0, 1.0, 1.0));
        assert_eq!(camera.orientation(), Vec3::new(0.0, 0.0, -1.0));
    }
}

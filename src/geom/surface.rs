use super::basis::bernstein;
use super::control_net::ControlNet;
use super::core::{Point3, Vec3};

/// A parametric surface over the unit square.
pub trait Surface {
    /// Point in the surface's local frame at parameters `(u, v)`.
    fn point_at(&self, u: f64, v: f64) -> Point3;

    /// Tangent vectors `(∂P/∂u, ∂P/∂v)` at `(u, v)`.
    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3);

    /// Unit normal in the local frame, `normalize(∂P/∂u × ∂P/∂v)`.
    #[must_use]
    fn normal_at(&self, u: f64, v: f64) -> Vec3 {
        let (du, dv) = self.partial_derivatives_at(u, v);
        du.cross(dv).normalized().unwrap_or(Vec3::Z)
    }
}

/// Tensor-product Bezier height patch over a [`ControlNet`].
///
/// In its local frame the patch maps `(x, y)` to `(x, y, height(x, y))`. Scene
/// consumers use the height-up frame `(x, height, y)`, which is what
/// [`BezierPatch::normal`] returns.
#[derive(Debug, Clone, Copy)]
pub struct BezierPatch<'a> {
    net: &'a ControlNet,
}

impl<'a> BezierPatch<'a> {
    #[must_use]
    pub fn new(net: &'a ControlNet) -> Self {
        Self { net }
    }

    #[must_use]
    pub fn control_net(&self) -> &'a ControlNet {
        self.net
    }

    /// `Σ c[i][j] · B(i, n, x) · B(j, n, y)` with `n = D − 1`.
    #[must_use]
    pub fn height(&self, x: f64, y: f64) -> f64 {
        let size = self.net.size();
        let n = size - 1;
        let mut z = 0.0;
        for i in 0..size {
            let bx = bernstein(i, n, x);
            for j in 0..size {
                z += self.net.at(i, j) * bx * bernstein(j, n, y);
            }
        }
        debug_assert!(z.is_finite(), "patch height at ({x}, {y}) is not finite");
        z
    }

    /// Exact height slopes `(∂z/∂x, ∂z/∂y)` via the Bezier derivative identity:
    /// differentiating one axis turns the control net into forward differences
    /// blended at degree `n − 1`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn slopes(&self, x: f64, y: f64) -> (f64, f64) {
        let size = self.net.size();
        let n = size - 1;

        let mut dzdx = 0.0;
        for i in 0..n {
            let bx = bernstein(i, n - 1, x);
            for j in 0..size {
                let diff = self.net.at(i + 1, j) - self.net.at(i, j);
                dzdx += diff * bx * bernstein(j, n, y);
            }
        }
        dzdx *= n as f64;

        let mut dzdy = 0.0;
        for i in 0..size {
            let bx = bernstein(i, n, x);
            for j in 0..n {
                let diff = self.net.at(i, j + 1) - self.net.at(i, j);
                dzdy += diff * bx * bernstein(j, n - 1, y);
            }
        }
        dzdy *= n as f64;

        (dzdx, dzdy)
    }

    /// Unit normal in the scene frame `(x, height, depth)`.
    #[must_use]
    pub fn normal(&self, x: f64, y: f64) -> Vec3 {
        let n = self.normal_at(x, y).swap_yz();
        debug_assert!(n.is_finite(), "patch normal at ({x}, {y}) is not finite");
        n
    }
}

impl Surface for BezierPatch<'_> {
    fn point_at(&self, u: f64, v: f64) -> Point3 {
        Point3::new(u, v, self.height(u, v))
    }

    fn partial_derivatives_at(&self, u: f64, v: f64) -> (Vec3, Vec3) {
        let (dzdx, dzdy) = self.slopes(u, v);
        (Vec3::new(1.0, 0.0, dzdx), Vec3::new(0.0, 1.0, dzdy))
    }
}

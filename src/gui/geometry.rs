use derive_more::{Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Self {
        Self::new(self.x + by.x, self.y + by.y)
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Angle in degrees. Positive values turn clockwise on a y-down surface.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, From, Into)]
#[display("{_0}°")]
pub struct Degrees(pub f64);

impl Degrees {
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Folds into `[0, 360)`.
    pub fn normalized(self) -> Self {
        Self(self.0.rem_euclid(360.0))
    }
}

/// 2D affine transform using cairo's matrix layout:
///
/// ```text
/// x' = xx * x + xy * y + x0
/// y' = yx * x + yy * y + y0
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub xx: f64,
    pub yx: f64,
    pub xy: f64,
    pub yy: f64,
    pub x0: f64,
    pub y0: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        yx: 0.0,
        xy: 0.0,
        yy: 1.0,
        x0: 0.0,
        y0: 0.0,
    };

    pub fn rotation_about(angle: Degrees, pivot: Point) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            xx: cos,
            yx: sin,
            xy: -sin,
            yy: cos,
            x0: pivot.x - cos * pivot.x + sin * pivot.y,
            y0: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    /// Returns the transform that applies `inner` first and then `self`,
    /// matching how nested `save/rotate` blocks compose on a canvas.
    pub fn then_inner(&self, inner: &Affine) -> Self {
        Self {
            xx: self.xx * inner.xx + self.xy * inner.yx,
            yx: self.yx * inner.xx + self.yy * inner.yx,
            xy: self.xx * inner.xy + self.xy * inner.yy,
            yy: self.yx * inner.xy + self.yy * inner.yy,
            x0: self.xx * inner.x0 + self.xy * inner.y0 + self.x0,
            y0: self.yx * inner.x0 + self.yy * inner.y0 + self.y0,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.xx * p.x + self.xy * p.y + self.x0,
            self.yx * p.x + self.yy * p.y + self.y0,
        )
    }

    /// Rotation component in degrees, assuming no shear or scale.
    pub fn angle(&self) -> Degrees {
        Degrees(self.yx.atan2(self.xx).to_degrees())
    }
}

impl From<Affine> for cairo::Matrix {
    fn from(m: Affine) -> Self {
        cairo::Matrix::new(m.xx, m.yx, m.xy, m.yy, m.x0, m.y0)
    }
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[cfg(test)]
pub(crate) fn approx_point(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_keeps_pivot_fixed() {
        let pivot = Point::new(12.0, -3.5);
        let m = Affine::rotation_about(Degrees(73.0), pivot);
        assert!(approx_point(m.apply(pivot), pivot));
    }

    #[test]
    fn test_quarter_turn_is_clockwise_on_screen() {
        let m = Affine::rotation_about(Degrees(90.0), Point::default());
        // +x maps to +y, which points down on screen
        assert!(approx_point(m.apply(Point::new(1.0, 0.0)), Point::new(0.0, 1.0)));
    }

    #[test]
    fn test_composition_applies_inner_first() {
        let outer = Affine::rotation_about(Degrees(90.0), Point::default());
        let inner = Affine::rotation_about(Degrees(180.0), Point::new(1.0, 0.0));
        let m = outer.then_inner(&inner);

        let p = Point::new(2.0, 0.0);
        let expected = outer.apply(inner.apply(p));
        assert!(approx_point(m.apply(p), expected));
        assert!(approx_eq(m.angle().normalized().0, 270.0));
    }

    #[test]
    fn test_degrees_normalized() {
        assert!(approx_eq(Degrees(-90.0).normalized().0, 270.0));
        assert!(approx_eq(Degrees(720.0).normalized().0, 0.0));
    }
}

use super::vector::V2f;

/// Determinants at or below this magnitude are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-9;

/// 2D affine transform.
///
/// Maps `(x, y)` to `(a*x + b*y + tx, c*x + d*y + ty)`. Every mutating
/// operation appends: the new step is applied after the ones already in the
/// transform, so `t.translate(..); t.scale(..)` translates first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation(dx: f32, dy: f32) -> Self {
        Self { tx: dx, ty: dy, ..Self::IDENTITY }
    }

    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self { a: sx, d: sy, ..Self::IDENTITY }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.tx += dx;
        self.ty += dy;
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.a *= sx;
        self.b *= sx;
        self.tx *= sx;
        self.c *= sy;
        self.d *= sy;
        self.ty *= sy;
    }

    /// Rotates by `theta` radians; positive is clockwise on a y-down surface.
    pub fn rotate(&mut self, theta: f32) {
        let (sin, cos) = theta.sin_cos();
        self.concat(&Self { a: cos, b: -sin, c: sin, d: cos, tx: 0.0, ty: 0.0 });
    }

    /// Appends `other`, so the result applies `self` and then `other`.
    pub fn concat(&mut self, other: &Affine) {
        let Self { a, b, c, d, tx, ty } = *self;
        self.a = other.a * a + other.b * c;
        self.b = other.a * b + other.b * d;
        self.c = other.c * a + other.d * c;
        self.d = other.c * b + other.d * d;
        self.tx = other.a * tx + other.b * ty + other.tx;
        self.ty = other.c * tx + other.d * ty + other.ty;
    }

    pub fn then(mut self, other: &Affine) -> Self {
        self.concat(other);
        self
    }

    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    pub fn is_invertible(&self) -> bool {
        let det = self.determinant();
        det.is_finite() && det.abs() > SINGULAR_EPSILON
    }

    /// `None` when the transform collapses the plane.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }
        let inv_det = self.determinant().recip();
        let a = self.d * inv_det;
        let b = -self.b * inv_det;
        let c = -self.c * inv_det;
        let d = self.a * inv_det;
        Some(Self {
            a,
            b,
            c,
            d,
            tx: -(a * self.tx + b * self.ty),
            ty: -(c * self.tx + d * self.ty),
        })
    }

    pub fn apply(&self, p: V2f) -> V2f {
        V2f::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    pub fn is_translation_only(&self) -> bool {
        self.a == 1.0 && self.b == 0.0 && self.c == 0.0 && self.d == 1.0
    }
}

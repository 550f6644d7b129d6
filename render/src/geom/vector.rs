use core::{
    fmt::Debug,
    ops::{Add, AddAssign, Sub, SubAssign, Mul, Div, Neg},
};

/// Scalar a [`V2`] can hold: `i32` for pixels, `f32` for everything else.
pub trait Num32:
    Copy + Debug + Default + PartialOrd
    + Add<Output = Self> + AddAssign
    + Sub<Output = Self> + SubAssign
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{}

impl Num32 for i32 {}
impl Num32 for f32 {}

pub mod prelude {
    pub use super::{
        Num32,
        V2, V2i, V2f,
    };
}

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct V2<T: Num32> {
    pub x: T,
    pub y: T,
}

pub type V2i = V2<i32>;
pub type V2f = V2<f32>;

impl<T: Num32> V2<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn diag(val: T) -> Self {
        Self { x: val, y: val }
    }

    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        Self { x: f(self.x), y: f(self.y) }
    }

    pub fn zip_map(self, other: Self, f: impl Fn(T, T) -> T) -> Self {
        Self { x: f(self.x, other.x), y: f(self.y, other.y) }
    }
}

impl V2<f32> {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const NAN: Self = Self { x: f32::NAN, y: f32::NAN };

    pub fn round(self) -> Self {
        Self::map(self, f32::round)
    }

    pub fn floor(self) -> Self {
        Self::map(self, f32::floor)
    }

    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl From<V2i> for V2f {
    fn from(v: V2i) -> Self {
        Self { x: v.x as f32, y: v.y as f32 }
    }
}

impl From<V2f> for V2i {
    fn from(v: V2f) -> Self {
        Self { x: v.x as i32, y: v.y as i32 }
    }
}

impl<T: Num32> From<(T, T)> for V2<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

#[allow(clippy::from_over_into)]
impl<T: Num32> Into<(T, T)> for V2<T> {
    fn into(self) -> (T, T) {
        (self.x, self.y)
    }
}

impl<T: Num32> Add for V2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl<T: Num32> AddAssign for V2<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Num32> Sub for V2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl<T: Num32> SubAssign for V2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Num32> Mul<T> for V2<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self::Output {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl<T: Num32> Div<T> for V2<T> {
    type Output = Self;
    fn div(self, rhs: T) -> Self::Output {
        Self { x: self.x / rhs, y: self.y / rhs }
    }
}

impl Mul<V2<i32>> for i32 {
    type Output = V2<i32>;
    fn mul(self, rhs: Self::Output) -> Self::Output {
        Self::Output { x: self * rhs.x, y: self * rhs.y }
    }
}

impl Mul<V2<f32>> for f32 {
    type Output = V2<f32>;
    fn mul(self, rhs: Self::Output) -> Self::Output {
        Self::Output { x: self * rhs.x, y: self * rhs.y }
    }
}

impl<T: Num32> Neg for V2<T> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self { x: -self.x, y: -self.y }
    }
}

use std::fmt;
impl fmt::Display for V2f {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

impl fmt::Display for V2i {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

use core::cmp::PartialOrd;
use core::ops::{Add, Mul, Sub};

#[cfg(test)]
mod tests;

#[inline]
pub fn clamp<T>(val: T, min: T, max: T) -> T
    where T: PartialOrd
{
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// `from` at `t == 0`, `to` at `t == 1`, unclamped in between and beyond.
#[inline]
pub fn lerp<T>(from: T, to: T, t: T) -> T
    where T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>
{
    from + (to - from) * t
}

#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

use std::ops::{Add, Div, Mul, Neg, Sub};

pub mod boundingbox;
pub mod position;
pub mod vector3;

pub trait Math:
    Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Sized
{
}

impl Math for f64 {}
impl Math for f32 {}
impl Math for i32 {}
impl Math for i64 {}

#[must_use]
pub fn squared_magnitude(a: f64, b: f64, c: f64) -> f64 {
    a.mul_add(a, b.mul_add(b, c * c))
}

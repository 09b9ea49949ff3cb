use std::ops::{Add, Mul, Sub};

use crate::math::Math;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Math + Copy> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Vector3 { x, y, z }
    }

    #[must_use]
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[must_use]
    pub fn add(&self, other: &Vector3<T>) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    #[must_use]
    pub fn add_raw(&self, x: T, y: T, z: T) -> Self {
        Self {
            x: self.x + x,
            y: self.y + y,
            z: self.z + z,
        }
    }

    #[must_use]
    pub fn sub(&self, other: &Vector3<T>) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    #[must_use]
    pub fn multiply(self, x: T, y: T, z: T) -> Self {
        Self {
            x: self.x * x,
            y: self.y * y,
            z: self.z * z,
        }
    }
}

impl Vector3<f64> {
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    #[must_use]
    pub fn normalize(&self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return *self;
        }
        Self {
            x: self.x / length,
            y: self.y / length,
            z: self.z / length,
        }
    }

    #[must_use]
    pub fn squared_distance_to_vec(&self, other: &Self) -> f64 {
        super::squared_magnitude(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Whether `other` lies within the axis-aligned box spanned by this point
    /// plus or minus the given extents on each axis.
    #[must_use]
    pub fn is_within_bounds(&self, other: Self, x: f64, y: f64, z: f64) -> bool {
        (self.x - other.x).abs() <= x && (self.y - other.y).abs() <= y && (self.z - other.z).abs() <= z
    }

    #[must_use]
    pub fn to_i32(&self) -> Vector3<i32> {
        Vector3 {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            z: self.z.floor() as i32,
        }
    }
}

impl Vector3<i32> {
    #[must_use]
    pub const fn to_f64(&self) -> Vector3<f64> {
        Vector3 {
            x: self.x as f64,
            y: self.y as f64,
            z: self.z as f64,
        }
    }
}

impl<T: Math + Copy> Add for Vector3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl<T: Math + Copy> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl<T: Math + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

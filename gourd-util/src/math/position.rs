use std::fmt;

use crate::math::vector3::Vector3;

/// Aka. Block Position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlockPos(pub Vector3<i32>);

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3 { x, y, z })
    }

    #[must_use]
    pub fn floored(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3 {
            x: x.floor() as i32,
            y: y.floor() as i32,
            z: z.floor() as i32,
        })
    }

    #[must_use]
    pub fn floored_v(vector: Vector3<f64>) -> Self {
        Self::floored(vector.x, vector.y, vector.z)
    }

    #[must_use]
    pub const fn up(&self) -> Self {
        Self(Vector3 {
            x: self.0.x,
            y: self.0.y + 1,
            z: self.0.z,
        })
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        Self(Vector3 {
            x: self.0.x,
            y: self.0.y - 1,
            z: self.0.z,
        })
    }

    #[must_use]
    pub fn offset(&self, offset: Vector3<i32>) -> Self {
        Self(self.0 + offset)
    }

    #[must_use]
    pub const fn to_f64(&self) -> Vector3<f64> {
        self.0.to_f64()
    }

    /// The center of the block, i.e. the corner position plus half a block on
    /// every axis.
    #[must_use]
    pub fn to_centered_f64(&self) -> Vector3<f64> {
        self.to_f64().add_raw(0.5, 0.5, 0.5)
    }

    /// Iterates every position in the cuboid spanned by the two corners,
    /// both inclusive.
    pub fn iterate(start: Self, end: Self) -> impl Iterator<Item = Self> {
        let min = Vector3 {
            x: start.0.x.min(end.0.x),
            y: start.0.y.min(end.0.y),
            z: start.0.z.min(end.0.z),
        };
        let max = Vector3 {
            x: start.0.x.max(end.0.x),
            y: start.0.y.max(end.0.y),
            z: start.0.z.max(end.0.z),
        };
        (min.x..=max.x).flat_map(move |x| {
            (min.y..=max.y).flat_map(move |y| (min.z..=max.z).map(move |z| Self::new(x, y, z)))
        })
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

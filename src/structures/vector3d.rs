// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of a three-dimensional vector used for positions and velocities.

use std::ops::{Deref, DerefMut};

use nalgebra::base::Vector3;

/// Describes a position of an atom (in nm) or its velocity (in nm/ps).
/// Implemented using `nalgebra`'s Vector3.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vector3D(pub(crate) Vector3<f64>);

impl From<[f64; 3]> for Vector3D {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector3D(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Vector3D> for [f64; 3] {
    #[inline]
    fn from(vec: Vector3D) -> Self {
        [vec.x, vec.y, vec.z]
    }
}

/// Allows accessing fields of `Vector3D` as `.x`, `.y`, and `.z`.
#[repr(C)]
pub struct Vector3Raw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Vector3D {
    type Target = Vector3Raw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.0.as_ptr() as *const Vector3Raw) }
    }
}

impl DerefMut for Vector3D {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut Vector3Raw) }
    }
}

impl Vector3D {
    /// Create a new `Vector3D` structure.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector3D(Vector3::new(x, y, z))
    }

    /// Calculate length of the vector.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector = Vector3D::new(1.0, 2.0, 3.0);
    /// assert_approx_eq!(f64, vector.len(), 3.7416573867739413);
    /// ```
    #[inline]
    pub fn len(&self) -> f64 {
        self.0.magnitude()
    }

    /// Multiply all components of the vector by `factor`.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// // angstrom to nm
    /// let vector = Vector3D::new(12.0, -4.5, 0.3).scale(0.1);
    ///
    /// assert_approx_eq!(f64, vector.x, 1.2);
    /// assert_approx_eq!(f64, vector.y, -0.45);
    /// assert_approx_eq!(f64, vector.z, 0.03);
    /// ```
    #[inline]
    pub fn scale(self, factor: f64) -> Vector3D {
        Vector3D(self.0 * factor)
    }

    /// Calculate distance between two points. Periodic boundary conditions are not taken into account.
    #[inline]
    pub fn distance(&self, point: &Vector3D) -> f64 {
        (self.0 - point.0).magnitude()
    }

    /// Check whether all components of the vector are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for Vector3D {
    /// Create a null vector.
    #[inline]
    fn default() -> Self {
        Vector3D::new(0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn len() {
        let vec = Vector3D::new(3.0, 4.0, 0.0);
        assert_approx_eq!(f64, vec.len(), 5.0);
    }

    #[test]
    fn len_null() {
        assert_approx_eq!(f64, Vector3D::default().len(), 0.0);
    }

    #[test]
    fn scale() {
        let vec = Vector3D::new(1.0, -2.0, 3.5).scale(10.0);

        assert_approx_eq!(f64, vec.x, 10.0);
        assert_approx_eq!(f64, vec.y, -20.0);
        assert_approx_eq!(f64, vec.z, 35.0);
    }

    #[test]
    fn scale_matches_plain_multiplication() {
        // must be bit-exact
        let value = 1.7134;
        let vec = Vector3D::new(value, value, value).scale(0.1);
        assert_eq!(vec.x, 0.1 * value);
    }

    #[test]
    fn distance() {
        let p1 = Vector3D::new(1.0, 2.0, 3.0);
        let p2 = Vector3D::new(4.0, 6.0, 3.0);

        assert_approx_eq!(f64, p1.distance(&p2), 5.0);
        assert_approx_eq!(f64, p2.distance(&p1), 5.0);
    }

    #[test]
    fn deref_mut() {
        let mut vec = Vector3D::default();
        vec.y = 4.2;

        assert_eq!(vec.x, 0.0);
        assert_eq!(vec.y, 4.2);
        assert_eq!(vec.z, 0.0);
    }

    #[test]
    fn is_zero() {
        assert!(Vector3D::default().is_zero());
        assert!(!Vector3D::new(0.0, 0.0, -0.001).is_zero());
    }

    #[test]
    fn array_conversions() {
        let arr = [0.5, -1.5, 2.25];
        let vec: Vector3D = arr.into();
        let back: [f64; 3] = vec.into();
        assert_eq!(arr, back);
    }
}

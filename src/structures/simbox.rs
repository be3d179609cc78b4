// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the SimBox structure and its methods.

use std::ops::Deref;

/// Structure defining simulation box shape and dimensions (in nm).
#[derive(Debug, Clone, PartialEq)]
#[repr(C)]
pub struct SimBox {
    /// You can also use `.x` to reach this value.
    pub v1x: f64,
    /// You can also use `.y` to reach this value.
    pub v2y: f64,
    /// You can also use `.z` to reach this value.
    pub v3z: f64,
    pub v1y: f64,
    pub v1z: f64,
    pub v2x: f64,
    pub v2z: f64,
    pub v3x: f64,
    pub v3y: f64,
}

impl From<[f64; 9]> for SimBox {
    /// Convert 9-member array to SimBox structure.
    /// The order of the members of the array should be the same as in a gro file.
    ///
    /// ## Panics
    /// Panics if the `SimBox` is not a simulation box supported by Gromacs,
    /// i.e. if `v1y`, `v1z`, and `v2z` are not zero.
    fn from(arr: [f64; 9]) -> Self {
        if !is_supported(&arr) {
            panic!("FATAL VENUS2GMX ERROR | SimBox::from | Unsupported Gromacs simulation box.");
        }

        SimBox {
            v1x: arr[0],
            v2y: arr[1],
            v3z: arr[2],
            v1y: arr[3],
            v1z: arr[4],
            v2x: arr[5],
            v2z: arr[6],
            v3x: arr[7],
            v3y: arr[8],
        }
    }
}

impl From<[f64; 3]> for SimBox {
    /// Convert 3-member array to SimBox structure. Last 6 values of SimBox are set to 0.
    fn from(arr: [f64; 3]) -> Self {
        SimBox {
            v1x: arr[0],
            v2y: arr[1],
            v3z: arr[2],
            ..Default::default()
        }
    }
}

/// Check that the 9 box values describe a box that Gromacs can work with.
pub(crate) fn is_supported(arr: &[f64; 9]) -> bool {
    arr[3] == 0.0 && arr[4] == 0.0 && arr[6] == 0.0
}

impl SimBox {
    /// Check that the simulation box is orthogonal.
    ///
    /// ## Returns
    /// `true` if the simulation box is orthogonal. Otherwise, returns `false`.
    pub fn is_orthogonal(&self) -> bool {
        // we do not need to check v1y, v1z, and v2z as these must be zero
        self.v2x == 0.0 && self.v3x == 0.0 && self.v3y == 0.0
    }

    /// Check whether all dimensions of the simulation box are zero.
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0 && self.is_orthogonal()
    }

    /// Get all 9 values of the box in the order used by gro and g96 files.
    pub fn as_array(&self) -> [f64; 9] {
        [
            self.v1x, self.v2y, self.v3z, self.v1y, self.v1z, self.v2x, self.v2z, self.v3x,
            self.v3y,
        ]
    }
}

impl Default for SimBox {
    /// Create a zero simulation box.
    fn default() -> Self {
        SimBox {
            v1x: 0.0,
            v2y: 0.0,
            v3z: 0.0,
            v1y: 0.0,
            v1z: 0.0,
            v2x: 0.0,
            v2z: 0.0,
            v3x: 0.0,
            v3y: 0.0,
        }
    }
}

/// Allows using .x, .y, and .z to reach the v1x, v2y, and v3z members of SimBox.
#[repr(C)]
pub struct SimBoxDimensions {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for SimBox {
    type Target = SimBoxDimensions;

    fn deref(&self) -> &Self::Target {
        unsafe { &*(self as *const SimBox as *const SimBoxDimensions) }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

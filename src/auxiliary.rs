// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Simple, auxiliary functions and constants used through the `venus2gmx` library.

use crate::structures::vector3d::Vector3D;

/******************************/
/*         CONSTANTS          */
/******************************/

/// Smallest coordinate supported by GRO. The actual minimal supported coordinate is
/// -999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MIN_COORDINATE: f64 = -999.0;
/// Largest coordinate supported by GRO. The actual maximal supported coordinate is
/// 9999.999 nm but due to floating point shenanigans, we are slightly more restrictive to be safe.
pub(crate) const GRO_MAX_COORDINATE: f64 = 9999.0;

/// Angstrom to nm.
pub const ANGSTROM_TO_NM: f64 = 0.1;
/// VENUS96 time unit (1.0e-14 s) to ps.
pub const VENUS_TIME_TO_PS: f64 = 1.0e-2;
/// VENUS96 velocity unit (Angstrom / 1.0e-14 s) to nm/ps.
/// Momentum in amu * Angstrom / 1.0e-14 s divided by mass in amu gives this unit.
pub const VENUS_VELOCITY_TO_NM_PS: f64 = 10.0;

/******************************/
/*          PARSING           */
/******************************/

/// Parse a floating point number as printed by Fortran programs.
/// Exponents marked with `D` (double precision) are accepted.
pub(crate) fn parse_fortran_float(string: &str) -> Option<f64> {
    let string = string.trim();
    match string.parse::<f64>() {
        Ok(x) => Some(x),
        Err(_) if string.contains(['D', 'd']) => string.replace(['D', 'd'], "E").parse::<f64>().ok(),
        Err(_) => None,
    }
}

/******************************/
/*           OTHER            */
/******************************/

/// Check that all coordinates lie inside the range supported by the output format.
pub(crate) fn check_coordinate_sizes<'a>(
    mut positions: impl Iterator<Item = &'a Vector3D>,
    min: f64,
    max: f64,
) -> bool {
    positions.all(|pos| {
        [pos.x, pos.y, pos.z]
            .iter()
            .all(|&coord| coord >= min && coord <= max)
    })
}

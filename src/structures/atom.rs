// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the Atom structure describing static per-atom metadata.

use std::io::Write;

use crate::errors::WriteTrajError;
use crate::structures::vector3d::Vector3D;

/// Static information about an atom shared by all frames of a trajectory.
/// Positions and velocities are stored in `Frame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    residue_number: usize,
    residue_name: String,
    atom_number: usize,
    atom_name: String,
}

impl Atom {
    /// Create new Atom structure with the specified properties.
    pub fn new(
        residue_number: usize,
        residue_name: &str,
        atom_number: usize,
        atom_name: &str,
    ) -> Self {
        Atom {
            residue_number,
            residue_name: residue_name.to_string(),
            atom_number,
            atom_name: atom_name.to_string(),
        }
    }

    /// Get the number of the residue to which the atom belongs.
    pub fn get_residue_number(&self) -> usize {
        self.residue_number
    }

    /// Get the name of the residue to which the atom belongs.
    pub fn get_residue_name(&self) -> &str {
        &self.residue_name
    }

    /// Get the number of the atom as presented in gro file.
    pub fn get_atom_number(&self) -> usize {
        self.atom_number
    }

    /// Get the name of the atom.
    pub fn get_atom_name(&self) -> &str {
        &self.atom_name
    }

    /// Write information about the atom in gro format, including its velocity.
    ///
    /// ## Notes
    /// - Allows for 0 to 5-letter atom names, 0 to 5-letter residue names, 1 to 5-digit atom numbers, and 1 to 5-digit residue numbers.
    /// - Longer names are shortened, longer numbers are wrapped to 0.
    pub fn write_gro(
        &self,
        stream: &mut impl Write,
        position: &Vector3D,
        velocity: &Vector3D,
    ) -> Result<(), WriteTrajError> {
        writeln!(
            stream,
            "{:>5}{:<5}{:>5}{:>5}{:>8.3}{:>8.3}{:>8.3}{:>8.4}{:>8.4}{:>8.4}",
            self.get_residue_number() % 100000,
            truncate_name(self.get_residue_name(), 5),
            truncate_name(self.get_atom_name(), 5),
            self.get_atom_number() % 100000,
            position.x,
            position.y,
            position.z,
            velocity.x,
            velocity.y,
            velocity.z
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)
    }

    /// Write information about the atom as a line of a `POSITION` or `VELOCITY` block of a g96 file.
    ///
    /// ## Notes
    /// - Names longer than 5 letters are shortened.
    /// - Residue numbers are wrapped after 5 digits, atom numbers after 7 digits.
    pub fn write_g96(&self, stream: &mut impl Write, vector: &Vector3D) -> Result<(), WriteTrajError> {
        writeln!(
            stream,
            "{:>5} {:<5} {:<5}{:>7}{:>15.9}{:>15.9}{:>15.9}",
            self.get_residue_number() % 100000,
            truncate_name(self.get_residue_name(), 5),
            truncate_name(self.get_atom_name(), 5),
            self.get_atom_number() % 10000000,
            vector.x,
            vector.y,
            vector.z
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)
    }
}

/// Shorten the name to at most `max` characters.
fn truncate_name(name: &str, max: usize) -> &str {
    match name.char_indices().nth(max) {
        Some((index, _)) => &name[..index],
        None => name,
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

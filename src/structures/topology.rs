// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the Topology structure holding static metadata of the converted system.

use std::path::{Path, PathBuf};

use crate::errors::ParseTemplateError;
use crate::files::FileType;
use crate::io::{g96_io, gro_io};
use crate::structures::{atom::Atom, simbox::SimBox, vector3d::Vector3D};

/// Title used when no template file is provided.
pub const DEFAULT_TITLE: &str = "VENUS96 trajectory";
/// Residue name of atoms of a synthesized topology.
const SYNTHESIZED_RESNAME: &str = "MOL";

/// Content of a single structure block of a gro or g96 file.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub title: String,
    pub atoms: Vec<Atom>,
    pub positions: Vec<Vector3D>,
    /// `None` if any of the atoms has no velocity.
    pub velocities: Option<Vec<Vector3D>>,
    /// `None` if the box is missing or zero.
    pub simbox: Option<SimBox>,
}

/// Origin of the topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologySource {
    /// Metadata were read from the template file at the given path.
    Template(PathBuf),
    /// Metadata were generated for a given number of atoms.
    Synthesized,
}

/// Static metadata written into every frame of the output trajectory:
/// title, per-atom information, and the simulation box.
/// Atoms are stored in the output (template) order.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    source: TopologySource,
    title: String,
    atoms: Vec<Atom>,
    simbox: SimBox,
}

impl Topology {
    /// Read topology from a template file. Supported formats are gro and g96.
    ///
    /// ## Returns
    /// `Topology` if the file could be read. Otherwise `ParseTemplateError`.
    ///
    /// ## Example
    /// ```no_run
    /// # use venus2gmx::prelude::*;
    /// #
    /// let topology = match Topology::from_file("template.gro") {
    ///     Ok(x) => x,
    ///     Err(e) => {
    ///         eprintln!("{}", e);
    ///         return;
    ///     }
    /// };
    ///
    /// println!("{}", topology.get_n_atoms());
    /// ```
    ///
    /// ## Notes
    /// - Only the first structure of the file is read.
    /// - Coordinates of the template are ignored.
    /// - If the template has no box or the box is zero, the topology has a zero box.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<Self, ParseTemplateError> {
        let structure = match FileType::from_name(&filename) {
            FileType::GRO => gro_io::read_gro(&filename)?,
            FileType::G96 => g96_io::read_g96(&filename)?,
            FileType::Unknown => {
                return Err(ParseTemplateError::UnknownFileType(Box::from(
                    filename.as_ref(),
                )))
            }
        };

        Ok(Topology::from_structure(
            TopologySource::Template(filename.as_ref().to_path_buf()),
            structure,
        ))
    }

    /// Create a topology from a parsed structure block, discarding its coordinates.
    pub fn from_structure(source: TopologySource, structure: Structure) -> Self {
        Topology {
            source,
            title: structure.title,
            atoms: structure.atoms,
            simbox: structure.simbox.unwrap_or_default(),
        }
    }

    /// Generate topology for `n_atoms` atoms.
    ///
    /// All atoms are placed in residue 1 named `MOL`,
    /// atoms are named `X1`, `X2`, ... and numbered from 1.
    /// The simulation box is zero.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// #
    /// let topology = Topology::synthesized(5);
    ///
    /// assert_eq!(topology.get_n_atoms(), 5);
    /// assert_eq!(topology.get_atoms()[4].get_atom_name(), "X5");
    /// assert!(topology.get_box().is_zero());
    /// ```
    pub fn synthesized(n_atoms: usize) -> Self {
        let atoms = (1..=n_atoms)
            .map(|number| Atom::new(1, SYNTHESIZED_RESNAME, number, &format!("X{}", number)))
            .collect();

        Topology {
            source: TopologySource::Synthesized,
            title: DEFAULT_TITLE.to_string(),
            atoms,
            simbox: SimBox::default(),
        }
    }

    /// Get the origin of the topology.
    pub fn get_source(&self) -> &TopologySource {
        &self.source
    }

    /// Get the title written into the output frames.
    pub fn get_title(&self) -> &str {
        &self.title
    }

    /// Get the metadata of all atoms in the output order.
    pub fn get_atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Get the number of atoms.
    pub fn get_n_atoms(&self) -> usize {
        self.atoms.len()
    }

    /// Get the simulation box written into the output frames.
    pub fn get_box(&self) -> &SimBox {
        &self.simbox
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for reading and writing g96 files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{ParseG96Error, WriteTrajError};
use crate::structures::simbox::{self, SimBox};
use crate::structures::topology::{Structure, Topology};
use crate::structures::{atom::Atom, frame::Frame, vector3d::Vector3D};

use super::traj_write::{open_output, PrivateTrajWrite, TrajWrite};

/// ## Methods for writing g96 files.
impl Frame {
    /// Write the frame as a single g96 structure into an open stream.
    ///
    /// ## Returns
    /// `Ok` if writing has been successful. Otherwise `WriteTrajError`.
    ///
    /// ## Example
    /// ```no_run
    /// # use std::fs::File;
    /// # use std::io::BufWriter;
    /// # use venus2gmx::prelude::*;
    /// #
    /// let frames = VenusParser::new().parse_file("venus.out").unwrap();
    /// let topology = Topology::from_file("template.g96").unwrap();
    ///
    /// let mut writer = BufWriter::new(File::create("frame.g96").unwrap());
    /// if let Err(e) = frames[0].write_g96(&mut writer, &topology) {
    ///     eprintln!("{}", e);
    ///     return;
    /// }
    /// ```
    ///
    /// ## Notes
    /// - Writes `TITLE`, `TIMESTEP`, `POSITION`, `VELOCITY`, and `BOX` blocks.
    /// - `TIMESTEP` contains the integration cycle and the time of the frame (in ps).
    /// - All 9 box coordinates are written only if the box is not orthogonal.
    pub fn write_g96(
        &self,
        stream: &mut impl Write,
        topology: &Topology,
    ) -> Result<(), WriteTrajError> {
        if self.get_n_atoms() != topology.get_n_atoms() {
            return Err(WriteTrajError::AtomCountMismatch {
                frame: self.get_n_atoms(),
                topology: topology.get_n_atoms(),
            });
        }

        writeln!(
            stream,
            "TITLE\n{}\nEND",
            self.make_title(topology.get_title())
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)?;

        writeln!(
            stream,
            "TIMESTEP\n{:>15}{:>15.6}\nEND",
            self.cycle(),
            self.time()
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)?;

        write_atom_block(stream, "POSITION", topology.get_atoms(), self.positions())?;
        write_atom_block(stream, "VELOCITY", topology.get_atoms(), self.velocities())?;

        write_box(stream, topology.get_box())
    }
}

/// Write a block of atom lines with the given vectors.
fn write_atom_block(
    stream: &mut impl Write,
    name: &str,
    atoms: &[Atom],
    vectors: &[Vector3D],
) -> Result<(), WriteTrajError> {
    writeln!(stream, "{}", name).map_err(|_| WriteTrajError::CouldNotWrite)?;

    for (atom, vector) in atoms.iter().zip(vectors.iter()) {
        atom.write_g96(stream, vector)?;
    }

    writeln!(stream, "END").map_err(|_| WriteTrajError::CouldNotWrite)
}

/// Write box dimensions as a `BOX` block.
fn write_box(stream: &mut impl Write, simbox: &SimBox) -> Result<(), WriteTrajError> {
    writeln!(stream, "BOX").map_err(|_| WriteTrajError::CouldNotWrite)?;

    let values = simbox.as_array();
    let values = if simbox.is_orthogonal() {
        &values[..3]
    } else {
        &values[..]
    };

    for value in values {
        write!(stream, "{:>15.9}", value).map_err(|_| WriteTrajError::CouldNotWrite)?;
    }

    writeln!(stream, "\nEND").map_err(|_| WriteTrajError::CouldNotWrite)
}

/// Structure for writing multi-structure g96 trajectories.
pub struct G96Writer {
    g96: BufWriter<File>,
}

impl TrajWrite for G96Writer {}

impl PrivateTrajWrite for G96Writer {
    fn new(filename: impl AsRef<Path>, append: bool) -> Result<Self, WriteTrajError> {
        let output = open_output(filename.as_ref(), append)?;

        Ok(G96Writer {
            g96: BufWriter::new(output),
        })
    }

    fn write_frame(&mut self, frame: &Frame, topology: &Topology) -> Result<(), WriteTrajError> {
        frame.write_g96(&mut self.g96, topology)
    }

    fn flush(&mut self) -> Result<(), WriteTrajError> {
        self.g96.flush().map_err(|_| WriteTrajError::CouldNotWrite)
    }
}

/// Read the first structure of a g96 file.
///
/// ## Returns
/// `Structure` if the file could be read. Otherwise `ParseG96Error`.
///
/// ## Notes
/// - The structure must contain a `POSITION` block.
/// - Only the first line of the `TITLE` block is used.
/// - Blocks other than `TITLE`, `POSITION`, `VELOCITY`, and `BOX` are ignored.
pub fn read_g96(filename: impl AsRef<Path>) -> Result<Structure, ParseG96Error> {
    read_g96_frames(filename).map(|mut structures| structures.swap_remove(0))
}

/// Read all structures of a (multi-structure) g96 file.
///
/// A new structure starts with every `TITLE` or `TIMESTEP` block
/// that follows a `POSITION` block.
pub fn read_g96_frames(filename: impl AsRef<Path>) -> Result<Vec<Structure>, ParseG96Error> {
    let file = match File::open(filename.as_ref()) {
        Ok(x) => x,
        Err(_) => return Err(ParseG96Error::FileNotFound(Box::from(filename.as_ref()))),
    };

    let mut lines = BufReader::new(file).lines();
    let mut structures = Vec::new();
    let mut current = StructureBuilder::default();
    let mut empty = true;

    while let Some(raw_line) = lines.next() {
        let line = raw_line.map_err(|_| ParseG96Error::LineNotFound(Box::from(filename.as_ref())))?;
        let name = line.trim();

        // skip comments and empty lines between blocks
        if name.is_empty() || name.starts_with('#') {
            continue;
        }

        empty = false;
        let content = read_block(&mut lines, name, filename.as_ref())?;

        match name {
            "TITLE" | "TIMESTEP" if current.positions.is_some() => {
                let title = current.title.clone();
                structures.push(current.build());
                current = StructureBuilder {
                    title,
                    ..Default::default()
                };
            }
            _ => (),
        }

        match name {
            "TITLE" => {
                current.title = content
                    .first()
                    .map(|title| title.trim().to_string())
                    .unwrap_or_default()
            }
            "POSITION" => {
                let (atoms, positions) = parse_atom_block(&content)?;
                current.atoms = atoms;
                current.positions = Some(positions);
            }
            "VELOCITY" => {
                let (_, velocities) = parse_atom_block(&content)?;
                current.velocities = Some(velocities);
            }
            "BOX" => current.simbox = Some(parse_box(&content)?),
            _ => (),
        }
    }

    if empty {
        return Err(ParseG96Error::LineNotFound(Box::from(filename.as_ref())));
    }

    if current.positions.is_none() {
        return Err(ParseG96Error::MissingPosition(Box::from(filename.as_ref())));
    }

    structures.push(current.build());
    Ok(structures)
}

/// Structure under construction.
#[derive(Debug, Default)]
struct StructureBuilder {
    title: String,
    atoms: Vec<Atom>,
    positions: Option<Vec<Vector3D>>,
    velocities: Option<Vec<Vector3D>>,
    simbox: Option<SimBox>,
}

impl StructureBuilder {
    fn build(self) -> Structure {
        let velocities = match (&self.positions, self.velocities) {
            (Some(positions), Some(velocities)) if positions.len() == velocities.len() => {
                Some(velocities)
            }
            _ => None,
        };

        Structure {
            title: self.title,
            atoms: self.atoms,
            positions: self.positions.unwrap_or_default(),
            velocities,
            simbox: self.simbox.filter(|simbox| !simbox.is_zero()),
        }
    }
}

/// Collect all lines of a block up to its `END` line.
fn read_block(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    name: &str,
    filename: &Path,
) -> Result<Vec<String>, ParseG96Error> {
    let mut content = Vec::new();

    for raw_line in lines {
        let line = raw_line.map_err(|_| ParseG96Error::LineNotFound(Box::from(filename)))?;

        if line.trim() == "END" {
            return Ok(content);
        }

        if !line.starts_with('#') {
            content.push(line);
        }
    }

    Err(ParseG96Error::UnterminatedBlock(name.to_string()))
}

/// Parse lines of a `POSITION` or `VELOCITY` block.
fn parse_atom_block(content: &[String]) -> Result<(Vec<Atom>, Vec<Vector3D>), ParseG96Error> {
    let mut atoms = Vec::with_capacity(content.len());
    let mut vectors = Vec::with_capacity(content.len());

    for line in content {
        let (atom, vector) = line_as_atom(line)?;
        atoms.push(atom);
        vectors.push(vector);
    }

    Ok((atoms, vectors))
}

/// Parse a line containing residue number, residue name, atom name, atom number, and a vector.
fn line_as_atom(line: &str) -> Result<(Atom, Vector3D), ParseG96Error> {
    let split = line.split_whitespace().collect::<Vec<&str>>();
    if split.len() != 7 {
        return Err(ParseG96Error::ParseAtomLineErr(line.to_string()));
    }

    let resid = split[0]
        .parse::<usize>()
        .map_err(|_| ParseG96Error::ParseAtomLineErr(line.to_string()))?;
    let atomid = split[3]
        .parse::<usize>()
        .map_err(|_| ParseG96Error::ParseAtomLineErr(line.to_string()))?;

    let mut vector = [0.0; 3];
    for (item, string) in vector.iter_mut().zip(split[4..].iter()) {
        *item = string
            .parse::<f64>()
            .map_err(|_| ParseG96Error::ParseVectorLineErr(line.to_string()))?;
    }

    Ok((Atom::new(resid, split[1], atomid, split[2]), vector.into()))
}

/// Parse the content of a `BOX` block.
fn parse_box(content: &[String]) -> Result<SimBox, ParseG96Error> {
    let line = content.join(" ");

    let values = line
        .split_whitespace()
        .map(|split| split.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| ParseG96Error::ParseBoxLineErr(line.clone()))?;

    match values.len() {
        3 => Ok(SimBox::from([values[0], values[1], values[2]])),
        9 => {
            let mut array = [0.0; 9];
            array.copy_from_slice(&values);

            if !simbox::is_supported(&array) {
                return Err(ParseG96Error::UnsupportedBox(line));
            }

            Ok(SimBox::from(array))
        }
        _ => Err(ParseG96Error::ParseBoxLineErr(line)),
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

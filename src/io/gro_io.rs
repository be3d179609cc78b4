// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for reading and writing gro files.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::auxiliary::{check_coordinate_sizes, GRO_MAX_COORDINATE, GRO_MIN_COORDINATE};
use crate::errors::{ParseGroError, WriteTrajError};
use crate::structures::simbox::{self, SimBox};
use crate::structures::topology::{Structure, Topology};
use crate::structures::{atom::Atom, frame::Frame, vector3d::Vector3D};

use super::traj_write::{open_output, PrivateTrajWrite, TrajWrite};

/// ## Methods for writing gro files.
impl Frame {
    /// Write the frame as a single gro structure into an open stream.
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
    /// let topology = Topology::synthesized(frames[0].get_n_atoms());
    ///
    /// let mut writer = BufWriter::new(File::create("frame.gro").unwrap());
    /// if let Err(e) = frames[0].write_gro(&mut writer, &topology) {
    ///     eprintln!("{}", e);
    ///     return;
    /// }
    /// ```
    ///
    /// ## Notes
    /// - The title of the structure contains the title of the topology,
    ///   the trajectory number, and the time of the frame.
    /// - Velocities are always written.
    /// - The function will write all 9 box coordinates only if necessary
    ///   (any of the last 6 coordinates is non-zero). Otherwise, it assumes the box is
    ///   orthogonal and writes out only 3 dimensions of the box.
    pub fn write_gro(
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

        // check that coordinates of the atoms are in the range supported by the data format
        // this has to be done before anything is written
        if !check_coordinate_sizes(
            self.positions().iter(),
            GRO_MIN_COORDINATE,
            GRO_MAX_COORDINATE,
        ) {
            return Err(WriteTrajError::CoordinateTooLarge);
        }

        write_header(
            stream,
            &self.make_title(topology.get_title()),
            topology.get_n_atoms(),
        )?;

        for ((atom, position), velocity) in topology
            .get_atoms()
            .iter()
            .zip(self.positions().iter())
            .zip(self.velocities().iter())
        {
            atom.write_gro(stream, position, velocity)?;
        }

        write_box(stream, topology.get_box())
    }
}

/// Structure for writing multi-structure gro trajectories.
pub struct GroWriter {
    gro: BufWriter<File>,
}

impl TrajWrite for GroWriter {}

impl PrivateTrajWrite for GroWriter {
    fn new(filename: impl AsRef<Path>, append: bool) -> Result<Self, WriteTrajError> {
        let output = open_output(filename.as_ref(), append)?;

        Ok(GroWriter {
            gro: BufWriter::new(output),
        })
    }

    fn write_frame(&mut self, frame: &Frame, topology: &Topology) -> Result<(), WriteTrajError> {
        frame.write_gro(&mut self.gro, topology)
    }

    fn flush(&mut self) -> Result<(), WriteTrajError> {
        self.gro.flush().map_err(|_| WriteTrajError::CouldNotWrite)
    }
}

/// Read the first structure of a gro file.
///
/// ## Returns
/// `Structure` if the file could be read. Otherwise `ParseGroError`.
pub fn read_gro(filename: impl AsRef<Path>) -> Result<Structure, ParseGroError> {
    let mut buffer = open_gro(filename.as_ref())?;

    read_structure(&mut buffer, filename.as_ref())?
        .ok_or_else(|| ParseGroError::LineNotFound(Box::from(filename.as_ref())))
}

/// Read all structures of a (multi-structure) gro file.
///
/// ## Returns
/// Vector of structures in the order in which they appear in the file. Otherwise `ParseGroError`.
///
/// ## Example
/// ```no_run
/// # use venus2gmx::io::gro_io::read_gro_frames;
/// #
/// let structures = read_gro_frames("trajectory.gro").unwrap();
/// for structure in structures.iter() {
///     println!("{}", structure.title);
/// }
/// ```
pub fn read_gro_frames(filename: impl AsRef<Path>) -> Result<Vec<Structure>, ParseGroError> {
    let mut buffer = open_gro(filename.as_ref())?;

    let mut structures = Vec::new();
    while let Some(structure) = read_structure(&mut buffer, filename.as_ref())? {
        structures.push(structure);
    }

    if structures.is_empty() {
        return Err(ParseGroError::LineNotFound(Box::from(filename.as_ref())));
    }

    Ok(structures)
}

/// Open a gro file for reading.
fn open_gro(filename: &Path) -> Result<BufReader<File>, ParseGroError> {
    match File::open(filename) {
        Ok(x) => Ok(BufReader::new(x)),
        Err(_) => Err(ParseGroError::FileNotFound(Box::from(filename))),
    }
}

/// Read the next structure from the buffer.
/// Returns `None` if the end of the file has been reached.
fn read_structure(
    buffer: &mut impl BufRead,
    filename: &Path,
) -> Result<Option<Structure>, ParseGroError> {
    // get title and number of atoms
    let mut title = String::new();
    match buffer.read_line(&mut title) {
        Ok(0) => return Ok(None),
        Err(_) => return Err(ParseGroError::LineNotFound(Box::from(filename))),
        Ok(_) => (),
    }

    let n_atoms = get_natoms(buffer, filename)?;

    let mut atoms = Vec::with_capacity(n_atoms);
    let mut positions = Vec::with_capacity(n_atoms);
    let mut velocities = Vec::with_capacity(n_atoms);

    for _ in 0..n_atoms {
        let line = next_line(buffer, filename)?;
        let (atom, position, velocity) = line_as_atom(&line)?;

        atoms.push(atom);
        positions.push(position);
        velocities.push(velocity);
    }

    let simbox = line_as_box(&next_line(buffer, filename)?)?;

    Ok(Some(Structure {
        title: title.trim().to_string(),
        atoms,
        positions,
        velocities: velocities.into_iter().collect(),
        simbox: if simbox.is_zero() { None } else { Some(simbox) },
    }))
}

/// Read the next line in the provided buffer, without the line terminator.
fn next_line(buffer: &mut impl BufRead, filename: &Path) -> Result<String, ParseGroError> {
    let mut line = String::new();
    match buffer.read_line(&mut line) {
        Ok(0) | Err(_) => Err(ParseGroError::LineNotFound(Box::from(filename))),
        Ok(_) => Ok(line.trim_end_matches(['\n', '\r']).to_string()),
    }
}

/// Read the next line in the provided buffer and parse it as the number of atoms.
fn get_natoms(buffer: &mut impl BufRead, filename: &Path) -> Result<usize, ParseGroError> {
    let line = next_line(buffer, filename)?;
    match line.trim().parse::<usize>() {
        Ok(x) => Ok(x),
        Err(_) => Err(ParseGroError::ParseLineErr(line.trim().to_string())),
    }
}

/// Get the fixed-width field of an atom line.
fn field(line: &str, start: usize, end: usize) -> Result<&str, ParseGroError> {
    line.get(start..end)
        .map(str::trim)
        .ok_or_else(|| ParseGroError::ParseAtomLineErr(line.to_string()))
}

/// Parse three consecutive 8-character fields of an atom line starting at `start`.
fn parse_vector(line: &str, start: usize) -> Result<Vector3D, ParseGroError> {
    let mut vector = [0.0; 3];
    for (i, item) in vector.iter_mut().enumerate() {
        let curr = start + i * 8;
        *item = field(line, curr, curr + 8)?
            .parse::<f64>()
            .map_err(|_| ParseGroError::ParseAtomLineErr(line.to_string()))?;
    }

    Ok(vector.into())
}

/// Parse a line as atom.
fn line_as_atom(line: &str) -> Result<(Atom, Vector3D, Option<Vector3D>), ParseGroError> {
    if line.len() < 44 {
        return Err(ParseGroError::ParseAtomLineErr(line.to_string()));
    }

    // parse residue number
    let resid = field(line, 0, 5)?
        .parse::<usize>()
        .map_err(|_| ParseGroError::ParseAtomLineErr(line.to_string()))?;

    // parse residue name
    let resname = field(line, 5, 10)?;
    if resname.is_empty() {
        return Err(ParseGroError::ParseAtomLineErr(line.to_string()));
    }

    // parse atom name
    let atomname = field(line, 10, 15)?;
    if atomname.is_empty() {
        return Err(ParseGroError::ParseAtomLineErr(line.to_string()));
    }

    // parse atom number
    let atomid = field(line, 15, 20)?
        .parse::<usize>()
        .map_err(|_| ParseGroError::ParseAtomLineErr(line.to_string()))?;

    let position = parse_vector(line, 20)?;

    // parse velocity, if present
    let velocity = if line.len() >= 68 {
        Some(parse_vector(line, 44)?)
    } else {
        None
    };

    Ok((
        Atom::new(resid, resname, atomid, atomname),
        position,
        velocity,
    ))
}

/// Parse a line as simulation box dimensions.
fn line_as_box(line: &str) -> Result<SimBox, ParseGroError> {
    let values = line
        .split_whitespace()
        .map(|split| split.parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| ParseGroError::ParseBoxLineErr(line.to_string()))?;

    match values.len() {
        3 => Ok(SimBox::from([values[0], values[1], values[2]])),
        9 => {
            let mut array = [0.0; 9];
            array.copy_from_slice(&values);

            // check that the simulation box is valid
            if !simbox::is_supported(&array) {
                return Err(ParseGroError::UnsupportedBox(line.to_string()));
            }

            Ok(SimBox::from(array))
        }
        _ => Err(ParseGroError::ParseBoxLineErr(line.to_string())),
    }
}

/// Write gro file header into an open stream.
fn write_header(
    writer: &mut impl Write,
    title: &str,
    n_atoms: usize,
) -> Result<(), WriteTrajError> {
    writeln!(writer, "{}", title).map_err(|_| WriteTrajError::CouldNotWrite)?;

    writeln!(writer, "{:>5}", n_atoms).map_err(|_| WriteTrajError::CouldNotWrite)?;

    Ok(())
}

/// Write box dimensions into an open stream.
fn write_box(writer: &mut impl Write, simbox: &SimBox) -> Result<(), WriteTrajError> {
    if simbox.is_orthogonal() {
        writeln!(
            writer,
            " {:9.5} {:9.5} {:9.5}",
            simbox.x, simbox.y, simbox.z
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)?;
    } else {
        writeln!(
            writer,
            " {:9.5} {:9.5} {:9.5} {:9.5} {:9.5} {:9.5} {:9.5} {:9.5} {:9.5}",
            simbox.x,
            simbox.y,
            simbox.z,
            simbox.v1y,
            simbox.v1z,
            simbox.v2x,
            simbox.v2z,
            simbox.v3x,
            simbox.v3y
        )
        .map_err(|_| WriteTrajError::CouldNotWrite)?;
    }

    Ok(())
}

/******************************/
/*         UNIT TESTS         */
/******************************/

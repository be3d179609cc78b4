// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for reading VENUS96 output files.
//!
//! VENUS96 prints the state of the system for each saved integration cycle
//! in the following form:
//!
//! ```text
//!    THE CYCLE COUNT IS     100   TIME=  0.10000000E+02
//!
//!              CARTESIAN COORDINATES                     MOMENTA
//!         X           Y           Z            PX          PY          PZ
//!
//!    0.62910    0.62910    0.62910     0.11220    -0.04510     0.09830
//!    ...
//! ```
//!
//! Coordinates are in Angstrom, momenta in amu * Angstrom / 1.0e-14 s and time in 1.0e-14 s.
//! Masses of the atoms (in amu) are listed once at the start of the output below the line
//! `MASSES OF ATOMS`. The output may contain several independent trajectories,
//! each starting with a line `TRAJECTORY NUMBER`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;

use crate::auxiliary::{
    parse_fortran_float, ANGSTROM_TO_NM, VENUS_TIME_TO_PS, VENUS_VELOCITY_TO_NM_PS,
};
use crate::errors::ParseVenusError;
use crate::structures::{frame::Frame, vector3d::Vector3D};

const ANCHOR_NUM_ATOMS: &str = "NUMBER OF ATOMS";
const ANCHOR_MASSES: &str = "MASSES OF ATOMS";
const ANCHOR_TRAJECTORY: &str = "TRAJECTORY NUMBER";
const ANCHOR_CYCLE: &str = "THE CYCLE COUNT IS";

/// Number of lines between the `MASSES OF ATOMS` line and the first line with masses, exclusive.
const MASSES_SKIP: usize = 1;
/// Number of lines between the `THE CYCLE COUNT IS` line and the first atom line, exclusive.
const FRAME_HEADER_LINES: usize = 4;

/// Units of the last three columns of the VENUS96 phase space listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseSpaceUnits {
    /// Momenta in amu * Angstrom / 1.0e-14 s. Converted to velocities using atomic masses.
    #[default]
    Momenta,
    /// Velocities in Angstrom / 1.0e-14 s.
    Velocities,
}

/// Parser of VENUS96 output files.
///
/// ## Example
/// Read all frames from a VENUS96 output file containing 5 atoms.
/// ```no_run
/// # use venus2gmx::prelude::*;
/// #
/// let frames = VenusParser::new()
///     .with_expected_atoms(5)
///     .parse_file("venus.out")
///     .unwrap();
///
/// for frame in frames.iter() {
///     println!("{} {}", frame.cycle(), frame.time());
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct VenusParser {
    expected_atoms: Option<usize>,
    units: PhaseSpaceUnits,
}

impl VenusParser {
    /// Create a new parser. The number of atoms is detected from the output.
    pub fn new() -> Self {
        VenusParser::default()
    }

    /// Require the VENUS96 output to contain `n_atoms` atoms.
    pub fn with_expected_atoms(mut self, n_atoms: usize) -> Self {
        self.expected_atoms = Some(n_atoms);
        self
    }

    /// Set the units of the last three columns of the phase space listing.
    pub fn with_units(mut self, units: PhaseSpaceUnits) -> Self {
        self.units = units;
        self
    }

    /// Read and parse a VENUS96 output file.
    ///
    /// ## Returns
    /// Vector of all frames in the order in which they appear in the file.
    /// `ParseVenusError` if the file could not be read or its content is malformed.
    pub fn parse_file(&self, filename: impl AsRef<Path>) -> Result<Vec<Frame>, ParseVenusError> {
        let mut file = match File::open(filename.as_ref()) {
            Ok(x) => x,
            Err(_) => return Err(ParseVenusError::FileNotFound(Box::from(filename.as_ref()))),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|_| ParseVenusError::LineNotFound(Box::from(filename.as_ref())))?;

        self.parse_str(&content)
    }

    /// Parse the full text of a VENUS96 output.
    ///
    /// ## Returns
    /// Vector of all frames in the order in which they appear in the text.
    ///
    /// ## Notes
    /// - Positions are converted to nm, velocities to nm/ps, and time to ps.
    /// - If the number of atoms is neither expected nor declared by the output,
    ///   it is detected from the first frame.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Frame>, ParseVenusError> {
        let mut scanner = VenusScanner::new(self);

        for (index, line) in content.lines().enumerate() {
            scanner.process_line(index + 1, line)?;
        }

        scanner.finish()
    }
}

/// Regular expressions extracting values from the marker lines.
struct Patterns {
    n_atoms: Regex,
    trajectory: Regex,
    cycle: Regex,
}

impl Patterns {
    fn new() -> Self {
        Patterns {
            n_atoms: Regex::new(r"NUMBER OF ATOMS\D*(\d+)").expect(
                "FATAL VENUS2GMX ERROR | venus_io::Patterns::new | Could not construct regular expression.",
            ),
            trajectory: Regex::new(r"TRAJECTORY NUMBER\s+(\d+)").expect(
                "FATAL VENUS2GMX ERROR | venus_io::Patterns::new | Could not construct regular expression.",
            ),
            cycle: Regex::new(r"THE CYCLE COUNT IS\s+(\d+)\s+\S+\s+(\S+)").expect(
                "FATAL VENUS2GMX ERROR | venus_io::Patterns::new | Could not construct regular expression.",
            ),
        }
    }
}

/// State of the line scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside of any section.
    Idle,
    /// Inside the list of atomic masses.
    Masses { skip: usize, read_lines: usize },
    /// Between the frame marker and the first atom line.
    FrameHeader { remaining: usize },
    /// Reading lines with coordinates and momenta of atoms.
    PhaseSpace,
    /// Line directly following the last atom of a frame starting at `line`.
    FrameEnd { line: usize },
}

/// Frame that is currently being read.
#[derive(Debug)]
struct FrameBuilder {
    /// Line of the frame marker.
    line: usize,
    cycle: u64,
    time: f64,
    /// Positions already converted to nm.
    positions: Vec<Vector3D>,
    /// Momenta or velocities in VENUS96 units.
    raw: Vec<Vector3D>,
}

/// Finite-state machine consuming a VENUS96 output line by line.
struct VenusScanner<'a> {
    parser: &'a VenusParser,
    patterns: Patterns,
    state: ScanState,
    n_atoms: Option<usize>,
    masses: Vec<f64>,
    trajectory: usize,
    current: Option<FrameBuilder>,
    frames: Vec<Frame>,
}

impl<'a> VenusScanner<'a> {
    fn new(parser: &'a VenusParser) -> Self {
        VenusScanner {
            parser,
            patterns: Patterns::new(),
            state: ScanState::Idle,
            n_atoms: parser.expected_atoms,
            masses: Vec::new(),
            trajectory: 1,
            current: None,
            frames: Vec::new(),
        }
    }

    /// Process a single line of the output. `line_number` starts from 1.
    fn process_line(&mut self, line_number: usize, line: &str) -> Result<(), ParseVenusError> {
        match self.state {
            ScanState::Idle => self.process_idle(line_number, line),

            ScanState::Masses { skip, read_lines } => {
                if skip > 0 {
                    self.state = ScanState::Masses {
                        skip: skip - 1,
                        read_lines,
                    };
                    return Ok(());
                }

                match parse_numbers(line) {
                    // the first line after the header must contain masses
                    None if read_lines == 0 => Err(ParseVenusError::ParseLineErr {
                        line: line_number,
                        content: line.to_string(),
                    }),
                    Some(masses) if read_lines == 0 || !masses.is_empty() => {
                        self.masses.extend(masses);

                        let complete = match self.n_atoms {
                            Some(n) => self.masses.len() >= n,
                            None => true,
                        };

                        self.state = if complete {
                            ScanState::Idle
                        } else {
                            ScanState::Masses {
                                skip: 0,
                                read_lines: read_lines + 1,
                            }
                        };
                        Ok(())
                    }
                    // the list of masses ended early; the line belongs to another section
                    _ => {
                        self.state = ScanState::Idle;
                        self.process_idle(line_number, line)
                    }
                }
            }

            ScanState::FrameHeader { remaining } => {
                self.state = if remaining > 1 {
                    ScanState::FrameHeader {
                        remaining: remaining - 1,
                    }
                } else {
                    ScanState::PhaseSpace
                };
                Ok(())
            }

            ScanState::PhaseSpace => self.process_phase_space(line_number, line),

            ScanState::FrameEnd { line: frame_line } => {
                // the frame must not continue past the expected number of atoms
                if parse_phase_space_line(line).is_some() {
                    return Err(ParseVenusError::ExcessAtoms {
                        line: frame_line,
                        expected: self.n_atoms.unwrap_or_default(),
                    });
                }

                self.state = ScanState::Idle;
                self.process_idle(line_number, line)
            }
        }
    }

    /// Look for markers outside of any section.
    fn process_idle(&mut self, line_number: usize, line: &str) -> Result<(), ParseVenusError> {
        if line.contains(ANCHOR_NUM_ATOMS) {
            let declared = self
                .patterns
                .n_atoms
                .captures(line)
                .and_then(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
                .ok_or_else(|| ParseVenusError::ParseLineErr {
                    line: line_number,
                    content: line.to_string(),
                })?;

            match self.n_atoms {
                Some(expected) if expected != declared => {
                    return Err(ParseVenusError::AtomCountMismatch {
                        line: line_number,
                        declared,
                        expected,
                    })
                }
                _ => self.n_atoms = Some(declared),
            }
        } else if line.contains(ANCHOR_MASSES) {
            self.masses.clear();
            self.state = ScanState::Masses {
                skip: MASSES_SKIP,
                read_lines: 0,
            };
        } else if line.contains(ANCHOR_TRAJECTORY) {
            self.trajectory = self
                .patterns
                .trajectory
                .captures(line)
                .and_then(|caps| caps.get(1)?.as_str().parse::<usize>().ok())
                .ok_or_else(|| ParseVenusError::ParseLineErr {
                    line: line_number,
                    content: line.to_string(),
                })?;
        } else if line.contains(ANCHOR_CYCLE) {
            let (cycle, time) = self
                .patterns
                .cycle
                .captures(line)
                .and_then(|caps| {
                    let cycle = caps.get(1)?.as_str().parse::<u64>().ok()?;
                    let time = parse_fortran_float(caps.get(2)?.as_str())?;
                    Some((cycle, time))
                })
                .ok_or_else(|| ParseVenusError::ParseLineErr {
                    line: line_number,
                    content: line.to_string(),
                })?;

            self.current = Some(FrameBuilder {
                line: line_number,
                cycle,
                time: VENUS_TIME_TO_PS * time,
                positions: Vec::with_capacity(self.n_atoms.unwrap_or_default()),
                raw: Vec::with_capacity(self.n_atoms.unwrap_or_default()),
            });

            self.state = ScanState::FrameHeader {
                remaining: FRAME_HEADER_LINES,
            };
        }

        Ok(())
    }

    /// Read a line that should contain the phase space coordinates of an atom.
    fn process_phase_space(
        &mut self,
        line_number: usize,
        line: &str,
    ) -> Result<(), ParseVenusError> {
        let builder = self.current.as_mut().expect(
            "FATAL VENUS2GMX ERROR | VenusScanner::process_phase_space | Frame should be under construction.",
        );

        match parse_phase_space_line(line) {
            Some(values) => {
                builder.positions.push(
                    Vector3D::new(values[0], values[1], values[2]).scale(ANGSTROM_TO_NM),
                );
                builder
                    .raw
                    .push(Vector3D::new(values[3], values[4], values[5]));

                if Some(builder.positions.len()) == self.n_atoms {
                    let frame_line = builder.line;
                    self.complete_frame()?;
                    self.state = ScanState::FrameEnd { line: frame_line };
                }

                Ok(())
            }

            None => match self.n_atoms {
                Some(expected) => Err(ParseVenusError::IncompleteFrame {
                    line: builder.line,
                    expected,
                    found: builder.positions.len(),
                }),
                // the number of atoms is detected from the first frame
                None if builder.positions.is_empty() => {
                    Err(ParseVenusError::EmptyFrame { line: builder.line })
                }
                None => {
                    self.n_atoms = Some(builder.positions.len());
                    self.complete_frame()?;
                    self.process_idle(line_number, line)
                }
            },
        }
    }

    /// Convert the frame under construction into a `Frame` and store it.
    fn complete_frame(&mut self) -> Result<(), ParseVenusError> {
        let builder = self.current.take().expect(
            "FATAL VENUS2GMX ERROR | VenusScanner::complete_frame | Frame should be under construction.",
        );

        let velocities = match self.parser.units {
            PhaseSpaceUnits::Momenta => momenta_to_velocities(&builder, &self.masses)?,
            PhaseSpaceUnits::Velocities => builder
                .raw
                .iter()
                .map(|v| v.scale(VENUS_VELOCITY_TO_NM_PS))
                .collect(),
        };

        self.frames.push(Frame::new(
            self.frames.len(),
            self.trajectory,
            builder.cycle,
            builder.time,
            builder.positions,
            velocities,
        ));

        self.state = ScanState::Idle;
        Ok(())
    }

    /// Handle the end of the output.
    fn finish(mut self) -> Result<Vec<Frame>, ParseVenusError> {
        match self.state {
            ScanState::PhaseSpace if self.n_atoms.is_none() => {
                let builder = self.current.as_ref().expect(
                    "FATAL VENUS2GMX ERROR | VenusScanner::finish | Frame should be under construction.",
                );

                if builder.positions.is_empty() {
                    return Err(ParseVenusError::EmptyFrame { line: builder.line });
                }

                self.n_atoms = Some(builder.positions.len());
                self.complete_frame()?;
            }
            ScanState::PhaseSpace | ScanState::FrameHeader { .. } => {
                let builder = self.current.as_ref().expect(
                    "FATAL VENUS2GMX ERROR | VenusScanner::finish | Frame should be under construction.",
                );

                return match self.n_atoms {
                    Some(expected) => Err(ParseVenusError::IncompleteFrame {
                        line: builder.line,
                        expected,
                        found: builder.positions.len(),
                    }),
                    None => Err(ParseVenusError::EmptyFrame { line: builder.line }),
                };
            }
            ScanState::Idle | ScanState::Masses { .. } | ScanState::FrameEnd { .. } => (),
        }

        if self.frames.is_empty() {
            return Err(ParseVenusError::NoFramesFound);
        }

        Ok(self.frames)
    }
}

/// Convert momenta of all atoms of a frame to velocities in nm/ps.
fn momenta_to_velocities(
    builder: &FrameBuilder,
    masses: &[f64],
) -> Result<Vec<Vector3D>, ParseVenusError> {
    if masses.len() < builder.raw.len() {
        return Err(ParseVenusError::MissingMasses {
            line: builder.line,
            expected: builder.raw.len(),
            found: masses.len(),
        });
    }

    builder
        .raw
        .iter()
        .zip(masses.iter())
        .enumerate()
        .map(|(i, (momentum, &mass))| {
            if mass <= 0.0 {
                return Err(ParseVenusError::InvalidMass {
                    line: builder.line,
                    atom: i + 1,
                });
            }

            Ok(Vector3D::new(
                VENUS_VELOCITY_TO_NM_PS * momentum.x / mass,
                VENUS_VELOCITY_TO_NM_PS * momentum.y / mass,
                VENUS_VELOCITY_TO_NM_PS * momentum.z / mass,
            ))
        })
        .collect()
}

/// Parse all whitespace-separated fields of a line as numbers.
/// Returns `None` if any of the fields is not a number.
fn parse_numbers(line: &str) -> Option<Vec<f64>> {
    line.split_whitespace().map(parse_fortran_float).collect()
}

/// Parse a line containing 3 coordinates and 3 momenta (or velocities) of an atom.
fn parse_phase_space_line(line: &str) -> Option<[f64; 6]> {
    let numbers = parse_numbers(line)?;
    numbers.try_into().ok()
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    const HEADER: &str = "\
 VENUS96 TEST
    NUMBER OF ATOMS =     2

    MASSES OF ATOMS

     1.00000    10.00000

";

    fn frame_block(cycle: u64, time: &str, atoms: &[&str]) -> String {
        let mut block = format!("   THE CYCLE COUNT IS {:>7}   TIME= {}\n", cycle, time);
        block.push_str("\n     CARTESIAN COORDINATES               MOMENTA\n");
        block.push_str("    X       Y       Z         PX       PY       PZ\n\n");
        for atom in atoms {
            block.push_str(atom);
            block.push('\n');
        }
        block.push_str("\n   TOTAL ENERGY =   -0.12345E+03\n\n");
        block
    }

    fn two_atom_output() -> String {
        let mut output = HEADER.to_string();
        output.push_str(" ****** TRAJECTORY NUMBER     1 ******\n\n");
        output.push_str(&frame_block(
            0,
            "0.00000000E+00",
            &[
                "   1.00000   2.00000   3.00000    0.10000  -0.20000   0.30000",
                "  -1.00000  -2.00000  -3.00000    1.00000   2.00000  -3.00000",
            ],
        ));
        output.push_str(&frame_block(
            50,
            "0.50000000E+02",
            &[
                "   1.10000   2.10000   3.10000    0.20000  -0.20000   0.30000",
                "  -1.10000  -2.10000  -3.10000    1.00000   2.00000  -4.00000",
            ],
        ));
        output.push_str(" ****** TRAJECTORY NUMBER     2 ******\n\n");
        output.push_str(&frame_block(
            0,
            "0.00000000D+00",
            &[
                "   5.00000   5.00000   5.00000    0.00000   0.00000   0.00000",
                "   6.00000   6.00000   6.00000    0.00000   0.00000   0.00000",
            ],
        ));
        output
    }

    #[test]
    fn parse_two_atoms() {
        let frames = VenusParser::new().parse_str(&two_atom_output()).unwrap();

        assert_eq!(frames.len(), 3);

        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index(), i);
            assert_eq!(frame.get_n_atoms(), 2);
            assert_eq!(frame.positions().len(), frame.velocities().len());
        }

        assert_eq!(frames[0].trajectory(), 1);
        assert_eq!(frames[1].trajectory(), 1);
        assert_eq!(frames[2].trajectory(), 2);

        assert_eq!(frames[0].cycle(), 0);
        assert_eq!(frames[1].cycle(), 50);
        assert_approx_eq!(f64, frames[0].time(), 0.0);
        assert_approx_eq!(f64, frames[1].time(), 0.5);

        let first = &frames[0];
        assert_approx_eq!(f64, first.positions()[0].x, 0.1);
        assert_approx_eq!(f64, first.positions()[0].y, 0.2);
        assert_approx_eq!(f64, first.positions()[0].z, 0.3);
        assert_approx_eq!(f64, first.positions()[1].x, -0.1);

        // mass 1.0: v = 10 * p
        assert_approx_eq!(f64, first.velocities()[0].x, 1.0);
        assert_approx_eq!(f64, first.velocities()[0].y, -2.0);
        assert_approx_eq!(f64, first.velocities()[0].z, 3.0);

        // mass 10.0: v = p
        assert_approx_eq!(f64, first.velocities()[1].x, 1.0);
        assert_approx_eq!(f64, first.velocities()[1].y, 2.0);
        assert_approx_eq!(f64, first.velocities()[1].z, -3.0);

        assert_approx_eq!(f64, frames[1].velocities()[1].z, -4.0);
        assert!(frames[2].velocities()[0].is_zero());
    }

    #[test]
    fn parse_unit_conversion_is_exact() {
        let frames = VenusParser::new().parse_str(&two_atom_output()).unwrap();

        assert_eq!(frames[1].positions()[0].x, 0.1 * 1.1);
        assert_eq!(frames[1].velocities()[0].x, 10.0 * 0.2 / 1.0);
        assert_eq!(frames[1].time(), 1.0e-2 * 50.0);
    }

    #[test]
    fn parse_expected_atoms() {
        let frames = VenusParser::new()
            .with_expected_atoms(2)
            .parse_str(&two_atom_output())
            .unwrap();

        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn parse_expected_atoms_mismatch() {
        match VenusParser::new()
            .with_expected_atoms(3)
            .parse_str(&two_atom_output())
        {
            Err(ParseVenusError::AtomCountMismatch {
                line,
                declared,
                expected,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(declared, 2);
                assert_eq!(expected, 3);
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_autodetect_atoms() {
        // no `NUMBER OF ATOMS` line
        let output = two_atom_output().replace("    NUMBER OF ATOMS =     2\n", "");
        let frames = VenusParser::new().parse_str(&output).unwrap();

        assert_eq!(frames.len(), 3);
        for frame in frames.iter() {
            assert_eq!(frame.get_n_atoms(), 2);
        }
        assert_approx_eq!(f64, frames[0].velocities()[1].z, -3.0);
    }

    #[test]
    fn parse_autodetect_atoms_at_eof() {
        let mut output = HEADER.replace("    NUMBER OF ATOMS =     2\n", "");
        output.push_str("   THE CYCLE COUNT IS       0   TIME=  0.00000000E+00\n\n\n\n\n");
        output.push_str("   1.00000   2.00000   3.00000    0.10000  -0.20000   0.30000\n");
        output.push_str("  -1.00000  -2.00000  -3.00000    1.00000   2.00000  -3.00000");

        let frames = VenusParser::new().parse_str(&output).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].get_n_atoms(), 2);
        assert_eq!(frames[0].trajectory(), 1);
    }

    #[test]
    fn parse_velocities() {
        let frames = VenusParser::new()
            .with_units(PhaseSpaceUnits::Velocities)
            .parse_str(&two_atom_output())
            .unwrap();

        // masses are ignored
        assert_approx_eq!(f64, frames[0].velocities()[1].x, 10.0);
        assert_approx_eq!(f64, frames[0].velocities()[1].z, -30.0);
    }

    #[test]
    fn parse_masses_multiple_lines() {
        let output = two_atom_output().replace(
            "     1.00000    10.00000\n",
            "     1.00000\n    10.00000\n",
        );
        let frames = VenusParser::new().parse_str(&output).unwrap();

        assert_approx_eq!(f64, frames[0].velocities()[1].x, 1.0);
    }

    #[test]
    fn parse_missing_masses() {
        let output = two_atom_output().replace("     1.00000    10.00000\n", "     1.00000\n");

        match VenusParser::new().parse_str(&output) {
            Err(ParseVenusError::MissingMasses {
                line: _,
                expected,
                found,
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_invalid_mass() {
        let output = two_atom_output().replace("    10.00000\n", "     0.00000\n");

        match VenusParser::new().parse_str(&output) {
            Err(ParseVenusError::InvalidMass { line: _, atom }) => assert_eq!(atom, 2),
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_incomplete_frame() {
        let output = two_atom_output().replace(
            "  -1.10000  -2.10000  -3.10000    1.00000   2.00000  -4.00000\n",
            "",
        );

        match VenusParser::new().parse_str(&output) {
            Err(ParseVenusError::IncompleteFrame {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 20);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_excess_atoms() {
        // no `NUMBER OF ATOMS` line, but 1 atom is expected
        let output = two_atom_output().replace("    NUMBER OF ATOMS =     2\n", "");

        match VenusParser::new().with_expected_atoms(1).parse_str(&output) {
            Err(ParseVenusError::ExcessAtoms { line, expected }) => {
                assert_eq!(line, 9);
                assert_eq!(expected, 1);
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_malformed_atom_line() {
        let output = two_atom_output().replace("  -1.10000  -2.10000", "  -1.10000  -2.1O000");

        assert!(matches!(
            VenusParser::new().parse_str(&output),
            Err(ParseVenusError::IncompleteFrame { .. })
        ));
    }

    #[test]
    fn parse_truncated_output() {
        let output = two_atom_output();
        let truncated = &output[..output.find("  -1.10000").unwrap()];

        match VenusParser::new().parse_str(truncated) {
            Err(ParseVenusError::IncompleteFrame {
                line: _,
                expected,
                found,
            }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            Ok(_) => panic!("Parsing should have failed, but it succeeded."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_truncated_header() {
        let mut output = HEADER.to_string();
        output.push_str("   THE CYCLE COUNT IS       0   TIME=  0.00000000E+00\n\n");

        assert!(matches!(
            VenusParser::new().parse_str(&output),
            Err(ParseVenusError::IncompleteFrame { found: 0, .. })
        ));
    }

    #[test]
    fn parse_empty_frame() {
        let mut output = HEADER.replace("    NUMBER OF ATOMS =     2\n", "");
        output.push_str(&frame_block(0, "0.0", &[]));

        assert!(matches!(
            VenusParser::new().parse_str(&output),
            Err(ParseVenusError::EmptyFrame { .. })
        ));
    }

    #[test]
    fn parse_unparsable_cycle() {
        let output = two_atom_output().replace("TIME= 0.50000000E+02", "TIME= 0.5000000X");

        assert!(matches!(
            VenusParser::new().parse_str(&output),
            Err(ParseVenusError::ParseLineErr { .. })
        ));
    }

    #[test]
    fn parse_no_frames() {
        assert_eq!(
            VenusParser::new().parse_str(HEADER),
            Err(ParseVenusError::NoFramesFound)
        );
        assert_eq!(
            VenusParser::new().parse_str(""),
            Err(ParseVenusError::NoFramesFound)
        );
    }

    #[test]
    fn frames_match_markers() {
        let output = two_atom_output();
        let frames = VenusParser::new().parse_str(&output).unwrap();

        assert_eq!(frames.len(), output.matches(ANCHOR_CYCLE).count());
    }

    #[test]
    fn parse_file() {
        let frames = VenusParser::new()
            .parse_file("test_files/venus_5atoms.out")
            .unwrap();

        assert_eq!(frames.len(), 5);
        assert_eq!(
            frames.iter().map(|f| f.trajectory()).collect::<Vec<_>>(),
            vec![1, 1, 1, 2, 2]
        );

        for frame in frames.iter() {
            assert_eq!(frame.get_n_atoms(), 5);
            assert_eq!(frame.velocities().len(), 5);
        }

        // carbon atom of the first frame
        let carbon = frames[0].positions()[4];
        assert_approx_eq!(f64, carbon.x, 0.0);
        assert_approx_eq!(f64, carbon.y, 0.0);
        assert_approx_eq!(f64, carbon.z, 0.0);
    }

    #[test]
    fn parse_file_nonexistent() {
        match VenusParser::new().parse_file("test_files/nonexistent.out") {
            Err(ParseVenusError::FileNotFound(path)) => {
                assert_eq!(path, Box::from(Path::new("test_files/nonexistent.out")))
            }
            Ok(_) => panic!("Nonexistent file seems to exist."),
            Err(e) => panic!("Incorrect error type `{:?}` was returned.", e),
        }
    }

    #[test]
    fn parse_file_no_frames() {
        assert_eq!(
            VenusParser::new().parse_file("test_files/venus_no_frames.out"),
            Err(ParseVenusError::NoFramesFound)
        );
    }

    #[test]
    fn phase_space_line() {
        assert_eq!(
            parse_phase_space_line("  1.0  2.0  3.0  4.0  5.0  6.0"),
            Some([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        );
        assert_eq!(parse_phase_space_line("  1.0  2.0  3.0  4.0  5.0"), None);
        assert_eq!(
            parse_phase_space_line("  1.0  2.0  3.0  4.0  5.0  6.0  7.0"),
            None
        );
        assert_eq!(parse_phase_space_line(""), None);
        assert_eq!(
            parse_phase_space_line("   TOTAL ENERGY =   -0.12345E+03"),
            None
        );
    }
}

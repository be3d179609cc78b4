// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Error types returned by the `venus2gmx` library.

use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading and parsing VENUS96 output file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseVenusError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` could not be read.")]
    LineNotFound(Box<Path>),
    #[error("Could not parse line {line} `{content}`.")]
    ParseLineErr { line: usize, content: String },
    #[error("Frame starting at line {line} is incomplete: expected {expected} atoms, found {found}.")]
    IncompleteFrame {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Frame starting at line {line} contains more than {expected} atoms.")]
    ExcessAtoms { line: usize, expected: usize },
    #[error("Frame starting at line {line} contains no atoms.")]
    EmptyFrame { line: usize },
    #[error("Masses are required to convert momenta of frame starting at line {line}: expected {expected}, got {found}.")]
    MissingMasses {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Mass of atom {atom} at line {line} is not positive.")]
    InvalidMass { line: usize, atom: usize },
    #[error("VENUS96 output declares {declared} atoms at line {line} but {expected} atoms were expected.")]
    AtomCountMismatch {
        line: usize,
        declared: usize,
        expected: usize,
    },
    #[error("No trajectory frames were found (no line contains `THE CYCLE COUNT IS`).")]
    NoFramesFound,
}

/// Errors that can occur when reading and parsing gro file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseGroError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` ended unexpectedly.")]
    LineNotFound(Box<Path>),
    #[error("Could not parse line `{0}`.")]
    ParseLineErr(String),
    #[error("Could not parse line `{0}` as atom.")]
    ParseAtomLineErr(String),
    #[error("Could not parse line `{0}` as box dimensions.")]
    ParseBoxLineErr(String),
    #[error("Simulation box `{0}` is not supported.")]
    UnsupportedBox(String),
}

/// Errors that can occur when reading and parsing g96 file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseG96Error {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` ended unexpectedly.")]
    LineNotFound(Box<Path>),
    #[error("Block `{0}` is not terminated by `END`.")]
    UnterminatedBlock(String),
    #[error("File `{0}` contains no `POSITION` block.")]
    MissingPosition(Box<Path>),
    #[error("Could not parse line `{0}` as atom.")]
    ParseAtomLineErr(String),
    #[error("Could not parse line `{0}` as vector.")]
    ParseVectorLineErr(String),
    #[error("Could not parse line `{0}` as box dimensions.")]
    ParseBoxLineErr(String),
    #[error("Simulation box `{0}` is not supported.")]
    UnsupportedBox(String),
}

/// Errors that can occur when reading a template structure file.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseTemplateError {
    #[error("Template file `{0}` has an unsupported format (expected gro or g96).")]
    UnknownFileType(Box<Path>),
    #[error("{0}")]
    Gro(#[from] ParseGroError),
    #[error("{0}")]
    G96(#[from] ParseG96Error),
}

/// Errors that can occur when reading a reorder map.
/// All variants except for `FileNotFound` and `ParseLineErr` signal an invalid permutation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseReorderError {
    #[error("File `{0}` was not found.")]
    FileNotFound(Box<Path>),
    #[error("File `{0}` could not be read.")]
    LineNotFound(Box<Path>),
    #[error("Could not parse line `{0}` as atom index.")]
    ParseLineErr(String),
    #[error("Reorder map contains {map} indices but the system contains {atoms} atoms.")]
    LengthMismatch { map: usize, atoms: usize },
    #[error("Atom index `{0}` appears multiple times in the reorder map.")]
    Duplicate(usize),
    #[error("Atom index `{index}` is out of range for a reorder map of {atoms} atoms.")]
    OutOfRange { index: usize, atoms: usize },
}

/// Errors that can occur when reordering atoms of a frame.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Reorder map contains {map} indices but the frame contains {frame} atoms.")]
    DimensionMismatch { map: usize, frame: usize },
}

/// Errors that can occur when writing trajectory files.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WriteTrajError {
    #[error("File `{0}` could not be created.")]
    CouldNotCreate(Box<Path>),
    #[error("Could not write line into file.")]
    CouldNotWrite,
    #[error("Existing file `{0}` could not be backed up.")]
    CouldNotBackup(Box<Path>),
    #[error("Frame contains coordinates that are too large to be written into a gro file.")]
    CoordinateTooLarge,
    #[error("Frame contains {frame} atoms but the topology contains {topology} atoms.")]
    AtomCountMismatch { frame: usize, topology: usize },
}

/// Errors in the resolved conversion configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Could not determine output format of `{0}` (expected gro or g96).")]
    UnknownOutputFormat(Box<Path>),
    #[error("Output format `{0}` is not a trajectory format supported for writing.")]
    UnsupportedOutputFormat(String),
}

/// Errors that can occur during the conversion of a VENUS96 output file.
/// Each variant identifies the stage of the conversion that failed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConvertError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("reading template failed: {0}")]
    Template(#[from] ParseTemplateError),
    #[error("reading reorder map failed: {0}")]
    Reorder(#[from] ParseReorderError),
    #[error("parsing VENUS96 output failed: {0}")]
    Venus(#[from] ParseVenusError),
    #[error("atom counts do not match: {0}")]
    DimensionMismatch(String),
    #[error("reordering atoms failed: {0}")]
    Reordering(#[from] ReorderError),
    #[error("writing trajectory failed: {0}")]
    Write(#[from] WriteTrajError),
}

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! # venus2gmx: VENUS96 to Gromacs Trajectory Converter
//!
//! Rust library (and command line tool) for converting the text output of the
//! VENUS96 chemical dynamics program into gro and g96 trajectories.
//!
//! ## Usage
//!
//! Run
//!
//! ```bash
//! $ cargo add venus2gmx
//! ```
//!
//! Import the crate in your Rust code:
//! ```
//! use venus2gmx::prelude::*;
//! ```
//!
//! ## Examples
//!
//! #### Converting a VENUS96 output
//!
//! Convert all frames of a VENUS96 output into a single gro trajectory.
//! Atom names, residue names and the simulation box are taken from a template structure.
//! The atoms are reordered from the VENUS96 order into the order of the template.
//!
//! ```no_run
//! use venus2gmx::prelude::*;
//! use std::error::Error;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let config = ConvertConfig::new("venus.out")
//!         .with_template("methane.gro")
//!         .with_reorder("reorder.txt")
//!         .with_output("methane_traj.gro")
//!         .with_layout(OutputLayout::Single);
//!
//!     let written = Converter::new(config)
//!         .print_progress(ProgressPrinter::new())
//!         .run()?;
//!
//!     println!("{:?}", written);
//!
//!     Ok(())
//! }
//! ```
//!
//! #### Working with individual frames
//!
//! Parse a VENUS96 output and write every frame of the first trajectory into a g96 file.
//!
//! ```no_run
//! use venus2gmx::prelude::*;
//! use std::error::Error;
//! use std::fs::File;
//! use std::io::BufWriter;
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let frames = VenusParser::new().parse_file("venus.out")?;
//!     let topology = Topology::synthesized(frames[0].get_n_atoms());
//!
//!     let mut output = BufWriter::new(File::create("first_trajectory.g96")?);
//!     for frame in frames.iter().filter(|frame| frame.trajectory() == 1) {
//!         frame.write_g96(&mut output, &topology)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Units
//! VENUS96 prints coordinates in Angstrom, momenta in amu * Angstrom / 1.0e-14 s,
//! and time in 1.0e-14 s. These are converted into nm, nm/ps, and ps, respectively.
//! Velocities are obtained by dividing the momenta by the atomic masses
//! listed in the VENUS96 output.
//!
//! ## Error handling
//! Every stage of the conversion has its own error type. These are not exported into the `prelude` module.
//! If you want to match on a specific error type, include it explicitly from the `errors` module:
//! ```
//! use venus2gmx::errors::ParseVenusError;
//! ```
//!
//! ## License
//! This library is released under the MIT License.

/// Current version of the `venus2gmx` library.
pub const VENUS2GMX_VERSION: &str = env!("CARGO_PKG_VERSION");

mod auxiliary;
pub mod convert;
pub mod errors;
pub mod files;
pub mod io {
    pub mod g96_io;
    pub mod gro_io;
    mod reorder_io;
    pub mod traj_write;
    pub mod venus_io;
}
pub mod progress;
pub mod structures {
    pub mod atom;
    pub mod frame;
    pub mod reorder;
    pub mod simbox;
    pub mod topology;
    pub mod vector3d;
}

/// Reexported basic `venus2gmx` structures and traits.
pub mod prelude {
    pub use crate::convert::{ConvertConfig, Converter};
    pub use crate::files::FileType;
    pub use crate::io::g96_io::G96Writer;
    pub use crate::io::gro_io::GroWriter;
    pub use crate::io::traj_write::{OutputFiles, OutputLayout, TrajWrite};
    pub use crate::io::venus_io::{PhaseSpaceUnits, VenusParser};
    pub use crate::progress::{ProgressPrinter, ProgressStatus};
    pub use crate::structures::atom::Atom;
    pub use crate::structures::frame::Frame;
    pub use crate::structures::reorder::ReorderMap;
    pub use crate::structures::simbox::SimBox;
    pub use crate::structures::topology::{Topology, TopologySource};
    pub use crate::structures::vector3d::Vector3D;
}

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Convert VENUS96 output into gro or g96 trajectories.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser, ValueEnum};
use colored::Colorize;
use venus2gmx::errors::ConvertError;
use venus2gmx::prelude::*;

/// Output trajectory format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Gro,
    G96,
}

impl From<OutputFormat> for FileType {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Gro => FileType::GRO,
            OutputFormat::G96 => FileType::G96,
        }
    }
}

/// Convert the output of VENUS96 chemical dynamics simulations into gro or g96 trajectories.
#[derive(Parser, Debug)]
#[command(version, about)]
#[command(group(ArgGroup::new("layout").args(["no_split", "per_trajectory"])))]
struct Args {
    /// VENUS96 output file.
    #[arg(short = 'v', long = "venus")]
    venus: PathBuf,

    /// Template gro or g96 file providing atom names, residue names, title and simulation box.
    ///
    /// If not provided, atoms are named X1, X2, ... and placed in residue 1 MOL.
    #[arg(short = 't', long = "template")]
    template: Option<PathBuf>,

    /// Output trajectory path.
    ///
    /// Unless `--no-split` is used, the index of the frame (or the trajectory number)
    /// is inserted before the extension of the file.
    #[arg(short = 'o', long = "output", default_value = "traj.gro")]
    output: PathBuf,

    /// File with the permutation of atoms.
    ///
    /// Line `i` contains the (1-based) index of the VENUS96 atom
    /// that is placed at position `i` of the output.
    #[arg(short = 'r', long = "reorder")]
    reorder: Option<PathBuf>,

    /// Write all frames into a single file.
    #[arg(long = "no-split")]
    no_split: bool,

    /// Write the frames of each VENUS96 trajectory into a separate file.
    #[arg(long = "per-trajectory")]
    per_trajectory: bool,

    /// Output format. If not provided, the format is derived from the extension of the output file.
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Treat the last three columns of the phase space listing as velocities instead of momenta.
    #[arg(long = "velocities")]
    velocities: bool,

    /// Back up existing output files instead of overwriting them.
    #[arg(long = "backup")]
    backup: bool,

    /// Do not print the progress of the conversion.
    #[arg(long = "silent")]
    silent: bool,
}

impl Args {
    fn layout(&self) -> OutputLayout {
        match (self.no_split, self.per_trajectory) {
            (true, _) => OutputLayout::Single,
            (false, true) => OutputLayout::PerTrajectory,
            (false, false) => OutputLayout::PerFrame,
        }
    }

    /// Resolve the command line arguments into a conversion configuration.
    fn to_config(&self) -> ConvertConfig {
        let mut config = ConvertConfig::new(&self.venus)
            .with_output(&self.output)
            .with_layout(self.layout())
            .with_backup(self.backup);

        if let Some(template) = &self.template {
            config = config.with_template(template);
        }

        if let Some(reorder) = &self.reorder {
            config = config.with_reorder(reorder);
        }

        if let Some(format) = self.format {
            config = config.with_format(format.into());
        }

        if self.velocities {
            config = config.with_phase_space(PhaseSpaceUnits::Velocities);
        }

        config
    }
}

fn run(args: Args) -> Result<Vec<PathBuf>, ConvertError> {
    let converter = Converter::new(args.to_config());

    if args.silent {
        converter.run()
    } else {
        converter
            .print_progress(ProgressPrinter::new().with_print_freq(10))
            .run()
    }
}

fn main() {
    let args = Args::parse();
    let silent = args.silent;

    match run(args) {
        Ok(files) => {
            if !silent {
                eprintln!("Written {} file(s).", files.len());
            }
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(1);
        }
    }
}

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the conversion of VENUS96 output into gro or g96 trajectories.

use std::path::{Path, PathBuf};

use getset::{CopyGetters, Getters};

use crate::errors::{ConfigError, ConvertError};
use crate::files::FileType;
use crate::io::g96_io::G96Writer;
use crate::io::gro_io::GroWriter;
use crate::io::traj_write::{OutputFiles, OutputLayout, TrajWrite};
use crate::io::venus_io::{PhaseSpaceUnits, VenusParser};
use crate::progress::{ProgressPrinter, ProgressStatus};
use crate::structures::{frame::Frame, reorder::ReorderMap, topology::Topology};

/// Default path of the output trajectory.
pub const DEFAULT_OUTPUT: &str = "traj.gro";

/// Options of a single conversion.
///
/// ## Example
/// ```
/// # use venus2gmx::prelude::*;
/// # use std::path::Path;
/// #
/// let config = ConvertConfig::new("venus.out")
///     .with_template("methane.gro")
///     .with_output("methane.g96")
///     .with_layout(OutputLayout::Single);
///
/// assert_eq!(config.venus(), Path::new("venus.out"));
/// assert_eq!(config.resolve_format(), Ok(FileType::G96));
/// ```
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct ConvertConfig {
    /// VENUS96 output file.
    #[getset(get = "pub")]
    venus: PathBuf,
    /// Structure file providing the atom metadata, title and box.
    #[getset(get = "pub")]
    template: Option<PathBuf>,
    /// Path of the output trajectory. With layouts writing multiple files,
    /// the file names are derived from this path.
    #[getset(get = "pub")]
    output: PathBuf,
    /// File with the permutation of atoms.
    #[getset(get = "pub")]
    reorder: Option<PathBuf>,
    #[getset(get_copy = "pub")]
    layout: OutputLayout,
    /// Output format. If `None`, the format is derived from the extension of `output`.
    #[getset(get_copy = "pub")]
    format: Option<FileType>,
    #[getset(get_copy = "pub")]
    phase_space: PhaseSpaceUnits,
    /// Rename existing output files instead of overwriting them.
    #[getset(get_copy = "pub")]
    backup: bool,
}

impl ConvertConfig {
    /// Create a configuration for converting the given VENUS96 output file.
    ///
    /// By default, no template and no reorder map are used, every frame is written into
    /// a separate gro file derived from `traj.gro`, and the last three columns
    /// of the phase space listing are treated as momenta.
    pub fn new(venus: impl AsRef<Path>) -> Self {
        ConvertConfig {
            venus: venus.as_ref().to_path_buf(),
            template: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            reorder: None,
            layout: OutputLayout::default(),
            format: None,
            phase_space: PhaseSpaceUnits::default(),
            backup: false,
        }
    }

    /// Use a gro or g96 file as the template.
    pub fn with_template(mut self, template: impl AsRef<Path>) -> Self {
        self.template = Some(template.as_ref().to_path_buf());
        self
    }

    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = output.as_ref().to_path_buf();
        self
    }

    /// Use a reorder map file.
    pub fn with_reorder(mut self, reorder: impl AsRef<Path>) -> Self {
        self.reorder = Some(reorder.as_ref().to_path_buf());
        self
    }

    pub fn with_layout(mut self, layout: OutputLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Force the output format regardless of the extension of the output path.
    pub fn with_format(mut self, format: FileType) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_phase_space(mut self, units: PhaseSpaceUnits) -> Self {
        self.phase_space = units;
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    /// Get the format of the output trajectory.
    ///
    /// ## Returns
    /// The explicitly set format or the format derived from the extension of the output path.
    /// `ConfigError` if the format is not gro or g96.
    pub fn resolve_format(&self) -> Result<FileType, ConfigError> {
        match self.format {
            Some(FileType::Unknown) => Err(ConfigError::UnsupportedOutputFormat(String::from(
                "unknown",
            ))),
            Some(format) => Ok(format),
            None => match FileType::from_name(&self.output) {
                FileType::Unknown => Err(ConfigError::UnknownOutputFormat(Box::from(
                    self.output.as_path(),
                ))),
                format => Ok(format),
            },
        }
    }
}

/// Last frame that entered the conversion.
#[derive(Debug, Clone, Copy, Default)]
struct FrameStamp {
    index: usize,
    trajectory: usize,
    cycle: u64,
    time: f64,
}

impl From<&Frame> for FrameStamp {
    fn from(frame: &Frame) -> Self {
        FrameStamp {
            index: frame.index(),
            trajectory: frame.trajectory(),
            cycle: frame.cycle(),
            time: frame.time(),
        }
    }
}

/// Converts a VENUS96 output file according to a `ConvertConfig`.
pub struct Converter {
    config: ConvertConfig,
    printer: Option<ProgressPrinter>,
    last: Option<FrameStamp>,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Converter {
            config,
            printer: None,
            last: None,
        }
    }

    /// Report the progress of the conversion using the provided printer.
    pub fn print_progress(mut self, printer: ProgressPrinter) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Run the conversion.
    ///
    /// ## Returns
    /// Paths of all written files in the order in which they were created.
    /// `ConvertError` identifying the failed stage of the conversion otherwise.
    ///
    /// ## Example
    /// Convert a VENUS96 output into a single g96 trajectory, reordering the atoms
    /// to match the order of the template.
    /// ```no_run
    /// # use venus2gmx::prelude::*;
    /// #
    /// let config = ConvertConfig::new("venus.out")
    ///     .with_template("methane.g96")
    ///     .with_reorder("reorder.txt")
    ///     .with_output("methane_traj.g96")
    ///     .with_layout(OutputLayout::Single);
    ///
    /// match Converter::new(config).run() {
    ///     Ok(files) => println!("Written {} file(s).", files.len()),
    ///     Err(e) => eprintln!("{}", e),
    /// }
    /// ```
    ///
    /// ## Notes
    /// - The VENUS96 output must contain as many atoms as the template and the reorder map.
    /// - If an error occurs while writing, the files written so far are kept.
    pub fn run(mut self) -> Result<Vec<PathBuf>, ConvertError> {
        let result = self.convert();

        if let Some(printer) = self.printer.as_mut() {
            let stamp = self.last.unwrap_or_default();

            printer.set_status(match result {
                Ok(_) => ProgressStatus::Completed,
                Err(_) => ProgressStatus::Failed,
            });
            printer.print(stamp.index, stamp.trajectory, stamp.cycle, stamp.time);
        }

        result
    }

    fn convert(&mut self) -> Result<Vec<PathBuf>, ConvertError> {
        let format = self.config.resolve_format()?;

        let template = match &self.config.template {
            Some(path) => Some(Topology::from_file(path)?),
            None => None,
        };

        let reorder = match &self.config.reorder {
            Some(path) => Some(ReorderMap::from_file(path)?),
            None => None,
        };

        if let (Some(topology), Some(map)) = (&template, &reorder) {
            if topology.get_n_atoms() != map.get_n_atoms() {
                return Err(ConvertError::DimensionMismatch(format!(
                    "template contains {} atoms but reorder map contains {} indices",
                    topology.get_n_atoms(),
                    map.get_n_atoms()
                )));
            }
        }

        // the reorder map is validated against the parsed frames, not used to parse them
        let mut parser = VenusParser::new().with_units(self.config.phase_space);
        if let Some(topology) = &template {
            parser = parser.with_expected_atoms(topology.get_n_atoms());
        }

        let frames = parser.parse_file(&self.config.venus)?;
        // the parser guarantees that all frames have the same number of atoms
        let n_atoms = frames[0].get_n_atoms();

        let topology = template.unwrap_or_else(|| Topology::synthesized(n_atoms));
        if topology.get_n_atoms() != n_atoms {
            return Err(ConvertError::DimensionMismatch(format!(
                "template contains {} atoms but VENUS96 output contains {} atoms",
                topology.get_n_atoms(),
                n_atoms
            )));
        }

        let map = reorder.unwrap_or_else(|| ReorderMap::identity(n_atoms));
        map.check_n_atoms(n_atoms)?;

        match format {
            FileType::GRO => self.write_frames::<GroWriter>(&frames, &topology, &map),
            FileType::G96 => self.write_frames::<G96Writer>(&frames, &topology, &map),
            FileType::Unknown => Err(ConfigError::UnsupportedOutputFormat(String::from(
                "unknown",
            ))
            .into()),
        }
    }

    /// Reorder and write all frames.
    fn write_frames<Writer: TrajWrite>(
        &mut self,
        frames: &[Frame],
        topology: &Topology,
        map: &ReorderMap,
    ) -> Result<Vec<PathBuf>, ConvertError> {
        let mut output =
            OutputFiles::<Writer>::new(&self.config.output, self.config.layout, self.config.backup);

        for frame in frames {
            self.last = Some(FrameStamp::from(frame));

            if map.is_identity() {
                output.write_frame(frame, topology)?;
            } else {
                output.write_frame(&map.apply(frame)?, topology)?;
            }

            if let Some(printer) = self.printer.as_mut() {
                printer.print(
                    frame.index(),
                    frame.trajectory(),
                    frame.cycle(),
                    frame.time(),
                );
            }
        }

        Ok(output.finish()?)
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ParseReorderError, ParseTemplateError, ParseVenusError};
    use crate::io::g96_io::read_g96_frames;
    use crate::io::gro_io::read_gro_frames;
    use float_cmp::assert_approx_eq;
    use std::fs::File;
    use tempfile::{NamedTempFile, TempDir};

    const VENUS: &str = "test_files/venus_5atoms.out";

    #[test]
    fn resolve_format() {
        assert_eq!(ConvertConfig::new(VENUS).resolve_format(), Ok(FileType::GRO));
        assert_eq!(
            ConvertConfig::new(VENUS)
                .with_output("traj.g96")
                .resolve_format(),
            Ok(FileType::G96)
        );
        assert_eq!(
            ConvertConfig::new(VENUS)
                .with_output("traj")
                .with_format(FileType::G96)
                .resolve_format(),
            Ok(FileType::G96)
        );
        assert_eq!(
            ConvertConfig::new(VENUS)
                .with_output("traj.xtc")
                .resolve_format(),
            Err(ConfigError::UnknownOutputFormat(Box::from(Path::new(
                "traj.xtc"
            ))))
        );
        assert!(matches!(
            ConvertConfig::new(VENUS)
                .with_format(FileType::Unknown)
                .resolve_format(),
            Err(ConfigError::UnsupportedOutputFormat(_))
        ));
    }

    #[test]
    fn config_defaults() {
        let config = ConvertConfig::new(VENUS);

        assert_eq!(config.venus(), Path::new(VENUS));
        assert!(config.template().is_none());
        assert!(config.reorder().is_none());
        assert_eq!(config.output(), Path::new("traj.gro"));
        assert_eq!(config.layout(), OutputLayout::PerFrame);
        assert!(config.format().is_none());
        assert_eq!(config.phase_space(), PhaseSpaceUnits::Momenta);
        assert!(!config.backup());
    }

    #[test]
    fn convert_template_reorder_single() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("methane.gro");

        let config = ConvertConfig::new(VENUS)
            .with_template("test_files/methane.gro")
            .with_reorder("test_files/reorder_5.txt")
            .with_output(&output)
            .with_layout(OutputLayout::Single);

        let written = Converter::new(config).run().unwrap();
        assert_eq!(written, vec![output.clone()]);

        let mut result = File::open(&output).unwrap();
        let mut expected = File::open("test_files/venus_5atoms_methane.gro").unwrap();
        assert!(file_diff::diff_files(&mut result, &mut expected));

        let structures = read_gro_frames(&output).unwrap();
        assert_eq!(structures.len(), 5);

        // carbon is the last atom in VENUS96 and the first atom in the template
        for structure in structures.iter() {
            assert_eq!(structure.atoms[0].get_atom_name(), "C");
        }
        assert_approx_eq!(f64, structures[0].positions[0].x, 0.0);
        assert_approx_eq!(f64, structures[0].positions[1].x, 0.063);
    }

    #[test]
    fn convert_per_frame() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("frame.gro");

        let config = ConvertConfig::new(VENUS)
            .with_template("test_files/methane.gro")
            .with_reorder("test_files/reorder_5.txt")
            .with_output(&output);

        let written = Converter::new(config).run().unwrap();

        assert_eq!(written.len(), 5);
        for (i, path) in written.iter().enumerate() {
            assert_eq!(*path, directory.path().join(format!("frame_{}.gro", i)));

            let structures = read_gro_frames(path).unwrap();
            assert_eq!(structures.len(), 1);
            assert_eq!(structures[0].atoms.len(), 5);
        }

        assert_eq!(
            read_gro_frames(&written[3]).unwrap()[0].title,
            "Methane Traj 2, t= 0.0000 ps"
        );
    }

    #[test]
    fn convert_per_trajectory() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("traj.g96");

        let config = ConvertConfig::new(VENUS)
            .with_output(&output)
            .with_layout(OutputLayout::PerTrajectory);

        let written = Converter::new(config).run().unwrap();

        assert_eq!(
            written,
            vec![
                directory.path().join("traj_1.g96"),
                directory.path().join("traj_2.g96")
            ]
        );
        assert_eq!(read_g96_frames(&written[0]).unwrap().len(), 3);
        assert_eq!(read_g96_frames(&written[1]).unwrap().len(), 2);
    }

    #[test]
    fn convert_without_template() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("traj.gro");

        let config = ConvertConfig::new(VENUS)
            .with_output(&output)
            .with_layout(OutputLayout::Single);

        Converter::new(config).run().unwrap();

        let structures = read_gro_frames(&output).unwrap();
        assert_eq!(structures.len(), 5);

        for structure in structures.iter() {
            assert!(structure.simbox.is_none());
            for (i, atom) in structure.atoms.iter().enumerate() {
                assert_eq!(atom.get_residue_number(), 1);
                assert_eq!(atom.get_residue_name(), "MOL");
                assert_eq!(atom.get_atom_name(), format!("X{}", i + 1));
                assert_eq!(atom.get_atom_number(), i + 1);
            }
        }

        assert_eq!(structures[1].title, "VENUS96 trajectory Traj 1, t= 0.1000 ps");
        // no reordering: carbon is the last atom
        assert_approx_eq!(f64, structures[1].positions[4].x, 0.0015, epsilon = 1e-3);
    }

    #[test]
    fn convert_roundtrip_precision() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("traj.gro");

        let config = ConvertConfig::new(VENUS)
            .with_output(&output)
            .with_layout(OutputLayout::Single);

        Converter::new(config).run().unwrap();

        let frames = VenusParser::new().parse_file(VENUS).unwrap();
        let structures = read_gro_frames(&output).unwrap();

        assert_eq!(frames.len(), structures.len());
        for (frame, structure) in frames.iter().zip(structures.iter()) {
            // positions are written with 3 decimal places, velocities with 4
            for (original, read) in frame.positions().iter().zip(structure.positions.iter()) {
                assert!(original.distance(read) < 1e-3);
            }

            let velocities = structure.velocities.as_ref().unwrap();
            for (original, read) in frame.velocities().iter().zip(velocities.iter()) {
                assert!(original.distance(read) < 1e-4);
            }
        }
    }

    #[test]
    fn convert_velocities_units() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("traj.g96");

        let config = ConvertConfig::new(VENUS)
            .with_output(&output)
            .with_layout(OutputLayout::Single)
            .with_phase_space(PhaseSpaceUnits::Velocities);

        Converter::new(config).run().unwrap();

        let structures = read_g96_frames(&output).unwrap();
        let velocities = structures[0].velocities.as_ref().unwrap();

        // 10.0 * 0.24010, mass is ignored
        assert_approx_eq!(f64, velocities[4].x, 2.401, epsilon = 1e-8);
    }

    #[test]
    fn convert_no_frames() {
        let directory = TempDir::new().unwrap();
        let output = directory.path().join("traj.gro");

        let config = ConvertConfig::new("test_files/venus_no_frames.out")
            .with_output(&output)
            .with_layout(OutputLayout::Single);

        assert_eq!(
            Converter::new(config).run(),
            Err(ConvertError::Venus(ParseVenusError::NoFramesFound))
        );

        assert_eq!(std::fs::read_dir(directory.path()).unwrap().count(), 0);
    }

    #[test]
    fn convert_unknown_format() {
        let directory = TempDir::new().unwrap();

        let config =
            ConvertConfig::new(VENUS).with_output(directory.path().join("traj.xtc"));

        assert!(matches!(
            Converter::new(config).run(),
            Err(ConvertError::Configuration(
                ConfigError::UnknownOutputFormat(_)
            ))
        ));
    }

    #[test]
    fn convert_template_mismatch() {
        let directory = TempDir::new().unwrap();

        let config = ConvertConfig::new("test_files/venus_5atoms.out")
            .with_template("test_files/methane.gro")
            .with_output(directory.path().join("traj.gro"));

        // reorder map for 3 atoms
        let reorder = NamedTempFile::new().unwrap();
        std::fs::write(reorder.path(), "2\n1\n3\n").unwrap();

        let config = config.with_reorder(reorder.path());

        assert!(matches!(
            Converter::new(config).run(),
            Err(ConvertError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn convert_reorder_length_mismatch() {
        let directory = TempDir::new().unwrap();

        let reorder = NamedTempFile::new().unwrap();
        std::fs::write(reorder.path(), "2\n1\n3\n").unwrap();

        let config = ConvertConfig::new(VENUS)
            .with_reorder(reorder.path())
            .with_output(directory.path().join("traj.gro"));

        assert_eq!(
            Converter::new(config).run(),
            Err(ConvertError::Reorder(ParseReorderError::LengthMismatch {
                map: 3,
                atoms: 5
            }))
        );

        assert!(std::fs::read_dir(directory.path()).unwrap().next().is_none());
    }

    #[test]
    fn convert_reorder_length_mismatch_undeclared_atoms() {
        let directory = TempDir::new().unwrap();

        // VENUS96 output without the `NUMBER OF ATOMS` line
        let venus = NamedTempFile::new().unwrap();
        let content = std::fs::read_to_string(VENUS)
            .unwrap()
            .lines()
            .filter(|line| !line.contains("NUMBER OF ATOMS"))
            .collect::<Vec<&str>>()
            .join("\n");
        std::fs::write(venus.path(), content + "\n").unwrap();

        let reorder = NamedTempFile::new().unwrap();
        std::fs::write(reorder.path(), "2\n1\n3\n").unwrap();

        let config = ConvertConfig::new(venus.path())
            .with_reorder(reorder.path())
            .with_output(directory.path().join("traj.gro"));

        assert_eq!(
            Converter::new(config).run(),
            Err(ConvertError::Reorder(ParseReorderError::LengthMismatch {
                map: 3,
                atoms: 5
            }))
        );
    }

    #[test]
    fn convert_invalid_reorder() {
        let config = ConvertConfig::new(VENUS).with_reorder("test_files/reorder_duplicate.txt");

        assert!(matches!(
            Converter::new(config).run(),
            Err(ConvertError::Reorder(ParseReorderError::Duplicate(_)))
        ));
    }

    #[test]
    fn convert_missing_template() {
        let config = ConvertConfig::new(VENUS).with_template("test_files/nonexistent.gro");

        assert!(matches!(
            Converter::new(config).run(),
            Err(ConvertError::Template(ParseTemplateError::Gro(_)))
        ));
    }

    #[test]
    fn convert_progress() {
        let directory = TempDir::new().unwrap();
        let log = NamedTempFile::new().unwrap();
        let path_to_log = log.path().to_owned();

        // the converter drops the printer, so the printer gets its own handle
        let printer = ProgressPrinter::new()
            .with_output(Box::from(log.reopen().unwrap()))
            .with_print_freq(1)
            .with_colored(false)
            .with_terminating("\n");

        let config = ConvertConfig::new(VENUS)
            .with_output(directory.path().join("traj.gro"))
            .with_layout(OutputLayout::Single);

        Converter::new(config)
            .print_progress(printer)
            .run()
            .unwrap();

        let content = std::fs::read_to_string(path_to_log).unwrap();
        let lines = content.lines().collect::<Vec<&str>>();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("[ RUNNING ]   Traj      1 | Cycle            0"));
        assert!(lines[4].starts_with("[ RUNNING ]   Traj      2 | Cycle          100"));
        assert!(lines[5].starts_with("[COMPLETED]   Traj      2 | Cycle          100"));
    }

    #[test]
    fn convert_progress_failed() {
        let log = NamedTempFile::new().unwrap();
        let path_to_log = log.path().to_owned();

        // the converter drops the printer, so the printer gets its own handle
        let printer = ProgressPrinter::new()
            .with_output(Box::from(log.reopen().unwrap()))
            .with_colored(false)
            .with_terminating("\n");

        let config = ConvertConfig::new("test_files/venus_no_frames.out");

        assert!(Converter::new(config).print_progress(printer).run().is_err());

        let content = std::fs::read_to_string(path_to_log).unwrap();
        assert!(content.starts_with("[ FAILED! ]"));
    }
}

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Traits and structures for writing trajectory files.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use hashbrown::HashSet;

use crate::errors::WriteTrajError;
use crate::structures::{frame::Frame, topology::Topology};

/// Distribution of the converted frames into output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// Every frame is written into a separate file named `<stem>_<frame index>.<extension>`.
    #[default]
    PerFrame,
    /// All frames are written into the output file.
    Single,
    /// Frames of each VENUS96 trajectory are written into a file named `<stem>_<trajectory number>.<extension>`.
    ///
    /// The trajectory number is the 1-based number printed by VENUS96 in the `TRAJECTORY NUMBER` line,
    /// not the position of the trajectory in the output. The first trajectory is therefore written
    /// into `<stem>_1.<extension>`, not `<stem>_0.<extension>`.
    PerTrajectory,
}

impl OutputLayout {
    /// Get the path of the file into which `frame` should be written.
    ///
    /// ## Example
    /// ```
    /// # use std::path::{Path, PathBuf};
    /// # use venus2gmx::prelude::*;
    /// #
    /// let frame = Frame::new(7, 2, 700, 7.0, vec![], vec![]);
    /// let output = Path::new("output/traj.gro");
    ///
    /// assert_eq!(OutputLayout::Single.output_path(output, &frame), PathBuf::from("output/traj.gro"));
    /// assert_eq!(OutputLayout::PerFrame.output_path(output, &frame), PathBuf::from("output/traj_7.gro"));
    /// assert_eq!(OutputLayout::PerTrajectory.output_path(output, &frame), PathBuf::from("output/traj_2.gro"));
    /// ```
    pub fn output_path(&self, output: &Path, frame: &Frame) -> PathBuf {
        match self {
            OutputLayout::Single => output.to_path_buf(),
            OutputLayout::PerFrame => indexed_path(output, frame.index()),
            OutputLayout::PerTrajectory => indexed_path(output, frame.trajectory()),
        }
    }
}

/// Insert `_<index>` between the stem and the extension of the path.
fn indexed_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match path.extension() {
        Some(extension) => format!("{}_{}.{}", stem, index, extension.to_string_lossy()),
        None => format!("{}_{}", stem, index),
    };

    path.with_file_name(name)
}

/// Get the GROMACS-style backup name `#<name>.<n>#` for a file. `n` is the lowest free number.
fn backup_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_string_lossy().into_owned();

    (1..)
        .map(|n| path.with_file_name(format!("#{}.{}#", name, n)))
        .find(|candidate| !candidate.exists())
}

/// Rename an existing file to its backup name.
/// Returns the backup path or `None` if there was nothing to back up.
pub(crate) fn back_up(path: &Path) -> Result<Option<PathBuf>, WriteTrajError> {
    if !path.exists() {
        return Ok(None);
    }

    let backup =
        backup_path(path).ok_or_else(|| WriteTrajError::CouldNotBackup(Box::from(path)))?;
    fs::rename(path, &backup).map_err(|_| WriteTrajError::CouldNotBackup(Box::from(path)))?;

    Ok(Some(backup))
}

/// Open a file for writing, either truncating it or appending to it.
pub(crate) fn open_output(path: &Path, append: bool) -> Result<File, WriteTrajError> {
    let result = if append {
        OpenOptions::new().append(true).open(path)
    } else {
        File::create(path)
    };

    result.map_err(|_| WriteTrajError::CouldNotCreate(Box::from(path)))
}

/// Trait implemented by all trajectory writers.
pub trait TrajWrite: PrivateTrajWrite {}

/// Trait containing private methods implemented by all trajectory writers.
pub trait PrivateTrajWrite {
    /// Open the file for writing.
    /// If `append` is `true`, frames are appended to the existing content of the file.
    fn new(filename: impl AsRef<Path>, append: bool) -> Result<Self, WriteTrajError>
    where
        Self: Sized;

    /// Write a frame into the open trajectory file.
    fn write_frame(&mut self, frame: &Frame, topology: &Topology) -> Result<(), WriteTrajError>;

    /// Flush all buffered frames into the file.
    fn flush(&mut self) -> Result<(), WriteTrajError>;
}

/// Writes frames into one or more trajectory files according to an `OutputLayout`.
///
/// Only one file is open at a time. Each file is flushed before the next one is opened.
///
/// ## Example
/// Write all frames of a VENUS96 output into a single gro file.
/// ```no_run
/// # use venus2gmx::prelude::*;
/// #
/// let frames = VenusParser::new().parse_file("venus.out").unwrap();
/// let topology = Topology::synthesized(frames[0].get_n_atoms());
///
/// let mut output = OutputFiles::<GroWriter>::new("traj.gro", OutputLayout::Single, false);
/// for frame in frames.iter() {
///     output.write_frame(frame, &topology).unwrap();
/// }
///
/// let written = output.finish().unwrap();
/// assert_eq!(written.len(), 1);
/// ```
pub struct OutputFiles<Writer: TrajWrite> {
    output: PathBuf,
    layout: OutputLayout,
    backup: bool,
    current: Option<(PathBuf, Writer)>,
    written: Vec<PathBuf>,
    opened: HashSet<PathBuf>,
}

impl<Writer: TrajWrite> OutputFiles<Writer> {
    /// Prepare writing into files derived from `output`.
    /// No file is created until the first frame is written.
    ///
    /// If `backup` is `true`, existing files are renamed to `#<name>.<n>#` instead of being overwritten.
    pub fn new(output: impl AsRef<Path>, layout: OutputLayout, backup: bool) -> Self {
        OutputFiles {
            output: output.as_ref().to_path_buf(),
            layout,
            backup,
            current: None,
            written: Vec::new(),
            opened: HashSet::new(),
        }
    }

    /// Write a frame into the file given by the output layout.
    ///
    /// ## Returns
    /// `Ok` if writing has been successful. Otherwise `WriteTrajError`.
    pub fn write_frame(&mut self, frame: &Frame, topology: &Topology) -> Result<(), WriteTrajError> {
        let path = self.layout.output_path(&self.output, frame);

        let reuse = matches!(&self.current, Some((current, _)) if *current == path);
        if !reuse {
            self.switch_file(path)?;
        }

        let (_, writer) = self.current.as_mut().expect(
            "FATAL VENUS2GMX ERROR | OutputFiles::write_frame | Output file should be open.",
        );

        writer.write_frame(frame, topology)
    }

    /// Close the last open file.
    ///
    /// ## Returns
    /// Paths of all written files in the order in which they were first opened.
    pub fn finish(mut self) -> Result<Vec<PathBuf>, WriteTrajError> {
        if let Some((_, mut writer)) = self.current.take() {
            writer.flush()?;
        }

        Ok(self.written)
    }

    /// Flush and close the current file and open the file at `path`.
    fn switch_file(&mut self, path: PathBuf) -> Result<(), WriteTrajError> {
        if let Some((_, mut writer)) = self.current.take() {
            writer.flush()?;
        }

        // a file that was already written into during this conversion is never truncated
        let append = self.opened.contains(&path);

        if !append && self.backup {
            back_up(&path)?;
        }

        let writer = Writer::new(&path, append)?;

        if !append {
            self.opened.insert(path.clone());
            self.written.push(path.clone());
        }

        self.current = Some((path, writer));
        Ok(())
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Enum capturing file types supported by `venus2gmx`.

use std::path::Path;

/// Types of structure and trajectory files supported by `venus2gmx`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileType {
    Unknown,
    GRO,
    G96,
}

impl FileType {
    /// Identify file type from the name of the file (based on file extension).
    pub fn from_name(filename: impl AsRef<Path>) -> FileType {
        let extension = match filename.as_ref().extension() {
            Some(x) => x,
            None => return FileType::Unknown,
        };

        match extension.to_str() {
            Some("gro") => FileType::GRO,
            Some("g96") => FileType::G96,
            Some(_) | None => FileType::Unknown,
        }
    }

    /// Get the file extension associated with the file type.
    /// Returns `None` for `FileType::Unknown`.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            FileType::GRO => Some("gro"),
            FileType::G96 => Some("g96"),
            FileType::Unknown => None,
        }
    }
}

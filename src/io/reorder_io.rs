// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of functions for reading reorder map files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::errors::ParseReorderError;
use crate::structures::reorder::ReorderMap;

/// ## Methods for reading reorder map files.
impl ReorderMap {
    /// Read a reorder map file.
    ///
    /// The file contains one 1-based atom index per line.
    /// Line `i` of the file specifies which VENUS96 atom should be placed at position `i` of the output.
    ///
    /// ## Returns
    /// - `ReorderMap` if the file could be read and describes a valid permutation.
    /// - `ParseReorderError::FileNotFound` if the file does not exist.
    /// - `ParseReorderError::ParseLineErr` if any line could not be parsed as an index.
    /// - `ParseReorderError::Duplicate` or `ParseReorderError::OutOfRange` if the indices are not a permutation.
    ///
    /// ## Example
    /// ```no_run
    /// # use venus2gmx::prelude::*;
    /// #
    /// let map = match ReorderMap::from_file("reorder.txt") {
    ///     Ok(x) => x,
    ///     Err(e) => {
    ///         eprintln!("{}", e);
    ///         return;
    ///     }
    /// };
    /// ```
    ///
    /// ## Notes
    /// - Empty lines and lines starting with `#` are skipped.
    /// - The number of atoms is not checked here, use `ReorderMap::check_n_atoms`.
    pub fn from_file(filename: impl AsRef<Path>) -> Result<ReorderMap, ParseReorderError> {
        let file = match File::open(filename.as_ref()) {
            Ok(x) => x,
            Err(_) => return Err(ParseReorderError::FileNotFound(Box::from(filename.as_ref()))),
        };

        let buffer = BufReader::new(file);
        let mut indices = Vec::new();

        for raw_line in buffer.lines() {
            let line = match raw_line {
                Ok(x) => x,
                Err(_) => {
                    return Err(ParseReorderError::LineNotFound(Box::from(
                        filename.as_ref(),
                    )))
                }
            };

            let trimmed = line.trim();

            // skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            indices.push(parse_reorder_line(trimmed)?);
        }

        ReorderMap::from_one_based(indices)
    }
}

/// Parse a line of a reorder map file as a single 1-based atom index.
fn parse_reorder_line(line: &str) -> Result<usize, ParseReorderError> {
    line.parse::<usize>()
        .map_err(|_| ParseReorderError::ParseLineErr(line.to_string()))
}

/******************************/
/*         UNIT TESTS         */
/******************************/

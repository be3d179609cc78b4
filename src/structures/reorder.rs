// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the ReorderMap structure used to permute atoms of trajectory frames.

use hashbrown::HashSet;

use crate::errors::{ParseReorderError, ReorderError};
use crate::structures::frame::Frame;

/// Permutation of atoms from the VENUS96 order into the order of the template.
///
/// Item at position `i` holds the (0-based) index of the VENUS96 atom
/// that is placed at position `i` of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderMap {
    order: Vec<usize>,
}

impl ReorderMap {
    /// Create a reorder map that does not change the order of atoms.
    pub fn identity(n_atoms: usize) -> Self {
        ReorderMap {
            order: (0..n_atoms).collect(),
        }
    }

    /// Create a reorder map from 0-based atom indices.
    ///
    /// ## Returns
    /// `ReorderMap` if `order` is a permutation of `0..order.len()`.
    /// Otherwise `ParseReorderError::Duplicate` or `ParseReorderError::OutOfRange`.
    ///
    /// ## Notes
    /// - Indices in the returned errors are 1-based, i.e. they correspond
    ///   to the indices written in a reorder map file.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// #
    /// let map = ReorderMap::new(vec![4, 0, 1, 2, 3]).unwrap();
    /// assert_eq!(map.get_n_atoms(), 5);
    ///
    /// assert!(ReorderMap::new(vec![0, 1, 1]).is_err());
    /// ```
    pub fn new(order: Vec<usize>) -> Result<Self, ParseReorderError> {
        let n_atoms = order.len();
        let mut seen = HashSet::with_capacity(n_atoms);

        for &index in order.iter() {
            if index >= n_atoms {
                return Err(ParseReorderError::OutOfRange {
                    index: index + 1,
                    atoms: n_atoms,
                });
            }

            if !seen.insert(index) {
                return Err(ParseReorderError::Duplicate(index + 1));
            }
        }

        Ok(ReorderMap { order })
    }

    /// Create a reorder map from 1-based atom indices, as written in reorder map files.
    pub fn from_one_based(indices: Vec<usize>) -> Result<Self, ParseReorderError> {
        let n_atoms = indices.len();
        let order = indices
            .into_iter()
            .map(|index| match index {
                0 => Err(ParseReorderError::OutOfRange {
                    index,
                    atoms: n_atoms,
                }),
                _ => Ok(index - 1),
            })
            .collect::<Result<Vec<usize>, ParseReorderError>>()?;

        ReorderMap::new(order)
    }

    /// Get the number of atoms the reorder map applies to.
    pub fn get_n_atoms(&self) -> usize {
        self.order.len()
    }

    /// Get the underlying 0-based permutation.
    pub fn get_order(&self) -> &[usize] {
        &self.order
    }

    /// Check that the reorder map describes a system with `n_atoms` atoms.
    ///
    /// ## Returns
    /// `Ok` if the number of atoms matches. Otherwise `ParseReorderError::LengthMismatch`.
    pub fn check_n_atoms(&self, n_atoms: usize) -> Result<(), ParseReorderError> {
        if self.order.len() != n_atoms {
            return Err(ParseReorderError::LengthMismatch {
                map: self.order.len(),
                atoms: n_atoms,
            });
        }

        Ok(())
    }

    /// Check whether the reorder map keeps all atoms in place.
    pub fn is_identity(&self) -> bool {
        self.order
            .iter()
            .enumerate()
            .all(|(target, &source)| target == source)
    }

    /// Construct the inverse permutation.
    /// Applying a map and then its inverse restores the original frame.
    pub fn inverse(&self) -> ReorderMap {
        let mut inverse = vec![0; self.order.len()];
        for (target, &source) in self.order.iter().enumerate() {
            inverse[source] = target;
        }

        ReorderMap { order: inverse }
    }

    /// Reorder atoms of a frame.
    ///
    /// ## Returns
    /// New `Frame` in which atom `i` is atom `map[i]` of the original frame.
    /// `ReorderError::DimensionMismatch` if the frame has a different number of atoms than the map.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// #
    /// let frame = Frame::new(
    ///     0, 1, 0, 0.0,
    ///     vec![[1.0, 0.0, 0.0].into(), [2.0, 0.0, 0.0].into()],
    ///     vec![Vector3D::default(), Vector3D::default()],
    /// );
    ///
    /// let map = ReorderMap::from_one_based(vec![2, 1]).unwrap();
    /// let reordered = map.apply(&frame).unwrap();
    ///
    /// assert_eq!(reordered.positions()[0].x, 2.0);
    /// assert_eq!(reordered.positions()[1].x, 1.0);
    /// ```
    pub fn apply(&self, frame: &Frame) -> Result<Frame, ReorderError> {
        if frame.get_n_atoms() != self.order.len() {
            return Err(ReorderError::DimensionMismatch {
                map: self.order.len(),
                frame: frame.get_n_atoms(),
            });
        }

        Ok(frame.permuted(&self.order))
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

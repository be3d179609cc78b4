// Released under MIT License.
// Copyright (c) 2026 Ladislav Bartos

//! Implementation of the Frame structure holding a single trajectory snapshot.

use getset::{CopyGetters, Getters};

use crate::structures::vector3d::Vector3D;

/// A single snapshot of a VENUS96 trajectory.
///
/// Positions are in nm, velocities are in nm/ps.
/// Both vectors always contain one item per atom.
#[derive(Debug, Clone, PartialEq, Getters, CopyGetters)]
pub struct Frame {
    /// Index of the frame in the VENUS96 output (starting from 0).
    #[getset(get_copy = "pub")]
    index: usize,
    /// Number of the VENUS96 trajectory this frame belongs to (starting from 1).
    #[getset(get_copy = "pub")]
    trajectory: usize,
    /// Integration cycle of the frame.
    #[getset(get_copy = "pub")]
    cycle: u64,
    /// Simulation time of the frame (in ps).
    #[getset(get_copy = "pub")]
    time: f64,
    #[getset(get = "pub")]
    positions: Vec<Vector3D>,
    #[getset(get = "pub")]
    velocities: Vec<Vector3D>,
}

impl Frame {
    /// Create a new frame.
    ///
    /// ## Panics
    /// Panics if `positions` and `velocities` have different lengths.
    pub fn new(
        index: usize,
        trajectory: usize,
        cycle: u64,
        time: f64,
        positions: Vec<Vector3D>,
        velocities: Vec<Vector3D>,
    ) -> Self {
        if positions.len() != velocities.len() {
            panic!("FATAL VENUS2GMX ERROR | Frame::new | Number of positions does not match the number of velocities.");
        }

        Frame {
            index,
            trajectory,
            cycle,
            time,
            positions,
            velocities,
        }
    }

    /// Get the number of atoms in the frame.
    pub fn get_n_atoms(&self) -> usize {
        self.positions.len()
    }

    /// Compose the title of the frame written into the output files.
    ///
    /// ## Example
    /// ```
    /// # use venus2gmx::prelude::*;
    /// #
    /// let frame = Frame::new(0, 3, 100, 1.25, vec![], vec![]);
    /// assert_eq!(frame.make_title("Methane"), "Methane Traj 3, t= 1.2500 ps");
    /// ```
    pub fn make_title(&self, title: &str) -> String {
        format!("{} Traj {}, t= {:.4} ps", title, self.trajectory, self.time)
    }

    /// Create a copy of this frame with atoms taken in the order given by `order`.
    /// Atom at position `i` of the new frame is atom `order[i]` of this frame.
    ///
    /// ## Panics
    /// Panics if any index in `order` is out of range.
    pub(crate) fn permuted(&self, order: &[usize]) -> Frame {
        Frame {
            positions: order.iter().map(|&source| self.positions[source]).collect(),
            velocities: order.iter().map(|&source| self.velocities[source]).collect(),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame() -> Frame {
        Frame::new(
            3,
            2,
            150,
            1.5,
            vec![
                [0.1, 0.2, 0.3].into(),
                [1.1, 1.2, 1.3].into(),
                [2.1, 2.2, 2.3].into(),
            ],
            vec![
                [-0.1, -0.2, -0.3].into(),
                [-1.1, -1.2, -1.3].into(),
                [-2.1, -2.2, -2.3].into(),
            ],
        )
    }

    #[test]
    fn getters() {
        let frame = make_frame();

        assert_eq!(frame.index(), 3);
        assert_eq!(frame.trajectory(), 2);
        assert_eq!(frame.cycle(), 150);
        assert_eq!(frame.time(), 1.5);
        assert_eq!(frame.get_n_atoms(), 3);
        assert_eq!(frame.positions()[1], Vector3D::new(1.1, 1.2, 1.3));
        assert_eq!(frame.velocities()[2], Vector3D::new(-2.1, -2.2, -2.3));
    }

    #[test]
    fn make_title() {
        let frame = make_frame();
        assert_eq!(frame.make_title("Test"), "Test Traj 2, t= 1.5000 ps");
    }

    #[test]
    #[should_panic]
    fn new_mismatched() {
        Frame::new(0, 1, 0, 0.0, vec![Vector3D::default()], vec![]);
    }

    #[test]
    fn permuted() {
        let frame = make_frame();
        let permuted = frame.permuted(&[2, 0, 1]);

        assert_eq!(permuted.index(), 3);
        assert_eq!(permuted.trajectory(), 2);
        assert_eq!(permuted.positions()[0], frame.positions()[2]);
        assert_eq!(permuted.positions()[1], frame.positions()[0]);
        assert_eq!(permuted.positions()[2], frame.positions()[1]);
        assert_eq!(permuted.velocities()[0], frame.velocities()[2]);
        assert_eq!(permuted.velocities()[1], frame.velocities()[0]);
        assert_eq!(permuted.velocities()[2], frame.velocities()[1]);
    }
}

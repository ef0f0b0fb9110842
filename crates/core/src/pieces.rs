//! Pieces module - tetromino shape matrices and the rotation kick ladder
//!
//! Every piece is a square boolean matrix (2x2, 3x3 or 4x4). Rotation turns the
//! matrix 90° clockwise inside its own frame and then tries a fixed ladder of
//! horizontal nudges until the rotated shape fits.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, KICK_OFFSETS, MAX_SHAPE_SIZE};

/// Offset of a single mino relative to the shape's top-left corner
pub type MinoOffset = (i8, i8);

/// Upper bound on occupied cells in a shape matrix
pub const MAX_MINOS: usize = MAX_SHAPE_SIZE * MAX_SHAPE_SIZE;

/// A square occupancy matrix, stored inline so pieces stay `Copy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Shape {
    size: u8,
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

const fn matrix<const N: usize>(rows: [[u8; N]; N]) -> Shape {
    let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
    let mut y = 0;
    while y < N {
        let mut x = 0;
        while x < N {
            out[y][x] = rows[y][x] != 0;
            x += 1;
        }
        y += 1;
    }
    Shape {
        size: N as u8,
        rows: out,
    }
}

const I_SHAPE: Shape = matrix([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const J_SHAPE: Shape = matrix([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
const L_SHAPE: Shape = matrix([[0, 0, 1], [1, 1, 1], [0, 0, 0]]);
const O_SHAPE: Shape = matrix([[1, 1], [1, 1]]);
const S_SHAPE: Shape = matrix([[0, 1, 1], [1, 1, 0], [0, 0, 0]]);
const T_SHAPE: Shape = matrix([[0, 1, 0], [1, 1, 1], [0, 0, 0]]);
const Z_SHAPE: Shape = matrix([[1, 1, 0], [0, 1, 1], [0, 0, 0]]);

/// Spawn orientation of a piece kind
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

impl Shape {
    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Whether the matrix cell at column `x`, row `y` is occupied
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.rows[y][x]
    }

    /// Occupied cells in row-major order
    pub fn minos(&self) -> ArrayVec<MinoOffset, MAX_MINOS> {
        let mut out = ArrayVec::new();
        for y in 0..self.size() {
            for x in 0..self.size() {
                if self.rows[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// The matrix turned 90° clockwise: transpose, then reverse each row
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size();
        let mut rows = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter_mut().enumerate().take(n) {
            for (c, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - c][r];
            }
        }
        Shape {
            size: self.size,
            rows,
        }
    }
}

/// Result of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The rotated shape fits at column `x` (after a horizontal nudge of `kick`)
    Accepted { shape: Shape, x: i8, kick: i8 },
    /// No offset in the ladder fits; the piece keeps its shape and position
    Rejected,
}

/// Rotate `shape` clockwise and find the first kick offset that does not collide
///
/// `collides(shape, x, y)` is the board's collision predicate. Only horizontal
/// offsets are tried, in the order of [`KICK_OFFSETS`], for every piece kind.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    collides: impl Fn(&Shape, i8, i8) -> bool,
) -> RotationOutcome {
    let rotated = shape.rotated_cw();

    for &kick in KICK_OFFSETS.iter() {
        let new_x = x + kick;
        if !collides(&rotated, new_x, y) {
            return RotationOutcome::Accepted {
                shape: rotated,
                x: new_x,
                kick,
            };
        }
    }

    RotationOutcome::Rejected
}

//! Locked piece positions.

use crate::{BitBoard, Orientation, Piece};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub piece: Piece,
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
}

impl Placement {
    pub const ZERO: Self = Self {
        piece: Piece::I,
        orientation: Orientation::Up,
        x: 0,
        y: 0,
    };

    pub fn new(piece: Piece, orientation: Orientation, x: i8, y: i8) -> Self {
        Self {
            piece,
            orientation,
            x,
            y,
        }
    }

    /// Absolute cells covered by the piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.piece
            .cells(self.orientation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// The placement drawn onto an empty board.
    pub fn to_board(&self) -> BitBoard {
        BitBoard::piece(self.piece, self.orientation, self.x, self.y)
    }
}

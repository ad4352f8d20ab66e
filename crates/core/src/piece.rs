//! Piece types and cell footprints for the seven tetrominoes.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Orientation of a piece. `Up` is the spawn orientation, the rest follow
/// clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn cw(self) -> Self {
        match self {
            Self::Up => Self::Right,
            Self::Right => Self::Down,
            Self::Down => Self::Left,
            Self::Left => Self::Up,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
            Self::Right => Self::Up,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::O,
        Piece::T,
        Piece::S,
        Piece::Z,
        Piece::J,
        Piece::L,
    ];

    /// Cell offsets for this piece in the given orientation, relative to the
    /// anchor. y grows upward. Every orientation is the true rotation of `Up`
    /// about the anchor, so all footprints contain `(0, 0)`.
    pub fn cells(self, orientation: Orientation) -> [(i8, i8); 4] {
        let idx = orientation.index();
        match self {
            Piece::I => [
                [(-1, 0), (0, 0), (1, 0), (2, 0)],
                [(0, 1), (0, 0), (0, -1), (0, -2)],
                [(1, 0), (0, 0), (-1, 0), (-2, 0)],
                [(0, -1), (0, 0), (0, 1), (0, 2)],
            ][idx],
            Piece::O => [
                [(0, 0), (1, 0), (0, 1), (1, 1)],
                [(0, 0), (0, -1), (1, 0), (1, -1)],
                [(0, 0), (-1, 0), (0, -1), (-1, -1)],
                [(0, 0), (0, 1), (-1, 0), (-1, 1)],
            ][idx],
            Piece::T => [
                [(-1, 0), (0, 0), (1, 0), (0, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 0)],
                [(-1, 0), (0, 0), (1, 0), (0, -1)],
                [(0, -1), (0, 0), (0, 1), (-1, 0)],
            ][idx],
            Piece::S => [
                [(-1, 0), (0, 0), (0, 1), (1, 1)],
                [(0, 1), (0, 0), (1, 0), (1, -1)],
                [(-1, -1), (0, -1), (0, 0), (1, 0)],
                [(-1, 1), (-1, 0), (0, 0), (0, -1)],
            ][idx],
            Piece::Z => [
                [(0, 0), (1, 0), (-1, 1), (0, 1)],
                [(0, -1), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (1, -1), (-1, 0), (0, 0)],
                [(-1, -1), (-1, 0), (0, 0), (0, 1)],
            ][idx],
            Piece::J => [
                [(-1, 0), (0, 0), (1, 0), (-1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, 1)],
                [(1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, -1), (0, -1), (0, 0), (0, 1)],
            ][idx],
            Piece::L => [
                [(-1, 0), (0, 0), (1, 0), (1, 1)],
                [(0, -1), (0, 0), (0, 1), (1, -1)],
                [(-1, -1), (-1, 0), (0, 0), (1, 0)],
                [(-1, 1), (0, -1), (0, 0), (0, 1)],
            ][idx],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotate_cw((x, y): (i8, i8)) -> (i8, i8) {
        (y, -x)
    }

    fn sorted(mut cells: [(i8, i8); 4]) -> [(i8, i8); 4] {
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_t_up_cells() {
        let c = Piece::T.cells(Orientation::Up);
        assert!(c.contains(&(0, 1))); // nub
        assert!(c.contains(&(-1, 0)));
        assert!(c.contains(&(0, 0)));
        assert!(c.contains(&(1, 0)));
    }

    #[test]
    fn test_orientation_cw() {
        assert_eq!(Orientation::Up.cw(), Orientation::Right);
        assert_eq!(Orientation::Right.cw(), Orientation::Down);
        assert_eq!(Orientation::Down.cw(), Orientation::Left);
        assert_eq!(Orientation::Left.cw(), Orientation::Up);
    }

    #[test]
    fn test_orientation_ccw_and_flip() {
        for o in Orientation::ALL {
            assert_eq!(o.cw().ccw(), o);
            assert_eq!(o.cw().cw(), o.flip());
            assert_eq!(o.flip().flip(), o);
        }
    }

    #[test]
    fn test_cells_are_true_rotations() {
        for piece in Piece::ALL {
            let mut expected = piece.cells(Orientation::Up);
            for o in Orientation::ALL {
                assert_eq!(
                    sorted(piece.cells(o)),
                    sorted(expected),
                    "{:?} {:?} is not a rotation of Up",
                    piece,
                    o
                );
                expected = expected.map(rotate_cw);
            }
        }
    }

    #[test]
    fn test_footprints_contain_anchor() {
        for piece in Piece::ALL {
            for o in Orientation::ALL {
                assert!(piece.cells(o).contains(&(0, 0)), "{:?} {:?}", piece, o);
            }
        }
    }

    #[test]
    fn test_all_pieces() {
        assert_eq!(Piece::ALL.len(), 7);
    }
}

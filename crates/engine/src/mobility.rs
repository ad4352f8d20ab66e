//! Legal anchor cells per orientation, computed as whole boards.
//!
//! A plane bit is set when the piece anchored at that cell overlaps no
//! obstacle, wall or floor. Space above row 31 counts as free inside the
//! playfield columns.

use tetrafill_core::{BitBoard, Orientation, Piece, Quad};

/// Inverted obstacle board plus the line that stands in for rows above the
/// top.
#[inline]
pub fn free_space(obstacles: &BitBoard, width: usize) -> (BitBoard, u16) {
    let ceiling = BitBoard::playfield_line(width);
    (!*obstacles & BitBoard::splat(ceiling), ceiling)
}

/// Anchors whose every cell lands on a free bit. Row shifts come first so
/// the ceiling rows get the same column shift as the rest.
#[inline]
pub fn footprint(free: &BitBoard, ceiling: u16, cells: &[(i8, i8)]) -> BitBoard {
    cells.iter().fold(BitBoard::FULL, |acc, &(dx, dy)| {
        let rows = if dy >= 0 {
            free.shift_down(dy as u32, ceiling)
        } else {
            free.shift_up(dy.unsigned_abs() as u32, 0)
        };
        let shifted = if dx >= 0 {
            rows.shift_left(dx as u32)
        } else {
            rows.shift_right(dx.unsigned_abs() as u32)
        };
        acc & shifted
    })
}

/// Mobility planes for one piece on one board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mobility {
    piece: Piece,
    planes: Quad<BitBoard>,
}

impl Mobility {
    pub fn new(obstacles: &BitBoard, piece: Piece, width: usize) -> Self {
        let (free, ceiling) = free_space(obstacles, width);
        Self::from_free(&free, ceiling, piece)
    }

    /// Symmetric shapes only compute their distinct orientations; the rest
    /// are translations of those.
    pub fn from_free(free: &BitBoard, ceiling: u16, piece: Piece) -> Self {
        let plane = |o: Orientation| footprint(free, ceiling, &piece.cells(o));
        let planes = match piece {
            Piece::O => {
                let up = plane(Orientation::Up);
                Quad::new(
                    up,
                    up.shift_up(1, 0),
                    up.shift_up(1, 0).shift_right(1),
                    up.shift_right(1),
                )
            }
            Piece::S | Piece::Z => {
                let up = plane(Orientation::Up);
                let right = plane(Orientation::Right);
                Quad::new(up, right, up.shift_up(1, 0), right.shift_right(1))
            }
            Piece::I => {
                let up = plane(Orientation::Up);
                let left = plane(Orientation::Left);
                Quad::new(up, left.shift_up(1, 0), up.shift_right(1), left)
            }
            Piece::T | Piece::J | Piece::L => Quad::from_fn(plane),
        };
        Self { piece, planes }
    }

    /// All four planes computed from the footprints, no symmetry shortcuts.
    pub fn direct(obstacles: &BitBoard, piece: Piece, width: usize) -> Self {
        let (free, ceiling) = free_space(obstacles, width);
        Self {
            piece,
            planes: Quad::from_fn(|o| footprint(&free, ceiling, &piece.cells(o))),
        }
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub fn planes(&self) -> &Quad<BitBoard> {
        &self.planes
    }

    #[inline(always)]
    pub fn get(&self, orientation: Orientation) -> &BitBoard {
        &self.planes[orientation]
    }

    /// Legal anchor test. Anchors off the board are never legal.
    pub fn allows(&self, orientation: Orientation, x: i8, y: i8) -> bool {
        (0..BitBoard::WIDTH as i8).contains(&x)
            && (0..BitBoard::HEIGHT as i8).contains(&y)
            && self.planes[orientation].get(x as usize, y as usize)
    }
}

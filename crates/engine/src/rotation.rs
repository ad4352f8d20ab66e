//! Bit-parallel rotation with wall kicks.

use tetrafill_core::{BitBoard, Orientation, Piece, Quad};

use crate::kicks::{Kick, KickClass, KickSet, KickTable};

/// Move every source anchor by the first kick whose destination is legal in
/// `target`. Sources that fit nowhere drop out.
#[inline]
pub fn transfer(kicks: &[Kick], source: BitBoard, target: &BitBoard) -> BitBoard {
    let mut remaining = source;
    let mut out = BitBoard::EMPTY;
    for &(dx, dy) in kicks {
        if remaining.is_empty() {
            break;
        }
        let hit = remaining.translate(dx, dy) & *target;
        out |= hit;
        remaining = remaining.and_not(hit.translate(dx.wrapping_neg(), dy.wrapping_neg()));
    }
    out
}

/// Rotation transfer for one piece under one kick table.
#[derive(Clone, Copy, Debug)]
pub struct RotationTransfer<'a> {
    piece: Piece,
    kicks: &'a KickSet,
}

impl<'a> RotationTransfer<'a> {
    pub fn new(table: &'a KickTable, piece: Piece) -> Self {
        Self {
            piece,
            kicks: table.set(KickClass::of(piece)),
        }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Anchors in `to` reached by one quarter turn from either neighbour.
    #[inline]
    pub fn rotate_to_target(&self, to: Orientation, target: &BitBoard, reached: &Quad<BitBoard>) -> BitBoard {
        let from_cw = to.ccw();
        let from_ccw = to.cw();
        transfer(self.kicks.get(from_cw, to), reached[from_cw], target)
            | transfer(self.kicks.get(from_ccw, to), reached[from_ccw], target)
    }

    /// Anchors in `to` reached by a 180 from the opposite orientation.
    #[inline]
    pub fn twist_to_target(&self, to: Orientation, target: &BitBoard, reached: &Quad<BitBoard>) -> BitBoard {
        let from = to.flip();
        transfer(self.kicks.get(from, to), reached[from], target)
    }

    /// One rotation step for every orientation, reading only `reached`.
    pub fn rotate_all(&self, mobility: &Quad<BitBoard>, reached: &Quad<BitBoard>, twist: bool) -> Quad<BitBoard> {
        Quad::from_fn(|to| {
            let target = &mobility[to];
            let turned = self.rotate_to_target(to, target, reached);
            if twist {
                turned | self.twist_to_target(to, target, reached)
            } else {
                turned
            }
        })
    }
}

//! Wall-kick tables as data.
//!
//! Offsets are (dx, dy) with y up, tried in order, first fit wins. Every
//! list starts with the plain rotation test. Cells are true rotations about
//! the anchor, so the I and O lists carry the SRS pivot correction in every
//! entry (offset-table formulation: kick = offset(from) - offset(to)).

use serde::{Deserialize, Serialize};
use std::fmt;
use tetrafill_core::{Orientation, Piece};

use crate::error::KickTableError;

pub type Kick = (i8, i8);

/// Longest kick list accepted by [`KickTable::validate`].
pub const MAX_KICKS: usize = 8;

/// Largest |dx| or |dy| accepted by [`KickTable::validate`].
pub const MAX_KICK_DISTANCE: i8 = 4;

/// Pieces sharing one kick set.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum KickClass {
    I,
    O,
    Jlstz,
}

impl KickClass {
    pub fn of(piece: Piece) -> Self {
        match piece {
            Piece::I => KickClass::I,
            Piece::O => KickClass::O,
            _ => KickClass::Jlstz,
        }
    }
}

impl fmt::Display for KickClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KickClass::I => "I",
            KickClass::O => "O",
            KickClass::Jlstz => "JLSTZ",
        })
    }
}

/// Kick lists for one piece class, indexed by the source orientation.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KickSet {
    pub cw: [Vec<Kick>; 4],
    pub ccw: [Vec<Kick>; 4],
    #[serde(default)]
    pub flip: [Vec<Kick>; 4],
}

impl KickSet {
    pub fn get(&self, from: Orientation, to: Orientation) -> &[Kick] {
        let i = from.index();
        if to == from.cw() {
            &self.cw[i]
        } else if to == from.ccw() {
            &self.ccw[i]
        } else if to == from.flip() {
            &self.flip[i]
        } else {
            &[]
        }
    }
}

/// Kick table for all seven pieces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KickTable {
    pub jlstz: KickSet,
    pub i: KickSet,
    pub o: KickSet,
}

// SRS offset tables, y up, one row per orientation (Up, Right, Down, Left).
const JLSTZ_OFFSETS: [[Kick; 5]; 4] = [
    [(0, 0); 5],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0); 5],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

const I_OFFSETS: [[Kick; 5]; 4] = [
    [(0, 0), (-1, 0), (2, 0), (-1, 0), (2, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

const O_OFFSETS: [[Kick; 1]; 4] = [[(0, 0)], [(0, -1)], [(-1, -1)], [(-1, 0)]];

// SRS+ 180 kicks (TETR.IO), indexed by source orientation.
const JLSTZ_FLIP: [[Kick; 6]; 4] = [
    [(0, 0), (0, 1), (1, 1), (-1, 1), (1, 0), (-1, 0)],
    [(0, 0), (1, 0), (1, 2), (1, 1), (0, 2), (0, 1)],
    [(0, 0), (0, -1), (-1, -1), (1, -1), (-1, 0), (1, 0)],
    [(0, 0), (-1, 0), (-1, 2), (-1, 1), (0, 2), (0, 1)],
];

fn offset_kicks<const N: usize>(offsets: &[[Kick; N]; 4], from: Orientation, to: Orientation) -> Vec<Kick> {
    offsets[from.index()]
        .iter()
        .zip(offsets[to.index()].iter())
        .map(|(&(fx, fy), &(tx, ty))| (fx - tx, fy - ty))
        .collect()
}

fn srs_set<const N: usize>(offsets: &[[Kick; N]; 4]) -> KickSet {
    KickSet {
        cw: Orientation::ALL.map(|from| offset_kicks(offsets, from, from.cw())),
        ccw: Orientation::ALL.map(|from| offset_kicks(offsets, from, from.ccw())),
        flip: Default::default(),
    }
}

/// 180 with only the plain test, expressed through the pivot offsets.
fn pivot_flip<const N: usize>(offsets: &[[Kick; N]; 4]) -> [Vec<Kick>; 4] {
    Orientation::ALL.map(|from| {
        let (fx, fy) = offsets[from.index()][0];
        let (tx, ty) = offsets[from.flip().index()][0];
        vec![(fx - tx, fy - ty)]
    })
}

impl KickTable {
    /// Guideline SRS, no 180 rotation.
    pub fn srs() -> Self {
        Self {
            jlstz: srs_set(&JLSTZ_OFFSETS),
            i: srs_set(&I_OFFSETS),
            o: srs_set(&O_OFFSETS),
        }
    }

    /// SRS plus the TETR.IO 180 table. I and O only get the plain 180 test.
    pub fn srs_plus() -> Self {
        let mut table = Self::srs();
        table.jlstz.flip = JLSTZ_FLIP.map(|kicks| kicks.to_vec());
        table.i.flip = pivot_flip(&I_OFFSETS);
        table.o.flip = pivot_flip(&O_OFFSETS);
        table
    }

    pub fn set(&self, class: KickClass) -> &KickSet {
        match class {
            KickClass::I => &self.i,
            KickClass::O => &self.o,
            KickClass::Jlstz => &self.jlstz,
        }
    }

    /// Offsets to try when rotating `piece` from `from` to `to`.
    #[inline]
    pub fn kicks(&self, piece: Piece, from: Orientation, to: Orientation) -> &[Kick] {
        self.set(KickClass::of(piece)).get(from, to)
    }

    /// Quarter turns need at least one offset, as do 180 turns when `twist`
    /// is on. Lists are bounded in length and distance.
    pub fn validate(&self, twist: bool) -> Result<(), KickTableError> {
        for class in [KickClass::Jlstz, KickClass::I, KickClass::O] {
            let set = self.set(class);
            for from in Orientation::ALL {
                let mut targets = vec![from.cw(), from.ccw()];
                if twist {
                    targets.push(from.flip());
                }
                for to in targets {
                    let kicks = set.get(from, to);
                    if kicks.is_empty() {
                        return Err(KickTableError::MissingTransition { class, from, to });
                    }
                    if kicks.len() > MAX_KICKS {
                        return Err(KickTableError::TooManyKicks {
                            class,
                            from,
                            to,
                            len: kicks.len(),
                        });
                    }
                }
                for to in [from.cw(), from.ccw(), from.flip()] {
                    for &(dx, dy) in set.get(from, to) {
                        let limit = MAX_KICK_DISTANCE.unsigned_abs();
                        if dx.unsigned_abs() > limit || dy.unsigned_abs() > limit {
                            return Err(KickTableError::OffsetOutOfRange {
                                class,
                                from,
                                to,
                                dx,
                                dy,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for KickTable {
    fn default() -> Self {
        Self::srs_plus()
    }
}

//! Configuration and invariant errors. Board operations themselves never fail.

use tetrafill_core::{Orientation, Piece};
use thiserror::Error;

use crate::kicks::{KickClass, MAX_KICKS, MAX_KICK_DISTANCE};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KickTableError {
    #[error("{class} kicks {from:?} -> {to:?} are empty")]
    MissingTransition {
        class: KickClass,
        from: Orientation,
        to: Orientation,
    },
    #[error("{class} kicks {from:?} -> {to:?} have {len} entries, at most {} allowed", MAX_KICKS)]
    TooManyKicks {
        class: KickClass,
        from: Orientation,
        to: Orientation,
        len: usize,
    },
    #[error("{class} kick ({dx}, {dy}) for {from:?} -> {to:?} is further than {}", MAX_KICK_DISTANCE)]
    OffsetOutOfRange {
        class: KickClass,
        from: Orientation,
        to: Orientation,
        dx: i8,
        dy: i8,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReachError {
    #[error("invalid kick table: {0}")]
    InvalidKickTable(#[from] KickTableError),
    #[error("field width {0} is outside 1..=16")]
    InvalidWidth(usize),
    #[error("{piece:?} closure did not converge within {cap} iterations")]
    IterationCap { piece: Piece, cap: u32 },
}

//! Independent closure queries spread across threads.

use rayon::prelude::*;
use tetrafill_core::{BitBoard, Piece};

use crate::error::ReachError;
use crate::reachability::{Reach, ReachEngine};

/// Closure for every piece on one board, in [`Piece::ALL`] order.
pub fn reach_all(engine: &ReachEngine, obstacles: &BitBoard) -> Vec<Result<Reach, ReachError>> {
    Piece::ALL
        .par_iter()
        .map(|&piece| engine.reach(obstacles, piece))
        .collect()
}

/// Closure for one piece over many boards, in input order.
pub fn reach_many(engine: &ReachEngine, boards: &[BitBoard], piece: Piece) -> Vec<Result<Reach, ReachError>> {
    boards
        .par_iter()
        .map(|board| engine.reach(board, piece))
        .collect()
}

/// Total distinct placements over `boards`.
pub fn count_placements(engine: &ReachEngine, boards: &[BitBoard], piece: Piece) -> Result<u64, ReachError> {
    boards
        .par_iter()
        .map(|board| engine.reach(board, piece).map(|reach| reach.placements().len() as u64))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

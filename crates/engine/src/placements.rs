//! Lock positions from a finished closure.

use tetrafill_core::{BitBoard, BlockList, Orientation, Piece, Placement, Quad};

use crate::reachability::{Reach, ReachabilitySet};

/// Upper bound on distinct placements: every anchor of every plane.
pub const MAX_PLACEMENTS: usize = 4 * BitBoard::HEIGHT * BitBoard::WIDTH;

/// Reached anchors whose cell below is not a legal anchor.
#[inline]
pub fn landings(reached: &ReachabilitySet, mobility: &Quad<BitBoard>) -> ReachabilitySet {
    reached.zip_with(*mobility, |r, m| r.and_not(m.shift_up(1, 0)))
}

/// Orientation and anchor offset that cover the same cells as `orientation`
/// for this piece. T, J and L map to themselves.
#[inline]
pub fn canonical(piece: Piece, orientation: Orientation) -> (Orientation, (i8, i8)) {
    use Orientation::*;
    match (piece, orientation) {
        (Piece::O, Right) => (Up, (0, -1)),
        (Piece::O, Down) => (Up, (-1, -1)),
        (Piece::O, Left) => (Up, (-1, 0)),
        (Piece::S | Piece::Z, Down) => (Up, (0, -1)),
        (Piece::S | Piece::Z, Left) => (Right, (-1, 0)),
        (Piece::I, Down) => (Up, (-1, 0)),
        (Piece::I, Right) => (Left, (0, -1)),
        (_, o) => (o, (0, 0)),
    }
}

/// Landing planes folded onto canonical orientations. Non-canonical planes
/// come back empty.
pub fn canonical_landings(piece: Piece, landings: &ReachabilitySet) -> ReachabilitySet {
    let mut out = Quad::splat(BitBoard::EMPTY);
    for (o, plane) in landings.iter() {
        let (c, (dx, dy)) = canonical(piece, o);
        out[c] |= plane.translate(dx, dy);
    }
    out
}

/// Canonical landings as packed points, one list per orientation.
pub fn packed_landings(reach: &Reach) -> Quad<BlockList> {
    canonical_landings(reach.piece, &reach.landings()).map(|plane| plane.locate_all_blocks())
}

pub fn extract_placements(reach: &Reach) -> PlacementList {
    let mut list = PlacementList::new();
    let planes = canonical_landings(reach.piece, &reach.landings());
    for (o, plane) in planes.iter() {
        for (x, y) in plane.blocks() {
            list.push(Placement::new(reach.piece, o, x as i8, y as i8));
        }
    }
    list
}

/// Fixed-capacity placement list, no heap allocation.
#[derive(Clone)]
pub struct PlacementList {
    placements: [Placement; MAX_PLACEMENTS],
    len: usize,
}

impl PlacementList {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            placements: [Placement::ZERO; MAX_PLACEMENTS],
            len: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, p: Placement) {
        debug_assert!(self.len < MAX_PLACEMENTS, "PlacementList overflow");
        self.placements[self.len] = p;
        self.len += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[Placement] {
        &self.placements[..self.len]
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.as_slice().iter()
    }

    pub fn contains(&self, p: &Placement) -> bool {
        self.as_slice().contains(p)
    }

    pub fn to_vec(&self) -> Vec<Placement> {
        self.as_slice().to_vec()
    }
}

impl Default for PlacementList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlacementList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a PlacementList {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::ops::Index<usize> for PlacementList {
    type Output = Placement;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReachConfig;
    use crate::reachability::ReachEngine;
    use rustc_hash::FxHashSet;
    use Orientation::*;

    fn sorted_cells(p: &Placement) -> [(i8, i8); 4] {
        let mut cells = p.cells();
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_canonical_covers_same_cells() {
        for piece in Piece::ALL {
            for o in Orientation::ALL {
                let (c, (dx, dy)) = canonical(piece, o);
                let here = Placement::new(piece, o, 5, 5);
                let there = Placement::new(piece, c, 5 + dx, 5 + dy);
                assert_eq!(sorted_cells(&here), sorted_cells(&there), "{:?} {:?}", piece, o);
            }
        }
    }

    #[test]
    fn test_landings_rest_on_something() {
        let obstacles = BitBoard::field(10).with_block(3, 0);
        let engine = ReachEngine::default();
        let reach = engine.reach(&obstacles, Piece::O).unwrap();
        let landed = reach.landings();
        assert!(landed.up.get(3, 1));
        assert!(landed.up.get(2, 1));
        assert!(landed.up.get(4, 0));
        assert!(!landed.up.get(4, 1));
        assert!(!landed.up.get(3, 0));
    }

    #[test]
    fn test_empty_board_placement_counts() {
        let engine = ReachEngine::new(ReachConfig::srs()).unwrap();
        let field = BitBoard::field(10);
        let expected = [
            (Piece::I, 17),
            (Piece::O, 9),
            (Piece::T, 34),
            (Piece::S, 17),
            (Piece::Z, 17),
            (Piece::J, 34),
            (Piece::L, 34),
        ];
        for (piece, count) in expected {
            let reach = engine.reach(&field, piece).unwrap();
            assert_eq!(reach.placements().len(), count, "{:?}", piece);
        }
    }

    #[test]
    fn test_placements_are_distinct_by_cells() {
        let obstacles = BitBoard::field(10) | BitBoard::lines2(0, 0b1111001111, 0b1110000111);
        let engine = ReachEngine::default();
        for piece in Piece::ALL {
            let reach = engine.reach(&obstacles, piece).unwrap();
            let list = reach.placements();
            let mut seen = FxHashSet::default();
            for p in &list {
                assert!(seen.insert(sorted_cells(p)), "duplicate {:?}", p);
                assert_eq!(p.to_board() & obstacles, BitBoard::EMPTY, "{:?} overlaps", p);
            }
        }
    }

    #[test]
    fn test_packed_landings_match_list() {
        let engine = ReachEngine::default();
        let reach = engine.reach(&BitBoard::field(10), Piece::S).unwrap();
        let packed = packed_landings(&reach);
        let total: usize = packed
            .iter()
            .flat_map(|(_, list)| list.iter())
            .map(|points| points.len())
            .sum();
        assert_eq!(total, reach.placements().len());
        assert!(packed.down.is_empty());
        assert!(packed.left.is_empty());
    }

    #[test]
    fn test_list_basics() {
        let mut list = PlacementList::new();
        assert!(list.is_empty());
        let p = Placement::new(Piece::T, Up, 4, 0);
        list.push(p);
        list.push(Placement::new(Piece::T, Right, 0, 1));
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], p);
        assert!(list.contains(&p));
        assert_eq!(list.to_vec().len(), 2);
    }
}

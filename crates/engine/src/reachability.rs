//! Fixed-point closure over (anchor, orientation).
//!
//! Each iteration rotates every orientation from the previous planes, then
//! slides and drops within each plane. The planes only grow, so the loop
//! stops at the first iteration that adds nothing.

use tetrafill_core::{BitBoard, Orientation, Piece, Quad};

use crate::config::ReachConfig;
use crate::error::ReachError;
use crate::fill::{fill_horizontal_x4, fill_vertical_x4};
use crate::mobility::Mobility;
use crate::placements::{self, PlacementList};
use crate::rotation::RotationTransfer;

/// Reachable anchors per orientation.
pub type ReachabilitySet = Quad<BitBoard>;

/// Result of one closure query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reach {
    pub piece: Piece,
    pub spawn: (i8, i8),
    pub mobility: Mobility,
    pub reached: ReachabilitySet,
    /// Closure iterations run, including the final one that added nothing.
    pub iterations: u32,
}

impl Reach {
    pub fn contains(&self, orientation: Orientation, x: i8, y: i8) -> bool {
        (0..BitBoard::WIDTH as i8).contains(&x)
            && (0..BitBoard::HEIGHT as i8).contains(&y)
            && self.reached[orientation].get(x as usize, y as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.reached.iter().all(|(_, plane)| plane.is_empty())
    }

    pub fn total_anchors(&self) -> u32 {
        self.reached.iter().map(|(_, plane)| plane.total_blocks()).sum()
    }

    /// Reached anchors where the piece can no longer drop.
    pub fn landings(&self) -> ReachabilitySet {
        placements::landings(&self.reached, self.mobility.planes())
    }

    /// Distinct locked positions, one per set of occupied cells.
    pub fn placements(&self) -> PlacementList {
        placements::extract_placements(self)
    }
}

/// Planes holding only the spawn anchor, or nothing if the spawn is blocked
/// or off the board.
pub fn seed(mobility: &Mobility, (x, y): (i8, i8)) -> ReachabilitySet {
    let mut planes = Quad::splat(BitBoard::EMPTY);
    if mobility.allows(Orientation::Up, x, y) {
        planes.up = BitBoard::block(x as usize, y as usize);
    }
    planes
}

#[derive(Clone, Debug)]
pub struct ReachEngine {
    config: ReachConfig,
}

impl ReachEngine {
    pub fn new(config: ReachConfig) -> Result<Self, ReachError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ReachConfig {
        &self.config
    }

    pub fn mobility(&self, obstacles: &BitBoard, piece: Piece) -> Mobility {
        Mobility::new(obstacles, piece, self.config.width)
    }

    /// Closure from [`ReachConfig::spawn`].
    pub fn reach(&self, obstacles: &BitBoard, piece: Piece) -> Result<Reach, ReachError> {
        self.reach_from(obstacles, piece, self.config.spawn())
    }

    pub fn reach_from(&self, obstacles: &BitBoard, piece: Piece, spawn: (i8, i8)) -> Result<Reach, ReachError> {
        self.reach_with_mobility(self.mobility(obstacles, piece), spawn)
    }

    pub fn reach_with_mobility(&self, mobility: Mobility, spawn: (i8, i8)) -> Result<Reach, ReachError> {
        self.reach_traced(mobility, spawn, |_, _| {})
    }

    /// Like [`reach_with_mobility`](Self::reach_with_mobility), calling
    /// `trace` with the planes after every iteration.
    pub fn reach_traced(
        &self,
        mobility: Mobility,
        spawn: (i8, i8),
        mut trace: impl FnMut(u32, &ReachabilitySet),
    ) -> Result<Reach, ReachError> {
        let piece = mobility.piece();
        let mut reached = seed(&mobility, spawn);
        let done = |reached: ReachabilitySet, iterations: u32| Reach {
            piece,
            spawn,
            mobility,
            reached,
            iterations,
        };
        if reached.up.is_empty() {
            return Ok(done(reached, 0));
        }

        let planes = mobility.planes();
        let rotation = RotationTransfer::new(&self.config.kicks, piece);
        for iteration in 1..=self.config.iteration_cap {
            let rotated = rotation.rotate_all(planes, &reached, self.config.twist);
            let next = reached.zip_with(rotated, |r, t| r | t);
            let next = fill_horizontal_x4(planes, next);
            let next = fill_vertical_x4(planes, next);
            trace(iteration, &next);

            let grew = next
                .zip_with(reached, |n, r| n.and_not(r))
                .iter()
                .any(|(_, plane)| !plane.is_empty());
            reached = next;
            if !grew {
                return Ok(done(reached, iteration));
            }
        }
        Err(ReachError::IterationCap {
            piece,
            cap: self.config.iteration_cap,
        })
    }
}

impl Default for ReachEngine {
    fn default() -> Self {
        Self {
            config: ReachConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Orientation::*;

    fn engine() -> ReachEngine {
        ReachEngine::new(ReachConfig::srs_plus()).unwrap()
    }

    #[test]
    fn test_empty_board_fills_below_spawn() {
        let field = BitBoard::field(10);
        let below_spawn = BitBoard::expand_mask((1 << 21) - 1);
        for piece in Piece::ALL {
            let reach = engine().reach(&field, piece).unwrap();
            assert_eq!(reach.spawn, (4, 20));
            assert_eq!(
                reach.reached.up & below_spawn,
                *reach.mobility.get(Up) & below_spawn,
                "{:?}",
                piece
            );
            assert!(reach.reached.up.and_not(below_spawn).is_empty(), "{:?} rose above spawn", piece);
        }
    }

    #[test]
    fn test_default_spawn_fits_every_width() {
        for width in [4, 5, 6, 7, 10, 13, 16] {
            let engine = ReachEngine::new(ReachConfig::srs_plus().with_width(width)).unwrap();
            let field = BitBoard::field(width);
            let below_spawn = BitBoard::expand_mask((1 << 21) - 1);
            for piece in Piece::ALL {
                let reach = engine.reach(&field, piece).unwrap();
                assert!(!reach.is_empty(), "{:?} width {}", piece, width);
                assert!(!reach.placements().is_empty(), "{:?} width {}", piece, width);
                assert_eq!(
                    reach.reached.up & below_spawn,
                    *reach.mobility.get(Up) & below_spawn,
                    "{:?} width {}",
                    piece,
                    width
                );
            }
        }
    }

    #[test]
    fn test_reach_matches_explicit_spawn() {
        let engine = ReachEngine::new(ReachConfig::srs().with_width(6)).unwrap();
        let field = BitBoard::field(6);
        let reach = engine.reach(&field, Piece::I).unwrap();
        assert_eq!(reach, engine.reach_from(&field, Piece::I, (2, 20)).unwrap());
        assert!(reach.total_anchors() > 0);
    }

    #[test]
    fn test_blocked_spawn_is_empty() {
        let obstacles = BitBoard::field(10).with_block(4, 20);
        let reach = engine().reach(&obstacles, Piece::T).unwrap();
        assert!(reach.is_empty());
        assert_eq!(reach.iterations, 0);
        assert!(reach.placements().is_empty());
    }

    #[test]
    fn test_off_board_spawn_is_empty() {
        let field = BitBoard::field(10);
        assert!(engine().reach_from(&field, Piece::T, (-3, 5)).unwrap().is_empty());
        assert!(engine().reach_from(&field, Piece::T, (4, 40)).unwrap().is_empty());
    }

    #[test]
    fn test_planes_stay_within_mobility() {
        let obstacles = BitBoard::field(10) | BitBoard::lines3(0, 0b1110111111, 0b1100011111, 0b1110011111);
        for piece in Piece::ALL {
            let reach = engine().reach(&obstacles, piece).unwrap();
            for (o, plane) in reach.reached.iter() {
                assert!(plane.and_not(*reach.mobility.get(o)).is_empty(), "{:?} {:?}", piece, o);
            }
        }
    }

    #[test]
    fn test_trace_is_monotonic() {
        let obstacles = BitBoard::field(10) | BitBoard::lines2(0, 0b1111011111, 0b1110001111);
        let engine = engine();
        let mobility = engine.mobility(&obstacles, Piece::T);
        let mut previous = seed(&mobility, engine.config().spawn());
        let mut calls = 0;
        let reach = engine
            .reach_traced(mobility, engine.config().spawn(), |i, planes| {
                calls += 1;
                assert_eq!(i, calls);
                for (o, plane) in planes.iter() {
                    assert!(previous[o].and_not(*plane).is_empty(), "plane {:?} shrank", o);
                }
                previous = *planes;
            })
            .unwrap();
        assert_eq!(reach.iterations, calls);
        assert_eq!(reach.reached, previous);
    }

    #[test]
    fn test_result_is_a_fixed_point() {
        let obstacles = BitBoard::field(10) | BitBoard::lines3(0, 0b1111011111, 0b1110001111, 0b1111001111);
        let engine = engine();
        for piece in Piece::ALL {
            let reach = engine.reach(&obstacles, piece).unwrap();
            let planes = reach.mobility.planes();
            let rotation = RotationTransfer::new(&engine.config().kicks, piece);
            let rotated = rotation.rotate_all(planes, &reach.reached, true);
            let again = fill_vertical_x4(
                planes,
                fill_horizontal_x4(planes, reach.reached.zip_with(rotated, |r, t| r | t)),
            );
            assert_eq!(again, reach.reached, "{:?}", piece);
        }
    }

    #[test]
    fn test_iteration_cap() {
        let config = ReachConfig {
            iteration_cap: 1,
            ..ReachConfig::srs_plus()
        };
        let engine = ReachEngine::new(config).unwrap();
        assert_eq!(
            engine.reach(&BitBoard::field(10), Piece::T),
            Err(ReachError::IterationCap {
                piece: Piece::T,
                cap: 1,
            })
        );
    }

    #[test]
    fn test_rejects_bad_config() {
        assert_eq!(
            ReachEngine::new(ReachConfig::srs().with_width(0)).err(),
            Some(ReachError::InvalidWidth(0))
        );
    }

    #[test]
    fn test_narrow_width() {
        let engine = ReachEngine::new(ReachConfig::srs().with_width(4)).unwrap();
        let reach = engine.reach_from(&BitBoard::field(4), Piece::O, (1, 10)).unwrap();
        // O Up spans x..=x+1
        assert_eq!(reach.reached.up.row(0), 0b0111);
        assert_eq!(reach.mobility.get(Up).row(31), 0b0111);
    }
}

//! Cell-at-a-time implementations, used to check the bit-parallel paths.
//!
//! One anchor per queue entry, so only meant for tests and debugging.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tetrafill_core::{BitBoard, Orientation, Piece, Quad};

use crate::config::ReachConfig;
use crate::reachability::ReachabilitySet;

/// One-step-at-a-time horizontal fill.
pub fn fill_horizontal_naive(free: &BitBoard, reached: &BitBoard) -> BitBoard {
    let mut current = *reached;
    loop {
        let next = current.or_and(*free, current.shift_left(1) | current.shift_right(1));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// One-row-at-a-time downward fill.
pub fn fill_vertical_naive(free: &BitBoard, reached: &BitBoard) -> BitBoard {
    let mut current = *reached;
    loop {
        let next = current.or_and(*free, current.shift_down(1, 0));
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Single input applied to a piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Step {
    Left,
    Right,
    Down,
    Cw,
    Ccw,
    Flip,
}

impl Step {
    pub const ALL: [Step; 6] = [Step::Left, Step::Right, Step::Down, Step::Cw, Step::Ccw, Step::Flip];
}

/// Piece state: orientation plus anchor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Node {
    pub orientation: Orientation,
    pub x: i8,
    pub y: i8,
}

impl Node {
    pub fn new(orientation: Orientation, x: i8, y: i8) -> Self {
        Self { orientation, x, y }
    }
}

/// Movement rules checked cell by cell against the obstacle board.
pub struct Rules<'a> {
    obstacles: &'a BitBoard,
    config: &'a ReachConfig,
    piece: Piece,
}

impl<'a> Rules<'a> {
    pub fn new(obstacles: &'a BitBoard, config: &'a ReachConfig, piece: Piece) -> Self {
        Self {
            obstacles,
            config,
            piece,
        }
    }

    /// Anchor on the board and every cell inside the field, above the floor
    /// and clear of obstacles. Space above row 31 is open.
    pub fn legal(&self, node: Node) -> bool {
        if !(0..BitBoard::WIDTH as i8).contains(&node.x) || !(0..BitBoard::HEIGHT as i8).contains(&node.y) {
            return false;
        }
        self.piece.cells(node.orientation).iter().all(|&(dx, dy)| {
            let cx = node.x as i32 + dx as i32;
            let cy = node.y as i32 + dy as i32;
            if cx < 0 || cx >= self.config.width.min(BitBoard::WIDTH) as i32 || cy < 0 {
                return false;
            }
            cy >= BitBoard::HEIGHT as i32 || !self.obstacles.get(cx as usize, cy as usize)
        })
    }

    /// Result of applying `step` to a legal node, `None` if it fails.
    pub fn step(&self, node: Node, step: Step) -> Option<Node> {
        let shifted = |dx: i8, dy: i8| Node::new(node.orientation, node.x + dx, node.y + dy);
        match step {
            Step::Left => Some(shifted(-1, 0)).filter(|&n| self.legal(n)),
            Step::Right => Some(shifted(1, 0)).filter(|&n| self.legal(n)),
            Step::Down => Some(shifted(0, -1)).filter(|&n| self.legal(n)),
            Step::Cw => self.rotate(node, node.orientation.cw()),
            Step::Ccw => self.rotate(node, node.orientation.ccw()),
            Step::Flip if self.config.twist => self.rotate(node, node.orientation.flip()),
            Step::Flip => None,
        }
    }

    fn rotate(&self, node: Node, to: Orientation) -> Option<Node> {
        self.config
            .kicks
            .kicks(self.piece, node.orientation, to)
            .iter()
            .map(|&(dx, dy)| Node::new(to, node.x + dx, node.y + dy))
            .find(|&n| self.legal(n))
    }

    /// Breadth-first search from `spawn` in the spawn orientation. Returns
    /// the visited nodes with the step that first reached each one.
    pub fn search(&self, spawn: (i8, i8)) -> FxHashMap<Node, Option<(Node, Step)>> {
        let mut parents = FxHashMap::default();
        let start = Node::new(Orientation::Up, spawn.0, spawn.1);
        if !self.legal(start) {
            return parents;
        }
        let mut queue = VecDeque::new();
        parents.insert(start, None);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            for step in Step::ALL {
                if let Some(next) = self.step(node, step) {
                    if !parents.contains_key(&next) {
                        parents.insert(next, Some((node, step)));
                        queue.push_back(next);
                    }
                }
            }
        }
        parents
    }

    /// Reachable anchors as planes, for comparison with the closure.
    pub fn reachable(&self, spawn: (i8, i8)) -> ReachabilitySet {
        let mut planes = Quad::splat(BitBoard::EMPTY);
        for node in self.search(spawn).keys() {
            let plane = &mut planes[node.orientation];
            *plane = plane.with_block(node.x as usize, node.y as usize);
        }
        planes
    }

    /// Shortest input sequence from `spawn` to `target`.
    pub fn find_path(&self, spawn: (i8, i8), target: Node) -> Option<Vec<Step>> {
        let parents = self.search(spawn);
        let mut path = Vec::new();
        let mut current = target;
        loop {
            match parents.get(&current)? {
                None => break,
                Some((prev, step)) => {
                    path.push(*step);
                    current = *prev;
                }
            }
        }
        path.reverse();
        Some(path)
    }

    /// Apply `steps` from `spawn`, failing on the first illegal one.
    pub fn replay(&self, spawn: (i8, i8), steps: &[Step]) -> Option<Node> {
        let start = Node::new(Orientation::Up, spawn.0, spawn.1);
        if !self.legal(start) {
            return None;
        }
        steps.iter().try_fold(start, |node, &step| self.step(node, step))
    }
}

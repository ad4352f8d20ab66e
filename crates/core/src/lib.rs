//! tetrafill core crate - value types for bit-parallel piece reachability.

mod board;
mod piece;
mod placement;
mod points;
mod quad;

pub use board::{BitBoard, BlockList, Blocks};
pub use piece::{Orientation, Piece};
pub use placement::Placement;
pub use points::PackedPoints;
pub use quad::Quad;

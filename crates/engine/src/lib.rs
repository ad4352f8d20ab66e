//! tetrafill-engine - bit-parallel reachability for falling tetrominoes.
//!
//! Mobility planes, binary-lifting fills, kick transfer and the fixed-point
//! closure that ties them together.

pub mod batch;
pub mod config;
pub mod error;
pub mod fill;
pub mod kicks;
pub mod mobility;
pub mod placements;
pub mod reachability;
pub mod reference;
pub mod rotation;

pub use batch::{count_placements, reach_all, reach_many};
pub use config::ReachConfig;
pub use error::{KickTableError, ReachError};
pub use fill::{fill_horizontal, fill_horizontal_x4, fill_vertical, fill_vertical_x4};
pub use kicks::{Kick, KickClass, KickSet, KickTable};
pub use mobility::{footprint, Mobility};
pub use placements::{canonical, extract_placements, landings, PlacementList, MAX_PLACEMENTS};
pub use reachability::{Reach, ReachEngine, ReachabilitySet};
pub use rotation::{transfer, RotationTransfer};

pub use tetrafill_core::{BitBoard, Orientation, Piece, Placement, Quad};

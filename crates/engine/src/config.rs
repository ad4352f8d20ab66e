use serde::{Deserialize, Serialize};
use tetrafill_core::BitBoard;

use crate::error::ReachError;
use crate::kicks::KickTable;

/// Settings for one closure engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachConfig {
    /// Playfield width; columns past it are walls.
    pub width: usize,
    /// Allow direct 180 rotations.
    pub twist: bool,
    /// Closure iterations before giving up. Every non-final iteration adds
    /// at least one cell, so a sound table never gets near the default.
    pub iteration_cap: u32,
    pub kicks: KickTable,
}

impl ReachConfig {
    pub const DEFAULT_ITERATION_CAP: u32 = (4 * BitBoard::HEIGHT * BitBoard::WIDTH + 1) as u32;
    pub const SPAWN_ROW: i8 = 20;

    /// Guideline SRS, quarter turns only.
    pub fn srs() -> Self {
        Self {
            width: BitBoard::FIELD_WIDTH,
            twist: false,
            iteration_cap: Self::DEFAULT_ITERATION_CAP,
            kicks: KickTable::srs(),
        }
    }

    /// SRS with 180 rotations (TETR.IO SRS+ style).
    pub fn srs_plus() -> Self {
        Self {
            width: BitBoard::FIELD_WIDTH,
            twist: true,
            iteration_cap: Self::DEFAULT_ITERATION_CAP,
            kicks: KickTable::srs_plus(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Default spawn anchor: left of centre, `(4, 20)` on a 10-wide field.
    pub fn spawn(&self) -> (i8, i8) {
        ((self.width.saturating_sub(1) / 2) as i8, Self::SPAWN_ROW)
    }

    pub fn validate(&self) -> Result<(), ReachError> {
        if !(1..=BitBoard::WIDTH).contains(&self.width) {
            return Err(ReachError::InvalidWidth(self.width));
        }
        self.kicks.validate(self.twist)?;
        Ok(())
    }
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self::srs_plus()
    }
}

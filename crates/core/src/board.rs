//! Packed bit matrix - one u16 per row, 32 rows, row 0 at the bottom.
//! Bit x of a row is column x. Every operation returns a new board.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::piece::{Orientation, Piece};
use crate::points::PackedPoints;

const ROW_MASK: usize = BitBoard::HEIGHT - 1;
const COL_MASK: usize = BitBoard::WIDTH - 1;

/// 32x16 bitboard. For obstacle boards bit=1 means occupied and the columns
/// past the playfield width are permanently set walls.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitBoard {
    rows: [u16; BitBoard::HEIGHT],
}

/// Packed block coordinates, mostly fits on the stack.
pub type BlockList = SmallVec<[PackedPoints; 16]>;

impl BitBoard {
    pub const HEIGHT: usize = 32;
    pub const WIDTH: usize = 16;
    pub const FIELD_WIDTH: usize = 10;

    pub const EMPTY: Self = Self {
        rows: [0; Self::HEIGHT],
    };
    pub const FULL: Self = Self {
        rows: [u16::MAX; Self::HEIGHT],
    };

    #[inline(always)]
    pub const fn from_rows(rows: [u16; Self::HEIGHT]) -> Self {
        Self { rows }
    }

    /// Every row set to `line`.
    #[inline(always)]
    pub const fn splat(line: u16) -> Self {
        Self {
            rows: [line; Self::HEIGHT],
        }
    }

    /// Columns `0..width` set.
    #[inline]
    pub const fn playfield_line(width: usize) -> u16 {
        if width >= Self::WIDTH {
            u16::MAX
        } else {
            (1u16 << width) - 1
        }
    }

    /// Empty obstacle board for a field `width` columns wide.
    #[inline]
    pub const fn field(width: usize) -> Self {
        Self::splat(!Self::playfield_line(width))
    }

    #[inline(always)]
    pub fn rows(&self) -> &[u16; Self::HEIGHT] {
        &self.rows
    }

    #[inline(always)]
    pub fn row(&self, y: usize) -> u16 {
        self.rows[y & ROW_MASK]
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> bool {
        (self.rows[y & ROW_MASK] >> (x & COL_MASK)) & 1 == 1
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Copy with the cell at (x, y) set.
    #[inline]
    pub fn with_block(mut self, x: usize, y: usize) -> Self {
        self.rows[y & ROW_MASK] |= 1 << (x & COL_MASK);
        self
    }

    /// Copy with the cell at (x, y) cleared.
    #[inline]
    pub fn without_block(mut self, x: usize, y: usize) -> Self {
        self.rows[y & ROW_MASK] &= !(1 << (x & COL_MASK));
        self
    }

    /// Copy with row `y` replaced.
    #[inline]
    pub fn with_row(mut self, y: usize, line: u16) -> Self {
        self.rows[y & ROW_MASK] = line;
        self
    }

    #[inline]
    pub fn block(x: usize, y: usize) -> Self {
        Self::EMPTY.with_block(x, y)
    }

    #[inline]
    pub fn line(y: usize, line: u16) -> Self {
        Self::EMPTY.with_row(y, line)
    }

    /// Rows `y` and `y + 1`.
    #[inline]
    pub fn lines2(y: usize, first: u16, second: u16) -> Self {
        Self::line(y, first).with_row(y + 1, second)
    }

    /// Rows `y`, `y + 1` and `y + 2`.
    #[inline]
    pub fn lines3(y: usize, first: u16, second: u16, third: u16) -> Self {
        Self::lines2(y, first, second).with_row(y + 2, third)
    }

    /// Cells covered by `piece` anchored at (x, y). Cells off the board are
    /// dropped.
    pub fn piece(piece: Piece, orientation: Orientation, x: i8, y: i8) -> Self {
        piece
            .cells(orientation)
            .iter()
            .fold(Self::EMPTY, |board, &(dx, dy)| {
                let cx = x as i32 + dx as i32;
                let cy = y as i32 + dy as i32;
                if (0..Self::WIDTH as i32).contains(&cx) && (0..Self::HEIGHT as i32).contains(&cy) {
                    board.with_block(cx as usize, cy as usize)
                } else {
                    board
                }
            })
    }

    /// Parse a diagram, top line = highest row, last line = row 0. `#`, `X`
    /// and `@` are set cells, anything else is empty. Blank lines are
    /// skipped and lines beyond 16 columns are truncated.
    pub fn from_diagram(diagram: &str) -> Self {
        let lines: Vec<&str> = diagram
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let mut board = Self::EMPTY;
        for (y, line) in lines.iter().rev().enumerate().take(Self::HEIGHT) {
            for (x, ch) in line.chars().enumerate().take(Self::WIDTH) {
                if matches!(ch, '#' | 'X' | '@') {
                    board = board.with_block(x, y);
                }
            }
        }
        board
    }

    #[inline(always)]
    fn map_rows(self, f: impl Fn(u16) -> u16) -> Self {
        let mut rows = self.rows;
        for row in rows.iter_mut() {
            *row = f(*row);
        }
        Self { rows }
    }

    #[inline(always)]
    fn zip_rows(self, other: Self, f: impl Fn(u16, u16) -> u16) -> Self {
        let mut rows = self.rows;
        for (row, &o) in rows.iter_mut().zip(other.rows.iter()) {
            *row = f(*row, o);
        }
        Self { rows }
    }

    // ---- row shifts ----

    /// Move every row up by `n` (row y lands on y + n). The `n` rows
    /// introduced at the bottom take `fill`.
    #[inline]
    pub fn shift_up(&self, n: u32, fill: u16) -> Self {
        self.shift_up_with(n, &Self::splat(fill))
    }

    /// Move every row down by `n` (row y lands on y - n). The `n` rows
    /// introduced at the top take `fill`.
    #[inline]
    pub fn shift_down(&self, n: u32, fill: u16) -> Self {
        self.shift_down_with(n, &Self::splat(fill))
    }

    /// Like [`shift_up`](Self::shift_up) but the introduced rows come from
    /// the matching rows of `fill`.
    #[inline]
    pub fn shift_up_with(&self, n: u32, fill: &Self) -> Self {
        let n = n as usize;
        if n >= Self::HEIGHT {
            return *fill;
        }
        let mut rows = fill.rows;
        rows[n..].copy_from_slice(&self.rows[..Self::HEIGHT - n]);
        Self { rows }
    }

    /// Like [`shift_down`](Self::shift_down) but the introduced rows come
    /// from the matching rows of `fill`.
    #[inline]
    pub fn shift_down_with(&self, n: u32, fill: &Self) -> Self {
        let n = n as usize;
        if n >= Self::HEIGHT {
            return *fill;
        }
        let mut rows = fill.rows;
        rows[..Self::HEIGHT - n].copy_from_slice(&self.rows[n..]);
        Self { rows }
    }

    // ---- column shifts ----

    /// Column x moves to x - k. Bits pushed past column 0 are lost.
    #[inline]
    pub fn shift_left(&self, k: u32) -> Self {
        self.map_rows(|r| r.checked_shr(k).unwrap_or(0))
    }

    /// Column x moves to x + k. Bits pushed past column 15 are lost.
    #[inline]
    pub fn shift_right(&self, k: u32) -> Self {
        self.map_rows(|r| r.checked_shl(k).unwrap_or(0))
    }

    /// Cell (x, y) moves to (x + dx, y + dy), zero fill on every edge.
    #[inline]
    pub fn translate(&self, dx: i8, dy: i8) -> Self {
        let horizontal = if dx >= 0 {
            self.shift_right(dx as u32)
        } else {
            self.shift_left(dx.unsigned_abs() as u32)
        };
        if dy >= 0 {
            horizontal.shift_up(dy as u32, 0)
        } else {
            horizontal.shift_down(dy.unsigned_abs() as u32, 0)
        }
    }

    // ---- boolean helpers ----

    #[inline(always)]
    pub fn and_not(self, other: Self) -> Self {
        self.zip_rows(other, |a, b| a & !b)
    }

    /// `self | (a & b)`
    #[inline(always)]
    pub fn or_and(self, a: Self, b: Self) -> Self {
        let mut rows = self.rows;
        for ((row, &ra), &rb) in rows.iter_mut().zip(a.rows.iter()).zip(b.rows.iter()) {
            *row |= ra & rb;
        }
        Self { rows }
    }

    // ---- per-line predicates ----

    /// Expanded mask: row = 0xFFFF where the rows of `self` and `other` are
    /// equal, 0 elsewhere.
    #[inline]
    pub fn lines_eq(&self, other: &Self) -> Self {
        self.zip_rows(*other, |a, b| if a == b { u16::MAX } else { 0 })
    }

    #[inline]
    pub fn lines_ne(&self, other: &Self) -> Self {
        !self.lines_eq(other)
    }

    #[inline]
    pub fn lines_eq_value(&self, line: u16) -> Self {
        self.lines_eq(&Self::splat(line))
    }

    /// One bit per row, set when the row is non-zero.
    #[inline]
    pub fn compress_mask(&self) -> u32 {
        self.rows
            .iter()
            .enumerate()
            .fold(0u32, |acc, (y, &r)| acc | (((r != 0) as u32) << y))
    }

    /// Inverse of [`compress_mask`](Self::compress_mask): row y = 0xFFFF when
    /// bit y is set.
    #[inline]
    pub fn expand_mask(mask: u32) -> Self {
        let mut rows = [0u16; Self::HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            *row = 0u16.wrapping_sub(((mask >> y) & 1) as u16);
        }
        Self { rows }
    }

    /// Compact mask of rows with all 16 bits set. With walls in place this
    /// is the set of clearable lines.
    #[inline]
    pub fn full_lines(&self) -> u32 {
        self.lines_eq_value(u16::MAX).compress_mask()
    }

    /// Remove the rows flagged in `row_mask`, compact the rest downward and
    /// fill the vacated top rows with `fill`.
    pub fn clear_lines(&self, fill: u16, row_mask: u32) -> Self {
        let mut rows = [fill; Self::HEIGHT];
        let mut dst = 0usize;
        for (y, &row) in self.rows.iter().enumerate() {
            rows[dst] = row;
            dst += ((row_mask >> y) & 1 == 0) as usize;
        }
        for row in rows[dst..].iter_mut() {
            *row = fill;
        }
        Self { rows }
    }

    // ---- enumeration ----

    #[inline]
    pub fn total_blocks(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Set cells in row-major order, bottom row first.
    pub fn blocks(&self) -> Blocks {
        Blocks {
            rows: self.rows,
            y: 0,
        }
    }

    /// Set cells packed three to a word, in [`blocks`](Self::blocks) order.
    pub fn locate_all_blocks(&self) -> BlockList {
        let mut out = BlockList::new();
        let mut current = PackedPoints::new();
        for (x, y) in self.blocks() {
            current = current.with(x, y);
            if current.is_full() {
                out.push(current);
                current = PackedPoints::new();
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }
}

/// Iterator over set cells of a [`BitBoard`].
pub struct Blocks {
    rows: [u16; BitBoard::HEIGHT],
    y: usize,
}

impl Iterator for Blocks {
    type Item = (u8, u8);

    fn next(&mut self) -> Option<(u8, u8)> {
        while self.y < BitBoard::HEIGHT {
            let row = &mut self.rows[self.y];
            if *row != 0 {
                let x = row.trailing_zeros() as u8;
                *row &= *row - 1;
                return Some((x, self.y as u8));
            }
            self.y += 1;
        }
        None
    }
}

impl BitAnd for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self {
        self.zip_rows(rhs, |a, b| a & b)
    }
}

impl BitOr for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self {
        self.zip_rows(rhs, |a, b| a | b)
    }
}

impl BitXor for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self {
        self.zip_rows(rhs, |a, b| a ^ b)
    }
}

impl Not for BitBoard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        self.map_rows(|r| !r)
    }
}

impl BitAndAssign for BitBoard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl BitOrAssign for BitBoard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

impl BitXorAssign for BitBoard {
    #[inline(always)]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl Serialize for BitBoard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.rows.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BitBoard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let vec: Vec<u16> = Vec::deserialize(deserializer)?;
        let rows: [u16; BitBoard::HEIGHT] = vec
            .try_into()
            .map_err(|_| serde::de::Error::custom("expected 32 rows"))?;
        Ok(BitBoard { rows })
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..Self::HEIGHT).rev() {
            for x in 0..Self::WIDTH {
                write!(f, "{}", if self.get(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // non-empty rows only, top first
        let mut map = f.debug_map();
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y] != 0 {
                map.entry(&y, &format_args!("{:016b}", self.rows[y]));
            }
        }
        map.finish()
    }
}

//! Up to three board coordinates packed into one u32.
//!
//! Layout: point `i` occupies bits `10*i .. 10*i + 10` (x in the low 4 bits,
//! y in the next 6), the count sits in bits 30..32.

const X_BITS: u32 = 4;
const POINT_BITS: u32 = 10;
const X_MASK: u32 = (1 << X_BITS) - 1;
const Y_MASK: u32 = (1 << (POINT_BITS - X_BITS)) - 1;
const COUNT_SHIFT: u32 = 30;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct PackedPoints(u32);

impl PackedPoints {
    pub const CAPACITY: usize = 3;

    #[inline(always)]
    pub const fn new() -> Self {
        Self(0)
    }

    #[inline(always)]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn len(self) -> usize {
        (self.0 >> COUNT_SHIFT) as usize
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub const fn is_full(self) -> bool {
        self.len() == Self::CAPACITY
    }

    /// Append a point. x is masked to 4 bits, y to 6.
    #[inline(always)]
    pub fn with(self, x: u8, y: u8) -> Self {
        debug_assert!(!self.is_full(), "PackedPoints overflow");
        let len = self.len() as u32;
        let point = (x as u32 & X_MASK) | ((y as u32 & Y_MASK) << X_BITS);
        let body = self.0 & ((1 << COUNT_SHIFT) - 1);
        Self(body | (point << (POINT_BITS * len)) | ((len + 1) << COUNT_SHIFT))
    }

    pub fn get(self, i: usize) -> Option<(u8, u8)> {
        if i >= self.len() {
            return None;
        }
        let point = self.0 >> (POINT_BITS * i as u32);
        Some(((point & X_MASK) as u8, ((point >> X_BITS) & Y_MASK) as u8))
    }

    pub fn iter(self) -> impl Iterator<Item = (u8, u8)> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

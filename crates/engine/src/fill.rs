//! Binary-lifting flood fills.
//!
//! `reached` must be a subset of `free`. Each fill doubles the propagation
//! distance per step (Kogge-Stone), so a 16-wide row takes four steps per
//! direction and a 32-row board five.

use tetrafill_core::{BitBoard, Quad};

#[inline(always)]
fn fill_row(free: u16, reached: u16) -> u16 {
    // toward higher columns
    let mut g = reached;
    let mut p = free;
    g |= p & (g << 1);
    p &= p << 1;
    g |= p & (g << 2);
    p &= p << 2;
    g |= p & (g << 4);
    p &= p << 4;
    g |= p & (g << 8);
    let rightward = g;

    // toward lower columns
    let mut g = reached;
    let mut p = free;
    g |= p & (g >> 1);
    p &= p >> 1;
    g |= p & (g >> 2);
    p &= p >> 2;
    g |= p & (g >> 4);
    p &= p >> 4;
    g |= p & (g >> 8);

    rightward | g
}

/// Every cell reachable by sliding left or right through free cells.
#[inline]
pub fn fill_horizontal(free: &BitBoard, reached: &BitBoard) -> BitBoard {
    let mut rows = *reached.rows();
    for (row, &f) in rows.iter_mut().zip(free.rows().iter()) {
        *row = fill_row(f, *row);
    }
    BitBoard::from_rows(rows)
}

/// Every cell reachable by dropping through free cells. Never moves up.
#[inline]
pub fn fill_vertical(free: &BitBoard, reached: &BitBoard) -> BitBoard {
    let mut g = *reached;
    let mut p = *free;
    for n in [1, 2, 4, 8] {
        g = g.or_and(p, g.shift_down(n, 0));
        p &= p.shift_down(n, 0);
    }
    g.or_and(p, g.shift_down(16, 0))
}

/// [`fill_horizontal`] over four planes.
#[inline]
pub fn fill_horizontal_x4(free: &Quad<BitBoard>, reached: Quad<BitBoard>) -> Quad<BitBoard> {
    free.zip_with(reached, |f, r| fill_horizontal(&f, &r))
}

/// [`fill_vertical`] over four planes, in lockstep.
#[inline]
pub fn fill_vertical_x4(free: &Quad<BitBoard>, reached: Quad<BitBoard>) -> Quad<BitBoard> {
    let mut g = reached;
    let mut p = *free;
    for n in [1, 2, 4, 8] {
        g = g.zip_with(p, |g, p| g.or_and(p, g.shift_down(n, 0)));
        p = p.map(|p| p & p.shift_down(n, 0));
    }
    g.zip_with(p, |g, p| g.or_and(p, g.shift_down(16, 0)))
}

//! One value per orientation.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::piece::Orientation;

/// Fixed four-orientation record (up, right, down, left).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Quad<T> {
    pub up: T,
    pub right: T,
    pub down: T,
    pub left: T,
}

impl<T> Quad<T> {
    pub const fn new(up: T, right: T, down: T, left: T) -> Self {
        Self {
            up,
            right,
            down,
            left,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Orientation) -> T) -> Self {
        Self {
            up: f(Orientation::Up),
            right: f(Orientation::Right),
            down: f(Orientation::Down),
            left: f(Orientation::Left),
        }
    }

    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value.clone(), value.clone(), value)
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quad<U> {
        Quad {
            up: f(self.up),
            right: f(self.right),
            down: f(self.down),
            left: f(self.left),
        }
    }

    pub fn zip_with<U, V>(self, other: Quad<U>, mut f: impl FnMut(T, U) -> V) -> Quad<V> {
        Quad {
            up: f(self.up, other.up),
            right: f(self.right, other.right),
            down: f(self.down, other.down),
            left: f(self.left, other.left),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Orientation, &T)> {
        Orientation::ALL.into_iter().map(move |o| (o, &self[o]))
    }

    pub fn into_array(self) -> [T; 4] {
        [self.up, self.right, self.down, self.left]
    }
}

impl<T> Index<Orientation> for Quad<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, o: Orientation) -> &T {
        match o {
            Orientation::Up => &self.up,
            Orientation::Right => &self.right,
            Orientation::Down => &self.down,
            Orientation::Left => &self.left,
        }
    }
}

impl<T> IndexMut<Orientation> for Quad<T> {
    #[inline(always)]
    fn index_mut(&mut self, o: Orientation) -> &mut T {
        match o {
            Orientation::Up => &mut self.up,
            Orientation::Right => &mut self.right,
            Orientation::Down => &mut self.down,
            Orientation::Left => &mut self.left,
        }
    }
}

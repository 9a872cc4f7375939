use num_traits::Zero;
use std::fmt::{Display, Formatter};
use std::ops::{Add, Div, Mul};

/// A 2D vector in screen space: x grows to the right, y grows downward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn splat(v: f32) -> Vec2 {
        Vec2 { x: v, y: v }
    }

    /// Index of the tile containing this point, using floor division.
    pub fn as_tile(&self, tile_size: f32) -> Vec2i {
        Vec2i {
            x: (self.x / tile_size).floor() as i32,
            y: (self.y / tile_size).floor() as i32,
        }
    }
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2 { x: 0.0, y: 0.0 }
    }

    fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }
}

impl Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "vec({:.1}, {:.1})", self.x, self.y)
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

/// An integer vector, used for tile coordinates and sprite sheet offsets.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub fn right() -> Vec2i {
        Vec2i { x: 1, y: 0 }
    }
    pub fn down() -> Vec2i {
        Vec2i { x: 0, y: 1 }
    }
}

impl From<Vec2i> for Vec2 {
    fn from(value: Vec2i) -> Self {
        Vec2 {
            x: value.x as f32,
            y: value.y as f32,
        }
    }
}

impl Add<Vec2i> for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Vec2i) -> Self::Output {
        Vec2i {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl Mul<i32> for Vec2i {
    type Output = Vec2i;

    fn mul(self, rhs: i32) -> Self::Output {
        Vec2i {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// An axis-aligned rectangle, stored as top-left corner and extent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    top_left: Vec2,
    extent: Vec2,
}

impl Rect {
    pub fn new(top_left: Vec2, extent: Vec2) -> Self {
        Self { top_left, extent }
    }

    pub fn left(&self) -> f32 {
        self.top_left.x
    }
    pub fn top(&self) -> f32 {
        self.top_left.y
    }
    pub fn right(&self) -> f32 {
        self.top_left.x + self.extent.x
    }
    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.extent.y
    }
    pub fn centre(&self) -> Vec2 {
        self.top_left + self.extent / 2.0
    }

    /// Strict intersection: rectangles that only share an edge or a corner do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// A linear interpolation between two values.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

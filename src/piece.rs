//! Falling piece value and rotation

use crate::tetromino::Shape;
use rand::Rng;
use ratatui::style::Color;

/// A piece: a shape, its four offsets around the pivot, and its color.
///
/// Rotation never mutates a piece. `rotate_right`/`rotate_left` return a new value and the
/// caller decides whether to keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    coords: [(i32, i32); 4],
    color: Color,
}

impl Default for Piece {
    fn default() -> Self {
        Self::new(Shape::Empty)
    }
}

impl Piece {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            coords: shape.offsets(),
            color: shape.color(),
        }
    }

    /// Load offsets and color for `shape`, replacing whatever was there
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.coords = shape.offsets();
        self.color = shape.color();
    }

    /// Pick one of the seven playable shapes with equal probability
    pub fn set_random_shape<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let shape = Shape::PLAYABLE[rng.gen_range(0..Shape::PLAYABLE.len())];
        self.set_shape(shape);
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// x offset of the i-th block
    #[allow(dead_code)]
    pub fn x(&self, index: usize) -> i32 {
        self.coords[index].0
    }

    /// y offset of the i-th block
    #[allow(dead_code)]
    pub fn y(&self, index: usize) -> i32 {
        self.coords[index].1
    }

    /// Absolute cells when the pivot sits at (x, y)
    pub fn cells(&self, x: i32, y: i32) -> [(i32, i32); 4] {
        self.coords.map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Rotate 90 degrees clockwise: (x, y) -> (-y, x)
    pub fn rotate_right(&self) -> Piece {
        if self.shape == Shape::Square {
            return *self;
        }
        Piece {
            coords: self.coords.map(|(x, y)| (-y, x)),
            ..*self
        }
    }

    /// Rotate 90 degrees counter-clockwise: (x, y) -> (y, -x)
    pub fn rotate_left(&self) -> Piece {
        if self.shape == Shape::Square {
            return *self;
        }
        Piece {
            coords: self.coords.map(|(x, y)| (y, -x)),
            ..*self
        }
    }
}

//! Tetromino definitions and shapes
//!
//! The seven playable shapes plus an `Empty` placeholder, each with a fixed set of
//! four (x, y) offsets around a pivot. y grows downward.

use ratatui::style::Color;

/// The shape variants, including the non-playable `Empty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shape {
    #[default]
    Empty,
    Z,
    S,
    Line,
    T,
    Square,
    L,
    MirroredL,
}

/// Offsets per shape, indexed by `Shape as usize`
const COORDS_TABLE: [[(i32, i32); 4]; 8] = [
    [(0, 0), (0, 0), (0, 0), (0, 0)],     // Empty
    [(-1, -1), (0, -1), (0, 0), (1, 0)],  // Z
    [(-1, 0), (0, 0), (0, -1), (1, -1)],  // S
    [(-1, 0), (0, 0), (1, 0), (2, 0)],    // Line
    [(-1, 0), (0, 0), (1, 0), (0, -1)],   // T
    [(0, 0), (1, 0), (0, -1), (1, -1)],   // Square
    [(-1, -1), (-1, 0), (0, 0), (1, 0)],  // L
    [(-1, 0), (0, 0), (1, 0), (1, -1)],   // MirroredL
];

const COLOR_TABLE: [Color; 8] = [
    Color::Rgb(0, 0, 0),
    Color::Rgb(204, 102, 102),
    Color::Rgb(102, 204, 102),
    Color::Rgb(102, 102, 204),
    Color::Rgb(204, 204, 102),
    Color::Rgb(204, 102, 204),
    Color::Rgb(102, 204, 204),
    Color::Rgb(218, 170, 0),
];

impl Shape {
    /// The seven shapes a random draw can produce
    pub const PLAYABLE: [Shape; 7] = [
        Shape::Z,
        Shape::S,
        Shape::Line,
        Shape::T,
        Shape::Square,
        Shape::L,
        Shape::MirroredL,
    ];

    /// Spawn offsets for this shape
    pub fn offsets(&self) -> [(i32, i32); 4] {
        COORDS_TABLE[*self as usize]
    }

    /// Display color for this shape
    pub fn color(&self) -> Color {
        COLOR_TABLE[*self as usize]
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Shape::Empty)
    }

    /// Name shown in logs
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Empty => "Empty",
            Shape::Z => "Z",
            Shape::S => "S",
            Shape::Line => "Line",
            Shape::T => "T",
            Shape::Square => "Square",
            Shape::L => "L",
            Shape::MirroredL => "MirroredL",
        }
    }
}

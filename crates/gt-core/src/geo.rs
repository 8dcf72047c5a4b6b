//! Planar geometry: points and axis-aligned rectangles.
//!
//! Coordinates are `f64` world units (tiles) in screen orientation: `x` grows
//! eastwards, `y` grows southwards.  Lanes, crosswalks, and vehicle
//! footprints are all [`Rect`]s.

use crate::{CoreError, CoreResult, Direction};

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position in world units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// for nearest-neighbour comparisons.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        self.distance_sq(other).sqrt()
    }

    /// The point `amount` units away in `direction`.
    #[inline]
    pub fn offset(self, direction: Direction, amount: f64) -> Point {
        let (dx, dy) = direction.unit();
        Point::new(self.x + dx as f64 * amount, self.y + dy as f64 * amount)
    }

    /// Coordinate on the axis `direction` travels along.
    #[inline]
    pub fn along(self, direction: Direction) -> f64 {
        if direction.is_horizontal() { self.x } else { self.y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Corner ────────────────────────────────────────────────────────────────────

/// A named reference point of a [`Rect`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Corner {
    /// camelCase label used in exported metric tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Corner::TopLeft     => "topLeft",
            Corner::TopRight    => "topRight",
            Corner::BottomLeft  => "bottomLeft",
            Corner::BottomRight => "bottomRight",
            Corner::Center      => "center",
        }
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// An axis-aligned rectangle.
///
/// Invariant: `top_left.x <= bottom_right.x && top_left.y <= bottom_right.y`.
/// The fields are private so the invariant can only be established through
/// [`Rect::new`] / [`Rect::from_origin_size`]; a rectangle is immutable once
/// built, moving footprints produce a new one via [`translated`](Self::translated).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    top_left:     Point,
    bottom_right: Point,
}

impl Rect {
    /// Build a rectangle from its corners, rejecting inverted corners.
    pub fn new(top_left: Point, bottom_right: Point) -> CoreResult<Self> {
        let finite = top_left.x.is_finite()
            && top_left.y.is_finite()
            && bottom_right.x.is_finite()
            && bottom_right.y.is_finite();
        if !finite || top_left.x > bottom_right.x || top_left.y > bottom_right.y {
            return Err(CoreError::InvalidRect { top_left, bottom_right });
        }
        Ok(Self { top_left, bottom_right })
    }

    /// Build a rectangle from its top-left corner and a non-negative size.
    pub fn from_origin_size(origin: Point, width: f64, height: f64) -> CoreResult<Self> {
        Self::new(origin, Point::new(origin.x + width, origin.y + height))
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn corner(&self, corner: Corner) -> Point {
        let (tl, br) = (self.top_left, self.bottom_right);
        match corner {
            Corner::TopLeft     => tl,
            Corner::TopRight    => Point::new(br.x, tl.y),
            Corner::BottomLeft  => Point::new(tl.x, br.y),
            Corner::BottomRight => br,
            Corner::Center      => self.center(),
        }
    }

    /// Closed containment test (edges count as inside).
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.top_left.x
            && p.x <= self.bottom_right.x
            && p.y >= self.top_left.y
            && p.y <= self.bottom_right.y
    }

    /// `true` when the two rectangles share an area of positive size.
    /// Rectangles that merely touch along an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.top_left.x < other.bottom_right.x
            && other.top_left.x < self.bottom_right.x
            && self.top_left.y < other.bottom_right.y
            && other.top_left.y < self.bottom_right.y
    }

    /// The same rectangle shifted by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Rect {
        Rect {
            top_left:     Point::new(self.top_left.x + dx, self.top_left.y + dy),
            bottom_right: Point::new(self.bottom_right.x + dx, self.bottom_right.y + dy),
        }
    }

    /// Size of the rectangle along the axis `direction` travels on.
    #[inline]
    pub fn extent_along(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() { self.width() } else { self.height() }
    }

    /// Coordinate of the edge facing `direction` (the front edge of a
    /// footprint moving that way).
    #[inline]
    pub fn leading_edge(&self, direction: Direction) -> f64 {
        match direction {
            Direction::East  => self.bottom_right.x,
            Direction::West  => self.top_left.x,
            Direction::South => self.bottom_right.y,
            Direction::North => self.top_left.y,
        }
    }

    /// Coordinate of the edge facing away from `direction`.
    #[inline]
    pub fn trailing_edge(&self, direction: Direction) -> f64 {
        self.leading_edge(direction.opposite())
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.top_left, self.bottom_right)
    }
}

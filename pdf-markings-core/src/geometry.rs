//! Basic geometric types for page-space markings
//!
//! Coordinates follow PDF page space: the origin sits at the lower-left
//! corner of the page and `y` grows upward.

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// An axis-aligned rectangle defined by two points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// Lower-left corner
    pub lower_left: Point,
    /// Upper-right corner
    pub upper_right: Point,
}

impl Rectangle {
    /// Create a new rectangle from two points
    pub fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Create a rectangle from position and size
    pub fn from_position_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            lower_left: Point::new(x, y),
            upper_right: Point::new(x + width, y + height),
        }
    }

    /// Create a rectangle from its four edges
    pub fn from_edges(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Get the width
    pub fn width(&self) -> f64 {
        self.upper_right.x - self.lower_left.x
    }

    /// Get the height
    pub fn height(&self) -> f64 {
        self.upper_right.y - self.lower_left.y
    }

    /// Get the area
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Get the center point
    pub fn center(&self) -> Point {
        Point::new(
            (self.lower_left.x + self.upper_right.x) / 2.0,
            (self.lower_left.y + self.upper_right.y) / 2.0,
        )
    }

    pub fn min_x(&self) -> f64 {
        self.lower_left.x
    }

    pub fn min_y(&self) -> f64 {
        self.lower_left.y
    }

    pub fn max_x(&self) -> f64 {
        self.upper_right.x
    }

    pub fn max_y(&self) -> f64 {
        self.upper_right.y
    }

    /// True when every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.lower_left.x.is_finite()
            && self.lower_left.y.is_finite()
            && self.upper_right.x.is_finite()
            && self.upper_right.y.is_finite()
    }

    /// True when the rectangle encloses no area
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Whether two rectangles share a region of positive area.
    ///
    /// Rectangles that only touch along an edge or at a corner do not
    /// intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// The overlapping region, if it has positive area
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        if !self.intersects(other) {
            return None;
        }
        Some(Rectangle::from_edges(
            self.min_x().max(other.min_x()),
            self.min_y().max(other.min_y()),
            self.max_x().min(other.max_x()),
            self.max_y().min(other.max_y()),
        ))
    }

    /// Smallest rectangle enclosing both
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle::from_edges(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }

    /// Remove `other` from this rectangle.
    ///
    /// Produces up to four disjoint fragments: a full-width slice above the
    /// overlap, a full-width slice below it, then the left and right pieces
    /// level with the overlap. A rectangle that does not intersect `other` is
    /// returned unchanged; one fully covered by `other` yields no fragments.
    pub fn subtract(&self, other: &Rectangle) -> Vec<Rectangle> {
        let Some(overlap) = self.intersection(other) else {
            return vec![*self];
        };

        let mut fragments = Vec::with_capacity(4);

        if self.max_y() > overlap.max_y() {
            fragments.push(Rectangle::from_edges(
                self.min_x(),
                overlap.max_y(),
                self.max_x(),
                self.max_y(),
            ));
        }
        if self.min_y() < overlap.min_y() {
            fragments.push(Rectangle::from_edges(
                self.min_x(),
                self.min_y(),
                self.max_x(),
                overlap.min_y(),
            ));
        }
        if self.min_x() < overlap.min_x() {
            fragments.push(Rectangle::from_edges(
                self.min_x(),
                overlap.min_y(),
                overlap.min_x(),
                overlap.max_y(),
            ));
        }
        if self.max_x() > overlap.max_x() {
            fragments.push(Rectangle::from_edges(
                overlap.max_x(),
                overlap.min_y(),
                self.max_x(),
                overlap.max_y(),
            ));
        }

        fragments
    }

    /// Half-open containment test: lower and left edges are inside, upper
    /// and right edges are not.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x < self.max_x()
            && point.y >= self.min_y()
            && point.y < self.max_y()
    }
}

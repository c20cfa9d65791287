//! A single page-scoped marking

use crate::error::{MarkingsError, Result};
use crate::geometry::Rectangle;
use crate::reading_class::{ClassSource, ReadingClass};
use std::cmp::Ordering;

/// A rectangle on one page, tagged with an importance class and the source
/// that produced it.
///
/// Two reading rects are equal when page, rectangle, class and source are
/// all equal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadingRect {
    /// Zero-based page index
    pub page_index: usize,
    /// Bounds in page space
    pub rect: Rectangle,
    /// Importance class
    pub class: ReadingClass,
    /// Provenance
    pub source: ClassSource,
}

impl ReadingRect {
    /// Create a reading rect, rejecting negative sizes and non-finite
    /// coordinates.
    pub fn new(
        page_index: usize,
        rect: Rectangle,
        class: ReadingClass,
        source: ClassSource,
    ) -> Result<Self> {
        let reading_rect = Self {
            page_index,
            rect,
            class,
            source,
        };
        reading_rect.validate()?;
        Ok(reading_rect)
    }

    /// Check that the bounds are finite and not inverted.
    ///
    /// Rects built from a struct literal or deserialized skip
    /// [`ReadingRect::new`], so the markings set calls this on insertion.
    pub fn validate(&self) -> Result<()> {
        validate(&self.rect)
    }

    /// Shorthand for `ReadingRect::new` with position and size
    pub fn from_position_and_size(
        page_index: usize,
        (x, y, width, height): (f64, f64, f64, f64),
        class: ReadingClass,
        source: ClassSource,
    ) -> Result<Self> {
        Self::new(
            page_index,
            Rectangle::from_position_and_size(x, y, width, height),
            class,
            source,
        )
    }

    /// Same page, class and source with different bounds
    pub(crate) fn with_rect(&self, rect: Rectangle) -> Self {
        Self { rect, ..*self }
    }

    pub fn with_class(&self, class: ReadingClass) -> Self {
        Self { class, ..*self }
    }

    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Whether both rects sit on the same page and overlap with positive area
    pub fn intersects(&self, other: &ReadingRect) -> bool {
        self.page_index == other.page_index && self.rect.intersects(&other.rect)
    }

    /// Reading order: page, then top-to-bottom, then left-to-right.
    ///
    /// Remaining coordinates, class and source break ties so sorting is
    /// deterministic.
    pub fn reading_order(&self, other: &ReadingRect) -> Ordering {
        self.page_index
            .cmp(&other.page_index)
            .then_with(|| other.rect.max_y().total_cmp(&self.rect.max_y()))
            .then_with(|| self.rect.min_x().total_cmp(&other.rect.min_x()))
            .then_with(|| other.rect.min_y().total_cmp(&self.rect.min_y()))
            .then_with(|| self.rect.max_x().total_cmp(&other.rect.max_x()))
            .then_with(|| self.class.cmp(&other.class))
            .then_with(|| self.source.raw_value().cmp(&other.source.raw_value()))
    }
}

fn validate(rect: &Rectangle) -> Result<()> {
    if !rect.is_finite() {
        return Err(MarkingsError::InvalidGeometry(format!(
            "non-finite coordinates in {rect:?}"
        )));
    }
    if rect.width() < 0.0 || rect.height() < 0.0 {
        return Err(MarkingsError::InvalidGeometry(format!(
            "negative size {}x{}",
            rect.width(),
            rect.height()
        )));
    }
    Ok(())
}

/// Sort rects in reading order
pub fn sort_reading_order(rects: &mut [ReadingRect]) {
    rects.sort_by(|a, b| a.reading_order(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rr(page: usize, x: f64, y: f64, w: f64, h: f64) -> ReadingRect {
        ReadingRect::from_position_and_size(
            page,
            (x, y, w, h),
            ReadingClass::Medium,
            ClassSource::Click,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_negative_size() {
        let result = ReadingRect::from_position_and_size(
            0,
            (0.0, 0.0, -5.0, 10.0),
            ReadingClass::Low,
            ClassSource::Click,
        );
        assert!(matches!(result, Err(MarkingsError::InvalidGeometry(_))));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = ReadingRect::from_position_and_size(
            0,
            (f64::INFINITY, 0.0, 5.0, 10.0),
            ReadingClass::Low,
            ClassSource::Click,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_size_is_accepted() {
        assert!(ReadingRect::from_position_and_size(
            0,
            (1.0, 1.0, 0.0, 0.0),
            ReadingClass::Low,
            ClassSource::Click
        )
        .is_ok());
    }

    #[test]
    fn test_value_equality() {
        let a = rr(0, 0.0, 0.0, 10.0, 10.0);
        let b = rr(0, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(a, b);
        assert_ne!(a, a.with_class(ReadingClass::High));
        assert_ne!(a, rr(1, 0.0, 0.0, 10.0, 10.0));
        assert_ne!(
            a,
            ReadingRect {
                source: ClassSource::Eye,
                ..a
            }
        );
    }

    #[test]
    fn test_reading_order_top_to_bottom_then_left_to_right() {
        let top_right = rr(0, 300.0, 700.0, 100.0, 20.0);
        let top_left = rr(0, 50.0, 700.0, 100.0, 20.0);
        let bottom = rr(0, 50.0, 100.0, 100.0, 20.0);
        let next_page = rr(1, 50.0, 750.0, 100.0, 20.0);

        let mut rects = vec![next_page, bottom, top_right, top_left];
        sort_reading_order(&mut rects);
        assert_eq!(rects, vec![top_left, top_right, bottom, next_page]);
    }

    #[test]
    fn test_intersects_requires_same_page() {
        let a = rr(0, 0.0, 0.0, 10.0, 10.0);
        let b = rr(1, 5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&rr(0, 5.0, 5.0, 10.0, 10.0)));
    }
}

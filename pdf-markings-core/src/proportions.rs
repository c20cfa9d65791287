//! Area-based reading proportions
//!
//! A proportion is the share of the document's readable surface covered by
//! one importance class. The surface is the sum of every page's content
//! rectangle scaled by
//! [`MarkingsOptions::page_area_multiplier`](crate::MarkingsOptions).
//! Ratios are not clamped: markings drawn slightly past the page bounds can
//! push a value marginally above 1.

use crate::error::{MarkingsError, Result};
use crate::geometry::Rectangle;
use crate::reading_class::ReadingClass;
use crate::reading_rect::ReadingRect;

/// Page geometry supplied by the PDF layer.
///
/// Values must stay stable for the duration of one proportion calculation.
pub trait PageGeometry {
    /// Number of pages in the document
    fn page_count(&self) -> usize;

    /// Content rectangle of a page, `None` when the page does not exist
    fn page_content_rect(&self, page_index: usize) -> Option<Rectangle>;
}

impl PageGeometry for [Rectangle] {
    fn page_count(&self) -> usize {
        self.len()
    }

    fn page_content_rect(&self, page_index: usize) -> Option<Rectangle> {
        self.get(page_index).copied()
    }
}

impl PageGeometry for Vec<Rectangle> {
    fn page_count(&self) -> usize {
        self.as_slice().page_count()
    }

    fn page_content_rect(&self, page_index: usize) -> Option<Rectangle> {
        self.as_slice().page_content_rect(page_index)
    }
}

/// A document whose pages all share one size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformPages {
    pub page_count: usize,
    pub content_rect: Rectangle,
}

impl UniformPages {
    pub fn new(page_count: usize, width: f64, height: f64) -> Self {
        Self {
            page_count,
            content_rect: Rectangle::from_position_and_size(0.0, 0.0, width, height),
        }
    }

    /// US Letter pages (612 x 792 points)
    pub fn letter(page_count: usize) -> Self {
        Self::new(page_count, 612.0, 792.0)
    }

    /// A4 pages (595 x 842 points)
    pub fn a4(page_count: usize) -> Self {
        Self::new(page_count, 595.0, 842.0)
    }
}

impl PageGeometry for UniformPages {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_content_rect(&self, page_index: usize) -> Option<Rectangle> {
        (page_index < self.page_count).then_some(self.content_rect)
    }
}

/// Share of readable surface covered by each relevance class
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proportions {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Proportions {
    /// Combined share of all three classes
    pub fn total(&self) -> f64 {
        self.low + self.medium + self.high
    }

    /// Share for one relevance class, `None` for other classes
    pub fn get(&self, class: ReadingClass) -> Option<f64> {
        match class {
            ReadingClass::Low => Some(self.low),
            ReadingClass::Medium => Some(self.medium),
            ReadingClass::High => Some(self.high),
            _ => None,
        }
    }
}

/// Summed page area scaled by `multiplier`
pub fn readable_surface<G>(geometry: &G, multiplier: f64) -> Result<f64>
where
    G: PageGeometry + ?Sized,
{
    let mut total = 0.0;
    for page in 0..geometry.page_count() {
        let content = geometry
            .page_content_rect(page)
            .ok_or(MarkingsError::MissingPageGeometry(page))?;
        total += content.area();
    }

    let adjusted = total * multiplier;
    if adjusted.is_nan() || adjusted <= 0.0 {
        return Err(MarkingsError::EmptyDocument);
    }
    Ok(adjusted)
}

/// Share of the readable surface covered by `class`.
///
/// Rects are summed as given, so callers flatten first to avoid counting
/// overlaps twice.
pub fn class_proportion<G>(
    rects: &[ReadingRect],
    geometry: &G,
    class: ReadingClass,
    multiplier: f64,
) -> Result<f64>
where
    G: PageGeometry + ?Sized,
{
    check_rects(rects, geometry.page_count())?;
    let surface = readable_surface(geometry, multiplier)?;
    Ok(class_area(rects, class) / surface)
}

/// Low, medium and high shares of the readable surface
pub fn relevance_proportions<G>(
    rects: &[ReadingRect],
    geometry: &G,
    multiplier: f64,
) -> Result<Proportions>
where
    G: PageGeometry + ?Sized,
{
    check_rects(rects, geometry.page_count())?;
    let surface = readable_surface(geometry, multiplier)?;
    Ok(Proportions {
        low: class_area(rects, ReadingClass::Low) / surface,
        medium: class_area(rects, ReadingClass::Medium) / surface,
        high: class_area(rects, ReadingClass::High) / surface,
    })
}

fn class_area(rects: &[ReadingRect], class: ReadingClass) -> f64 {
    rects
        .iter()
        .filter(|r| r.class == class)
        .map(ReadingRect::area)
        .sum()
}

/// Every rect must lie on an existing page and have valid bounds before its
/// area is summed
pub(crate) fn check_rects(rects: &[ReadingRect], page_count: usize) -> Result<()> {
    for rect in rects {
        if rect.page_index >= page_count {
            return Err(MarkingsError::PageOutOfRange {
                page: rect.page_index,
                page_count,
            });
        }
        rect.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading_class::ClassSource;

    fn rr(page: usize, x: f64, y: f64, w: f64, h: f64, class: ReadingClass) -> ReadingRect {
        ReadingRect::from_position_and_size(page, (x, y, w, h), class, ClassSource::Click).unwrap()
    }

    #[test]
    fn test_uniform_pages() {
        let pages = UniformPages::new(3, 100.0, 200.0);
        assert_eq!(pages.page_count(), 3);
        assert_eq!(pages.page_content_rect(2).unwrap().area(), 20_000.0);
        assert_eq!(pages.page_content_rect(3), None);
    }

    #[test]
    fn test_slice_geometry() {
        let pages = vec![
            Rectangle::from_position_and_size(0.0, 0.0, 10.0, 10.0),
            Rectangle::from_position_and_size(0.0, 0.0, 20.0, 10.0),
        ];
        assert_eq!(pages.page_count(), 2);
        assert_eq!(readable_surface(&pages, 1.0).unwrap(), 300.0);
        assert_eq!(readable_surface(pages.as_slice(), 0.5).unwrap(), 150.0);
    }

    #[test]
    fn test_relevance_proportions_arithmetic() {
        let pages = UniformPages::new(1, 1000.0, 1000.0);
        let k = 0.8;
        let rects = vec![
            rr(0, 0.0, 0.0, 100.0, 100.0, ReadingClass::Low),
            rr(0, 200.0, 0.0, 50.0, 100.0, ReadingClass::Medium),
            rr(0, 400.0, 0.0, 10.0, 10.0, ReadingClass::High),
            rr(0, 600.0, 0.0, 300.0, 300.0, ReadingClass::Paragraph),
        ];

        let p = relevance_proportions(&rects, &pages, k).unwrap();
        let surface = 1_000_000.0 * k;
        assert!((p.low - 10_000.0 / surface).abs() < 1e-12);
        assert!((p.medium - 5_000.0 / surface).abs() < 1e-12);
        assert!((p.high - 100.0 / surface).abs() < 1e-12);
        assert!((p.total() - 15_100.0 / surface).abs() < 1e-12);
        assert_eq!(p.get(ReadingClass::Medium), Some(p.medium));
        assert_eq!(p.get(ReadingClass::Paragraph), None);
    }

    #[test]
    fn test_proportion_may_exceed_one() {
        let pages = UniformPages::new(1, 100.0, 100.0);
        let rects = vec![rr(0, -10.0, -10.0, 120.0, 120.0, ReadingClass::High)];
        let p = relevance_proportions(&rects, &pages, 1.0).unwrap();
        assert!(p.high > 1.0);
    }

    #[test]
    fn test_page_out_of_range() {
        let pages = UniformPages::new(2, 100.0, 100.0);
        let rects = vec![rr(5, 0.0, 0.0, 10.0, 10.0, ReadingClass::Low)];
        assert_eq!(
            relevance_proportions(&rects, &pages, 1.0),
            Err(MarkingsError::PageOutOfRange {
                page: 5,
                page_count: 2
            })
        );
    }

    #[test]
    fn test_empty_document() {
        let pages = UniformPages::new(0, 100.0, 100.0);
        assert_eq!(
            relevance_proportions(&[], &pages, 1.0),
            Err(MarkingsError::EmptyDocument)
        );
    }

    struct GappyGeometry;

    impl PageGeometry for GappyGeometry {
        fn page_count(&self) -> usize {
            2
        }

        fn page_content_rect(&self, page_index: usize) -> Option<Rectangle> {
            (page_index == 0).then(|| Rectangle::from_position_and_size(0.0, 0.0, 1.0, 1.0))
        }
    }

    #[test]
    fn test_missing_page_geometry() {
        assert_eq!(
            class_proportion(&[], &GappyGeometry, ReadingClass::Paragraph, 1.0),
            Err(MarkingsError::MissingPageGeometry(1))
        );
    }

    #[test]
    fn test_inverted_rect_is_not_summed() {
        let inverted = ReadingRect {
            page_index: 0,
            rect: Rectangle::from_edges(100.0, 100.0, 0.0, 50.0),
            class: ReadingClass::High,
            source: ClassSource::Click,
        };
        let pages = UniformPages::new(1, 1000.0, 1000.0);

        assert!(matches!(
            relevance_proportions(&[inverted], &pages, 1.0),
            Err(MarkingsError::InvalidGeometry(_))
        ));
        assert!(matches!(
            class_proportion(&[inverted], &pages, ReadingClass::High, 1.0),
            Err(MarkingsError::InvalidGeometry(_))
        ));
    }
}

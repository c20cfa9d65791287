//! Set algebra over reading rectangles
//!
//! Every operation here works on one page at a time. Rectangles on other
//! pages are never united, intersected or subtracted against each other.
//!
//! - [`unite_colliding_rects`] merges overlapping rectangles into their
//!   enclosing rectangle until nothing on the page overlaps.
//! - [`subtract_rectangles`] removes the area covered by more important
//!   rectangles from less important ones.
//! - [`intersect_rectangles`] collects the regions two groups share.
//!
//! # Example
//!
//! ```rust
//! use pdf_markings::algebra::{subtract_rectangles, unite_colliding_rects};
//! use pdf_markings::{ClassSource, ReadingClass, ReadingRect};
//!
//! # fn main() -> pdf_markings::Result<()> {
//! let high = ReadingRect::from_position_and_size(
//!     0, (0.0, 0.0, 100.0, 100.0), ReadingClass::High, ClassSource::Click)?;
//! let low = ReadingRect::from_position_and_size(
//!     0, (50.0, 50.0, 100.0, 100.0), ReadingClass::Low, ClassSource::Click)?;
//!
//! let united = unite_colliding_rects(0, &[low]);
//! let remaining = subtract_rectangles(0, &united, &[high]);
//! let area: f64 = remaining.iter().map(|r| r.area()).sum();
//! assert_eq!(area, 7500.0);
//! # Ok(())
//! # }
//! ```

mod subtract;
mod unite;

pub use subtract::{subtract_rectangles, subtract_rectangles_bounded, MAX_SUBTRACTION_PASSES};
pub use unite::unite_colliding_rects;

use crate::reading_class::ReadingClass;
use crate::reading_rect::ReadingRect;

/// Every positive-area overlap between a rect of `first` and a rect of
/// `second` on `page`, tagged with `class`.
///
/// The promoted rect keeps the source of the rect from `first`.
pub fn intersect_rectangles(
    page: usize,
    first: &[ReadingRect],
    second: &[ReadingRect],
    class: ReadingClass,
) -> Vec<ReadingRect> {
    let mut overlaps = Vec::new();
    for a in first.iter().filter(|r| r.page_index == page) {
        for b in second.iter().filter(|r| r.page_index == page) {
            if let Some(region) = a.rect.intersection(&b.rect) {
                let promoted = ReadingRect {
                    class,
                    ..a.with_rect(region)
                };
                if !overlaps.contains(&promoted) {
                    overlaps.push(promoted);
                }
            }
        }
    }
    overlaps
}

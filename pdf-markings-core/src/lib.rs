//! # pdf-markings
//!
//! Reading-rectangle markings for PDF documents: the regions of each page a
//! reader clicked, looked at, searched or flagged, tagged with how important
//! they are and where they came from.
//!
//! ## Features
//!
//! - **Markings set**: deduplicated [`ReadingRect`] values with filtered
//!   queries and replace-by-source
//! - **Set algebra**: unite overlapping rectangles per page, subtract more
//!   important regions from less important ones
//! - **Flattening**: resolve Low, Medium and High markings into
//!   non-overlapping layers
//! - **Proportions**: share of readable document area covered by each class
//! - **Snapshots**: immutable states for undo and redo
//!
//! The engine performs no I/O and draws nothing. Page geometry comes from the
//! caller through [`PageGeometry`].
//!
//! ## Quick Start
//!
//! ```rust
//! use pdf_markings::{ClassSource, FlattenPolicy, PdfMarkings, ReadingClass, ReadingRect, UniformPages};
//!
//! # fn main() -> pdf_markings::Result<()> {
//! let mut markings = PdfMarkings::new();
//! markings.add(ReadingRect::from_position_and_size(
//!     0, (72.0, 600.0, 450.0, 80.0), ReadingClass::Medium, ClassSource::Click)?)?;
//! markings.add(ReadingRect::from_position_and_size(
//!     0, (72.0, 400.0, 450.0, 250.0), ReadingClass::Low, ClassSource::Eye)?)?;
//!
//! let before = markings.snapshot();
//! let proportions = markings.calculate_proportions(&UniformPages::letter(10), FlattenPolicy::Relevance)?;
//! println!("read {:.1}% of the document", proportions.total() * 100.0);
//!
//! markings.restore(&before)?;
//! assert_eq!(markings.count(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points and rectangles in page space
//! - [`reading_class`] - Importance classes and sources
//! - [`reading_rect`] - Single markings
//! - [`algebra`] - Unite, subtract and intersect
//! - [`markings`] - The markings set and flattening
//! - [`proportions`] - Area ratios over page geometry
//! - [`snapshot`] - Undo and redo states

pub mod algebra;
pub mod error;
pub mod geometry;
pub mod markings;
pub mod options;
pub mod proportions;
pub mod reading_class;
pub mod reading_rect;
pub mod snapshot;


pub use error::{MarkingsError, Result};
pub use geometry::{Point, Rectangle};
pub use markings::{FlattenPolicy, MarkingsFilter, PageSummary, PdfMarkings};
pub use options::MarkingsOptions;
pub use proportions::{PageGeometry, Proportions, UniformPages};
pub use reading_class::{ClassSource, ReadingClass};
pub use reading_rect::ReadingRect;
pub use snapshot::{MarkingsState, UndoStack};

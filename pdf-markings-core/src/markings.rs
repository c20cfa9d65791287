//! The markings set of one open document
//!
//! [`PdfMarkings`] holds every reading rect of a document, without
//! duplicates. It is created empty when a document opens and dropped with it.
//! Mutation takes `&mut self`, so a set has exactly one owner at a time;
//! callers sharing it across threads wrap it in a mutex.
//!
//! # Example
//!
//! ```rust
//! use pdf_markings::{
//!     ClassSource, FlattenPolicy, MarkingsFilter, PdfMarkings, ReadingClass, ReadingRect,
//!     UniformPages,
//! };
//!
//! # fn main() -> pdf_markings::Result<()> {
//! let mut markings = PdfMarkings::new();
//! markings.add(ReadingRect::from_position_and_size(
//!     0, (0.0, 0.0, 100.0, 100.0), ReadingClass::High, ClassSource::Click)?)?;
//! markings.add(ReadingRect::from_position_and_size(
//!     0, (50.0, 50.0, 100.0, 100.0), ReadingClass::Low, ClassSource::Eye)?)?;
//!
//! markings.flatten(FlattenPolicy::Relevance)?;
//! let low_area: f64 = markings
//!     .filter(&MarkingsFilter::new().class(ReadingClass::Low))
//!     .iter()
//!     .map(|r| r.area())
//!     .sum();
//! assert_eq!(low_area, 7500.0);
//!
//! let proportions = markings.proportions(&UniformPages::new(1, 1000.0, 1000.0), FlattenPolicy::Relevance)?;
//! assert!(proportions.high > 0.0);
//! # Ok(())
//! # }
//! ```

use crate::algebra::{intersect_rectangles, subtract_rectangles_bounded, unite_colliding_rects};
use crate::error::{MarkingsError, Result};
use crate::options::MarkingsOptions;
use crate::proportions::{
    check_rects, class_proportion, readable_surface, relevance_proportions, PageGeometry,
    Proportions,
};
use crate::reading_class::{ClassSource, ReadingClass};
use crate::reading_rect::ReadingRect;
use crate::snapshot::MarkingsState;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Optional predicates over source, class and page.
///
/// An unset predicate matches every rect.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkingsFilter {
    pub source: Option<ClassSource>,
    pub class: Option<ReadingClass>,
    pub page: Option<usize>,
}

impl MarkingsFilter {
    /// Filter matching everything
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: ClassSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn class(mut self, class: ReadingClass) -> Self {
        self.class = Some(class);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn matches(&self, rect: &ReadingRect) -> bool {
        self.source.map_or(true, |s| s.matches(rect.source))
            && self.class.map_or(true, |c| c == rect.class)
            && self.page.map_or(true, |p| p == rect.page_index)
    }
}

/// How [`PdfMarkings::flatten`] resolves overlapping markings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlattenPolicy {
    /// Unite each relevance class, then cut High out of Medium and Low and
    /// Medium out of Low
    Relevance,
    /// Promote every Medium and Low overlap to High, then flatten as
    /// [`FlattenPolicy::Relevance`]
    IntersectToHigh,
    /// Unite one class per page without subtracting anything
    Single(ReadingClass),
}

impl fmt::Display for FlattenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlattenPolicy::Relevance => f.write_str("relevance"),
            FlattenPolicy::IntersectToHigh => f.write_str("intersect-to-high"),
            FlattenPolicy::Single(class) => write!(f, "{class}"),
        }
    }
}

impl FromStr for FlattenPolicy {
    type Err = MarkingsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "relevance" => Ok(FlattenPolicy::Relevance),
            "intersect-to-high" | "intersect" => Ok(FlattenPolicy::IntersectToHigh),
            "gaze" | "eye" => Ok(FlattenPolicy::Single(ReadingClass::Paragraph)),
            other => other
                .parse::<ReadingClass>()
                .map(FlattenPolicy::Single)
                .map_err(|_| MarkingsError::Parse(format!("unknown flatten policy '{s}'"))),
        }
    }
}

/// Number of rects per class on one page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSummary {
    pub page_index: usize,
    pub counts: BTreeMap<ReadingClass, usize>,
    pub area: BTreeMap<ReadingClass, f64>,
}

impl PageSummary {
    pub fn count(&self, class: ReadingClass) -> usize {
        self.counts.get(&class).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Deduplicated set of reading rects for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMarkings {
    rects: Vec<ReadingRect>,
    options: MarkingsOptions,
}

impl PdfMarkings {
    /// Create an empty set with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with custom options
    pub fn with_options(options: MarkingsOptions) -> Self {
        Self {
            rects: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &MarkingsOptions {
        &self.options
    }

    /// Append a rect unless an equal one is already held.
    ///
    /// Returns whether the rect was inserted. Rects with inverted or
    /// non-finite bounds are rejected.
    pub fn add(&mut self, rect: ReadingRect) -> Result<bool> {
        rect.validate()?;
        Ok(self.insert(rect))
    }

    /// Add every rect, skipping duplicates. Returns how many were inserted.
    ///
    /// Nothing is inserted if any rect is invalid.
    pub fn extend<I>(&mut self, rects: I) -> Result<usize>
    where
        I: IntoIterator<Item = ReadingRect>,
    {
        let rects = validated(rects)?;
        Ok(self.insert_all(rects))
    }

    fn insert(&mut self, rect: ReadingRect) -> bool {
        if self.rects.contains(&rect) {
            return false;
        }
        self.rects.push(rect);
        true
    }

    fn insert_all(&mut self, rects: Vec<ReadingRect>) -> usize {
        rects.into_iter().filter(|r| self.insert(*r)).count()
    }

    pub fn count(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Every rect in insertion order
    pub fn all(&self) -> &[ReadingRect] {
        &self.rects
    }

    /// Rects matching every predicate of `filter`
    pub fn filter(&self, filter: &MarkingsFilter) -> Vec<ReadingRect> {
        self.rects
            .iter()
            .filter(|r| filter.matches(r))
            .copied()
            .collect()
    }

    /// Rects of one source and class
    pub fn get(&self, source: ClassSource, class: ReadingClass) -> Vec<ReadingRect> {
        self.filter(&MarkingsFilter::new().source(source).class(class))
    }

    /// Rects of one class, from any source
    pub fn get_class(&self, class: ReadingClass) -> Vec<ReadingRect> {
        self.filter(&MarkingsFilter::new().class(class))
    }

    /// Rects on one page
    pub fn get_page(&self, page: usize) -> Vec<ReadingRect> {
        self.filter(&MarkingsFilter::new().page(page))
    }

    /// Pages holding at least one rect
    pub fn pages(&self) -> BTreeSet<usize> {
        self.rects.iter().map(|r| r.page_index).collect()
    }

    /// Remove every rect whose source is in `sources`, then add `with`.
    ///
    /// A rect in `with` from a source outside `sources` is logged and
    /// inserted anyway. Fails without touching the set if any rect in `with`
    /// is invalid.
    pub fn replace(&mut self, sources: &[ClassSource], with: Vec<ReadingRect>) -> Result<()> {
        let with = validated(with)?;
        self.rects
            .retain(|r| !sources.iter().any(|s| s.matches(r.source)));

        for rect in with {
            if !sources.iter().any(|s| s.matches(rect.source)) {
                tracing::warn!(
                    source = %rect.source,
                    page = rect.page_index,
                    "replacement rect source is outside the replaced sources"
                );
            }
            self.insert(rect);
        }
        Ok(())
    }

    /// Replace the whole set
    pub fn replace_all(&mut self, with: Vec<ReadingRect>) -> Result<()> {
        let with = validated(with)?;
        self.rects.clear();
        self.insert_all(with);
        Ok(())
    }

    /// Replace the rects of one source and class.
    ///
    /// A rect whose class or source differs from the bucket is logged and
    /// inserted anyway.
    pub fn set(
        &mut self,
        source: ClassSource,
        class: ReadingClass,
        rects: Vec<ReadingRect>,
    ) -> Result<()> {
        let rects = validated(rects)?;
        self.rects
            .retain(|r| !(source.matches(r.source) && r.class == class));

        for rect in rects {
            if rect.class != class || !source.matches(rect.source) {
                tracing::warn!(
                    expected_class = %class,
                    expected_source = %source,
                    class = %rect.class,
                    source = %rect.source,
                    "rect assigned to a mismatched class bucket"
                );
            }
            self.insert(rect);
        }
        Ok(())
    }

    /// Remove every rect matching `filter`. Returns how many were removed.
    pub fn remove_all(&mut self, filter: &MarkingsFilter) -> usize {
        let before = self.rects.len();
        self.rects.retain(|r| !filter.matches(r));
        before - self.rects.len()
    }

    /// Counts and areas per class on one page
    pub fn page_summary(&self, page: usize) -> PageSummary {
        let mut summary = PageSummary {
            page_index: page,
            ..Default::default()
        };
        for rect in self.rects.iter().filter(|r| r.page_index == page) {
            *summary.counts.entry(rect.class).or_insert(0) += 1;
            *summary.area.entry(rect.class).or_insert(0.0) += rect.area();
        }
        summary
    }

    /// Capture every rect as a whole-set state
    pub fn snapshot(&self) -> MarkingsState {
        MarkingsState::new(self.rects.clone())
    }

    /// Capture every rect, remembering which ones the next change touches
    pub fn snapshot_touching(&self, touched: Vec<ReadingRect>) -> MarkingsState {
        MarkingsState::localized(self.rects.clone(), touched)
    }

    /// Bring back exactly the rects of `state`
    pub fn restore(&mut self, state: &MarkingsState) -> Result<()> {
        self.replace_all(state.rects().to_vec())
    }

    /// Bring back the rects of `state` for `sources` only, keeping the
    /// current rects of every other source
    pub fn restore_sources(
        &mut self,
        state: &MarkingsState,
        sources: &[ClassSource],
    ) -> Result<()> {
        let scoped = state
            .rects()
            .iter()
            .filter(|r| sources.iter().any(|s| s.matches(r.source)))
            .copied()
            .collect();
        self.replace(sources, scoped)
    }

    /// Resolve overlaps in place according to `policy`.
    ///
    /// Classes the policy does not cover are left untouched.
    pub fn flatten(&mut self, policy: FlattenPolicy) -> Result<()> {
        self.options.validate()?;
        match policy {
            FlattenPolicy::Relevance => self.flatten_relevance(false),
            FlattenPolicy::IntersectToHigh => self.flatten_relevance(true),
            FlattenPolicy::Single(class) => self.flatten_single(class),
        }
        Ok(())
    }

    fn flatten_single(&mut self, class: ReadingClass) {
        let mut united = Vec::new();
        for page in self.pages() {
            let on_page = self.filter(&MarkingsFilter::new().class(class).page(page));
            united.extend(unite_colliding_rects(page, &on_page));
        }

        let before = self.rects.len();
        self.rects.retain(|r| r.class != class);
        tracing::debug!(
            %class,
            before = before - self.rects.len(),
            after = united.len(),
            "united class"
        );
        self.insert_all(united);
    }

    fn flatten_relevance(&mut self, promote_intersections: bool) {
        let passes = self.options.max_subtraction_passes;
        let subtract = |page, minuends: &[ReadingRect], subtrahends: &[ReadingRect]| {
            subtract_rectangles_bounded(page, minuends, subtrahends, passes)
        };

        let mut flattened = Vec::new();
        for page in self.pages() {
            let of_class =
                |class| self.filter(&MarkingsFilter::new().class(class).page(page));

            let mut high = unite_colliding_rects(page, &of_class(ReadingClass::High));
            let medium = unite_colliding_rects(page, &of_class(ReadingClass::Medium));
            let low = unite_colliding_rects(page, &of_class(ReadingClass::Low));

            if promote_intersections {
                let promoted = intersect_rectangles(page, &medium, &low, ReadingClass::High);
                if !promoted.is_empty() {
                    tracing::debug!(page, promoted = promoted.len(), "promoted overlaps to high");
                    high.extend(promoted);
                    high = unite_colliding_rects(page, &high);
                }
            }

            let medium = subtract(page, &medium, &high);
            let low = subtract(page, &low, &high);
            let medium = unite_colliding_rects(page, &medium);
            let low = subtract(page, &low, &medium);
            let low = unite_colliding_rects(page, &low);

            tracing::debug!(
                page,
                high = high.len(),
                medium = medium.len(),
                low = low.len(),
                "flattened relevance classes"
            );
            flattened.extend(high);
            flattened.extend(medium);
            flattened.extend(low);
        }

        self.rects.retain(|r| !r.class.is_relevance());
        self.insert_all(flattened);
    }

    /// Flatten with `policy`, then measure relevance proportions.
    ///
    /// The flatten is kept: afterwards the set holds the flattened rects.
    /// Use [`PdfMarkings::proportions`] to measure without changing the set.
    /// Errors are reported before anything is flattened.
    pub fn calculate_proportions<G>(
        &mut self,
        geometry: &G,
        policy: FlattenPolicy,
    ) -> Result<Proportions>
    where
        G: PageGeometry + ?Sized,
    {
        if let FlattenPolicy::Single(_) = policy {
            return Err(MarkingsError::UnsupportedPolicy(policy.to_string()));
        }
        self.check_measurable(geometry)?;
        self.flatten(policy)?;
        relevance_proportions(&self.rects, geometry, self.options.page_area_multiplier)
    }

    /// Relevance proportions of the set as it would be after flattening with
    /// `policy`, leaving the set unchanged
    pub fn proportions<G>(&self, geometry: &G, policy: FlattenPolicy) -> Result<Proportions>
    where
        G: PageGeometry + ?Sized,
    {
        self.clone().calculate_proportions(geometry, policy)
    }

    /// Unite gaze paragraphs, then measure the share of the document they
    /// cover. The united rects replace the originals.
    pub fn calculate_proportion_gazed<G>(&mut self, geometry: &G) -> Result<f64>
    where
        G: PageGeometry + ?Sized,
    {
        self.check_measurable(geometry)?;
        self.flatten(FlattenPolicy::Single(ReadingClass::Paragraph))?;
        class_proportion(
            &self.rects,
            geometry,
            ReadingClass::Paragraph,
            self.options.page_area_multiplier,
        )
    }

    fn check_measurable<G>(&self, geometry: &G) -> Result<()>
    where
        G: PageGeometry + ?Sized,
    {
        self.options.validate()?;
        check_rects(&self.rects, geometry.page_count())?;
        readable_surface(geometry, self.options.page_area_multiplier)?;
        Ok(())
    }

    /// Gazed share without changing the set
    pub fn proportion_gazed<G>(&self, geometry: &G) -> Result<f64>
    where
        G: PageGeometry + ?Sized,
    {
        self.clone().calculate_proportion_gazed(geometry)
    }
}

fn validated<I>(rects: I) -> Result<Vec<ReadingRect>>
where
    I: IntoIterator<Item = ReadingRect>,
{
    let rects: Vec<ReadingRect> = rects.into_iter().collect();
    for rect in &rects {
        rect.validate()?;
    }
    Ok(rects)
}

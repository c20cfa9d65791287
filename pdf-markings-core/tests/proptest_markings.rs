//! Property-based tests for the markings engine
//!
//! Rectangles use integer coordinates so coverage can be checked exactly by
//! sampling cell centres on a unit grid.

use pdf_markings::algebra::{subtract_rectangles, unite_colliding_rects};
use pdf_markings::{
    ClassSource, FlattenPolicy, MarkingsFilter, PdfMarkings, Point, ReadingClass, ReadingRect,
};
use proptest::prelude::*;

const GRID: i32 = 110;

fn covered(rects: &[ReadingRect], p: Point) -> bool {
    rects.iter().any(|r| r.rect.contains_point(p))
}

fn grid_points() -> impl Iterator<Item = Point> {
    (0..GRID).flat_map(|x| (0..GRID).map(move |y| Point::new(x as f64 + 0.5, y as f64 + 0.5)))
}

prop_compose! {
    fn reading_rect_strategy(page: usize, class: ReadingClass)(
        x in 0..80i32,
        y in 0..80i32,
        w in 1..30i32,
        h in 1..30i32,
        source in prop::sample::select(vec![ClassSource::Click, ClassSource::Eye, ClassSource::Search])
    ) -> ReadingRect {
        ReadingRect::from_position_and_size(page, (x as f64, y as f64, w as f64, h as f64), class, source)
            .unwrap()
    }
}

// Paragraph-like bands sharing one column, so their union is rectangular
// wherever they overlap
prop_compose! {
    fn column_band_strategy()(y in 0..90i32, h in 1..20i32) -> ReadingRect {
        ReadingRect::from_position_and_size(
            0,
            (10.0, y as f64, 60.0, h as f64),
            ReadingClass::Paragraph,
            ClassSource::Eye,
        )
        .unwrap()
    }
}

fn relevance_rect_strategy() -> impl Strategy<Value = ReadingRect> {
    prop::sample::select(ReadingClass::RELEVANCE.to_vec())
        .prop_flat_map(|class| reading_rect_strategy(0, class))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_add_twice_is_deduplicated(rects in prop::collection::vec(relevance_rect_strategy(), 0..10)) {
        let mut markings = PdfMarkings::new();
        for r in &rects {
            markings.add(*r).unwrap();
        }
        let count = markings.count();
        for r in &rects {
            prop_assert!(!markings.add(*r).unwrap());
        }
        prop_assert_eq!(markings.count(), count);
    }

    #[test]
    fn test_unite_never_increases_count(rects in prop::collection::vec(reading_rect_strategy(0, ReadingClass::Low), 0..12)) {
        let united = unite_colliding_rects(0, &rects);
        prop_assert!(united.len() <= rects.len());
    }

    #[test]
    fn test_unite_is_a_fixed_point(rects in prop::collection::vec(reading_rect_strategy(0, ReadingClass::Low), 0..12)) {
        let once = unite_colliding_rects(0, &rects);
        let twice = unite_colliding_rects(0, &once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_unite_output_is_disjoint_and_covers_input(rects in prop::collection::vec(reading_rect_strategy(0, ReadingClass::Medium), 0..12)) {
        let united = unite_colliding_rects(0, &rects);
        for (i, a) in united.iter().enumerate() {
            for b in &united[i + 1..] {
                prop_assert!(!a.intersects(b));
            }
        }
        for p in grid_points() {
            if covered(&rects, p) {
                prop_assert!(covered(&united, p), "lost coverage at {:?}", p);
            }
        }
    }

    #[test]
    fn test_unite_preserves_area_of_column_bands(rects in prop::collection::vec(column_band_strategy(), 1..10)) {
        let united = unite_colliding_rects(0, &rects);
        for p in grid_points() {
            prop_assert_eq!(covered(&united, p), covered(&rects, p), "at {:?}", p);
        }
        let sampled = grid_points().filter(|p| covered(&rects, *p)).count() as f64;
        let area: f64 = united.iter().map(ReadingRect::area).sum();
        prop_assert!((area - sampled).abs() < 1e-9);
    }

    #[test]
    fn test_subtraction_is_exact(
        minuends in prop::collection::vec(reading_rect_strategy(0, ReadingClass::Low), 0..6),
        subtrahends in prop::collection::vec(reading_rect_strategy(0, ReadingClass::High), 0..6)
    ) {
        let minuends = unite_colliding_rects(0, &minuends);
        let result = subtract_rectangles(0, &minuends, &subtrahends);

        for p in grid_points() {
            let expected = covered(&minuends, p) && !covered(&subtrahends, p);
            prop_assert_eq!(covered(&result, p), expected, "at {:?}", p);
        }
        prop_assert!(result.iter().all(|r| r.class == ReadingClass::Low));
    }

    #[test]
    fn test_subtraction_without_subtrahends_is_identity(
        minuends in prop::collection::vec(reading_rect_strategy(0, ReadingClass::Low), 0..8)
    ) {
        prop_assert_eq!(subtract_rectangles(0, &minuends, &[]), minuends);
    }

    #[test]
    fn test_relevance_flatten_separates_classes(
        rects in prop::collection::vec(relevance_rect_strategy(), 0..12),
        intersect in any::<bool>()
    ) {
        let mut markings = PdfMarkings::new();
        markings.extend(rects.clone()).unwrap();
        let policy = if intersect { FlattenPolicy::IntersectToHigh } else { FlattenPolicy::Relevance };
        markings.flatten(policy).unwrap();

        let high = markings.get_class(ReadingClass::High);
        let medium = markings.get_class(ReadingClass::Medium);
        let low = markings.get_class(ReadingClass::Low);

        for (upper, lower) in [(&high, &medium), (&high, &low), (&medium, &low)] {
            for a in upper.iter() {
                for b in lower.iter() {
                    prop_assert!(!a.intersects(b), "{:?} overlaps {:?}", a, b);
                }
            }
        }

        // High never loses ground
        let original_high: Vec<ReadingRect> = rects
            .iter()
            .filter(|r| r.class == ReadingClass::High)
            .copied()
            .collect();
        for p in grid_points() {
            if covered(&original_high, p) {
                prop_assert!(covered(&high, p));
            }
        }
    }

    #[test]
    fn test_snapshot_restore_round_trip(
        initial in prop::collection::vec(relevance_rect_strategy(), 0..10),
        extra in prop::collection::vec(relevance_rect_strategy(), 0..5)
    ) {
        let mut markings = PdfMarkings::new();
        markings.extend(initial).unwrap();
        let before = markings.all().to_vec();
        let state = markings.snapshot();

        markings.flatten(FlattenPolicy::IntersectToHigh).unwrap();
        markings.extend(extra).unwrap();
        markings.remove_all(&MarkingsFilter::new().class(ReadingClass::Medium));

        markings.restore(&state).unwrap();
        prop_assert_eq!(markings.all(), before.as_slice());
    }
}

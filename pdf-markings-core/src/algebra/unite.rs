use crate::reading_rect::{sort_reading_order, ReadingRect};

/// Merge colliding rects on `page` into their enclosing rectangles.
///
/// Input is sorted in reading order and scanned front to back. When the rect
/// at the cursor collides with a later rect, the pair is replaced by their
/// union in place and the cursor stays put, since the grown rect may now
/// reach further neighbours. The scan repeats until a full pass merges
/// nothing, so no two rects in the result overlap.
///
/// Rects on other pages are ignored. The merged rect keeps the class and
/// source of the rect that came first in reading order.
pub fn unite_colliding_rects(page: usize, rects: &[ReadingRect]) -> Vec<ReadingRect> {
    let mut united: Vec<ReadingRect> = rects
        .iter()
        .filter(|r| r.page_index == page)
        .copied()
        .collect();
    sort_reading_order(&mut united);

    loop {
        let mut merged_any = false;
        let mut i = 0;
        while i < united.len() {
            let hit = (i + 1..united.len()).find(|&j| united[i].rect.intersects(&united[j].rect));
            match hit {
                Some(j) => {
                    let other = united.remove(j);
                    let grown = united[i].rect.union(&other.rect);
                    united[i] = united[i].with_rect(grown);
                    merged_any = true;
                }
                None => i += 1,
            }
        }

        if !merged_any {
            break;
        }
        // Unions move top edges, restore reading order before the next pass
        sort_reading_order(&mut united);
    }

    united.dedup();
    united
}

use crate::reading_rect::ReadingRect;

/// Ceiling on subtraction passes before giving up with a partial result
pub const MAX_SUBTRACTION_PASSES: usize = 50;

/// Remove from `minuends` every area on `page` covered by `subtrahends`.
///
/// Uses [`MAX_SUBTRACTION_PASSES`] as the pass ceiling.
pub fn subtract_rectangles(
    page: usize,
    minuends: &[ReadingRect],
    subtrahends: &[ReadingRect],
) -> Vec<ReadingRect> {
    subtract_rectangles_bounded(page, minuends, subtrahends, MAX_SUBTRACTION_PASSES)
}

/// Remove from `minuends` every area on `page` covered by `subtrahends`,
/// running at most `max_passes` passes.
///
/// Each pass replaces every minuend that collides with a subtrahend by the
/// fragments left after cutting out, in turn, every subtrahend it collides
/// with. Fragments produced by one cut are checked against the remaining
/// subtrahends within the same pass. Passes repeat until one finds no
/// collision. If the ceiling is reached first, a warning is logged and the
/// partial result is returned.
///
/// Minuends on other pages pass through untouched. Subtrahends are only read.
pub fn subtract_rectangles_bounded(
    page: usize,
    minuends: &[ReadingRect],
    subtrahends: &[ReadingRect],
    max_passes: usize,
) -> Vec<ReadingRect> {
    let cutters: Vec<&ReadingRect> = subtrahends
        .iter()
        .filter(|s| s.page_index == page && !s.rect.is_empty())
        .collect();
    if minuends.is_empty() || cutters.is_empty() {
        return minuends.to_vec();
    }

    let mut result = minuends.to_vec();
    for pass in 0..max_passes {
        let mut collided = false;
        let mut next = Vec::with_capacity(result.len());

        for minuend in result {
            if minuend.page_index != page {
                next.push(minuend);
                continue;
            }

            let mut pieces = vec![minuend];
            for cutter in &cutters {
                if !pieces.iter().any(|p| p.rect.intersects(&cutter.rect)) {
                    continue;
                }
                collided = true;
                pieces = pieces
                    .into_iter()
                    .flat_map(|piece| cut(piece, cutter))
                    .collect();
            }
            next.extend(pieces);
        }

        result = next;
        if !collided {
            tracing::trace!(page, passes = pass + 1, "subtraction converged");
            return result;
        }
    }

    let still_colliding = result.iter().any(|m| {
        m.page_index == page && cutters.iter().any(|s| m.rect.intersects(&s.rect))
    });
    if still_colliding {
        tracing::warn!(
            page,
            max_passes,
            remaining = result.len(),
            "rectangle subtraction did not converge, returning partial result"
        );
    }
    result
}

fn cut(piece: ReadingRect, cutter: &ReadingRect) -> Vec<ReadingRect> {
    if !piece.rect.intersects(&cutter.rect) {
        return vec![piece];
    }
    piece
        .rect
        .subtract(&cutter.rect)
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| piece.with_rect(fragment))
        .collect()
}

//! Snapshots of a markings set for undo and redo
//!
//! A [`MarkingsState`] is an immutable copy of every rect in a set at one
//! instant. It can also carry the rects touched by the change it precedes,
//! so a caller can redraw only the affected region instead of whole pages.
//! [`UndoStack`] is a bounded undo/redo history of such states that call
//! sites can use as their undo manager.

use crate::geometry::Rectangle;
use crate::options::MarkingsOptions;
use crate::reading_rect::ReadingRect;
use std::collections::VecDeque;

/// Immutable copy of a markings set
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkingsState {
    rects: Vec<ReadingRect>,
    touched: Option<Vec<ReadingRect>>,
}

impl MarkingsState {
    /// State covering the whole set
    pub fn new(rects: Vec<ReadingRect>) -> Self {
        Self {
            rects,
            touched: None,
        }
    }

    /// State whose change was limited to `touched`
    pub fn localized(rects: Vec<ReadingRect>, touched: Vec<ReadingRect>) -> Self {
        Self {
            rects,
            touched: Some(touched),
        }
    }

    pub fn rects(&self) -> &[ReadingRect] {
        &self.rects
    }

    pub fn into_rects(self) -> Vec<ReadingRect> {
        self.rects
    }

    /// Rects most recently touched, when the change was localized
    pub fn touched(&self) -> Option<&[ReadingRect]> {
        self.touched.as_deref()
    }

    /// Whether the change was limited to known rects rather than the whole set
    pub fn is_localized(&self) -> bool {
        self.touched.is_some()
    }

    /// Enclosing rectangle of all touched rects on `page`
    pub fn touched_bounds(&self, page: usize) -> Option<Rectangle> {
        self.touched
            .as_ref()?
            .iter()
            .filter(|r| r.page_index == page)
            .map(|r| r.rect)
            .reduce(|acc, r| acc.union(&r))
    }

    /// Pages holding touched rects, in ascending order
    pub fn touched_pages(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = self
            .touched
            .iter()
            .flatten()
            .map(|r| r.page_index)
            .collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }
}

/// Bounded undo/redo history of markings states
#[derive(Debug, Clone)]
pub struct UndoStack {
    undo: VecDeque<MarkingsState>,
    redo: Vec<MarkingsState>,
    depth: usize,
}

impl UndoStack {
    /// Create a history holding at most `depth` undo states
    pub fn new(depth: usize) -> Self {
        Self {
            undo: VecDeque::with_capacity(depth.min(64)),
            redo: Vec::new(),
            depth,
        }
    }

    /// Record the state prior to a change. Clears the redo history.
    /// History sized by [`MarkingsOptions::undo_depth`]
    pub fn from_options(options: &MarkingsOptions) -> Self {
        Self::new(options.undo_depth)
    }

    pub fn push(&mut self, state: MarkingsState) {
        if self.depth == 0 {
            return;
        }
        if self.undo.len() == self.depth {
            self.undo.pop_front();
        }
        self.undo.push_back(state);
        self.redo.clear();
    }

    /// Step back: returns the state to restore and keeps `current` for redo
    pub fn undo(&mut self, current: MarkingsState) -> Option<MarkingsState> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: MarkingsState) -> Option<MarkingsState> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        if self.undo.len() > self.depth {
            self.undo.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::from_options(&MarkingsOptions::default())
    }
}

//! Engine configuration

use crate::algebra::MAX_SUBTRACTION_PASSES;
use crate::error::{MarkingsError, Result};

/// Default calibration for readable area versus page bounds
pub const DEFAULT_PAGE_AREA_MULTIPLIER: f64 = 0.8;

/// Default number of states kept by an [`UndoStack`](crate::snapshot::UndoStack)
pub const DEFAULT_UNDO_DEPTH: usize = 50;

/// Configuration options for a markings set
#[derive(Debug, Clone, PartialEq)]
pub struct MarkingsOptions {
    /// Scales the summed page area before proportions are computed
    pub page_area_multiplier: f64,
    /// Pass ceiling for rectangle subtraction
    pub max_subtraction_passes: usize,
    /// Depth of an [`UndoStack`](crate::snapshot::UndoStack) built with
    /// `UndoStack::from_options`
    pub undo_depth: usize,
}

impl Default for MarkingsOptions {
    fn default() -> Self {
        Self {
            page_area_multiplier: DEFAULT_PAGE_AREA_MULTIPLIER,
            max_subtraction_passes: MAX_SUBTRACTION_PASSES,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

impl MarkingsOptions {
    /// Set the page area multiplier
    pub fn with_page_area_multiplier(mut self, multiplier: f64) -> Self {
        self.page_area_multiplier = multiplier;
        self
    }

    /// Set the subtraction pass ceiling
    pub fn with_max_subtraction_passes(mut self, passes: usize) -> Self {
        self.max_subtraction_passes = passes;
        self
    }

    /// Set the undo depth
    pub fn with_undo_depth(mut self, depth: usize) -> Self {
        self.undo_depth = depth;
        self
    }

    /// Check that the options can drive a proportion calculation
    pub fn validate(&self) -> Result<()> {
        if !self.page_area_multiplier.is_finite() || self.page_area_multiplier <= 0.0 {
            return Err(MarkingsError::InvalidOption(format!(
                "page area multiplier must be positive, got {}",
                self.page_area_multiplier
            )));
        }
        if self.max_subtraction_passes == 0 {
            return Err(MarkingsError::InvalidOption(
                "max subtraction passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

//! JSON markings documents read and written by the CLI

use anyhow::{Context, Result};
use pdf_markings::{MarkingsOptions, PdfMarkings, ReadingRect, Rectangle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Page content rectangles plus the markings recorded on them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkingsDocument {
    pub pages: Vec<Rectangle>,
    #[serde(default)]
    pub rects: Vec<ReadingRect>,
}

impl MarkingsDocument {
    /// Read and validate a document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let document: MarkingsDocument = serde_json::from_str(&content)
            .with_context(|| format!("Invalid markings document {}", path.display()))?;
        document.validate()?;
        tracing::debug!(
            pages = document.pages.len(),
            rects = document.rects.len(),
            "loaded markings document"
        );
        Ok(document)
    }

    /// Deserialization bypasses `ReadingRect::new`, so geometry is checked
    /// again here
    pub fn validate(&self) -> Result<()> {
        for (i, rect) in self.rects.iter().enumerate() {
            ReadingRect::new(rect.page_index, rect.rect, rect.class, rect.source)
                .with_context(|| format!("Rect #{i} is invalid"))?;
        }
        Ok(())
    }

    /// Build a markings set holding this document's rects
    pub fn to_markings(&self, options: MarkingsOptions) -> Result<PdfMarkings> {
        let mut markings = PdfMarkings::with_options(options);
        let inserted = markings
            .extend(self.rects.iter().copied())
            .context("Document holds invalid rects")?;
        if inserted < self.rects.len() {
            tracing::info!(
                duplicates = self.rects.len() - inserted,
                "dropped duplicate rects"
            );
        }
        Ok(markings)
    }

    /// Same pages, rects taken from `markings`
    pub fn with_markings(&self, markings: &PdfMarkings) -> Self {
        Self {
            pages: self.pages.clone(),
            rects: markings.all().to_vec(),
        }
    }

    /// Write pretty JSON to `output`, or to stdout when `None`
    pub fn write(&self, output: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        match output {
            Some(path) => fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_markings::{ClassSource, ReadingClass};
    use tempfile::TempDir;

    fn sample() -> MarkingsDocument {
        MarkingsDocument {
            pages: vec![Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0)],
            rects: vec![ReadingRect::from_position_and_size(
                0,
                (72.0, 600.0, 400.0, 40.0),
                ReadingClass::High,
                ClassSource::Click,
            )
            .unwrap()],
        }
    }

    #[test]
    fn test_write_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("markings.json");

        sample().write(Some(&path)).unwrap();
        let loaded = MarkingsDocument::load(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_rects_default_to_empty() {
        let document: MarkingsDocument = serde_json::from_str(
            r#"{"pages":[{"lower_left":{"x":0,"y":0},"upper_right":{"x":10,"y":10}}]}"#,
        )
        .unwrap();
        assert!(document.rects.is_empty());
        assert_eq!(document.pages.len(), 1);
    }

    #[test]
    fn test_validate_rejects_negative_rect() {
        let mut document = sample();
        document.rects[0].rect = Rectangle::from_position_and_size(10.0, 10.0, -5.0, 5.0);
        assert!(document.validate().is_err());
    }

    #[test]
    fn test_to_markings_drops_duplicates() {
        let mut document = sample();
        document.rects.push(document.rects[0]);
        let markings = document.to_markings(MarkingsOptions::default()).unwrap();
        assert_eq!(markings.count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MarkingsDocument::load(Path::new("/nonexistent/markings.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_to_markings_rejects_inverted_rect() {
        let mut document = sample();
        document.rects[0].rect = Rectangle::from_edges(100.0, 100.0, 0.0, 50.0);
        assert!(document.to_markings(MarkingsOptions::default()).is_err());
    }
}

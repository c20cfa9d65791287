use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkingsError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Page index {page} out of range (document has {page_count} pages)")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("No content rectangle for page {0}")]
    MissingPageGeometry(usize),

    #[error("Document has no readable surface")]
    EmptyDocument,

    #[error("Unsupported flatten policy: {0}")]
    UnsupportedPolicy(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, MarkingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markings_error_display() {
        let error = MarkingsError::InvalidGeometry("negative width".to_string());
        assert_eq!(error.to_string(), "Invalid geometry: negative width");
    }

    #[test]
    fn test_page_out_of_range_display() {
        let error = MarkingsError::PageOutOfRange {
            page: 7,
            page_count: 3,
        };
        assert_eq!(
            error.to_string(),
            "Page index 7 out of range (document has 3 pages)"
        );
    }

    #[test]
    fn test_error_chain_display() {
        let errors = [
            (
                "No content rectangle for page 2",
                MarkingsError::MissingPageGeometry(2),
            ),
            (
                "Document has no readable surface",
                MarkingsError::EmptyDocument,
            ),
            (
                "Unsupported flatten policy: paragraph",
                MarkingsError::UnsupportedPolicy("paragraph".to_string()),
            ),
            (
                "Invalid option: multiplier",
                MarkingsError::InvalidOption("multiplier".to_string()),
            ),
            (
                "Parse error: unknown class",
                MarkingsError::Parse("unknown class".to_string()),
            ),
        ];

        for (expected, error) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarkingsError>();
    }
}

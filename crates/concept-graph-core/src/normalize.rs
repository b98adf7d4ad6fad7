//! Text normalization for concept matching.
//!
//! Normalization decides concept identity: two surface forms that clean to
//! the same string are treated as the same concept by the dedup lookup and
//! by the disjointness check on relationship sides.

use crate::error::{GraphError, GraphResult};

/// Normalize a concept text: strip punctuation (keeping word characters and
/// whitespace), trim, and lower-case.
pub fn clean_text(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect();
    stripped.trim().to_lowercase()
}

/// Whether a string is empty or whitespace-only.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Validate that every entry in a concept list is non-blank.
pub fn validate_concepts(field: &str, concepts: &[String]) -> GraphResult<()> {
    for concept in concepts {
        if is_blank(concept) {
            return Err(GraphError::validation(
                field,
                "strings in the list can not be blank nor empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_lowercases() {
        assert_eq!(clean_text("Python"), "python");
    }

    #[test]
    fn test_clean_text_strips_punctuation() {
        assert_eq!(clean_text("List Comprehension!"), "list comprehension");
        assert_eq!(clean_text("C++"), "c");
    }

    #[test]
    fn test_clean_text_trims_whitespace() {
        assert_eq!(clean_text("  Django  "), "django");
    }

    #[test]
    fn test_clean_text_keeps_underscores() {
        assert_eq!(clean_text("language_features"), "language_features");
    }

    #[test]
    fn test_clean_text_punctuation_only_is_empty() {
        assert_eq!(clean_text("?!..."), "");
    }

    #[test]
    fn test_validate_concepts_accepts_non_blank() {
        let concepts = vec!["Python".to_string(), "OOP".to_string()];
        assert!(validate_concepts("concepts", &concepts).is_ok());
    }

    #[test]
    fn test_validate_concepts_rejects_blank_entry() {
        let concepts = vec!["Python".to_string(), "   ".to_string()];
        let err = validate_concepts("concepts", &concepts).unwrap_err();
        assert!(err.to_string().contains("blank"));
    }
}

//! Paragraph handling for model output.

/// Delimiter the model is asked to emit between paragraphs.
pub const PARAGRAPH_DELIMITER: &str = "|||";

/// Replace delimiter tokens with blank-line paragraph breaks, absorbing any
/// whitespace around the delimiter. Input without a delimiter is returned
/// unchanged.
pub fn expand_paragraphs(text: &str) -> String {
    if !text.contains(PARAGRAPH_DELIMITER) {
        return text.to_string();
    }

    text.split(PARAGRAPH_DELIMITER)
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_delimiters_into_paragraph_breaks() {
        assert_eq!(
            expand_paragraphs("Good morning.|||Two reviews are overdue."),
            "Good morning.\n\nTwo reviews are overdue."
        );
    }

    #[test]
    fn test_absorbs_whitespace_around_delimiter() {
        assert_eq!(expand_paragraphs("one ||| two"), "one\n\ntwo");
    }

    #[test]
    fn test_identity_without_delimiter() {
        let input = "  plain text, spacing preserved  ";
        assert_eq!(expand_paragraphs(input), input);
    }

    #[test]
    fn test_drops_empty_segments() {
        assert_eq!(expand_paragraphs("|||one||||||two|||"), "one\n\ntwo");
    }
}

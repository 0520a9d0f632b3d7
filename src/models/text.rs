/// Text recognized on one card: ordered, trimmed, non-empty lines.
///
/// This is the only representation the extractors see. A whole-text view is
/// always derived from it with [`RecognizedText::joined`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText {
    lines: Vec<String>,
}

impl RecognizedText {
    /// Build from recognizer fragments, splitting any fragment that itself
    /// spans several lines.
    pub fn from_lines<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = fragments
            .into_iter()
            .flat_map(|fragment| {
                fragment
                    .as_ref()
                    .split('\n')
                    .map(|line| line.trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|line| !line.is_empty())
            .collect();

        RecognizedText { lines }
    }

    /// Build from a raw text dump, one recognized line per `\n`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(std::iter::once(text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn joined(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_padded_lines_are_normalized() {
        let text = RecognizedText::from_text("  INCOME TAX DEPARTMENT \n\n   \nJOHN SMITH\r\n");
        assert_eq!(text.lines(), &["INCOME TAX DEPARTMENT", "JOHN SMITH"]);
        assert_eq!(text.joined(), "INCOME TAX DEPARTMENT\nJOHN SMITH");
    }

    #[test]
    fn test_fragments_with_embedded_newlines_are_split() {
        let text = RecognizedText::from_lines(vec!["GOVERNMENT OF INDIA\nAsha Rao", "", " 1234 5678 9012 "]);
        assert_eq!(text.len(), 3);
        assert_eq!(text.lines()[2], "1234 5678 9012");
    }

    #[test]
    fn test_empty_output() {
        let text = RecognizedText::from_text("\n \n");
        assert!(text.is_empty());
        assert_eq!(text.joined(), "");
    }
}

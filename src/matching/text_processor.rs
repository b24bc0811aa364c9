//! Text normalization and word lists for scoring

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default)]
pub struct TextProcessor;

impl TextProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Case-folded words in document order. Empty for text with no words,
    /// which is how image-only PDFs show up after extraction.
    pub fn word_list(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|word| word.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_is_case_folded_and_keeps_dotted_names() {
        let processor = TextProcessor::new();
        let words = processor.word_list("Built APIs in Node.js and Python, 2019-2023.");

        assert!(words.contains(&"node.js".to_string()));
        assert!(words.contains(&"python".to_string()));
        assert!(words.contains(&"apis".to_string()));
        assert!(!words.iter().any(|w| w.chars().any(char::is_uppercase)));
    }

    #[test]
    fn test_word_list_of_blank_text_is_empty() {
        let processor = TextProcessor::new();
        assert!(processor.word_list("").is_empty());
        assert!(processor.word_list("  \n\t • — ").is_empty());
    }
}

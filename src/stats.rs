// Statistics reporter: word-ratio metrics derived from a detection pass.

use crate::detect::ProfanityFilter;
use crate::models::ProfanityStats;
use crate::text::words;

impl ProfanityFilter {
    /// Word count, distinct matched terms and their ratio.
    ///
    /// `profanity_count` counts distinct canonical terms, so "바보 바보" is
    /// one term over two words. The ratio is 0.0 for text with no words.
    pub fn profanity_stats(&self, text: &str) -> ProfanityStats {
        let total_words = words(text).count();
        let detection = self.detect_profanity(text);
        let profanity_count = detection.matched_terms.len();

        let profanity_ratio = if total_words == 0 {
            0.0
        } else {
            profanity_count as f64 / total_words as f64
        };

        ProfanityStats {
            total_words,
            profanity_count,
            profanity_ratio,
            detected_words: detection.matched_terms.into_iter().collect(),
            max_level: detection.max_severity,
        }
    }
}

/// [`ProfanityFilter::profanity_stats`] against the built-in tables.
pub fn profanity_stats(text: &str) -> ProfanityStats {
    ProfanityFilter::builtin().profanity_stats(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeverityLevel;

    #[test]
    fn test_empty_text() {
        let stats = profanity_stats("");
        assert_eq!(stats.total_words, 0);
        assert_eq!(stats.profanity_count, 0);
        assert_eq!(stats.profanity_ratio, 0.0);
        assert!(stats.detected_words.is_empty());
        assert_eq!(stats.max_level, SeverityLevel::Mild);
    }

    #[test]
    fn test_counts_distinct_terms() {
        let stats = profanity_stats("바보 바보 친구");
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.profanity_count, 1);
        assert!((stats.profanity_ratio - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.detected_words, vec!["바보".to_string()]);
    }

    #[test]
    fn test_reports_max_level() {
        let stats = profanity_stats("바보 시발 너");
        assert_eq!(stats.profanity_count, 2);
        assert_eq!(stats.max_level, SeverityLevel::Severe);
        assert!((stats.profanity_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_clean_text_has_zero_ratio() {
        let stats = profanity_stats("오늘 날씨가 좋네요");
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.profanity_ratio, 0.0);
    }
}

// Built-in lexicon, pattern catalog and allowlist.
//
// The lexicon maps canonical terms to a severity. The pattern catalog maps
// obfuscated spellings (consonant-only, digit or vowel substitution) back to a canonical lexicon term. The allowlist holds benign
// words that contain a lexicon term ("개발", "시발점", "Dickens").
//
// Everything here is compiled once and never mutated afterwards.

use std::collections::HashMap;

use anyhow::{Context, Result};
use regex_lite::Regex;
use tracing::error;

use crate::models::SeverityLevel;
use crate::text::normalize;

use SeverityLevel::{Extreme, Mild, Moderate, Severe};

/// Canonical profane terms and their severity.
pub const BUILTIN_LEXICON: &[(&str, SeverityLevel)] = &[
    ("미친", Mild),
    ("바보", Mild),
    ("멍청이", Mild),
    ("꺼져", Mild),
    ("닥쳐", Mild),
    ("damn", Mild),
    ("stupid", Mild),
    ("병신", Moderate),
    ("지랄", Moderate),
    ("염병", Moderate),
    ("또라이", Moderate),
    ("존나", Moderate),
    ("shit", Moderate),
    ("dick", Moderate),
    ("bastard", Moderate),
    ("시발", Severe),
    ("씨발", Severe),
    ("씨바", Severe),
    ("개새끼", Severe),
    ("좆", Severe),
    ("fuck", Severe),
    ("bitch", Severe),
    ("asshole", Severe),
    ("니애미", Extreme),
    ("느금마", Extreme),
    ("엠창", Extreme),
    ("motherfucker", Extreme),
    ("cunt", Extreme),
];

/// Benign substrings. Any of these anywhere in the normalized input marks
/// the whole input clean.
pub const BUILTIN_ALLOWLIST: &[&str] = &[
    "시발점",
    "시발역",
    "씨발라",
    "개발",
    "dickens",
    "dickinson",
    "scunthorpe",
    "shiitake",
];

/// Digits allowed between the letters of an obfuscated spelling ("씨1발").
/// Whitespace and punctuation are already gone after normalization.
const DIGIT_GAP: &str = "[0-9]*";

/// Hangul obfuscations: each unit is one syllable slot, covering the bare
/// initial consonant and common substitutes.
const HANGUL_PATTERNS: &[(&str, &[&str])] = &[
    ("시발", &["[ㅅㅆ시씨쉬쒸]", "[ㅂㅃ발빨벌뻘]"]),
    ("병신", &["[ㅂㅃ병빙븅]", "[ㅅㅆ신씬]"]),
    ("개새끼", &["[ㄱㄲ개게깨]", "[ㅅㅆ새세쌔쎄]", "[ㄲㄱ끼키기]"]),
    ("존나", &["[ㅈㅉ존졷좆]", "[ㄴ나]"]),
    ("지랄", &["[ㅈ지찌]", "[ㄹ랄럴]"]),
    ("미친", &["[ㅁ미]", "[ㅊ친칀]"]),
    ("니애미", &["[ㄴ니느]", "[ㅇ애에]", "[ㅁ미]"]),
];

/// Latin obfuscations: leetspeak vowels and dropped vowels. Case is already
/// folded by the normalizer.
const LATIN_PATTERNS: &[(&str, &[&str])] = &[
    ("fuck", &["(?:f|ph)", "[uv]?", "c", "k"]),
    ("shit", &["s", "h", "[i1l]", "t"]),
    ("bitch", &["b", "[i1l]", "t?", "c", "h"]),
];

/// The built-in pattern catalog as (canonical term, regex source) pairs.
/// Every pattern is matched against normalized text.
pub fn builtin_pattern_sources() -> Vec<(&'static str, String)> {
    HANGUL_PATTERNS
        .iter()
        .chain(LATIN_PATTERNS)
        .map(|(term, units)| (*term, units.join(DIGIT_GAP)))
        .collect()
}

/// A canonical profane term with its severity.
#[derive(Debug, Clone)]
pub struct LexiconEntry {
    pub term: String,
    pub severity: SeverityLevel,
    /// The term run through the normalizer, used for scanning normalized text.
    normalized: String,
}

impl LexiconEntry {
    pub fn new(term: &str, severity: SeverityLevel) -> Result<Self> {
        let normalized = normalize(term);
        if normalized.is_empty() {
            anyhow::bail!("lexicon term {term:?} is empty after normalization");
        }
        Ok(Self {
            term: term.to_string(),
            severity,
            normalized,
        })
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}

/// An obfuscation matcher mapped back to a canonical term. The regex runs
/// over normalized text; the whole match is masked when filtering.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    pub term: String,
    matcher: Regex,
}

impl PatternEntry {
    pub fn new(term: &str, pattern: &str) -> Result<Self> {
        let matcher = Regex::new(pattern)
            .with_context(|| format!("invalid pattern {pattern:?} for term {term:?}"))?;
        Ok(Self {
            term: term.to_string(),
            matcher,
        })
    }

    pub fn matcher(&self) -> &Regex {
        &self.matcher
    }
}

/// The compiled lexicon, pattern catalog and allowlist.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    lexicon: Vec<LexiconEntry>,
    patterns: Vec<PatternEntry>,
    allowlist: Vec<String>,
    severities: HashMap<String, SeverityLevel>,
}

impl Tables {
    /// Compile the built-in tables. Entries that fail to compile are logged
    /// and skipped; the unit tests guarantee none do.
    pub fn builtin() -> Self {
        let mut tables = Tables::default();

        for (term, severity) in BUILTIN_LEXICON {
            match LexiconEntry::new(term, *severity) {
                Ok(entry) => tables.add_term(entry),
                Err(e) => error!(term, error = %e, "Skipping built-in lexicon entry"),
            }
        }

        for (term, source) in builtin_pattern_sources() {
            match PatternEntry::new(term, &source) {
                Ok(entry) => tables.add_pattern(entry),
                Err(e) => error!(term, error = %e, "Skipping built-in pattern"),
            }
        }

        for term in BUILTIN_ALLOWLIST {
            tables.allow(term);
        }

        tables
    }

    /// Add a lexicon entry. An existing entry with the same term is replaced,
    /// so an operator can re-grade a built-in term.
    pub fn add_term(&mut self, entry: LexiconEntry) {
        self.severities.insert(entry.term.clone(), entry.severity);
        match self.lexicon.iter_mut().find(|e| e.term == entry.term) {
            Some(existing) => *existing = entry,
            None => self.lexicon.push(entry),
        }
    }

    pub fn add_pattern(&mut self, entry: PatternEntry) {
        self.patterns.push(entry);
    }

    /// Add an allowed term. Stored normalized; empty and duplicate terms are ignored.
    pub fn allow(&mut self, term: &str) {
        let normalized = normalize(term);
        if !normalized.is_empty() && !self.allowlist.contains(&normalized) {
            self.allowlist.push(normalized);
        }
    }

    pub fn lexicon(&self) -> &[LexiconEntry] {
        &self.lexicon
    }

    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    pub fn allowlist(&self) -> &[String] {
        &self.allowlist
    }

    /// Severity for a canonical term. Terms with no lexicon entry (e.g. from
    /// an operator-supplied pattern) count as `Mild`.
    pub fn severity_of(&self, term: &str) -> SeverityLevel {
        self.severities.get(term).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_compile_completely() {
        let tables = Tables::builtin();
        assert_eq!(tables.lexicon().len(), BUILTIN_LEXICON.len());
        assert_eq!(tables.patterns().len(), builtin_pattern_sources().len());
        assert_eq!(tables.allowlist().len(), BUILTIN_ALLOWLIST.len());
    }

    #[test]
    fn test_every_pattern_term_has_a_lexicon_severity() {
        let tables = Tables::builtin();
        for pattern in tables.patterns() {
            assert!(
                tables.lexicon().iter().any(|e| e.term == pattern.term),
                "pattern term {} is missing from the lexicon",
                pattern.term
            );
        }
    }

    #[test]
    fn test_builtin_lexicon_terms_are_normalized() {
        for (term, _) in BUILTIN_LEXICON {
            assert_eq!(normalize(term), *term, "lexicon term {term} must be stored normalized");
        }
    }

    #[test]
    fn test_consonant_only_pattern() {
        let tables = Tables::builtin();
        let hit = tables
            .patterns()
            .iter()
            .find(|p| p.matcher().is_match("ㅅㅂ"))
            .map(|p| p.term.as_str());
        assert_eq!(hit, Some("시발"));
    }

    #[test]
    fn test_patterns_match_normalized_spellings() {
        let tables = Tables::builtin();
        let matches = |text: &str| tables.patterns().iter().any(|p| p.matcher().is_match(text));
        assert!(matches("ㅂㅅ"));
        assert!(matches("씨1발"));
        assert!(matches("ㄱㅅㄲ"));
        assert!(matches("sh1t"));
        assert!(matches("fvck"));
        assert!(matches("phuck"));
        assert!(!matches("안녕하세요"));
        assert!(!matches("selfcheck"));
    }

    #[test]
    fn test_one_pattern_per_catalog_row() {
        assert_eq!(
            builtin_pattern_sources().len(),
            HANGUL_PATTERNS.len() + LATIN_PATTERNS.len()
        );
    }

    #[test]
    fn test_add_term_replaces_existing() {
        let mut tables = Tables::builtin();
        tables.add_term(LexiconEntry::new("바보", SeverityLevel::Severe).unwrap());
        assert_eq!(tables.severity_of("바보"), SeverityLevel::Severe);
        assert_eq!(tables.lexicon().len(), BUILTIN_LEXICON.len());
    }

    #[test]
    fn test_unknown_term_defaults_to_mild() {
        let tables = Tables::builtin();
        assert_eq!(tables.severity_of("not-a-term"), SeverityLevel::Mild);
    }

    #[test]
    fn test_empty_lexicon_term_rejected() {
        assert!(LexiconEntry::new("...", SeverityLevel::Mild).is_err());
        assert!(LexiconEntry::new("", SeverityLevel::Mild).is_err());
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(PatternEntry::new("x", "(unclosed").is_err());
    }

    #[test]
    fn test_allow_dedups_and_normalizes() {
        let mut tables = Tables::default();
        tables.allow("Dickens!");
        tables.allow("dickens");
        tables.allow("   ");
        assert_eq!(tables.allowlist(), ["dickens".to_string()]);
    }
}

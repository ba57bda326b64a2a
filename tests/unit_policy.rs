// Unit tests for the policy evaluator, boundary validation and statistics.

use cleantalk::lexicon::tables::BUILTIN_LEXICON;
use cleantalk::{
    detect_profanity, filter_by_level, filter_profanity, profanity_stats, validate_profanity,
    FilterPolicy, MaskOptions, ProfanityFilter, SeverityLevel,
};

/// The term with a separator between every letter, for each separator.
fn separated_variants(term: &str) -> Vec<String> {
    let letters: Vec<String> = term.chars().map(String::from).collect();
    [".", " ", "-", "_ ", "  ", "\t"]
        .iter()
        .map(|sep| letters.join(*sep))
        .collect()
}

// ============================================================
// filter_by_level: threshold semantics
// ============================================================

#[test]
fn mild_term_tolerated_under_moderate() {
    let verdict = filter_by_level("미친", SeverityLevel::Moderate);
    assert!(verdict.allowed);
    assert_eq!(verdict.filtered, "미친");
}

#[test]
fn severe_term_rejected_under_moderate() {
    let verdict = filter_by_level("시발", SeverityLevel::Moderate);
    assert!(!verdict.allowed);
    assert_eq!(verdict.filtered, "시*");
}

#[test]
fn extreme_threshold_allows_everything() {
    for text in ["", "안녕", "시발", "니애미", "motherfucker", "ㅅㅂ", "바보 느금마"] {
        let verdict = filter_by_level(text, SeverityLevel::Extreme);
        assert!(verdict.allowed, "{text:?} rejected at Extreme");
        assert_eq!(verdict.filtered, text);
    }
}

#[test]
fn verdict_uses_max_severity() {
    // Mild + Severe in one text: the Severe term decides.
    let verdict = filter_by_level("바보 시발", SeverityLevel::Moderate);
    assert!(!verdict.allowed);
    assert_eq!(verdict.filtered, "바* 시*");
}

#[test]
fn each_threshold_boundary() {
    let cases = [
        ("바보", SeverityLevel::Mild),
        ("병신", SeverityLevel::Moderate),
        ("개새끼", SeverityLevel::Severe),
        ("엠창", SeverityLevel::Extreme),
    ];
    for (text, level) in cases {
        assert!(filter_by_level(text, level).allowed, "{text} at {level}");
        for lower in SeverityLevel::ALL.into_iter().filter(|l| *l < level) {
            assert!(!filter_by_level(text, lower).allowed, "{text} at {lower}");
        }
    }
}

#[test]
fn policy_struct_matches_free_function() {
    let policy = FilterPolicy::new(SeverityLevel::Moderate);
    for text in ["미친", "시발", "안녕", "ㅅㅂ"] {
        assert_eq!(
            policy.evaluate(ProfanityFilter::builtin(), text),
            filter_by_level(text, SeverityLevel::Moderate)
        );
    }
}

#[test]
fn policy_mask_applies_to_rejected_text() {
    let policy = FilterPolicy::new(SeverityLevel::Mild).with_mask(MaskOptions {
        mask_char: 'X',
        keep_first_char: true,
    });
    let verdict = policy.evaluate(ProfanityFilter::builtin(), "병신아");
    assert_eq!(verdict.filtered, "병X아");
}

// ============================================================
// Every lexicon term, obfuscated with separators
// ============================================================

#[test]
fn separated_lexicon_terms_are_detected() {
    for (term, severity) in BUILTIN_LEXICON {
        for variant in separated_variants(term) {
            let result = detect_profanity(&variant);
            assert!(result.matched_terms.contains(*term), "{variant:?} missed {term}");
            assert!(result.max_severity >= *severity, "{variant:?}");
            assert!(!validate_profanity(&variant, "content").valid, "{variant:?}");
        }
    }
}

#[test]
fn rejected_verdict_never_shows_the_term() {
    for (term, _) in BUILTIN_LEXICON {
        for variant in separated_variants(term) {
            let verdict = filter_by_level(&variant, SeverityLevel::Mild);
            let expected_allowed = detect_profanity(&variant).max_severity <= SeverityLevel::Mild;
            assert_eq!(verdict.allowed, expected_allowed, "{variant:?}");
            if !verdict.allowed {
                assert_ne!(verdict.filtered, variant);
                assert!(
                    !detect_profanity(&verdict.filtered).has_profanity,
                    "{variant:?} filtered to {:?}",
                    verdict.filtered
                );
            }
        }
    }
}

#[test]
fn separated_lexicon_terms_are_masked_at_length() {
    for (term, _) in BUILTIN_LEXICON {
        for variant in separated_variants(term) {
            let filtered = filter_profanity(&variant, MaskOptions::default());
            assert_ne!(filtered, variant, "{variant:?} left unmasked");
            assert_eq!(filtered.chars().count(), variant.chars().count(), "{variant:?}");
        }
    }
}

// ============================================================
// validate_profanity: API boundary
// ============================================================

#[test]
fn validation_error_is_field_scoped() {
    let outcome = validate_profanity("ㅂㅅ", "nickname");
    assert!(!outcome.valid);
    assert!(outcome.error.as_deref().unwrap().starts_with("nickname"));
}

#[test]
fn validation_is_strict_regardless_of_severity() {
    // Even a Mild term makes the field invalid; only filter_by_level is soft.
    assert!(!validate_profanity("바보", "title").valid);
}

#[test]
fn validation_passes_clean_and_allowlisted() {
    assert!(validate_profanity("국회의원 공약 정리", "title").valid);
    assert!(validate_profanity("개발 일정 공유", "title").valid);
    assert!(validate_profanity("", "title").valid);
}

#[test]
fn validation_serializes_without_null_error() {
    let json = serde_json::to_string(&validate_profanity("안녕", "content")).unwrap();
    assert_eq!(json, r#"{"valid":true}"#);
}

// ============================================================
// profanity_stats
// ============================================================

#[test]
fn stats_for_empty_text() {
    let stats = profanity_stats("");
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.profanity_count, 0);
    assert_eq!(stats.profanity_ratio, 0.0);
}

#[test]
fn stats_whitespace_only() {
    let stats = profanity_stats(" \t\n ");
    assert_eq!(stats.total_words, 0);
    assert_eq!(stats.profanity_ratio, 0.0);
}

#[test]
fn stats_count_distinct_terms_not_occurrences() {
    let stats = profanity_stats("시발 시발 시발 진짜");
    assert_eq!(stats.total_words, 4);
    assert_eq!(stats.profanity_count, 1);
    assert!((stats.profanity_ratio - 0.25).abs() < 1e-9);
    assert_eq!(stats.max_level, SeverityLevel::Severe);
}

#[test]
fn stats_respect_allowlist() {
    let stats = profanity_stats("개발 시발");
    assert_eq!(stats.total_words, 2);
    assert_eq!(stats.profanity_count, 0);
    assert!(stats.detected_words.is_empty());
}

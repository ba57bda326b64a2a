// Transformer: masking and censorship of raw text.
//
// Matching happens on normalized text, exactly as in the detector, so
// anything the detector flags is also masked. Each match is mapped back to
// its span in the raw text and replaced there by a mask of the same
// character length, separators inside the span included. Every span is
// found before anything is replaced, and overlapping spans are merged.

use serde::{Deserialize, Serialize};

use crate::detect::ProfanityFilter;
use crate::models::Censored;
use crate::text::{normalize_with_map, Normalized};

/// How a matched span is masked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskOptions {
    pub mask_char: char,
    /// Keep the first character of each match visible ("시*"). Single
    /// character matches are always masked in full.
    pub keep_first_char: bool,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask_char: '*',
            keep_first_char: true,
        }
    }
}

impl MaskOptions {
    /// Mask `matched`, preserving its character length.
    pub fn mask(&self, matched: &str) -> String {
        let keep_first = self.keep_first_char && matched.chars().nth(1).is_some();
        matched
            .chars()
            .enumerate()
            .map(|(i, c)| if keep_first && i == 0 { c } else { self.mask_char })
            .collect()
    }
}

/// Sort spans and merge the ones that overlap. Adjacent spans stay apart so
/// "바보바보" masks as two matches.
fn merge_overlapping(mut spans: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

impl ProfanityFilter {
    /// Raw char spans of every lexicon and pattern match in `normalized`.
    fn match_spans(&self, normalized: &Normalized) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        for entry in self.tables().lexicon() {
            spans.extend(
                normalized
                    .text
                    .match_indices(entry.normalized())
                    .filter_map(|(start, hit)| {
                        normalized.raw_span_of_bytes(start, start + hit.len())
                    }),
            );
        }
        for pattern in self.tables().patterns() {
            spans.extend(
                pattern
                    .matcher()
                    .find_iter(&normalized.text)
                    .filter_map(|m| normalized.raw_span_of_bytes(m.start(), m.end())),
            );
        }
        merge_overlapping(spans)
    }

    /// Mask every lexicon and pattern match. Allowlisted input is returned
    /// unchanged.
    pub fn filter_profanity(&self, text: &str, options: MaskOptions) -> String {
        if text.is_empty() || self.is_allowed(text) {
            return text.to_string();
        }

        let spans = self.match_spans(&normalize_with_map(text));
        if spans.is_empty() {
            return text.to_string();
        }

        let chars: Vec<char> = text.chars().collect();
        let mut filtered = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end) in spans {
            filtered.extend(&chars[cursor..start]);
            let matched: String = chars[start..end].iter().collect();
            filtered.push_str(&options.mask(&matched));
            cursor = end;
        }
        filtered.extend(&chars[cursor..]);
        filtered
    }

    /// Hard gate: the text itself when clean, otherwise `Rejected`, which
    /// reveals nothing of the input.
    pub fn censor_profanity(&self, text: &str) -> Censored {
        if self.contains_profanity(text) {
            Censored::Rejected
        } else {
            Censored::Clean(text.to_string())
        }
    }

    /// Filter each text independently, preserving order.
    pub fn filter_multiple<S: AsRef<str>>(&self, texts: &[S], options: MaskOptions) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.filter_profanity(text.as_ref(), options))
            .collect()
    }
}

/// [`ProfanityFilter::filter_profanity`] against the built-in tables.
pub fn filter_profanity(text: &str, options: MaskOptions) -> String {
    ProfanityFilter::builtin().filter_profanity(text, options)
}

/// [`ProfanityFilter::censor_profanity`] against the built-in tables.
pub fn censor_profanity(text: &str) -> Censored {
    ProfanityFilter::builtin().censor_profanity(text)
}

/// [`ProfanityFilter::filter_multiple`] against the built-in tables.
pub fn filter_multiple<S: AsRef<str>>(texts: &[S], options: MaskOptions) -> Vec<String> {
    ProfanityFilter::builtin().filter_multiple(texts, options)
}

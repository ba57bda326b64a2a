// Text normalization shared by the detector, the allowlist guard and the
// transformer.
//
// Normalization strips the separators people sprinkle between letters
// ("f.u.c.k", "시-발", "느 금 마") and folds ASCII case. The transformer needs
// to map a match in normalized text back onto the raw text, so the
// normalizer can also record where every kept character came from.

/// Normalized text plus, for each of its characters, the char index of the
/// raw character it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    raw_index: Vec<usize>,
}

impl Normalized {
    /// Raw char range covered by the normalized char range `start..end`.
    ///
    /// Separators between the first and last kept character are inside the
    /// returned range. Returns `None` for an empty or out-of-bounds range.
    pub fn raw_span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end {
            return None;
        }
        let first = *self.raw_index.get(start)?;
        let last = *self.raw_index.get(end - 1)?;
        Some((first, last + 1))
    }

    /// Raw char range for a byte range of `self.text`, as returned by
    /// `match_indices` or a regex match.
    pub fn raw_span_of_bytes(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        self.raw_span(char_offset(&self.text, start), char_offset(&self.text, end))
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_punctuation()
}

/// Normalize text for matching.
///
/// Removes every whitespace and ASCII punctuation character and lowercases
/// ASCII letters. Non-ASCII text (Hangul included) passes through untouched.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !is_separator(*c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// [`normalize`], keeping the raw position of every kept character.
pub fn normalize_with_map(text: &str) -> Normalized {
    let mut normalized = Normalized {
        text: String::with_capacity(text.len()),
        raw_index: Vec::with_capacity(text.len()),
    };
    for (i, c) in text.chars().enumerate() {
        if !is_separator(c) {
            normalized.text.push(c.to_ascii_lowercase());
            normalized.raw_index.push(i);
        }
    }
    normalized
}

/// Split on runs of whitespace, dropping empty tokens.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Convert a byte offset into `text` to a character offset.
pub(crate) fn char_offset(text: &str, byte_offset: usize) -> usize {
    text.get(..byte_offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| text.chars().count())
}

// Detector: one pass over the text against the lexicon and pattern catalog.
//
// Order of operations is fixed: allowlist guard first (a hit means the whole
// input is clean), then normalization, then exact lexicon scans, then the
// pattern catalog. Severity is the maximum over every matched term, never
// the first match.
//
// ProfanityFilter is the engine value. The transformer, policy and stats
// modules add their operations to it in their own `impl` blocks. The free
// functions at the bottom of each module run against the built-in tables.

use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use tracing::debug;

use crate::lexicon::extension::LexiconExtension;
use crate::lexicon::tables::Tables;
use crate::models::DetectionResult;
use crate::text::{char_offset, normalize};

static BUILTIN: LazyLock<ProfanityFilter> = LazyLock::new(|| {
    let filter = ProfanityFilter::new(Tables::builtin());
    debug!(
        lexicon = filter.tables.lexicon().len(),
        patterns = filter.tables.patterns().len(),
        allowlist = filter.tables.allowlist().len(),
        "Loaded built-in profanity tables"
    );
    filter
});

/// The profanity engine: immutable tables plus the operations over them.
///
/// Cheap to share across threads; every method takes `&self` and allocates
/// only its own result.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    tables: Tables,
}

impl ProfanityFilter {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    /// The process-wide filter over the built-in tables.
    pub fn builtin() -> &'static ProfanityFilter {
        &BUILTIN
    }

    /// Built-in tables with an operator extension merged on top.
    pub fn with_extension(extension: &LexiconExtension) -> Result<Self> {
        let mut tables = Tables::builtin();
        extension.apply(&mut tables)?;
        Ok(Self::new(tables))
    }

    /// Built-in tables with the extension file at `path` merged on top.
    pub fn from_extension_file(path: &Path) -> Result<Self> {
        Self::with_extension(&LexiconExtension::load(path)?)
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Allowlist guard: true if the normalized text contains any allowed term.
    ///
    /// This suppresses detection for the entire input, including unrelated
    /// profanity elsewhere in the same text.
    pub fn is_allowed(&self, text: &str) -> bool {
        let normalized = normalize(text);
        self.allowed_normalized(&normalized)
    }

    fn allowed_normalized(&self, normalized: &str) -> bool {
        self.tables
            .allowlist()
            .iter()
            .any(|allowed| normalized.contains(allowed.as_str()))
    }

    /// Fast yes/no check. Stops at the first lexicon or pattern hit.
    pub fn contains_profanity(&self, text: &str) -> bool {
        let normalized = normalize(text);
        if normalized.is_empty() || self.allowed_normalized(&normalized) {
            return false;
        }

        self.tables
            .lexicon()
            .iter()
            .any(|entry| normalized.contains(entry.normalized()))
            || self
                .tables
                .patterns()
                .iter()
                .any(|pattern| pattern.matcher().is_match(&normalized))
    }

    /// Full detection pass: every matched canonical term, the maximum
    /// severity among them, and the positions of exact lexicon hits.
    pub fn detect_profanity(&self, text: &str) -> DetectionResult {
        let normalized = normalize(text);
        if normalized.is_empty() || self.allowed_normalized(&normalized) {
            return DetectionResult::clean();
        }

        let mut result = DetectionResult::clean();

        for entry in self.tables.lexicon() {
            let mut hit = false;
            for (byte_offset, _) in normalized.match_indices(entry.normalized()) {
                result.positions.push(char_offset(&normalized, byte_offset));
                hit = true;
            }
            if hit {
                result.matched_terms.insert(entry.term.clone());
            }
        }

        for pattern in self.tables.patterns() {
            if pattern.matcher().is_match(&normalized) {
                result.matched_terms.insert(pattern.term.clone());
            }
        }

        result.positions.sort_unstable();
        result.has_profanity = !result.matched_terms.is_empty();
        result.max_severity = result
            .matched_terms
            .iter()
            .map(|term| self.tables.severity_of(term))
            .max()
            .unwrap_or_default();

        if result.has_profanity {
            debug!(
                terms = ?result.matched_terms,
                severity = %result.max_severity,
                "Profanity detected"
            );
        }

        result
    }
}

/// [`ProfanityFilter::is_allowed`] against the built-in tables.
pub fn is_allowed(text: &str) -> bool {
    ProfanityFilter::builtin().is_allowed(text)
}

/// [`ProfanityFilter::contains_profanity`] against the built-in tables.
pub fn contains_profanity(text: &str) -> bool {
    ProfanityFilter::builtin().contains_profanity(text)
}

/// [`ProfanityFilter::detect_profanity`] against the built-in tables.
pub fn detect_profanity(text: &str) -> DetectionResult {
    ProfanityFilter::builtin().detect_profanity(text)
}

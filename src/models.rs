// Data models: the values that flow out of a detection pass.
//
// These are separate from the matching code so callers (the API layer, the
// CLI, batch jobs) can use them without depending on the lexicon internals.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How offensive a term is. Totally ordered: `Mild < Moderate < Severe < Extreme`.
///
/// Serialized as the integer 1-4 so operator files stay compact.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum SeverityLevel {
    #[default]
    Mild = 1,
    Moderate = 2,
    Severe = 3,
    Extreme = 4,
}

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Mild,
        SeverityLevel::Moderate,
        SeverityLevel::Severe,
        SeverityLevel::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "Mild",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Severe => "Severe",
            SeverityLevel::Extreme => "Extreme",
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for SeverityLevel {
    type Error = anyhow::Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SeverityLevel::Mild),
            2 => Ok(SeverityLevel::Moderate),
            3 => Ok(SeverityLevel::Severe),
            4 => Ok(SeverityLevel::Extreme),
            other => anyhow::bail!("severity must be between 1 and 4, got {other}"),
        }
    }
}

impl From<SeverityLevel> for u8 {
    fn from(level: SeverityLevel) -> Self {
        level.as_u8()
    }
}

/// Accepts either the numeric level ("3") or its name ("severe").
impl FromStr for SeverityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return SeverityLevel::try_from(n);
        }
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!("unknown severity {s:?} (expected 1-4 or mild/moderate/severe/extreme)")
            })
    }
}

/// The structured outcome of one detection pass.
///
/// `has_profanity` is always `!matched_terms.is_empty()`. When nothing
/// matched, `max_severity` is `Mild` by convention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub has_profanity: bool,
    /// Canonical terms, deduplicated. Pattern hits report the term they map to.
    pub matched_terms: BTreeSet<String>,
    pub max_severity: SeverityLevel,
    /// Character offsets of exact lexicon hits in the normalized text,
    /// ascending. Pattern hits are not positioned.
    pub positions: Vec<usize>,
}

impl DetectionResult {
    /// The result for input that is empty, allowlisted or simply clean.
    pub fn clean() -> Self {
        Self::default()
    }
}

/// Result of the soft, threshold-based policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelVerdict {
    pub allowed: bool,
    /// The original text when allowed, the masked text otherwise.
    pub filtered: String,
}

/// Boundary validation result handed to the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Word-ratio metrics for a single text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfanityStats {
    pub total_words: usize,
    /// Number of distinct canonical terms, not raw occurrences.
    pub profanity_count: usize,
    pub profanity_ratio: f64,
    pub detected_words: Vec<String>,
    pub max_level: SeverityLevel,
}

/// Shown in place of rejected content. Display only; callers should match
/// on [`Censored::Rejected`] rather than compare strings.
pub const REJECTED_PLACEHOLDER: &str = "[부적절한 표현이 포함되어 있어 표시할 수 없습니다]";

/// Hard-gate censorship outcome. `Rejected` carries nothing from the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum Censored {
    Clean(String),
    Rejected,
}

impl Censored {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Censored::Rejected)
    }

    /// Text safe to render: the original when clean, the placeholder otherwise.
    pub fn display_text(&self) -> &str {
        match self {
            Censored::Clean(text) => text,
            Censored::Rejected => REJECTED_PLACEHOLDER,
        }
    }
}

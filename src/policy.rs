// Policy evaluator: threshold decisions and boundary validation.
//
// `filter_by_level` is the soft policy: profanity at or below the threshold
// passes through unmasked. `validate_profanity` is what the API layer calls
// before persisting a post, comment or nickname; any detection at all makes
// the field invalid.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::detect::ProfanityFilter;
use crate::models::{LevelVerdict, SeverityLevel, ValidationOutcome};
use crate::transform::MaskOptions;

/// Accept/reject threshold plus the masking used for rejected text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPolicy {
    /// Highest severity that is tolerated unmasked.
    pub allowed_severity_threshold: SeverityLevel,
    #[serde(default)]
    pub mask: MaskOptions,
}

impl FilterPolicy {
    pub fn new(allowed_severity_threshold: SeverityLevel) -> Self {
        Self {
            allowed_severity_threshold,
            mask: MaskOptions::default(),
        }
    }

    pub fn with_mask(mut self, mask: MaskOptions) -> Self {
        self.mask = mask;
        self
    }

    pub fn evaluate(&self, filter: &ProfanityFilter, text: &str) -> LevelVerdict {
        let detection = filter.detect_profanity(text);
        if !detection.has_profanity || detection.max_severity <= self.allowed_severity_threshold {
            return LevelVerdict {
                allowed: true,
                filtered: text.to_string(),
            };
        }
        LevelVerdict {
            allowed: false,
            filtered: filter.filter_profanity(text, self.mask),
        }
    }
}

impl ValidationOutcome {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// Convert into a `Result` for callers that propagate with `?`.
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            return Ok(());
        }
        anyhow::bail!(self.error.unwrap_or_else(|| "invalid input".to_string()))
    }
}

impl ProfanityFilter {
    /// Soft policy check against `allowed_level`.
    pub fn filter_by_level(&self, text: &str, allowed_level: SeverityLevel) -> LevelVerdict {
        FilterPolicy::new(allowed_level).evaluate(self, text)
    }

    /// Field validation for the API boundary. The error names the field so
    /// the caller can surface it in its own 400 response.
    pub fn validate_profanity(&self, text: &str, field_name: &str) -> ValidationOutcome {
        if self.detect_profanity(text).has_profanity {
            ValidationOutcome {
                valid: false,
                error: Some(format!("{field_name}에 부적절한 표현이 포함되어 있습니다.")),
            }
        } else {
            ValidationOutcome::ok()
        }
    }
}

/// [`ProfanityFilter::filter_by_level`] against the built-in tables.
pub fn filter_by_level(text: &str, allowed_level: SeverityLevel) -> LevelVerdict {
    ProfanityFilter::builtin().filter_by_level(text, allowed_level)
}

/// [`ProfanityFilter::validate_profanity`] against the built-in tables.
pub fn validate_profanity(text: &str, field_name: &str) -> ValidationOutcome {
    ProfanityFilter::builtin().validate_profanity(text, field_name)
}

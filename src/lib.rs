// cleantalk: profanity detection and filtering for community content
//
// This is the library root. Each module corresponds to one stage of the
// engine: normalize -> allowlist guard -> detect -> transform / policy / stats.

pub mod detect;
pub mod lexicon;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod policy;
pub mod stats;
pub mod text;
pub mod transform;

pub use detect::{contains_profanity, detect_profanity, is_allowed, ProfanityFilter};
pub use models::{
    Censored, DetectionResult, LevelVerdict, ProfanityStats, SeverityLevel, ValidationOutcome,
};
pub use policy::{filter_by_level, validate_profanity, FilterPolicy};
pub use stats::profanity_stats;
pub use transform::{censor_profanity, filter_multiple, filter_profanity, MaskOptions};

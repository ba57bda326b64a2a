use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use cleantalk::detect::ProfanityFilter;
use cleantalk::models::SeverityLevel;
use cleantalk::policy::FilterPolicy;
use cleantalk::transform::MaskOptions;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// variable is optional; CLI flags override what is set here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Character used to mask matches (CLEANTALK_MASK_CHAR, default `*`)
    pub mask_char: char,
    /// Keep the first character of a match visible (CLEANTALK_KEEP_FIRST_CHAR, default true)
    pub keep_first_char: bool,
    /// Highest severity tolerated unmasked (CLEANTALK_THRESHOLD, default 1 / mild)
    pub threshold: SeverityLevel,
    /// Operator lexicon extension file (CLEANTALK_EXTENSION_PATH)
    pub extension_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Split out from `load` so tests
    /// don't have to mutate the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mask_char = match lookup("CLEANTALK_MASK_CHAR") {
            None => '*',
            Some(raw) => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_whitespace() => c,
                    _ => anyhow::bail!(
                        "CLEANTALK_MASK_CHAR must be a single non-space character, got {raw:?}"
                    ),
                }
            }
        };

        let keep_first_char = match lookup("CLEANTALK_KEEP_FIRST_CHAR").as_deref() {
            None => true,
            Some("1" | "true" | "yes") => true,
            Some("0" | "false" | "no") => false,
            Some(other) => anyhow::bail!(
                "CLEANTALK_KEEP_FIRST_CHAR must be true or false, got {other:?}"
            ),
        };

        let threshold = match lookup("CLEANTALK_THRESHOLD") {
            None => SeverityLevel::default(),
            Some(raw) => raw
                .parse::<SeverityLevel>()
                .with_context(|| format!("invalid CLEANTALK_THRESHOLD {raw:?}"))?,
        };

        let extension_path = lookup("CLEANTALK_EXTENSION_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            mask_char,
            keep_first_char,
            threshold,
            extension_path,
        })
    }

    pub fn mask_options(&self) -> MaskOptions {
        MaskOptions {
            mask_char: self.mask_char,
            keep_first_char: self.keep_first_char,
        }
    }

    pub fn policy(&self) -> FilterPolicy {
        FilterPolicy::new(self.threshold).with_mask(self.mask_options())
    }

    /// The built-in filter, or built-in plus the operator extension when one
    /// is configured. A broken extension file is an error, not a fallback.
    pub fn build_filter(&self) -> Result<ProfanityFilter> {
        match &self.extension_path {
            Some(path) => ProfanityFilter::from_extension_file(path),
            None => Ok(ProfanityFilter::builtin().clone()),
        }
    }
}

// Operator extension file: extra lexicon, pattern and allowlist entries.
//
// Moderators tune the word lists far more often than the detection code
// changes, so the tables accept a JSON overlay:
//
//   {
//     "lexicon":   [{ "term": "쓰레기", "severity": 2 }],
//     "patterns":  [{ "term": "쓰레기", "pattern": "ㅆㄹㄱ" }],
//     "allowlist": ["쓰레기통"]
//   }
//
// The overlay is applied once at startup. Every entry is validated; one bad
// entry fails the whole load rather than silently weakening moderation.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::tables::{LexiconEntry, PatternEntry, Tables};
use crate::models::SeverityLevel;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconExtension {
    #[serde(default)]
    pub lexicon: Vec<ExtensionTerm>,
    #[serde(default)]
    pub patterns: Vec<ExtensionPattern>,
    #[serde(default)]
    pub allowlist: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionTerm {
    pub term: String,
    pub severity: SeverityLevel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionPattern {
    /// Canonical term reported on a match. Should also appear in the
    /// lexicon, otherwise it is graded `Mild`.
    pub term: String,
    /// regex-lite syntax, matched against normalized text: lowercase, with
    /// whitespace and ASCII punctuation removed.
    pub pattern: String,
}

impl LexiconExtension {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse lexicon extension JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lexicon extension {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("invalid lexicon extension {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty() && self.patterns.is_empty() && self.allowlist.is_empty()
    }

    /// Compile every entry, then merge into `tables`. Nothing is merged if
    /// any entry fails to compile.
    pub fn apply(&self, tables: &mut Tables) -> Result<()> {
        let terms = self
            .lexicon
            .iter()
            .map(|t| LexiconEntry::new(&t.term, t.severity))
            .collect::<Result<Vec<_>>>()?;
        let patterns = self
            .patterns
            .iter()
            .map(|p| PatternEntry::new(&p.term, &p.pattern))
            .collect::<Result<Vec<_>>>()?;

        for entry in terms {
            tables.add_term(entry);
        }
        for entry in patterns {
            tables.add_pattern(entry);
        }
        for term in &self.allowlist {
            tables.allow(term);
        }

        info!(
            lexicon = self.lexicon.len(),
            patterns = self.patterns.len(),
            allowlist = self.allowlist.len(),
            "Applied lexicon extension"
        );
        Ok(())
    }
}

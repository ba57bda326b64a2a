// Lexicon: the three read-only tables the detector works from.
//
// `tables` holds the built-in lexicon, pattern catalog and allowlist plus the
// compiled entry types. `extension` lets an operator merge extra entries from
// a JSON file at startup without touching detection logic.

pub mod extension;
pub mod tables;

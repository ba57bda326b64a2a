// Batch moderation: run the engine over a file, one text per line.
//
// Used by moderators to re-check stored content after a lexicon change: each
// line goes through the threshold policy, the summary tallies what was
// flagged by severity, and the filtered lines can be written back out.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use crate::detect::ProfanityFilter;
use crate::models::SeverityLevel;
use crate::policy::FilterPolicy;

/// A line that contained profanity.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedLine {
    /// 1-based line number in the input.
    pub line_no: usize,
    pub max_severity: SeverityLevel,
    pub terms: Vec<String>,
    /// False when the line exceeded the policy threshold and was masked.
    pub allowed: bool,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total_lines: usize,
    pub flagged: Vec<FlaggedLine>,
    /// How many flagged lines peaked at each severity.
    pub by_severity: BTreeMap<SeverityLevel, usize>,
    /// Every input line after the policy, in input order.
    pub output: Vec<String>,
}

impl BatchSummary {
    pub fn flagged_count(&self) -> usize {
        self.flagged.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.flagged.iter().filter(|f| !f.allowed).count()
    }
}

/// Apply `policy` to every line. Lines are independent; blank lines pass
/// through untouched.
pub fn run(
    filter: &ProfanityFilter,
    lines: &[String],
    policy: &FilterPolicy,
    show_progress: bool,
) -> BatchSummary {
    let pb = if show_progress {
        let pb = ProgressBar::new(lines.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Filtering [{bar:30}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut summary = BatchSummary {
        total_lines: lines.len(),
        output: Vec::with_capacity(lines.len()),
        ..Default::default()
    };

    for (i, line) in lines.iter().enumerate() {
        let detection = filter.detect_profanity(line);
        if detection.has_profanity {
            let verdict = policy.evaluate(filter, line);
            *summary.by_severity.entry(detection.max_severity).or_insert(0) += 1;
            summary.flagged.push(FlaggedLine {
                line_no: i + 1,
                max_severity: detection.max_severity,
                terms: detection.matched_terms.into_iter().collect(),
                allowed: verdict.allowed,
            });
            summary.output.push(verdict.filtered);
        } else {
            summary.output.push(line.clone());
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    info!(
        lines = summary.total_lines,
        flagged = summary.flagged_count(),
        rejected = summary.rejected_count(),
        "Batch filtering complete"
    );

    summary
}

/// Read `path` line by line and run the batch over it.
pub fn run_file(
    filter: &ProfanityFilter,
    path: &Path,
    policy: &FilterPolicy,
    show_progress: bool,
) -> Result<BatchSummary> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch input {}", path.display()))?;
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    Ok(run(filter, &lines, policy, show_progress))
}

/// Write the filtered lines to `path`, newline-terminated.
pub fn write_output(summary: &BatchSummary, path: &Path) -> Result<()> {
    let mut body = summary.output.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body)
        .with_context(|| format!("failed to write filtered output to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_batch_tallies_and_masks_over_threshold() {
        let input = lines(&["안녕하세요", "바보", "시발", "", "니애미"]);
        let policy = FilterPolicy::new(SeverityLevel::Mild);
        let summary = run(ProfanityFilter::builtin(), &input, &policy, false);

        assert_eq!(summary.total_lines, 5);
        assert_eq!(summary.flagged_count(), 3);
        assert_eq!(summary.rejected_count(), 2);
        assert_eq!(summary.by_severity.get(&SeverityLevel::Mild), Some(&1));
        assert_eq!(summary.by_severity.get(&SeverityLevel::Severe), Some(&1));
        assert_eq!(summary.by_severity.get(&SeverityLevel::Extreme), Some(&1));
        assert_eq!(summary.output, vec!["안녕하세요", "바보", "시*", "", "니**"]);
        assert_eq!(summary.flagged[0].line_no, 2);
        assert!(summary.flagged[0].allowed);
    }

    #[test]
    fn test_batch_empty_input() {
        let summary = run(
            ProfanityFilter::builtin(),
            &[],
            &FilterPolicy::default(),
            false,
        );
        assert_eq!(summary.total_lines, 0);
        assert!(summary.output.is_empty());
        assert!(summary.by_severity.is_empty());
    }

    #[test]
    fn test_run_file_round_trip() {
        let dir = std::env::temp_dir().join(format!("cleantalk-batch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("in.txt");
        let output = dir.join("out.txt");
        std::fs::write(&input, "좋은 하루\n시발\n").unwrap();

        let summary = run_file(
            ProfanityFilter::builtin(),
            &input,
            &FilterPolicy::default(),
            false,
        )
        .unwrap();
        write_output(&summary, &output).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "좋은 하루\n시*\n");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_run_file_missing_input() {
        let result = run_file(
            ProfanityFilter::builtin(),
            Path::new("/nonexistent/cleantalk-input.txt"),
            &FilterPolicy::default(),
            false,
        );
        assert!(result.is_err());
    }
}

// Colored terminal output for detection results, verdicts and batch runs.
//
// main.rs decides what to show; this module decides how it looks.

use colored::Colorize;

use crate::models::{DetectionResult, LevelVerdict, ProfanityStats, SeverityLevel};
use crate::pipeline::batch::BatchSummary;

/// Display a single detection pass.
pub fn display_detection(result: &DetectionResult) {
    if !result.has_profanity {
        println!("{}", "Clean, no profanity detected.".green());
        return;
    }

    println!("\n{}", "=== Profanity Detected ===".bold());
    println!("  Max severity: {}", colorize_severity(result.max_severity));
    println!(
        "  Terms: {}",
        result
            .matched_terms
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !result.positions.is_empty() {
        let positions: Vec<String> = result.positions.iter().map(|p| p.to_string()).collect();
        println!("  Exact-match offsets: {}", positions.join(", ").dimmed());
    }
}

/// Display the threshold verdict.
pub fn display_verdict(verdict: &LevelVerdict, threshold: SeverityLevel) {
    let status = if verdict.allowed {
        "allowed".green().bold()
    } else {
        "rejected".red().bold()
    };
    println!(
        "{} (threshold: {})",
        status,
        colorize_severity(threshold)
    );
    println!("  {}", verdict.filtered);
}

/// Display word-ratio statistics.
pub fn display_stats(stats: &ProfanityStats) {
    println!("\n{}", "=== Profanity Stats ===".bold());
    println!("  Words: {}", stats.total_words);
    println!("  Distinct terms: {}", stats.profanity_count);
    println!("  Ratio: {:.2}", stats.profanity_ratio);
    if !stats.detected_words.is_empty() {
        println!("  Detected: {}", stats.detected_words.join(", "));
        println!("  Max level: {}", colorize_severity(stats.max_level));
    }
}

/// Display a batch summary with a preview of flagged lines.
pub fn display_batch_summary(summary: &BatchSummary, preview_limit: usize) {
    println!(
        "\n{}",
        format!("=== Batch Report ({} lines) ===", summary.total_lines).bold()
    );
    println!(
        "  Flagged: {}  Rejected: {}",
        summary.flagged_count(),
        summary.rejected_count()
    );

    for level in SeverityLevel::ALL.iter().rev() {
        if let Some(count) = summary.by_severity.get(level) {
            println!("  {:<10} {}", colorize_severity(*level), count);
        }
    }

    if summary.flagged.is_empty() || preview_limit == 0 {
        return;
    }

    println!();
    for flagged in summary.flagged.iter().take(preview_limit) {
        let text = summary
            .output
            .get(flagged.line_no - 1)
            .map(String::as_str)
            .unwrap_or("");
        println!(
            "  {:>5}: [{}] {}",
            flagged.line_no,
            colorize_severity(flagged.max_severity),
            super::truncate_chars(text, 80).dimmed()
        );
    }
    if summary.flagged.len() > preview_limit {
        println!(
            "  {}",
            format!("... and {} more", summary.flagged.len() - preview_limit).dimmed()
        );
    }
}

/// Colorize a severity level.
fn colorize_severity(level: SeverityLevel) -> colored::ColoredString {
    let label = level.as_str();
    match level {
        SeverityLevel::Extreme => label.red().bold(),
        SeverityLevel::Severe => label.bright_red(),
        SeverityLevel::Moderate => label.yellow(),
        SeverityLevel::Mild => label.green(),
    }
}

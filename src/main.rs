use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use cleantalk::models::SeverityLevel;
use cleantalk::output::terminal;
use cleantalk::pipeline::batch;

mod config;

/// cleantalk: profanity detection and filtering for community content.
///
/// Every text command takes the text as an argument, or reads it from stdin
/// when the argument is omitted.
#[derive(Parser)]
#[command(name = "cleantalk", version, about)]
struct Cli {
    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Yes/no profanity check (exit status 1 when profanity is found)
    Check { text: Option<String> },

    /// Full detection: matched terms, max severity, exact-match offsets
    Detect { text: Option<String> },

    /// Mask profanity in place
    Filter {
        text: Option<String>,

        /// Mask character (default from CLEANTALK_MASK_CHAR, else '*')
        #[arg(long)]
        mask_char: Option<char>,

        /// Mask the first character too
        #[arg(long)]
        no_keep_first: bool,
    },

    /// Print the text if clean, otherwise a placeholder revealing nothing
    Censor { text: Option<String> },

    /// Apply a severity threshold: tolerate up to the level, mask above it
    Level {
        text: Option<String>,

        /// Highest tolerated severity, 1-4 or mild/moderate/severe/extreme
        #[arg(long)]
        threshold: Option<SeverityLevel>,
    },

    /// Validate a form field (exit status 1 when invalid)
    Validate {
        text: Option<String>,

        /// Field name used in the error message
        #[arg(long, default_value = "content")]
        field: String,
    },

    /// Word count, distinct terms and profanity ratio
    Stats { text: Option<String> },

    /// Filter a file line by line and summarize what was flagged
    Batch {
        /// Input file, one text per line
        input: PathBuf,

        /// Write the filtered lines here
        #[arg(long)]
        output: Option<PathBuf>,

        /// Highest tolerated severity, 1-4 or mild/moderate/severe/extreme
        #[arg(long)]
        threshold: Option<SeverityLevel>,

        /// Flagged lines to preview in the report (default: 10)
        #[arg(long, default_value = "10")]
        preview: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cleantalk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load()?;
    let filter = config.build_filter()?;
    if let Some(path) = &config.extension_path {
        info!(path = %path.display(), "Using lexicon extension");
    }

    match cli.command {
        Commands::Check { text } => {
            let text = read_text(text)?;
            let profane = filter.contains_profanity(&text);
            if cli.json {
                print_json(&serde_json::json!({ "contains_profanity": profane }))?;
            } else if profane {
                println!("{}", "profanity detected".red().bold());
            } else {
                println!("{}", "clean".green());
            }
            if profane {
                std::process::exit(1);
            }
        }

        Commands::Detect { text } => {
            let result = filter.detect_profanity(&read_text(text)?);
            if cli.json {
                print_json(&result)?;
            } else {
                terminal::display_detection(&result);
            }
        }

        Commands::Filter {
            text,
            mask_char,
            no_keep_first,
        } => {
            let text = read_text(text)?;
            let mut options = config.mask_options();
            if let Some(c) = mask_char {
                options.mask_char = c;
            }
            if no_keep_first {
                options.keep_first_char = false;
            }
            let filtered = filter.filter_profanity(&text, options);
            if cli.json {
                print_json(&serde_json::json!({ "filtered": filtered }))?;
            } else {
                println!("{filtered}");
            }
        }

        Commands::Censor { text } => {
            let censored = filter.censor_profanity(&read_text(text)?);
            if cli.json {
                print_json(&censored)?;
            } else if censored.is_rejected() {
                println!("{}", censored.display_text().red());
            } else {
                println!("{}", censored.display_text());
            }
        }

        Commands::Level { text, threshold } => {
            let text = read_text(text)?;
            let mut policy = config.policy();
            if let Some(level) = threshold {
                policy.allowed_severity_threshold = level;
            }
            let verdict = policy.evaluate(&filter, &text);
            if cli.json {
                print_json(&verdict)?;
            } else {
                terminal::display_verdict(&verdict, policy.allowed_severity_threshold);
            }
        }

        Commands::Validate { text, field } => {
            let outcome = filter.validate_profanity(&read_text(text)?, &field);
            if cli.json {
                print_json(&outcome)?;
                if !outcome.valid {
                    std::process::exit(1);
                }
            } else {
                outcome.into_result()?;
                println!("{}", "valid".green());
            }
        }

        Commands::Stats { text } => {
            let stats = filter.profanity_stats(&read_text(text)?);
            if cli.json {
                print_json(&stats)?;
            } else {
                terminal::display_stats(&stats);
            }
        }

        Commands::Batch {
            input,
            output,
            threshold,
            preview,
        } => {
            let mut policy = config.policy();
            if let Some(level) = threshold {
                policy.allowed_severity_threshold = level;
            }

            if !cli.json {
                println!("Filtering {}...", input.display());
            }
            let summary = batch::run_file(&filter, &input, &policy, !cli.json)?;

            if let Some(path) = &output {
                batch::write_output(&summary, path)?;
            }

            if cli.json {
                print_json(&summary)?;
            } else {
                terminal::display_batch_summary(&summary, preview);
                if let Some(path) = &output {
                    println!(
                        "\n{}",
                        format!("Filtered output saved to: {}", path.display()).bold()
                    );
                }
            }
        }
    }

    Ok(())
}

/// The text argument, or all of stdin when it was omitted.
fn read_text(text: Option<String>) -> Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read text from stdin")?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}


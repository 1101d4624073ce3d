use std::time::Duration;

use serde::Serialize;

use modelprobe_common::{ModelId, ProbeOutcome, RunResult, RunStats};
use modelprobe_engine::Reporter;

use crate::args::OutputFormat;

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RESET: &str = "\x1b[0m";

/// Longest failure reason shown on a result line.
const MAX_REASON_CHARS: usize = 160;

#[derive(Debug, Clone, Copy)]
struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(self, color: &str, text: &str) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Prints each probe as it completes, then the summary.
pub struct ConsoleReporter {
    format: OutputFormat,
    palette: Palette,
}

impl ConsoleReporter {
    pub fn new(format: OutputFormat, color: bool) -> Self {
        Self {
            format,
            palette: Palette { enabled: color },
        }
    }

    pub fn print_header(&self) {
        if self.format == OutputFormat::Text {
            println!("Start checking...");
            println!("-----------------");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn on_outcome(&self, model: &ModelId, outcome: &ProbeOutcome) {
        if self.format == OutputFormat::Text {
            println!("{}", outcome_line(model, outcome, self.palette));
        }
    }

    fn on_finish(&self, result: &RunResult, stats: &RunStats) {
        match self.format {
            OutputFormat::Text => {
                for line in summary_lines(result, stats, self.palette) {
                    println!("{line}");
                }
            }
            OutputFormat::Json => println!("{}", summary_json(result, stats)),
        }
    }
}

fn outcome_line(model: &ModelId, outcome: &ProbeOutcome, palette: Palette) -> String {
    match outcome {
        ProbeOutcome::Available { latency } => format!(
            "{} {model} ({})",
            palette.paint(GREEN, "[√]"),
            format_secs(*latency)
        ),
        ProbeOutcome::Failed { reason } => format!(
            "{} {model} - {}",
            palette.paint(RED, "[X]"),
            palette.paint(RED, &truncate(reason, MAX_REASON_CHARS))
        ),
        ProbeOutcome::TimedOut => format!(
            "{} {model} - {}",
            palette.paint(YELLOW, "[T]"),
            palette.paint(YELLOW, "timed out")
        ),
    }
}

fn summary_lines(result: &RunResult, stats: &RunStats, palette: Palette) -> Vec<String> {
    vec![
        "End of inspection!".to_string(),
        "------------------".to_string(),
        format!(
            "{} available, {} failed, {} timed out, {} total in {}",
            palette.paint(GREEN, &stats.available.to_string()),
            palette.paint(RED, &stats.failed.to_string()),
            palette.paint(YELLOW, &stats.timed_out.to_string()),
            stats.submitted,
            format_secs(stats.elapsed)
        ),
        format!("Available: {}", join_ids(&result.available)),
        format!("Timed out: {}", join_ids(&result.timed_out)),
    ]
}

#[derive(Serialize)]
struct Summary<'a> {
    stats: &'a RunStats,
    result: &'a RunResult,
}

fn summary_json(result: &RunResult, stats: &RunStats) -> String {
    match serde_json::to_string_pretty(&Summary { stats, result }) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error=%e, "failed to serialize run summary");
            "{}".to_string()
        }
    }
}

fn join_ids(ids: &[ModelId]) -> String {
    ids.iter()
        .map(ModelId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_secs(d: Duration) -> String {
    format!("{:.2}s", d.as_secs_f64())
}

fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.trim();
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

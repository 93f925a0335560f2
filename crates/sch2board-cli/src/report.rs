//! Terminal output for placement runs.

use std::path::Path;

use colored::Colorize;
use sch2board_engine::{nm_to_mm, PlacementMethod, PlacementOutcome, PlacementSummary};

pub fn success_icon() -> String {
    "✓".green().to_string()
}

pub fn warning_icon() -> String {
    "!".yellow().to_string()
}

fn method_name(method: PlacementMethod) -> &'static str {
    match method {
        PlacementMethod::Direct => "direct",
        PlacementMethod::Ring => "ring",
        PlacementMethod::Optimised => "optimised",
        PlacementMethod::Grid => "grid",
        PlacementMethod::Unchecked => "unchecked",
    }
}

pub fn nothing_to_do(reason: &str) {
    eprintln!("{} {}", warning_icon(), format!("Nothing to do: {reason}").yellow());
}

pub fn print_summary(summary: &PlacementSummary, output: &Path) {
    for report in &summary.reports {
        match &report.outcome {
            PlacementOutcome::Placed {
                position,
                orientation,
                method,
                ..
            } => eprintln!(
                "  {} {:<8} ({:.3}, {:.3}) {:>6.1}° {}",
                success_icon(),
                report.label.bold(),
                nm_to_mm(position.x),
                nm_to_mm(position.y),
                orientation,
                method_name(*method).dimmed()
            ),
            PlacementOutcome::Skipped => eprintln!(
                "  {} {:<8} {}",
                warning_icon(),
                report.label.bold(),
                "no free position".yellow()
            ),
        }
    }

    eprintln!(
        "{} Placed {} components (scale {:.4}), wrote {}",
        success_icon(),
        summary.placed.to_string().green().bold(),
        summary.scale,
        output.display()
    );

    if summary.has_skips() {
        eprintln!(
            "{} {}",
            warning_icon(),
            format!(
                "{} components had no free position and were left where they were",
                summary.skipped
            )
            .yellow()
            .bold()
        );
    }
}

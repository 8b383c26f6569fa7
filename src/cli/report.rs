//! Report formatting and printing utilities.
//!
//! Displays issues in cargo-style format. Separate from the pass so that
//! minerr can be used as a library.

use std::{io::Write, time::Duration};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::core::PassStats;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Set to skip timing lines in verbose output.
pub const DISABLE_TIMING_ENV: &str = "MINERR_DISABLE_TIMING";

/// Print issues in cargo-style format to `writer`.
///
/// Issues are sorted by location and followed by a problem count.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    // Calculate max line number width for alignment
    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print the one-line result of a completed extraction.
pub fn print_success_to<W: Write>(
    file_path: &str,
    templates: usize,
    namespaces: usize,
    writer: &mut W,
) {
    let msg = format!(
        "Extracted {} {} in {} {} from {}",
        templates,
        if templates == 1 { "template" } else { "templates" },
        namespaces,
        if namespaces == 1 { "namespace" } else { "namespaces" },
        file_path
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print the pass counters collected in verbose mode.
pub fn print_stats_to<W: Write>(stats: &PassStats, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} minErr call(s): {} rewritten, {} left inside throw",
        "matched".bold(),
        stats.matched_calls,
        stats.rewritten_calls,
        stats.throw_wrapped_calls
    );
    if stats.duplicate_codes > 0 {
        let _ = writeln!(
            writer,
            "{} {} code(s) recorded more than once; the last template wins",
            "duplicate".bold().yellow(),
            stats.duplicate_codes
        );
    }
    let definition = match (stats.definitions, stats.definition_substituted) {
        (0, _) => "none found".to_string(),
        (_, true) => "substituted".to_string(),
        (n, false) => format!("{} kept", n),
    };
    let _ = writeln!(writer, "{} {}", "definition".bold(), definition);
}

/// Print elapsed time for a phase, unless timing is disabled by environment.
pub fn print_timing_to<W: Write>(phase: &str, elapsed: Duration, writer: &mut W) {
    if std::env::var_os(DISABLE_TIMING_ENV).is_some() {
        return;
    }
    let _ = writeln!(
        writer,
        "{} {} in {:.2}ms",
        "timing".dimmed(),
        phase,
        elapsed.as_secs_f64() * 1000.0
    );
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let ctx = issue.context();
    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    // Print clickable location: --> path:line:col
    let _ = writeln!(
        writer,
        "  {} {}:{}:{}",
        "-->".blue(),
        ctx.file_path(),
        ctx.line(),
        ctx.col()
    );

    let caret_char = match severity {
        Severity::Error => "^".red(),
        Severity::Warning => "^".yellow(),
    };

    let _ = writeln!(
        writer,
        "{:>width$} {}",
        "",
        "|".blue(),
        width = max_line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        ctx.line().to_string().blue(),
        "|".blue(),
        ctx.source_line,
        width = max_line_width
    );

    // Caret pointing to the column (col is 1-based)
    let prefix: String = ctx
        .source_line
        .chars()
        .take(ctx.col().saturating_sub(1))
        .collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret_char,
        width = max_line_width,
        padding = caret_padding
    );

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| i.context().line())
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    let (a, b) = (a.context(), b.context());
    a.file_path()
        .cmp(b.file_path())
        .then_with(|| a.line().cmp(&b.line()))
        .then_with(|| a.col().cmp(&b.col()))
}

//! Report rendering for the `reap` binary.
//!
//! Every command produces one [`Report`]. Pretty mode lays it out as aligned
//! rows for a terminal; JSON mode prints it as a single object on stdout.
//! Options-file parse errors get a source-annotated ariadne report.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report as Diagnostic, ReportKind, Source};
use cli_reap_core::Reaped;
use serde::Serialize;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for reports and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Aligned, coloured rows.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or pick from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Report model ────────────────────────────────────────────────────────

/// Outcome of one command: the claims that ran and the state they left.
#[derive(Debug, Serialize)]
pub(crate) struct Report {
    pub(crate) cmd: Vec<String>,
    pub(crate) steps: Vec<StepReport>,
    pub(crate) pos: Vec<String>,
    pub(crate) cur: Vec<String>,
    pub(crate) end: bool,
}

/// One claim or lookup and what it produced.
#[derive(Debug, Serialize)]
pub(crate) struct StepReport {
    pub(crate) op: &'static str,
    pub(crate) keys: Vec<String>,
    pub(crate) result: Reaped,
    pub(crate) source: Option<&'static str>,
}

impl StepReport {
    pub(crate) fn new(op: &'static str, keys: &[String], result: Reaped) -> Self {
        let source = match &result {
            Reaped::Found(_) | Reaped::Flag => Some("argv"),
            Reaped::Env(_) => Some("env"),
            Reaped::Default(_) => Some("default"),
            Reaped::NotFound => None,
        };
        Self {
            op,
            keys: keys.to_vec(),
            result,
            source,
        }
    }
}

// ── Rendering ───────────────────────────────────────────────────────────

/// Print `report` to stdout in `format`.
pub(crate) fn print_report(report: &Report, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Pretty => print_pretty(report),
    }
    Ok(())
}

fn print_pretty(report: &Report) {
    let color = io::stdout().is_terminal();
    let paint = |c: Color| color.then_some(c);
    let label = |name: &str| format!("{name:<5}").fg(paint(Color::Cyan));

    println!("{} {}", label("cmd"), join(&report.cmd));
    for step in &report.steps {
        let value = match &step.result {
            Reaped::Found(v) | Reaped::Env(v) | Reaped::Default(v) => format!("{v:?}"),
            other => other.to_string(),
        };
        let hit = if step.result.is_present() { Color::Green } else { Color::Red };
        let source = step.source.map(|s| format!(" ({s})")).unwrap_or_default();
        println!(
            "{} {} {}{}",
            label(step.op),
            step.keys.join(","),
            value.fg(paint(hit)),
            source
        );
    }
    println!("{} {}", label("pos"), join(&report.pos));
    println!("{} {}", label("cur"), join(&report.cur));
    println!("{} {}", label("end"), report.end);
}

/// Space-joined tokens, each debug-quoted when it would otherwise be ambiguous.
fn join(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.is_empty() || t.contains(char::is_whitespace) {
                format!("{t:?}")
            } else {
                t.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Errors ──────────────────────────────────────────────────────────────

/// Print the `--output json` error envelope to stdout.
pub(crate) fn print_error_envelope(error: &anyhow::Error) {
    let out = serde_json::json!({
        "success": false,
        "error": "command_failed",
        "message": format!("{error:#}"),
    });
    println!("{out:#}");
}

/// Render a JSON syntax error in an options file against its source.
pub(crate) fn render_json_error(source: &str, filename: &str, err: &serde_json::Error) {
    let offset = byte_offset(source, err.line(), err.column());
    let start = offset.min(source.len());
    let end = (start + 1).min(source.len()).max(start);
    let config = Config::default().with_color(io::stderr().is_terminal());
    let mut cache = (filename, Source::from(source));

    Diagnostic::build(ReportKind::Error, (filename, start..end))
        .with_message("invalid options file")
        .with_label(
            Label::new((filename, start..end))
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .with_config(config)
        .finish()
        .eprint(&mut cache)
        .ok();
}

/// Convert serde_json's 1-based line and column into a byte offset.
fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let line_start: usize = source
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    line_start + column.saturating_sub(1)
}

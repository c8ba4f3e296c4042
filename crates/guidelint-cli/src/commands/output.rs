//! Shared output formatting for lint results.

use anyhow::{Context, Result};
use guidelint_core::{Finding, FindingDiagnostic, OutputFormat, Report};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::io::{IsTerminal, Write};
use std::path::Path;

/// Prints `report` to stdout in the given format.
///
/// `root` is the directory the finding paths are relative to; the pretty
/// format reads the sources from there.
pub fn print(report: &Report, format: OutputFormat, root: &Path) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.render_json().context("Failed to serialize report")?;
            json.push('\n');
            json
        }
        OutputFormat::Pretty => render_pretty(report, root, std::io::stdout().is_terminal()),
    };

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write report")
}

fn render_pretty(report: &Report, root: &Path, color: bool) -> String {
    let theme = if color {
        GraphicalTheme::unicode()
    } else {
        GraphicalTheme::unicode_nocolor()
    };
    let handler = GraphicalReportHandler::new_themed(theme);

    let mut out = String::new();
    for (file, findings) in report.by_file() {
        match std::fs::read_to_string(root.join(file)) {
            Ok(source) => {
                for finding in findings {
                    let diagnostic = FindingDiagnostic::new(finding, source.clone());
                    if handler.render_report(&mut out, &diagnostic).is_err() {
                        push_plain(&mut out, finding);
                    }
                }
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for snippets: {e}", file.display());
                for finding in findings {
                    push_plain(&mut out, finding);
                }
            }
        }
    }

    out.push_str(&report.summary());
    out
}

fn push_plain(out: &mut String, finding: &Finding) {
    out.push_str(&finding.to_string());
    out.push('\n');
}

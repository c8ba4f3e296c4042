//! Aggregated results of a run and their rendering.

use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::engine::FileReport;
use crate::types::{Finding, Severity};

/// Exit status for a set of findings: 1 if any is an error, else 0.
///
/// Warnings never change the exit status.
#[must_use]
pub fn exit_code(findings: &[Finding]) -> i32 {
    i32::from(findings.iter().any(|f| f.severity == Severity::Error))
}

/// The sorted findings of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// All findings, in report order.
    pub findings: Vec<Finding>,
    /// Number of files analyzed.
    pub files_checked: usize,
    /// Number of files that failed to parse.
    pub parse_failures: usize,
    /// Whether the run stopped before every file was analyzed.
    pub truncated: bool,
}

impl Report {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges per-file fragments into one sorted report.
    #[must_use]
    pub fn from_file_reports(files: impl IntoIterator<Item = FileReport>) -> Self {
        let mut report = Self::new();
        for file in files {
            report.files_checked += 1;
            if file.parse_failed {
                report.parse_failures += 1;
            }
            report.findings.extend(file.findings);
        }
        report.findings.sort_by(Finding::report_order);
        report
    }

    /// Marks the report as incomplete.
    #[must_use]
    pub fn truncated(mut self) -> Self {
        self.truncated = true;
        self
    }

    /// Returns true if there are no findings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Returns true if any finding is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    /// Counts findings with the given severity.
    #[must_use]
    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    /// Returns true if files were analyzed and none of them parsed.
    #[must_use]
    pub fn all_inputs_failed_to_parse(&self) -> bool {
        self.files_checked > 0 && self.parse_failures == self.files_checked
    }

    /// Exit status of this report; see [`exit_code`].
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        exit_code(&self.findings)
    }

    /// Findings grouped by file, in report order.
    #[must_use]
    pub fn by_file(&self) -> Vec<(&Path, &[Finding])> {
        let mut groups = Vec::new();
        let mut start = 0;
        while start < self.findings.len() {
            let file = &self.findings[start].location.file;
            let len = self.findings[start..]
                .iter()
                .take_while(|f| &f.location.file == file)
                .count();
            groups.push((file.as_path(), &self.findings[start..start + len]));
            start += len;
        }
        groups
    }

    /// Renders the human-readable listing, one line per finding.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for (_, findings) in self.by_file() {
            for finding in findings {
                let _ = writeln!(out, "{finding}");
            }
            out.push('\n');
        }

        out.push_str(&self.summary());
        out
    }

    /// Renders the closing lines shared by every human-readable format:
    /// the truncation notice, if any, and the counts.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        if self.truncated {
            let _ = writeln!(
                out,
                "Run exceeded its time budget; the results above are incomplete."
            );
        }

        if self.findings.is_empty() {
            let _ = writeln!(out, "No issues found in {} file(s)", self.files_checked);
        } else {
            let _ = writeln!(
                out,
                "Found {} error(s), {} warning(s) in {} file(s)",
                self.count_by_severity(Severity::Error),
                self.count_by_severity(Severity::Warning),
                self.files_checked
            );
        }
        out
    }

    /// Renders the structured JSON document.
    ///
    /// Output is byte-stable for identical reports.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        let document = JsonReport {
            files: self
                .by_file()
                .into_iter()
                .map(|(path, findings)| JsonFile {
                    path: path_string(path),
                    findings,
                })
                .collect(),
            summary: JsonSummary {
                files_checked: self.files_checked,
                errors: self.count_by_severity(Severity::Error),
                warnings: self.count_by_severity(Severity::Warning),
            },
            truncated: self.truncated,
        };
        serde_json::to_string_pretty(&document)
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
    truncated: bool,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: String,
    findings: &'a [Finding],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    files_checked: usize,
    errors: usize,
    warnings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;
    use std::path::PathBuf;

    fn finding(file: &str, line: usize, rule: &str, severity: Severity) -> Finding {
        Finding::new(
            rule,
            severity,
            Location::new(PathBuf::from(file), line, 1),
            "identifier",
            format!("{rule} message"),
        )
    }

    fn sample_report() -> Report {
        Report::from_file_reports(vec![
            FileReport {
                path: PathBuf::from("src/b.js"),
                findings: vec![finding("src/b.js", 4, "style/no-var", Severity::Error)],
                parse_failed: false,
            },
            FileReport {
                path: PathBuf::from("src/a.js"),
                findings: vec![
                    finding("src/a.js", 9, "style/strict-equality", Severity::Error),
                    finding(
                        "src/a.js",
                        2,
                        "naming/constant-screaming-snake-case",
                        Severity::Warning,
                    )
                    .with_suggestion("BASE_PATH"),
                ],
                parse_failed: false,
            },
            FileReport {
                path: PathBuf::from("src/clean.js"),
                findings: Vec::new(),
                parse_failed: false,
            },
        ])
    }

    #[test]
    fn merge_sorts_across_files() {
        let report = sample_report();
        assert_eq!(report.files_checked, 3);
        let order: Vec<(String, usize)> = report
            .findings
            .iter()
            .map(|f| (f.location.file.display().to_string(), f.location.line))
            .collect();
        assert_eq!(
            order,
            vec![
                ("src/a.js".to_string(), 2),
                ("src/a.js".to_string(), 9),
                ("src/b.js".to_string(), 4)
            ]
        );
        assert_eq!(report.by_file().len(), 2);
    }

    #[test]
    fn exit_code_ignores_warnings() {
        assert_eq!(exit_code(&[]), 0);
        assert_eq!(
            exit_code(&[finding("a.js", 1, "r", Severity::Warning)]),
            0
        );
        assert_eq!(
            exit_code(&[
                finding("a.js", 1, "r", Severity::Warning),
                finding("a.js", 2, "r", Severity::Error)
            ]),
            1
        );
        assert_eq!(sample_report().exit_code(), 1);
    }

    #[test]
    fn all_inputs_failed_to_parse() {
        let failed = Report::from_file_reports(vec![FileReport {
            path: PathBuf::from("a.js"),
            findings: vec![finding("a.js", 1, "parse-error", Severity::Error)],
            parse_failed: true,
        }]);
        assert!(failed.all_inputs_failed_to_parse());
        assert!(!sample_report().all_inputs_failed_to_parse());
        assert!(!Report::new().all_inputs_failed_to_parse());
    }

    #[test]
    fn render_text_snapshot() {
        insta::assert_snapshot!(sample_report().render_text(), @r"
        src/a.js:2:1  warning  naming/constant-screaming-snake-case  naming/constant-screaming-snake-case message
        src/a.js:9:1  error  style/strict-equality  style/strict-equality message

        src/b.js:4:1  error  style/no-var  style/no-var message

        Found 2 error(s), 1 warning(s) in 3 file(s)
        ");
    }

    #[test]
    fn render_text_empty_and_truncated() {
        let report = Report {
            files_checked: 2,
            ..Report::new()
        }
        .truncated();
        insta::assert_snapshot!(report.render_text(), @r"
        Run exceeded its time budget; the results above are incomplete.
        No issues found in 2 file(s)
        ");
    }

    #[test]
    fn render_json_groups_by_file() {
        let json: serde_json::Value =
            serde_json::from_str(&sample_report().render_json().unwrap()).unwrap();
        assert_eq!(json["files"][0]["path"], "src/a.js");
        assert_eq!(json["files"][0]["findings"].as_array().unwrap().len(), 2);
        assert_eq!(
            json["files"][0]["findings"][0]["suggestion"],
            "BASE_PATH"
        );
        assert_eq!(json["files"][1]["findings"][0]["ruleId"], "style/no-var");
        assert_eq!(json["summary"]["filesChecked"], 3);
        assert_eq!(json["summary"]["errors"], 2);
        assert_eq!(json["summary"]["warnings"], 1);
        assert_eq!(json["truncated"], false);
    }

    #[test]
    fn render_json_is_byte_stable() {
        assert_eq!(
            sample_report().render_json().unwrap(),
            sample_report().render_json().unwrap()
        );
    }
}

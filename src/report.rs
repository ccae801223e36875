//! Result presentation: console table and evidence artifact.

use crate::index::OccurrenceIndex;
use crate::types::{ProbeResult, ProbeStatus, Result, ScanResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Joins probe results with file-level evidence and renders both outputs.
pub struct ReportAssembler {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ReportAssembler {
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self {
            verbose,
            json_mode,
            quiet,
        }
    }

    /// Print progress (only in verbose mode).
    pub fn print_progress(&self, message: &str) {
        if self.json_mode || !self.verbose {
            return;
        }
        println!("{} {}", "[.]".dimmed(), message.dimmed());
    }

    /// Print info message.
    pub fn print_info(&self, message: &str) {
        if self.json_mode || self.quiet {
            return;
        }
        println!("{} {}", "[*]".bright_blue(), message);
    }

    /// Print one row per probed name, in discovery order.
    pub fn print_table(&self, results: &[ProbeResult]) {
        if self.json_mode || results.is_empty() {
            return;
        }
        if self.quiet && !results.iter().any(ProbeResult::is_available) {
            return;
        }

        let width = results
            .iter()
            .map(|r| r.name.len())
            .chain(std::iter::once("Package Name".len()))
            .max()
            .unwrap_or(0);

        println!();
        println!(
            "{}  {}",
            format!("{:<width$}", "Package Name").bold(),
            "Status".bold()
        );
        for result in results {
            println!("{:<width$}  {}", result.name, status_cell(result));
        }
    }

    /// Write the evidence table, one row per (available name, file path),
    /// sorted by name then path. Produced only when at least one name is
    /// available: nothing to report means no artifact.
    pub fn write_evidence(
        &self,
        results: &[ProbeResult],
        index: &OccurrenceIndex,
        path: &Path,
    ) -> Result<bool> {
        let mut available: Vec<&ProbeResult> =
            results.iter().filter(|r| r.is_available()).collect();
        if available.is_empty() {
            return Ok(false);
        }
        available.sort_by(|a, b| a.name.cmp(&b.name));

        let name_width = available
            .iter()
            .map(|r| r.name.len())
            .chain(std::iter::once("Package Name".len()))
            .max()
            .unwrap_or(0);

        let mut file = File::create(path)?;
        writeln!(file, "{:<name_width$} | File Path", "Package Name")?;
        writeln!(file, "{:-<name_width$} | {:-<9}", "", "")?;

        for result in available {
            if let Some(files) = index.files(&result.name) {
                for source in files {
                    writeln!(file, "{:<name_width$} | {}", result.name, source.display())?;
                }
            }
        }

        Ok(true)
    }

    /// Print the run summary. In JSON mode the whole result is emitted
    /// instead, machine-readable.
    pub fn print_summary(&self, result: &ScanResult) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{json}");
            }
            return;
        }

        let available = result.available_count();
        if self.quiet && available == 0 {
            return;
        }

        println!();
        println!("{}", "=== Scan Summary ===".bright_cyan());
        println!("  Root:       {}", result.root);
        println!("  Duration:   {:.2}s", result.duration_secs);
        println!("  Files:      {}", result.files_scanned);
        println!("  References: {}", result.references_found);
        println!("  Probed:     {}", result.names_probed);
        if result.parse_failures > 0 {
            println!("  Unparsable: {}", result.parse_failures);
        }

        if available > 0 {
            println!(
                "  {}",
                format!("UNREGISTERED NAMES FOUND: {available}").red().bold()
            );
        } else {
            println!(
                "  {}",
                "No dependency confusion exposure found.".green()
            );
        }

        if !result.errors.is_empty() {
            println!();
            println!("{}", "Errors encountered:".yellow());
            for error in &result.errors {
                println!("  - {}", error.dimmed());
            }
        }

        println!();
    }

    /// Create a probe progress bar.
    pub fn create_progress_bar(&self, total: u64, message: &str) -> Option<ProgressBar> {
        if self.json_mode || self.quiet {
            return None;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        Some(pb)
    }
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

/// Status column text, with the optional error-detail suffix.
fn status_cell(result: &ProbeResult) -> String {
    match result.status {
        ProbeStatus::Available => "AVAILABLE".red().bold().to_string(),
        ProbeStatus::Taken => "taken".green().to_string(),
        ProbeStatus::Error => match &result.detail {
            Some(detail) => format!("{} ({detail})", "error".yellow()),
            None => "error".yellow().to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Ecosystem;
    use tempfile::TempDir;

    fn result(name: &str, status: ProbeStatus) -> ProbeResult {
        ProbeResult {
            name: name.to_string(),
            ecosystem: Ecosystem::Npm,
            status,
            detail: None,
        }
    }

    #[test]
    fn test_evidence_suppressed_without_available_names() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("evidence.txt");

        let mut index = OccurrenceIndex::new();
        index.record("lodash", Path::new("/repo/index.js"));

        let results = vec![
            result("lodash", ProbeStatus::Taken),
            result("react", ProbeStatus::Error),
        ];

        let assembler = ReportAssembler::default();
        let written = assembler.write_evidence(&results, &index, &path).unwrap();

        assert!(!written);
        assert!(!path.exists());
    }

    #[test]
    fn test_evidence_rows_sorted_by_name_then_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("evidence.txt");

        let mut index = OccurrenceIndex::new();
        index.record("zeta-pkg", Path::new("/repo/b.js"));
        index.record("zeta-pkg", Path::new("/repo/a.js"));
        index.record("@acme/tool", Path::new("/repo/index.ts"));

        let results = vec![
            result("zeta-pkg", ProbeStatus::Available),
            result("@acme/tool", ProbeStatus::Available),
            result("left-pad", ProbeStatus::Taken),
        ];

        let assembler = ReportAssembler::default();
        let written = assembler.write_evidence(&results, &index, &path).unwrap();
        assert!(written);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert!(lines[0].starts_with("Package Name"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].contains("@acme/tool") && lines[2].contains("/repo/index.ts"));
        assert!(lines[3].contains("zeta-pkg") && lines[3].contains("/repo/a.js"));
        assert!(lines[4].contains("zeta-pkg") && lines[4].contains("/repo/b.js"));
        assert_eq!(lines.len(), 5);
        // taken names contribute no evidence rows
        assert!(!content.contains("left-pad"));
    }

    #[test]
    fn test_evidence_rows_are_pipe_delimited() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("evidence.txt");

        let mut index = OccurrenceIndex::new();
        index.record("ghost-pkg", Path::new("/abs/app.js"));

        let results = vec![result("ghost-pkg", ProbeStatus::Available)];
        ReportAssembler::default()
            .write_evidence(&results, &index, &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("ghost-pkg    | /abs/app.js"));
    }

    #[test]
    fn test_print_table_does_not_panic() {
        let assembler = ReportAssembler::default();
        let mut with_detail = result("flaky", ProbeStatus::Error);
        with_detail.detail = Some("timeout".to_string());
        assembler.print_table(&[
            result("ghost", ProbeStatus::Available),
            result("lodash", ProbeStatus::Taken),
            with_detail,
        ]);
    }

    #[test]
    fn test_summary_counts() {
        let scan = ScanResult {
            root: "/repo".to_string(),
            files_scanned: 3,
            parse_failures: 0,
            references_found: 5,
            names_probed: 2,
            results: vec![
                result("ghost", ProbeStatus::Available),
                result("lodash", ProbeStatus::Taken),
            ],
            duration_secs: 0.1,
            errors: vec![],
        };
        assert_eq!(scan.available_count(), 1);
    }
}

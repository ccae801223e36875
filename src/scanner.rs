//! Scan orchestration: a synchronous extraction phase, then batched probes.

use crate::config::ScanConfig;
use crate::index::OccurrenceIndex;
use crate::parser::{classify, NamingRules, ReferenceExtractor};
use crate::registry::RegistryProber;
use crate::report::ReportAssembler;
use crate::types::{Ecosystem, ProbeResult, Result, ScanError, ScanResult};
use crate::walker::SourceScanner;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Runs one scan: walk, extract, classify, probe, report.
pub struct Scanner {
    config: ScanConfig,
    extractor: ReferenceExtractor,
    prober: RegistryProber,
    report: ReportAssembler,
}

/// Names queued for probing, grouped per ecosystem in first-seen order.
#[derive(Debug, Default)]
struct ProbeQueue {
    groups: Vec<(Ecosystem, Vec<String>)>,
    seen: HashSet<(Ecosystem, String)>,
}

impl ProbeQueue {
    fn push(&mut self, ecosystem: Ecosystem, name: &str) {
        let key = (ecosystem, name.to_string());
        if self.seen.contains(&key) {
            return;
        }
        self.seen.insert(key);

        match self.groups.iter_mut().find(|(eco, _)| *eco == ecosystem) {
            Some((_, names)) => names.push(name.to_string()),
            None => self.groups.push((ecosystem, vec![name.to_string()])),
        }
    }

    fn len(&self) -> usize {
        self.seen.len()
    }
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        let mut prober = RegistryProber::new(config.timeout, config.batch_pause_ms)?;
        if let Some(ref url) = config.registry_url {
            prober = prober.with_registry_url(config.ecosystem()?, url.clone());
        }

        let report = ReportAssembler::new(config.verbose, config.json, config.quiet);

        Ok(Self {
            config,
            extractor: ReferenceExtractor::new(),
            prober,
            report,
        })
    }

    /// Run the scan to completion. Errors are contained at the smallest
    /// unit -- one file, one candidate line, one probe -- so partial success
    /// is the normal terminal state; only an unusable root is fatal.
    pub async fn scan(&self) -> Result<ScanResult> {
        let start_time = Instant::now();
        let source_ecosystem = self.config.ecosystem()?;
        let rules = NamingRules::for_ecosystem(source_ecosystem);

        let mut index = OccurrenceIndex::new();
        let mut queue = ProbeQueue::default();
        let mut errors: Vec<String> = Vec::new();

        // Extraction phase. Fully sequential: the index has no concurrent
        // writers and needs no locking.
        let walker = SourceScanner::new(&self.config.root)?;
        let root = walker.root().display().to_string();
        self.report
            .print_info(&format!("Scanning source tree: {root}"));

        let mut files_scanned = 0usize;
        let mut parse_failures = 0usize;
        let mut references_found = 0usize;

        for file in walker.files() {
            files_scanned += 1;
            match self.extractor.extract_file(&file) {
                Ok(references) => {
                    for reference in references {
                        references_found += 1;
                        if let Some(name) = classify(&reference.text, &rules) {
                            index.record(&name, &reference.source_file);
                            queue.push(source_ecosystem, &name);
                        }
                    }
                }
                Err(ScanError::ParseError { file, message }) => {
                    parse_failures += 1;
                    debug!("skipping unparsable file {}: {}", file.display(), message);
                }
                Err(e) => {
                    warn!("skipping {}: {}", file.display(), e);
                    errors.push(format!("{}: {e}", file.display()));
                }
            }
        }

        self.report.print_progress(&format!(
            "{files_scanned} files parsed, {references_found} references, {} distinct names",
            index.len()
        ));

        // Candidate files from manifest-parsing collaborators, consumed
        // identically to source-derived names.
        for path in &self.config.candidates {
            match self.load_candidates(path, &mut index, &mut queue) {
                Ok(count) => self
                    .report
                    .print_progress(&format!("{count} candidates from {}", path.display())),
                Err(e) => {
                    warn!("skipping candidate file {}: {}", path.display(), e);
                    errors.push(format!("{}: {e}", path.display()));
                }
            }
        }

        // Probe phase.
        let names_probed = queue.len();
        let mut results: Vec<ProbeResult> = Vec::with_capacity(names_probed);

        if self.config.skip_probe {
            self.report
                .print_info("Registry probing skipped; extracted names:");
            if !self.config.json && !self.config.quiet {
                for name in index.names() {
                    println!("  {name}");
                }
            }
        } else if names_probed > 0 {
            self.report
                .print_progress("Probing names against their registries...");
            let pb = self
                .report
                .create_progress_bar(names_probed as u64, "Probing registries");

            for (ecosystem, names) in &queue.groups {
                let batch = self
                    .prober
                    .probe_all(names, *ecosystem, self.config.batch_size, pb.as_ref())
                    .await;
                results.extend(batch);
            }

            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
        }

        let result = ScanResult {
            root,
            files_scanned,
            parse_failures,
            references_found,
            names_probed,
            results,
            duration_secs: start_time.elapsed().as_secs_f64(),
            errors,
        };

        self.report.print_table(&result.results);

        if !self.config.skip_probe {
            let evidence_path = self.config.evidence_path();
            match self
                .report
                .write_evidence(&result.results, &index, &evidence_path)
            {
                Ok(true) => self.report.print_info(&format!(
                    "Evidence written to {}",
                    evidence_path.display()
                )),
                Ok(false) => {}
                Err(e) => {
                    warn!("failed to write evidence file: {e}");
                }
            }
        }

        self.report.print_summary(&result);

        Ok(result)
    }

    /// Load one raw identifier per line; blanks and `#` comments skipped.
    /// The ecosystem comes from the file stem, the collaborators' naming
    /// convention.
    fn load_candidates(
        &self,
        path: &Path,
        index: &mut OccurrenceIndex,
        queue: &mut ProbeQueue,
    ) -> Result<usize> {
        let ecosystem = Ecosystem::from_file_stem(path).ok_or_else(|| {
            ScanError::ConfigError(format!(
                "cannot infer ecosystem from candidate file name: {}",
                path.display()
            ))
        })?;
        let rules = NamingRules::for_ecosystem(ecosystem);
        let content = std::fs::read_to_string(path)?;
        let evidence_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let mut count = 0usize;
        for line in content.lines() {
            let raw = line.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            if let Some(name) = classify(raw, &rules) {
                index.record(&name, &evidence_path);
                queue.push(ecosystem, &name);
                count += 1;
            }
        }

        Ok(count)
    }
}

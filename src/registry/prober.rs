//! Bounded-concurrency existence probes against public registries.

use crate::registry::cache::ProbeCache;
use crate::registry::{default_base_url, probe_url};
use crate::types::{Ecosystem, ProbeResult, ProbeStatus, Result};
use futures::future::join_all;
use indicatif::ProgressBar;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, trace};

/// Issues read-only existence checks and classifies each outcome.
///
/// A 404 means the name is unregistered and therefore claimable; anything
/// else the registry answers counts as taken. Some registries answer
/// non-404 for reserved or deleted names; those are reported as `Taken`,
/// an accepted approximation.
pub struct RegistryProber {
    client: Client,
    cache: ProbeCache,
    timeout: Duration,
    batch_pause: Duration,
    base_urls: HashMap<Ecosystem, String>,
}

impl RegistryProber {
    pub fn new(timeout_secs: u64, batch_pause_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent("confuscan/0.1")
            .http1_only() // Force HTTP/1.1 to avoid HTTP/2 stream limit issues
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            cache: ProbeCache::new(3600),
            timeout: Duration::from_secs(timeout_secs),
            batch_pause: Duration::from_millis(batch_pause_ms),
            base_urls: HashMap::new(),
        })
    }

    /// Override the base URL for one ecosystem (private mirrors, tests).
    pub fn with_registry_url(mut self, ecosystem: Ecosystem, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_urls
            .insert(ecosystem, url.trim_end_matches('/').to_string());
        self
    }

    /// Probe one canonical name. Never fails: every outcome, including a
    /// failed request, is folded into the `ProbeResult` status taxonomy.
    pub async fn probe(&self, name: &str, ecosystem: Ecosystem) -> ProbeResult {
        let key = format!("{ecosystem}:{name}");
        if let Some(cached) = self.cache.get(&key) {
            trace!("cache hit for {}", key);
            return cached;
        }

        let result = self.do_probe(name, ecosystem).await;
        self.cache.set(&key, result.clone());
        result
    }

    async fn do_probe(&self, name: &str, ecosystem: Ecosystem) -> ProbeResult {
        let base = self
            .base_urls
            .get(&ecosystem)
            .map(String::as_str)
            .unwrap_or_else(|| default_base_url(ecosystem));
        let url = probe_url(base, ecosystem, name);
        trace!("probing {}", url);

        let (status, detail) = match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) if response.status().as_u16() == 404 => {
                debug!("name AVAILABLE on {}: {}", ecosystem, name);
                (ProbeStatus::Available, None)
            }
            Ok(response) => {
                trace!("HTTP {} for {}", response.status(), name);
                (ProbeStatus::Taken, None)
            }
            Err(e) if e.is_timeout() => (ProbeStatus::Error, Some("timeout".to_string())),
            Err(e) => (ProbeStatus::Error, Some(e.to_string())),
        };

        ProbeResult {
            name: name.to_string(),
            ecosystem,
            status,
            detail,
        }
    }

    /// Probe every name in ordered batches of at most `batch_size`.
    ///
    /// Probes within a batch run concurrently; the whole batch settles
    /// before the next one is issued, capping in-flight requests at
    /// `batch_size` at all times, with a fixed pause between batches to
    /// stay friendly to the registries. One probe's failure never affects
    /// its siblings or later batches.
    pub async fn probe_all(
        &self,
        names: &[String],
        ecosystem: Ecosystem,
        batch_size: usize,
        progress: Option<&ProgressBar>,
    ) -> Vec<ProbeResult> {
        let batch_size = batch_size.max(1);
        let mut results = Vec::with_capacity(names.len());

        let mut batches = names.chunks(batch_size).peekable();
        while let Some(batch) = batches.next() {
            let probes = batch.iter().map(|name| self.probe(name, ecosystem));
            results.extend(join_all(probes).await);

            if let Some(pb) = progress {
                pb.inc(batch.len() as u64);
            }
            if batches.peek().is_some() {
                tokio::time::sleep(self.batch_pause).await;
            }
        }

        results
    }
}

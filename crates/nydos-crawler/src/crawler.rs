//! The enumeration pipeline: token → search → identifiers → details → disk.
//!
//! Every step is awaited in sequence; no two requests are ever in flight at once.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::client::RegistryApi;
use crate::error::{CrawlError, CrawlResult};
use crate::extract::extract_identifiers;
use crate::models::{EntityIdentifier, SearchRequest};
use crate::store::{OutputFile, Store, WriteOutcome};
use crate::token::{SearchToken, generate_token_with};

/// Result of one scan cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Token searched.
    pub token: SearchToken,
    /// Identifiers extracted from the search response, in order.
    pub identifiers: Vec<EntityIdentifier>,
    /// Detail responses fetched and persisted.
    pub details_written: usize,
    /// Identifiers skipped because their detail file already existed.
    pub details_skipped: usize,
    /// Identifiers whose fetch or write failed.
    pub details_failed: usize,
}

impl CycleReport {
    fn new(token: SearchToken, identifiers: Vec<EntityIdentifier>) -> Self {
        Self { token, identifiers, details_written: 0, details_skipped: 0, details_failed: 0 }
    }
}

/// Totals over a whole scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Iterations started.
    pub cycles: u32,
    /// Iterations aborted (token generation, search or search persistence failed).
    pub cycles_failed: u32,
    /// Identifiers extracted across all cycles.
    pub identifiers: usize,
    /// Detail files created or appended.
    pub details_written: usize,
    /// Identifiers skipped as already fetched.
    pub details_skipped: usize,
    /// Identifiers that failed.
    pub details_failed: usize,
}

impl ScanSummary {
    fn absorb(&mut self, report: &CycleReport) {
        self.identifiers += report.identifiers.len();
        self.details_written += report.details_written;
        self.details_skipped += report.details_skipped;
        self.details_failed += report.details_failed;
    }
}

/// What happened to one identifier.
enum DetailOutcome {
    Written,
    Skipped,
}

/// Drives the registry API and the store.
#[derive(Debug)]
pub struct Crawler<A> {
    api: A,
    store: Store,
}

impl<A: RegistryApi> Crawler<A> {
    /// Create a crawler over `api` writing into `store`.
    #[must_use]
    pub const fn new(api: A, store: Store) -> Self {
        Self { api, store }
    }

    /// Output store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Registry API.
    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Single search cycle: search for `token` and log the raw response to
    /// `search_results<token>.json`. No details are fetched.
    pub async fn search_once(&self, token: SearchToken) -> CrawlResult<WriteOutcome> {
        let body = self.api.search_entities(&SearchRequest::name_contains(token.as_str())).await?;

        let file = OutputFile::SearchResults(token);
        let outcome = self.store.write_or_append(&file, &body).await?;
        tracing::info!(%token, path = %self.store.path_for(&file).display(), "Search results saved");
        Ok(outcome)
    }

    /// Fetch one entity record and log it to `business_data_<id>.json`.
    pub async fn fetch_detail(&self, id: EntityIdentifier) -> CrawlResult<WriteOutcome> {
        let body = self.api.get_entity_record(id).await?;
        let outcome = self.store.write_or_append(&OutputFile::BusinessData(id), &body).await?;
        Ok(outcome)
    }

    /// Full scan cycle for one token.
    ///
    /// The search response goes to `api_search_<token>.json`. Each extracted
    /// identifier is then fetched unless its detail file already exists. A search
    /// failure aborts the cycle; a failing identifier only counts against the report.
    pub async fn crawl_token(&self, token: SearchToken) -> CrawlResult<CycleReport> {
        let body = self.api.search_entities(&SearchRequest::name_contains(token.as_str())).await?;
        self.store.write_or_append(&OutputFile::ApiSearch(token), &body).await?;

        let identifiers = extract_identifiers(&body);
        tracing::info!(%token, count = identifiers.len(), "Search returned identifiers");

        let mut report = CycleReport::new(token, identifiers);
        for &id in &report.identifiers {
            match self.crawl_identifier(id).await {
                Ok(DetailOutcome::Written) => report.details_written += 1,
                Ok(DetailOutcome::Skipped) => report.details_skipped += 1,
                Err(e) => {
                    tracing::warn!(%token, %id, error = %e, "Entity detail failed");
                    report.details_failed += 1;
                }
            }
        }

        Ok(report)
    }

    async fn crawl_identifier(&self, id: EntityIdentifier) -> Result<DetailOutcome, CrawlError> {
        if self.store.exists(&OutputFile::BusinessData(id)).await {
            tracing::debug!(%id, "Entity already fetched");
            return Ok(DetailOutcome::Skipped);
        }
        self.fetch_detail(id).await?;
        Ok(DetailOutcome::Written)
    }

    /// Run `iterations` cycles, each with a fresh random token from the OS CSPRNG.
    ///
    /// Failures are logged and counted; the scan always runs to the end.
    pub async fn scan(&self, iterations: u32) -> ScanSummary {
        self.scan_with(&mut OsRng, iterations).await
    }

    /// [`Crawler::scan`] drawing tokens from `rng`.
    pub async fn scan_with<R>(&self, rng: &mut R, iterations: u32) -> ScanSummary
    where
        R: RngCore + ?Sized,
    {
        let mut summary = ScanSummary::default();

        for i in 0..iterations {
            summary.cycles += 1;

            let token = match generate_token_with(rng) {
                Ok(token) => token,
                Err(e) => {
                    tracing::error!(iteration = i, error = %e, "Could not generate search token");
                    summary.cycles_failed += 1;
                    continue;
                }
            };

            match self.crawl_token(token).await {
                Ok(report) => summary.absorb(&report),
                Err(e) => {
                    tracing::warn!(iteration = i, %token, error = %e, "Search cycle failed");
                    summary.cycles_failed += 1;
                }
            }
        }

        tracing::info!(
            cycles = summary.cycles,
            failed = summary.cycles_failed,
            identifiers = summary.identifiers,
            written = summary.details_written,
            skipped = summary.details_skipped,
            detail_failures = summary.details_failed,
            "Scan finished"
        );
        summary
    }
}

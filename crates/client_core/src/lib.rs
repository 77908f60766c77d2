use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use shared::{
    domain::{validate_catalog, CatalogEntry},
    error::FetchError,
    protocol::CatalogResponse,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

mod catalog;

pub use catalog::default_catalog;

/// Latency the demo source waits before resolving.
pub const DEFAULT_FETCH_DELAY: Duration = Duration::from_millis(5000);

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError>;

    fn describe(&self) -> String;
}

/// Resolves with a fixed entry list after a fixed delay. Never rejects.
pub struct StaticCatalogSource {
    entries: Vec<CatalogEntry>,
    delay: Duration,
}

impl StaticCatalogSource {
    pub fn new(entries: Vec<CatalogEntry>, delay: Duration) -> Self {
        Self { entries, delay }
    }

    pub fn demo(delay: Duration) -> Self {
        Self::new(default_catalog(), delay)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(CatalogResponse::new(self.entries.clone()))
    }

    fn describe(&self) -> String {
        format!("static catalog ({} entries)", self.entries().len())
    }
}

/// Reads a `{ "data": { "information": [...] } }` JSON document after a fixed delay.
pub struct FileCatalogSource {
    path: PathBuf,
    delay: Duration,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>, delay: Duration) -> Self {
        Self {
            path: path.into(),
            delay,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError> {
        tokio::time::sleep(self.delay).await;
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            FetchError::Io(format!("{}: {err}", self.path.display()))
        })?;
        let response = serde_json::from_str::<CatalogResponse>(&raw)?;
        validate_catalog(&response.data.information)?;
        Ok(response)
    }

    fn describe(&self) -> String {
        format!("catalog file {}", self.path().display())
    }
}

/// Always rejects; stands in for a backend that cannot be reached.
pub struct UnavailableCatalogSource {
    reason: String,
    delay: Duration,
}

impl UnavailableCatalogSource {
    pub fn new(reason: impl Into<String>, delay: Duration) -> Self {
        Self {
            reason: reason.into(),
            delay,
        }
    }
}

#[async_trait]
impl CatalogSource for UnavailableCatalogSource {
    async fn fetch_catalog(&self) -> Result<CatalogResponse, FetchError> {
        tokio::time::sleep(self.delay).await;
        Err(FetchError::Unavailable(self.reason.clone()))
    }

    fn describe(&self) -> String {
        format!("unavailable catalog ({})", self.reason)
    }
}

/// Cloneable one-way cancellation flag. Every clone observes the same cancel.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Completes once `cancel` has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only errs on teardown.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one fetch, racing it against `cancel`.
///
/// Returns `None` when the token fires first. Resolved payloads are validated
/// before they are handed back, so a malformed catalog surfaces as a rejection.
pub async fn fetch_until_cancelled(
    source: &dyn CatalogSource,
    cancel: &CancelToken,
) -> Option<Result<Vec<CatalogEntry>, FetchError>> {
    if cancel.is_cancelled() {
        debug!(source = %source.describe(), "catalog fetch skipped; already cancelled");
        return None;
    }

    let started = Instant::now();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(source = %source.describe(), "catalog fetch cancelled before settling");
            None
        }
        result = source.fetch_catalog() => {
            let result = result.and_then(|response| {
                let entries = response.into_entries();
                validate_catalog(&entries)?;
                Ok(entries)
            });
            let elapsed_ms = started.elapsed().as_millis() as u64;
            match &result {
                Ok(entries) => info!(count = entries.len(), elapsed_ms, "catalog fetch resolved"),
                Err(err) => warn!(code = ?err.code(), elapsed_ms, "catalog fetch rejected: {err}"),
            }
            Some(result)
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

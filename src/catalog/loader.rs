//! Index loading and caching.
//!
//! The loader owns the catalog lifecycle: `uninitialized -> loading ->
//! ready | failed`. The first `get()` fetches the index; concurrent callers
//! coalesce onto that single in-flight fetch; once resolved the catalog is
//! cached for the rest of the process. A failed fetch is sticky - there is
//! no retry policy, matching the page-lifetime contract of the site.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Port};
use crate::error::{PqError, Result};

/// Boxed future returned by [`IndexSource::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<Port>>> + Send + 'a>>;

/// Transport behind the loader. Production uses [`HttpSource`]; tests
/// substitute fakes to exercise the lifecycle without a network.
pub trait IndexSource: Send + Sync {
    fn fetch(&self) -> FetchFuture<'_>;

    /// Human-readable origin for log and error messages.
    fn describe(&self) -> String;
}

/// Fetches the index from a `ports.json` URL.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PqError::IndexLoad(format!("build http client: {e}")))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl IndexSource for HttpSource {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| PqError::IndexLoad(format!("fetch {}: {e}", self.url)))?;

            let response = response
                .error_for_status()
                .map_err(|e| PqError::IndexLoad(format!("fetch {}: {e}", self.url)))?;

            let ports: Vec<Port> = response
                .json()
                .await
                .map_err(|e| PqError::IndexLoad(format!("decode {}: {e}", self.url)))?;

            Ok(ports)
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Observable lifecycle state, mostly for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

enum LoadState {
    Idle,
    Ready(Arc<Catalog>),
    Failed(String),
}

/// Memoizing catalog loader.
pub struct IndexLoader {
    source: Box<dyn IndexSource>,
    state: Mutex<LoadState>,
    fetches: AtomicU32,
}

impl IndexLoader {
    pub fn new(source: impl IndexSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            state: Mutex::new(LoadState::Idle),
            fetches: AtomicU32::new(0),
        }
    }

    /// Get the catalog, fetching it on first use.
    ///
    /// The state lock is held across the fetch, so concurrent callers
    /// queue behind the first one and then observe the cached outcome:
    /// exactly one fetch is issued no matter how many callers race.
    pub async fn get(&self) -> Result<Arc<Catalog>> {
        let mut state = self.state.lock().await;
        match &*state {
            LoadState::Ready(catalog) => return Ok(Arc::clone(catalog)),
            LoadState::Failed(msg) => return Err(PqError::IndexUnavailable(msg.clone())),
            LoadState::Idle => {}
        }

        self.fetches.fetch_add(1, Ordering::SeqCst);
        debug!(source = %self.source.describe(), "loading ports index");
        match self.source.fetch().await {
            Ok(ports) => {
                let catalog = Arc::new(Catalog::from_ports(ports));
                info!(ports = catalog.len(), "ports index loaded");
                *state = LoadState::Ready(Arc::clone(&catalog));
                Ok(catalog)
            }
            Err(err) => {
                warn!(error = %err, "ports index load failed");
                *state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Non-blocking lifecycle probe. Reports `Loading` while a fetch
    /// holds the state lock.
    pub fn status(&self) -> LoadStatus {
        match self.state.try_lock() {
            Err(_) => LoadStatus::Loading,
            Ok(state) => match &*state {
                LoadState::Idle => LoadStatus::Uninitialized,
                LoadState::Ready(_) => LoadStatus::Ready,
                LoadState::Failed(_) => LoadStatus::Failed,
            },
        }
    }

    /// Number of fetches issued so far. Observable so tests can assert
    /// the deduplication contract.
    pub fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

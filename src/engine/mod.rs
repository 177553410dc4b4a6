//! Query engine: composes the index loader, parser, and evaluator into
//! capped, ordered search results.
//!
//! The engine owns the policies around a search: the "no query" signal
//! for empty input, the `*` wildcard, the result cap, the query-result
//! cache, and (through [`Debouncer`]) the live-search quiet period.

pub mod cache;
pub mod debounce;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::catalog::{Catalog, IndexLoader, Port};
use crate::engine::cache::{CachedSearch, QueryCache};
use crate::error::Result;
use crate::query::eval::{EvalContext, FreeTextFields, matches_expression};
use crate::query::parser::parse;

pub use cache::{CacheStats, DEFAULT_CACHE_SIZE};
pub use debounce::Debouncer;

/// Reserved query that matches every port.
pub const WILDCARD: &str = "*";

/// Per-engine search knobs. The result cap is a configuration constant
/// (100 or 200 depending on deployment), never hard-wired per call site.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub max_results: usize,
    pub free_text: FreeTextFields,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 100,
            free_text: FreeTextFields::default(),
        }
    }
}

/// What a search produced. `NoQuery` is distinct from an empty result
/// list so the presenter can hide its panel instead of reporting zero.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    NoQuery,
    Results(SearchReport),
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Echo of the trimmed query.
    pub query: String,
    /// Match count before capping.
    pub total: usize,
    /// Capped hits, in catalog order.
    pub hits: Vec<Port>,
    pub truncated: bool,
    /// Evaluation time for the header line.
    pub elapsed: Duration,
    /// Positive free-text terms, for description highlighting.
    pub highlight_terms: Vec<String>,
}

pub struct QueryEngine {
    loader: Arc<IndexLoader>,
    options: SearchOptions,
    cache: QueryCache,
}

impl QueryEngine {
    pub fn new(loader: Arc<IndexLoader>, options: SearchOptions) -> Self {
        Self::with_cache_size(loader, options, DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(
        loader: Arc<IndexLoader>,
        options: SearchOptions,
        cache_size: usize,
    ) -> Self {
        Self {
            loader,
            options,
            cache: QueryCache::new(cache_size),
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn loader(&self) -> &IndexLoader {
        &self.loader
    }

    /// The loaded catalog, fetching it on first use.
    pub async fn catalog(&self) -> Result<Arc<Catalog>> {
        self.loader.get().await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Run one search against the (possibly not yet loaded) catalog.
    ///
    /// The only error that can escape is a load failure; every query
    /// string evaluates to some outcome.
    pub async fn search(&self, raw: &str) -> Result<SearchOutcome> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(SearchOutcome::NoQuery);
        }
        let catalog = self.loader.get().await?;
        Ok(self.search_catalog(&catalog, trimmed))
    }

    fn search_catalog(&self, catalog: &Catalog, trimmed: &str) -> SearchOutcome {
        let cap = self.options.max_results;
        let started = Instant::now();

        if trimmed == WILDCARD {
            let total = catalog.len();
            let hits: Vec<Port> = catalog.ports().iter().take(cap).cloned().collect();
            return SearchOutcome::Results(SearchReport {
                query: trimmed.to_string(),
                truncated: total > hits.len(),
                total,
                hits,
                elapsed: started.elapsed(),
                highlight_terms: Vec::new(),
            });
        }

        let expr = parse(trimmed);
        let ctx = EvalContext::current(self.options.free_text);
        let mask = self.options.free_text.mask();

        // Relative-time predicates drift with the clock, so only
        // time-independent expressions go through the cache.
        let cacheable = !expr.is_time_sensitive();
        let cached = if cacheable {
            self.cache.get(trimmed, cap, mask)
        } else {
            None
        };

        let CachedSearch { indices, total } = match cached {
            Some(found) => found,
            None => {
                let mut indices = Vec::new();
                let mut total = 0;
                for (idx, port) in catalog.iter().enumerate() {
                    if matches_expression(port, &expr, &ctx) {
                        total += 1;
                        if indices.len() < cap {
                            indices.push(idx);
                        }
                    }
                }
                let computed = CachedSearch { indices, total };
                if cacheable {
                    self.cache.put(trimmed, cap, mask, computed.clone());
                }
                computed
            }
        };

        let hits: Vec<Port> = indices
            .iter()
            .filter_map(|&idx| catalog.ports().get(idx).cloned())
            .collect();
        let elapsed = started.elapsed();
        debug!(
            query = trimmed,
            total,
            shown = hits.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "search complete"
        );

        SearchOutcome::Results(SearchReport {
            query: trimmed.to_string(),
            truncated: total > hits.len(),
            total,
            hits,
            elapsed,
            highlight_terms: expr.free_text_terms(),
        })
    }
}

use std::sync::Arc;

use crate::catalog::{HttpSource, IndexLoader};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::engine::{QueryEngine, SearchOptions};
use crate::error::Result;

/// Everything a command needs: resolved config plus the wiring to build
/// an engine on demand. The loader is constructed here and injected, so
/// tests can assemble engines around fake sources instead.
pub struct AppContext {
    pub config: Config,
    pub output_format: OutputFormat,
    pub verbosity: u8,
    index_url_override: Option<String>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let output_format = cli.output_format(&config);

        Ok(Self {
            config,
            output_format,
            verbosity: cli.verbose,
            index_url_override: cli.index_url.clone(),
        })
    }

    /// Search knobs from config: result cap and free-text field subset.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            max_results: self.config.search.max_results,
            free_text: self.config.search.free_text.fields(),
        }
    }

    pub fn engine(&self) -> Result<QueryEngine> {
        self.engine_with(self.search_options())
    }

    pub fn engine_with(&self, options: SearchOptions) -> Result<QueryEngine> {
        let url = match &self.index_url_override {
            Some(url) => url.clone(),
            None => self.config.index.resolve_url()?,
        };
        let source = HttpSource::new(url, self.config.index.timeout())?;
        let loader = Arc::new(IndexLoader::new(source));
        Ok(QueryEngine::with_cache_size(
            loader,
            options,
            self.config.search.cache_size,
        ))
    }
}

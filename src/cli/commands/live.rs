//! portq live - interactive debounced search.
//!
//! Reads one input line per "keystroke" event; each line replaces the
//! pending search, which fires after the configured quiet period. This
//! is the CLI rendition of the page's input handler: at most one search
//! per quiet interval, and the last input always wins.

use std::sync::Arc;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::AppContext;
use crate::cli::formatters::SearchView;
use crate::cli::output::{Formattable, OutputFormat};
use crate::engine::{Debouncer, QueryEngine};
use crate::error::Result;
use crate::urlstate;

#[derive(Args, Debug)]
pub struct LiveArgs {
    /// Seed the first search from a page URL or query string
    #[arg(long)]
    pub from_url: Option<String>,
}

pub async fn run(ctx: &AppContext, args: &LiveArgs) -> Result<()> {
    let engine = Arc::new(ctx.engine()?);
    let debouncer = Debouncer::new(ctx.config.search.debounce);
    let format = ctx.output_format;

    // Preload the index before the first keystroke, like the page does
    // on input focus. A load failure surfaces once, right here; the
    // session is unusable after that.
    engine.catalog().await?;

    // Deep link: run the synthesized query immediately, undebounced.
    if let Some(input) = &args.from_url {
        if let Some(raw) = urlstate::query_from_url(input)? {
            search_and_print(&engine, &raw, format).await;
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let raw = line.trim().to_string();
        if raw == ":quit" || raw == ":q" {
            debouncer.cancel();
            return Ok(());
        }
        let engine = Arc::clone(&engine);
        debouncer.schedule(async move {
            search_and_print(&engine, &raw, format).await;
        });
    }

    // EOF: let the last scheduled search fire before exiting.
    debouncer.flush().await;
    Ok(())
}

async fn search_and_print(engine: &QueryEngine, raw: &str, format: OutputFormat) {
    match engine.search(raw).await {
        Ok(outcome) => {
            let rendered = SearchView::new(outcome).format(format);
            // An empty render is the hidden no-query panel.
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Err(err) => eprintln!("search failed: {err}"),
    }
}

//! portq search - run one query against the ports index.

use clap::Args;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use crate::app::AppContext;
use crate::cli::formatters::SearchView;
use crate::cli::output::{Formattable, OutputFormat};
use crate::engine::SearchOutcome;
use crate::error::{PqError, Result};
use crate::query::eval::FreeTextFields;
use crate::urlstate;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Query string, e.g. 'name:vim && !is:broken' or '*' for everything
    pub query: Option<String>,

    /// Take the query from a search-page URL or bare query string
    /// (q/query/cat/lic parameters)
    #[arg(long, conflicts_with = "query")]
    pub from_url: Option<String>,

    /// Set or replace the category field token
    #[arg(long)]
    pub category: Option<String>,

    /// Set or replace the license field token
    #[arg(long)]
    pub license: Option<String>,

    /// Override the configured result cap
    #[arg(long)]
    pub limit: Option<usize>,

    /// Fields free-text words match against
    /// (name,description,category,provides,depends)
    #[arg(long = "in", value_name = "FIELDS", value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Print a canonical share link for this query against the site base
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let mut raw = match (&args.query, &args.from_url) {
        (Some(query), _) => query.clone(),
        (None, Some(input)) => urlstate::query_from_url(input)?.unwrap_or_default(),
        (None, None) => String::new(),
    };

    // Dropdown semantics: the shortcut flags edit the query string.
    if let Some(category) = &args.category {
        raw = urlstate::inject_field_token(&raw, "category", category);
    }
    if let Some(license) = &args.license {
        raw = urlstate::inject_field_token(&raw, "license", license);
    }

    let mut options = ctx.search_options();
    if let Some(limit) = args.limit {
        options.max_results = limit;
    }
    if let Some(fields) = parse_free_text_fields(&args.fields)? {
        options.free_text = fields;
    }

    let engine = ctx.engine_with(options)?;

    let spinner = index_spinner(ctx.output_format);
    let searched = engine.search(&raw).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = searched?;

    let share_url = match (&args.base_url, &outcome) {
        (Some(base), SearchOutcome::Results(_)) => Some(urlstate::share_url(base, raw.trim())?),
        _ => None,
    };

    let view = SearchView::new(outcome).with_share_url(share_url);
    emit(&view.format(ctx.output_format), ctx.output_format);
    Ok(())
}

/// Parse the `--in` field list. Empty means "use the configured subset".
fn parse_free_text_fields(names: &[String]) -> Result<Option<FreeTextFields>> {
    if names.is_empty() {
        return Ok(None);
    }
    let mut fields = FreeTextFields {
        name: false,
        description: false,
        category: false,
        provides: false,
        depends: false,
    };
    for name in names {
        match name.trim().to_ascii_lowercase().as_str() {
            "name" => fields.name = true,
            "description" | "desc" => fields.description = true,
            "category" | "cat" => fields.category = true,
            "provides" => fields.provides = true,
            "depends" | "dep" => fields.depends = true,
            other => {
                return Err(PqError::Config(format!(
                    "unknown free-text field '{other}' \
                     (expected name, description, category, provides, depends)"
                )));
            }
        }
    }
    Ok(Some(fields))
}

/// Spinner while the first search waits on the index fetch. Only in
/// human mode on a real terminal; robot consumers get silence.
fn index_spinner(format: OutputFormat) -> Option<ProgressBar> {
    if format != OutputFormat::Human || !Term::stderr().is_term() {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("loading ports index...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(spinner)
}

fn emit(rendered: &str, format: OutputFormat) {
    if rendered.is_empty() {
        return;
    }
    match format {
        // Human rows are already newline-terminated.
        OutputFormat::Human => print!("{rendered}"),
        OutputFormat::Json | OutputFormat::Plain => println!("{rendered}"),
    }
}

//! portq stats - catalog summary figures.

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::CatalogStats;
use crate::cli::output::Formattable;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatsArgs {}

pub async fn run(ctx: &AppContext, _args: &StatsArgs) -> Result<()> {
    let engine = ctx.engine()?;
    let catalog = engine.catalog().await?;
    let stats = CatalogStats::collect(&catalog, chrono::Utc::now().timestamp());
    println!("{}", stats.format(ctx.output_format));
    Ok(())
}

//! Catalog summary statistics.
//!
//! The figures the site shows on its front page, recomputed client-side
//! from the same index: totals, health counters, recent activity, and
//! build outcome tallies.

use std::collections::BTreeSet;

use console::style;
use serde::Serialize;

use crate::catalog::{BuildStatus, Catalog};
use crate::cli::output::{Formattable, OutputFormat};
use crate::query::WEEK_SECS;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_ports: usize,
    pub categories: usize,
    pub broken: usize,
    pub unmaintained: usize,
    pub updated_this_week: usize,
    pub builds_succeeded: usize,
    pub builds_failed: usize,
    pub builds_missing: usize,
}

impl CatalogStats {
    pub fn collect(catalog: &Catalog, now: i64) -> Self {
        let week_ago = now.saturating_sub(WEEK_SECS);
        let mut categories = BTreeSet::new();
        let mut stats = Self {
            total_ports: catalog.len(),
            categories: 0,
            broken: 0,
            unmaintained: 0,
            updated_this_week: 0,
            builds_succeeded: 0,
            builds_failed: 0,
            builds_missing: 0,
        };

        for port in catalog.iter() {
            categories.insert(port.category.as_str());
            if port.is_broken {
                stats.broken += 1;
            }
            if port.is_unmaintained {
                stats.unmaintained += 1;
            }
            if port.last_updated > week_ago {
                stats.updated_this_week += 1;
            }
            match port.build_status {
                BuildStatus::Success => stats.builds_succeeded += 1,
                BuildStatus::Failed => stats.builds_failed += 1,
                BuildStatus::None => stats.builds_missing += 1,
            }
        }

        stats.categories = categories.len();
        stats
    }

    fn format_human(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", style("Catalog").bold()));
        out.push_str(&kv("ports", self.total_ports));
        out.push_str(&kv("categories", self.categories));
        out.push_str(&kv("broken", self.broken));
        out.push_str(&kv("unmaintained", self.unmaintained));
        out.push_str(&kv("updated this week", self.updated_this_week));
        out.push_str(&format!("{}\n", style("Builds").bold()));
        out.push_str(&kv("succeeded", self.builds_succeeded));
        out.push_str(&kv("failed", self.builds_failed));
        out.push_str(&kv("not built", self.builds_missing));
        out
    }
}

fn kv(key: &str, value: usize) -> String {
    format!("  {:<18} {value}\n", style(key).dim())
}

impl Formattable for CatalogStats {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Plain => format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                self.total_ports,
                self.categories,
                self.broken,
                self.unmaintained,
                self.updated_this_week,
                self.builds_succeeded,
                self.builds_failed,
                self.builds_missing,
            ),
        }
    }
}

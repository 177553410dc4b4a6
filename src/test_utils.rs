//! Shared test utilities: table-test runner and catalog fixtures.

use crate::catalog::{BuildStatus, Catalog, Port};
use crate::query::DAY_SECS;

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
}

/// Run table-driven tests, reporting the first mismatch by case name.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E,
{
    for case in cases {
        let actual = test_fn(case.input.clone());
        if actual != case.expected {
            return Err(format!(
                "case '{}' failed: input {:?}, expected {:?}, got {:?}",
                case.name, case.input, case.expected, actual
            ));
        }
    }
    Ok(())
}

/// Minimal port fixture: required fields only.
pub fn port(name: &str, category: &str) -> Port {
    PortBuilder::new(name, category).build()
}

/// Fluent builder for port fixtures.
#[derive(Debug, Clone)]
pub struct PortBuilder {
    port: Port,
}

impl PortBuilder {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            port: Port {
                name: name.to_string(),
                category: category.to_string(),
                description: String::new(),
                version: "1.0".to_string(),
                license: None,
                author: None,
                provides: Vec::new(),
                depends: Vec::new(),
                is_broken: false,
                is_unmaintained: false,
                last_updated: 0,
                build_status: BuildStatus::None,
            },
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.port.description = description.to_string();
        self
    }

    pub fn version(mut self, version: &str) -> Self {
        self.port.version = version.to_string();
        self
    }

    pub fn license(mut self, license: &str) -> Self {
        self.port.license = Some(license.to_string());
        self
    }

    pub fn author(mut self, author: &str) -> Self {
        self.port.author = Some(author.to_string());
        self
    }

    pub fn provides<I, S>(mut self, provides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.port.provides = provides.into_iter().map(Into::into).collect();
        self
    }

    pub fn depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.port.depends = depends.into_iter().map(Into::into).collect();
        self
    }

    pub fn broken(mut self) -> Self {
        self.port.is_broken = true;
        self
    }

    pub fn unmaintained(mut self) -> Self {
        self.port.is_unmaintained = true;
        self
    }

    pub fn build_status(mut self, status: BuildStatus) -> Self {
        self.port.build_status = status;
        self
    }

    /// Set the last-updated timestamp to `days` days before `now`.
    pub fn updated_days_ago(mut self, now: i64, days: i64) -> Self {
        self.port.last_updated = now - days * DAY_SECS;
        self
    }

    pub fn build(self) -> Port {
        self.port
    }
}

/// A small mixed catalog used across engine and formatter tests.
pub fn sample_catalog(now: i64) -> Catalog {
    Catalog::from_ports(vec![
        PortBuilder::new("vim", "editors")
            .description("Vim text editor")
            .version("9.1")
            .license("Vim")
            .author("Bram")
            .provides(["vim", "vi"])
            .depends(["ncurses"])
            .build_status(BuildStatus::Success)
            .updated_days_ago(now, 2)
            .build(),
        PortBuilder::new("nano", "editors")
            .description("simple editor")
            .version("7.2")
            .license("GPL-3.0")
            .broken()
            .updated_days_ago(now, 1000)
            .build(),
        PortBuilder::new("dwm", "wm")
            .description("dynamic window manager")
            .version("6.5")
            .license("MIT")
            .depends(["libx11", "libxft"])
            .build_status(BuildStatus::Success)
            .updated_days_ago(now, 20)
            .build(),
        PortBuilder::new("libxft", "libs")
            .description("X FreeType library")
            .version("2.3.8")
            .license("MIT")
            .provides(["libXft.so"])
            .unmaintained()
            .updated_days_ago(now, 400)
            .build(),
    ])
}

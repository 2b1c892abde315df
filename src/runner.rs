use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use camino::Utf8Path;

use crate::cli::{Invocation, USAGE};
use crate::config::{self, GoenvConfig};
use crate::workspace::WorkspaceBuilder;

pub fn run(invocation: Invocation) -> Result<()> {
    match invocation {
        Invocation::Usage => {
            writeln!(io::stdout().lock(), "{}", USAGE).context("writing usage")
        }
        Invocation::Create { destination } => {
            let config = config::load()?;
            handle_create(&config, destination.as_deref())
        }
    }
}

fn handle_create(config: &GoenvConfig, destination: Option<&str>) -> Result<()> {
    let destination = destination.unwrap_or_else(|| config.default_destination());
    if destination.is_empty() {
        bail!("destination folder must not be empty");
    }

    let policy = config.error_policy();
    tracing::debug!(destination, ?policy, "creating workspace");
    let report = WorkspaceBuilder::new(policy).create(Utf8Path::new(destination))?;
    tracing::debug!(
        root = %report.root,
        refreshed = report.refreshed,
        ignored = report.failures.len(),
        "done"
    );
    Ok(())
}

//! `rulebook` binary: registry inspection and record loading.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rulebook_registry::{CollectingSink, LoadContext, RegistryConfig};

mod cli;
mod commands;
mod lst;

use cli::{Cli, Command};

const LOG_ENV: &str = "RULEBOOK_LOG";

fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();

	let config = load_config(cli.config.as_deref())?;
	setup_tracing(&config.logging.filter, cli.verbose);

	let sink = Arc::new(CollectingSink::forwarding());
	let boot = rulebook_tokens::bootstrap_with_sink(sink.clone())?;
	let pool = &boot.pool;
	let mut stdout = std::io::stdout().lock();

	match cli.command {
		Command::Families => commands::families(pool, &mut stdout)?,
		Command::Tokens { kind, revision } => {
			let revision = revision.unwrap_or(config.loader.revision);
			commands::tokens(pool, kind, revision, &mut stdout)?;
		}
		Command::Load {
			file,
			kind,
			revision,
		} => {
			let text = std::fs::read_to_string(&file)
				.with_context(|| format!("failed to read {}", file.display()))?;
			let ctx = match revision {
				Some(revision) => LoadContext::new(pool, revision)
					.with_strict_unknown(config.loader.strict_unknown_tokens),
				None => LoadContext::from_config(pool, &config),
			};
			let summary = commands::load(&ctx, &sink, kind, &text, &mut stdout)?;
			if summary.failed() {
				return Ok(ExitCode::FAILURE);
			}
		}
	}
	Ok(ExitCode::SUCCESS)
}

/// Reads `path` if given; otherwise every setting takes its default.
fn load_config(path: Option<&Path>) -> anyhow::Result<RegistryConfig> {
	match path {
		Some(path) => Ok(RegistryConfig::load(path)?),
		None => Ok(RegistryConfig::default()),
	}
}

fn setup_tracing(configured: &str, verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("rulebook_registry=trace,rulebook_tokens=trace,debug")
		} else {
			EnvFilter::new(configured)
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}

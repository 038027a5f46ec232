use std::path::PathBuf;

use rulebook_primitives::Revision;

/// Registry construction and configuration errors.
///
/// These are defects in the build or the environment rather than in loaded
/// data; keyword-level data problems are reported as diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
	#[error("well-known family {name} redeclares revision {revision}, already declared by {existing}")]
	DuplicateWellKnown {
		revision: Revision,
		name: &'static str,
		existing: &'static str,
	},

	#[error("failed to read config {}: {source}", path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config: {0}")]
	ConfigParse(#[from] toml::de::Error),

	#[error("plugin {plugin} failed: {reason}")]
	Plugin { plugin: &'static str, reason: String },
}

//! Loader configuration read from TOML.
//!
//! ```toml
//! [loader]
//! revision = "5.14.0"
//! strict_unknown_tokens = false
//!
//! [logging]
//! filter = "info"
//! ```
//!
//! Every field is optional.

use std::path::Path;

use rulebook_primitives::Revision;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	pub loader: LoaderConfig,
	pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// Revision assumed for data sets that do not declare one.
	pub revision: Revision,
	/// Report unknown keywords as data errors rather than unknown-token warnings.
	pub strict_unknown_tokens: bool,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			revision: Revision::CURRENT,
			strict_unknown_tokens: false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
	/// `tracing-subscriber` filter directive used when `RULEBOOK_LOG` is unset.
	pub filter: String,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
		}
	}
}

impl RegistryConfig {
	pub fn from_toml_str(text: &str) -> Result<Self, RegistryError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses the config file at `path`.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| RegistryError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&text)?;
		tracing::debug!(path = %path.display(), revision = %config.loader.revision, "loaded config");
		Ok(config)
	}
}

//! Token plugin discovery via `inventory`.
//!
//! Each token crate submits one or more [`TokenPlugin`] descriptors with
//! [`token_plugin!`](crate::token_plugin). [`discover`] collects every
//! descriptor linked into the binary and runs its `register` function against
//! the family for the plugin's revision.

use rulebook_primitives::{EntityKind, Revision};
use rustc_hash::FxHashSet as HashSet;

use crate::error::RegistryError;
use crate::family::TokenFamily;
use crate::pool::TokenFamilyPool;

/// A plugin descriptor registering tokens into one family.
pub struct TokenPlugin {
	/// Unique plugin id, used for ordering and diagnostics.
	pub id: &'static str,
	/// Target revision; `None` targets [`Revision::CURRENT`].
	pub revision: Option<Revision>,
	/// Called once during discovery with the target family.
	pub register: fn(&TokenFamily) -> Result<(), RegistryError>,
}

inventory::collect!(TokenPlugin);

impl TokenPlugin {
	pub const fn new(
		id: &'static str,
		revision: Option<Revision>,
		register: fn(&TokenFamily) -> Result<(), RegistryError>,
	) -> Self {
		Self {
			id,
			revision,
			register,
		}
	}

	pub fn target(&self) -> Revision {
		self.revision.unwrap_or(Revision::CURRENT)
	}
}

/// Submits a [`TokenPlugin`] for discovery.
///
/// ```ignore
/// token_plugin!(equipment_core, register_equipment);
/// token_plugin!(legacy_class, Revision::REV514, register_legacy);
/// ```
#[macro_export]
macro_rules! token_plugin {
	($id:ident, $register:path) => {
		$crate::inventory::submit! {
			$crate::TokenPlugin::new(stringify!($id), None, $register)
		}
	};
	($id:ident, $revision:expr, $register:path) => {
		$crate::inventory::submit! {
			$crate::TokenPlugin::new(stringify!($id), Some($revision), $register)
		}
	};
}

/// Outcome of running one plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRecord {
	pub plugin_id: &'static str,
	pub revision: Revision,
}

/// Runs every linked [`TokenPlugin`] against `pool`.
///
/// Plugins run sorted by target revision, then id, so registration is
/// deterministic regardless of link order. Fails on a duplicate id or on the
/// first plugin whose `register` fails.
pub fn discover(pool: &TokenFamilyPool) -> Result<Vec<PluginRecord>, RegistryError> {
	let plugins: Vec<&'static TokenPlugin> = inventory::iter::<TokenPlugin>.into_iter().collect();
	run_plugins(pool, plugins)
}

pub(crate) fn run_plugins(
	pool: &TokenFamilyPool,
	mut plugins: Vec<&TokenPlugin>,
) -> Result<Vec<PluginRecord>, RegistryError> {
	plugins.sort_by(|a, b| a.target().cmp(&b.target()).then_with(|| a.id.cmp(b.id)));

	let mut seen = HashSet::default();
	let mut records = Vec::with_capacity(plugins.len());
	for plugin in plugins {
		if !seen.insert(plugin.id) {
			return Err(RegistryError::Plugin {
				plugin: plugin.id,
				reason: "duplicate plugin id".to_string(),
			});
		}
		let revision = plugin.target();
		let family = pool.family(revision);
		(plugin.register)(&family)?;
		tracing::debug!(plugin = plugin.id, %revision, "registered token plugin");
		records.push(PluginRecord {
			plugin_id: plugin.id,
			revision,
		});
	}
	Ok(records)
}

/// Mirrors every `Class` primary token of the current family under
/// `ClassLevel` in the REV514 family.
///
/// 5.14 data sets carry class keywords on class-level lines. Returns the
/// number of tokens mirrored.
pub fn register_rev514_compat(pool: &TokenFamilyPool) -> usize {
	let legacy = pool.rev514();
	let tokens = pool.current().get_tokens(EntityKind::Class);
	for token in &tokens {
		legacy.put_token(Some(EntityKind::ClassLevel), token.clone());
	}
	tracing::debug!(tokens = tokens.len(), "mirrored class tokens for 5.14 class levels");
	tokens.len()
}

//! Builtin tokens for the rules-data interpreter.
//!
//! | Keyword | Kind | Stores |
//! |---------|------|--------|
//! | `MODS` | Equipment | [`ObjectKey::ModControl`] |
//! | `TYPE` | Equipment | [`ObjectKey::Types`] |
//! | `COST` | Equipment | [`ObjectKey::Cost`] |
//! | `BASEITEM` | Equipment | [`ObjectKey::BaseItem`], checked after load |
//! | `HD` | Class | [`ObjectKey::HitDie`] |
//!
//! Also registered: the `TYPE` group definition for equipment and the
//! `PRETYPE` prerequisite parser. Everything targets the current family and is
//! submitted through [`token_plugin!`]; [`bootstrap`] runs discovery and the
//! 5.14 class-level compatibility pass.
//!
//! [`ObjectKey::ModControl`]: rulebook_primitives::ObjectKey::ModControl
//! [`ObjectKey::Types`]: rulebook_primitives::ObjectKey::Types
//! [`ObjectKey::Cost`]: rulebook_primitives::ObjectKey::Cost
//! [`ObjectKey::BaseItem`]: rulebook_primitives::ObjectKey::BaseItem
//! [`ObjectKey::HitDie`]: rulebook_primitives::ObjectKey::HitDie

use std::sync::Arc;

use rulebook_registry::plugin::{self, PluginRecord};
use rulebook_registry::{
	DiagnosticSink, RegistryError, TokenFamily, TokenFamilyPool, TracingSink, token_plugin,
};

pub mod base_item;
pub mod class;
pub mod cost;
pub mod mods;
pub mod pretype;
pub mod type_group;
pub mod types;

pub use base_item::{BaseItemCheck, BaseItemToken};
pub use class::HitDieToken;
pub use cost::CostToken;
pub use mods::ModsToken;
pub use pretype::PreTypeParser;
pub use type_group::TypeGroup;
pub use types::TypeToken;

fn register_equipment(family: &TokenFamily) -> Result<(), RegistryError> {
	family.put_primary(Arc::new(ModsToken));
	family.put_primary(Arc::new(TypeToken));
	family.put_primary(Arc::new(CostToken));
	family.put_primary(Arc::new(BaseItemToken));
	family.add_deferred_token(Arc::new(BaseItemCheck));
	family.add_group_definition(Arc::new(TypeGroup));
	Ok(())
}

fn register_class(family: &TokenFamily) -> Result<(), RegistryError> {
	family.put_primary(Arc::new(HitDieToken));
	Ok(())
}

fn register_prerequisites(family: &TokenFamily) -> Result<(), RegistryError> {
	family.put_prerequisite_token(Arc::new(PreTypeParser));
	Ok(())
}

token_plugin!(builtin_equipment, register_equipment);
token_plugin!(builtin_class, register_class);
token_plugin!(builtin_prerequisites, register_prerequisites);

/// A pool populated with every linked token plugin.
#[derive(Debug)]
pub struct Bootstrap {
	pub pool: TokenFamilyPool,
	pub plugins: Vec<PluginRecord>,
}

/// Declares the well-known families, runs discovery, and applies the 5.14
/// class-level compatibility registrations.
pub fn bootstrap() -> Result<Bootstrap, RegistryError> {
	bootstrap_with_sink(Arc::new(TracingSink))
}

pub fn bootstrap_with_sink(sink: Arc<dyn DiagnosticSink>) -> Result<Bootstrap, RegistryError> {
	let pool = TokenFamilyPool::with_sink(sink)?;
	let plugins = plugin::discover(&pool)?;
	let mirrored = plugin::register_rev514_compat(&pool);
	tracing::info!(
		plugins = plugins.len(),
		mirrored,
		families = pool.len(),
		"token registry ready"
	);
	Ok(Bootstrap { pool, plugins })
}

#[cfg(test)]
pub(crate) mod test_support {
	use std::sync::Arc;

	use rulebook_primitives::{CdomObject, EntityKind, Revision};
	use rulebook_registry::{CollectingSink, LoadContext, TokenFamilyPool};

	/// A pool whose current family holds every builtin, reporting to a collecting sink.
	pub struct Harness {
		pub pool: TokenFamilyPool,
		pub sink: Arc<CollectingSink>,
	}

	impl Harness {
		pub fn new() -> Self {
			let sink = Arc::new(CollectingSink::new());
			let pool = TokenFamilyPool::with_sink(sink.clone()).unwrap();
			let current = pool.current();
			super::register_equipment(&current).unwrap();
			super::register_class(&current).unwrap();
			super::register_prerequisites(&current).unwrap();
			Self { pool, sink }
		}

		pub fn context(&self) -> LoadContext<'_> {
			LoadContext::new(&self.pool, Revision::CURRENT)
		}

		pub fn equipment(name: &str) -> CdomObject {
			CdomObject::new(EntityKind::Equipment, name)
		}
	}
}

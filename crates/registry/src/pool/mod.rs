//! Process-wide library of token families, one per revision.
//!
//! # Well-known families
//!
//! [`WELL_KNOWN`] is the static table of families declared at startup. Their
//! instances live as long as the pool: [`TokenFamilyPool::reset`] discards
//! lazily interned families but re-declares the same well-known instances,
//! together with any registrations they hold.
//!
//! # Invariants
//!
//! - At most one family per distinct revision value.
//!   - Enforced in: [`TokenFamilyPool::family`] (upgradable read + re-check).
//! - No two well-known entries share a revision.
//!   - Enforced in: [`TokenFamilyPool::from_table`]; violation is fatal.
//!
//! # Concurrency
//!
//! Lookups take a shared lock and may run from many workers. `reset` is an
//! administrative operation: callers must quiesce lookups and registrations
//! first. Families removed by `reset` remain valid for holders of their `Arc`.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use rulebook_primitives::Revision;

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::RegistryError;
use crate::family::TokenFamily;

/// A family declared at process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellKnown {
	pub name: &'static str,
	pub revision: Revision,
}

/// The well-known families, in declaration order.
pub const WELL_KNOWN: &[WellKnown] = &[
	WellKnown {
		name: "CURRENT",
		revision: Revision::CURRENT,
	},
	WellKnown {
		name: "REV514",
		revision: Revision::REV514,
	},
];

pub struct TokenFamilyPool {
	families: RwLock<BTreeMap<Revision, Arc<TokenFamily>>>,
	well_known: Vec<(WellKnown, Arc<TokenFamily>)>,
	sink: Arc<dyn DiagnosticSink>,
}

impl TokenFamilyPool {
	/// Declares the [`WELL_KNOWN`] families, reporting through `tracing`.
	pub fn init() -> Result<Self, RegistryError> {
		Self::with_sink(Arc::new(TracingSink))
	}

	/// Declares the [`WELL_KNOWN`] families; every family reports to `sink`.
	pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Result<Self, RegistryError> {
		Self::from_table(WELL_KNOWN, sink)
	}

	/// Declares the families in `table`.
	///
	/// Fails if two entries share a revision.
	pub fn from_table(
		table: &[WellKnown],
		sink: Arc<dyn DiagnosticSink>,
	) -> Result<Self, RegistryError> {
		let mut well_known: Vec<(WellKnown, Arc<TokenFamily>)> = Vec::with_capacity(table.len());
		for entry in table {
			if let Some((existing, _)) = well_known
				.iter()
				.find(|(w, _)| w.revision == entry.revision)
			{
				return Err(RegistryError::DuplicateWellKnown {
					revision: entry.revision,
					name: entry.name,
					existing: existing.name,
				});
			}
			let family = Arc::new(TokenFamily::with_sink(entry.revision, Arc::clone(&sink)));
			well_known.push((*entry, family));
		}

		let pool = Self {
			families: RwLock::new(BTreeMap::new()),
			well_known,
			sink,
		};
		pool.declare_well_known();
		tracing::debug!(
			families = pool.well_known.len(),
			"declared well-known token families"
		);
		Ok(pool)
	}

	fn declare_well_known(&self) {
		let mut families = self.families.write();
		families.clear();
		for (entry, family) in &self.well_known {
			families.insert(entry.revision, Arc::clone(family));
		}
	}

	/// Returns the family for `revision`, interning a new one on first request.
	///
	/// Repeated calls with equal revisions return the same instance.
	pub fn family(&self, revision: Revision) -> Arc<TokenFamily> {
		let families = self.families.upgradable_read();
		if let Some(family) = families.get(&revision) {
			return Arc::clone(family);
		}
		let mut families = RwLockUpgradableReadGuard::upgrade(families);
		let family = families
			.entry(revision)
			.or_insert_with(|| Arc::new(TokenFamily::with_sink(revision, Arc::clone(&self.sink))));
		tracing::trace!(%revision, "interned token family");
		Arc::clone(family)
	}

	/// Returns the family for `revision` if one is already interned.
	pub fn get(&self, revision: Revision) -> Option<Arc<TokenFamily>> {
		self.families.read().get(&revision).cloned()
	}

	/// Returns the well-known family declared under `name`.
	pub fn well_known(&self, name: &str) -> Option<Arc<TokenFamily>> {
		self.well_known
			.iter()
			.find(|(entry, _)| entry.name.eq_ignore_ascii_case(name))
			.map(|(_, family)| Arc::clone(family))
	}

	/// The family for the running engine's revision.
	pub fn current(&self) -> Arc<TokenFamily> {
		self.family(Revision::CURRENT)
	}

	/// The 5.14 compatibility family.
	pub fn rev514(&self) -> Arc<TokenFamily> {
		self.family(Revision::REV514)
	}

	/// Discards lazily interned families and re-declares the well-known set.
	pub fn reset(&self) {
		self.declare_well_known();
		tracing::debug!("token family pool reset");
	}

	/// Snapshot of every interned family, ordered by revision.
	pub fn all_families(&self) -> Vec<Arc<TokenFamily>> {
		self.families.read().values().cloned().collect()
	}

	/// Families with revision `>= from`, ascending, preceded by any well-known
	/// family of the same release line below `from`.
	///
	/// This is the compatibility chain a data set declaring `from` resolves
	/// keywords through; it always ends with the current family. Data declaring
	/// `5.14.2` therefore starts at [`Revision::REV514`].
	pub fn chain(&self, from: Revision) -> Vec<Arc<TokenFamily>> {
		let start = self
			.well_known
			.iter()
			.map(|(entry, _)| entry.revision)
			.filter(|rev| *rev < from && same_line(*rev, from))
			.min()
			.unwrap_or(from);
		self.families
			.read()
			.range(start..)
			.filter(|(rev, _)| **rev >= from || self.is_well_known(**rev))
			.map(|(_, family)| Arc::clone(family))
			.collect()
	}

	fn is_well_known(&self, revision: Revision) -> bool {
		self.well_known
			.iter()
			.any(|(entry, _)| entry.revision == revision)
	}

	pub fn sink(&self) -> &Arc<dyn DiagnosticSink> {
		&self.sink
	}

	pub fn len(&self) -> usize {
		self.families.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.families.read().is_empty()
	}
}

fn same_line(a: Revision, b: Revision) -> bool {
	a.primary() == b.primary() && a.secondary() == b.secondary()
}

impl std::fmt::Debug for TokenFamilyPool {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TokenFamilyPool")
			.field("families", &self.families.read().keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

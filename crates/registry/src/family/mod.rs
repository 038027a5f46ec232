//! Token catalogs for one data-format revision.
//!
//! # Catalogs
//!
//! | Catalog | Key | Matching |
//! |---------|-----|----------|
//! | primary tokens | (kind, keyword) | exact |
//! | sub-tokens | (kind, parent, sub-keyword) | names case-insensitive |
//! | prerequisite parsers | alias | case-insensitive |
//! | deferred processors | none | insertion order, duplicates kept |
//! | group definitions | (kind, group name) | name case-insensitive |
//!
//! Keyed catalogs overwrite on re-registration (last write wins). A token
//! whose entity kind is unset is stored under the `None` kind: registration
//! succeeds but no lookup can reach it, since lookups always name a kind.
//!
//! # Concurrency
//!
//! Catalogs sit behind a [`RwLock`] so a family can be shared as
//! `Arc<TokenFamily>`. Registration is expected to finish before lookups
//! start; the lock makes that discipline memory-safe, it does not order it.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use parking_lot::RwLock;
use rulebook_primitives::{EntityKind, Folded, Revision};
use rustc_hash::FxHashMap as HashMap;

use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink, TracingSink};
use crate::prereq::PrerequisiteParser;
use crate::token::{CdomToken, DeferredToken, GroupDefinition, PrimaryToken, SecondaryToken};

type SubTokenMap = HashMap<Folded, HashMap<Folded, Arc<dyn SecondaryToken>>>;

#[derive(Default)]
struct Catalogs {
	tokens: HashMap<Option<EntityKind>, HashMap<String, Arc<dyn PrimaryToken>>>,
	sub_tokens: HashMap<Option<EntityKind>, SubTokenMap>,
	prerequisites: HashMap<Folded, Arc<dyn PrerequisiteParser>>,
	deferred: Vec<Arc<dyn DeferredToken>>,
	groups: HashMap<EntityKind, HashMap<Folded, Arc<dyn GroupDefinition>>>,
}

/// The tokens, sub-tokens, prerequisite parsers, deferred processors, and
/// group definitions valid for one [`Revision`].
///
/// Identity is the revision: two families compare equal, order, and hash by
/// their revisions alone.
pub struct TokenFamily {
	revision: Revision,
	catalogs: RwLock<Catalogs>,
	sink: Arc<dyn DiagnosticSink>,
}

impl TokenFamily {
	/// Creates an empty family reporting to a [`TracingSink`].
	pub fn new(revision: Revision) -> Self {
		Self::with_sink(revision, Arc::new(TracingSink))
	}

	pub fn with_sink(revision: Revision, sink: Arc<dyn DiagnosticSink>) -> Self {
		Self {
			revision,
			catalogs: RwLock::new(Catalogs::default()),
			sink,
		}
	}

	pub fn revision(&self) -> Revision {
		self.revision
	}

	fn report(&self, message: String) {
		self.sink
			.report(Diagnostic::new(DiagnosticKind::RegistrationError, message));
	}

	/// Registers `token` under (`kind`, `token.token_name()`).
	///
	/// Returns the token previously registered for that key. With `kind` unset
	/// a diagnostic is reported and the token is kept but unreachable.
	pub fn put_token(
		&self,
		kind: Option<EntityKind>,
		token: Arc<dyn PrimaryToken>,
	) -> Option<Arc<dyn PrimaryToken>> {
		if kind.is_none() {
			self.report(format!(
				"Cannot load token {} with no token class",
				token.impl_name()
			));
		}
		let name = token.token_name().to_string();
		self.catalogs
			.write()
			.tokens
			.entry(kind)
			.or_default()
			.insert(name, token)
	}

	/// Registers `token` under the entity kind it declares.
	pub fn put_primary(&self, token: Arc<dyn PrimaryToken>) -> Option<Arc<dyn PrimaryToken>> {
		self.put_token(token.token_kind(), token)
	}

	/// Exact-case lookup of a primary token.
	pub fn get_token(&self, kind: EntityKind, name: &str) -> Option<Arc<dyn PrimaryToken>> {
		self.catalogs
			.read()
			.tokens
			.get(&Some(kind))
			.and_then(|by_name| by_name.get(name))
			.cloned()
	}

	/// Returns every primary token registered for `kind`, sorted by keyword.
	pub fn get_tokens(&self, kind: EntityKind) -> Vec<Arc<dyn PrimaryToken>> {
		let catalogs = self.catalogs.read();
		let mut tokens: Vec<_> = catalogs
			.tokens
			.get(&Some(kind))
			.map(|by_name| by_name.values().cloned().collect())
			.unwrap_or_default();
		tokens.sort_by(|a, b| a.token_name().cmp(b.token_name()));
		tokens
	}

	/// Registers `token` under its kind, parent keyword, and keyword.
	pub fn put_sub_token(&self, token: Arc<dyn SecondaryToken>) -> Option<Arc<dyn SecondaryToken>> {
		let kind = token.token_kind();
		if kind.is_none() {
			self.report(format!(
				"Cannot load token {} with no token class",
				token.impl_name()
			));
		}
		let parent = Folded::new(token.parent_token());
		let name = Folded::new(token.token_name());
		self.catalogs
			.write()
			.sub_tokens
			.entry(kind)
			.or_default()
			.entry(parent)
			.or_default()
			.insert(name, token)
	}

	/// Case-insensitive lookup of a sub-token.
	pub fn get_sub_token(
		&self,
		kind: EntityKind,
		parent: &str,
		name: &str,
	) -> Option<Arc<dyn SecondaryToken>> {
		self.catalogs
			.read()
			.sub_tokens
			.get(&Some(kind))
			.and_then(|by_parent| by_parent.get(&Folded::new(parent)))
			.and_then(|by_name| by_name.get(&Folded::new(name)))
			.cloned()
	}

	/// Returns every sub-token under `kind` and `parent`, sorted by keyword.
	pub fn get_sub_tokens(&self, kind: EntityKind, parent: &str) -> Vec<Arc<dyn SecondaryToken>> {
		let catalogs = self.catalogs.read();
		let mut tokens: Vec<_> = catalogs
			.sub_tokens
			.get(&Some(kind))
			.and_then(|by_parent| by_parent.get(&Folded::new(parent)))
			.map(|by_name| by_name.values().cloned().collect())
			.unwrap_or_default();
		tokens.sort_by_key(|t| Folded::new(t.token_name()));
		tokens
	}

	/// Registers `parser` under every alias it handles.
	pub fn put_prerequisite_token(&self, parser: Arc<dyn PrerequisiteParser>) {
		let mut catalogs = self.catalogs.write();
		for alias in parser.kinds_handled() {
			catalogs
				.prerequisites
				.insert(Folded::new(alias), Arc::clone(&parser));
		}
	}

	/// Case-insensitive lookup of a prerequisite parser by alias.
	pub fn get_prerequisite_token(&self, alias: &str) -> Option<Arc<dyn PrerequisiteParser>> {
		self.catalogs
			.read()
			.prerequisites
			.get(&Folded::new(alias))
			.cloned()
	}

	pub fn add_deferred_token(&self, processor: Arc<dyn DeferredToken>) {
		self.catalogs.write().deferred.push(processor);
	}

	/// Returns a copy of the deferred processors in registration order.
	pub fn get_deferred_tokens(&self) -> Vec<Arc<dyn DeferredToken>> {
		self.catalogs.read().deferred.clone()
	}

	/// Registers `def` under its reference kind and group name.
	///
	/// An existing definition for the same key is replaced after a diagnostic
	/// naming both implementations.
	pub fn add_group_definition(&self, def: Arc<dyn GroupDefinition>) {
		let kind = def.reference_kind();
		let name = Folded::new(def.primitive_name());
		let existing = self
			.catalogs
			.write()
			.groups
			.entry(kind)
			.or_default()
			.insert(name, Arc::clone(&def));

		if let Some(existing) = existing {
			self.report(format!(
				"Duplicate Group Definition in {kind}: {}. Implementations were {} and {}",
				def.primitive_name(),
				existing.impl_name(),
				def.impl_name()
			));
		}
	}

	/// Case-insensitive lookup of a group definition.
	pub fn get_group(&self, kind: EntityKind, name: &str) -> Option<Arc<dyn GroupDefinition>> {
		self.catalogs
			.read()
			.groups
			.get(&kind)
			.and_then(|by_name| by_name.get(&Folded::new(name)))
			.cloned()
	}

	/// Empties all five catalogs. The revision is unaffected.
	pub fn clear_tokens(&self) {
		*self.catalogs.write() = Catalogs::default();
	}

	/// Returns true if no catalog holds an entry.
	pub fn is_empty(&self) -> bool {
		let catalogs = self.catalogs.read();
		catalogs.tokens.is_empty()
			&& catalogs.sub_tokens.is_empty()
			&& catalogs.prerequisites.is_empty()
			&& catalogs.deferred.is_empty()
			&& catalogs.groups.is_empty()
	}

	/// Returns the entity kinds with at least one reachable primary token.
	pub fn token_kinds(&self) -> Vec<EntityKind> {
		let mut kinds: Vec<_> = self
			.catalogs
			.read()
			.tokens
			.iter()
			.filter(|(_, by_name)| !by_name.is_empty())
			.filter_map(|(kind, _)| *kind)
			.collect();
		kinds.sort();
		kinds
	}
}

impl PartialEq for TokenFamily {
	fn eq(&self, other: &Self) -> bool {
		self.revision == other.revision
	}
}

impl Eq for TokenFamily {}

impl PartialOrd for TokenFamily {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for TokenFamily {
	fn cmp(&self, other: &Self) -> Ordering {
		self.revision.cmp(&other.revision)
	}
}

impl Hash for TokenFamily {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.revision.hash(state);
	}
}

impl fmt::Display for TokenFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Token Family: {}", self.revision)
	}
}

impl fmt::Debug for TokenFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let catalogs = self.catalogs.read();
		f.debug_struct("TokenFamily")
			.field("revision", &self.revision)
			.field("token_kinds", &catalogs.tokens.len())
			.field("prerequisites", &catalogs.prerequisites.len())
			.field("deferred", &catalogs.deferred.len())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
pub(crate) mod test_fixtures;

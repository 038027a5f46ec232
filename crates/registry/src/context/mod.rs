//! Interpretation context for one data set.
//!
//! A [`LoadContext`] fixes the data set's declared [`Revision`] and the
//! compatibility chain it resolves keywords through: every interned family
//! whose revision is at least the declared one, ascending, ending at
//! [`Revision::CURRENT`]. The first family in the chain holding a keyword
//! wins, so a legacy family shadows later ones only for the keywords it
//! registers.
//!
//! The chain is captured at construction. Families interned afterwards are not
//! consulted; build contexts once registration has finished.

use std::collections::BTreeMap;
use std::sync::Arc;

use rulebook_primitives::{CdomObject, EntityKind, ObjectContainer, ObjectStore, Revision};

use crate::config::RegistryConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::family::TokenFamily;
use crate::pool::TokenFamilyPool;
use crate::prereq::{Prerequisite, PrerequisiteError, PrerequisiteParser};
use crate::token::{
	CdomToken, DeferredToken, GroupDefinition, ParseResult, PrimaryToken, SecondaryToken,
};

pub struct LoadContext<'a> {
	pool: &'a TokenFamilyPool,
	revision: Revision,
	chain: Vec<Arc<TokenFamily>>,
	sink: Arc<dyn DiagnosticSink>,
	strict_unknown: bool,
}

impl<'a> LoadContext<'a> {
	/// Creates a context for data declaring `revision`, reporting to the pool's sink.
	///
	/// Interns the family for `revision` if needed so the chain always starts there.
	pub fn new(pool: &'a TokenFamilyPool, revision: Revision) -> Self {
		Self::with_sink(pool, revision, Arc::clone(pool.sink()))
	}

	pub fn with_sink(
		pool: &'a TokenFamilyPool,
		revision: Revision,
		sink: Arc<dyn DiagnosticSink>,
	) -> Self {
		pool.family(revision);
		let chain = pool.chain(revision);
		tracing::debug!(%revision, families = chain.len(), "created load context");
		Self {
			pool,
			revision,
			chain,
			sink,
			strict_unknown: false,
		}
	}

	/// Creates a context from the `[loader]` section of `config`.
	pub fn from_config(pool: &'a TokenFamilyPool, config: &RegistryConfig) -> Self {
		Self::new(pool, config.loader.revision)
			.with_strict_unknown(config.loader.strict_unknown_tokens)
	}

	/// Reports unknown keywords as [`DiagnosticKind::LstError`] when `strict`.
	pub fn with_strict_unknown(mut self, strict: bool) -> Self {
		self.strict_unknown = strict;
		self
	}

	pub fn revision(&self) -> Revision {
		self.revision
	}

	pub fn pool(&self) -> &'a TokenFamilyPool {
		self.pool
	}

	/// The families consulted for lookups, ascending by revision.
	pub fn chain(&self) -> &[Arc<TokenFamily>] {
		&self.chain
	}

	pub fn report(&self, kind: DiagnosticKind, message: impl Into<String>) {
		self.sink.report(Diagnostic::new(kind, message));
	}

	pub fn lst_error(&self, message: impl Into<String>) {
		self.report(DiagnosticKind::LstError, message);
	}

	pub fn lst_warning(&self, message: impl Into<String>) {
		self.report(DiagnosticKind::LstWarning, message);
	}

	pub fn token(&self, kind: EntityKind, name: &str) -> Option<Arc<dyn PrimaryToken>> {
		self.chain.iter().find_map(|f| f.get_token(kind, name))
	}

	pub fn sub_token(
		&self,
		kind: EntityKind,
		parent: &str,
		name: &str,
	) -> Option<Arc<dyn SecondaryToken>> {
		self.chain
			.iter()
			.find_map(|f| f.get_sub_token(kind, parent, name))
	}

	pub fn prerequisite_parser(&self, alias: &str) -> Option<Arc<dyn PrerequisiteParser>> {
		self.chain
			.iter()
			.find_map(|f| f.get_prerequisite_token(alias))
	}

	pub fn group_definition(&self, kind: EntityKind, name: &str) -> Option<Arc<dyn GroupDefinition>> {
		self.chain.iter().find_map(|f| f.get_group(kind, name))
	}

	fn unknown(&self, message: String) {
		let kind = if self.strict_unknown {
			DiagnosticKind::LstError
		} else {
			DiagnosticKind::UnknownToken
		};
		self.report(kind, message);
	}

	/// Resolves `keyword` for the target's kind and parses `value` into it.
	///
	/// An unresolved keyword is reported and yields [`ParseResult::Fail`].
	pub fn process_token(&self, target: &mut CdomObject, keyword: &str, value: &str) -> ParseResult {
		let kind = target.kind();
		let Some(token) = self.token(kind, keyword) else {
			self.unknown(format!(
				"Illegal {kind} Token '{keyword}' '{value}' for {}",
				target.name()
			));
			return ParseResult::Fail;
		};
		let result = token.parse(self, target, value);
		if result.is_fail() {
			tracing::trace!(token = token.impl_name(), %keyword, %value, "token rejected value");
		}
		result
	}

	/// Resolves (`parent`, `sub`) for the target's kind and parses `value` into it.
	pub fn process_sub_token(
		&self,
		target: &mut CdomObject,
		parent: &str,
		sub: &str,
		value: &str,
	) -> ParseResult {
		let kind = target.kind();
		let Some(token) = self.sub_token(kind, parent, sub) else {
			self.unknown(format!(
				"Illegal {kind} Sub-Token '{parent}:{sub}' '{value}' for {}",
				target.name()
			));
			return ParseResult::Fail;
		};
		token.parse(self, target, value)
	}

	/// Parses a clause such as `PRETYPE:1,Weapon` or `!PRETYPE:1,Armor`.
	///
	/// A leading `!` inverts the clause; the `PRE` prefix on the kind is optional.
	pub fn parse_prerequisite(
		&self,
		text: &str,
		override_qualify: bool,
	) -> Result<Prerequisite, PrerequisiteError> {
		let (invert, clause) = match text.strip_prefix('!') {
			Some(rest) => (true, rest),
			None => (false, text),
		};
		let Some((head, formula)) = clause.split_once(':') else {
			return Err(PrerequisiteError::MissingSeparator(text.to_string()));
		};
		let kind = strip_pre(head);
		let parser = self
			.prerequisite_parser(kind)
			.ok_or_else(|| PrerequisiteError::UnknownKind(kind.to_string()))?;
		parser.parse(kind, formula, invert, override_qualify)
	}

	/// Renders every token value stored on `target` as `KEY:value`, sorted by keyword.
	///
	/// A keyword present in several families of the chain is rendered by the
	/// first, matching [`Self::token`].
	pub fn unparse(&self, target: &CdomObject) -> Vec<String> {
		let mut tokens: BTreeMap<String, Arc<dyn PrimaryToken>> = BTreeMap::new();
		for family in &self.chain {
			for token in family.get_tokens(target.kind()) {
				tokens.entry(token.token_name().to_string()).or_insert(token);
			}
		}

		let mut lines = Vec::new();
		for (name, token) in tokens {
			if let Some(values) = token.unparse(self, target) {
				lines.extend(values.into_iter().map(|v| format!("{name}:{v}")));
			}
		}
		lines
	}

	/// Deferred processors of every family in the chain, in chain then registration order.
	pub fn deferred_tokens(&self) -> Vec<Arc<dyn DeferredToken>> {
		self.chain
			.iter()
			.flat_map(|f| f.get_deferred_tokens())
			.collect()
	}

	/// Runs each deferred processor over every stored object of its kind.
	///
	/// All processors run even after a failure. Returns false if any failed.
	pub fn resolve_deferred(&self, store: &mut ObjectStore) -> bool {
		let mut ok = true;
		for processor in self.deferred_tokens() {
			let kind = processor.deferred_kind();
			for id in store.ids_of_kind(kind) {
				if !processor.process(self, store, &id) {
					tracing::debug!(processor = processor.name(), object = %id, "deferred processing failed");
					ok = false;
				}
			}
		}
		ok
	}

	/// Evaluates the group `name` for `kind` against `store`.
	///
	/// Returns `None` if no family in the chain defines the group or the
	/// definition rejects `selector`.
	pub fn group(
		&self,
		store: &ObjectStore,
		kind: EntityKind,
		name: &str,
		selector: &str,
	) -> Option<ObjectContainer> {
		self.group_definition(kind, name)?
			.object_container(store, selector)
	}
}

fn strip_pre(head: &str) -> &str {
	match head.get(..3) {
		Some(prefix) if prefix.eq_ignore_ascii_case("PRE") && head.len() > 3 => &head[3..],
		_ => head,
	}
}

impl std::fmt::Debug for LoadContext<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LoadContext")
			.field("revision", &self.revision)
			.field(
				"chain",
				&self.chain.iter().map(|family| family.revision()).collect::<Vec<_>>(),
			)
			.field("strict_unknown", &self.strict_unknown)
			.finish_non_exhaustive()
	}
}

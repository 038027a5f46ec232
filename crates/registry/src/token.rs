//! Token contracts.
//!
//! Four capability variants register into a [`TokenFamily`]:
//!
//! | Contract | Catalog key |
//! |----------|-------------|
//! | [`PrimaryToken`] | entity kind + keyword (exact case) |
//! | [`SecondaryToken`] | entity kind + parent keyword + sub-keyword (case-insensitive) |
//! | [`PrerequisiteParser`] | each alias it handles (case-insensitive) |
//! | [`DeferredToken`] | none; an ordered list |
//!
//! [`GroupDefinition`] is a fifth, independent catalog entry keyed by entity
//! kind + group name (case-insensitive).
//!
//! Parse failures are signalled through [`ParseResult`], never through panics
//! or errors: the interpretation loop always continues with the next line.
//!
//! [`TokenFamily`]: crate::TokenFamily
//! [`PrerequisiteParser`]: crate::PrerequisiteParser

use rulebook_primitives::{CdomObject, EntityKind, ObjectContainer, ObjectId, ObjectStore};

use crate::LoadContext;

/// Outcome of a parse contract.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseResult {
	/// The value was accepted and written to the target.
	Pass,
	/// The value was rejected; the target is unchanged.
	Fail,
}

impl ParseResult {
	pub fn is_pass(self) -> bool {
		self == ParseResult::Pass
	}

	pub fn is_fail(self) -> bool {
		self == ParseResult::Fail
	}
}

impl From<bool> for ParseResult {
	fn from(passed: bool) -> Self {
		if passed { ParseResult::Pass } else { ParseResult::Fail }
	}
}

/// Behavior shared by primary tokens and sub-tokens.
pub trait CdomToken: Send + Sync {
	/// The keyword this token handles.
	fn token_name(&self) -> &str;

	/// Name of the implementing type, for registration diagnostics.
	fn impl_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// Parses `value` into `target`.
	///
	/// On [`ParseResult::Fail`] the target must be left unmodified.
	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult;
}

/// A token registered under (entity kind, keyword).
pub trait PrimaryToken: CdomToken {
	/// The entity kind this token applies to; `None` if it declares none.
	fn token_kind(&self) -> Option<EntityKind>;

	/// Renders the target's stored value back to data-file text.
	///
	/// Returns `None` when the target has nothing for this token.
	fn unparse(&self, ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>>;
}

/// A token registered under (entity kind, parent keyword, sub-keyword).
pub trait SecondaryToken: CdomToken {
	fn token_kind(&self) -> Option<EntityKind>;

	/// The keyword of the primary token that delegates to this one.
	fn parent_token(&self) -> &str;

	fn unparse(&self, ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>>;
}

/// A processor run once the whole data set has loaded, for cross-references.
pub trait DeferredToken: Send + Sync {
	fn name(&self) -> &str;

	fn impl_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// The kind of object this processor visits.
	fn deferred_kind(&self) -> EntityKind;

	/// Processes the object `id` with read access to every other loaded object.
	///
	/// Returns false if processing failed; a diagnostic should have been reported.
	fn process(&self, ctx: &LoadContext<'_>, store: &mut ObjectStore, id: &ObjectId) -> bool;
}

/// A rule producing a dynamically computed collection of loaded objects.
///
/// Evaluation must be idempotent and free of externally visible side effects;
/// concurrent readers may evaluate the same group redundantly.
pub trait GroupDefinition: Send + Sync {
	/// The kind of object this group collects.
	fn reference_kind(&self) -> EntityKind;

	/// The group name, matched case-insensitively.
	fn primitive_name(&self) -> &str;

	fn impl_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// Builds the container selected by `selector`, or `None` if the selector is invalid.
	fn object_container(&self, store: &ObjectStore, selector: &str) -> Option<ObjectContainer>;
}

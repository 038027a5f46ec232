//! Minimal token implementations for registry tests.

use std::sync::Arc;

use rulebook_primitives::{
	AttrValue, CdomObject, EntityKind, ObjectContainer, ObjectId, ObjectKey, ObjectStore,
};

use crate::prereq::{Prerequisite, PrerequisiteError, PrerequisiteOperator, PrerequisiteParser};
use crate::token::{
	CdomToken, DeferredToken, GroupDefinition, ParseResult, PrimaryToken, SecondaryToken,
};
use crate::LoadContext;

/// Writes its value into [`ObjectKey::Description`] prefixed with `tag`.
pub struct TextToken {
	pub name: &'static str,
	pub kind: Option<EntityKind>,
	pub tag: &'static str,
}

impl CdomToken for TextToken {
	fn token_name(&self) -> &str {
		self.name
	}

	fn parse(&self, _ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		target.put(ObjectKey::Description, format!("{}{}", self.tag, value));
		ParseResult::Pass
	}
}

impl PrimaryToken for TextToken {
	fn token_kind(&self) -> Option<EntityKind> {
		self.kind
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		let text = target.get(ObjectKey::Description)?.as_text()?;
		Some(vec![text.trim_start_matches(self.tag).to_string()])
	}
}

pub fn text_token(name: &'static str, kind: Option<EntityKind>) -> Arc<TextToken> {
	Arc::new(TextToken { name, kind, tag: "" })
}

pub fn tagged_token(name: &'static str, kind: EntityKind, tag: &'static str) -> Arc<TextToken> {
	Arc::new(TextToken {
		name,
		kind: Some(kind),
		tag,
	})
}

/// Stores `parent|name|value` into [`ObjectKey::Description`].
pub struct PathSubToken {
	pub kind: Option<EntityKind>,
	pub parent: &'static str,
	pub name: &'static str,
}

impl CdomToken for PathSubToken {
	fn token_name(&self) -> &str {
		self.name
	}

	fn parse(&self, _ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		target.put(
			ObjectKey::Description,
			format!("{}|{}|{}", self.parent, self.name, value),
		);
		ParseResult::Pass
	}
}

impl SecondaryToken for PathSubToken {
	fn token_kind(&self) -> Option<EntityKind> {
		self.kind
	}

	fn parent_token(&self) -> &str {
		self.parent
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		target
			.get(ObjectKey::Description)
			.and_then(AttrValue::as_text)
			.map(|t| vec![t.to_string()])
	}
}

pub fn sub_token(kind: EntityKind, parent: &'static str, name: &'static str) -> Arc<PathSubToken> {
	Arc::new(PathSubToken {
		kind: Some(kind),
		parent,
		name,
	})
}

/// Accepts any formula; records which parser produced the clause in `keys[0]`.
pub struct AliasParser {
	pub aliases: &'static [&'static str],
	pub tag: &'static str,
}

impl PrerequisiteParser for AliasParser {
	fn kinds_handled(&self) -> &[&str] {
		self.aliases
	}

	fn parse(
		&self,
		kind: &str,
		formula: &str,
		invert: bool,
		override_qualify: bool,
	) -> Result<Prerequisite, PrerequisiteError> {
		if formula.is_empty() {
			return Err(PrerequisiteError::EmptyValue {
				kind: kind.to_string(),
			});
		}
		Ok(Prerequisite {
			kind: kind.to_string(),
			operator: if invert {
				PrerequisiteOperator::Lt
			} else {
				PrerequisiteOperator::Gteq
			},
			count: 1,
			keys: vec![self.tag.to_string(), formula.to_string()],
			negated: invert,
			override_qualify,
		})
	}
}

pub fn alias_parser(aliases: &'static [&'static str], tag: &'static str) -> Arc<AliasParser> {
	Arc::new(AliasParser { aliases, tag })
}

/// Appends its name to each visited object's description; fails on `fail_on`.
pub struct MarkDeferred {
	pub name: &'static str,
	pub kind: EntityKind,
	pub fail_on: Option<&'static str>,
}

impl DeferredToken for MarkDeferred {
	fn name(&self) -> &str {
		self.name
	}

	fn deferred_kind(&self) -> EntityKind {
		self.kind
	}

	fn process(&self, _ctx: &LoadContext<'_>, store: &mut ObjectStore, id: &ObjectId) -> bool {
		let Some(obj) = store.get_mut(id) else {
			return false;
		};
		if self.fail_on.is_some_and(|n| n.eq_ignore_ascii_case(obj.name())) {
			return false;
		}
		let mut text = obj
			.get(ObjectKey::Description)
			.and_then(AttrValue::as_text)
			.unwrap_or_default()
			.to_string();
		text.push_str(self.name);
		obj.put(ObjectKey::Description, text);
		true
	}
}

pub fn mark_deferred(name: &'static str, kind: EntityKind) -> Arc<MarkDeferred> {
	Arc::new(MarkDeferred {
		name,
		kind,
		fail_on: None,
	})
}

/// Collects every object of its kind.
pub struct AllGroup {
	pub kind: EntityKind,
	pub name: &'static str,
}

impl GroupDefinition for AllGroup {
	fn reference_kind(&self) -> EntityKind {
		self.kind
	}

	fn primitive_name(&self) -> &str {
		self.name
	}

	fn object_container(&self, store: &ObjectStore, selector: &str) -> Option<ObjectContainer> {
		Some(ObjectContainer::new(
			self.kind,
			format!("{}={}", self.name, selector),
			store.ids_of_kind(self.kind),
		))
	}
}

/// Collects nothing; distinct type so duplicate diagnostics name two implementations.
pub struct EmptyGroup {
	pub kind: EntityKind,
	pub name: &'static str,
}

impl GroupDefinition for EmptyGroup {
	fn reference_kind(&self) -> EntityKind {
		self.kind
	}

	fn primitive_name(&self) -> &str {
		self.name
	}

	fn object_container(&self, _store: &ObjectStore, selector: &str) -> Option<ObjectContainer> {
		Some(ObjectContainer::new(
			self.kind,
			format!("{}={}", self.name, selector),
			Vec::new(),
		))
	}
}

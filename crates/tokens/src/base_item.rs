//! `BASEITEM`: the equipment an item is derived from.
//!
//! The referenced item may appear later in the data set, so the reference is
//! stored as text and checked by [`BaseItemCheck`] once loading finishes.

use rulebook_primitives::{
	AttrValue, CdomObject, EntityKind, ObjectId, ObjectKey, ObjectStore,
};
use rulebook_registry::{CdomToken, DeferredToken, LoadContext, ParseResult, PrimaryToken};

#[derive(Debug, Clone, Copy, Default)]
pub struct BaseItemToken;

impl CdomToken for BaseItemToken {
	fn token_name(&self) -> &str {
		"BASEITEM"
	}

	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		if value.eq_ignore_ascii_case(target.name()) {
			ctx.lst_error(format!(
				"{} of {} may not refer to itself",
				self.token_name(),
				target.name()
			));
			return ParseResult::Fail;
		}
		target.put(ObjectKey::BaseItem, value);
		ParseResult::Pass
	}
}

impl PrimaryToken for BaseItemToken {
	fn token_kind(&self) -> Option<EntityKind> {
		Some(EntityKind::Equipment)
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		let base = target.get(ObjectKey::BaseItem).and_then(AttrValue::as_text)?;
		Some(vec![base.to_string()])
	}
}

/// Reports `BASEITEM` references to equipment that was never loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseItemCheck;

impl DeferredToken for BaseItemCheck {
	fn name(&self) -> &str {
		"BASEITEM"
	}

	fn deferred_kind(&self) -> EntityKind {
		EntityKind::Equipment
	}

	fn process(&self, ctx: &LoadContext<'_>, store: &mut ObjectStore, id: &ObjectId) -> bool {
		let Some(obj) = store.get(id) else {
			return true;
		};
		let Some(base) = obj.get(ObjectKey::BaseItem).and_then(AttrValue::as_text) else {
			return true;
		};
		if store.find(EntityKind::Equipment, base).is_some() {
			return true;
		}
		ctx.lst_error(format!(
			"Unable to find base item {base} for {}",
			obj.name()
		));
		false
	}
}

#[cfg(test)]
mod tests {
	use rulebook_registry::DiagnosticKind;

	use super::*;
	use crate::test_support::Harness;

	#[test]
	fn test_self_reference_rejected() {
		let harness = Harness::new();
		let ctx = harness.context();
		let mut eq = Harness::equipment("Longsword");

		assert!(BaseItemToken.parse(&ctx, &mut eq, "longsword").is_fail());
		assert!(eq.is_bare());
		assert_eq!(harness.sink.count(DiagnosticKind::LstError), 1);
	}

	#[test]
	fn test_check_resolves_forward_reference() {
		let harness = Harness::new();
		let ctx = harness.context();
		let mut store = ObjectStore::new();

		let mut masterwork = Harness::equipment("Masterwork Longsword");
		assert!(BaseItemToken.parse(&ctx, &mut masterwork, "Longsword").is_pass());
		let id = masterwork.id();
		store.insert(masterwork);
		assert!(!BaseItemCheck.process(&ctx, &mut store, &id));
		assert_eq!(harness.sink.count(DiagnosticKind::LstError), 1);

		store.insert(Harness::equipment("LONGSWORD"));
		assert!(BaseItemCheck.process(&ctx, &mut store, &id));
		assert_eq!(harness.sink.count(DiagnosticKind::LstError), 1);
	}

	#[test]
	fn test_check_ignores_items_without_base() {
		let harness = Harness::new();
		let ctx = harness.context();
		let mut store = ObjectStore::new();
		let rope = Harness::equipment("Rope");
		let id = rope.id();
		store.insert(rope);

		assert!(BaseItemCheck.process(&ctx, &mut store, &id));
		assert!(harness.sink.is_empty());
	}
}

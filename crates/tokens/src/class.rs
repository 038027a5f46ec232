//! Class tokens.
//!
//! 5.14 data also writes these on class-level lines; the bootstrap mirrors
//! them under `ClassLevel` in the 5.14 family.

use rulebook_primitives::{AttrValue, CdomObject, EntityKind, ObjectKey};
use rulebook_registry::{CdomToken, LoadContext, ParseResult, PrimaryToken};

/// `HD`: hit die size, a positive integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitDieToken;

impl CdomToken for HitDieToken {
	fn token_name(&self) -> &str {
		"HD"
	}

	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		match value.parse::<i64>() {
			Ok(die) if die > 0 => {
				target.put(ObjectKey::HitDie, die);
				ParseResult::Pass
			}
			_ => {
				ctx.lst_error(format!(
					"{} expected a positive integer for {}: {value}",
					self.token_name(),
					target.name()
				));
				ParseResult::Fail
			}
		}
	}
}

impl PrimaryToken for HitDieToken {
	fn token_kind(&self) -> Option<EntityKind> {
		Some(EntityKind::Class)
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		let die = target.get(ObjectKey::HitDie).and_then(AttrValue::as_int)?;
		Some(vec![die.to_string()])
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use rulebook_registry::DiagnosticKind;

	use super::*;
	use crate::test_support::Harness;

	#[test]
	fn test_hit_die() {
		let harness = Harness::new();
		let ctx = harness.context();
		let mut fighter = CdomObject::new(EntityKind::Class, "Fighter");

		assert!(HitDieToken.parse(&ctx, &mut fighter, "10").is_pass());
		assert_eq!(HitDieToken.unparse(&ctx, &fighter), Some(vec!["10".to_string()]));
	}

	#[rstest]
	#[case("0")]
	#[case("-4")]
	#[case("d8")]
	fn test_invalid_hit_die(#[case] value: &str) {
		let harness = Harness::new();
		let ctx = harness.context();
		let mut fighter = CdomObject::new(EntityKind::Class, "Fighter");

		assert!(HitDieToken.parse(&ctx, &mut fighter, value).is_fail());
		assert!(fighter.is_bare());
		assert_eq!(harness.sink.count(DiagnosticKind::LstError), 1);
	}
}

//! `COST`: equipment price in base currency units.

use rulebook_primitives::{AttrValue, CdomObject, EntityKind, ObjectKey};
use rulebook_registry::{CdomToken, LoadContext, ParseResult, PrimaryToken};

#[derive(Debug, Clone, Copy, Default)]
pub struct CostToken;

impl CdomToken for CostToken {
	fn token_name(&self) -> &str {
		"COST"
	}

	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		match value.parse::<i64>() {
			Ok(cost) if cost >= 0 => {
				target.put(ObjectKey::Cost, cost);
				ParseResult::Pass
			}
			Ok(_) => {
				ctx.lst_error(format!("{} may not be negative: {value}", self.token_name()));
				ParseResult::Fail
			}
			Err(_) => {
				ctx.lst_error(format!(
					"{} expected an integer value: {value}",
					self.token_name()
				));
				ParseResult::Fail
			}
		}
	}
}

impl PrimaryToken for CostToken {
	fn token_kind(&self) -> Option<EntityKind> {
		Some(EntityKind::Equipment)
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		let cost = target.get(ObjectKey::Cost).and_then(AttrValue::as_int)?;
		Some(vec![cost.to_string()])
	}
}

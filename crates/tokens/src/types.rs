//! `TYPE`: dot-separated equipment types.

use rulebook_primitives::{CdomObject, EntityKind, ObjectKey};
use rulebook_registry::{CdomToken, LoadContext, ParseResult, PrimaryToken};

const CLEAR: &str = ".CLEAR";

/// Appends types such as `Weapon.Melee.Simple` to the object's type list.
///
/// A leading `.CLEAR` discards previously stored types first. Types already
/// present (ignoring case) are not added twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeToken;

impl CdomToken for TypeToken {
	fn token_name(&self) -> &str {
		"TYPE"
	}

	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		let (clear, rest) = match value.strip_prefix(CLEAR) {
			Some("") => (true, None),
			Some(rest) if rest.starts_with('.') => (true, Some(&rest[1..])),
			_ => (false, Some(value)),
		};

		let mut types = if clear {
			Vec::new()
		} else {
			target.types().to_vec()
		};
		if let Some(rest) = rest {
			for ty in rest.split('.') {
				if ty.is_empty() {
					ctx.lst_error(format!(
						"{} arguments uses double separator '..' or starts/ends with '.': {value}",
						self.token_name()
					));
					return ParseResult::Fail;
				}
				if ty.eq_ignore_ascii_case("CLEAR") {
					ctx.lst_error(format!(
						"{} may only use .CLEAR at the start of its value: {value}",
						self.token_name()
					));
					return ParseResult::Fail;
				}
				if !types.iter().any(|t| t.eq_ignore_ascii_case(ty)) {
					types.push(ty.to_string());
				}
			}
		}

		if types.is_empty() {
			target.remove(ObjectKey::Types);
		} else {
			target.put(ObjectKey::Types, types);
		}
		ParseResult::Pass
	}
}

impl PrimaryToken for TypeToken {
	fn token_kind(&self) -> Option<EntityKind> {
		Some(EntityKind::Equipment)
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		let types = target.types();
		if types.is_empty() {
			return None;
		}
		Some(vec![types.join(".")])
	}
}

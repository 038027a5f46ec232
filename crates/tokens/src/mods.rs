//! `MODS`: whether equipment accepts modifiers.

use rulebook_primitives::{CdomObject, EntityKind, EqModControl, ObjectKey};
use rulebook_registry::{CdomToken, LoadContext, ParseResult, PrimaryToken};

/// Parses `REQUIRED`, `YES`, or `NO`.
///
/// Any other value is a data error. Legacy data is still accepted by its first
/// character (`R`, `Y`, or `N`, any case) after the error is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModsToken;

impl ModsToken {
	fn legacy(value: &str) -> Option<EqModControl> {
		match value.chars().next()?.to_ascii_uppercase() {
			'R' => Some(EqModControl::Required),
			'Y' => Some(EqModControl::Yes),
			'N' => Some(EqModControl::No),
			_ => None,
		}
	}
}

impl CdomToken for ModsToken {
	fn token_name(&self) -> &str {
		"MODS"
	}

	fn parse(&self, ctx: &LoadContext<'_>, target: &mut CdomObject, value: &str) -> ParseResult {
		if value.is_empty() {
			return ParseResult::Fail;
		}
		let control = match value.parse::<EqModControl>() {
			Ok(control) => control,
			Err(_) => {
				ctx.lst_error(format!(
					"Invalid Mod Control provided in {}: {value}",
					self.token_name()
				));
				let Some(control) = Self::legacy(value) else {
					return ParseResult::Fail;
				};
				control
			}
		};
		target.put(ObjectKey::ModControl, control);
		ParseResult::Pass
	}
}

impl PrimaryToken for ModsToken {
	fn token_kind(&self) -> Option<EntityKind> {
		Some(EntityKind::Equipment)
	}

	fn unparse(&self, _ctx: &LoadContext<'_>, target: &CdomObject) -> Option<Vec<String>> {
		target.mod_control().map(|control| vec![control.to_string()])
	}
}

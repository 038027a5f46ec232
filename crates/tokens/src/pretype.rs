//! `PRETYPE`: requires the object to carry some number of listed types.

use rulebook_primitives::CdomObject;
use rulebook_registry::{Prerequisite, PrerequisiteError, PrerequisiteOperator, PrerequisiteParser};

/// Parses `count,Type[,Type...]`, for example `PRETYPE:2,Weapon,Melee,Ranged`.
///
/// Each listed type may itself be dot-separated, in which case the object must
/// carry all of its parts for that key to match.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreTypeParser;

impl PreTypeParser {
	fn invalid(kind: &str, formula: &str, reason: &str) -> PrerequisiteError {
		PrerequisiteError::InvalidValue {
			kind: kind.to_string(),
			value: formula.to_string(),
			reason: reason.to_string(),
		}
	}
}

impl PrerequisiteParser for PreTypeParser {
	fn kinds_handled(&self) -> &[&str] {
		&["TYPE"]
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
		let mut parts = formula.split(',');
		let count = parts
			.next()
			.and_then(|c| c.parse::<u32>().ok())
			.filter(|c| *c > 0)
			.ok_or_else(|| Self::invalid(kind, formula, "count must be a positive integer"))?;

		let keys: Vec<String> = parts.map(str::to_string).collect();
		if keys.is_empty() {
			return Err(Self::invalid(kind, formula, "no types listed"));
		}
		if keys.iter().any(|k| k.is_empty() || k.split('.').any(str::is_empty)) {
			return Err(Self::invalid(kind, formula, "empty type name"));
		}
		if count as usize > keys.len() {
			return Err(Self::invalid(kind, formula, "count exceeds the number of types"));
		}

		let operator = if invert {
			PrerequisiteOperator::Gteq.invert()
		} else {
			PrerequisiteOperator::Gteq
		};
		Ok(Prerequisite {
			kind: "TYPE".to_string(),
			operator,
			count,
			keys,
			negated: invert,
			override_qualify,
		})
	}
}

/// Number of `prereq` keys whose every dot-separated part `obj` carries.
pub fn matched_types(prereq: &Prerequisite, obj: &CdomObject) -> u32 {
	let matched = prereq
		.keys
		.iter()
		.filter(|key| key.split('.').all(|ty| obj.is_type(ty)))
		.count();
	u32::try_from(matched).unwrap_or(u32::MAX)
}

/// Evaluates a `PRETYPE` clause against `obj`.
pub fn passes(prereq: &Prerequisite, obj: &CdomObject) -> bool {
	prereq.passes(matched_types(prereq, obj))
}

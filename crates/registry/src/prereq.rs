//! Prerequisite clauses and the parsers that build them.

use std::fmt;

/// Comparison applied between the number of matching keys and the required count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrerequisiteOperator {
	#[default]
	Gteq,
	Lt,
}

impl PrerequisiteOperator {
	/// Returns the operator with the opposite result.
	pub fn invert(self) -> Self {
		match self {
			Self::Gteq => Self::Lt,
			Self::Lt => Self::Gteq,
		}
	}

	pub fn evaluate(self, matched: u32, required: u32) -> bool {
		match self {
			Self::Gteq => matched >= required,
			Self::Lt => matched < required,
		}
	}
}

/// A parsed prerequisite clause such as `PRETYPE:1,Weapon,Armor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
	/// The clause kind as written after `PRE`, such as `TYPE`.
	pub kind: String,
	pub operator: PrerequisiteOperator,
	/// How many of `keys` must match.
	pub count: u32,
	pub keys: Vec<String>,
	/// Written with a leading `!`.
	pub negated: bool,
	/// Requested by the caller at parse time. Carried for callers that apply
	/// qualification overrides; [`Prerequisite::passes`] does not consult it.
	pub override_qualify: bool,
}

impl Prerequisite {
	/// Evaluates this clause given the number of keys that matched.
	pub fn passes(&self, matched: u32) -> bool {
		self.operator.evaluate(matched, self.count)
	}
}

impl fmt::Display for Prerequisite {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.negated {
			f.write_str("!")?;
		}
		write!(f, "PRE{}:{}", self.kind.to_uppercase(), self.count)?;
		for key in &self.keys {
			write!(f, ",{key}")?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrerequisiteError {
	#[error("prerequisite {0:?} has no ':' separating kind from value")]
	MissingSeparator(String),
	#[error("no prerequisite parser handles kind {0:?}")]
	UnknownKind(String),
	#[error("prerequisite {kind} has an empty value")]
	EmptyValue { kind: String },
	#[error("prerequisite {kind} has invalid value {value:?}: {reason}")]
	InvalidValue {
		kind: String,
		value: String,
		reason: String,
	},
}

/// Parses prerequisite clauses for one or more kind aliases.
pub trait PrerequisiteParser: Send + Sync {
	/// Kind aliases this parser handles, such as `["TYPE"]`.
	fn kinds_handled(&self) -> &[&str];

	fn impl_name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// Parses `formula` (the text after `PREKIND:`).
	fn parse(
		&self,
		kind: &str,
		formula: &str,
		invert: bool,
		override_qualify: bool,
	) -> Result<Prerequisite, PrerequisiteError>;
}

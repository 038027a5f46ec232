//! Data-format revision identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable, totally ordered version identifier of the data language.
///
/// Ordering compares `primary`, then `secondary`, then `tertiary`; field
/// declaration order makes the derived [`Ord`] do exactly that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision {
	primary: i32,
	secondary: i32,
	tertiary: i32,
}

impl Revision {
	/// The revision of the running engine. Sorts after every other revision.
	pub const CURRENT: Revision = Revision::new(i32::MAX, 0, 0);

	/// The 5.14 compatibility revision. Sorts before every other 5.14.x revision.
	pub const REV514: Revision = Revision::new(5, 14, i32::MIN);

	/// Creates a revision from its three components.
	pub const fn new(primary: i32, secondary: i32, tertiary: i32) -> Self {
		Self {
			primary,
			secondary,
			tertiary,
		}
	}

	pub const fn primary(self) -> i32 {
		self.primary
	}

	pub const fn secondary(self) -> i32 {
		self.secondary
	}

	pub const fn tertiary(self) -> i32 {
		self.tertiary
	}
}

impl fmt::Display for Revision {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.primary, self.secondary, self.tertiary)
	}
}

/// Error returned when a textual revision cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevisionParseError {
	#[error("empty revision")]
	Empty,
	#[error("revision {input:?} has {count} components; expected 2 or 3")]
	ComponentCount { input: String, count: usize },
	#[error("revision {input:?} has non-numeric component {component:?}")]
	Component { input: String, component: String },
}

impl FromStr for Revision {
	type Err = RevisionParseError;

	/// Parses `"p.s.t"`, `"p.s"` (tertiary 0), or `"CURRENT"` (any case).
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		if trimmed.is_empty() {
			return Err(RevisionParseError::Empty);
		}
		if trimmed.eq_ignore_ascii_case("current") {
			return Ok(Revision::CURRENT);
		}

		let parts: Vec<&str> = trimmed.split('.').collect();
		if !(2..=3).contains(&parts.len()) {
			return Err(RevisionParseError::ComponentCount {
				input: trimmed.to_string(),
				count: parts.len(),
			});
		}

		let mut components = [0i32; 3];
		for (slot, part) in components.iter_mut().zip(&parts) {
			*slot = part.parse().map_err(|_| RevisionParseError::Component {
				input: trimmed.to_string(),
				component: (*part).to_string(),
			})?;
		}
		Ok(Revision::new(components[0], components[1], components[2]))
	}
}

impl Serialize for Revision {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for Revision {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		text.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests;

//! Case-folded lookup keys.

use std::fmt;

/// A string key compared without regard to case.
///
/// The folded form is computed once at construction, so hashing and equality
/// are plain string operations. [`Folded::original`] keeps the text as first
/// supplied for diagnostics.
#[derive(Clone)]
pub struct Folded {
	folded: Box<str>,
	original: Box<str>,
}

impl Folded {
	pub fn new(text: &str) -> Self {
		Self {
			folded: text.to_lowercase().into_boxed_str(),
			original: text.into(),
		}
	}

	/// The case-folded form used for comparison.
	pub fn as_str(&self) -> &str {
		&self.folded
	}

	/// The text this key was built from.
	pub fn original(&self) -> &str {
		&self.original
	}
}

impl PartialEq for Folded {
	fn eq(&self, other: &Self) -> bool {
		self.folded == other.folded
	}
}

impl Eq for Folded {}

impl std::hash::Hash for Folded {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.folded.hash(state);
	}
}

impl PartialOrd for Folded {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Folded {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.folded.cmp(&other.folded)
	}
}

impl From<&str> for Folded {
	fn from(text: &str) -> Self {
		Folded::new(text)
	}
}

impl fmt::Debug for Folded {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Folded").field(&self.original).finish()
	}
}

impl fmt::Display for Folded {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.original)
	}
}

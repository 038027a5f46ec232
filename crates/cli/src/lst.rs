//! Reader for tab-separated record files.
//!
//! Each non-blank line not starting with `#` is one record: the object name,
//! then tab-separated `KEY:value` fields. Runs of tabs count as one separator.
//! A name ending in `.MOD` modifies a previously loaded object.

const MOD_SUFFIX: &str = ".MOD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
	Token { key: &'a str, value: &'a str },
	/// A field with no `:` separator.
	Malformed(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
	/// 1-based line number.
	pub line: usize,
	pub name: &'a str,
	/// True for `.MOD` records; `name` has the suffix removed.
	pub modify: bool,
	pub fields: Vec<Field<'a>>,
}

pub fn records(text: &str) -> impl Iterator<Item = Record<'_>> {
	text.lines().enumerate().filter_map(|(idx, line)| {
		let trimmed = line.trim();
		if trimmed.is_empty() || trimmed.starts_with('#') {
			return None;
		}
		let mut parts = trimmed.split('\t').map(str::trim).filter(|p| !p.is_empty());
		let head = parts.next()?;
		let (name, modify) = match head.strip_suffix(MOD_SUFFIX) {
			Some(base) => (base, true),
			None => (head, false),
		};
		let fields = parts
			.map(|part| match part.split_once(':') {
				Some((key, value)) => Field::Token { key, value },
				None => Field::Malformed(part),
			})
			.collect();
		Some(Record {
			line: idx + 1,
			name,
			modify,
			fields,
		})
	})
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_skips_blank_and_comments() {
		let text = "# header\n\n   \nRope\tCOST:1\n";
		let parsed: Vec<_> = records(text).collect();
		assert_eq!(parsed.len(), 1);
		assert_eq!(parsed[0].line, 4);
		assert_eq!(parsed[0].name, "Rope");
	}

	#[test]
	fn test_fields_split_on_first_colon() {
		let text = "Longsword\t\tTYPE:Weapon.Melee\t\tDESC:a: b\tBROKEN";
		let record = records(text).next().unwrap();
		assert_eq!(
			record.fields,
			[
				Field::Token {
					key: "TYPE",
					value: "Weapon.Melee"
				},
				Field::Token {
					key: "DESC",
					value: "a: b"
				},
				Field::Malformed("BROKEN"),
			]
		);
		assert!(!record.modify);
	}

	#[test]
	fn test_mod_suffix() {
		let record = records("Longsword.MOD\tCOST:20").next().unwrap();
		assert_eq!(record.name, "Longsword");
		assert!(record.modify);
	}
}

//! Closed set of entity kinds that tokens target.

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// The kind of loaded object a token, sub-token, deferred processor, or group
/// definition applies to.
///
/// Registries key their catalogs by this tag, so the key space is fully known
/// at compile time. Textual names match the data-file object type names and
/// parse case-insensitively.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum EntityKind {
	Ability,
	AbilityCategory,
	Alignment,
	ArmorProf,
	Campaign,
	Class,
	ClassLevel,
	CompanionMod,
	Deity,
	Domain,
	Equipment,
	EquipmentModifier,
	Kit,
	Language,
	Race,
	ShieldProf,
	Skill,
	Spell,
	Stat,
	SubClass,
	Template,
	WeaponProf,
}

impl EntityKind {
	/// Returns the canonical name of this kind.
	pub fn as_str(self) -> &'static str {
		self.into()
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn test_names_round_trip() {
		for kind in EntityKind::iter() {
			assert_eq!(kind.as_str().parse::<EntityKind>(), Ok(kind));
			assert_eq!(kind.to_string(), kind.as_str());
		}
	}

	#[test]
	fn test_parse_ignores_ascii_case() {
		assert_eq!("equipment".parse::<EntityKind>(), Ok(EntityKind::Equipment));
		assert_eq!("CLASSLEVEL".parse::<EntityKind>(), Ok(EntityKind::ClassLevel));
		assert!("Widget".parse::<EntityKind>().is_err());
	}
}

//! Loaded objects and their keyed attribute store.

use rustc_hash::FxHashMap as HashMap;
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::{EntityKind, Folded};

/// Equipment modifier control stored by the `MODS` token.
///
/// Textual forms are the exact upper-case names; parsing is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum EqModControl {
	/// Equipment must carry at least one modifier.
	Required,
	/// Modifiers may be applied.
	Yes,
	/// Modifiers may not be applied.
	No,
}

/// Keys of the per-object attribute store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ObjectKey {
	/// [`AttrValue::ModControl`] written by `MODS`.
	ModControl,
	/// [`AttrValue::List`] of type names written by `TYPE`.
	Types,
	/// Free-form [`AttrValue::Text`].
	Description,
	/// [`AttrValue::Int`] cost in base currency units.
	Cost,
	/// [`AttrValue::Text`] naming another object resolved after load.
	BaseItem,
	/// [`AttrValue::Int`] hit die size of a class.
	HitDie,
}

/// The value stored under an [`ObjectKey`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	ModControl(EqModControl),
	List(Vec<String>),
	Text(String),
	Int(i64),
	Bool(bool),
}

impl AttrValue {
	pub fn as_mod_control(&self) -> Option<EqModControl> {
		match self {
			AttrValue::ModControl(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			AttrValue::List(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			AttrValue::Text(v) => Some(v),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			AttrValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			AttrValue::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the type name of this value.
	pub fn type_name(&self) -> &'static str {
		match self {
			AttrValue::ModControl(_) => "mod-control",
			AttrValue::List(_) => "list",
			AttrValue::Text(_) => "text",
			AttrValue::Int(_) => "int",
			AttrValue::Bool(_) => "bool",
		}
	}
}

impl From<EqModControl> for AttrValue {
	fn from(v: EqModControl) -> Self {
		AttrValue::ModControl(v)
	}
}

impl From<Vec<String>> for AttrValue {
	fn from(v: Vec<String>) -> Self {
		AttrValue::List(v)
	}
}

impl From<String> for AttrValue {
	fn from(v: String) -> Self {
		AttrValue::Text(v)
	}
}

impl From<&str> for AttrValue {
	fn from(v: &str) -> Self {
		AttrValue::Text(v.to_string())
	}
}

impl From<i64> for AttrValue {
	fn from(v: i64) -> Self {
		AttrValue::Int(v)
	}
}

impl From<bool> for AttrValue {
	fn from(v: bool) -> Self {
		AttrValue::Bool(v)
	}
}

/// Identity of a loaded object: its kind plus its case-folded key name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
	pub kind: EntityKind,
	pub key: Folded,
}

impl ObjectId {
	pub fn new(kind: EntityKind, key: &str) -> Self {
		Self {
			kind,
			key: Folded::new(key),
		}
	}
}

impl std::fmt::Display for ObjectId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.kind, self.key)
	}
}

/// An object under construction or already loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CdomObject {
	kind: EntityKind,
	name: String,
	attrs: HashMap<ObjectKey, AttrValue>,
}

impl CdomObject {
	pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
		Self {
			kind,
			name: name.into(),
			attrs: HashMap::default(),
		}
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn id(&self) -> ObjectId {
		ObjectId::new(self.kind, &self.name)
	}

	pub fn get(&self, key: ObjectKey) -> Option<&AttrValue> {
		self.attrs.get(&key)
	}

	/// Stores `value` under `key`, returning the previous value.
	pub fn put(&mut self, key: ObjectKey, value: impl Into<AttrValue>) -> Option<AttrValue> {
		self.attrs.insert(key, value.into())
	}

	pub fn remove(&mut self, key: ObjectKey) -> Option<AttrValue> {
		self.attrs.remove(&key)
	}

	pub fn contains(&self, key: ObjectKey) -> bool {
		self.attrs.contains_key(&key)
	}

	/// Returns true if no attributes have been stored.
	pub fn is_bare(&self) -> bool {
		self.attrs.is_empty()
	}

	pub fn mod_control(&self) -> Option<EqModControl> {
		self.get(ObjectKey::ModControl).and_then(AttrValue::as_mod_control)
	}

	pub fn types(&self) -> &[String] {
		self.get(ObjectKey::Types)
			.and_then(AttrValue::as_list)
			.unwrap_or(&[])
	}

	/// Returns true if any stored type equals `ty`, ignoring case.
	pub fn is_type(&self, ty: &str) -> bool {
		self.types().iter().any(|t| t.eq_ignore_ascii_case(ty))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mod_control_text_is_exact() {
		assert_eq!(EqModControl::Required.to_string(), "REQUIRED");
		assert_eq!("YES".parse::<EqModControl>(), Ok(EqModControl::Yes));
		assert!("yes".parse::<EqModControl>().is_err());
		assert!("Req".parse::<EqModControl>().is_err());
	}

	#[test]
	fn test_put_returns_previous() {
		let mut obj = CdomObject::new(EntityKind::Equipment, "Longsword");
		assert!(obj.is_bare());
		assert_eq!(obj.put(ObjectKey::ModControl, EqModControl::Yes), None);
		assert_eq!(
			obj.put(ObjectKey::ModControl, EqModControl::No),
			Some(AttrValue::ModControl(EqModControl::Yes))
		);
		assert_eq!(obj.mod_control(), Some(EqModControl::No));
	}

	#[test]
	fn test_type_queries() {
		let mut obj = CdomObject::new(EntityKind::Equipment, "Dagger");
		assert!(obj.types().is_empty());
		obj.put(ObjectKey::Types, vec!["Weapon".to_string(), "Melee".to_string()]);
		assert!(obj.is_type("weapon"));
		assert!(!obj.is_type("Armor"));
	}

	#[test]
	fn test_id_folds_name() {
		let a = CdomObject::new(EntityKind::Skill, "Climb");
		let b = CdomObject::new(EntityKind::Skill, "CLIMB");
		assert_eq!(a.id(), b.id());
		assert_ne!(a.id(), CdomObject::new(EntityKind::Spell, "Climb").id());
	}
}

//! `TYPE=` group of equipment.

use rulebook_primitives::{EntityKind, ObjectContainer, ObjectStore};
use rulebook_registry::GroupDefinition;

/// Selects equipment carrying every type in a dot-separated selector, such as
/// `TYPE=Weapon.Melee`. Type comparison ignores case.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeGroup;

impl GroupDefinition for TypeGroup {
	fn reference_kind(&self) -> EntityKind {
		EntityKind::Equipment
	}

	fn primitive_name(&self) -> &str {
		"TYPE"
	}

	fn object_container(&self, store: &ObjectStore, selector: &str) -> Option<ObjectContainer> {
		let required: Vec<&str> = selector.split('.').collect();
		if required.iter().any(|ty| ty.is_empty()) {
			return None;
		}
		let members = store
			.of_kind(EntityKind::Equipment)
			.filter(|obj| required.iter().all(|ty| obj.is_type(ty)))
			.map(|obj| obj.id())
			.collect();
		Some(ObjectContainer::new(
			EntityKind::Equipment,
			format!("TYPE={selector}"),
			members,
		))
	}
}

#[cfg(test)]
mod tests {
	use rulebook_primitives::{CdomObject, ObjectId, ObjectKey};

	use super::*;

	fn item(kind: EntityKind, name: &str, types: &[&str]) -> CdomObject {
		let mut obj = CdomObject::new(kind, name);
		obj.put(
			ObjectKey::Types,
			types.iter().map(|t| t.to_string()).collect::<Vec<_>>(),
		);
		obj
	}

	fn store() -> ObjectStore {
		let mut store = ObjectStore::new();
		store.insert(item(EntityKind::Equipment, "Longsword", &["Weapon", "Melee"]));
		store.insert(item(EntityKind::Equipment, "Longbow", &["Weapon", "Ranged"]));
		store.insert(item(EntityKind::Equipment, "Chain Shirt", &["Armor", "Light"]));
		store.insert(item(EntityKind::Skill, "Weapon Lore", &["Weapon"]));
		store
	}

	#[test]
	fn test_selects_by_every_type() {
		let store = store();

		let weapons = TypeGroup.object_container(&store, "weapon").unwrap();
		assert_eq!(weapons.len(), 2);
		assert!(weapons.contains(&ObjectId::new(EntityKind::Equipment, "Longbow")));
		assert_eq!(weapons.lst_format(), "TYPE=weapon");

		let melee = TypeGroup.object_container(&store, "Weapon.Melee").unwrap();
		assert_eq!(
			melee.members(),
			[ObjectId::new(EntityKind::Equipment, "Longsword")]
		);

		assert!(TypeGroup.object_container(&store, "Shield").unwrap().is_empty());
	}

	#[test]
	fn test_malformed_selector() {
		let store = store();
		assert!(TypeGroup.object_container(&store, "").is_none());
		assert!(TypeGroup.object_container(&store, "Weapon..Melee").is_none());
	}

	#[test]
	fn test_evaluation_is_idempotent() {
		let store = store();
		let first = TypeGroup.object_container(&store, "Weapon").unwrap();
		let second = TypeGroup.object_container(&store, "Weapon").unwrap();
		assert_eq!(first.members(), second.members());
		assert_eq!(store.len(), 4);
	}
}

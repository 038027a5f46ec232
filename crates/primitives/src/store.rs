//! Store of loaded objects and computed object groupings.

use indexmap::IndexMap;

use crate::{CdomObject, EntityKind, ObjectId};

/// Insertion-ordered store of loaded objects keyed by [`ObjectId`].
#[derive(Debug, Clone, Default)]
pub struct ObjectStore {
	objects: IndexMap<ObjectId, CdomObject>,
}

impl ObjectStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts `object`, returning any object previously stored under the same id.
	///
	/// A replaced object keeps its original position in iteration order.
	pub fn insert(&mut self, object: CdomObject) -> Option<CdomObject> {
		self.objects.insert(object.id(), object)
	}

	pub fn get(&self, id: &ObjectId) -> Option<&CdomObject> {
		self.objects.get(id)
	}

	pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut CdomObject> {
		self.objects.get_mut(id)
	}

	/// Looks up an object by kind and name, ignoring case.
	pub fn find(&self, kind: EntityKind, name: &str) -> Option<&CdomObject> {
		self.objects.get(&ObjectId::new(kind, name))
	}

	pub fn contains(&self, id: &ObjectId) -> bool {
		self.objects.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CdomObject> {
		self.objects.values()
	}

	/// Iterates objects of one kind in insertion order.
	pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &CdomObject> {
		self.objects.values().filter(move |o| o.kind() == kind)
	}

	/// Returns the ids of every object of `kind`, in insertion order.
	pub fn ids_of_kind(&self, kind: EntityKind) -> Vec<ObjectId> {
		self.objects.keys().filter(|id| id.kind == kind).cloned().collect()
	}
}

/// A dynamically computed collection of loaded objects.
///
/// Produced by a group definition for a selector; holds references (ids)
/// rather than objects so it stays valid while the store is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectContainer {
	kind: EntityKind,
	lst_format: String,
	members: Vec<ObjectId>,
}

impl ObjectContainer {
	pub fn new(kind: EntityKind, lst_format: impl Into<String>, members: Vec<ObjectId>) -> Self {
		Self {
			kind,
			lst_format: lst_format.into(),
			members,
		}
	}

	pub fn kind(&self) -> EntityKind {
		self.kind
	}

	/// The data-file text that selects this group, such as `TYPE=Weapon`.
	pub fn lst_format(&self) -> &str {
		&self.lst_format
	}

	pub fn members(&self) -> &[ObjectId] {
		&self.members
	}

	pub fn contains(&self, id: &ObjectId) -> bool {
		self.members.contains(id)
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ObjectKey;

	#[test]
	fn test_insert_replaces_in_place() {
		let mut store = ObjectStore::new();
		store.insert(CdomObject::new(EntityKind::Equipment, "Club"));
		store.insert(CdomObject::new(EntityKind::Equipment, "Dagger"));

		let mut club = CdomObject::new(EntityKind::Equipment, "CLUB");
		club.put(ObjectKey::Cost, 0i64);
		let prior = store.insert(club);

		assert_eq!(prior.map(|o| o.name().to_string()), Some("Club".to_string()));
		let names: Vec<_> = store.iter().map(CdomObject::name).collect();
		assert_eq!(names, ["CLUB", "Dagger"]);
	}

	#[test]
	fn test_of_kind_filters() {
		let mut store = ObjectStore::new();
		store.insert(CdomObject::new(EntityKind::Equipment, "Club"));
		store.insert(CdomObject::new(EntityKind::Skill, "Climb"));
		store.insert(CdomObject::new(EntityKind::Equipment, "Dagger"));

		assert_eq!(store.of_kind(EntityKind::Equipment).count(), 2);
		assert_eq!(
			store.ids_of_kind(EntityKind::Skill),
			vec![ObjectId::new(EntityKind::Skill, "climb")]
		);
		assert!(store.find(EntityKind::Skill, "CLIMB").is_some());
		assert!(store.find(EntityKind::Equipment, "Climb").is_none());
	}

	#[test]
	fn test_container_membership() {
		let id = ObjectId::new(EntityKind::Equipment, "Club");
		let container = ObjectContainer::new(EntityKind::Equipment, "TYPE=Weapon", vec![id.clone()]);
		assert!(container.contains(&id));
		assert_eq!(container.len(), 1);
		assert_eq!(container.lst_format(), "TYPE=Weapon");
	}
}

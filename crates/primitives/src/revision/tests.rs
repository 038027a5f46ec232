use std::cmp::Ordering;

use proptest::prelude::*;

use super::*;

#[test]
fn test_component_order() {
	assert!(Revision::new(5, 14, 0) < Revision::new(5, 15, 0));
	assert!(Revision::new(5, 14, 9) < Revision::new(5, 15, -3));
	assert!(Revision::new(4, 99, 99) < Revision::new(5, 0, 0));
	assert!(Revision::new(5, 14, 1) > Revision::new(5, 14, 0));
}

#[test]
fn test_well_known_positions() {
	assert!(Revision::REV514 < Revision::new(5, 14, 0));
	assert!(Revision::REV514 > Revision::new(5, 13, i32::MAX));
	assert!(Revision::new(6, 8, 0) < Revision::CURRENT);
	assert!(Revision::new(i32::MAX - 1, i32::MAX, i32::MAX) < Revision::CURRENT);
}

#[test]
fn test_display_is_dotted_triple() {
	assert_eq!(Revision::new(5, 16, 2).to_string(), "5.16.2");
	assert_eq!(Revision::REV514.to_string(), "5.14.-2147483648");
}

#[test]
fn test_parse_forms() {
	assert_eq!("5.16.2".parse::<Revision>(), Ok(Revision::new(5, 16, 2)));
	assert_eq!("6.8".parse::<Revision>(), Ok(Revision::new(6, 8, 0)));
	assert_eq!(" current ".parse::<Revision>(), Ok(Revision::CURRENT));
	assert_eq!(
		Revision::REV514.to_string().parse::<Revision>(),
		Ok(Revision::REV514)
	);
}

#[test]
fn test_parse_errors() {
	assert_eq!("".parse::<Revision>(), Err(RevisionParseError::Empty));
	assert!(matches!(
		"5".parse::<Revision>(),
		Err(RevisionParseError::ComponentCount { count: 1, .. })
	));
	assert!(matches!(
		"5.1.2.3".parse::<Revision>(),
		Err(RevisionParseError::ComponentCount { count: 4, .. })
	));
	assert!(matches!(
		"5.x.0".parse::<Revision>(),
		Err(RevisionParseError::Component { component, .. }) if component == "x"
	));
}

#[test]
fn test_serde_uses_text_form() {
	#[derive(Debug, serde::Deserialize, serde::Serialize, PartialEq)]
	struct Doc {
		revision: Revision,
	}

	let doc: Doc = toml::from_str("revision = \"5.14.3\"").unwrap();
	assert_eq!(doc.revision, Revision::new(5, 14, 3));

	let text = toml::to_string(&doc).unwrap();
	assert_eq!(text.trim(), "revision = \"5.14.3\"");
}

fn revision() -> impl Strategy<Value = Revision> {
	(-3i32..3, -3i32..3, -3i32..3).prop_map(|(p, s, t)| Revision::new(p, s, t))
}

proptest! {
	#[test]
	fn prop_order_consistent_with_equality(a in revision(), b in revision()) {
		prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
		prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
	}

	#[test]
	fn prop_order_is_transitive(a in revision(), b in revision(), c in revision()) {
		if a < b && b < c {
			prop_assert!(a < c);
		}
	}

	#[test]
	fn prop_order_matches_component_tuple(a in revision(), b in revision()) {
		let ta = (a.primary(), a.secondary(), a.tertiary());
		let tb = (b.primary(), b.secondary(), b.tertiary());
		prop_assert_eq!(a.cmp(&b), ta.cmp(&tb));
	}

	#[test]
	fn prop_text_round_trip(p in any::<i32>(), s in any::<i32>(), t in any::<i32>()) {
		let rev = Revision::new(p, s, t);
		prop_assert_eq!(rev.to_string().parse::<Revision>(), Ok(rev));
	}
}

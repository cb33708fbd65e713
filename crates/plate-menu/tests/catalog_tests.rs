use plate_menu::{Catalog, OptionPath, Rupees};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_every_builtin_leaf_has_one_price() {
    let catalog = Catalog::builtin();
    for family in catalog.families() {
        family.validate().unwrap();
        for leaf in family.leaf_paths() {
            assert!(family.resolve_price(&leaf).is_ok(), "{}: {leaf}", family.id);
            assert!(!family.part_label(&leaf).is_empty());
        }
    }
}

#[test]
fn test_builtin_menu_prices() {
    let catalog = Catalog::builtin();
    let price = |family: &str, leaf: &str| {
        catalog
            .family(family)
            .unwrap()
            .resolve_price(&leaf.parse().unwrap())
            .unwrap()
    };
    assert_eq!(price("burger", "cutlets.long"), Rupees::new(290));
    assert_eq!(price("sandwich", "shami.4"), Rupees::new(330));
    assert_eq!(price("biryani", "full"), Rupees::new(350));
    assert_eq!(price("drink", "cold.less_sweet.large.plain"), Rupees::new(170));
}

#[test]
fn test_builtin_family_order() {
    let ids: Vec<_> = Catalog::builtin().families().map(|f| f.id.clone()).collect();
    assert_eq!(ids, vec!["burger", "sandwich", "biryani", "rice", "drink"]);
}

proptest! {
    #[test]
    fn prop_child_parent_inverse(
        segs in prop::collection::vec("[a-z_][a-z0-9_]{0,8}", 0..5),
        last in "[a-z0-9]{1,6}"
    ) {
        let path = OptionPath::new(segs);
        let child = path.child(last.clone());
        prop_assert_eq!(child.parent(), Some(path.clone()));
        prop_assert_eq!(child.last(), Some(last.as_str()));
        prop_assert!(path.is_ancestor_of(&child));
        prop_assert!(!child.is_ancestor_of(&path));
    }

    #[test]
    fn prop_display_parses_back(segs in prop::collection::vec("[a-z0-9_]{1,8}", 1..5)) {
        let path = OptionPath::new(segs);
        let parsed: OptionPath = path.to_string().parse().unwrap();
        prop_assert_eq!(parsed, path);
    }
}

use plate_config::{ConfigureError, ExtraScope, LinePart, Region};
use plate_menu::Rupees;
use plate_test_utils::{builder, builtin_catalog, configured_builder, path, small_catalog};
use pretty_assertions::assert_eq;

#[test]
fn test_burger_leaf_at_qty_two() {
    let catalog = builtin_catalog();
    let b = configured_builder(&catalog, "burger", "shami.round", 2);
    let item = b.compile().unwrap();

    assert_eq!(
        item.parts,
        vec![LinePart::new("Shami (round bun)", Rupees::new(270), 2)]
    );
    assert_eq!(item.subtotal(), Rupees::new(540));
}

#[test]
fn test_drink_with_topping() {
    let catalog = builtin_catalog();
    let mut b = builder(&catalog, "drink");
    b.select(&path("hot")).unwrap();
    b.select(&path("hot.sweet")).unwrap();
    b.select(&path("hot.sweet.large")).unwrap();
    b.select(&path("hot.sweet.large.with_topping")).unwrap();
    b.increment(&path("hot.sweet.large.with_topping")).unwrap();

    let item = b.compile().unwrap();
    assert_eq!(
        item.parts,
        vec![LinePart::new("Hot Sweet Large (With topping)", Rupees::new(150), 1)]
    );
    assert_eq!(item.extras, vec![LinePart::new("Topping", Rupees::new(50), 1)]);
    assert_eq!(item.subtotal(), Rupees::new(200));
}

#[test]
fn test_deselecting_branch_blocks_add() {
    let catalog = builtin_catalog();
    let mut b = configured_builder(&catalog, "drink", "hot.sweet.large.with_topping", 1);
    assert!(b.visibility().add_action);

    b.deselect(&path("hot.sweet")).unwrap();

    assert!(!b.tree().is_selected(&path("hot.sweet.large")));
    assert_eq!(b.quantity(&path("hot.sweet.large.with_topping")), None);
    assert!(!b.visibility().add_action);
    assert!(matches!(
        b.finish(),
        Err(ConfigureError::NothingConfigured { .. })
    ));

    b.select(&path("hot.sweet")).unwrap();
    b.select(&path("hot.sweet.large")).unwrap();
    b.select(&path("hot.sweet.large.with_topping")).unwrap();
    assert_eq!(b.quantity(&path("hot.sweet.large.with_topping")), Some(0));
}

#[test]
fn test_sandwich_default_slices_and_switch() {
    let catalog = builtin_catalog();
    let mut b = builder(&catalog, "sandwich");
    b.select(&path("egg")).unwrap();
    assert!(b.tree().is_selected(&path("egg.3")));

    b.set_quantity(&path("egg.3"), 2.0).unwrap();
    b.select(&path("egg.4")).unwrap();
    assert!(!b.tree().is_selected(&path("egg.3")));
    assert_eq!(b.quantity(&path("egg.4")), Some(0));
    assert!(!b.visibility().add_action);

    b.increment(&path("egg.4")).unwrap();
    let item = b.compile().unwrap();
    assert_eq!(item.parts[0].label, "Egg - 4 slices");
    assert_eq!(item.parts[0].unit_price, Rupees::new(230));
}

#[test]
fn test_parallel_checkbox_subtrees() {
    let catalog = builtin_catalog();
    let mut b = configured_builder(&catalog, "burger", "shami.round", 1);
    b.select(&path("egg")).unwrap();
    b.select(&path("egg.long")).unwrap();
    b.increment(&path("egg.long")).unwrap();

    let item = b.compile().unwrap();
    let labels: Vec<_> = item.parts.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Shami (round bun)", "Egg (long bun)"]);
    assert_eq!(item.subtotal(), Rupees::new(480));
}

#[test]
fn test_local_extras_compile_after_parts() {
    let catalog = small_catalog();
    let mut b = configured_builder(&catalog, "rice", "chicken", 1);
    b.answer_extra(ExtraScope::Local, "raita", true).unwrap();
    b.increment_extra(ExtraScope::Local, "raita").unwrap();
    b.increment_extra(ExtraScope::Local, "raita").unwrap();

    let item = b.finish().unwrap();
    assert_eq!(
        item.extras,
        vec![LinePart::new("Extra raita", Rupees::new(50), 2)]
    );
    assert_eq!(item.subtotal(), Rupees::new(400));
    assert!(b.tree().is_empty());
}

#[test]
fn test_part_label_template_from_toml_menu() {
    let catalog = small_catalog();
    let mut b = configured_builder(&catalog, "tea", "hot.large", 2);
    let item = b.finish().unwrap();
    assert_eq!(item.name, "Tea");
    assert_eq!(
        item.parts,
        vec![LinePart::new("Hot tea (Large)", Rupees::new(150), 2)]
    );
    assert_eq!(item.subtotal(), Rupees::new(300));

    // switching size discards the previous leaf
    let mut b = configured_builder(&catalog, "tea", "hot.regular", 1);
    b.select(&path("hot.large")).unwrap();
    assert!(!b.tree().is_selected(&path("hot.regular")));
    assert!(matches!(b.finish(), Err(ConfigureError::NothingConfigured { .. })));
}

#[test]
fn test_extra_answered_no_has_no_quantity() {
    let catalog = small_catalog();
    let mut b = configured_builder(&catalog, "rice", "egg", 1);
    b.answer_extra(ExtraScope::Local, "raita", false).unwrap();
    assert!(matches!(
        b.increment_extra(ExtraScope::Local, "raita"),
        Err(ConfigureError::ExtraNotChosen { .. })
    ));
    assert!(matches!(
        b.answer_extra(ExtraScope::Local, "fries", true),
        Err(ConfigureError::UnknownExtra { .. })
    ));
}

#[test]
fn test_biryani_combo_reveals_post_combo_extras() {
    let catalog = builtin_catalog();
    let mut b = configured_builder(&catalog, "biryani", "full", 1);
    assert!(matches!(
        b.answer_extra(ExtraScope::PostCombo, "raita", true),
        Err(ConfigureError::RegionHidden { region: Region::PostComboExtras, .. })
    ));

    b.choose_combo(Some("with_drink")).unwrap();
    b.answer_extra(ExtraScope::PostCombo, "raita", true).unwrap();
    b.increment_extra(ExtraScope::PostCombo, "raita").unwrap();

    let item = b.compile().unwrap();
    let labels: Vec<_> = item.extras.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Combo: With cold drink", "Extra raita"]);
    assert_eq!(item.subtotal(), Rupees::new(400));
}

#[test]
fn test_unknown_combo_option() {
    let catalog = builtin_catalog();
    let mut b = configured_builder(&catalog, "burger", "egg.round", 1);
    assert!(matches!(
        b.choose_combo(Some("with_drink")),
        Err(ConfigureError::UnknownComboOption { .. })
    ));
}

//! The shop's built-in menu

use crate::price::PriceTable;
use crate::schema::{ComboDef, ExtraDef, FamilySchema, LevelDef, OptionDef, SelectorKind};

fn side_extras() -> [ExtraDef; 2] {
    [
        ExtraDef::new("raita", "Extra raita"),
        ExtraDef::new("salad", "Extra salad"),
    ]
}

fn fillings(id: &str, label: &str) -> LevelDef {
    LevelDef::new(id, label, SelectorKind::Checkbox)
        .with_option(OptionDef::new("shami", "Shami"))
        .with_option(OptionDef::new("cutlets", "Cutlets"))
        .with_option(OptionDef::new("egg", "Egg"))
}

fn burger() -> FamilySchema {
    let [raita, salad] = side_extras();
    FamilySchema::new("burger", "Burger")
        .with_level(fillings("patty", "Patty"))
        .with_level(
            LevelDef::new("bun", "Bun", SelectorKind::Select)
                .with_plain_options(&["round", "long"])
                .with_default("round"),
        )
        .with_extra(raita)
        .with_extra(salad)
        .with_part_label("{0} ({1} bun)")
        .with_prices(
            PriceTable::new()
                .with("shami.round", 270)
                .with("shami.long", 300)
                .with("cutlets.round", 260)
                .with("cutlets.long", 290)
                .with("egg.round", 180)
                .with("egg.long", 210),
        )
}

fn sandwich() -> FamilySchema {
    let [raita, salad] = side_extras();
    FamilySchema::new("sandwich", "Sandwich")
        .with_level(fillings("filling", "Filling"))
        .with_level(
            LevelDef::new("slices", "Slices", SelectorKind::Select)
                .with_plain_options(&["2", "3", "4"])
                .with_default("3"),
        )
        .with_extra(raita)
        .with_extra(salad)
        .with_part_label("{0} - {1} slices")
        .with_prices(
            PriceTable::new()
                .with("shami.2", 180)
                .with("shami.3", 250)
                .with("shami.4", 330)
                .with("cutlets.2", 170)
                .with("cutlets.3", 240)
                .with("cutlets.4", 320)
                .with("egg.2", 180)
                .with("egg.3", 200)
                .with("egg.4", 230),
        )
}

fn biryani() -> FamilySchema {
    let [raita, salad] = side_extras();
    FamilySchema::new("biryani", "Biryani")
        .with_level(
            LevelDef::new("plate", "Plate", SelectorKind::Checkbox)
                .with_option(OptionDef::new("half", "Half Plate"))
                .with_option(OptionDef::new("full", "Full Plate")),
        )
        .with_combo(ComboDef {
            options: vec![
                OptionDef::new("with_drink", "With cold drink"),
                OptionDef::new("with_shami", "With shami kabab"),
            ],
            extras: vec![raita, salad],
        })
        .with_prices(PriceTable::new().with("half", 200).with("full", 350))
}

fn rice() -> FamilySchema {
    let [raita, salad] = side_extras();
    FamilySchema::new("rice", "Chinese Rice")
        .with_level(
            LevelDef::new("dish", "Dish", SelectorKind::Checkbox)
                .with_option(OptionDef::new("chicken", "Chicken Fried Rice"))
                .with_option(OptionDef::new("egg", "Egg Fried Rice")),
        )
        .with_extra(raita)
        .with_extra(salad)
        .with_prices(PriceTable::new().with("chicken", 300).with("egg", 250))
}

fn drink() -> FamilySchema {
    let mut prices = PriceTable::new();
    for temperature in ["hot", "cold"] {
        for sweetness in ["sweet", "less_sweet"] {
            let (regular, large) = if temperature == "hot" { (100, 150) } else { (120, 170) };
            prices = prices
                .with(&format!("{temperature}.{sweetness}.regular"), regular)
                .with(&format!("{temperature}.{sweetness}.large"), large);
        }
    }

    FamilySchema::new("drink", "Drink")
        .with_level(
            LevelDef::new("temperature", "Temperature", SelectorKind::Checkbox)
                .with_option(OptionDef::new("hot", "Hot"))
                .with_option(OptionDef::new("cold", "Cold")),
        )
        .with_level(
            LevelDef::new("sweetness", "Sweetness", SelectorKind::Checkbox)
                .with_option(OptionDef::new("sweet", "Sweet"))
                .with_option(OptionDef::new("less_sweet", "Less sweet")),
        )
        .with_level(
            LevelDef::new("size", "Size", SelectorKind::Radio)
                .with_option(OptionDef::new("regular", "Regular"))
                .with_option(OptionDef::new("large", "Large")),
        )
        .with_level(
            LevelDef::new("topping", "Topping", SelectorKind::Radio)
                .with_option(OptionDef::new("plain", "No topping"))
                .with_option(OptionDef::new("with_topping", "With topping").with_extra("Topping"))
                .unkeyed(),
        )
        .with_part_label("{0} {1} {2} ({3})")
        .with_prices(prices)
}

/// Built-in families in display order
pub(crate) fn families() -> Vec<FamilySchema> {
    vec![burger(), sandwich(), biryani(), rice(), drink()]
}

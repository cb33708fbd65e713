use plate_config::{QtyDisplay, QuantityControl};
use plate_test_utils::{builtin_catalog, configured_builder, path};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Increment,
    Decrement,
    Set(f64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Increment),
        Just(Step::Decrement),
        (-10.0f64..50.0).prop_map(Step::Set),
    ]
}

proptest! {
    #[test]
    fn prop_quantity_tracks_model(steps in prop::collection::vec(step(), 0..40)) {
        let mut q = QuantityControl::new();
        let mut model: u32 = 0;
        for s in steps {
            match s {
                Step::Increment => {
                    let change = q.increment();
                    if model == 0 {
                        prop_assert_eq!(change.current, 1);
                    }
                    model += 1;
                }
                Step::Decrement => {
                    q.decrement();
                    model = model.saturating_sub(1);
                }
                Step::Set(n) => {
                    q.set_qty(n);
                    model = if n <= 0.0 { 0 } else { n.floor() as u32 };
                }
            }
            prop_assert_eq!(q.qty(), model);
            prop_assert_eq!(q.display() == QtyDisplay::Placeholder, model == 0);
        }
    }

    #[test]
    fn prop_subtotal_is_price_times_qty(qty in 1u32..100) {
        let catalog = builtin_catalog();
        let b = configured_builder(&catalog, "sandwich", "cutlets.2", qty);
        let item = b.compile().unwrap();
        prop_assert_eq!(item.subtotal().value(), 170 * u64::from(qty));
    }

    #[test]
    fn prop_add_action_follows_quantity(qty in 0u32..5) {
        let catalog = builtin_catalog();
        let mut b = configured_builder(&catalog, "rice", "egg", qty);
        prop_assert_eq!(b.visibility().add_action, qty > 0);
        prop_assert_eq!(b.compile().is_ok(), qty > 0);

        b.deselect(&path("egg")).unwrap();
        prop_assert!(!b.visibility().add_action);
    }
}

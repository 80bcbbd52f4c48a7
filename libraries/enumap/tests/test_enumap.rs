use enumap::EnuMap;

#[derive(EnuMap, Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    FirstSingular,
    SecondSingular,
    ThirdSingular,
}

const ESTAR: SlotMap<&str> = SlotMap {
    first_singular: "estoy",
    second_singular: "estás",
    third_singular: "está",
};

#[test]
fn test_lookup_in_const_table() {
    assert_eq!(ESTAR.get(&Slot::FirstSingular), &"estoy");
    assert_eq!(ESTAR.get(&Slot::SecondSingular), &"estás");
    assert_eq!(ESTAR.get(&Slot::ThirdSingular), &"está");
}

#[test]
fn test_all_lists_variants_in_declaration_order() {
    assert_eq!(
        Slot::ALL,
        [Slot::FirstSingular, Slot::SecondSingular, Slot::ThirdSingular]
    );
}

#[test]
fn test_get_mut() {
    let mut map = SlotMap {
        first_singular: 0,
        second_singular: 0,
        third_singular: 0,
    };

    *map.get_mut(&Slot::ThirdSingular) = 3;

    assert_eq!(map.get(&Slot::FirstSingular), &0);
    assert_eq!(map.get(&Slot::ThirdSingular), &3);
}

#[test]
fn test_from_fn_and_iter() {
    let map = SlotMap::from_fn(|slot| format!("{slot:?}").len());
    let collected: Vec<(Slot, usize)> = map.iter().map(|(slot, len)| (slot, *len)).collect();

    assert_eq!(
        collected,
        vec![
            (Slot::FirstSingular, 13),
            (Slot::SecondSingular, 14),
            (Slot::ThirdSingular, 13),
        ]
    );
}

#[test]
fn test_map_values() {
    let upper = ESTAR.map(|form| form.to_uppercase());
    assert_eq!(upper.get(&Slot::SecondSingular), "ESTÁS");
}

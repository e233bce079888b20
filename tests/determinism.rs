use brewmatch::{
    BrewMethod, KnnMatcher, LabeledFeature, Origin, Rating, Taste, TastingRecord, encode,
    euclidean_distance,
};

fn records() -> Vec<TastingRecord> {
    vec![
        TastingRecord::new(Origin::Honduras, BrewMethod::Siphon, Taste::Caramel, Rating::Four),
        TastingRecord::new(Origin::Jamaica, BrewMethod::Siphon, Taste::Default, Rating::Default),
        TastingRecord::new(Origin::Default, BrewMethod::Moka, Taste::Earthy, Rating::TwoHalf),
    ]
}

#[test]
fn equal_records_encode_bit_identically() {
    let a = encode(&records()).unwrap();
    let b = encode(&records()).unwrap();
    assert_eq!(a, b);
    assert_eq!(euclidean_distance(a.as_slice(), b.as_slice()).unwrap(), 0.0);
}

#[test]
fn free_text_fields_do_not_affect_encoding() {
    let plain = encode(&records()).unwrap();
    let annotated: Vec<TastingRecord> = records()
        .into_iter()
        .map(|r| r.with_description("notes").with_shop_name("Somewhere"))
        .collect();
    assert_eq!(plain, encode(&annotated).unwrap());
}

#[test]
fn distance_is_symmetric_over_encoded_users() {
    let users = [
        encode(&records()).unwrap(),
        encode(&records()[..1]).unwrap(),
        encode(&records()[1..]).unwrap(),
    ];
    for a in &users {
        for b in &users {
            assert_eq!(
                euclidean_distance(a.as_slice(), b.as_slice()).unwrap(),
                euclidean_distance(b.as_slice(), a.as_slice()).unwrap()
            );
        }
    }
}

#[test]
fn ranking_is_stable_across_runs() {
    let target = encode(&records()[..1]).unwrap();
    let set: Vec<LabeledFeature> = (0..32)
        .map(|i| {
            let all = records();
            LabeledFeature::new(format!("u{i}"), encode(&all[i % 3..]).unwrap())
        })
        .collect();

    let first = KnnMatcher::default().rank(&set, &target).unwrap();
    let second = KnnMatcher::default().rank(&set, &target).unwrap();
    assert_eq!(first, second);

    // Identical vectors keep input order.
    let positions: Vec<usize> = first
        .iter()
        .filter(|n| n.distance == first[0].distance)
        .map(|n| n.position)
        .collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

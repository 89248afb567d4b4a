//! End-to-end tests for quantifiers and approximate-reasoning queries.

use pretty_assertions::assert_eq;
use pruf_rs::{
    COMPATIBILITY_ATTRIBUTE, Domain, Error, FuzzyRelation, Logic, Particularization, TConorm,
    TNorm, Table, Tuple, Value, VirtualRelation, tuple,
};

fn rel(names: &[&str], entries: Vec<(Tuple, f64)>) -> FuzzyRelation {
    FuzzyRelation::from_entries(Domain::new(names.iter().copied()).unwrap(), entries).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// 1. Proportion
// ============================================================================

#[test]
fn test_proportion_scenario() {
    let a = rel(&["D"], vec![(tuple!["a"], 1.0)]);
    let b = rel(&["D"], vec![(tuple!["a"], 1.0), (tuple!["b"], 1.0)]);
    assert_eq!(a.proportion(&b, &Logic::default()).unwrap(), 0.5);
}

#[test]
fn test_proportion_over_empty_relation() {
    let a = rel(&["D"], vec![(tuple!["a"], 1.0)]);
    let empty = FuzzyRelation::new(Domain::new(["D"]).unwrap());
    let err = a.proportion(&empty, &Logic::default()).unwrap_err();
    assert!(matches!(err, Error::DivisionByZero(_)));
}

// ============================================================================
// 2. "Most people are tall": how true is it for this population?
// ============================================================================

#[test]
fn test_most_people_are_tall() {
    let people = FuzzyRelation::from_table(&Table::new(
        ["name", "height"],
        vec![
            vec![Value::from("ann"), Value::from(160)],
            vec![Value::from("bob"), Value::from(180)],
            vec![Value::from("cid"), Value::from(190)],
            vec![Value::from("dan"), Value::from(195)],
        ],
    ))
    .unwrap();
    let tall = VirtualRelation::new("height", |h: f64| (h - 170.0) / 20.0).unwrap();
    let most = VirtualRelation::new("ratio", |r: f64| (2.0 * r - 0.6).clamp(0.0, 1.0)).unwrap();

    let tall_people = people
        .particularize(&Particularization::new().fuzzy(["height"], &tall), &Logic::default())
        .unwrap();
    // 0.5 + 1.0 + 1.0 over 4 people
    let ratio = tall_people.proportion(&people, &Logic::default()).unwrap();
    assert!(close(ratio, 0.625));

    let truth = most.at(&Value::from(ratio));
    assert!(close(truth, 0.65));
}

// ============================================================================
// 3. Compatibility keeps the largest degree per attained value
// ============================================================================

#[test]
fn test_compatibility_max_not_sum() {
    let a = rel(&["age"], vec![(tuple![20], 0.4), (tuple![25], 0.7), (tuple![30], 0.2)]);
    let b = rel(&["age"], vec![(tuple![20], 0.8), (tuple![25], 0.8), (tuple![30], 1.0)]);

    let c = a.compatibility(&b).unwrap();
    assert_eq!(
        c,
        rel(&[COMPATIBILITY_ATTRIBUTE], vec![(tuple![0.8], 0.7), (tuple![1.0], 0.2)])
    );
}

// ============================================================================
// 4. Consistency and collapse
// ============================================================================

#[test]
fn test_consistency_is_height_of_intersection() {
    let a = rel(&["D"], vec![(tuple!["x"], 0.3), (tuple!["y"], 0.6)]);
    let b = rel(&["D"], vec![(tuple!["x"], 0.9), (tuple!["y"], 0.5)]);
    assert_eq!(a.consistency(&b, &Logic::default()).unwrap(), 0.5);

    let both = a.intersection(&b, &Logic::default()).unwrap();
    assert_eq!(both.collapse(&TConorm::Max), 0.5);
    assert_eq!(both.collapse(&TNorm::Min), 0.3);
}

// ============================================================================
// 5. Sigma counts and probability of a fuzzy event
// ============================================================================

#[test]
fn test_cardinality_and_probability() {
    let warm = rel(&["temp"], vec![(tuple![20], 0.5), (tuple![25], 1.0), (tuple![30], 0.5)]);
    assert_eq!(warm.cardinality(), 2.0);
    assert!(close(warm.mean_cardinality(), 2.0 / 3.0));

    // uniform over 20, 25, 30, 35
    let p = warm.probability(|_| 0.25);
    assert!(close(p, 0.5));
}

// ============================================================================
// 6. Tables round-trip through JSON
// ============================================================================

#[test]
fn test_table_json_round_trip() {
    let r = rel(&["name", "born"], vec![(tuple!["ann", 1990], 0.5), (tuple!["bob", 1985], 1.0)]);
    let json = r.to_table().to_json().unwrap();
    let back = FuzzyRelation::from_table(&Table::from_json(&json).unwrap()).unwrap();
    assert_eq!(back, r);
    assert_eq!(r.to_string(), "0.5/(\"ann\", 1990) + 1/(\"bob\", 1985)");

    // the membership column name can never collide with an attribute
    assert!(matches!(Domain::new(["name", "mu"]), Err(Error::InvalidDomain(_))));
    let twice = Table::new(["name", "mu", "mu"], vec![]);
    assert!(matches!(FuzzyRelation::from_table(&twice), Err(Error::InvalidTable(_))));
}

//! Relational operator tests

mod test_data_gen;

use relalg_core::prelude::*;
use relalg_operators::{self as ops, Algebra};
use test_data_gen::{csv, generate_people, ids, orders, people, people_with_mode, schema, relation};

#[test]
fn test_project_is_idempotent() {
    let rel = generate_people(50);
    let once = rel.project(&["name"]).unwrap();
    let twice = once.project(&["name"]).unwrap();
    let a: std::collections::HashSet<Row> = once.to_vec().unwrap().into_iter().collect();
    let b: std::collections::HashSet<Row> = twice.to_vec().unwrap().into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(once.cardinality().unwrap(), 7);
}

#[test]
fn test_project_set_and_bag_modes() {
    let rel = people(&[(1, "a"), (1, "b")]);

    let set = rel.project(&["id"]).unwrap();
    assert_eq!(ids(&set), vec![1]);

    let bag = rel.project_all(&["id"]).unwrap();
    assert_eq!(ids(&bag), vec![1, 1]);
    assert_eq!(bag.mode(), Mode::Bag);
}

#[test]
fn test_project_away_keeps_the_rest() {
    let rel = people(&[(1, "a")]);
    let away = rel.project_away(&["NAME"]).unwrap();
    assert_eq!(away.schema().len(), 1);
    assert!(away.schema().contains("id"));
    assert!(matches!(
        rel.project_away(&["age"]),
        Err(Error::UnknownColumn { .. })
    ));
}

#[test]
fn test_restrict_by_typed_accessor() {
    let rel = people(&[(1, "a"), (2, "b"), (3, "c")]);
    let out = rel.restrict(|r| Ok(r.get_i64("id")? > 1));
    assert_eq!(ids(&out), vec![2, 3]);
    assert_eq!(out.schema(), rel.schema());
}

#[test]
fn test_restrict_all_keeps_duplicates() {
    let rel = people_with_mode(&[(1, "a"), (1, "a"), (2, "b")], Mode::Bag);
    assert_eq!(ids(&rel.restrict_all(|_| Ok(true))), vec![1, 1, 2]);
    assert_eq!(ids(&rel.restrict(|_| Ok(true))), vec![1, 2]);
    assert_eq!(ids(&rel.restrict_away_all(|r| Ok(r.get_i64("id")? == 2))), vec![1, 1]);
}

#[test]
fn test_union_of_self_is_distinct() {
    let rel = people_with_mode(&[(1, "a"), (2, "b"), (1, "a")], Mode::Bag);
    let union = rel.union(&rel).unwrap();
    let distinct = rel.distinct();
    let a: std::collections::HashSet<Row> = union.to_vec().unwrap().into_iter().collect();
    let b: std::collections::HashSet<Row> = distinct.to_vec().unwrap().into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(union.cardinality().unwrap(), 2);
}

#[test]
fn test_union_all_doubles_rows() {
    let rel = generate_people(20);
    let count = rel.cardinality().unwrap();
    assert_eq!(rel.union_all(&rel).unwrap().cardinality().unwrap(), 2 * count);
}

#[test]
fn test_union_accepts_reordered_schema() {
    let a = csv("a", "id,name\n1,ann\n");
    let b = csv("b", "name,id\nbob,2\nann,1\n");
    let union = a.union(&b).unwrap();
    let rows = union.to_vec().unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        let names: Vec<&str> = row.schema().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name"]);
    }
}

#[test]
fn test_difference_of_self_is_empty() {
    let rel = generate_people(30);
    assert_eq!(rel.difference(&rel).unwrap().cardinality().unwrap(), 0);
}

#[test]
fn test_intersect_and_difference() {
    let a = people(&[(1, "a"), (2, "b"), (3, "c")]);
    let b = people(&[(2, "b"), (3, "x")]);
    assert_eq!(ids(&a.intersect(&b).unwrap()), vec![2]);
    assert_eq!(ids(&a.difference(&b).unwrap()), vec![1, 3]);
}

#[test]
fn test_set_operations_require_equal_schemas() {
    let a = people(&[(1, "a")]);
    let b = orders(&[(1, "pear")]);
    for result in [a.union(&b), a.intersect(&b), a.difference(&b), a.union_all(&b)] {
        match result {
            Err(Error::SchemaMismatch { left, right }) => {
                assert_eq!(left, "people");
                assert_eq!(right, "orders");
            }
            other => panic!("expected schema mismatch, got {:?}", other.map(|_| ())),
        }
    }
}

#[test]
fn test_natural_join_matches_on_common_columns() {
    let p = people(&[(1, "ann"), (2, "bob"), (3, "cy")]);
    let o = orders(&[(1, "apple"), (1, "pear"), (3, "plum"), (9, "fig")]);
    let joined = p.join(&o).unwrap();

    let names: Vec<&str> = joined.schema().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "item"]);

    let mut pairs: Vec<(String, String)> = joined
        .to_vec()
        .unwrap()
        .iter()
        .map(|r| (r.get_str("name").unwrap().to_string(), r.get_str("item").unwrap().to_string()))
        .collect();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("ann".to_string(), "apple".to_string()),
            ("ann".to_string(), "pear".to_string()),
            ("cy".to_string(), "plum".to_string()),
        ]
    );
}

#[test]
fn test_join_without_shared_values_is_empty() {
    let p = people(&[(1, "ann")]);
    let o = orders(&[(2, "pear")]);
    let joined = p.join(&o).unwrap();
    assert_eq!(joined.cardinality().unwrap(), 0);

    let expected = Schema::merge(p.schema(), o.schema(), "").unwrap();
    assert_eq!(**joined.schema(), expected);
}

#[test]
fn test_join_over_disjoint_schemas_fails() {
    let p = people(&[(1, "ann")]);
    let other = relation(
        schema("other", &[("z", DataType::Utf8)]),
        vec![vec![Value::from("q")]],
        Mode::Set,
    );
    assert!(matches!(p.join(&other), Err(Error::NoCommonColumns { .. })));
    assert!(matches!(p.semi_join(&other), Err(Error::NoCommonColumns { .. })));
    assert!(matches!(p.image(&other, "zs"), Err(Error::NoCommonColumns { .. })));
}

#[test]
fn test_semi_join_cardinality() {
    let p = generate_people(40);
    let o = orders(&[(1, "a"), (5, "b"), (5, "c"), (100, "d")]);
    let matched = p.semi_join(&o).unwrap();
    assert!(matched.cardinality().unwrap() <= p.cardinality().unwrap());
    assert_eq!(ids(&matched), vec![1, 5]);

    let every = p.semi_join(&p).unwrap();
    assert_eq!(every.cardinality().unwrap(), p.cardinality().unwrap());
}

#[test]
fn test_not_matching_complements_semi_join() {
    let p = generate_people(10);
    let o = orders(&[(1, "a"), (4, "b")]);
    let matched = ops::matching(&p, &o).unwrap().cardinality().unwrap();
    let unmatched = ops::semi_difference(&p, &o).unwrap().cardinality().unwrap();
    assert_eq!(matched + unmatched, 10);
    assert!(!ids(&p.not_matching(&o).unwrap()).contains(&4));
}

#[test]
fn test_image_groups_rows() {
    let p = people(&[(1, "ann"), (2, "bob")]);
    let o = orders(&[(1, "apple"), (1, "pear"), (1, "pear")]);
    let img = p.image(&o, "items").unwrap();

    let col = img.schema().lookup("items").unwrap();
    match &col.data_type {
        DataType::Relation(nested) => {
            assert_eq!(nested.len(), 1);
            assert!(nested.contains("item"));
        }
        other => panic!("expected a relation column, got {:?}", other),
    }

    let rows = img.to_vec().unwrap();
    let ann = rows.iter().find(|r| r.get_i64("id").unwrap() == 1).unwrap();
    let items = ann.get_relation("items").unwrap();
    assert_eq!(items.cardinality().unwrap(), 2);

    let bob = rows.iter().find(|r| r.get_i64("id").unwrap() == 2).unwrap();
    assert!(bob.get_relation("items").unwrap().is_empty());
}

#[test]
fn test_image_needs_extra_columns() {
    let p = people(&[(1, "ann")]);
    let keys = relation(
        schema("keys", &[("id", DataType::Int64)]),
        vec![vec![Value::I64(1)]],
        Mode::Set,
    );
    assert!(matches!(p.image(&keys, "x"), Err(Error::EmptySchema(_))));
    assert!(matches!(
        p.image(&orders(&[]), "name"),
        Err(Error::DuplicateColumn { .. })
    ));
}

#[test]
fn test_extend_and_rename_compose() {
    let rel = people(&[(1, "ann"), (2, "bob")]);
    let out = rel
        .extend("shout", |r| Ok(r.get_str("name")?.to_uppercase()))
        .unwrap()
        .rename(&[("shout", "loud"), ("name", "quiet")])
        .unwrap()
        .project(&["loud", "quiet"])
        .unwrap();
    let mut got: Vec<(String, String)> = out
        .to_vec()
        .unwrap()
        .iter()
        .map(|r| (r.get_str("quiet").unwrap().to_string(), r.get_str("LOUD").unwrap().to_string()))
        .collect();
    got.sort();
    assert_eq!(
        got,
        vec![
            ("ann".to_string(), "ANN".to_string()),
            ("bob".to_string(), "BOB".to_string())
        ]
    );
}

#[test]
fn test_order_by_then_page() {
    let rel = people(&[(3, "c"), (1, "a"), (5, "e"), (2, "b"), (4, "d")]);
    let sorted = rel.order_by(&["id"]).unwrap();
    let second_page = sorted.page(2, 1).unwrap();
    let got: Vec<i64> = second_page
        .to_vec()
        .unwrap()
        .iter()
        .map(|r| r.get_i64("id").unwrap())
        .collect();
    assert_eq!(got, vec![3, 4]);
}

#[test]
fn test_page_size_zero_is_invalid() {
    let rel = people(&[(1, "a")]);
    assert!(matches!(rel.page(0, 0), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_operators_re_enumerate() {
    let p = people(&[(1, "ann"), (2, "bob")]);
    let o = orders(&[(1, "apple")]);
    let joined = p.join(&o).unwrap();
    assert_eq!(joined.cardinality().unwrap(), 1);
    assert_eq!(joined.cardinality().unwrap(), 1);
}

#[test]
fn test_single_pass_source_needs_materialize() {
    let once = relalg_io::CsvReader::new("t")
        .from_reader("id\n1\n2\n".as_bytes())
        .unwrap();
    let filtered = once.restrict(|_| Ok(true));
    assert_eq!(filtered.cardinality().unwrap(), 2);
    assert!(matches!(filtered.cardinality(), Err(Error::Exhausted(_))));

    let again = relalg_io::CsvReader::new("t")
        .from_reader("id\n1\n2\n".as_bytes())
        .unwrap()
        .materialize()
        .unwrap();
    let filtered = again.restrict(|_| Ok(true));
    assert_eq!(filtered.cardinality().unwrap(), 2);
    assert_eq!(filtered.cardinality().unwrap(), 2);
}

#![forbid(unsafe_code)]
//! relalg-operators: relational algebra over `relalg_core` relations.
//!
//! Design intent:
//! - Every operator is a plain function taking `&RelationRef` and returning a
//!   new lazy relation; nothing is evaluated until the result is enumerated.
//! - Schema errors (unknown names, mismatched or disjoint schemas) are reported
//!   when the operator is built, not when rows are pulled.
//! - Set-mode results deduplicate; the `*_all` variants keep every row.
//! - Joins and set operations hash their second argument, so put the smaller
//!   relation there.

pub mod aggregate;
pub mod algebra;
pub mod extend;
pub mod join;
pub mod page;
pub mod project;
pub mod rename;
pub mod restrict;
pub mod set_ops;
pub mod sort;

pub use aggregate::sum;
pub use algebra::Algebra;
pub use extend::{extend, extend_with};
pub use join::hash::natural_join;
pub use join::image::image;
pub use join::join_columns;
pub use join::semi::{matching, not_matching, semi_difference, semi_join};
pub use page::{materialize, page};
pub use project::{project, project_all, project_away, project_away_all};
pub use rename::{rename, rename_all};
pub use restrict::{restrict, restrict_all, restrict_away, restrict_away_all};
pub use set_ops::{
    bag, difference, difference_all, distinct, intersect, intersect_all, union, union_all,
};
pub use sort::order_by;

use relalg_core::prelude::{Mode, RelationRef, Result};

/// Alias of `natural_join`.
pub fn join(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    natural_join(a, b)
}

/// True when `rel.rows()` cannot yield duplicates, so an operator that only
/// drops or decorates rows one-for-one can skip its own dedup pass.
pub(crate) fn yields_distinct(rel: &RelationRef) -> bool {
    rel.mode() == Mode::Set
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;

    use relalg_core::prelude::*;

    pub fn people_schema() -> SchemaRef {
        Schema::shared(
            "people",
            vec![
                Column::new("id", DataType::Int64),
                Column::new("name", DataType::Utf8),
            ],
        )
        .unwrap()
    }

    fn people_rows(rows: &[(i64, &str)]) -> Vec<Row> {
        let schema = people_schema();
        rows.iter()
            .map(|(id, name)| Row::new(schema.clone(), vec![Value::I64(*id), Value::from(*name)]).unwrap())
            .collect()
    }

    pub fn people(rows: &[(i64, &str)]) -> RelationRef {
        MaterializedRelation::from_rows(people_schema(), people_rows(rows), Mode::Set)
            .unwrap()
            .into_ref()
    }

    pub fn single_pass(rows: &[(i64, &str)]) -> RelationRef {
        let source: RowIter = Box::new(people_rows(rows).into_iter().map(Ok));
        Arc::new(SinglePassRelation::new(people_schema(), source))
    }

    pub fn ids(rel: &RelationRef) -> Vec<i64> {
        rel.to_vec()
            .unwrap()
            .iter()
            .map(|r| r.get_i64("id").unwrap())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use relalg_core::prelude::*;

    use super::test_util::{ids, people};
    use super::*;

    fn orders() -> RelationRef {
        let schema = Schema::shared(
            "orders",
            vec![
                Column::new("id", DataType::Int64),
                Column::new("item", DataType::Utf8),
            ],
        )
        .unwrap();
        let rows = [(1, "apple"), (1, "pear"), (3, "plum")]
            .iter()
            .map(|(id, item)| Row::new(schema.clone(), vec![Value::I64(*id), Value::from(*item)]).unwrap())
            .collect();
        MaterializedRelation::from_rows(schema, rows, Mode::Set)
            .unwrap()
            .into_ref()
    }

    #[test]
    fn restrict_and_its_complement_partition_rows() {
        let rel = people(&[(1, "a"), (2, "b"), (3, "c")]);
        assert_eq!(ids(&rel.restrict(|r| Ok(r.get_i64("id")? > 1))), vec![2, 3]);
        assert_eq!(ids(&rel.restrict_away(|r| Ok(r.get_i64("id")? > 1))), vec![1]);
    }

    #[test]
    fn predicate_errors_surface_as_items() {
        let rel = people(&[(1, "a")]);
        let bad = rel.restrict(|r| Ok(r.get_bool("name")?));
        assert!(matches!(bad.to_vec(), Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn project_set_vs_bag() {
        let rel = people(&[(1, "a"), (1, "b")]);
        assert_eq!(ids(&rel.project(&["id"]).unwrap()), vec![1]);
        assert_eq!(ids(&rel.project_all(&["id"]).unwrap()), vec![1, 1]);
        assert!(rel.project(&["nope"]).is_err());
    }

    #[test]
    fn extend_types_the_new_column() {
        let rel = people(&[(2, "a")]);
        let ext = rel
            .extend("double", |r| Ok(r.get_i64("id")? * 2))
            .unwrap();
        assert_eq!(ext.schema().lookup("double").unwrap().data_type, DataType::Int64);
        assert_eq!(ext.to_vec().unwrap()[0].get_i64("double").unwrap(), 4);
        assert!(matches!(
            rel.extend("ID", |_| Ok(0i64)),
            Err(Error::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn rename_rules() {
        let rel = people(&[(7, "x")]);
        let swapped = rel.rename(&[("id", "name"), ("name", "id")]).unwrap();
        let rows = swapped.to_vec().unwrap();
        let row = &rows[0];
        assert_eq!(row.get_i64("name").unwrap(), 7);
        assert_eq!(row.get_str("id").unwrap(), "x");

        assert!(matches!(
            rel.rename(&[("name", "ID")]),
            Err(Error::DuplicateColumn { .. })
        ));
        assert!(matches!(
            rel.rename(&[("age", "years")]),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            rel.rename(&[("id", "a"), ("ID", "b")]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn set_operations() {
        let a = people(&[(1, "a"), (2, "b")]);
        let b = people(&[(2, "b"), (3, "c")]);
        assert_eq!(a.union(&b).unwrap().cardinality().unwrap(), 3);
        assert_eq!(a.union_all(&b).unwrap().cardinality().unwrap(), 4);
        assert_eq!(ids(&a.intersect(&b).unwrap()), vec![2]);
        assert_eq!(ids(&a.difference(&b).unwrap()), vec![1]);
        assert!(matches!(a.union(&orders()), Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn joins() {
        let p = people(&[(1, "ann"), (2, "bob"), (3, "cy")]);
        let joined = p.join(&orders()).unwrap();
        assert_eq!(joined.schema().len(), 3);
        assert_eq!(joined.cardinality().unwrap(), 3);

        assert_eq!(ids(&p.semi_join(&orders()).unwrap()), vec![1, 3]);
        assert_eq!(ids(&p.not_matching(&orders()).unwrap()), vec![2]);
    }

    #[test]
    fn image_nests_matching_rows() {
        let p = people(&[(1, "ann"), (2, "bob")]);
        let img = p.image(&orders(), "items").unwrap();
        let rows = img.to_vec().unwrap();
        assert_eq!(rows[0].get_relation("items").unwrap().len(), 2);
        assert!(rows[1].get_relation("items").unwrap().is_empty());
    }

    #[test]
    fn disjoint_schemas_cannot_join() {
        let p = people(&[(1, "ann")]);
        let other = Schema::shared("o", vec![Column::new("z", DataType::Utf8)]).unwrap();
        let o: RelationRef = Arc::new(MaterializedRelation::from_rows(other, vec![], Mode::Set).unwrap());
        assert!(matches!(p.join(&o), Err(Error::NoCommonColumns { .. })));
    }
}

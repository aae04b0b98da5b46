//! Method-call surface over `RelationRef`, so operators chain:
//!
//! ```ignore
//! let adults = people.restrict(|r| Ok(r.get_i64("age")? >= 18)).project(&["name"])?;
//! ```

use relalg_core::prelude::*;

use crate::{
    bag, difference, difference_all, distinct, extend, extend_with, image, intersect, intersect_all,
    join, materialize, not_matching, order_by, page, project, project_all, project_away,
    project_away_all, rename, rename_all, restrict, restrict_all, restrict_away,
    restrict_away_all, semi_join, sum, union, union_all,
};

pub trait Algebra {
    fn restrict<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static;
    fn restrict_away<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static;
    fn restrict_all<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static;
    fn restrict_away_all<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static;

    fn project(&self, names: &[&str]) -> Result<RelationRef>;
    fn project_all(&self, names: &[&str]) -> Result<RelationRef>;
    fn project_away(&self, names: &[&str]) -> Result<RelationRef>;
    fn project_away_all(&self, names: &[&str]) -> Result<RelationRef>;

    fn extend<T, F>(&self, name: &str, f: F) -> Result<RelationRef>
    where
        T: IntoValue,
        F: Fn(&Row) -> Result<T> + Send + Sync + 'static;
    fn extend_with<F>(&self, column: Column, f: F) -> Result<RelationRef>
    where
        F: Fn(&Row) -> Result<Value> + Send + Sync + 'static;

    fn rename(&self, changes: &[(&str, &str)]) -> Result<RelationRef>;
    fn rename_all(&self, changes: &[(&str, &str)]) -> Result<RelationRef>;

    fn union(&self, other: &RelationRef) -> Result<RelationRef>;
    fn union_all(&self, other: &RelationRef) -> Result<RelationRef>;
    fn intersect(&self, other: &RelationRef) -> Result<RelationRef>;
    fn intersect_all(&self, other: &RelationRef) -> Result<RelationRef>;
    fn difference(&self, other: &RelationRef) -> Result<RelationRef>;
    fn difference_all(&self, other: &RelationRef) -> Result<RelationRef>;
    fn distinct(&self) -> RelationRef;
    fn bag(&self) -> RelationRef;

    fn join(&self, other: &RelationRef) -> Result<RelationRef>;
    fn semi_join(&self, other: &RelationRef) -> Result<RelationRef>;
    fn not_matching(&self, other: &RelationRef) -> Result<RelationRef>;
    fn image(&self, other: &RelationRef, name: &str) -> Result<RelationRef>;

    fn order_by(&self, names: &[&str]) -> Result<RelationRef>;
    fn page(&self, size: usize, page: usize) -> Result<RelationRef>;
    fn materialize(&self) -> Result<RelationRef>;

    fn sum(&self, name: &str) -> Result<f64>;
}

impl Algebra for RelationRef {
    fn restrict<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
    {
        restrict(self, predicate)
    }

    fn restrict_away<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
    {
        restrict_away(self, predicate)
    }

    fn restrict_all<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
    {
        restrict_all(self, predicate)
    }

    fn restrict_away_all<P>(&self, predicate: P) -> RelationRef
    where
        P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
    {
        restrict_away_all(self, predicate)
    }

    fn project(&self, names: &[&str]) -> Result<RelationRef> {
        project(self, names)
    }

    fn project_all(&self, names: &[&str]) -> Result<RelationRef> {
        project_all(self, names)
    }

    fn project_away(&self, names: &[&str]) -> Result<RelationRef> {
        project_away(self, names)
    }

    fn project_away_all(&self, names: &[&str]) -> Result<RelationRef> {
        project_away_all(self, names)
    }

    fn extend<T, F>(&self, name: &str, f: F) -> Result<RelationRef>
    where
        T: IntoValue,
        F: Fn(&Row) -> Result<T> + Send + Sync + 'static,
    {
        extend(self, name, f)
    }

    fn extend_with<F>(&self, column: Column, f: F) -> Result<RelationRef>
    where
        F: Fn(&Row) -> Result<Value> + Send + Sync + 'static,
    {
        extend_with(self, column, f)
    }

    fn rename(&self, changes: &[(&str, &str)]) -> Result<RelationRef> {
        rename(self, changes)
    }

    fn rename_all(&self, changes: &[(&str, &str)]) -> Result<RelationRef> {
        rename_all(self, changes)
    }

    fn union(&self, other: &RelationRef) -> Result<RelationRef> {
        union(self, other)
    }

    fn union_all(&self, other: &RelationRef) -> Result<RelationRef> {
        union_all(self, other)
    }

    fn intersect(&self, other: &RelationRef) -> Result<RelationRef> {
        intersect(self, other)
    }

    fn intersect_all(&self, other: &RelationRef) -> Result<RelationRef> {
        intersect_all(self, other)
    }

    fn difference(&self, other: &RelationRef) -> Result<RelationRef> {
        difference(self, other)
    }

    fn difference_all(&self, other: &RelationRef) -> Result<RelationRef> {
        difference_all(self, other)
    }

    fn distinct(&self) -> RelationRef {
        distinct(self)
    }

    fn bag(&self) -> RelationRef {
        bag(self)
    }

    fn join(&self, other: &RelationRef) -> Result<RelationRef> {
        join(self, other)
    }

    fn semi_join(&self, other: &RelationRef) -> Result<RelationRef> {
        semi_join(self, other)
    }

    fn not_matching(&self, other: &RelationRef) -> Result<RelationRef> {
        not_matching(self, other)
    }

    fn image(&self, other: &RelationRef, name: &str) -> Result<RelationRef> {
        image(self, other, name)
    }

    fn order_by(&self, names: &[&str]) -> Result<RelationRef> {
        order_by(self, names)
    }

    fn page(&self, size: usize, page_no: usize) -> Result<RelationRef> {
        page(self, size, page_no)
    }

    fn materialize(&self) -> Result<RelationRef> {
        materialize(self)
    }

    fn sum(&self, name: &str) -> Result<f64> {
        sum(self, name)
    }
}

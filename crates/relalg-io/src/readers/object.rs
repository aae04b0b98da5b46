//! Relations over in-memory Rust values.
//!
//! A type opts in by implementing [`Record`], usually through the [`record!`]
//! macro, which lists the members that become columns:
//!
//! ```ignore
//! struct Person { id: i64, name: String }
//! relalg_io::record!(Person { id: i64, name: String });
//!
//! let people = ObjectRelation::from_items("people", vec![ann, bob])?;
//! ```
//!
//! [`record!`]: crate::record

use std::fmt;
use std::sync::Arc;

use relalg_core::prelude::*;

/// One column of a record type: its name, type and how to read it.
pub struct Accessor<T> {
    pub name: &'static str,
    pub data_type: DataType,
    pub get: fn(&T) -> Value,
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            data_type: self.data_type.clone(),
            get: self.get,
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("data_type", &self.data_type)
            .finish()
    }
}

pub trait Record: Send + Sync + 'static {
    /// Columns in declaration order.
    fn accessors() -> Vec<Accessor<Self>>
    where
        Self: Sized;
}

/// Implement [`Record`] for a struct by listing `field: Type` pairs.
///
/// Each field type must implement `IntoValue + Clone`.
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident : $fty:ty),* $(,)? }) => {
        impl $crate::readers::object::Record for $ty {
            fn accessors() -> Vec<$crate::readers::object::Accessor<Self>> {
                vec![$(
                    $crate::readers::object::Accessor {
                        name: stringify!($field),
                        data_type: <$fty as $crate::relalg_core::types::IntoValue>::data_type(),
                        get: |item: &$ty| {
                            $crate::relalg_core::types::IntoValue::into_value(::std::clone::Clone::clone(&item.$field))
                        },
                    }
                ),*]
            }
        }
    };
}

/// Re-enumerable relation over a shared collection of records.
pub struct ObjectRelation<T: Record> {
    schema: SchemaRef,
    accessors: Arc<Vec<Accessor<T>>>,
    items: Arc<Vec<T>>,
}

impl<T: Record> ObjectRelation<T> {
    /// Build the column mapping once. Fails with `MalformedInput` when `T`
    /// declares no members.
    pub fn new(name: &str, items: Vec<T>) -> Result<Self> {
        let accessors = T::accessors();
        if accessors.is_empty() {
            return Err(Error::MalformedInput(format!(
                "type {} has no members to map to columns",
                std::any::type_name::<T>()
            )));
        }
        let columns = accessors
            .iter()
            .map(|a| Column::new(a.name, a.data_type.clone()))
            .collect();
        Ok(Self {
            schema: Arc::new(Schema::new(name, columns)?),
            accessors: Arc::new(accessors),
            items: Arc::new(items),
        })
    }

    pub fn from_items(name: &str, items: Vec<T>) -> Result<RelationRef> {
        Ok(Arc::new(Self::new(name, items)?))
    }

    /// A one-row relation.
    pub fn single(name: &str, item: T) -> Result<RelationRef> {
        Self::from_items(name, vec![item])
    }
}

impl<T: Record> Relation for ObjectRelation<T> {
    fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn rows_all(&self) -> Result<RowIter> {
        let (schema, accessors, items) = (
            self.schema.clone(),
            Arc::clone(&self.accessors),
            Arc::clone(&self.items),
        );
        Ok(Box::new((0..items.len()).map(move |i| {
            let values = accessors.iter().map(|a| (a.get)(&items[i])).collect();
            Row::new(schema.clone(), values)
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Person {
        id: i64,
        name: String,
        nick: Option<String>,
    }

    crate::record!(Person { id: i64, name: String, nick: Option<String> });

    struct Nothing;

    impl Record for Nothing {
        fn accessors() -> Vec<Accessor<Self>> {
            Vec::new()
        }
    }

    fn ann() -> Person {
        Person {
            id: 1,
            name: "ann".into(),
            nick: None,
        }
    }

    #[test]
    fn columns_follow_declaration_order() {
        let rel = ObjectRelation::single("people", ann()).unwrap();
        let names: Vec<&str> = rel.schema().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "nick"]);
        assert_eq!(rel.schema().lookup("nick").unwrap().data_type, DataType::Utf8);

        let rows = rel.to_vec().unwrap();
        let row = &rows[0];
        assert_eq!(row.get_i64("id").unwrap(), 1);
        assert!(row.get("nick").unwrap().is_null());
    }

    #[test]
    fn collections_re_enumerate() {
        let mut bob = ann();
        bob.id = 2;
        let rel = ObjectRelation::from_items("people", vec![ann(), bob, ann()]).unwrap();
        assert_eq!(rel.cardinality().unwrap(), 2);
        assert_eq!(rel.cardinality().unwrap(), 2);
    }

    #[test]
    fn memberless_types_are_rejected() {
        assert!(matches!(
            ObjectRelation::from_items("none", vec![Nothing]),
            Err(Error::MalformedInput(_))
        ));
    }
}

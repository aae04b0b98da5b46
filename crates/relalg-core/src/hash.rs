//! Hashing and name-comparison helpers shared by schemas and rows.
//!
//! Column names are compared case-insensitively everywhere, so anything that
//! hashes a name must fold case the same way `names_equal` does.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Case-insensitive column name comparison.
pub fn names_equal(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Feed a column name into `state`, folding case to match `names_equal`.
pub fn hash_name<H: Hasher>(name: &str, state: &mut H) {
    for c in name.chars().flat_map(char::to_lowercase) {
        state.write_u32(c as u32);
    }
    state.write_u8(0xff);
}

/// Hash a single value with a fresh hasher.
///
/// Used to build order-independent hashes: each member is hashed on its own
/// and the results are summed, so the combination does not depend on order.
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

/// Hash a (name, value) pair, folding case on the name.
pub fn hash_pair<T: Hash + ?Sized>(name: &str, value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    hash_name(name, &mut h);
    value.hash(&mut h);
    h.finish()
}

//! Method synthesizers: pure functions from a field list to one method body.
//!
//! Each synthesizer walks the fields in schema order and picks the
//! comparison/hash/rendering rule from the field's
//! [`TypeCategory`](crate::types::TypeCategory):
//!
//! | category          | equals               | hashCode             | toString              |
//! |-------------------|----------------------|----------------------|-----------------------|
//! | numeric/boolean   | `Boxed.compare != 0` | `Boxed.hashCode(v)`  | value                 |
//! | char              | `Character.compare`  | `Character.hashCode` | value                 |
//! | primitive array   | `Arrays.equals`      | `Arrays.hashCode`    | `Arrays.toString`     |
//! | object array      | `Arrays.deepEquals`  | `Arrays.deepHashCode`| `Arrays.deepToString` |
//! | reference         | `a.equals(b)`        | `a.hashCode()`       | value                 |
pub mod equals;
pub mod hash;
pub mod to_string;

use std::collections::HashSet;

pub use equals::synthesize_equals;
pub use hash::synthesize_hash_code;
pub use to_string::synthesize_to_string;

use crate::schema::FieldDescriptor;

/// Callers hand us fields from a validated schema; re-check in debug builds.
fn debug_assert_fields(fields: &[FieldDescriptor]) {
    debug_assert!(!fields.is_empty(), "synthesizer needs at least one field");
    debug_assert!(
        fields.iter().map(|f| f.name.as_str()).collect::<HashSet<_>>().len() == fields.len(),
        "field names must be distinct"
    );
}

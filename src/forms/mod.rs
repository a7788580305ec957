//! Form field shapes and the typed values they describe.
//!
//! `shapes` holds the runtime descriptors, `types` the matching Rust types,
//! and `formdata` the serialized form state built on top of both.

pub mod formdata;
pub mod shapes;
pub mod types;

pub use formdata::{FormData, validate_choices};
pub use shapes::{
    CHOICE, ERR, Field, PK, Shape, ShapeViolation, check_prop, check_prop_with, shape_by_name,
    type_label,
};
pub use types::{Choice, FieldError, choice_from_value, pk_from_value};

//! JVM field and method descriptors.
//!
//! [`parse_field_descriptor`] and [`parse_method_descriptor`] expose the raw grammar, while
//! [`Type`] is the structured value the name resolver works with: it knows its [`Sort`], the
//! element type of arrays, and can be rebuilt from a `(heading, name)` pair after a class
//! name has been swapped out.
#![forbid(unsafe_code)]

mod descriptor;
mod error;
mod ty;

pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
pub use crate::ty::{Sort, Type};

use std::fmt;

use crate::descriptor::{
    parse_field_descriptor, parse_method_descriptor, BaseType, FieldType, MethodDescriptor,
    ReturnType,
};
use crate::error::{Error, Result};

/// Coarse classification of a [`Type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    Void,
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Float,
    Long,
    Double,
    Array,
    Object,
    Method,
}

/// A parsed descriptor: `void`, a field type, or a whole method signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Field(FieldType),
    Method(MethodDescriptor),
}

impl Type {
    /// Parses any descriptor; a leading `(` selects the method grammar.
    pub fn parse(desc: &str) -> Result<Type> {
        if desc.starts_with('(') {
            Self::method(desc)
        } else if desc == "V" {
            Ok(Type::Void)
        } else {
            Self::field(desc)
        }
    }

    pub fn field(desc: &str) -> Result<Type> {
        parse_field_descriptor(desc).map(Type::Field)
    }

    pub fn method(desc: &str) -> Result<Type> {
        parse_method_descriptor(desc).map(Type::Method)
    }

    pub fn object(internal_name: impl Into<String>) -> Type {
        Type::Field(FieldType::Object(internal_name.into()))
    }

    /// Rebuilds an object (or object-array) type from the descriptor text preceding the class
    /// name (`L`, `[L`, `[[L`, ...) and the internal class name itself.
    pub fn from_heading(heading: &str, name: &str) -> Result<Type> {
        let invalid = || Error::InvalidHeading {
            heading: heading.to_string(),
            name: name.to_string(),
        };

        let brackets = heading.strip_suffix('L').ok_or_else(invalid)?;
        if !brackets.bytes().all(|b| b == b'[') {
            return Err(invalid());
        }
        if name.is_empty() || name.contains([';', '[', '(', ')', '.']) {
            return Err(invalid());
        }

        let mut ty = FieldType::Object(name.to_string());
        for _ in 0..brackets.len() {
            ty = FieldType::Array(Box::new(ty));
        }
        Ok(Type::Field(ty))
    }

    /// Composes a method type. The return type must be `void` or a field type and every
    /// argument a field type.
    pub fn method_type(return_type: &Type, args: &[Type]) -> Result<Type> {
        let return_type = match return_type {
            Type::Void => ReturnType::Void,
            Type::Field(ty) => ReturnType::Type(ty.clone()),
            Type::Method(desc) => return Err(Error::InvalidDescriptor(desc.to_string())),
        };
        let params = args
            .iter()
            .map(|arg| match arg {
                Type::Field(ty) => Ok(ty.clone()),
                other => Err(Error::InvalidDescriptor(other.descriptor())),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Type::Method(MethodDescriptor {
            params,
            return_type,
        }))
    }

    pub fn sort(&self) -> Sort {
        match self {
            Type::Void => Sort::Void,
            Type::Method(_) => Sort::Method,
            Type::Field(FieldType::Array(_)) => Sort::Array,
            Type::Field(FieldType::Object(_)) => Sort::Object,
            Type::Field(FieldType::Base(base)) => match base {
                BaseType::Boolean => Sort::Boolean,
                BaseType::Char => Sort::Char,
                BaseType::Byte => Sort::Byte,
                BaseType::Short => Sort::Short,
                BaseType::Int => Sort::Int,
                BaseType::Float => Sort::Float,
                BaseType::Long => Sort::Long,
                BaseType::Double => Sort::Double,
            },
        }
    }

    /// Innermost element type of an array, `None` for every other sort.
    pub fn element_type(&self) -> Option<Type> {
        match self {
            Type::Field(ty @ FieldType::Array(_)) => Some(Type::Field(ty.element().clone())),
            _ => None,
        }
    }

    pub fn dimensions(&self) -> usize {
        match self {
            Type::Field(ty) => ty.dimensions(),
            _ => 0,
        }
    }

    pub fn return_type(&self) -> Option<Type> {
        match self {
            Type::Method(desc) => Some(match &desc.return_type {
                ReturnType::Void => Type::Void,
                ReturnType::Type(ty) => Type::Field(ty.clone()),
            }),
            _ => None,
        }
    }

    /// Parameter types of a method, in declaration order; empty for other sorts.
    pub fn argument_types(&self) -> Vec<Type> {
        match self {
            Type::Method(desc) => desc.params.iter().cloned().map(Type::Field).collect(),
            _ => Vec::new(),
        }
    }

    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("V"),
            Type::Field(ty) => write!(f, "{ty}"),
            Type::Method(desc) => write!(f, "{desc}"),
        }
    }
}

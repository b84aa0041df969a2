use std::collections::HashMap;

use obfmap_descriptor::{Sort, Type};

/// Class-name substitution table used when rewriting descriptors. Names are internal form.
pub trait ClassRemap {
    fn remap(&self, internal_name: &str) -> Option<&str>;
}

impl ClassRemap for HashMap<String, String> {
    fn remap(&self, internal_name: &str) -> Option<&str> {
        self.get(internal_name).map(String::as_str)
    }
}

/// Rewrites a field type (object or object array) through `remap`.
///
/// Classes the table does not know (e.g. `java/lang/String`) are kept as is. Primitives and
/// primitive arrays are returned unchanged.
pub fn translate_field_type<R: ClassRemap + ?Sized>(ty: &Type, remap: &R) -> Type {
    match ty.sort() {
        Sort::Object => remap_object(ty, remap),
        Sort::Array if ty.element_type().map(|e| e.sort()) == Some(Sort::Object) => {
            remap_object(ty, remap)
        }
        Sort::Method => translate_method_type(ty, remap),
        _ => ty.clone(),
    }
}

/// Rewrites the return and parameter types of a method type, keeping parameter order.
pub fn translate_method_type<R: ClassRemap + ?Sized>(ty: &Type, remap: &R) -> Type {
    let Some(return_type) = ty.return_type() else {
        return translate_field_type(ty, remap);
    };
    let return_type = translate_field_type(&return_type, remap);
    let args: Vec<Type> = ty
        .argument_types()
        .iter()
        .map(|arg| translate_field_type(arg, remap))
        .collect();
    Type::method_type(&return_type, &args).unwrap_or_else(|_| ty.clone())
}

fn remap_object<R: ClassRemap + ?Sized>(ty: &Type, remap: &R) -> Type {
    let desc = ty.descriptor();
    let Some(start) = desc.find('L') else {
        return ty.clone();
    };
    let (heading, rest) = desc.split_at(start + 1);
    let name = rest.strip_suffix(';').unwrap_or(rest);
    match remap.remap(name) {
        // A replacement that cannot form a descriptor leaves the type untouched.
        Some(renamed) => Type::from_heading(heading, renamed).unwrap_or_else(|_| ty.clone()),
        None => ty.clone(),
    }
}

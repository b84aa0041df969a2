use std::borrow::Cow;

use obfmap_descriptor::Type;

use crate::class_table::ClassIdentity;
use crate::error::Result;
use crate::member_table::{build_member_table, convert_raw_member_maps, MemberKind, MemberTable};
use crate::names::{Direction, NameDomain};
use crate::source::MappingSource;
use crate::translate::{translate_field_type, translate_method_type};
use crate::RESOLVE_TARGET;

/// Anything that names a class, e.g. a class node handed over by the bytecode pipeline.
pub trait ClassHandle {
    fn class_name(&self) -> &str;
}

impl ClassHandle for str {
    fn class_name(&self) -> &str {
        self
    }
}

impl ClassHandle for String {
    fn class_name(&self) -> &str {
        self
    }
}

/// A method (with descriptor) or field (without) of some owner class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub descriptor: Option<&'a str>,
}

impl<'a> MemberRef<'a> {
    pub fn method(owner: &'a str, name: &'a str, descriptor: &'a str) -> Self {
        Self {
            owner,
            name,
            descriptor: Some(descriptor),
        }
    }

    pub fn field(owner: &'a str, name: &'a str) -> Self {
        Self {
            owner,
            name,
            descriptor: None,
        }
    }
}

/// Name and descriptor queries across the three naming domains.
///
/// No query fails. When a name cannot be resolved the input is returned unchanged and a single
/// warning is logged.
pub trait NameResolver: Send + Sync {
    fn is_obfuscated(&self) -> bool;

    fn class_name<'a>(&'a self, name: &'a str, direction: Direction) -> Cow<'a, str>;

    /// `name` may be the member's human or intermediate name. A `descriptor` selects the method
    /// table, its absence the field table.
    fn member_name<'a>(
        &'a self,
        owner: &str,
        name: &'a str,
        descriptor: Option<&str>,
        target: NameDomain,
    ) -> Cow<'a, str>;

    fn translate_method_descriptor(&self, ty: &Type, direction: Direction) -> Type;

    fn translate_field_descriptor(&self, ty: &Type, direction: Direction) -> Type;

    fn method_name<'a>(
        &'a self,
        owner: &str,
        name: &'a str,
        descriptor: &str,
        target: NameDomain,
    ) -> Cow<'a, str> {
        self.member_name(owner, name, Some(descriptor), target)
    }

    fn field_name<'a>(&'a self, owner: &str, name: &'a str, target: NameDomain) -> Cow<'a, str> {
        self.member_name(owner, name, None, target)
    }

    /// String form of [`NameResolver::translate_method_descriptor`]. Unparseable input is
    /// returned unchanged.
    fn translate_method_descriptor_str(&self, desc: &str, direction: Direction) -> String {
        match Type::method(desc) {
            Ok(ty) => self.translate_method_descriptor(&ty, direction).descriptor(),
            Err(err) => {
                tracing::warn!(target: RESOLVE_TARGET, error = %err, "not translating method descriptor");
                desc.to_string()
            }
        }
    }

    fn translate_field_descriptor_str(&self, desc: &str, direction: Direction) -> String {
        match Type::field(desc) {
            Ok(ty) => self.translate_field_descriptor(&ty, direction).descriptor(),
            Err(err) => {
                tracing::warn!(target: RESOLVE_TARGET, error = %err, "not translating field descriptor");
                desc.to_string()
            }
        }
    }
}

/// Full three-domain resolution backed by immutable tables.
#[derive(Debug, Clone)]
pub struct ObfuscatedResolver {
    classes: ClassIdentity,
    methods: MemberTable,
    fields: MemberTable,
}

impl ObfuscatedResolver {
    pub fn new(classes: ClassIdentity, methods: MemberTable, fields: MemberTable) -> Self {
        Self {
            classes,
            methods,
            fields,
        }
    }

    pub fn build(source: &dyn MappingSource) -> Result<Self> {
        tracing::info!(target: RESOLVE_TARGET, "initializing resolver with obfuscation");

        let classes = ClassIdentity::from_pairs(source.class_table()?)?;

        let raw_methods = source.raw_method_maps()?;
        let methods = build_member_table(
            MemberKind::Method,
            &source.method_aliases()?,
            &source.method_groups()?,
            &convert_raw_member_maps(MemberKind::Method, &raw_methods, &classes),
        );

        let raw_fields = source.raw_field_maps()?;
        let fields = build_member_table(
            MemberKind::Field,
            &source.field_aliases()?,
            &source.field_groups()?,
            &convert_raw_member_maps(MemberKind::Field, &raw_fields, &classes),
        );

        tracing::debug!(
            target: RESOLVE_TARGET,
            classes = classes.len(),
            method_classes = methods.len(),
            field_classes = fields.len(),
            "resolver tables built"
        );
        Ok(Self::new(classes, methods, fields))
    }

    pub fn classes(&self) -> &ClassIdentity {
        &self.classes
    }

    pub fn method_data(&self) -> &MemberTable {
        &self.methods
    }

    pub fn field_data(&self) -> &MemberTable {
        &self.fields
    }
}

impl NameResolver for ObfuscatedResolver {
    fn is_obfuscated(&self) -> bool {
        true
    }

    fn class_name<'a>(&'a self, name: &'a str, direction: Direction) -> Cow<'a, str> {
        self.classes.resolve(name, direction)
    }

    fn member_name<'a>(
        &'a self,
        owner: &str,
        name: &'a str,
        descriptor: Option<&str>,
        target: NameDomain,
    ) -> Cow<'a, str> {
        let table = if descriptor.is_some() {
            &self.methods
        } else {
            &self.fields
        };
        let key = table.kind().key(name, descriptor);
        match table
            .get(owner, &key)
            .and_then(|record| record.name_in(target))
        {
            Some(found) => Cow::Borrowed(found),
            None => {
                tracing::warn!(
                    target: RESOLVE_TARGET,
                    owner = %owner,
                    member = %key,
                    kind = %table.kind(),
                    domain = %target,
                    "could not look up member name"
                );
                Cow::Borrowed(name)
            }
        }
    }

    fn translate_method_descriptor(&self, ty: &Type, direction: Direction) -> Type {
        translate_method_type(ty, &self.classes.directed(direction))
    }

    fn translate_field_descriptor(&self, ty: &Type, direction: Direction) -> Type {
        translate_field_type(ty, &self.classes.directed(direction))
    }
}

/// Pass-through resolver for hosts that run with their human names.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityResolver;

impl NameResolver for IdentityResolver {
    fn is_obfuscated(&self) -> bool {
        false
    }

    fn class_name<'a>(&'a self, name: &'a str, _direction: Direction) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    fn member_name<'a>(
        &'a self,
        _owner: &str,
        name: &'a str,
        _descriptor: Option<&str>,
        _target: NameDomain,
    ) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    fn translate_method_descriptor(&self, ty: &Type, _direction: Direction) -> Type {
        ty.clone()
    }

    fn translate_field_descriptor(&self, ty: &Type, _direction: Direction) -> Type {
        ty.clone()
    }

    fn translate_method_descriptor_str(&self, desc: &str, _direction: Direction) -> String {
        desc.to_string()
    }

    fn translate_field_descriptor_str(&self, desc: &str, _direction: Direction) -> String {
        desc.to_string()
    }
}

/// The resolver variant chosen at startup.
#[derive(Debug, Clone)]
pub enum Resolver {
    Obfuscated(ObfuscatedResolver),
    Identity(IdentityResolver),
}

impl Resolver {
    /// Builds the variant matching the host. The identity variant never touches `source`.
    pub fn build(obfuscated: bool, source: &dyn MappingSource) -> Result<Self> {
        if obfuscated {
            ObfuscatedResolver::build(source).map(Resolver::Obfuscated)
        } else {
            Ok(Self::identity())
        }
    }

    pub fn identity() -> Self {
        tracing::info!(target: RESOLVE_TARGET, "initializing resolver without obfuscation");
        Resolver::Identity(IdentityResolver)
    }

    fn inner(&self) -> &dyn NameResolver {
        match self {
            Resolver::Obfuscated(resolver) => resolver,
            Resolver::Identity(resolver) => resolver,
        }
    }

    pub fn as_obfuscated(&self) -> Option<&ObfuscatedResolver> {
        match self {
            Resolver::Obfuscated(resolver) => Some(resolver),
            Resolver::Identity(_) => None,
        }
    }

    pub fn class_name_of<'a, C>(&'a self, class: &'a C, direction: Direction) -> Cow<'a, str>
    where
        C: ClassHandle + ?Sized,
    {
        self.class_name(class.class_name(), direction)
    }

    pub fn member_name_of<'a>(&'a self, member: MemberRef<'a>, target: NameDomain) -> Cow<'a, str> {
        self.member_name(member.owner, member.name, member.descriptor, target)
    }
}

impl NameResolver for Resolver {
    fn is_obfuscated(&self) -> bool {
        self.inner().is_obfuscated()
    }

    fn class_name<'a>(&'a self, name: &'a str, direction: Direction) -> Cow<'a, str> {
        self.inner().class_name(name, direction)
    }

    fn member_name<'a>(
        &'a self,
        owner: &str,
        name: &'a str,
        descriptor: Option<&str>,
        target: NameDomain,
    ) -> Cow<'a, str> {
        self.inner().member_name(owner, name, descriptor, target)
    }

    fn translate_method_descriptor(&self, ty: &Type, direction: Direction) -> Type {
        self.inner().translate_method_descriptor(ty, direction)
    }

    fn translate_field_descriptor(&self, ty: &Type, direction: Direction) -> Type {
        self.inner().translate_field_descriptor(ty, direction)
    }

    fn translate_method_descriptor_str(&self, desc: &str, direction: Direction) -> String {
        self.inner().translate_method_descriptor_str(desc, direction)
    }

    fn translate_field_descriptor_str(&self, desc: &str, direction: Direction) -> String {
        self.inner().translate_field_descriptor_str(desc, direction)
    }
}

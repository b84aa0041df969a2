//! Three-way name resolution for obfuscated JVM hosts.
//!
//! Every class and member of the host exists under three names:
//! - the *human* name developers write against,
//! - the *intermediate* name produced by the host's build tooling (the join key between all
//!   mapping sources),
//! - the *runtime* name present in the loaded bytecode.
//!
//! [`Resolver`] answers name and descriptor queries between those domains. It is built once at
//! startup from a [`MappingSource`] and is immutable afterwards, so an `Arc<Resolver>` can be
//! shared across every class-loading thread. Lookups never fail: a miss logs a warning and hands
//! back the queried name unchanged.
#![forbid(unsafe_code)]

mod class_table;
mod error;
mod lifecycle;
mod member_table;
mod names;
mod record;
mod resolver;
mod source;
mod translate;

pub use crate::class_table::{ClassIdentity, DirectedClasses};
pub use crate::error::{ResolveError, Result};
pub use crate::lifecycle::ResolverCell;
pub use crate::member_table::{
    build_member_table, convert_raw_member_maps, AliasLookup, MemberKind, MemberTable,
};
pub use crate::names::{Direction, NameDomain};
pub use crate::record::TypeData;
pub use crate::resolver::{
    ClassHandle, IdentityResolver, MemberRef, NameResolver, ObfuscatedResolver, Resolver,
};
pub use crate::source::{
    AliasTable, ClassMembers, ClassPair, MappingSnapshot, MappingSource, MemberDescriptor,
    RawMemberMaps, RuntimeMemberMaps,
};
pub use crate::translate::{translate_field_type, translate_method_type, ClassRemap};

pub use obfmap_descriptor::{Sort, Type};

/// Tracing target for resolver diagnostics.
pub const RESOLVE_TARGET: &str = "obfmap.resolve";

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::class_table::ClassIdentity;
use crate::names::{to_internal, Direction};
use crate::record::TypeData;
use crate::source::{ClassMembers, RawMemberMaps, RuntimeMemberMaps};
use crate::RESOLVE_TARGET;

/// Methods are keyed by `name + descriptor` (overloads), fields by `name` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method,
    Field,
}

impl MemberKind {
    pub fn key(self, name: &str, descriptor: Option<&str>) -> String {
        match (self, descriptor) {
            (MemberKind::Method, Some(descriptor)) => format!("{name}{descriptor}"),
            _ => name.to_string(),
        }
    }

    /// Drops the descriptor suffix of a host table entry (`a(I)V` or `a:I`).
    pub fn strip_descriptor(self, entry: &str) -> &str {
        let separator = match self {
            MemberKind::Method => '(',
            MemberKind::Field => ':',
        };
        entry.split(separator).next().unwrap_or(entry)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MemberKind::Method => "method",
            MemberKind::Field => "field",
        })
    }
}

/// Human alias lookup by intermediate member name.
pub trait AliasLookup {
    fn alias(&self, intermediate_name: &str) -> Option<&str>;
}

impl AliasLookup for HashMap<String, String> {
    fn alias(&self, intermediate_name: &str) -> Option<&str> {
        self.get(intermediate_name)
            .map(String::as_str)
            .filter(|alias| !alias.is_empty())
    }
}

/// Read-only member records per class, reachable by intermediate or human key.
#[derive(Debug, Clone)]
pub struct MemberTable {
    kind: MemberKind,
    classes: HashMap<String, HashMap<String, Arc<TypeData>>>,
}

impl MemberTable {
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Members of `class` (binary or internal form).
    pub fn class(&self, class: &str) -> Option<&HashMap<String, Arc<TypeData>>> {
        self.classes.get(to_internal(class).as_ref())
    }

    pub fn get(&self, class: &str, key: &str) -> Option<&Arc<TypeData>> {
        self.class(class)?.get(key)
    }

    /// Number of classes with at least a runtime table.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Builds a member table.
///
/// Classes without an entry in `runtime` are skipped: the host does not ship them. Each member
/// becomes one record stored under its intermediate key and, when it has a human alias, once
/// more under its human key.
pub fn build_member_table<A: AliasLookup + ?Sized>(
    kind: MemberKind,
    aliases: &A,
    groups: &[ClassMembers],
    runtime: &RuntimeMemberMaps,
) -> MemberTable {
    let mut classes = HashMap::with_capacity(groups.len());
    for group in groups {
        let class_name = to_internal(&group.class_name).into_owned();
        let Some(runtime_members) = runtime.get(&class_name) else {
            tracing::trace!(
                target: RESOLVE_TARGET,
                class = %class_name,
                "no runtime table for class; skipping"
            );
            continue;
        };

        let mut members = HashMap::with_capacity(group.members.len());
        for member in &group.members {
            let descriptor = member.descriptor.as_deref();
            let human = aliases.alias(&member.name);
            let record = Arc::new(TypeData::new(
                human.map(str::to_string),
                member.name.clone(),
                runtime_members.get(&member.name).cloned(),
            ));

            members.insert(kind.key(&member.name, descriptor), Arc::clone(&record));
            if let Some(human) = human {
                members.insert(kind.key(human, descriptor), record);
            }
        }
        classes.insert(class_name, members);
    }

    MemberTable { kind, classes }
}

/// Turns the host's raw runtime tables into per-class `intermediate → runtime` tables keyed by
/// the class's human name.
///
/// Runtime classes missing from `classes` keep their runtime name as key.
pub fn convert_raw_member_maps(
    kind: MemberKind,
    raw: &RawMemberMaps,
    classes: &ClassIdentity,
) -> RuntimeMemberMaps {
    raw.iter()
        .map(|(runtime_class, entries)| {
            let class_name = match classes.get(runtime_class, Direction::ToHuman) {
                Some(human) => human.to_string(),
                None => {
                    tracing::debug!(
                        target: RESOLVE_TARGET,
                        class = %runtime_class,
                        "runtime class has no human name"
                    );
                    to_internal(runtime_class).into_owned()
                }
            };
            let members = entries
                .iter()
                .map(|(runtime_member, intermediate_member)| {
                    (
                        kind.strip_descriptor(intermediate_member).to_string(),
                        kind.strip_descriptor(runtime_member).to_string(),
                    )
                })
                .collect();
            (class_name, members)
        })
        .collect()
}

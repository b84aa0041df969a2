use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{ResolveError, Result};
use crate::names::{restyle, to_internal, Direction};
use crate::translate::ClassRemap;
use crate::RESOLVE_TARGET;

/// Bijective relation between human and runtime class names.
///
/// Lookups run on internal names, but every name is also remembered as it was supplied so that
/// queries without a package separator get the original spelling back. The table owns its data;
/// the snapshot it was built from can be dropped or changed freely afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClassIdentity {
    to_runtime: HashMap<String, String>,
    to_human: HashMap<String, String>,
    human_spelling: HashMap<String, String>,
    runtime_spelling: HashMap<String, String>,
}

impl ClassIdentity {
    /// Builds the table from `(human, runtime)` pairs.
    ///
    /// Pairs with an empty side are skipped. Repeating a pair is harmless (the first spelling
    /// wins), but mapping one name to two different counterparts is rejected.
    pub fn from_pairs<I, H, R>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (H, R)>,
        H: AsRef<str>,
        R: AsRef<str>,
    {
        let mut table = ClassIdentity::default();
        for (human, runtime) in pairs {
            let (human, runtime) = (human.as_ref(), runtime.as_ref());
            if human.is_empty() || runtime.is_empty() {
                continue;
            }
            let human_internal = to_internal(human).into_owned();
            let runtime_internal = to_internal(runtime).into_owned();
            insert_unique(
                &mut table.to_runtime,
                human_internal.clone(),
                runtime_internal.clone(),
            )?;
            insert_unique(&mut table.to_human, runtime_internal.clone(), human_internal.clone())?;
            table
                .human_spelling
                .entry(human_internal)
                .or_insert_with(|| human.to_string());
            table
                .runtime_spelling
                .entry(runtime_internal)
                .or_insert_with(|| runtime.to_string());
        }
        Ok(table)
    }

    fn map(&self, direction: Direction) -> &HashMap<String, String> {
        match direction {
            Direction::ToRuntime => &self.to_runtime,
            Direction::ToHuman => &self.to_human,
        }
    }

    /// `internal` as it was spelled in the source snapshot.
    fn spelled<'a>(&'a self, internal: &'a str, direction: Direction) -> &'a str {
        let spellings = match direction {
            Direction::ToRuntime => &self.runtime_spelling,
            Direction::ToHuman => &self.human_spelling,
        };
        spellings.get(internal).map(String::as_str).unwrap_or(internal)
    }

    /// Silent lookup; the answer is in internal form.
    pub fn get(&self, name: &str, direction: Direction) -> Option<&str> {
        self.map(direction)
            .get(to_internal(name).as_ref())
            .map(String::as_str)
    }

    /// Looks `name` up in `direction`, falling back to `name` itself (with a warning) when the
    /// class is unknown.
    ///
    /// A query carrying a package separator gets its answer in the same style; otherwise the
    /// answer is spelled as it was supplied.
    pub fn resolve<'a>(&'a self, name: &'a str, direction: Direction) -> Cow<'a, str> {
        match self.get(name, direction) {
            Some(found) if name.contains(['.', '/']) => restyle(name, found),
            Some(found) => Cow::Borrowed(self.spelled(found, direction)),
            None => {
                tracing::warn!(
                    target: RESOLVE_TARGET,
                    class = %name,
                    ?direction,
                    "could not look up name for class"
                );
                Cow::Borrowed(name)
            }
        }
    }

    pub fn resolve_to_runtime<'a>(&'a self, human: &'a str) -> Cow<'a, str> {
        self.resolve(human, Direction::ToRuntime)
    }

    pub fn resolve_to_human<'a>(&'a self, runtime: &'a str) -> Cow<'a, str> {
        self.resolve(runtime, Direction::ToHuman)
    }

    /// A [`ClassRemap`] view translating internal names in `direction`.
    pub fn directed(&self, direction: Direction) -> DirectedClasses<'_> {
        DirectedClasses {
            map: self.map(direction),
        }
    }

    pub fn len(&self) -> usize {
        self.to_runtime.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_runtime.is_empty()
    }

    /// `(human, runtime)` pairs, spelled as supplied, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.to_runtime.iter().map(|(human, runtime)| {
            (
                self.spelled(human, Direction::ToHuman),
                self.spelled(runtime, Direction::ToRuntime),
            )
        })
    }
}

fn insert_unique(map: &mut HashMap<String, String>, key: String, value: String) -> Result<()> {
    match map.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
        Entry::Occupied(slot) if *slot.get() == value => Ok(()),
        Entry::Occupied(slot) => Err(ResolveError::NonBijectiveClassTable {
            name: slot.key().clone(),
            first: slot.get().clone(),
            second: value,
        }),
    }
}

/// One direction of a [`ClassIdentity`], used for descriptor rewriting.
#[derive(Debug, Clone, Copy)]
pub struct DirectedClasses<'a> {
    map: &'a HashMap<String, String>,
}

impl ClassRemap for DirectedClasses<'_> {
    fn remap(&self, internal_name: &str) -> Option<&str> {
        self.map.get(internal_name).map(String::as_str)
    }
}

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// Human alias table keyed by intermediate member name.
pub type AliasTable = HashMap<String, String>;

/// Host runtime tables as the host keeps them: runtime class name to
/// `runtime member + descriptor suffix` → `intermediate member + descriptor suffix`.
pub type RawMemberMaps = HashMap<String, HashMap<String, String>>;

/// Per-class runtime tables after conversion: intermediate class name to
/// intermediate member name → runtime member name.
pub type RuntimeMemberMaps = HashMap<String, HashMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPair {
    pub human: String,
    pub runtime: String,
}

/// One member as listed by the intermediate mapping files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDescriptor {
    pub name: String,
    /// Method descriptor; fields have none.
    #[serde(default)]
    pub descriptor: Option<String>,
}

impl MemberDescriptor {
    pub fn method(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: Some(descriptor.into()),
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptor: None,
        }
    }
}

/// The members of one class, keyed by the class's intermediate name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMembers {
    pub class_name: String,
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
}

/// Everything the resolver needs from the host and its mapping loaders.
///
/// Implementations are called once, while the resolver is being built. Any error aborts
/// construction.
pub trait MappingSource {
    /// Snapshot of the host's `(human, runtime)` class table.
    fn class_table(&self) -> Result<Vec<(String, String)>>;

    fn method_groups(&self) -> Result<Vec<ClassMembers>>;

    fn field_groups(&self) -> Result<Vec<ClassMembers>>;

    fn method_aliases(&self) -> Result<AliasTable>;

    fn field_aliases(&self) -> Result<AliasTable>;

    fn raw_method_maps(&self) -> Result<RawMemberMaps>;

    fn raw_field_maps(&self) -> Result<RawMemberMaps>;
}

/// An in-memory [`MappingSource`], typically deserialized from a JSON snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSnapshot {
    pub classes: Vec<ClassPair>,
    pub methods: Vec<ClassMembers>,
    pub fields: Vec<ClassMembers>,
    pub method_aliases: AliasTable,
    pub field_aliases: AliasTable,
    pub raw_methods: RawMemberMaps,
    pub raw_fields: RawMemberMaps,
}

impl MappingSnapshot {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

impl MappingSource for MappingSnapshot {
    fn class_table(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .classes
            .iter()
            .map(|pair| (pair.human.clone(), pair.runtime.clone()))
            .collect())
    }

    fn method_groups(&self) -> Result<Vec<ClassMembers>> {
        Ok(self.methods.clone())
    }

    fn field_groups(&self) -> Result<Vec<ClassMembers>> {
        Ok(self.fields.clone())
    }

    fn method_aliases(&self) -> Result<AliasTable> {
        Ok(self.method_aliases.clone())
    }

    fn field_aliases(&self) -> Result<AliasTable> {
        Ok(self.field_aliases.clone())
    }

    fn raw_method_maps(&self) -> Result<RawMemberMaps> {
        Ok(self.raw_methods.clone())
    }

    fn raw_field_maps(&self) -> Result<RawMemberMaps> {
        Ok(self.raw_fields.clone())
    }
}

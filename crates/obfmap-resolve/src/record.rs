use crate::names::NameDomain;

/// The three names of one class member.
///
/// The intermediate name is always present; the other two are best effort. A missing runtime
/// name means the host never emitted the member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeData {
    human_name: Option<String>,
    intermediate_name: String,
    runtime_name: Option<String>,
}

impl TypeData {
    pub fn new(
        human_name: Option<String>,
        intermediate_name: impl Into<String>,
        runtime_name: Option<String>,
    ) -> Self {
        Self {
            human_name: human_name.filter(|name| !name.is_empty()),
            intermediate_name: intermediate_name.into(),
            runtime_name: runtime_name.filter(|name| !name.is_empty()),
        }
    }

    pub fn human_name(&self) -> Option<&str> {
        self.human_name.as_deref()
    }

    pub fn intermediate_name(&self) -> &str {
        &self.intermediate_name
    }

    pub fn runtime_name(&self) -> Option<&str> {
        self.runtime_name.as_deref()
    }

    pub fn name_in(&self, domain: NameDomain) -> Option<&str> {
        match domain {
            NameDomain::Human => self.human_name(),
            NameDomain::Intermediate => Some(self.intermediate_name()),
            NameDomain::Runtime => self.runtime_name(),
        }
    }
}

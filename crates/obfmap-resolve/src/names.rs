use std::borrow::Cow;
use std::fmt;

/// Direction of a class-name query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Human name in, runtime name out.
    ToRuntime,
    /// Runtime name in, human name out.
    ToHuman,
}

impl Direction {
    pub fn reverse(self) -> Direction {
        match self {
            Direction::ToRuntime => Direction::ToHuman,
            Direction::ToHuman => Direction::ToRuntime,
        }
    }
}

/// One of the three parallel naming domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameDomain {
    Human,
    Intermediate,
    Runtime,
}

impl fmt::Display for NameDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NameDomain::Human => "human",
            NameDomain::Intermediate => "intermediate",
            NameDomain::Runtime => "runtime",
        })
    }
}

/// Converts a binary class name (`net.Foo`) to internal form (`net/Foo`).
pub(crate) fn to_internal(name: &str) -> Cow<'_, str> {
    if name.contains('.') {
        Cow::Owned(name.replace('.', "/"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Renders `answer` (internal form) in the separator style of `query`.
pub(crate) fn restyle<'a>(query: &str, answer: &'a str) -> Cow<'a, str> {
    if query.contains('.') && !query.contains('/') && answer.contains('/') {
        Cow::Owned(answer.replace('/', "."))
    } else {
        Cow::Borrowed(answer)
    }
}

//! Member listings gathered from type information

use std::fmt;

/// How a member is invoked, from `FUNCDESC::invkind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Method,
    PropertyGet,
    PropertyPut,
    PropertyPutRef,
}

impl MemberKind {
    /// Map the raw `INVOKEKIND` bits (1, 2, 4, 8)
    pub fn from_invkind(invkind: i32) -> Option<Self> {
        match invkind {
            1 => Some(MemberKind::Method),
            2 => Some(MemberKind::PropertyGet),
            4 => Some(MemberKind::PropertyPut),
            8 => Some(MemberKind::PropertyPutRef),
            _ => None,
        }
    }

    /// Label used in callable-member listings
    pub fn label(&self) -> &'static str {
        match self {
            MemberKind::Method => "Method",
            MemberKind::PropertyGet => "PropertyGet",
            // by-ref puts are listed with ordinary puts
            MemberKind::PropertyPut | MemberKind::PropertyPutRef => "PropertyPut",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Methods, readable properties and writable properties of a type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeMembers {
    pub methods: Vec<String>,
    pub property_gets: Vec<String>,
    pub property_sets: Vec<String>,
}

impl TypeMembers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a member in the list for its kind, in discovery order
    pub fn push(&mut self, kind: MemberKind, name: impl Into<String>) {
        let name = name.into();
        match kind {
            MemberKind::Method => self.methods.push(name),
            MemberKind::PropertyGet => self.property_gets.push(name),
            MemberKind::PropertyPut | MemberKind::PropertyPutRef => self.property_sets.push(name),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty() && self.property_gets.is_empty() && self.property_sets.is_empty()
    }

    /// Sorted, deduplicated `"<Kind>: <Name>"` lines
    pub fn callable_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .methods
            .iter()
            .map(|n| format!("{}: {}", MemberKind::Method, n))
            .chain(
                self.property_gets
                    .iter()
                    .map(|n| format!("{}: {}", MemberKind::PropertyGet, n)),
            )
            .chain(
                self.property_sets
                    .iter()
                    .map(|n| format!("{}: {}", MemberKind::PropertyPut, n)),
            )
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }
}

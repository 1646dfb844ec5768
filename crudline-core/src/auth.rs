//! Authorization collaborator.

use crate::error::AuthorizationError;
use std::fmt;

/// An ability checked against the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    /// List the collection.
    Index,
    /// Create a new record.
    Create,
    /// Read a single record.
    Read,
    /// Change a record.
    Update,
    /// Delete a record.
    Destroy,
}

impl Ability {
    /// Ability name as passed to policies.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an ability is checked against.
///
/// Collection-level actions (`index`, `create`, `store`) check against the
/// record type; the others against the fetched record.
pub enum Subject<'a, M> {
    /// The record type, by short name.
    Type(&'a str),
    /// A specific record.
    Record(&'a M),
}

impl<M> Subject<'_, M> {
    /// The record, when the subject is one.
    pub fn record(&self) -> Option<&M> {
        match self {
            Self::Record(record) => Some(*record),
            Self::Type(_) => None,
        }
    }
}

impl<M> fmt::Debug for Subject<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => f.debug_tuple("Type").field(name).finish(),
            Self::Record(_) => f.write_str("Record(..)"),
        }
    }
}

/// The authorization/policy collaborator.
pub trait Gate<M>: Send + Sync {
    /// Allow or refuse an ability on a subject.
    fn authorize(&self, ability: Ability, subject: Subject<'_, M>) -> Result<(), AuthorizationError>;
}

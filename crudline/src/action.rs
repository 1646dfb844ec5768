//! The eight controller actions.

use crudline_core::Mode;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A CRUD action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// List the collection.
    Index,
    /// Show the creation form.
    Create,
    /// Persist a new record.
    Store,
    /// Show one record.
    Show,
    /// Show the edit form.
    Edit,
    /// Persist changes to a record.
    Update,
    /// Ask for confirmation before deleting.
    ConfirmDestroy,
    /// Delete a record.
    Destroy,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 8] = [
        Self::Index,
        Self::Create,
        Self::Store,
        Self::Show,
        Self::Edit,
        Self::Update,
        Self::ConfirmDestroy,
        Self::Destroy,
    ];

    /// Action name as used in view identifiers, e.g. `confirmDestroy`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Store => "store",
            Self::Show => "show",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::ConfirmDestroy => "confirmDestroy",
            Self::Destroy => "destroy",
        }
    }

    /// Input mode of mutating actions.
    pub const fn mode(self) -> Option<Mode> {
        match self {
            Self::Store => Some(Mode::Creating),
            Self::Update => Some(Mode::Updating),
            _ => None,
        }
    }

    /// Whether the action ends in a rendered view.
    pub const fn renders(self) -> bool {
        matches!(
            self,
            Self::Index | Self::Create | Self::Show | Self::Edit | Self::ConfirmDestroy
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action name did not match any action.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action `{0}`")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

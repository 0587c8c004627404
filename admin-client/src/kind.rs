//! Entity-kind descriptors: what the generic controller needs to know about
//! a managed record type.

use crate::error::FieldError;
use crate::presentation::{Cell, Column, FieldSpec, SummaryCard};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of lowercase string values with serde, `Display`
/// and `FromStr` support.
macro_rules! value_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::FieldError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::error::FieldError::InvalidValue {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

value_enum! {
    /// Managed record type.
    EntityType, "entity type" {
        Post => "post",
        User => "user",
    }
}

impl EntityType {
    /// REST collection segment.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Post => "posts",
            Self::User => "users",
        }
    }
}

impl Default for EntityType {
    fn default() -> Self {
        Self::Post
    }
}

value_enum! {
    /// Status-changing action distinct from a generic update.
    Action, "action" {
        Publish => "publish",
        Archive => "archive",
        Restore => "restore",
    }
}

impl Action {
    pub fn label(self) -> &'static str {
        match self {
            Self::Publish => "Publish",
            Self::Archive => "Archive",
            Self::Restore => "Restore",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Publish => "Published",
            Self::Archive => "Archived",
            Self::Restore => "Restored",
        }
    }

    pub fn prompt(self, noun: &str) -> String {
        format!("{} this {}?", self.label(), noun)
    }
}

/// One row of a status-transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<S> {
    pub action: Action,
    pub from: S,
    pub to: S,
}

impl<S> Transition<S> {
    pub const fn new(action: Action, from: S, to: S) -> Self {
        Self { action, from, to }
    }
}

/// Banner texts for the successful generic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub noun: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

/// In-progress form values, every field optional.
pub trait FormDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError>;

    fn field(&self, name: &str) -> Option<String>;
}

/// Parses a select value for `set_field`.
pub(crate) fn parse_value<T>(value: &str) -> Result<T, FieldError>
where
    T: FromStr<Err = FieldError>,
{
    value.parse()
}

pub trait EntityKind: Send + Sync + 'static {
    type Entity: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync;
    type Draft: FormDraft
        + Clone
        + fmt::Debug
        + Default
        + PartialEq
        + Serialize
        + DeserializeOwned
        + Send
        + Sync;
    type Status: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    const ENTITY_TYPE: EntityType;
    const MESSAGES: Messages;

    fn id(entity: &Self::Entity) -> i64;

    fn status(entity: &Self::Entity) -> Self::Status;

    /// Status the draft would set, if it carries one.
    fn draft_status(draft: &Self::Draft) -> Option<Self::Status>;

    /// Allowed lifecycle moves; empty when the kind has no transitions.
    fn transitions() -> &'static [Transition<Self::Status>];

    /// Editable fields of `entity` as a draft.
    fn snapshot(entity: &Self::Entity) -> Self::Draft;

    /// Fills the defaults a create request carries when the form left them out.
    fn with_defaults(draft: Self::Draft) -> Self::Draft;

    fn fields() -> &'static [FieldSpec];

    fn columns() -> &'static [Column];

    fn cell(entity: &Self::Entity, column: &str) -> Cell;

    fn summary(items: &[Self::Entity]) -> Vec<SummaryCard>;

    /// Materialises a stored entity from a create draft.
    fn build(id: i64, created_at: String, draft: Self::Draft) -> Self::Entity;

    /// Overwrites the fields the draft carries.
    fn merge(entity: &mut Self::Entity, draft: Self::Draft);

    fn set_status(entity: &mut Self::Entity, status: Self::Status);
}

/// Status reached by applying `action` from `from`, if the table allows it.
pub fn target<K: EntityKind>(from: K::Status, action: Action) -> Option<K::Status> {
    K::transitions()
        .iter()
        .find(|t| t.action == action && t.from == from)
        .map(|t| t.to)
}

/// Actions the table allows from `status`.
pub fn allowed_actions<K: EntityKind>(status: K::Status) -> Vec<Action> {
    K::transitions()
        .iter()
        .filter(|t| t.from == status)
        .map(|t| t.action)
        .collect()
}

/// Renders every column of `entity`.
pub fn row<K: EntityKind>(entity: &K::Entity) -> Vec<Cell> {
    K::columns()
        .iter()
        .map(|column| K::cell(entity, column.key))
        .collect()
}

use crate::error::FieldError;
use crate::kind::{parse_value, EntityKind, EntityType, FormDraft, Messages, Transition};
use crate::presentation::{
    count, Badge, BadgeVariant, Cell, Column, FieldInput, FieldSpec, SummaryCard,
};
use serde::{Deserialize, Serialize};

value_enum! {
    Role, "role" {
        User => "user",
        Moderator => "moderator",
        Admin => "admin",
    }
}

impl Role {
    pub fn badge(self) -> Badge {
        match self {
            Self::Admin => Badge::new("Admin", BadgeVariant::Danger),
            Self::Moderator => Badge::new("Moderator", BadgeVariant::Warning),
            Self::User => Badge::new("User", BadgeVariant::Primary),
        }
    }
}

value_enum! {
    UserStatus, "status" {
        Active => "active",
        Inactive => "inactive",
        Suspended => "suspended",
    }
}

impl UserStatus {
    pub fn badge(self) -> Badge {
        match self {
            Self::Active => Badge::new("Active", BadgeVariant::Success),
            Self::Inactive => Badge::new("Inactive", BadgeVariant::Secondary),
            Self::Suspended => Badge::new("Suspended", BadgeVariant::Danger),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl FormDraft for UserDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "username" => self.username = Some(value.to_string()),
            "email" => self.email = Some(value.to_string()),
            "role" => self.role = Some(parse_value(value)?),
            "status" => self.status = Some(parse_value(value)?),
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "username" => self.username.clone(),
            "email" => self.email.clone(),
            "role" => self.role.map(|r| r.to_string()),
            "status" => self.status.map(|s| s.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserKind;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", "Username", FieldInput::Text).required(),
    FieldSpec::new("email", "Email", FieldInput::Email).required(),
    FieldSpec::new("role", "Role", FieldInput::Select(Role::VALUES)).with_default("user"),
    FieldSpec::new("status", "Status", FieldInput::Select(UserStatus::VALUES))
        .with_default("active"),
];

const COLUMNS: &[Column] = &[
    Column::new("id", "ID"),
    Column::new("username", "Username"),
    Column::new("email", "Email"),
    Column::new("role", "Role"),
    Column::new("status", "Status"),
    Column::new("createdAt", "Created"),
    Column::new("lastLogin", "Last login"),
];

impl EntityKind for UserKind {
    type Entity = User;
    type Draft = UserDraft;
    type Status = UserStatus;

    const ENTITY_TYPE: EntityType = EntityType::User;
    const MESSAGES: Messages = Messages {
        noun: "user",
        created: "User created",
        updated: "User updated",
        deleted: "User deleted",
    };

    fn id(entity: &User) -> i64 {
        entity.id
    }

    fn status(entity: &User) -> UserStatus {
        entity.status
    }

    fn draft_status(draft: &UserDraft) -> Option<UserStatus> {
        draft.status
    }

    // Status changes for users go through a regular update.
    fn transitions() -> &'static [Transition<UserStatus>] {
        &[]
    }

    fn snapshot(entity: &User) -> UserDraft {
        UserDraft {
            username: Some(entity.username.clone()),
            email: Some(entity.email.clone()),
            role: Some(entity.role),
            status: Some(entity.status),
        }
    }

    fn with_defaults(mut draft: UserDraft) -> UserDraft {
        draft.role.get_or_insert(Role::User);
        draft.status.get_or_insert(UserStatus::Active);
        draft
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(entity: &User, column: &str) -> Cell {
        match column {
            "id" => Cell::text(entity.id.to_string()),
            "username" => Cell::text(entity.username.as_str()),
            "email" => Cell::text(entity.email.as_str()),
            "role" => Cell::Badge(entity.role.badge()),
            "status" => Cell::Badge(entity.status.badge()),
            "createdAt" => Cell::text(entity.created_at.as_str()),
            "lastLogin" => Cell::text(entity.last_login.as_deref().unwrap_or("-")),
            _ => Cell::text(""),
        }
    }

    fn summary(items: &[User]) -> Vec<SummaryCard> {
        vec![
            SummaryCard::new("Total", items.len() as u64, None),
            SummaryCard::new(
                "Active",
                count(items, |u| u.status == UserStatus::Active),
                Some(BadgeVariant::Success),
            ),
            SummaryCard::new(
                "Inactive",
                count(items, |u| u.status == UserStatus::Inactive),
                Some(BadgeVariant::Warning),
            ),
            SummaryCard::new(
                "Suspended",
                count(items, |u| u.status == UserStatus::Suspended),
                Some(BadgeVariant::Danger),
            ),
            SummaryCard::new(
                "Admins",
                count(items, |u| u.role == Role::Admin),
                Some(BadgeVariant::Secondary),
            ),
        ]
    }

    fn build(id: i64, created_at: String, draft: UserDraft) -> User {
        User {
            id,
            username: draft.username.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            role: draft.role.unwrap_or(Role::User),
            status: draft.status.unwrap_or(UserStatus::Active),
            created_at,
            last_login: None,
        }
    }

    fn merge(entity: &mut User, draft: UserDraft) {
        if let Some(username) = draft.username {
            entity.username = username;
        }
        if let Some(email) = draft.email {
            entity.email = email;
        }
        if let Some(role) = draft.role {
            entity.role = role;
        }
        if let Some(status) = draft.status {
            entity.status = status;
        }
    }

    fn set_status(entity: &mut User, status: UserStatus) {
        entity.status = status;
    }
}

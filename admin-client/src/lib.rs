#[macro_use]
pub mod kind;

pub mod controller;
pub mod dashboard;
pub mod error;
pub mod http_client;
pub mod memory;
pub mod post;
pub mod presentation;
pub mod service;
pub mod user;

use std::fmt;

pub use controller::{AutoConfirm, Confirm, Controller, Outcome};
pub use dashboard::{Banners, Dashboard};
pub use error::{FieldError, Failure, ServiceError};
pub use kind::{Action, EntityKind, EntityType, FormDraft};
pub use post::{Category, Post, PostDraft, PostKind, PostStatus};
pub use service::EntityService;
pub use user::{Role, User, UserDraft, UserKind, UserStatus};

/// Where the dashboard's data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// REST service at `base_url` (e.g., "http://localhost:3000")
    Http {
        base_url: String,
        token: Option<String>,
    },
    /// Seeded in-process store
    Memory,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transport::Http { base_url, .. } => write!(f, "HTTP: {}", base_url),
            Transport::Memory => f.write_str("in-memory demo data"),
        }
    }
}

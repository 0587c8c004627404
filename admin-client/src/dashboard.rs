use crate::controller::{Confirm, Controller, Outcome};
use crate::http_client::HttpService;
use crate::kind::EntityType;
use crate::memory::{seed_posts, seed_users, MemoryService};
use crate::post::PostKind;
use crate::presentation::SummaryCard;
use crate::service::EntityService;
use crate::user::UserKind;
use crate::Transport;
use std::sync::Arc;

/// Banner texts of the active controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banners<'a> {
    pub success: Option<&'a str>,
    pub error: Option<&'a str>,
}

/// Both controllers plus the entity type currently on screen.
pub struct Dashboard {
    entity_type: EntityType,
    posts: Controller<PostKind>,
    users: Controller<UserKind>,
}

impl Dashboard {
    pub fn new(posts: Controller<PostKind>, users: Controller<UserKind>) -> Self {
        Self {
            entity_type: EntityType::default(),
            posts,
            users,
        }
    }

    /// Builds both controllers on the given transport.
    pub fn connect(transport: &Transport, confirm: Arc<dyn Confirm>) -> Self {
        let (posts, users): (
            Arc<dyn EntityService<PostKind>>,
            Arc<dyn EntityService<UserKind>>,
        ) = match transport {
            Transport::Http { base_url, token } => {
                let mut posts = HttpService::<PostKind>::new(base_url.clone());
                let mut users = HttpService::<UserKind>::new(base_url.clone());
                if let Some(token) = token {
                    posts.set_token(token.clone());
                    users.set_token(token.clone());
                }
                (Arc::new(posts), Arc::new(users))
            }
            Transport::Memory => (
                Arc::new(MemoryService::<PostKind>::with_items(seed_posts())),
                Arc::new(MemoryService::<UserKind>::with_items(seed_users())),
            ),
        };

        tracing::debug!("Dashboard connected to {}", transport);
        Self::new(
            Controller::new(posts, Arc::clone(&confirm)),
            Controller::new(users, confirm),
        )
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn posts(&self) -> &Controller<PostKind> {
        &self.posts
    }

    pub fn posts_mut(&mut self) -> &mut Controller<PostKind> {
        &mut self.posts
    }

    pub fn users(&self) -> &Controller<UserKind> {
        &self.users
    }

    pub fn users_mut(&mut self) -> &mut Controller<UserKind> {
        &mut self.users
    }

    /// Switches the active entity type. The forms of the controller being
    /// left are closed and the newly active list is loaded.
    pub async fn select(&mut self, entity_type: EntityType) -> Outcome {
        self.close_active_modals();
        self.entity_type = entity_type;
        self.load_active().await
    }

    pub async fn load_active(&mut self) -> Outcome {
        match self.entity_type {
            EntityType::Post => self.posts.load().await,
            EntityType::User => self.users.load().await,
        }
    }

    pub fn close_active_modals(&mut self) {
        match self.entity_type {
            EntityType::Post => self.posts.close_modals(),
            EntityType::User => self.users.close_modals(),
        }
    }

    pub fn active_summary(&self) -> Vec<SummaryCard> {
        match self.entity_type {
            EntityType::Post => self.posts.summary(),
            EntityType::User => self.users.summary(),
        }
    }

    pub fn active_banners(&self) -> Banners<'_> {
        match self.entity_type {
            EntityType::Post => Banners {
                success: self.posts.success_message(),
                error: self.posts.error_message(),
            },
            EntityType::User => Banners {
                success: self.users.success_message(),
                error: self.users.error_message(),
            },
        }
    }
}

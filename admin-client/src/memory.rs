//! In-process data service used for demos and tests.

use crate::error::ServiceError;
use crate::kind::{target, Action, EntityKind};
use crate::post::{Category, Post, PostStatus};
use crate::service::EntityService;
use crate::user::{Role, User, UserStatus};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    Create,
    Update,
    Delete,
    Transition,
}

/// A request the service received, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetAll,
    Create,
    Update(i64),
    Delete(i64),
    Transition(i64, Action),
}

struct Store<K: EntityKind> {
    items: Vec<K::Entity>,
    next_id: i64,
    calls: Vec<Call>,
    failures: HashMap<Operation, Option<String>>,
}

impl<K: EntityKind> Store<K> {
    fn check(&self, operation: Operation) -> Result<(), ServiceError> {
        match self.failures.get(&operation) {
            Some(message) => Err(ServiceError::Rejected(message.clone())),
            None => Ok(()),
        }
    }

    fn position(&self, id: i64) -> Result<usize, ServiceError> {
        self.items
            .iter()
            .position(|item| K::id(item) == id)
            .ok_or(ServiceError::NotFound)
    }
}

/// Shared in-memory store; clones see the same records.
pub struct MemoryService<K: EntityKind> {
    store: Arc<Mutex<Store<K>>>,
}

impl<K: EntityKind> MemoryService<K> {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<K::Entity>) -> Self {
        let next_id = items.iter().map(K::id).max().unwrap_or(0) + 1;
        Self {
            store: Arc::new(Mutex::new(Store {
                items,
                next_id,
                calls: Vec::new(),
                failures: HashMap::new(),
            })),
        }
    }

    /// Makes every following `operation` fail with `message` until
    /// [`recover`](Self::recover) is called.
    pub async fn fail(&self, operation: Operation, message: Option<&str>) {
        let mut store = self.store.lock().await;
        store
            .failures
            .insert(operation, message.map(str::to_string));
    }

    pub async fn recover(&self, operation: Operation) {
        self.store.lock().await.failures.remove(&operation);
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.store.lock().await.calls.clone()
    }

    pub async fn items(&self) -> Vec<K::Entity> {
        self.store.lock().await.items.clone()
    }
}

impl<K: EntityKind> Default for MemoryService<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EntityKind> Clone for MemoryService<K> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

#[async_trait]
impl<K: EntityKind> EntityService<K> for MemoryService<K> {
    async fn get_all(&self) -> Result<Vec<K::Entity>, ServiceError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::GetAll);
        store.check(Operation::GetAll)?;
        Ok(store.items.clone())
    }

    async fn create(&self, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::Create);
        store.check(Operation::Create)?;

        let id = store.next_id;
        store.next_id += 1;
        let entity = K::build(id, today(), draft.clone());
        store.items.push(entity.clone());
        Ok(Some(entity))
    }

    async fn update(&self, id: i64, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::Update(id));
        store.check(Operation::Update)?;

        let index = store.position(id)?;
        let entity = &mut store.items[index];
        K::merge(entity, draft.clone());
        Ok(Some(entity.clone()))
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::Delete(id));
        store.check(Operation::Delete)?;

        let index = store.position(id)?;
        store.items.remove(index);
        Ok(())
    }

    async fn transition(&self, id: i64, action: Action) -> Result<(), ServiceError> {
        let mut store = self.store.lock().await;
        store.calls.push(Call::Transition(id, action));
        store.check(Operation::Transition)?;

        let index = store.position(id)?;
        let entity = &mut store.items[index];
        let from = K::status(entity);
        let to = target::<K>(from, action).ok_or_else(|| {
            ServiceError::Rejected(Some(format!(
                "cannot {} a {} {}",
                action,
                from,
                K::MESSAGES.noun
            )))
        })?;
        K::set_status(entity, to);
        Ok(())
    }
}

/// Demo posts covering every status and category.
pub fn seed_posts() -> Vec<Post> {
    let post = |id, title: &str, author: &str, category, status, views| Post {
        id,
        title: title.to_string(),
        content: format!("{} - full text", title),
        author: author.to_string(),
        category,
        status,
        views,
        created_at: format!("2024-01-{:02}", 10 + id),
    };

    vec![
        post(
            1,
            "Getting started with Rust",
            "alice",
            Category::Development,
            PostStatus::Published,
            1520,
        ),
        post(
            2,
            "Designing accessible forms",
            "bob",
            Category::Accessibility,
            PostStatus::Draft,
            0,
        ),
        post(
            3,
            "Color systems for dashboards",
            "carol",
            Category::Design,
            PostStatus::Archived,
            310,
        ),
        post(
            4,
            "Async patterns in practice",
            "alice",
            Category::Development,
            PostStatus::Published,
            870,
        ),
    ]
}

/// Demo users covering every role and status.
pub fn seed_users() -> Vec<User> {
    let user = |id, username: &str, role, status, last_login: Option<&str>| User {
        id,
        username: username.to_string(),
        email: format!("{}@example.com", username),
        role,
        status,
        created_at: format!("2024-01-{:02}", id),
        last_login: last_login.map(str::to_string),
    };

    vec![
        user(1, "admin", Role::Admin, UserStatus::Active, Some("2024-06-01")),
        user(
            2,
            "moderator",
            Role::Moderator,
            UserStatus::Active,
            Some("2024-05-28"),
        ),
        user(3, "jdoe", Role::User, UserStatus::Inactive, None),
        user(4, "spammer", Role::User, UserStatus::Suspended, Some("2024-02-14")),
    ]
}

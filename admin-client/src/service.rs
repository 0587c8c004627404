use crate::error::ServiceError;
use crate::kind::{Action, EntityKind};
use async_trait::async_trait;

/// Remote data service for one entity kind.
#[async_trait]
pub trait EntityService<K: EntityKind>: Send + Sync {
    async fn get_all(&self) -> Result<Vec<K::Entity>, ServiceError>;

    /// Returns the created entity when the service sends it back.
    async fn create(&self, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError>;

    async fn update(&self, id: i64, draft: &K::Draft) -> Result<Option<K::Entity>, ServiceError>;

    async fn delete(&self, id: i64) -> Result<(), ServiceError>;

    async fn transition(&self, id: i64, action: Action) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported(format!(
            "cannot {} {} #{}",
            action,
            K::MESSAGES.noun,
            id
        )))
    }
}

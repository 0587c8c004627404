//! Generic entity controller: list state, modal flags, the form draft and
//! the success/error banners for one entity kind.

use crate::error::{FieldError, Failure, ServiceError};
use crate::kind::{self, Action, EntityKind, FormDraft};
use crate::post::PostKind;
use crate::presentation::{Cell, SummaryCard};
use crate::service::EntityService;
use std::sync::Arc;

pub const LOAD_FAILED: &str = "Failed to load data";
pub const CREATE_FAILED: &str = "Failed to create";
pub const UPDATE_FAILED: &str = "Failed to update";
pub const DELETE_FAILED: &str = "Failed to delete";
pub const ACTION_FAILED: &str = "Operation failed";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this?";

/// Blocking yes/no question put to the user before destructive actions.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Answers every prompt with the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// How a controller operation ended. The banners carry the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The user declined the confirmation.
    Cancelled,
    /// Nothing to do, e.g. committing an edit that was never started.
    Skipped,
    Failed(Failure),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

pub struct Controller<K: EntityKind> {
    service: Arc<dyn EntityService<K>>,
    confirm: Arc<dyn Confirm>,
    items: Vec<K::Entity>,
    is_create_open: bool,
    is_edit_open: bool,
    selected: Option<K::Entity>,
    draft: K::Draft,
    success_message: Option<String>,
    error_message: Option<String>,
}

impl<K: EntityKind> Controller<K> {
    pub fn new(service: Arc<dyn EntityService<K>>, confirm: Arc<dyn Confirm>) -> Self {
        Self {
            service,
            confirm,
            items: Vec::new(),
            is_create_open: false,
            is_edit_open: false,
            selected: None,
            draft: K::Draft::default(),
            success_message: None,
            error_message: None,
        }
    }

    pub fn items(&self) -> &[K::Entity] {
        &self.items
    }

    pub fn find(&self, id: i64) -> Option<&K::Entity> {
        self.items.iter().find(|item| K::id(item) == id)
    }

    pub fn is_create_open(&self) -> bool {
        self.is_create_open
    }

    pub fn is_edit_open(&self) -> bool {
        self.is_edit_open
    }

    pub fn selected(&self) -> Option<&K::Entity> {
        self.selected.as_ref()
    }

    pub fn draft(&self) -> &K::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut K::Draft {
        &mut self.draft
    }

    /// Binds one form input to the draft.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        self.draft.set_field(name, value)
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_success(&mut self) {
        self.success_message = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    pub fn summary(&self) -> Vec<SummaryCard> {
        K::summary(&self.items)
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.items.iter().map(kind::row::<K>).collect()
    }

    /// Transitions offered for `entity` in its current status.
    pub fn available_actions(&self, entity: &K::Entity) -> Vec<Action> {
        kind::allowed_actions::<K>(K::status(entity))
    }

    /// Replaces the list with a fresh copy from the service. On failure the
    /// current list is kept and the generic load error is shown.
    pub async fn load(&mut self) -> Outcome {
        tracing::debug!(kind = %K::ENTITY_TYPE, "Loading list");
        match self.service.get_all().await {
            Ok(items) => {
                tracing::debug!(kind = %K::ENTITY_TYPE, count = items.len(), "List loaded");
                self.items = items;
                Outcome::Applied
            }
            Err(e) => {
                tracing::warn!(kind = %K::ENTITY_TYPE, error = %e, "Failed to load list");
                self.error_message = Some(LOAD_FAILED.to_string());
                Outcome::Failed(Failure::Load(LOAD_FAILED.to_string()))
            }
        }
    }

    pub fn open_create(&mut self) {
        self.is_create_open = true;
    }

    /// Replaces the draft with `draft` and submits it.
    pub async fn create(&mut self, draft: K::Draft) -> Outcome {
        self.draft = draft;
        self.submit_create().await
    }

    /// Submits the current draft as a new entity. On failure the create form
    /// stays open with the draft intact.
    pub async fn submit_create(&mut self) -> Outcome {
        let payload = K::with_defaults(self.draft.clone());

        match self.service.create(&payload).await {
            Ok(created) => {
                match created.as_ref() {
                    Some(entity) => {
                        tracing::info!(kind = %K::ENTITY_TYPE, id = K::id(entity), "Entity created")
                    }
                    None => tracing::info!(kind = %K::ENTITY_TYPE, "Entity created"),
                }
                self.load().await;
                self.is_create_open = false;
                self.draft = K::Draft::default();
                self.succeed(K::MESSAGES.created)
            }
            Err(e) => self.fail("create", e, CREATE_FAILED),
        }
    }

    /// Snapshots `entity` into the draft and opens the edit form.
    pub fn start_edit(&mut self, entity: &K::Entity) {
        self.draft = K::snapshot(entity);
        self.selected = Some(entity.clone());
        self.is_edit_open = true;
    }

    /// Starts editing the loaded entity with `id`; false when it is not in
    /// the list.
    pub fn start_edit_by_id(&mut self, id: i64) -> bool {
        match self.find(id).cloned() {
            Some(entity) => {
                self.start_edit(&entity);
                true
            }
            None => false,
        }
    }

    /// Sends the draft as an update of the selected entity. Last write wins:
    /// the entity is not re-read before submitting.
    ///
    /// Kinds with a transition table only change status through
    /// [`transition`](Self::transition); an edit that moves the status is
    /// rejected before anything is sent.
    pub async fn commit_edit(&mut self) -> Outcome {
        let Some(selected) = self.selected.as_ref() else {
            return Outcome::Skipped;
        };
        let id = K::id(selected);
        let from = K::status(selected);

        if let Some(to) = K::draft_status(&self.draft) {
            if to != from && !K::transitions().is_empty() {
                return self.reject(format!(
                    "Cannot change a {} {} to {} by editing",
                    from,
                    K::MESSAGES.noun,
                    to
                ));
            }
        }

        match self.service.update(id, &self.draft).await {
            Ok(_) => {
                tracing::info!(kind = %K::ENTITY_TYPE, id, "Entity updated");
                self.load().await;
                self.is_edit_open = false;
                self.draft = K::Draft::default();
                self.selected = None;
                self.succeed(K::MESSAGES.updated)
            }
            Err(e) => self.fail("update", e, UPDATE_FAILED),
        }
    }

    pub async fn remove(&mut self, id: i64) -> Outcome {
        if !self.confirm.confirm(DELETE_PROMPT) {
            tracing::debug!(kind = %K::ENTITY_TYPE, id, "Delete cancelled");
            return Outcome::Cancelled;
        }

        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!(kind = %K::ENTITY_TYPE, id, "Entity deleted");
                self.load().await;
                self.succeed(K::MESSAGES.deleted)
            }
            Err(e) => self.fail("delete", e, DELETE_FAILED),
        }
    }

    /// Applies a lifecycle action to a loaded entity. The action is checked
    /// against the transition table before anything is sent.
    pub async fn transition(&mut self, id: i64, action: Action) -> Outcome {
        let noun = K::MESSAGES.noun;
        let Some(entity) = self.find(id) else {
            return self.reject(format!("Cannot {} {} #{}: not found", action, noun, id));
        };
        let from = K::status(entity);
        if kind::target::<K>(from, action).is_none() {
            return self.reject(format!("Cannot {} a {} {}", action, from, noun));
        }

        if !self.confirm.confirm(&action.prompt(noun)) {
            tracing::debug!(kind = %K::ENTITY_TYPE, id, %action, "Transition cancelled");
            return Outcome::Cancelled;
        }

        match self.service.transition(id, action).await {
            Ok(()) => {
                tracing::info!(kind = %K::ENTITY_TYPE, id, %action, "Transition applied");
                self.load().await;
                self.succeed(action.success_message())
            }
            Err(e) => self.fail(action.as_str(), e, ACTION_FAILED),
        }
    }

    /// Closes both forms and drops the draft and selection.
    pub fn close_modals(&mut self) {
        self.is_create_open = false;
        self.is_edit_open = false;
        self.draft = K::Draft::default();
        self.selected = None;
    }

    fn succeed(&mut self, message: &str) -> Outcome {
        self.success_message = Some(message.to_string());
        Outcome::Applied
    }

    fn fail(&mut self, operation: &str, err: ServiceError, fallback: &str) -> Outcome {
        tracing::warn!(kind = %K::ENTITY_TYPE, operation, error = %err, "Operation failed");
        let message = err
            .message()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        self.error_message = Some(message.clone());
        Outcome::Failed(Failure::Mutation(message))
    }

    fn reject(&mut self, message: String) -> Outcome {
        tracing::warn!(kind = %K::ENTITY_TYPE, "{}", message);
        self.error_message = Some(message.clone());
        Outcome::Failed(Failure::RejectedTransition(message))
    }
}

impl Controller<PostKind> {
    pub async fn publish(&mut self, id: i64) -> Outcome {
        self.transition(id, Action::Publish).await
    }

    pub async fn archive(&mut self, id: i64) -> Outcome {
        self.transition(id, Action::Archive).await
    }

    pub async fn restore(&mut self, id: i64) -> Outcome {
        self.transition(id, Action::Restore).await
    }
}

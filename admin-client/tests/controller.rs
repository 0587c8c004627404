use admin_client::controller::{DELETE_PROMPT, LOAD_FAILED};
use admin_client::memory::{seed_posts, seed_users, Call, MemoryService, Operation};
use admin_client::{
    Action, AutoConfirm, Category, Confirm, Controller, EntityService, Failure, Outcome, Post,
    PostDraft, PostKind, PostStatus, Role, UserDraft, UserKind, UserStatus,
};
use std::sync::{Arc, Mutex};

fn post_controller(
    items: Vec<Post>,
    confirm: impl Confirm + 'static,
) -> (MemoryService<PostKind>, Controller<PostKind>) {
    let service = MemoryService::with_items(items);
    let controller = Controller::<PostKind>::new(Arc::new(service.clone()), Arc::new(confirm));
    (service, controller)
}

fn draft_post(id: i64) -> Post {
    Post {
        id,
        title: "First".into(),
        content: String::new(),
        author: "alice".into(),
        category: Category::Development,
        status: PostStatus::Draft,
        views: 0,
        created_at: "2024-01-01".into(),
    }
}

#[tokio::test]
async fn mutations_leave_items_equal_to_a_fresh_load() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;

    assert!(posts
        .create(PostDraft {
            title: Some("Fresh".into()),
            author: Some("dave".into()),
            ..PostDraft::default()
        })
        .await
        .is_applied());
    assert_eq!(posts.items(), service.get_all().await.unwrap().as_slice());

    assert!(posts.start_edit_by_id(1));
    posts.set_field("title", "Renamed").unwrap();
    assert!(posts.commit_edit().await.is_applied());
    assert_eq!(posts.items(), service.get_all().await.unwrap().as_slice());

    assert!(posts.remove(3).await.is_applied());
    assert_eq!(posts.items(), service.get_all().await.unwrap().as_slice());

    assert!(posts.publish(2).await.is_applied());
    assert_eq!(posts.items(), service.get_all().await.unwrap().as_slice());

    let ids: Vec<i64> = posts.items().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 4, 5]);
}

#[tokio::test]
async fn every_mutation_is_followed_by_a_reload() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    posts.remove(1).await;
    posts.publish(2).await;

    assert_eq!(
        service.calls().await,
        vec![
            Call::GetAll,
            Call::Delete(1),
            Call::GetAll,
            Call::Transition(2, Action::Publish),
            Call::GetAll,
        ]
    );
}

#[tokio::test]
async fn commit_edit_without_start_edit_is_a_no_op() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    posts.set_field("title", "orphan").unwrap();
    let before_draft = posts.draft().clone();

    assert_eq!(posts.commit_edit().await, Outcome::Skipped);
    assert_eq!(service.calls().await, vec![Call::GetAll]);
    assert_eq!(posts.draft(), &before_draft);
    assert_eq!(posts.success_message(), None);
    assert_eq!(posts.error_message(), None);
    assert_eq!(posts.items(), seed_posts().as_slice());
}

#[tokio::test]
async fn close_modals_always_resets_forms() {
    let (_, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    posts.open_create();
    assert!(posts.start_edit_by_id(4));
    posts.set_field("author", "someone").unwrap();

    posts.close_modals();
    assert!(!posts.is_create_open());
    assert!(!posts.is_edit_open());
    assert_eq!(posts.draft(), &PostDraft::default());
    assert!(posts.selected().is_none());

    posts.close_modals();
    assert!(!posts.is_create_open());
    assert_eq!(posts.draft(), &PostDraft::default());
}

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&prompts);
    let (service, mut posts) = post_controller(seed_posts(), move |prompt: &str| {
        seen.lock().unwrap().push(prompt.to_string());
        false
    });
    posts.load().await;

    assert_eq!(posts.remove(1).await, Outcome::Cancelled);
    assert_eq!(service.calls().await, vec![Call::GetAll]);
    assert_eq!(posts.items(), seed_posts().as_slice());
    assert_eq!(posts.error_message(), None);
    assert_eq!(posts.success_message(), None);
    assert_eq!(*prompts.lock().unwrap(), vec![DELETE_PROMPT.to_string()]);
}

#[tokio::test]
async fn publishing_a_draft_publishes_it() {
    let (_, mut posts) = post_controller(vec![draft_post(1)], AutoConfirm(true));
    posts.load().await;
    assert_eq!(posts.items()[0].status, PostStatus::Draft);

    assert!(posts.publish(1).await.is_applied());
    posts.load().await;
    assert_eq!(posts.items().len(), 1);
    assert_eq!(posts.items()[0].id, 1);
    assert_eq!(posts.items()[0].status, PostStatus::Published);
    assert_eq!(posts.success_message(), Some("Published"));
}

#[tokio::test]
async fn lifecycle_runs_through_archive_and_restore() {
    let (_, mut posts) = post_controller(vec![draft_post(1)], AutoConfirm(true));
    posts.load().await;
    posts.publish(1).await;
    posts.archive(1).await;
    assert_eq!(posts.items()[0].status, PostStatus::Archived);
    posts.restore(1).await;
    assert_eq!(posts.items()[0].status, PostStatus::Published);
}

#[tokio::test]
async fn create_without_status_yields_a_draft() {
    let (service, mut posts) = post_controller(Vec::new(), AutoConfirm(true));
    posts.open_create();
    let outcome = posts
        .create(PostDraft {
            title: Some("A".into()),
            author: Some("B".into()),
            category: Some(Category::Design),
            ..PostDraft::default()
        })
        .await;

    assert!(outcome.is_applied());
    let stored = service.items().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, PostStatus::Draft);
    assert_eq!(stored[0].content, "");
    assert_eq!(posts.items(), stored.as_slice());
    assert!(!posts.is_create_open());
    assert_eq!(posts.draft(), &PostDraft::default());
    assert_eq!(posts.success_message(), Some("Post created"));
}

#[tokio::test]
async fn load_failure_on_fresh_controller_keeps_empty_list() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    service.fail(Operation::GetAll, Some("network error")).await;

    let outcome = posts.load().await;
    assert_eq!(
        outcome,
        Outcome::Failed(Failure::Load(LOAD_FAILED.to_string()))
    );
    assert_eq!(posts.error_message(), Some(LOAD_FAILED));
    assert!(posts.items().is_empty());
    assert_eq!(posts.success_message(), None);
}

#[tokio::test]
async fn load_failure_keeps_stale_list_and_success_banner() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    posts.publish(2).await;
    let before = posts.items().to_vec();

    service.fail(Operation::GetAll, None).await;
    assert!(posts.load().await.is_failure());
    assert_eq!(posts.items(), before.as_slice());
    assert_eq!(posts.success_message(), Some("Published"));
}

#[tokio::test]
async fn illegal_transitions_are_rejected_locally() {
    let (service, mut posts) = post_controller(vec![draft_post(1)], AutoConfirm(true));
    posts.load().await;

    let outcome = posts.archive(1).await;
    assert_eq!(
        outcome,
        Outcome::Failed(Failure::RejectedTransition(
            "Cannot archive a draft post".into()
        ))
    );
    assert_eq!(posts.error_message(), Some("Cannot archive a draft post"));

    assert!(posts.restore(7).await.is_failure());
    assert_eq!(service.calls().await, vec![Call::GetAll]);
}

#[tokio::test]
async fn service_message_is_preferred_over_fallback() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    service.fail(Operation::Update, Some("title is too long")).await;

    assert!(posts.start_edit_by_id(1));
    let outcome = posts.commit_edit().await;
    assert_eq!(
        outcome,
        Outcome::Failed(Failure::Mutation("title is too long".into()))
    );
    assert!(posts.is_edit_open());
    assert_eq!(posts.selected().map(|p| p.id), Some(1));

    service.recover(Operation::Update).await;
    assert!(posts.commit_edit().await.is_applied());
    assert!(!posts.is_edit_open());
    assert!(posts.selected().is_none());
    assert_eq!(posts.success_message(), Some("Post updated"));
}

#[tokio::test]
async fn failed_delete_uses_generic_fallback() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;
    service.fail(Operation::Delete, None).await;

    assert_eq!(
        posts.remove(1).await,
        Outcome::Failed(Failure::Mutation("Failed to delete".into()))
    );
    assert_eq!(posts.items().len(), 4);
}

#[tokio::test]
async fn declined_transition_sends_nothing() {
    let (service, mut posts) = post_controller(vec![draft_post(1)], AutoConfirm(false));
    posts.load().await;

    assert_eq!(posts.publish(1).await, Outcome::Cancelled);
    assert_eq!(service.calls().await, vec![Call::GetAll]);
    assert_eq!(posts.items()[0].status, PostStatus::Draft);
}

#[tokio::test]
async fn user_controller_applies_user_defaults() {
    let service = MemoryService::<UserKind>::with_items(seed_users());
    let mut users =
        Controller::<UserKind>::new(Arc::new(service.clone()), Arc::new(AutoConfirm(true)));
    users.load().await;

    let outcome = users
        .create(UserDraft {
            username: Some("newbie".into()),
            email: Some("newbie@example.com".into()),
            ..UserDraft::default()
        })
        .await;
    assert!(outcome.is_applied());

    let created = users.items().last().cloned().unwrap();
    assert_eq!(created.role, Role::User);
    assert_eq!(created.last_login, None);
    assert_eq!(users.success_message(), Some("User created"));

    let rejected = users.transition(created.id, Action::Publish).await;
    assert!(matches!(
        rejected,
        Outcome::Failed(Failure::RejectedTransition(_))
    ));
}

#[tokio::test]
async fn editing_cannot_move_a_post_status() {
    let (service, mut posts) = post_controller(seed_posts(), AutoConfirm(true));
    posts.load().await;

    assert!(posts.start_edit_by_id(1));
    posts.set_field("status", "draft").unwrap();
    let outcome = posts.commit_edit().await;
    assert_eq!(
        outcome,
        Outcome::Failed(Failure::RejectedTransition(
            "Cannot change a published post to draft by editing".into()
        ))
    );
    assert!(posts.is_edit_open());
    assert_eq!(service.calls().await, vec![Call::GetAll]);
    assert_eq!(service.items().await[0].status, PostStatus::Published);

    assert!(posts.start_edit_by_id(2));
    posts.set_field("status", "archived").unwrap();
    assert!(posts.commit_edit().await.is_failure());
    assert_eq!(service.items().await[1].status, PostStatus::Draft);

    assert!(posts.start_edit_by_id(2));
    posts.set_field("title", "Accessible forms").unwrap();
    assert!(posts.commit_edit().await.is_applied());
    assert_eq!(posts.find(2).map(|p| p.status), Some(PostStatus::Draft));
}

#[tokio::test]
async fn editing_may_change_a_user_status() {
    let service = MemoryService::<UserKind>::with_items(seed_users());
    let mut users =
        Controller::<UserKind>::new(Arc::new(service.clone()), Arc::new(AutoConfirm(true)));
    users.load().await;

    assert!(users.start_edit_by_id(3));
    users.set_field("status", "active").unwrap();
    assert!(users.commit_edit().await.is_applied());
    assert_eq!(users.find(3).map(|u| u.status), Some(UserStatus::Active));
}

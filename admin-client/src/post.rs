use crate::error::FieldError;
use crate::kind::{parse_value, Action, EntityKind, EntityType, FormDraft, Messages, Transition};
use crate::presentation::{
    count, Badge, BadgeVariant, Cell, Column, FieldInput, FieldSpec, SummaryCard,
};
use serde::{Deserialize, Serialize};

value_enum! {
    PostStatus, "status" {
        Draft => "draft",
        Published => "published",
        Archived => "archived",
    }
}

impl PostStatus {
    pub fn badge(self) -> Badge {
        match self {
            Self::Draft => Badge::new("Draft", BadgeVariant::Warning),
            Self::Published => Badge::new("Published", BadgeVariant::Success),
            Self::Archived => Badge::new("Archived", BadgeVariant::Secondary),
        }
    }
}

value_enum! {
    Category, "category" {
        Development => "development",
        Design => "design",
        Accessibility => "accessibility",
    }
}

impl Category {
    pub fn badge(self) -> Badge {
        match self {
            Self::Development => Badge::plain("Development"),
            Self::Design => Badge::new("Design", BadgeVariant::Info),
            Self::Accessibility => Badge::new("Accessibility", BadgeVariant::Danger),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: Category,
    pub status: PostStatus,
    pub views: u64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}

impl FormDraft for PostDraft {
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), FieldError> {
        match name {
            "title" => self.title = Some(value.to_string()),
            "content" => self.content = Some(value.to_string()),
            "author" => self.author = Some(value.to_string()),
            "category" => self.category = Some(parse_value(value)?),
            "status" => self.status = Some(parse_value(value)?),
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "title" => self.title.clone(),
            "content" => self.content.clone(),
            "author" => self.author.clone(),
            "category" => self.category.map(|c| c.to_string()),
            "status" => self.status.map(|s| s.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostKind;

const TRANSITIONS: &[Transition<PostStatus>] = &[
    Transition::new(Action::Publish, PostStatus::Draft, PostStatus::Published),
    Transition::new(Action::Archive, PostStatus::Published, PostStatus::Archived),
    Transition::new(Action::Restore, PostStatus::Archived, PostStatus::Published),
];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title", FieldInput::Text).required(),
    FieldSpec::new("author", "Author", FieldInput::Text).required(),
    FieldSpec::new("category", "Category", FieldInput::Select(Category::VALUES)),
    FieldSpec::new("content", "Content", FieldInput::TextArea),
];

const COLUMNS: &[Column] = &[
    Column::new("id", "ID"),
    Column::new("title", "Title"),
    Column::new("author", "Author"),
    Column::new("category", "Category"),
    Column::new("status", "Status"),
    Column::new("views", "Views"),
    Column::new("createdAt", "Created"),
];

impl EntityKind for PostKind {
    type Entity = Post;
    type Draft = PostDraft;
    type Status = PostStatus;

    const ENTITY_TYPE: EntityType = EntityType::Post;
    const MESSAGES: Messages = Messages {
        noun: "post",
        created: "Post created",
        updated: "Post updated",
        deleted: "Post deleted",
    };

    fn id(entity: &Post) -> i64 {
        entity.id
    }

    fn status(entity: &Post) -> PostStatus {
        entity.status
    }

    fn draft_status(draft: &PostDraft) -> Option<PostStatus> {
        draft.status
    }

    fn transitions() -> &'static [Transition<PostStatus>] {
        TRANSITIONS
    }

    fn snapshot(entity: &Post) -> PostDraft {
        PostDraft {
            title: Some(entity.title.clone()),
            content: Some(entity.content.clone()),
            author: Some(entity.author.clone()),
            category: Some(entity.category),
            status: Some(entity.status),
        }
    }

    fn with_defaults(mut draft: PostDraft) -> PostDraft {
        draft.content.get_or_insert_with(String::new);
        draft.status.get_or_insert(PostStatus::Draft);
        draft
    }

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn columns() -> &'static [Column] {
        COLUMNS
    }

    fn cell(entity: &Post, column: &str) -> Cell {
        match column {
            "id" => Cell::text(entity.id.to_string()),
            "title" => Cell::text(entity.title.as_str()),
            "author" => Cell::text(entity.author.as_str()),
            "category" => Cell::Badge(entity.category.badge()),
            "status" => Cell::Badge(entity.status.badge()),
            "views" => Cell::text(entity.views.to_string()),
            "createdAt" => Cell::text(entity.created_at.as_str()),
            _ => Cell::text(""),
        }
    }

    fn summary(items: &[Post]) -> Vec<SummaryCard> {
        vec![
            SummaryCard::new("Total", items.len() as u64, None),
            SummaryCard::new(
                "Published",
                count(items, |p| p.status == PostStatus::Published),
                Some(BadgeVariant::Success),
            ),
            SummaryCard::new(
                "Draft",
                count(items, |p| p.status == PostStatus::Draft),
                Some(BadgeVariant::Warning),
            ),
            SummaryCard::new(
                "Archived",
                count(items, |p| p.status == PostStatus::Archived),
                Some(BadgeVariant::Danger),
            ),
            SummaryCard::new(
                "Total views",
                items.iter().map(|p| p.views).sum(),
                Some(BadgeVariant::Secondary),
            ),
        ]
    }

    fn build(id: i64, created_at: String, draft: PostDraft) -> Post {
        Post {
            id,
            title: draft.title.unwrap_or_default(),
            content: draft.content.unwrap_or_default(),
            author: draft.author.unwrap_or_default(),
            category: draft.category.unwrap_or(Category::Development),
            status: draft.status.unwrap_or(PostStatus::Draft),
            views: 0,
            created_at,
        }
    }

    fn merge(entity: &mut Post, draft: PostDraft) {
        if let Some(title) = draft.title {
            entity.title = title;
        }
        if let Some(content) = draft.content {
            entity.content = content;
        }
        if let Some(author) = draft.author {
            entity.author = author;
        }
        if let Some(category) = draft.category {
            entity.category = category;
        }
        if let Some(status) = draft.status {
            entity.status = status;
        }
    }

    fn set_status(entity: &mut Post, status: PostStatus) {
        entity.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{allowed_actions, row, target};

    fn post(status: PostStatus) -> Post {
        Post {
            id: 7,
            title: "Hello".into(),
            content: "Body".into(),
            author: "alice".into(),
            category: Category::Design,
            status,
            views: 12,
            created_at: "2024-03-01".into(),
        }
    }

    #[test]
    fn lifecycle_never_returns_to_draft() {
        assert_eq!(
            target::<PostKind>(PostStatus::Draft, Action::Publish),
            Some(PostStatus::Published)
        );
        assert_eq!(
            target::<PostKind>(PostStatus::Published, Action::Archive),
            Some(PostStatus::Archived)
        );
        assert_eq!(
            target::<PostKind>(PostStatus::Archived, Action::Restore),
            Some(PostStatus::Published)
        );
        assert_eq!(target::<PostKind>(PostStatus::Draft, Action::Archive), None);
        assert_eq!(target::<PostKind>(PostStatus::Published, Action::Publish), None);
        assert!(TRANSITIONS.iter().all(|t| t.to != PostStatus::Draft));
    }

    #[test]
    fn each_status_offers_one_action() {
        assert_eq!(allowed_actions::<PostKind>(PostStatus::Draft), vec![Action::Publish]);
        assert_eq!(
            allowed_actions::<PostKind>(PostStatus::Published),
            vec![Action::Archive]
        );
        assert_eq!(
            allowed_actions::<PostKind>(PostStatus::Archived),
            vec![Action::Restore]
        );
    }

    #[test]
    fn defaults_fill_status_and_content_only() {
        let draft = PostKind::with_defaults(PostDraft {
            title: Some("A".into()),
            author: Some("B".into()),
            category: Some(Category::Design),
            ..PostDraft::default()
        });
        assert_eq!(draft.status, Some(PostStatus::Draft));
        assert_eq!(draft.content.as_deref(), Some(""));
        assert_eq!(draft.title.as_deref(), Some("A"));

        let kept = PostKind::with_defaults(PostDraft {
            status: Some(PostStatus::Published),
            ..PostDraft::default()
        });
        assert_eq!(kept.status, Some(PostStatus::Published));
    }

    #[test]
    fn set_field_validates_select_values() {
        let mut draft = PostDraft::default();
        draft.set_field("category", "Accessibility").unwrap();
        assert_eq!(draft.category, Some(Category::Accessibility));
        assert_eq!(draft.field("category").as_deref(), Some("accessibility"));

        let err = draft.set_field("category", "marketing").unwrap_err();
        assert_eq!(
            err,
            FieldError::InvalidValue {
                field: "category",
                value: "marketing".into()
            }
        );
        assert_eq!(
            draft.set_field("views", "10"),
            Err(FieldError::UnknownField("views".into()))
        );
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let json = serde_json::to_value(post(PostStatus::Archived)).unwrap();
        assert_eq!(json["createdAt"], "2024-03-01");
        assert_eq!(json["status"], "archived");
        assert_eq!(json["category"], "design");

        let draft = serde_json::to_value(PostDraft {
            title: Some("T".into()),
            ..PostDraft::default()
        })
        .unwrap();
        assert_eq!(draft, serde_json::json!({ "title": "T" }));
    }

    #[test]
    fn summary_counts_statuses_and_views() {
        let mut second = post(PostStatus::Published);
        second.views = 30;
        let items = vec![post(PostStatus::Draft), second, post(PostStatus::Archived)];
        let values: Vec<(&str, u64)> = PostKind::summary(&items)
            .iter()
            .map(|card| (card.label, card.value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Total", 3),
                ("Published", 1),
                ("Draft", 1),
                ("Archived", 1),
                ("Total views", 54),
            ]
        );
    }

    #[test]
    fn row_follows_column_order() {
        let cells = row::<PostKind>(&post(PostStatus::Draft));
        let text: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            text,
            vec!["7", "Hello", "alice", "Design", "Draft", "12", "2024-03-01"]
        );
        assert_eq!(cells[4].badge().and_then(|b| b.variant), Some(BadgeVariant::Warning));
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut entity = post(PostStatus::Draft);
        PostKind::merge(
            &mut entity,
            PostDraft {
                title: Some("Renamed".into()),
                ..PostDraft::default()
            },
        );
        assert_eq!(entity.title, "Renamed");
        assert_eq!(entity.author, "alice");
        assert_eq!(entity.status, PostStatus::Draft);
    }

    #[test]
    fn every_form_field_binds() {
        let mut draft = PostDraft::default();
        for field in PostKind::fields() {
            let value = field.options().first().copied().unwrap_or("value");
            draft.set_field(field.name, value).unwrap();
            assert_eq!(draft.field(field.name).as_deref(), Some(value));
        }
    }

    #[test]
    fn development_category_uses_default_badge() {
        let badge = Category::Development.badge();
        assert_eq!(badge.label, "Development");
        assert_eq!(badge.variant, None);
        assert_eq!(Category::Design.badge().variant, Some(BadgeVariant::Info));
    }
}

//! Presentation-neutral projections of controller state: badges, summary
//! cards, table columns and form field schemas.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    /// `None` renders the default badge style.
    pub variant: Option<BadgeVariant>,
}

impl Badge {
    pub const fn new(label: &'static str, variant: BadgeVariant) -> Self {
        Self {
            label,
            variant: Some(variant),
        }
    }

    pub const fn plain(label: &'static str) -> Self {
        Self {
            label,
            variant: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub label: &'static str,
    pub value: u64,
    pub variant: Option<BadgeVariant>,
}

impl SummaryCard {
    pub fn new(label: &'static str, value: u64, variant: Option<BadgeVariant>) -> Self {
        Self {
            label,
            value,
            variant,
        }
    }
}

/// Counts the entries matching `pred`.
pub(crate) fn count<T>(items: &[T], pred: impl Fn(&T) -> bool) -> u64 {
    items.iter().filter(|item| pred(*item)).count() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

impl Column {
    pub const fn new(key: &'static str, header: &'static str) -> Self {
        Self { key, header }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Badge(Badge),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn badge(&self) -> Option<Badge> {
        match self {
            Self::Badge(badge) => Some(*badge),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Badge(badge) => f.write_str(badge.label),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Email,
    TextArea,
    Select(&'static [&'static str]),
}

/// One input of a create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: FieldInput,
    pub required: bool,
    /// Value the form shows when the draft has none.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, input: FieldInput) -> Self {
        Self {
            name,
            label,
            input,
            required: false,
            default: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn with_default(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.input {
            FieldInput::Select(options) => options,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_cell_displays_label() {
        let cell = Cell::Badge(Badge::new("Draft", BadgeVariant::Warning));
        assert_eq!(cell.to_string(), "Draft");
        assert_eq!(cell.badge().and_then(|b| b.variant), Some(BadgeVariant::Warning));
        assert_eq!(Cell::text("x").badge(), None);
        assert_eq!(Badge::plain("Development").variant, None);
    }

    #[test]
    fn select_field_exposes_options() {
        let field = FieldSpec::new("role", "Role", FieldInput::Select(&["user", "admin"]))
            .with_default("user");
        assert_eq!(field.options(), &["user", "admin"]);
        assert_eq!(field.default, Some("user"));
        assert!(!field.required);
        assert!(FieldSpec::new("title", "Title", FieldInput::Text)
            .options()
            .is_empty());
    }
}

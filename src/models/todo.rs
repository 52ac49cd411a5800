//! Todos

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, yes_no, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    Priority {
        Low => "low", "Low";
        Medium => "medium", "Medium";
        High => "high", "High";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default, with = "iso_date::option")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
}

impl Record for Todo {
    const RESOURCE: &'static str = "todos";
    const SINGULAR: &'static str = "Todo";
    const PLURAL: &'static str = "Todos";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("title", "Title", FieldKind::Text),
            FieldSpec::optional("description", "Description", FieldKind::TextArea),
            FieldSpec::required("priority", "Priority", FieldKind::Select(Priority::OPTIONS)),
            FieldSpec::optional("dueDate", "Due date", FieldKind::Date),
            FieldSpec::optional("completed", "Completed", FieldKind::Checkbox),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Title", "Priority", "Due", "Done"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.priority.to_string(),
            format_date(self.due_date),
            yes_no(self.completed),
        ]
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.description.as_deref().unwrap_or(""), self.priority.label())
    }

    fn category_label() -> Option<&'static str> {
        Some("Priority")
    }

    fn category(&self) -> Option<String> {
        Some(self.priority.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Due date")
    }

    fn date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("title", &self.title)
            .with("description", self.description.clone().unwrap_or_default())
            .with("priority", self.priority.as_str())
            .with("dueDate", format_date(self.due_date))
            .with("completed", self.completed.to_string())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.to_string(),
            title: draft.text("title"),
            description: draft.optional_text("description"),
            priority: Priority::from_draft(draft, "priority", "Priority")?,
            due_date: draft.optional_date("dueDate", "Due date")?,
            completed: draft.flag("completed"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_completed_defaults_false() {
        let todo: Todo = serde_json::from_str(r#"{"id":"t1","title":"Call bank","priority":"high"}"#).unwrap();
        assert!(!todo.completed);
        assert_eq!(todo.category(), Some("High".to_string()));
    }

    #[test]
    fn test_checkbox_round_trip() {
        let draft = Draft::blank(Todo::fields()).with("title", "File taxes").with("completed", "true");
        let todo = Todo::from_draft("t2", &draft).unwrap();
        assert!(todo.completed);
        assert_eq!(todo.to_draft().get("completed"), "true");
    }
}

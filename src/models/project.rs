//! Projects
//!
//! Also the work items of the status board. `status` is the board column.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    /// Board columns, in display order
    ProjectStatus {
        New => "New", "New";
        Working => "Working", "Working";
        Complete => "Complete", "Complete";
    }
}

impl ProjectStatus {
    /// Column position on the board
    pub fn column_index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub status: ProjectStatus,
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, with = "iso_date::option")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Record for Project {
    const RESOURCE: &'static str = "projects";
    const SINGULAR: &'static str = "Project";
    const PLURAL: &'static str = "Projects";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::optional("client", "Client", FieldKind::Text),
            FieldSpec::optional("category", "Category", FieldKind::Text),
            FieldSpec::required("status", "Status", FieldKind::Select(ProjectStatus::OPTIONS)),
            FieldSpec::optional("startDate", "Start date", FieldKind::Date),
            FieldSpec::optional("endDate", "End date", FieldKind::Date),
            FieldSpec::optional("description", "Description", FieldKind::TextArea),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Client", "Category", "Status", "Start", "End"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.client.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.status.to_string(),
            format_date(self.start_date),
            format_date(self.end_date),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name,
            self.client.as_deref().unwrap_or(""),
            self.category.as_deref().unwrap_or(""),
            self.status.label()
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Category")
    }

    fn category(&self) -> Option<String> {
        self.category.clone()
    }

    fn date_label() -> Option<&'static str> {
        Some("Start date")
    }

    fn date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("name", &self.name)
            .with("client", self.client.clone().unwrap_or_default())
            .with("category", self.category.clone().unwrap_or_default())
            .with("status", self.status.as_str())
            .with("startDate", format_date(self.start_date))
            .with("endDate", format_date(self.end_date))
            .with("description", self.description.clone().unwrap_or_default())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let start_date = draft.optional_date("startDate", "Start date")?;
        let end_date = draft.optional_date("endDate", "End date")?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(ValidationError::Rule("End date cannot be before start date".to_string()));
            }
        }
        Ok(Self {
            id: id.to_string(),
            name: draft.text("name"),
            client: draft.optional_text("client"),
            category: draft.optional_text("category"),
            status: ProjectStatus::from_draft(draft, "status", "Status")?,
            start_date,
            end_date,
            description: draft.optional_text("description"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_columns_are_ordered() {
        assert_eq!(ProjectStatus::ALL, &[ProjectStatus::New, ProjectStatus::Working, ProjectStatus::Complete]);
        assert_eq!(ProjectStatus::Complete.column_index(), 2);
        assert_eq!(serde_json::to_string(&ProjectStatus::Working).unwrap(), "\"Working\"");
    }

    #[test]
    fn test_unknown_status_rejected_at_boundary() {
        let json = r#"{"id":"1","name":"Site","status":"Archived"}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let draft = Draft::blank(Project::fields())
            .with("name", "Migration")
            .with("startDate", "2024-05-10")
            .with("endDate", "2024-05-01");
        assert_eq!(
            Project::from_draft("", &draft),
            Err(ValidationError::Rule("End date cannot be before start date".to_string()))
        );
    }
}

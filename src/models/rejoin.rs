//! Rejoining requests from former staff

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, ApprovalStatus, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejoinRequest {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub employee_name: String,
    pub email: String,
    #[serde(default)]
    pub previous_position: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(with = "iso_date")]
    pub requested_date: NaiveDate,
    pub status: ApprovalStatus,
}

impl Record for RejoinRequest {
    const RESOURCE: &'static str = "rejoining-requests";
    const SINGULAR: &'static str = "Rejoining request";
    const PLURAL: &'static str = "Rejoining requests";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("employeeName", "Employee", FieldKind::Text),
            FieldSpec::required("email", "Email", FieldKind::Email),
            FieldSpec::optional("previousPosition", "Previous position", FieldKind::Text),
            FieldSpec::optional("reason", "Reason", FieldKind::TextArea),
            FieldSpec::required("requestedDate", "Requested on", FieldKind::Date),
            FieldSpec::required("status", "Status", FieldKind::Select(ApprovalStatus::OPTIONS)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Employee", "Email", "Previous position", "Requested", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_name.clone(),
            self.email.clone(),
            self.previous_position.clone().unwrap_or_default(),
            format_date(Some(self.requested_date)),
            self.status.to_string(),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.employee_name,
            self.email,
            self.previous_position.as_deref().unwrap_or(""),
            self.status.label()
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Status")
    }

    fn category(&self) -> Option<String> {
        Some(self.status.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Requested on")
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.requested_date)
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("employeeName", &self.employee_name)
            .with("email", &self.email)
            .with("previousPosition", self.previous_position.clone().unwrap_or_default())
            .with("reason", self.reason.clone().unwrap_or_default())
            .with("requestedDate", format_date(Some(self.requested_date)))
            .with("status", self.status.as_str())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.to_string(),
            employee_name: draft.text("employeeName"),
            email: draft.text("email"),
            previous_position: draft.optional_text("previousPosition"),
            reason: draft.optional_text("reason"),
            requested_date: draft.date("requestedDate", "Requested on")?,
            status: ApprovalStatus::from_draft(draft, "status", "Status")?,
        })
    }
}

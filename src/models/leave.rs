//! Leave applications

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, ApprovalStatus, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    LeaveType {
        Sick => "sick", "Sick";
        Casual => "casual", "Casual";
        Annual => "annual", "Annual";
        Unpaid => "unpaid", "Unpaid";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub employee_name: String,
    pub leave_type: LeaveType,
    #[serde(with = "iso_date")]
    pub from_date: NaiveDate,
    #[serde(with = "iso_date")]
    pub to_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: ApprovalStatus,
}

impl Leave {
    /// Calendar days covered, both ends included
    pub fn days(&self) -> i64 {
        (self.to_date - self.from_date).num_days() + 1
    }
}

impl Record for Leave {
    const RESOURCE: &'static str = "leaves";
    const SINGULAR: &'static str = "Leave";
    const PLURAL: &'static str = "Leaves";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("employeeName", "Employee", FieldKind::Text),
            FieldSpec::required("leaveType", "Leave type", FieldKind::Select(LeaveType::OPTIONS)),
            FieldSpec::required("fromDate", "From", FieldKind::Date),
            FieldSpec::required("toDate", "To", FieldKind::Date),
            FieldSpec::optional("reason", "Reason", FieldKind::TextArea),
            FieldSpec::required("status", "Status", FieldKind::Select(ApprovalStatus::OPTIONS)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Employee", "Type", "From", "To", "Days", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_name.clone(),
            self.leave_type.to_string(),
            format_date(Some(self.from_date)),
            format_date(Some(self.to_date)),
            self.days().to_string(),
            self.status.to_string(),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.employee_name,
            self.leave_type.label(),
            self.reason.as_deref().unwrap_or(""),
            self.status.label()
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Leave type")
    }

    fn category(&self) -> Option<String> {
        Some(self.leave_type.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("From")
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.from_date)
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("employeeName", &self.employee_name)
            .with("leaveType", self.leave_type.as_str())
            .with("fromDate", format_date(Some(self.from_date)))
            .with("toDate", format_date(Some(self.to_date)))
            .with("reason", self.reason.clone().unwrap_or_default())
            .with("status", self.status.as_str())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let from_date = draft.date("fromDate", "From")?;
        let to_date = draft.date("toDate", "To")?;
        if to_date < from_date {
            return Err(ValidationError::Rule("Leave cannot end before it starts".to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            employee_name: draft.text("employeeName"),
            leave_type: LeaveType::from_draft(draft, "leaveType", "Leave type")?,
            from_date,
            to_date,
            reason: draft.optional_text("reason"),
            status: ApprovalStatus::from_draft(draft, "status", "Status")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(from: &str, to: &str) -> Draft {
        Draft::blank(Leave::fields())
            .with("employeeName", "Sara")
            .with("fromDate", from)
            .with("toDate", to)
    }

    #[test]
    fn test_days_inclusive() {
        let leave = Leave::from_draft("", &draft("2024-07-01", "2024-07-03")).unwrap();
        assert_eq!(leave.days(), 3);
        assert_eq!(leave.leave_type, LeaveType::Sick);
        assert_eq!(leave.status, ApprovalStatus::Pending);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = Leave::from_draft("", &draft("2024-07-03", "2024-07-01")).unwrap_err();
        assert_eq!(err.to_string(), "Leave cannot end before it starts");
    }
}

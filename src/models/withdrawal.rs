//! Withdrawal requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, money, ApprovalStatus, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    WithdrawalMethod {
        Bank => "bank", "Bank transfer";
        Cash => "cash", "Cash";
        Cheque => "cheque", "Cheque";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub employee_name: String,
    pub amount: f64,
    pub method: WithdrawalMethod,
    #[serde(with = "iso_date")]
    pub requested_date: NaiveDate,
    pub status: ApprovalStatus,
    #[serde(default)]
    pub note: Option<String>,
}

impl Record for Withdrawal {
    const RESOURCE: &'static str = "withdrawals";
    const SINGULAR: &'static str = "Withdrawal";
    const PLURAL: &'static str = "Withdrawals";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("employeeName", "Employee", FieldKind::Text),
            FieldSpec::required("amount", "Amount", FieldKind::Number),
            FieldSpec::required("method", "Method", FieldKind::Select(WithdrawalMethod::OPTIONS)),
            FieldSpec::required("requestedDate", "Requested on", FieldKind::Date),
            FieldSpec::required("status", "Status", FieldKind::Select(ApprovalStatus::OPTIONS)),
            FieldSpec::optional("note", "Note", FieldKind::TextArea),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Employee", "Amount", "Method", "Requested", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_name.clone(),
            money(self.amount),
            self.method.to_string(),
            format_date(Some(self.requested_date)),
            self.status.to_string(),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.employee_name,
            self.method.label(),
            self.status.label(),
            self.note.as_deref().unwrap_or("")
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Method")
    }

    fn category(&self) -> Option<String> {
        Some(self.method.label().to_string())
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
            .with("amount", self.amount.to_string())
            .with("method", self.method.as_str())
            .with("requestedDate", format_date(Some(self.requested_date)))
            .with("status", self.status.as_str())
            .with("note", self.note.clone().unwrap_or_default())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let amount = draft.number("amount", "Amount")?;
        if amount <= 0.0 {
            return Err(ValidationError::Rule("Withdrawal amount must be greater than zero".to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            employee_name: draft.text("employeeName"),
            amount,
            method: WithdrawalMethod::from_draft(draft, "method", "Method")?,
            requested_date: draft.date("requestedDate", "Requested on")?,
            status: ApprovalStatus::from_draft(draft, "status", "Status")?,
            note: draft.optional_text("note"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_positive() {
        let draft = Draft::blank(Withdrawal::fields())
            .with("employeeName", "Ivo")
            .with("amount", "0")
            .with("requestedDate", "2024-02-02");
        assert!(Withdrawal::from_draft("", &draft).is_err());

        let ok = Withdrawal::from_draft("", &draft.with("amount", "75")).unwrap();
        assert_eq!(ok.method, WithdrawalMethod::Bank);
        assert_eq!(ok.cells()[2], "Bank transfer");
    }
}

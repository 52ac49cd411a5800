//! Employee loans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, money, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    LoanStatus {
        Pending => "pending", "Pending";
        Approved => "approved", "Approved";
        Rejected => "rejected", "Rejected";
        Closed => "closed", "Closed";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub employee_name: String,
    pub amount: f64,
    pub installments: u32,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: LoanStatus,
    #[serde(default, with = "iso_date::option")]
    pub applied_on: Option<NaiveDate>,
}

impl Loan {
    pub fn installment_amount(&self) -> f64 {
        if self.installments == 0 {
            return self.amount;
        }
        self.amount / self.installments as f64
    }
}

impl Record for Loan {
    const RESOURCE: &'static str = "loans";
    const SINGULAR: &'static str = "Loan";
    const PLURAL: &'static str = "Loans";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("employeeName", "Employee", FieldKind::Text),
            FieldSpec::required("amount", "Amount", FieldKind::Number),
            FieldSpec::required("installments", "Installments", FieldKind::Number),
            FieldSpec::optional("reason", "Reason", FieldKind::TextArea),
            FieldSpec::required("status", "Status", FieldKind::Select(LoanStatus::OPTIONS)),
            FieldSpec::optional("appliedOn", "Applied on", FieldKind::Date),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Employee", "Amount", "Installments", "Per installment", "Status", "Applied"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_name.clone(),
            money(self.amount),
            self.installments.to_string(),
            money(self.installment_amount()),
            self.status.to_string(),
            format_date(self.applied_on),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.employee_name,
            self.reason.as_deref().unwrap_or(""),
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
        Some("Applied on")
    }

    fn date(&self) -> Option<NaiveDate> {
        self.applied_on
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("employeeName", &self.employee_name)
            .with("amount", self.amount.to_string())
            .with("installments", self.installments.to_string())
            .with("reason", self.reason.clone().unwrap_or_default())
            .with("status", self.status.as_str())
            .with("appliedOn", format_date(self.applied_on))
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let amount = draft.number("amount", "Amount")?;
        if amount <= 0.0 {
            return Err(ValidationError::Rule("Loan amount must be greater than zero".to_string()));
        }
        let installments = draft.count("installments", "Installments")?;
        if installments == 0 {
            return Err(ValidationError::Rule("At least one installment is required".to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            employee_name: draft.text("employeeName"),
            amount,
            installments,
            reason: draft.optional_text("reason"),
            status: LoanStatus::from_draft(draft, "status", "Status")?,
            applied_on: draft.optional_date("appliedOn", "Applied on")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(amount: &str, installments: &str) -> Draft {
        Draft::blank(Loan::fields())
            .with("employeeName", "Kim")
            .with("amount", amount)
            .with("installments", installments)
    }

    #[test]
    fn test_installment_amount() {
        let loan = Loan::from_draft("", &draft("1200", "12")).unwrap();
        assert_eq!(loan.installment_amount(), 100.0);
        assert_eq!(loan.cells()[3], "100.00");
    }

    #[test]
    fn test_rules() {
        assert!(Loan::from_draft("", &draft("0", "3")).is_err());
        assert!(Loan::from_draft("", &draft("500", "0")).is_err());
        assert_eq!(
            Loan::from_draft("", &draft("500", "2.5")),
            Err(ValidationError::Number("Installments"))
        );
    }
}

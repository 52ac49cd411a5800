//! Payroll entries
//!
//! Net salary is always derived; the form never asks for it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, money, PaymentStatus, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payroll {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub employee_name: String,
    #[serde(with = "iso_date")]
    pub pay_date: NaiveDate,
    pub basic_salary: f64,
    #[serde(default)]
    pub allowances: f64,
    #[serde(default)]
    pub deductions: f64,
    #[serde(default)]
    pub net_salary: f64,
    pub status: PaymentStatus,
}

pub fn net_salary(basic: f64, allowances: f64, deductions: f64) -> f64 {
    basic + allowances - deductions
}

impl Payroll {
    /// Net pay from its parts; the stored `net_salary` may be missing
    pub fn net(&self) -> f64 {
        net_salary(self.basic_salary, self.allowances, self.deductions)
    }
}

impl Record for Payroll {
    const RESOURCE: &'static str = "payrolls";
    const SINGULAR: &'static str = "Payroll";
    const PLURAL: &'static str = "Payroll";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("employeeName", "Employee", FieldKind::Text),
            FieldSpec::required("payDate", "Pay date", FieldKind::Date),
            FieldSpec::required("basicSalary", "Basic salary", FieldKind::Number),
            FieldSpec::optional("allowances", "Allowances", FieldKind::Number),
            FieldSpec::optional("deductions", "Deductions", FieldKind::Number),
            FieldSpec::required("status", "Status", FieldKind::Select(PaymentStatus::OPTIONS)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Employee", "Pay date", "Basic", "Allowances", "Deductions", "Net", "Status"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.employee_name.clone(),
            format_date(Some(self.pay_date)),
            money(self.basic_salary),
            money(self.allowances),
            money(self.deductions),
            money(self.net()),
            self.status.to_string(),
        ]
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.employee_name, self.pay_date.format("%Y-%m %B"), self.status.label())
    }

    fn category_label() -> Option<&'static str> {
        Some("Status")
    }

    fn category(&self) -> Option<String> {
        Some(self.status.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Pay date")
    }

    fn date(&self) -> Option<NaiveDate> {
        Some(self.pay_date)
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("employeeName", &self.employee_name)
            .with("payDate", format_date(Some(self.pay_date)))
            .with("basicSalary", self.basic_salary.to_string())
            .with("allowances", self.allowances.to_string())
            .with("deductions", self.deductions.to_string())
            .with("status", self.status.as_str())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        let basic_salary = draft.number("basicSalary", "Basic salary")?;
        let allowances = draft.optional_number("allowances", "Allowances")?;
        let deductions = draft.optional_number("deductions", "Deductions")?;
        if basic_salary < 0.0 || allowances < 0.0 || deductions < 0.0 {
            return Err(ValidationError::Rule("Amounts cannot be negative".to_string()));
        }
        Ok(Self {
            id: id.to_string(),
            employee_name: draft.text("employeeName"),
            pay_date: draft.date("payDate", "Pay date")?,
            basic_salary,
            allowances,
            deductions,
            net_salary: net_salary(basic_salary, allowances, deductions),
            status: PaymentStatus::from_draft(draft, "status", "Status")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Draft {
        Draft::blank(Payroll::fields())
            .with("employeeName", "Omar")
            .with("payDate", "2024-08-31")
            .with("basicSalary", "3000")
            .with("allowances", "250.5")
            .with("deductions", "100")
    }

    #[test]
    fn test_net_salary_derived() {
        let payroll = Payroll::from_draft("", &draft()).unwrap();
        assert_eq!(payroll.net_salary, 3150.5);
        assert_eq!(payroll.cells()[5], "3150.50");
        assert!(payroll.search_text().contains("August"));
    }

    #[test]
    fn test_net_shown_when_backend_omits_it() {
        let json = r#"{"_id":"p1","employeeName":"Omar","payDate":"2024-08-31","basicSalary":2000,"allowances":300,"deductions":50,"status":"paid"}"#;
        let payroll: Payroll = serde_json::from_str(json).unwrap();
        assert_eq!(payroll.net_salary, 0.0);
        assert_eq!(payroll.cells()[5], "2250.00");
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let err = Payroll::from_draft("", &draft().with("deductions", "-5")).unwrap_err();
        assert_eq!(err, ValidationError::Rule("Amounts cannot be negative".to_string()));
    }
}

//! Customers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    CustomerKind {
        Individual => "individual", "Individual";
        Business => "business", "Business";
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "customerType")]
    pub kind: CustomerKind,
    /// Set by the backend
    #[serde(default, with = "iso_date::option", skip_serializing)]
    pub created_at: Option<NaiveDate>,
}

impl Record for Customer {
    const RESOURCE: &'static str = "customers";
    const SINGULAR: &'static str = "Customer";
    const PLURAL: &'static str = "Customers";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::required("email", "Email", FieldKind::Email),
            FieldSpec::optional("phone", "Phone", FieldKind::Text),
            FieldSpec::optional("company", "Company", FieldKind::Text),
            FieldSpec::optional("address", "Address", FieldKind::TextArea),
            FieldSpec::required("customerType", "Type", FieldKind::Select(CustomerKind::OPTIONS)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Phone", "Company", "Type", "Since"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
            self.company.clone().unwrap_or_default(),
            self.kind.to_string(),
            format_date(self.created_at),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name,
            self.email,
            self.phone.as_deref().unwrap_or(""),
            self.company.as_deref().unwrap_or(""),
            self.address.as_deref().unwrap_or("")
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Type")
    }

    fn category(&self) -> Option<String> {
        Some(self.kind.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Created")
    }

    fn date(&self) -> Option<NaiveDate> {
        self.created_at
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("phone", self.phone.clone().unwrap_or_default())
            .with("company", self.company.clone().unwrap_or_default())
            .with("address", self.address.clone().unwrap_or_default())
            .with("customerType", self.kind.as_str())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.to_string(),
            name: draft.text("name"),
            email: draft.text("email"),
            phone: draft.optional_text("phone"),
            company: draft.optional_text("company"),
            address: draft.optional_text("address"),
            kind: CustomerKind::from_draft(draft, "customerType", "Type")?,
            created_at: None,
        })
    }
}

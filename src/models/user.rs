//! Staff accounts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{iso_date, yes_no, Record};
use crate::form::{format_date, Draft, FieldKind, FieldSpec, ValidationError};

choice_enum! {
    Role {
        Admin => "admin", "Admin";
        Manager => "manager", "Manager";
        Employee => "employee", "Employee";
    }
}

const ACTIVE: &[(&str, &str)] = &[("true", "Active"), ("false", "Inactive")];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub joining_date: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Record for User {
    const RESOURCE: &'static str = "users";
    const SINGULAR: &'static str = "User";
    const PLURAL: &'static str = "Users";

    fn id(&self) -> &str {
        &self.id
    }

    fn fields() -> &'static [FieldSpec] {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::required("name", "Name", FieldKind::Text),
            FieldSpec::required("email", "Email", FieldKind::Email),
            FieldSpec::required("role", "Role", FieldKind::Select(Role::OPTIONS)),
            FieldSpec::optional("department", "Department", FieldKind::Text),
            FieldSpec::optional("phone", "Phone", FieldKind::Text),
            FieldSpec::optional("joiningDate", "Joining date", FieldKind::Date),
            FieldSpec::required("active", "Status", FieldKind::Select(ACTIVE)),
        ];
        FIELDS
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "Email", "Role", "Department", "Joined", "Active"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            self.department.clone().unwrap_or_default(),
            format_date(self.joining_date),
            yes_no(self.active),
        ]
    }

    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name,
            self.email,
            self.role.label(),
            self.department.as_deref().unwrap_or(""),
            self.phone.as_deref().unwrap_or("")
        )
    }

    fn category_label() -> Option<&'static str> {
        Some("Role")
    }

    fn category(&self) -> Option<String> {
        Some(self.role.label().to_string())
    }

    fn date_label() -> Option<&'static str> {
        Some("Joining date")
    }

    fn date(&self) -> Option<NaiveDate> {
        self.joining_date
    }

    fn to_draft(&self) -> Draft {
        Draft::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("role", self.role.as_str())
            .with("department", self.department.clone().unwrap_or_default())
            .with("phone", self.phone.clone().unwrap_or_default())
            .with("joiningDate", format_date(self.joining_date))
            .with("active", self.active.to_string())
    }

    fn from_draft(id: &str, draft: &Draft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: id.to_string(),
            name: draft.text("name"),
            email: draft.text("email").to_lowercase(),
            role: Role::from_draft(draft, "role", "Role")?,
            department: draft.optional_text("department"),
            phone: draft.optional_text("phone"),
            joining_date: draft.optional_date("joiningDate", "Joining date")?,
            active: draft.flag("active"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_shape() {
        let json = r#"{"_id":"64f1","name":"Rina","email":"rina@office.io","role":"manager","joiningDate":"2023-01-15T00:00:00.000Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "64f1");
        assert_eq!(user.role, Role::Manager);
        assert_eq!(user.joining_date, NaiveDate::from_ymd_opt(2023, 1, 15));
        assert!(user.active);
    }

    #[test]
    fn test_unknown_role_rejected() {
        let json = r#"{"id":"1","name":"X","email":"x@y.io","role":"owner"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_draft_round_trip_keeps_record() {
        let user = User {
            id: "7".into(),
            name: "Tom".into(),
            email: "tom@office.io".into(),
            role: Role::Employee,
            department: Some("Sales".into()),
            phone: None,
            joining_date: NaiveDate::from_ymd_opt(2022, 6, 1),
            active: false,
        };
        assert_eq!(User::from_draft("7", &user.to_draft()), Ok(user));
    }

    #[test]
    fn test_new_record_omits_empty_id() {
        let draft = Draft::blank(User::fields()).with("name", "Ana").with("email", "Ana@Office.io");
        let user = User::from_draft("", &draft).unwrap();
        let body = serde_json::to_value(&user).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["email"], "ana@office.io");
        assert_eq!(body["role"], "admin");
        assert_eq!(body["active"], true);
    }
}
